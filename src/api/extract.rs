//! Extractors whose rejections render as [`ApiError`] JSON instead of
//! axum's plain-text defaults.

use std::str::FromStr;

use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;
use crate::model::UnknownVariant;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Parse an optional enum filter from a query string. Absent, empty and
/// `TODOS` all mean "no filter".
pub fn filter<T>(raw: Option<&str>) -> Result<Option<T>, UnknownVariant>
where
    T: FromStr<Err = UnknownVariant>,
{
    match raw.map(str::trim) {
        None | Some("") | Some("TODOS") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// Reject blank required text fields.
pub fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("O campo {field} é obrigatório")));
    }
    Ok(())
}
