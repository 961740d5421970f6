use axum::Json;
use axum::extract::State;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::ApiJson;
use crate::auth;
use crate::model::condominio::{Credenciais, Usuario};

pub async fn login(
    State(state): State<AppState>,
    ApiJson(credenciais): ApiJson<Credenciais>,
) -> ApiResult<Json<Usuario>> {
    auth::login(&state.db, &credenciais)
        .or_internal("Erro ao autenticar")?
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("Credenciais inválidas".into()))
}
