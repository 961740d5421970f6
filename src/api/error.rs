use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::db::chamados::ChamadoError;
use crate::db::reservas::ReservaError;
use crate::model::UnknownVariant;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by a handler, rendered as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    /// The message goes to the client; the cause only to the log.
    #[error("{message}")]
    Internal {
        message: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{what} não encontrado"))
    }

    /// Classify a storage failure. Constraint violations (unknown foreign
    /// key, duplicate e-mail) are the client's fault; anything else is ours.
    pub fn from_storage(message: &'static str, cause: anyhow::Error) -> Self {
        if is_constraint_violation(&cause) {
            ApiError::BadRequest(format!("{message}: dados inválidos"))
        } else {
            ApiError::Internal { message, cause }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn is_constraint_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<rusqlite::Error>()
            .and_then(rusqlite::Error::sqlite_error_code)
            == Some(rusqlite::ErrorCode::ConstraintViolation)
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, cause } = &self {
            error!(error = ?cause, "{message}");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

/// Attach the route's user-facing message to a storage result.
pub trait ResultExt<T> {
    fn or_internal(self, message: &'static str) -> ApiResult<T>;
}

impl<T> ResultExt<T> for anyhow::Result<T> {
    fn or_internal(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|cause| ApiError::from_storage(message, cause))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UnknownVariant> for ApiError {
    fn from(err: UnknownVariant) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ReservaError> for ApiError {
    fn from(err: ReservaError) -> Self {
        match err {
            ReservaError::Conflito => ApiError::BadRequest(err.to_string()),
            ReservaError::NaoEncontrada => ApiError::NotFound(err.to_string()),
            ReservaError::Storage(cause) => ApiError::from_storage("Erro ao salvar reserva", cause),
        }
    }
}

impl From<ChamadoError> for ApiError {
    fn from(err: ChamadoError) -> Self {
        match err {
            ChamadoError::Resolvido => ApiError::BadRequest(err.to_string()),
            ChamadoError::NaoEncontrado => ApiError::NotFound(err.to_string()),
            ChamadoError::Storage(cause) => {
                ApiError::from_storage("Erro ao atualizar chamado", cause)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("Chamado").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::not_found("Chamado").to_string(),
            "Chamado não encontrado"
        );
    }

    #[test]
    fn internal_hides_cause() {
        let err = ApiError::from_storage("Erro ao buscar chamados", anyhow::anyhow!("disk on fire"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Erro ao buscar chamados");
    }

    #[test]
    fn constraint_violation_is_bad_request() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (x INTEGER NOT NULL)").unwrap();
        let cause = conn
            .execute("INSERT INTO t (x) VALUES (NULL)", [])
            .context("insert failed")
            .unwrap_err();

        let err = ApiError::from_storage("Erro ao criar chamado", cause);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Erro ao criar chamado"));
    }

    #[test]
    fn reserva_conflict_maps_to_bad_request() {
        let err = ApiError::from(ReservaError::Conflito);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Já existe uma reserva para este espaço nesta data"
        );
    }

    #[test]
    fn resolved_chamado_edit_maps_to_bad_request() {
        let err = ApiError::from(ChamadoError::Resolvido);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Chamado resolvido não pode ser editado");
        let err = ApiError::from(ChamadoError::NaoEncontrado);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
