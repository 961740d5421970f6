use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath};

#[derive(Debug, Deserialize)]
pub struct Valor {
    valor: String,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<BTreeMap<String, String>>> {
    let settings = state
        .db
        .settings()
        .or_internal("Erro ao buscar configurações")?;
    Ok(Json(settings))
}

pub async fn set(
    State(state): State<AppState>,
    ApiPath(chave): ApiPath<String>,
    ApiJson(Valor { valor }): ApiJson<Valor>,
) -> ApiResult<StatusCode> {
    state
        .db
        .set_setting(&chave, &valor)
        .or_internal("Erro ao salvar configuração")?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    ApiPath(chave): ApiPath<String>,
) -> ApiResult<StatusCode> {
    let removed = state
        .db
        .remove_setting(&chave)
        .or_internal("Erro ao remover configuração")?;
    if !removed {
        return Err(ApiError::NotFound(format!(
            "Configuração {chave} não encontrada"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
