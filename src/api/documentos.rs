use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, ApiQuery, filter, require};
use crate::model::documento::{Documento, NovoDocumento};

#[derive(Debug, Deserialize)]
pub struct DocumentoFiltro {
    categoria: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filtro): ApiQuery<DocumentoFiltro>,
) -> ApiResult<Json<Vec<Documento>>> {
    let categoria = filter(filtro.categoria.as_deref())?;
    let documentos = state
        .db
        .list_documentos(state.tenant.condominio_id, categoria)
        .or_internal("Erro ao buscar documentos")?;
    Ok(Json(documentos))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(novo): ApiJson<NovoDocumento>,
) -> ApiResult<(StatusCode, Json<Documento>)> {
    require(&novo.nome, "nome")?;
    require(&novo.url, "url")?;
    let documento = state
        .db
        .create_documento(state.tenant.condominio_id, &novo)
        .or_internal("Erro ao criar documento")?;
    Ok((StatusCode::CREATED, Json(documento)))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .db
        .delete_documento(id)
        .or_internal("Erro ao deletar documento")?;
    if !deleted {
        return Err(ApiError::not_found("Documento"));
    }
    Ok(StatusCode::NO_CONTENT)
}
