use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, ApiQuery, filter, require};
use crate::events::Event;
use crate::model::aviso::{Aviso, NovoAviso};

#[derive(Debug, Deserialize)]
pub struct AvisoFiltro {
    prioridade: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filtro): ApiQuery<AvisoFiltro>,
) -> ApiResult<Json<Vec<Aviso>>> {
    let prioridade = filter(filtro.prioridade.as_deref())?;
    let avisos = state
        .db
        .list_avisos(state.tenant.condominio_id, prioridade)
        .or_internal("Erro ao buscar avisos")?;
    Ok(Json(avisos))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(novo): ApiJson<NovoAviso>,
) -> ApiResult<(StatusCode, Json<Aviso>)> {
    require(&novo.titulo, "titulo")?;
    require(&novo.conteudo, "conteudo")?;
    let aviso = state
        .db
        .create_aviso(state.tenant.condominio_id, &novo)
        .or_internal("Erro ao criar aviso")?;
    state.events.emit(Event::AvisoPublicado {
        id: aviso.id,
        prioridade: aviso.prioridade,
    });
    Ok((StatusCode::CREATED, Json(aviso)))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .db
        .delete_aviso(id)
        .or_internal("Erro ao deletar aviso")?;
    if !deleted {
        return Err(ApiError::not_found("Aviso"));
    }
    Ok(StatusCode::NO_CONTENT)
}
