use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, require};
use crate::model::evento::{EventoPatch, EventoView, NovoEvento};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EventoView>>> {
    let now = Utc::now();
    let eventos = state
        .db
        .list_eventos(state.tenant.condominio_id)
        .or_internal("Erro ao buscar eventos")?
        .into_iter()
        .map(|e| EventoView::new(e, now))
        .collect();
    Ok(Json(eventos))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(novo): ApiJson<NovoEvento>,
) -> ApiResult<(StatusCode, Json<EventoView>)> {
    require(&novo.titulo, "titulo")?;
    let evento = state
        .db
        .create_evento(state.tenant.condominio_id, &novo)
        .or_internal("Erro ao criar evento")?;
    Ok((StatusCode::CREATED, Json(EventoView::new(evento, Utc::now()))))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<EventoPatch>,
) -> ApiResult<Json<EventoView>> {
    if let Some(titulo) = &patch.titulo {
        require(titulo, "titulo")?;
    }
    let evento = state
        .db
        .update_evento(id, &patch)
        .or_internal("Erro ao atualizar evento")?
        .ok_or_else(|| ApiError::not_found("Evento"))?;
    Ok(Json(EventoView::new(evento, Utc::now())))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .db
        .delete_evento(id)
        .or_internal("Erro ao deletar evento")?;
    if !deleted {
        return Err(ApiError::not_found("Evento"));
    }
    Ok(StatusCode::NO_CONTENT)
}
