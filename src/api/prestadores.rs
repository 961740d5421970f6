use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, require};
use crate::model::prestador::{NovoPrestador, PrestadorPatch, PrestadorView};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PrestadorView>>> {
    let now = Utc::now();
    let prestadores = state
        .db
        .list_prestadores(state.tenant.condominio_id)
        .or_internal("Erro ao buscar prestadores")?
        .into_iter()
        .map(|p| PrestadorView::new(p, now))
        .collect();
    Ok(Json(prestadores))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(novo): ApiJson<NovoPrestador>,
) -> ApiResult<(StatusCode, Json<PrestadorView>)> {
    require(&novo.nome, "nome")?;
    require(&novo.servico, "servico")?;
    let prestador = state
        .db
        .create_prestador(state.tenant.condominio_id, &novo)
        .or_internal("Erro ao criar prestador")?;
    Ok((
        StatusCode::CREATED,
        Json(PrestadorView::new(prestador, Utc::now())),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<PrestadorPatch>,
) -> ApiResult<Json<PrestadorView>> {
    if let Some(nome) = &patch.nome {
        require(nome, "nome")?;
    }
    if let Some(servico) = &patch.servico {
        require(servico, "servico")?;
    }
    let prestador = state
        .db
        .update_prestador(id, &patch)
        .or_internal("Erro ao atualizar prestador")?
        .ok_or_else(|| ApiError::not_found("Prestador"))?;
    Ok(Json(PrestadorView::new(prestador, Utc::now())))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .db
        .delete_prestador(id)
        .or_internal("Erro ao deletar prestador")?;
    if !deleted {
        return Err(ApiError::not_found("Prestador"));
    }
    Ok(StatusCode::NO_CONTENT)
}
