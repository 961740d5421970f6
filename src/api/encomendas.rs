use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, ApiQuery, filter, require};
use crate::events::Event;
use crate::model::encomenda::{Encomenda, EncomendaStatus, EncomendaView, NovaEncomenda};

#[derive(Debug, Deserialize)]
pub struct EncomendaFiltro {
    status: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filtro): ApiQuery<EncomendaFiltro>,
) -> ApiResult<Json<Vec<EncomendaView>>> {
    let status = filter(filtro.status.as_deref())?;
    let encomendas = state
        .db
        .list_encomendas(status)
        .or_internal("Erro ao buscar encomendas")?;
    Ok(Json(encomendas))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(nova): ApiJson<NovaEncomenda>,
) -> ApiResult<(StatusCode, Json<Encomenda>)> {
    require(&nova.descricao, "descricao")?;
    let encomenda = state
        .db
        .create_encomenda(&nova)
        .or_internal("Erro ao registrar encomenda")?;
    if encomenda.status == EncomendaStatus::NaPortaria {
        state.events.emit(Event::EncomendaRecebida {
            id: encomenda.id,
            destinatario_id: encomenda.destinatario_id,
        });
    }
    Ok((StatusCode::CREATED, Json(encomenda)))
}

pub async fn entregar(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Encomenda>> {
    let encomenda = state
        .db
        .entregar_encomenda(id)
        .or_internal("Erro ao atualizar encomenda")?
        .ok_or_else(|| ApiError::NotFound("Encomenda não encontrada".into()))?;
    state.events.emit(Event::EncomendaEntregue { id });
    Ok(Json(encomenda))
}
