use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use super::error::{ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, require};
use crate::events::Event;
use crate::model::reserva::{
    Espaco, EspacoView, NovaReserva, NovoEspaco, Reserva, ReservaPatch, ReservaView,
};

pub async fn list_espacos(State(state): State<AppState>) -> ApiResult<Json<Vec<EspacoView>>> {
    let espacos = state
        .db
        .list_espacos(state.tenant.condominio_id)
        .or_internal("Erro ao buscar espaços")?;
    Ok(Json(espacos))
}

pub async fn create_espaco(
    State(state): State<AppState>,
    ApiJson(novo): ApiJson<NovoEspaco>,
) -> ApiResult<(StatusCode, Json<Espaco>)> {
    require(&novo.nome, "nome")?;
    let espaco = state
        .db
        .create_espaco(state.tenant.condominio_id, &novo)
        .or_internal("Erro ao criar espaço")?;
    Ok((StatusCode::CREATED, Json(espaco)))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ReservaView>>> {
    let reservas = state
        .db
        .list_reservas()
        .or_internal("Erro ao buscar reservas")?;
    Ok(Json(reservas))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(nova): ApiJson<NovaReserva>,
) -> ApiResult<(StatusCode, Json<Reserva>)> {
    let reserva = state.db.create_reserva(state.tenant.usuario_id, &nova)?;
    state.events.emit(Event::ReservaSolicitada {
        id: reserva.id,
        espaco_id: reserva.espaco_id,
        data: reserva.data,
    });
    Ok((StatusCode::CREATED, Json(reserva)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<ReservaPatch>,
) -> ApiResult<Json<Reserva>> {
    Ok(Json(state.db.update_reserva(id, &patch)?))
}
