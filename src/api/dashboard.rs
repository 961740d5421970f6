use axum::Json;
use axum::extract::State;
use chrono::Utc;

use super::AppState;
use super::error::{ApiResult, ResultExt};
use crate::model::dashboard::{Atividade, Stats};

pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    let stats = state
        .db
        .dashboard_stats(state.tenant.condominio_id, Utc::now())
        .or_internal("Erro ao buscar estatísticas")?;
    Ok(Json(stats))
}

pub async fn atividades(State(state): State<AppState>) -> ApiResult<Json<Vec<Atividade>>> {
    let atividades = state
        .db
        .dashboard_atividades(state.tenant.condominio_id)
        .or_internal("Erro ao buscar atividades")?;
    Ok(Json(atividades))
}
