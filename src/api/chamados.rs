use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, ApiQuery, filter, require};
use crate::events::Event;
use crate::model::chamado::{
    Chamado, ChamadoPatch, ChamadoView, Comentario, ComentarioView, HistoricoView, NovoChamado,
    NovoComentario,
};

#[derive(Debug, Deserialize)]
pub struct ChamadoFiltro {
    status: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filtro): ApiQuery<ChamadoFiltro>,
) -> ApiResult<Json<Vec<ChamadoView>>> {
    let status = filter(filtro.status.as_deref())?;
    let chamados = state
        .db
        .list_chamados(state.tenant.condominio_id, status)
        .or_internal("Erro ao buscar chamados")?;
    Ok(Json(chamados))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(novo): ApiJson<NovoChamado>,
) -> ApiResult<(StatusCode, Json<Chamado>)> {
    require(&novo.titulo, "titulo")?;
    let chamado = state
        .db
        .create_chamado(state.tenant.condominio_id, state.tenant.usuario_id, &novo)
        .or_internal("Erro ao criar chamado")?;
    state.events.emit(Event::ChamadoAberto {
        id: chamado.id,
        titulo: chamado.titulo.clone(),
    });
    Ok((StatusCode::CREATED, Json(chamado)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<ChamadoPatch>,
) -> ApiResult<Json<Chamado>> {
    if let Some(titulo) = &patch.titulo {
        require(titulo, "titulo")?;
    }
    let chamado = state
        .db
        .update_chamado(id, state.tenant.usuario_id, &patch)?;
    if let Some(status) = patch.status {
        state.events.emit(Event::ChamadoStatusAlterado { id, status });
    }
    Ok(Json(chamado))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .db
        .delete_chamado(id)
        .or_internal("Erro ao deletar chamado")?;
    if !deleted {
        return Err(ApiError::not_found("Chamado"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_comentarios(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<ComentarioView>>> {
    let comentarios = state
        .db
        .list_comentarios(id)
        .or_internal("Erro ao buscar comentários")?
        .ok_or_else(|| ApiError::not_found("Chamado"))?;
    Ok(Json(comentarios))
}

pub async fn add_comentario(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(novo): ApiJson<NovoComentario>,
) -> ApiResult<(StatusCode, Json<Comentario>)> {
    require(&novo.texto, "texto")?;
    let comentario = state
        .db
        .add_comentario(id, state.tenant.usuario_id, &novo)
        .or_internal("Erro ao criar comentário")?
        .ok_or_else(|| ApiError::not_found("Chamado"))?;
    Ok((StatusCode::CREATED, Json(comentario)))
}

pub async fn list_historico(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<HistoricoView>>> {
    let historico = state
        .db
        .list_historico(id)
        .or_internal("Erro ao buscar histórico")?
        .ok_or_else(|| ApiError::not_found("Chamado"))?;
    Ok(Json(historico))
}
