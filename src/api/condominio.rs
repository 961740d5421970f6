use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use super::error::{ApiError, ApiResult, ResultExt};
use super::extract::{ApiJson, ApiPath, require};
use crate::model::condominio::{
    Bloco, BlocoView, MoradorView, NovaUnidade, NovoBloco, NovoMorador, NovoPet, NovoVeiculo, Pet,
    Role, Unidade, Usuario, Veiculo,
};

pub async fn list_blocos(State(state): State<AppState>) -> ApiResult<Json<Vec<BlocoView>>> {
    let blocos = state
        .db
        .list_blocos(state.tenant.condominio_id)
        .or_internal("Erro ao buscar blocos")?;
    Ok(Json(blocos))
}

pub async fn create_bloco(
    State(state): State<AppState>,
    ApiJson(novo): ApiJson<NovoBloco>,
) -> ApiResult<(StatusCode, Json<Bloco>)> {
    require(&novo.nome, "nome")?;
    let bloco = state
        .db
        .create_bloco(state.tenant.condominio_id, &novo)
        .or_internal("Erro ao criar bloco")?;
    Ok((StatusCode::CREATED, Json(bloco)))
}

pub async fn create_unidade(
    State(state): State<AppState>,
    ApiJson(nova): ApiJson<NovaUnidade>,
) -> ApiResult<(StatusCode, Json<Unidade>)> {
    require(&nova.numero, "numero")?;
    let unidade = state
        .db
        .create_unidade(&nova)
        .or_internal("Erro ao criar unidade")?;
    Ok((StatusCode::CREATED, Json(unidade)))
}

pub async fn list_moradores(State(state): State<AppState>) -> ApiResult<Json<Vec<MoradorView>>> {
    let moradores = state
        .db
        .list_moradores(state.tenant.condominio_id)
        .or_internal("Erro ao buscar moradores")?;
    Ok(Json(moradores))
}

pub async fn create_morador(
    State(state): State<AppState>,
    ApiJson(novo): ApiJson<NovoMorador>,
) -> ApiResult<(StatusCode, Json<Usuario>)> {
    require(&novo.nome, "nome")?;
    require(&novo.email, "email")?;
    require(&novo.senha, "senha")?;
    let morador = state
        .db
        .create_usuario(state.tenant.condominio_id, Role::Morador, &novo)
        .or_internal("Erro ao criar morador")?;
    Ok((StatusCode::CREATED, Json(morador)))
}

pub async fn create_veiculo(
    State(state): State<AppState>,
    ApiPath(morador_id): ApiPath<i64>,
    ApiJson(novo): ApiJson<NovoVeiculo>,
) -> ApiResult<(StatusCode, Json<Veiculo>)> {
    require(&novo.placa, "placa")?;
    require_morador(&state, morador_id)?;
    let veiculo = state
        .db
        .create_veiculo(morador_id, &novo)
        .or_internal("Erro ao cadastrar veículo")?;
    Ok((StatusCode::CREATED, Json(veiculo)))
}

pub async fn create_pet(
    State(state): State<AppState>,
    ApiPath(morador_id): ApiPath<i64>,
    ApiJson(novo): ApiJson<NovoPet>,
) -> ApiResult<(StatusCode, Json<Pet>)> {
    require(&novo.nome, "nome")?;
    require_morador(&state, morador_id)?;
    let pet = state
        .db
        .create_pet(morador_id, &novo)
        .or_internal("Erro ao cadastrar pet")?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// Vehicles and pets only hang off residents.
fn require_morador(state: &AppState, id: i64) -> ApiResult<()> {
    let usuario = state
        .db
        .get_usuario(id)
        .or_internal("Erro ao buscar morador")?;
    match usuario {
        Some(u) if u.role == Role::Morador => Ok(()),
        _ => Err(ApiError::not_found("Morador")),
    }
}
