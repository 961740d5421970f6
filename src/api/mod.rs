//! HTTP surface: JSON routes under `/api` plus a health check.

mod auth;
mod avisos;
mod chamados;
mod condominio;
mod dashboard;
mod documentos;
mod encomendas;
pub mod error;
mod eventos;
pub mod extract;
pub mod middleware;
mod prestadores;
mod reservas;
mod settings;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post, put};

use crate::config::Tenant;
use crate::db::Database;
use crate::events::EventBus;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub events: Arc<EventBus>,
    /// Condominium and acting user that new rows are stamped with.
    pub tenant: Tenant,
}

impl AppState {
    pub fn new(db: Database, events: Arc<EventBus>, tenant: Tenant) -> Self {
        Self { db, events, tenant }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/atividades", get(dashboard::atividades))
        .route("/chamados", get(chamados::list).post(chamados::create))
        .route(
            "/chamados/:id",
            patch(chamados::update).delete(chamados::delete),
        )
        .route(
            "/chamados/:id/comentarios",
            get(chamados::list_comentarios).post(chamados::add_comentario),
        )
        .route("/chamados/:id/historico", get(chamados::list_historico))
        .route("/eventos", get(eventos::list).post(eventos::create))
        .route("/eventos/:id", patch(eventos::update).delete(eventos::delete))
        .route("/documentos", get(documentos::list).post(documentos::create))
        .route("/documentos/:id", axum::routing::delete(documentos::delete))
        .route(
            "/prestadores",
            get(prestadores::list).post(prestadores::create),
        )
        .route(
            "/prestadores/:id",
            patch(prestadores::update).delete(prestadores::delete),
        )
        .route(
            "/espacos",
            get(reservas::list_espacos).post(reservas::create_espaco),
        )
        .route("/reservas", get(reservas::list).post(reservas::create))
        .route("/reservas/:id", patch(reservas::update))
        .route("/encomendas", get(encomendas::list).post(encomendas::create))
        .route("/encomendas/:id/entregar", patch(encomendas::entregar))
        .route("/avisos", get(avisos::list).post(avisos::create))
        .route("/avisos/:id", axum::routing::delete(avisos::delete))
        .route(
            "/blocos",
            get(condominio::list_blocos).post(condominio::create_bloco),
        )
        .route("/unidades", post(condominio::create_unidade))
        .route(
            "/moradores",
            get(condominio::list_moradores).post(condominio::create_morador),
        )
        .route("/moradores/:id/veiculos", post(condominio::create_veiculo))
        .route("/moradores/:id/pets", post(condominio::create_pet))
        .route("/auth/login", post(auth::login))
        .route("/configuracoes", get(settings::list))
        .route(
            "/configuracoes/:chave",
            put(settings::set).delete(settings::remove),
        );

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::cors))
        .layer(axum::middleware::from_fn(middleware::trace_requests))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
