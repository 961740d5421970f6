//! Runtime configuration for the HTTP server.
//!
//! Values come from the command line (with environment fallbacks, see
//! `main.rs`). Settings that the front end edits at runtime live in the
//! database instead; see [`Database::settings`](crate::db::Database::settings).

use std::net::SocketAddr;

use crate::consts::{DEFAULT_BIND, DEFAULT_CONDOMINIO_ID, DEFAULT_USUARIO_ID};

/// Whose data requests operate on. There are no sessions: every request
/// acts as this user inside this condominium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenant {
    pub condominio_id: i64,
    pub usuario_id: i64,
}

impl Default for Tenant {
    fn default() -> Self {
        Self {
            condominio_id: DEFAULT_CONDOMINIO_ID,
            usuario_id: DEFAULT_USUARIO_ID,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Database path as given, for display.
    pub db_path: String,
    pub tenant: Tenant,
    /// Open the dashboard stats in a browser once listening.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            db_path: ":memory:".to_string(),
            tenant: Tenant::default(),
            open_browser: false,
        }
    }
}

impl ServerConfig {
    /// Base URL clients should use, e.g. `http://127.0.0.1:3001`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_matches_const() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.base_url(), "http://127.0.0.1:3001");
    }

    #[test]
    fn default_tenant_is_first_condominium() {
        let tenant = Tenant::default();
        assert_eq!(tenant.condominio_id, 1);
        assert_eq!(tenant.usuario_id, 1);
    }
}
