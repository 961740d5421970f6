//! SQLite persistence.
//!
//! One connection behind a mutex, shared by cheap clones of [`Database`].
//! Each area (tickets, agenda, packages, ...) lives in its own submodule as
//! an `impl Database` block.

pub mod avisos;
pub mod chamados;
pub mod condominio;
pub mod dashboard;
pub mod documentos;
pub mod encomendas;
pub mod eventos;
pub mod prestadores;
pub mod reservas;
mod schema;
pub mod seed;
pub mod settings;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use rusqlite::Connection;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at `path` and make sure the schema exists.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        if path != ":memory:" {
            match Path::new(path).parent() {
                Some(parent) if !parent.as_os_str().is_empty() => {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                _ => {}
            }
        }
        let conn = Connection::open(path).context("failed to open database")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("failed to enable foreign keys")?;
        conn.execute_batch(schema::SCHEMA)
            .context("failed to create schema")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Poisoned locks are recovered, not propagated.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("domus.db");
        let path = path.to_str().unwrap();

        Database::open(path).unwrap();
        Database::open(path).unwrap();
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let db = Database::in_memory().unwrap();
        let err = db
            .conn()
            .execute(
                "INSERT INTO blocos (nome, condominio_id) VALUES ('Bloco Z', 999)",
                [],
            )
            .unwrap_err();
        assert!(matches!(
            err.sqlite_error_code(),
            Some(rusqlite::ErrorCode::ConstraintViolation)
        ));
    }
}
