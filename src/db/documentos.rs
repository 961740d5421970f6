use anyhow::Result;
use chrono::Utc;
use rusqlite::{Row, params};

use super::Database;
use crate::model::documento::{Categoria, Documento, NovoDocumento, Visibilidade};

fn documento_from_row(row: &Row) -> rusqlite::Result<Documento> {
    Ok(Documento {
        id: row.get("id")?,
        nome: row.get("nome")?,
        url: row.get("url")?,
        categoria: row.get("categoria")?,
        visibilidade: row.get("visibilidade")?,
        observacoes: row.get("observacoes")?,
        condominio_id: row.get("condominio_id")?,
        created_at: row.get("created_at")?,
    })
}

impl Database {
    pub fn list_documentos(
        &self,
        condominio_id: i64,
        categoria: Option<Categoria>,
    ) -> Result<Vec<Documento>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT * FROM documentos
             WHERE condominio_id = ?1 AND (?2 IS NULL OR categoria = ?2)
             ORDER BY created_at DESC, id DESC",
        )?;
        let documentos = stmt
            .query_map(params![condominio_id, categoria], documento_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(documentos)
    }

    pub fn create_documento(&self, condominio_id: i64, novo: &NovoDocumento) -> Result<Documento> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO documentos (nome, url, categoria, visibilidade, observacoes,
                                     condominio_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                novo.nome,
                novo.url,
                novo.categoria.unwrap_or(Categoria::Outros),
                novo.visibilidade.unwrap_or(Visibilidade::Administracao),
                novo.observacoes,
                condominio_id,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        let documento = conn.query_row(
            "SELECT * FROM documentos WHERE id = ?1",
            [id],
            documento_from_row,
        )?;
        Ok(documento)
    }

    pub fn delete_documento(&self, id: i64) -> Result<bool> {
        let conn = self.conn();
        Ok(conn.execute("DELETE FROM documentos WHERE id = ?1", [id])? > 0)
    }
}
