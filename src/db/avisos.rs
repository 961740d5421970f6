use anyhow::Result;
use chrono::Utc;
use rusqlite::{Row, params};

use super::Database;
use crate::model::aviso::{Aviso, AvisoPrioridade, NovoAviso};

pub(crate) fn aviso_from_row(row: &Row) -> rusqlite::Result<Aviso> {
    Ok(Aviso {
        id: row.get("id")?,
        titulo: row.get("titulo")?,
        conteudo: row.get("conteudo")?,
        prioridade: row.get("prioridade")?,
        data_expiracao: row.get("data_expiracao")?,
        condominio_id: row.get("condominio_id")?,
        created_at: row.get("created_at")?,
    })
}

impl Database {
    pub fn list_avisos(
        &self,
        condominio_id: i64,
        prioridade: Option<AvisoPrioridade>,
    ) -> Result<Vec<Aviso>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT * FROM avisos
             WHERE condominio_id = ?1 AND (?2 IS NULL OR prioridade = ?2)
             ORDER BY created_at DESC, id DESC",
        )?;
        let avisos = stmt
            .query_map(params![condominio_id, prioridade], aviso_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(avisos)
    }

    pub fn create_aviso(&self, condominio_id: i64, novo: &NovoAviso) -> Result<Aviso> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO avisos (titulo, conteudo, prioridade, data_expiracao, condominio_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                novo.titulo,
                novo.conteudo,
                novo.prioridade.unwrap_or(AvisoPrioridade::Informativo),
                novo.data_expiracao.map(|d| d.0),
                condominio_id,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        let aviso = conn.query_row("SELECT * FROM avisos WHERE id = ?1", [id], aviso_from_row)?;
        Ok(aviso)
    }

    pub fn delete_aviso(&self, id: i64) -> Result<bool> {
        let conn = self.conn();
        Ok(conn.execute("DELETE FROM avisos WHERE id = ?1", [id])? > 0)
    }
}
