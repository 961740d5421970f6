use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Database;
use crate::model::prestador::{NovoPrestador, Prestador, PrestadorPatch};

fn prestador_from_row(row: &Row) -> rusqlite::Result<Prestador> {
    Ok(Prestador {
        id: row.get("id")?,
        nome: row.get("nome")?,
        servico: row.get("servico")?,
        telefone: row.get("telefone")?,
        email: row.get("email")?,
        contrato_inicio: row.get("contrato_inicio")?,
        contrato_vencimento: row.get("contrato_vencimento")?,
        condominio_id: row.get("condominio_id")?,
        created_at: row.get("created_at")?,
    })
}

fn fetch_prestador(conn: &Connection, id: i64) -> rusqlite::Result<Option<Prestador>> {
    conn.query_row(
        "SELECT * FROM prestadores WHERE id = ?1",
        [id],
        prestador_from_row,
    )
    .optional()
}

impl Database {
    pub fn list_prestadores(&self, condominio_id: i64) -> Result<Vec<Prestador>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT * FROM prestadores WHERE condominio_id = ?1 ORDER BY nome COLLATE NOCASE, id",
        )?;
        let prestadores = stmt
            .query_map([condominio_id], prestador_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(prestadores)
    }

    pub fn create_prestador(&self, condominio_id: i64, novo: &NovoPrestador) -> Result<Prestador> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO prestadores (nome, servico, telefone, email, contrato_inicio,
                                      contrato_vencimento, condominio_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                novo.nome,
                novo.servico,
                novo.telefone,
                novo.email,
                novo.contrato_inicio.map(|d| d.0),
                novo.contrato_vencimento.map(|d| d.0),
                condominio_id,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch_prestador(&conn, id)?.context("prestador vanished after insert")
    }

    pub fn update_prestador(&self, id: i64, patch: &PrestadorPatch) -> Result<Option<Prestador>> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE prestadores SET
                nome                = COALESCE(?2, nome),
                servico             = COALESCE(?3, servico),
                telefone            = CASE WHEN ?4 THEN ?5 ELSE telefone END,
                email               = CASE WHEN ?6 THEN ?7 ELSE email END,
                contrato_inicio     = CASE WHEN ?8 THEN ?9 ELSE contrato_inicio END,
                contrato_vencimento = CASE WHEN ?10 THEN ?11 ELSE contrato_vencimento END
             WHERE id = ?1",
            params![
                id,
                patch.nome,
                patch.servico,
                patch.telefone.is_some(),
                patch.telefone.clone().flatten(),
                patch.email.is_some(),
                patch.email.clone().flatten(),
                patch.contrato_inicio.is_some(),
                patch.contrato_inicio.flatten().map(|d| d.0),
                patch.contrato_vencimento.is_some(),
                patch.contrato_vencimento.flatten().map(|d| d.0),
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(fetch_prestador(&conn, id)?)
    }

    pub fn delete_prestador(&self, id: i64) -> Result<bool> {
        let conn = self.conn();
        Ok(conn.execute("DELETE FROM prestadores WHERE id = ?1", [id])? > 0)
    }
}
