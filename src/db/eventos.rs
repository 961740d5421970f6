use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Database;
use crate::model::evento::{Evento, EventoPatch, EventoStatus, EventoTipo, NovoEvento};

pub(crate) fn evento_from_row(row: &Row) -> rusqlite::Result<Evento> {
    Ok(Evento {
        id: row.get("id")?,
        titulo: row.get("titulo")?,
        descricao: row.get("descricao")?,
        data: row.get("data")?,
        hora: row.get("hora")?,
        local: row.get("local")?,
        responsavel: row.get("responsavel")?,
        tipo: row.get("tipo")?,
        status: row.get("status")?,
        condominio_id: row.get("condominio_id")?,
        created_at: row.get("created_at")?,
    })
}

fn fetch_evento(conn: &Connection, id: i64) -> rusqlite::Result<Option<Evento>> {
    conn.query_row("SELECT * FROM eventos WHERE id = ?1", [id], evento_from_row)
        .optional()
}

impl Database {
    /// Agenda of a condominium, soonest first.
    pub fn list_eventos(&self, condominio_id: i64) -> Result<Vec<Evento>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT * FROM eventos WHERE condominio_id = ?1 ORDER BY data ASC, id ASC",
        )?;
        let eventos = stmt
            .query_map([condominio_id], evento_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(eventos)
    }

    pub fn create_evento(&self, condominio_id: i64, novo: &NovoEvento) -> Result<Evento> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO eventos (titulo, descricao, data, hora, local, responsavel, tipo, status,
                                  condominio_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                novo.titulo,
                novo.descricao,
                novo.data.0,
                novo.hora,
                novo.local,
                novo.responsavel,
                novo.tipo.unwrap_or(EventoTipo::Outro),
                novo.status.unwrap_or(EventoStatus::Agendado),
                condominio_id,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch_evento(&conn, id)?.context("evento vanished after insert")
    }

    pub fn update_evento(&self, id: i64, patch: &EventoPatch) -> Result<Option<Evento>> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE eventos SET
                titulo      = COALESCE(?2, titulo),
                descricao   = COALESCE(?3, descricao),
                data        = COALESCE(?4, data),
                hora        = CASE WHEN ?5 THEN ?6 ELSE hora END,
                local       = CASE WHEN ?7 THEN ?8 ELSE local END,
                responsavel = CASE WHEN ?9 THEN ?10 ELSE responsavel END,
                tipo        = COALESCE(?11, tipo),
                status      = COALESCE(?12, status)
             WHERE id = ?1",
            params![
                id,
                patch.titulo,
                patch.descricao,
                patch.data.map(|d| d.0),
                patch.hora.is_some(),
                patch.hora.clone().flatten(),
                patch.local.is_some(),
                patch.local.clone().flatten(),
                patch.responsavel.is_some(),
                patch.responsavel.clone().flatten(),
                patch.tipo,
                patch.status,
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(fetch_evento(&conn, id)?)
    }

    pub fn delete_evento(&self, id: i64) -> Result<bool> {
        let conn = self.conn();
        Ok(conn.execute("DELETE FROM eventos WHERE id = ?1", [id])? > 0)
    }
}
