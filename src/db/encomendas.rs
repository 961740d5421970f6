use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Database;
use super::condominio::morador_resumo;
use crate::model::encomenda::{Encomenda, EncomendaStatus, EncomendaView, NovaEncomenda};

fn encomenda_from_row(row: &Row) -> rusqlite::Result<Encomenda> {
    Ok(Encomenda {
        id: row.get("id")?,
        descricao: row.get("descricao")?,
        remetente: row.get("remetente")?,
        status: row.get("status")?,
        destinatario_id: row.get("destinatario_id")?,
        data_recebimento: row.get("data_recebimento")?,
        data_entrega: row.get("data_entrega")?,
    })
}

fn fetch_encomenda(conn: &Connection, id: i64) -> rusqlite::Result<Option<Encomenda>> {
    conn.query_row(
        "SELECT * FROM encomendas WHERE id = ?1",
        [id],
        encomenda_from_row,
    )
    .optional()
}

impl Database {
    /// Packages, most recently received first, with recipient and unit.
    pub fn list_encomendas(&self, status: Option<EncomendaStatus>) -> Result<Vec<EncomendaView>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT e.*, u.nome AS destinatario_nome,
                    un.numero AS unidade_numero, b.nome AS bloco_nome
             FROM encomendas e
             JOIN usuarios u ON u.id = e.destinatario_id
             LEFT JOIN unidades un ON un.id = u.unidade_id
             LEFT JOIN blocos b ON b.id = un.bloco_id
             WHERE ?1 IS NULL OR e.status = ?1
             ORDER BY e.data_recebimento DESC, e.id DESC",
        )?;
        let encomendas = stmt
            .query_map([status], |row| {
                Ok(EncomendaView {
                    encomenda: encomenda_from_row(row)?,
                    destinatario: morador_resumo(
                        row.get("destinatario_nome")?,
                        row.get("unidade_numero")?,
                        row.get("bloco_nome")?,
                    ),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(encomendas)
    }

    pub fn get_encomenda(&self, id: i64) -> Result<Option<Encomenda>> {
        let conn = self.conn();
        Ok(fetch_encomenda(&conn, id)?)
    }

    /// Register a package arriving at the front desk.
    pub fn create_encomenda(&self, nova: &NovaEncomenda) -> Result<Encomenda> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO encomendas (descricao, remetente, status, destinatario_id, data_recebimento)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                nova.descricao,
                nova.remetente,
                nova.status.unwrap_or(EncomendaStatus::NaPortaria),
                nova.destinatario_id,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch_encomenda(&conn, id)?.context("encomenda vanished after insert")
    }

    /// Hand a package over to its recipient.
    pub fn entregar_encomenda(&self, id: i64) -> Result<Option<Encomenda>> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE encomendas SET status = ?2, data_entrega = ?3 WHERE id = ?1",
            params![id, EncomendaStatus::Entregue, Utc::now()],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(fetch_encomenda(&conn, id)?)
    }

    /// Record that the recipient was told about a package. Only packages
    /// still waiting at the desk move; returns whether this one did.
    pub fn notificar_encomenda(&self, id: i64) -> Result<bool> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE encomendas SET status = ?2 WHERE id = ?1 AND status = ?3",
            params![id, EncomendaStatus::Notificado, EncomendaStatus::NaPortaria],
        )?;
        Ok(changed > 0)
    }
}
