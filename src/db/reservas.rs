use anyhow::Context;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Database;
use super::condominio::morador_resumo;
use crate::model::NomeRef;
use crate::model::reserva::{
    Espaco, EspacoView, NovaReserva, NovoEspaco, Reserva, ReservaPatch, ReservaStatus,
    ReservaView,
};

/// Why a reservation could not be written.
#[derive(Debug, thiserror::Error)]
pub enum ReservaError {
    #[error("Já existe uma reserva para este espaço nesta data")]
    Conflito,
    #[error("Reserva não encontrada")]
    NaoEncontrada,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for ReservaError {
    fn from(err: rusqlite::Error) -> Self {
        ReservaError::Storage(err.into())
    }
}

fn espaco_from_row(row: &Row) -> rusqlite::Result<Espaco> {
    Ok(Espaco {
        id: row.get("id")?,
        nome: row.get("nome")?,
        descricao: row.get("descricao")?,
        capacidade: row.get("capacidade")?,
        valor_reserva: row.get("valor_reserva")?,
        regras: row.get("regras")?,
        condominio_id: row.get("condominio_id")?,
    })
}

fn reserva_from_row(row: &Row) -> rusqlite::Result<Reserva> {
    Ok(Reserva {
        id: row.get("id")?,
        espaco_id: row.get("espaco_id")?,
        morador_id: row.get("morador_id")?,
        data: row.get("data")?,
        status: row.get("status")?,
        observacoes: row.get("observacoes")?,
        created_at: row.get("created_at")?,
    })
}

fn fetch_reserva(conn: &Connection, id: i64) -> rusqlite::Result<Option<Reserva>> {
    conn.query_row("SELECT * FROM reservas WHERE id = ?1", [id], reserva_from_row)
        .optional()
}

/// Whether another active reservation already holds `espaco_id` on `data`.
fn data_ocupada(
    conn: &Connection,
    espaco_id: i64,
    data: NaiveDate,
    exceto: Option<i64>,
) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS (
            SELECT 1 FROM reservas
            WHERE espaco_id = ?1 AND data = ?2 AND status IN (?3, ?4)
              AND (?5 IS NULL OR id <> ?5)
        )",
        params![
            espaco_id,
            data,
            ReservaStatus::Pendente,
            ReservaStatus::Aprovada,
            exceto
        ],
        |row| row.get(0),
    )
}

impl Database {
    /// Spaces of a condominium with their approved reservations.
    pub fn list_espacos(&self, condominio_id: i64) -> anyhow::Result<Vec<EspacoView>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT * FROM espacos WHERE condominio_id = ?1 ORDER BY id")?;
        let espacos = stmt
            .query_map([condominio_id], espaco_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut reservas_stmt = conn.prepare(
            "SELECT * FROM reservas WHERE espaco_id = ?1 AND status = ?2 ORDER BY data",
        )?;
        let views = espacos
            .into_iter()
            .map(|espaco| {
                let reservas = reservas_stmt
                    .query_map(params![espaco.id, ReservaStatus::Aprovada], reserva_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(EspacoView { espaco, reservas })
            })
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(views)
    }

    pub fn create_espaco(&self, condominio_id: i64, novo: &NovoEspaco) -> anyhow::Result<Espaco> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO espacos (nome, descricao, capacidade, valor_reserva, regras, condominio_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                novo.nome,
                novo.descricao,
                novo.capacidade,
                novo.valor_reserva,
                novo.regras,
                condominio_id,
            ],
        )?;
        let id = conn.last_insert_rowid();
        let espaco = conn.query_row("SELECT * FROM espacos WHERE id = ?1", [id], espaco_from_row)?;
        Ok(espaco)
    }

    /// Every reservation, latest date first, with space and resident names.
    pub fn list_reservas(&self) -> anyhow::Result<Vec<ReservaView>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT r.*, e.nome AS espaco_nome, u.nome AS morador_nome,
                    un.numero AS unidade_numero, b.nome AS bloco_nome
             FROM reservas r
             JOIN espacos e ON e.id = r.espaco_id
             JOIN usuarios u ON u.id = r.morador_id
             LEFT JOIN unidades un ON un.id = u.unidade_id
             LEFT JOIN blocos b ON b.id = un.bloco_id
             ORDER BY r.data DESC, r.id DESC",
        )?;
        let reservas = stmt
            .query_map([], |row| {
                Ok(ReservaView {
                    reserva: reserva_from_row(row)?,
                    espaco: NomeRef {
                        nome: row.get("espaco_nome")?,
                    },
                    morador: morador_resumo(
                        row.get("morador_nome")?,
                        row.get("unidade_numero")?,
                        row.get("bloco_nome")?,
                    ),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservas)
    }

    /// Book a space for a day, unless an active reservation already holds it.
    pub fn create_reserva(
        &self,
        morador_id: i64,
        nova: &NovaReserva,
    ) -> Result<Reserva, ReservaError> {
        let conn = self.conn();
        let status = nova.status.unwrap_or(ReservaStatus::Pendente);
        if status.ocupa_data() && data_ocupada(&conn, nova.espaco_id, nova.data.0, None)? {
            return Err(ReservaError::Conflito);
        }
        conn.execute(
            "INSERT INTO reservas (espaco_id, morador_id, data, status, observacoes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                nova.espaco_id,
                morador_id,
                nova.data.0,
                status,
                nova.observacoes,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(fetch_reserva(&conn, id)?.context("reserva vanished after insert")?)
    }

    /// Apply a partial update, keeping at most one active reservation per
    /// space and day.
    pub fn update_reserva(&self, id: i64, patch: &ReservaPatch) -> Result<Reserva, ReservaError> {
        let conn = self.conn();
        let atual = fetch_reserva(&conn, id)?.ok_or(ReservaError::NaoEncontrada)?;

        let espaco_id = patch.espaco_id.unwrap_or(atual.espaco_id);
        let data = patch.data.map_or(atual.data, |d| d.0);
        let status = patch.status.unwrap_or(atual.status);
        if status.ocupa_data() && data_ocupada(&conn, espaco_id, data, Some(id))? {
            return Err(ReservaError::Conflito);
        }
        let observacoes = match &patch.observacoes {
            Some(obs) => obs.clone(),
            None => atual.observacoes,
        };
        conn.execute(
            "UPDATE reservas SET espaco_id = ?2, data = ?3, status = ?4, observacoes = ?5
             WHERE id = ?1",
            params![id, espaco_id, data, status, observacoes],
        )?;
        Ok(fetch_reserva(&conn, id)?.ok_or(ReservaError::NaoEncontrada)?)
    }
}
