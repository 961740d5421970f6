use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Database;
use crate::model::NomeRef;
use crate::model::chamado::{
    Chamado, ChamadoPatch, ChamadoStatus, ChamadoTipo, ChamadoView, Comentario, ComentarioView,
    Historico, HistoricoTipo, HistoricoView, NovoChamado, NovoComentario, Prioridade,
};

/// Why a ticket update was refused.
#[derive(Debug, thiserror::Error)]
pub enum ChamadoError {
    #[error("Chamado resolvido não pode ser editado")]
    Resolvido,
    #[error("Chamado não encontrado")]
    NaoEncontrado,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for ChamadoError {
    fn from(err: rusqlite::Error) -> Self {
        ChamadoError::Storage(err.into())
    }
}

pub(crate) fn chamado_from_row(row: &Row) -> rusqlite::Result<Chamado> {
    Ok(Chamado {
        id: row.get("id")?,
        titulo: row.get("titulo")?,
        descricao: row.get("descricao")?,
        tipo: row.get("tipo")?,
        status: row.get("status")?,
        prioridade: row.get("prioridade")?,
        local: row.get("local")?,
        criador_id: row.get("criador_id")?,
        responsavel_id: row.get("responsavel_id")?,
        condominio_id: row.get("condominio_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn comentario_from_row(row: &Row) -> rusqlite::Result<Comentario> {
    Ok(Comentario {
        id: row.get("id")?,
        chamado_id: row.get("chamado_id")?,
        autor_id: row.get("autor_id")?,
        texto: row.get("texto")?,
        created_at: row.get("created_at")?,
    })
}

fn historico_from_row(row: &Row) -> rusqlite::Result<Historico> {
    Ok(Historico {
        id: row.get("id")?,
        chamado_id: row.get("chamado_id")?,
        tipo: row.get("tipo")?,
        descricao: row.get("descricao")?,
        autor_id: row.get("autor_id")?,
        created_at: row.get("created_at")?,
    })
}

fn fetch_chamado(conn: &Connection, id: i64) -> rusqlite::Result<Option<Chamado>> {
    conn.query_row("SELECT * FROM chamados WHERE id = ?1", [id], chamado_from_row)
        .optional()
}

/// Append an entry to a ticket's history.
pub(crate) fn registrar_historico(
    conn: &Connection,
    chamado_id: i64,
    tipo: HistoricoTipo,
    descricao: &str,
    autor_id: Option<i64>,
    at: DateTime<Utc>,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO chamado_historico (chamado_id, tipo, descricao, autor_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![chamado_id, tipo, descricao, autor_id, at],
    )?;
    Ok(())
}

impl Database {
    /// Tickets of a condominium, newest first, optionally filtered by status.
    pub fn list_chamados(
        &self,
        condominio_id: i64,
        status: Option<ChamadoStatus>,
    ) -> Result<Vec<ChamadoView>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT c.*, cr.nome AS criador_nome, r.nome AS responsavel_nome
             FROM chamados c
             JOIN usuarios cr ON cr.id = c.criador_id
             LEFT JOIN usuarios r ON r.id = c.responsavel_id
             WHERE c.condominio_id = ?1 AND (?2 IS NULL OR c.status = ?2)
             ORDER BY c.created_at DESC, c.id DESC",
        )?;
        let chamados = stmt
            .query_map(params![condominio_id, status], |row| {
                Ok(ChamadoView {
                    chamado: chamado_from_row(row)?,
                    criador: NomeRef {
                        nome: row.get("criador_nome")?,
                    },
                    responsavel: row
                        .get::<_, Option<String>>("responsavel_nome")?
                        .map(|nome| NomeRef { nome }),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(chamados)
    }

    pub fn get_chamado(&self, id: i64) -> Result<Option<Chamado>> {
        let conn = self.conn();
        Ok(fetch_chamado(&conn, id)?)
    }

    pub fn create_chamado(
        &self,
        condominio_id: i64,
        criador_id: i64,
        novo: &NovoChamado,
    ) -> Result<Chamado> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let now = Utc::now();
        tx.execute(
            "INSERT INTO chamados (titulo, descricao, tipo, status, prioridade, local,
                                   criador_id, responsavel_id, condominio_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            params![
                novo.titulo,
                novo.descricao,
                novo.tipo.unwrap_or(ChamadoTipo::Manutencao),
                novo.status.unwrap_or(ChamadoStatus::Aberto),
                novo.prioridade.unwrap_or(Prioridade::Media),
                novo.local,
                criador_id,
                novo.responsavel_id,
                condominio_id,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();
        registrar_historico(
            &tx,
            id,
            HistoricoTipo::Criacao,
            "Chamado aberto",
            Some(criador_id),
            now,
        )?;
        let chamado = fetch_chamado(&tx, id)?.context("chamado vanished after insert")?;
        tx.commit()?;
        Ok(chamado)
    }

    /// Apply a partial update on behalf of `autor_id`. Once resolved, a
    /// ticket only accepts status changes.
    pub fn update_chamado(
        &self,
        id: i64,
        autor_id: i64,
        patch: &ChamadoPatch,
    ) -> Result<Chamado, ChamadoError> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let atual = fetch_chamado(&tx, id)?.ok_or(ChamadoError::NaoEncontrado)?;
        if atual.status == ChamadoStatus::Resolvido && patch.edita_conteudo() {
            return Err(ChamadoError::Resolvido);
        }

        let now = Utc::now();
        tx.execute(
            "UPDATE chamados SET
                titulo         = COALESCE(?2, titulo),
                descricao      = COALESCE(?3, descricao),
                tipo           = COALESCE(?4, tipo),
                status         = COALESCE(?5, status),
                prioridade     = COALESCE(?6, prioridade),
                local          = CASE WHEN ?7 THEN ?8 ELSE local END,
                responsavel_id = CASE WHEN ?9 THEN ?10 ELSE responsavel_id END,
                updated_at     = ?11
             WHERE id = ?1",
            params![
                id,
                patch.titulo,
                patch.descricao,
                patch.tipo,
                patch.status,
                patch.prioridade,
                patch.local.is_some(),
                patch.local.clone().flatten(),
                patch.responsavel_id.is_some(),
                patch.responsavel_id.flatten(),
                now,
            ],
        )?;
        if let Some(status) = patch.status.filter(|s| *s != atual.status) {
            registrar_historico(
                &tx,
                id,
                HistoricoTipo::Status,
                &format!("Status alterado de {} para {}", atual.status, status),
                Some(autor_id),
                now,
            )?;
        }
        let chamado = fetch_chamado(&tx, id)?.ok_or(ChamadoError::NaoEncontrado)?;
        tx.commit()?;
        Ok(chamado)
    }

    /// Delete a ticket and its comments. `false` when nothing was deleted.
    pub fn delete_chamado(&self, id: i64) -> Result<bool> {
        let conn = self.conn();
        Ok(conn.execute("DELETE FROM chamados WHERE id = ?1", [id])? > 0)
    }

    /// Comments on a ticket, oldest first. `None` when the ticket does not exist.
    pub fn list_comentarios(&self, chamado_id: i64) -> Result<Option<Vec<ComentarioView>>> {
        let conn = self.conn();
        if fetch_chamado(&conn, chamado_id)?.is_none() {
            return Ok(None);
        }
        let mut stmt = conn.prepare(
            "SELECT c.*, u.nome AS autor_nome
             FROM comentarios c JOIN usuarios u ON u.id = c.autor_id
             WHERE c.chamado_id = ?1
             ORDER BY c.created_at, c.id",
        )?;
        let comentarios = stmt
            .query_map([chamado_id], |row| {
                Ok(ComentarioView {
                    comentario: comentario_from_row(row)?,
                    autor: NomeRef {
                        nome: row.get("autor_nome")?,
                    },
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(comentarios))
    }

    /// Add a comment. `None` when the ticket does not exist.
    pub fn add_comentario(
        &self,
        chamado_id: i64,
        autor_id: i64,
        novo: &NovoComentario,
    ) -> Result<Option<Comentario>> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        if fetch_chamado(&tx, chamado_id)?.is_none() {
            return Ok(None);
        }
        let now = Utc::now();
        tx.execute(
            "INSERT INTO comentarios (chamado_id, autor_id, texto, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![chamado_id, autor_id, novo.texto, now],
        )?;
        let id = tx.last_insert_rowid();
        registrar_historico(
            &tx,
            chamado_id,
            HistoricoTipo::Comentario,
            "Comentário adicionado",
            Some(autor_id),
            now,
        )?;
        let comentario = tx.query_row(
            "SELECT * FROM comentarios WHERE id = ?1",
            [id],
            comentario_from_row,
        )?;
        tx.commit()?;
        Ok(Some(comentario))
    }

    /// A ticket's history, oldest first. `None` when the ticket does not exist.
    pub fn list_historico(&self, chamado_id: i64) -> Result<Option<Vec<HistoricoView>>> {
        let conn = self.conn();
        if fetch_chamado(&conn, chamado_id)?.is_none() {
            return Ok(None);
        }
        let mut stmt = conn.prepare(
            "SELECT h.*, u.nome AS autor_nome
             FROM chamado_historico h LEFT JOIN usuarios u ON u.id = h.autor_id
             WHERE h.chamado_id = ?1
             ORDER BY h.created_at, h.id",
        )?;
        let historico = stmt
            .query_map([chamado_id], |row| {
                Ok(HistoricoView {
                    historico: historico_from_row(row)?,
                    autor: row
                        .get::<_, Option<String>>("autor_nome")?
                        .map(|nome| NomeRef { nome }),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(historico))
    }
}
