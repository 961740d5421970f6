use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rusqlite::params;

use super::Database;
use super::avisos::aviso_from_row;
use super::chamados::chamado_from_row;
use super::eventos::evento_from_row;
use crate::consts::{CONTRACT_WARNING_DAYS, RECENT_PER_KIND, UPCOMING_EVENT_DAYS};
use crate::model::chamado::ChamadoStatus;
use crate::model::dashboard::{Atividade, Stats, merge_atividades, taxa_resolucao};
use crate::model::evento::EventoStatus;

impl Database {
    /// Headline numbers for the dashboard, as of `now`.
    pub fn dashboard_stats(&self, condominio_id: i64, now: DateTime<Utc>) -> Result<Stats> {
        let conn = self.conn();
        let count_chamados = |status: Option<ChamadoStatus>| -> rusqlite::Result<i64> {
            conn.query_row(
                "SELECT COUNT(*) FROM chamados
                 WHERE condominio_id = ?1 AND (?2 IS NULL OR status = ?2)",
                params![condominio_id, status],
                |row| row.get(0),
            )
        };
        let chamados_abertos = count_chamados(Some(ChamadoStatus::Aberto))?;
        let total = count_chamados(None)?;
        let resolvidos = count_chamados(Some(ChamadoStatus::Resolvido))?;

        let prazo_proximos = conn.query_row(
            "SELECT COUNT(*) FROM eventos
             WHERE condominio_id = ?1 AND status = ?2 AND data >= ?3 AND data <= ?4",
            params![
                condominio_id,
                EventoStatus::Agendado,
                now,
                now + Duration::days(UPCOMING_EVENT_DAYS)
            ],
            |row| row.get(0),
        )?;

        let contratos_vencer = conn.query_row(
            "SELECT COUNT(*) FROM prestadores
             WHERE condominio_id = ?1 AND contrato_vencimento <= ?2",
            params![condominio_id, now + Duration::days(CONTRACT_WARNING_DAYS)],
            |row| row.get(0),
        )?;

        Ok(Stats {
            chamados_abertos,
            prazo_proximos,
            contratos_vencer,
            taxa_resolucao: taxa_resolucao(resolvidos, total),
        })
    }

    /// Recent tickets, the next agenda items and latest notices, merged.
    pub fn dashboard_atividades(&self, condominio_id: i64) -> Result<Vec<Atividade>> {
        let conn = self.conn();
        let limit = RECENT_PER_KIND as i64;

        let chamados = conn
            .prepare(
                "SELECT * FROM chamados WHERE condominio_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
            )?
            .query_map(params![condominio_id, limit], chamado_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let eventos = conn
            .prepare(
                "SELECT * FROM eventos WHERE condominio_id = ?1
                 ORDER BY data ASC, id ASC LIMIT ?2",
            )?
            .query_map(params![condominio_id, limit], evento_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let avisos = conn
            .prepare(
                "SELECT * FROM avisos WHERE condominio_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
            )?
            .query_map(params![condominio_id, limit], aviso_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(merge_atividades(chamados, eventos, avisos))
    }
}
