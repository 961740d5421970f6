use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aviso::Aviso;
use super::chamado::Chamado;
use super::evento::Evento;
use crate::consts::ACTIVITY_FEED_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub chamados_abertos: i64,
    pub prazo_proximos: i64,
    pub contratos_vencer: i64,
    /// Percentage of tickets resolved, 0–100.
    pub taxa_resolucao: i64,
}

/// Resolved share of all tickets as a rounded percentage.
pub fn taxa_resolucao(resolvidos: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (resolvidos as f64 / total as f64 * 100.0).round() as i64
}

/// One line of the dashboard activity stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atividade {
    pub id: String,
    pub tipo: String,
    pub titulo: String,
    pub descricao: String,
    pub data: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioridade: Option<String>,
}

impl From<Chamado> for Atividade {
    fn from(c: Chamado) -> Self {
        Self {
            id: format!("chamado-{}", c.id),
            tipo: "chamado".to_string(),
            titulo: c.titulo,
            descricao: c.descricao,
            data: c.created_at,
            status: Some(c.status.to_string()),
            prioridade: None,
        }
    }
}

impl From<Evento> for Atividade {
    fn from(e: Evento) -> Self {
        Self {
            id: format!("evento-{}", e.id),
            tipo: e.tipo.as_str().to_lowercase(),
            titulo: e.titulo,
            descricao: e.descricao,
            data: e.data,
            status: Some(e.status.to_string()),
            prioridade: None,
        }
    }
}

impl From<Aviso> for Atividade {
    fn from(a: Aviso) -> Self {
        Self {
            id: format!("aviso-{}", a.id),
            tipo: "aviso".to_string(),
            titulo: a.titulo,
            descricao: a.conteudo,
            data: a.created_at,
            status: None,
            prioridade: Some(a.prioridade.to_string()),
        }
    }
}

/// Merge the recent items of each kind into one stream, newest first.
pub fn merge_atividades(
    chamados: Vec<Chamado>,
    eventos: Vec<Evento>,
    avisos: Vec<Aviso>,
) -> Vec<Atividade> {
    let mut atividades: Vec<Atividade> = chamados
        .into_iter()
        .map(Atividade::from)
        .chain(eventos.into_iter().map(Atividade::from))
        .chain(avisos.into_iter().map(Atividade::from))
        .collect();
    // Stable sort keeps chamados before eventos before avisos on ties.
    atividades.sort_by(|a, b| b.data.cmp(&a.data));
    atividades.truncate(ACTIVITY_FEED_LIMIT);
    atividades
}
