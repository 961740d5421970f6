use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LenientDateTime;

text_enum!(AvisoPrioridade {
    Urgente => "URGENTE",
    Manutencao => "MANUTENCAO",
    Informativo => "INFORMATIVO",
});

/// A notice on the condominium board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aviso {
    pub id: i64,
    pub titulo: String,
    pub conteudo: String,
    pub prioridade: AvisoPrioridade,
    pub data_expiracao: Option<DateTime<Utc>>,
    pub condominio_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoAviso {
    pub titulo: String,
    pub conteudo: String,
    pub prioridade: Option<AvisoPrioridade>,
    pub data_expiracao: Option<LenientDateTime>,
}
