use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::condominio::MoradorResumo;

text_enum!(
    /// Package lifecycle at the front desk.
    EncomendaStatus {
        NaPortaria => "NA_PORTARIA",
        Notificado => "NOTIFICADO",
        Entregue => "ENTREGUE",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encomenda {
    pub id: i64,
    pub descricao: String,
    pub remetente: Option<String>,
    pub status: EncomendaStatus,
    pub destinatario_id: i64,
    pub data_recebimento: DateTime<Utc>,
    pub data_entrega: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EncomendaView {
    #[serde(flatten)]
    pub encomenda: Encomenda,
    pub destinatario: MoradorResumo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaEncomenda {
    pub descricao: String,
    pub remetente: Option<String>,
    pub destinatario_id: i64,
    pub status: Option<EncomendaStatus>,
}
