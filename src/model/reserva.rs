use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::condominio::MoradorResumo;
use super::{LenientDate, NomeRef, nullable};

text_enum!(ReservaStatus {
    Pendente => "PENDENTE",
    Aprovada => "APROVADA",
    Rejeitada => "REJEITADA",
    Cancelada => "CANCELADA",
});

impl ReservaStatus {
    /// Whether a reservation in this state holds its slot.
    pub fn ocupa_data(self) -> bool {
        matches!(self, ReservaStatus::Pendente | ReservaStatus::Aprovada)
    }
}

/// A bookable common area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Espaco {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub capacidade: Option<i64>,
    pub valor_reserva: f64,
    pub regras: Option<String>,
    pub condominio_id: i64,
}

/// A space with its approved reservations.
#[derive(Debug, Clone, Serialize)]
pub struct EspacoView {
    #[serde(flatten)]
    pub espaco: Espaco,
    pub reservas: Vec<Reserva>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoEspaco {
    pub nome: String,
    pub descricao: Option<String>,
    pub capacidade: Option<i64>,
    #[serde(default)]
    pub valor_reserva: f64,
    pub regras: Option<String>,
}

/// One day's booking of a space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserva {
    pub id: i64,
    pub espaco_id: i64,
    pub morador_id: i64,
    pub data: NaiveDate,
    pub status: ReservaStatus,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReservaView {
    #[serde(flatten)]
    pub reserva: Reserva,
    pub espaco: NomeRef,
    pub morador: MoradorResumo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaReserva {
    pub espaco_id: i64,
    pub data: LenientDate,
    pub status: Option<ReservaStatus>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservaPatch {
    pub espaco_id: Option<i64>,
    pub data: Option<LenientDate>,
    pub status: Option<ReservaStatus>,
    #[serde(default, deserialize_with = "nullable")]
    pub observacoes: Option<Option<String>>,
}
