use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{LenientDateTime, nullable};
use crate::consts::CONTRACT_WARNING_DAYS;

text_enum!(StatusContrato {
    Ativo => "ATIVO",
    Atencao => "ATENCAO",
    Vencido => "VENCIDO",
    SemContrato => "SEM_CONTRATO",
});

/// An outside company serving the condominium.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prestador {
    pub id: i64,
    pub nome: String,
    pub servico: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub contrato_inicio: Option<DateTime<Utc>>,
    pub contrato_vencimento: Option<DateTime<Utc>>,
    pub condominio_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Prestador {
    pub fn status_contrato(&self, now: DateTime<Utc>) -> StatusContrato {
        match self.contrato_vencimento {
            None => StatusContrato::SemContrato,
            Some(vencimento) if vencimento < now => StatusContrato::Vencido,
            Some(vencimento) if vencimento <= now + Duration::days(CONTRACT_WARNING_DAYS) => {
                StatusContrato::Atencao
            }
            Some(_) => StatusContrato::Ativo,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestadorView {
    #[serde(flatten)]
    pub prestador: Prestador,
    pub status_contrato: StatusContrato,
}

impl PrestadorView {
    pub fn new(prestador: Prestador, now: DateTime<Utc>) -> Self {
        let status_contrato = prestador.status_contrato(now);
        Self {
            prestador,
            status_contrato,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoPrestador {
    pub nome: String,
    pub servico: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub contrato_inicio: Option<LenientDateTime>,
    pub contrato_vencimento: Option<LenientDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestadorPatch {
    pub nome: Option<String>,
    pub servico: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub telefone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contrato_inicio: Option<Option<LenientDateTime>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contrato_vencimento: Option<Option<LenientDateTime>>,
}
