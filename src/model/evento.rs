use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LenientDateTime, nullable};

text_enum!(EventoTipo {
    Assembleia => "ASSEMBLEIA",
    Vistoria => "VISTORIA",
    Manutencao => "MANUTENCAO",
    Pagamento => "PAGAMENTO",
    Outro => "OUTRO",
});

text_enum!(EventoStatus {
    Agendado => "AGENDADO",
    Concluido => "CONCLUIDO",
    Cancelado => "CANCELADO",
});

text_enum!(
    /// Where a scheduled item stands relative to today.
    Situacao {
        Futuro => "FUTURO",
        Hoje => "HOJE",
        Atrasado => "ATRASADO",
        Concluido => "CONCLUIDO",
        Cancelado => "CANCELADO",
    }
);

/// A scheduled item on the condominium agenda: assemblies, inspections,
/// maintenance windows and payment deadlines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evento {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    pub data: DateTime<Utc>,
    pub hora: Option<String>,
    pub local: Option<String>,
    pub responsavel: Option<String>,
    pub tipo: EventoTipo,
    pub status: EventoStatus,
    pub condominio_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Evento {
    pub fn situacao(&self, now: DateTime<Utc>) -> Situacao {
        match self.status {
            EventoStatus::Concluido => Situacao::Concluido,
            EventoStatus::Cancelado => Situacao::Cancelado,
            EventoStatus::Agendado => {
                let (day, today) = (self.data.date_naive(), now.date_naive());
                if day == today {
                    Situacao::Hoje
                } else if day < today {
                    Situacao::Atrasado
                } else {
                    Situacao::Futuro
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventoView {
    #[serde(flatten)]
    pub evento: Evento,
    pub situacao: Situacao,
}

impl EventoView {
    pub fn new(evento: Evento, now: DateTime<Utc>) -> Self {
        let situacao = evento.situacao(now);
        Self { evento, situacao }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoEvento {
    pub titulo: String,
    #[serde(default)]
    pub descricao: String,
    pub data: LenientDateTime,
    pub hora: Option<String>,
    pub local: Option<String>,
    pub responsavel: Option<String>,
    pub tipo: Option<EventoTipo>,
    pub status: Option<EventoStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventoPatch {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub data: Option<LenientDateTime>,
    #[serde(default, deserialize_with = "nullable")]
    pub hora: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub local: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub responsavel: Option<Option<String>>,
    pub tipo: Option<EventoTipo>,
    pub status: Option<EventoStatus>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn evento(data: DateTime<Utc>, status: EventoStatus) -> Evento {
        Evento {
            id: 1,
            titulo: "Assembleia".into(),
            descricao: String::new(),
            data,
            hora: Some("19:00".into()),
            local: None,
            responsavel: None,
            tipo: EventoTipo::Assembleia,
            status,
            condominio_id: 1,
            created_at: data,
        }
    }

    #[test]
    fn situacao_follows_the_calendar_day() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let agendado = |data| evento(data, EventoStatus::Agendado).situacao(now);

        assert_eq!(agendado(now - Duration::hours(11)), Situacao::Hoje);
        assert_eq!(agendado(now + Duration::hours(11)), Situacao::Hoje);
        assert_eq!(agendado(now - Duration::days(1)), Situacao::Atrasado);
        assert_eq!(agendado(now + Duration::days(1)), Situacao::Futuro);
    }

    #[test]
    fn situacao_respects_closed_status() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let past = now - Duration::days(3);
        assert_eq!(
            evento(past, EventoStatus::Concluido).situacao(now),
            Situacao::Concluido
        );
        assert_eq!(
            evento(past, EventoStatus::Cancelado).situacao(now),
            Situacao::Cancelado
        );
    }

    #[test]
    fn novo_evento_accepts_plain_date() {
        let novo: NovoEvento = serde_json::from_str(
            r#"{"titulo":"Vistoria","data":"2025-01-15","hora":"10:00","tipo":"VISTORIA"}"#,
        )
        .unwrap();
        assert_eq!(novo.data.0.to_rfc3339(), "2025-01-15T00:00:00+00:00");
        assert_eq!(novo.tipo, Some(EventoTipo::Vistoria));
        assert!(novo.status.is_none());
    }
}
