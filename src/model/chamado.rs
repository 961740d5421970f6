use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NomeRef, nullable};

text_enum!(
    /// What a ticket is about.
    ChamadoTipo {
        Manutencao => "MANUTENCAO",
        Reclamacao => "RECLAMACAO",
        Sugestao => "SUGESTAO",
        Ocorrencia => "OCORRENCIA",
        Barulho => "BARULHO",
        Seguranca => "SEGURANCA",
        Limpeza => "LIMPEZA",
        Outros => "OUTROS",
    }
);

text_enum!(ChamadoStatus {
    Aberto => "ABERTO",
    EmAndamento => "EM_ANDAMENTO",
    Resolvido => "RESOLVIDO",
});

text_enum!(
    /// Kind of entry in a ticket's history.
    HistoricoTipo {
        Criacao => "CRIACAO",
        Status => "STATUS",
        Comentario => "COMENTARIO",
    }
);

text_enum!(Prioridade {
    Baixa => "BAIXA",
    Media => "MEDIA",
    Alta => "ALTA",
    Urgente => "URGENTE",
});

/// A maintenance or complaint ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chamado {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    pub tipo: ChamadoTipo,
    pub status: ChamadoStatus,
    pub prioridade: Prioridade,
    pub local: Option<String>,
    pub criador_id: i64,
    pub responsavel_id: Option<i64>,
    pub condominio_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ticket as listed, with creator and assignee names.
#[derive(Debug, Clone, Serialize)]
pub struct ChamadoView {
    #[serde(flatten)]
    pub chamado: Chamado,
    pub criador: NomeRef,
    pub responsavel: Option<NomeRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoChamado {
    pub titulo: String,
    #[serde(default)]
    pub descricao: String,
    pub tipo: Option<ChamadoTipo>,
    pub status: Option<ChamadoStatus>,
    pub prioridade: Option<Prioridade>,
    pub local: Option<String>,
    pub responsavel_id: Option<i64>,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChamadoPatch {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub tipo: Option<ChamadoTipo>,
    pub status: Option<ChamadoStatus>,
    pub prioridade: Option<Prioridade>,
    #[serde(default, deserialize_with = "nullable")]
    pub local: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub responsavel_id: Option<Option<i64>>,
}

impl ChamadoPatch {
    /// Whether the patch touches anything besides the status.
    pub fn edita_conteudo(&self) -> bool {
        self.titulo.is_some()
            || self.descricao.is_some()
            || self.tipo.is_some()
            || self.prioridade.is_some()
            || self.local.is_some()
            || self.responsavel_id.is_some()
    }
}

/// A comment in a ticket's thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comentario {
    pub id: i64,
    pub chamado_id: i64,
    pub autor_id: i64,
    pub texto: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComentarioView {
    #[serde(flatten)]
    pub comentario: Comentario,
    pub autor: NomeRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NovoComentario {
    pub texto: String,
}

/// One line of a ticket's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Historico {
    pub id: i64,
    pub chamado_id: i64,
    pub tipo: HistoricoTipo,
    pub descricao: String,
    pub autor_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricoView {
    #[serde(flatten)]
    pub historico: Historico,
    pub autor: Option<NomeRef>,
}
