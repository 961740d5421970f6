use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

text_enum!(Categoria {
    Ata => "ATA",
    Contrato => "CONTRATO",
    Balancete => "BALANCETE",
    Legal => "LEGAL",
    Outros => "OUTROS",
});

text_enum!(
    /// Who may see a document.
    Visibilidade {
        Todos => "TODOS",
        Sindico => "SINDICO",
        Administracao => "ADMINISTRACAO",
    }
);

/// Document metadata. The file itself lives wherever `url` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Documento {
    pub id: i64,
    pub nome: String,
    pub url: String,
    pub categoria: Categoria,
    pub visibilidade: Visibilidade,
    pub observacoes: Option<String>,
    pub condominio_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NovoDocumento {
    pub nome: String,
    pub url: String,
    pub categoria: Option<Categoria>,
    pub visibilidade: Option<Visibilidade>,
    pub observacoes: Option<String>,
}
