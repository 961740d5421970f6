//! Buildings, units, people and what they own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NomeRef;

text_enum!(Role {
    Admin => "ADMIN",
    Sindico => "SINDICO",
    Morador => "MORADOR",
    Porteiro => "PORTEIRO",
});

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condominio {
    pub id: i64,
    pub nome: String,
    pub endereco: Option<String>,
    pub cnpj: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bloco {
    pub id: i64,
    pub nome: String,
    pub condominio_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unidade {
    pub id: i64,
    pub numero: String,
    pub andar: Option<i64>,
    pub bloco_id: i64,
}

/// A registered person. The password hash is deliberately not part of
/// this type; it never leaves the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub role: Role,
    pub telefone: Option<String>,
    pub condominio_id: i64,
    pub unidade_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Veiculo {
    pub id: i64,
    pub placa: String,
    pub modelo: Option<String>,
    pub cor: Option<String>,
    pub morador_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub nome: String,
    pub tipo: Option<String>,
    pub raca: Option<String>,
    pub morador_id: i64,
}

/// Resident contact card as nested under a unit.
#[derive(Debug, Clone, Serialize)]
pub struct MoradorContato {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub veiculos: Vec<Veiculo>,
    pub pets: Vec<Pet>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnidadeView {
    #[serde(flatten)]
    pub unidade: Unidade,
    pub moradores: Vec<MoradorContato>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlocoView {
    #[serde(flatten)]
    pub bloco: Bloco,
    pub unidades: Vec<UnidadeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnidadeComBloco {
    #[serde(flatten)]
    pub unidade: Unidade,
    pub bloco: Bloco,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoradorView {
    #[serde(flatten)]
    pub usuario: Usuario,
    pub unidade: Option<UnidadeComBloco>,
    pub veiculos: Vec<Veiculo>,
    pub pets: Vec<Pet>,
}

/// Unit number plus block name, e.g. for a package recipient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnidadeResumo {
    pub numero: String,
    pub bloco: NomeRef,
}

/// Resident name plus where they live.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoradorResumo {
    pub nome: String,
    pub unidade: Option<UnidadeResumo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NovoBloco {
    pub nome: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaUnidade {
    pub numero: String,
    pub andar: Option<i64>,
    pub bloco_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoMorador {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub telefone: Option<String>,
    pub unidade_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NovoVeiculo {
    pub placa: String,
    pub modelo: Option<String>,
    pub cor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NovoPet {
    pub nome: String,
    pub tipo: Option<String>,
    pub raca: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credenciais {
    pub email: String,
    pub senha: String,
}
