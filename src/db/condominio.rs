use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Database;
use crate::auth::password;
use crate::model::NomeRef;
use crate::model::condominio::{
    Bloco, BlocoView, Condominio, MoradorContato, MoradorResumo, MoradorView, NovaUnidade,
    NovoBloco, NovoMorador, NovoPet, NovoVeiculo, Pet, Role, Unidade, UnidadeComBloco,
    UnidadeResumo, UnidadeView, Usuario, Veiculo,
};

/// Every column except the password hash.
const USUARIO_COLUMNS: &str =
    "id, nome, email, role, telefone, condominio_id, unidade_id, created_at";

fn condominio_from_row(row: &Row) -> rusqlite::Result<Condominio> {
    Ok(Condominio {
        id: row.get("id")?,
        nome: row.get("nome")?,
        endereco: row.get("endereco")?,
        cnpj: row.get("cnpj")?,
        created_at: row.get("created_at")?,
    })
}

fn bloco_from_row(row: &Row) -> rusqlite::Result<Bloco> {
    Ok(Bloco {
        id: row.get("id")?,
        nome: row.get("nome")?,
        condominio_id: row.get("condominio_id")?,
    })
}

fn unidade_from_row(row: &Row) -> rusqlite::Result<Unidade> {
    Ok(Unidade {
        id: row.get("id")?,
        numero: row.get("numero")?,
        andar: row.get("andar")?,
        bloco_id: row.get("bloco_id")?,
    })
}

fn usuario_from_row(row: &Row) -> rusqlite::Result<Usuario> {
    Ok(Usuario {
        id: row.get("id")?,
        nome: row.get("nome")?,
        email: row.get("email")?,
        role: row.get("role")?,
        telefone: row.get("telefone")?,
        condominio_id: row.get("condominio_id")?,
        unidade_id: row.get("unidade_id")?,
        created_at: row.get("created_at")?,
    })
}

fn veiculo_from_row(row: &Row) -> rusqlite::Result<Veiculo> {
    Ok(Veiculo {
        id: row.get("id")?,
        placa: row.get("placa")?,
        modelo: row.get("modelo")?,
        cor: row.get("cor")?,
        morador_id: row.get("morador_id")?,
    })
}

fn pet_from_row(row: &Row) -> rusqlite::Result<Pet> {
    Ok(Pet {
        id: row.get("id")?,
        nome: row.get("nome")?,
        tipo: row.get("tipo")?,
        raca: row.get("raca")?,
        morador_id: row.get("morador_id")?,
    })
}

/// Build a resident summary from a `usuarios ⟕ unidades ⟕ blocos` join.
pub(crate) fn morador_resumo(
    nome: String,
    numero: Option<String>,
    bloco: Option<String>,
) -> MoradorResumo {
    let unidade = match (numero, bloco) {
        (Some(numero), Some(bloco)) => Some(UnidadeResumo {
            numero,
            bloco: NomeRef { nome: bloco },
        }),
        _ => None,
    };
    MoradorResumo { nome, unidade }
}

fn fetch_usuario(conn: &Connection, id: i64) -> rusqlite::Result<Option<Usuario>> {
    conn.query_row(
        &format!("SELECT {USUARIO_COLUMNS} FROM usuarios WHERE id = ?1"),
        [id],
        usuario_from_row,
    )
    .optional()
}

fn veiculos_of(conn: &Connection, morador_id: i64) -> rusqlite::Result<Vec<Veiculo>> {
    let mut stmt = conn.prepare("SELECT * FROM veiculos WHERE morador_id = ?1 ORDER BY id")?;
    stmt.query_map([morador_id], veiculo_from_row)?.collect()
}

fn pets_of(conn: &Connection, morador_id: i64) -> rusqlite::Result<Vec<Pet>> {
    let mut stmt = conn.prepare("SELECT * FROM pets WHERE morador_id = ?1 ORDER BY id")?;
    stmt.query_map([morador_id], pet_from_row)?.collect()
}

fn unidade_view(conn: &Connection, unidade: Unidade) -> rusqlite::Result<UnidadeView> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {USUARIO_COLUMNS} FROM usuarios WHERE unidade_id = ?1 ORDER BY nome"
    ))?;
    let usuarios = stmt
        .query_map([unidade.id], usuario_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let moradores = usuarios
        .into_iter()
        .map(|u| {
            Ok(MoradorContato {
                veiculos: veiculos_of(conn, u.id)?,
                pets: pets_of(conn, u.id)?,
                id: u.id,
                nome: u.nome,
                email: u.email,
                telefone: u.telefone,
            })
        })
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(UnidadeView { unidade, moradores })
}

impl Database {
    pub fn create_condominio(
        &self,
        nome: &str,
        endereco: Option<&str>,
        cnpj: Option<&str>,
    ) -> Result<Condominio> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO condominios (nome, endereco, cnpj, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![nome, endereco, cnpj, Utc::now()],
        )?;
        let id = conn.last_insert_rowid();
        let condominio = conn.query_row(
            "SELECT * FROM condominios WHERE id = ?1",
            [id],
            condominio_from_row,
        )?;
        Ok(condominio)
    }

    pub fn has_condominio(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM condominios", [], |r| r.get(0))?;
        Ok(count > 0)
    }

    pub fn create_bloco(&self, condominio_id: i64, novo: &NovoBloco) -> Result<Bloco> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO blocos (nome, condominio_id) VALUES (?1, ?2)",
            params![novo.nome, condominio_id],
        )?;
        let id = conn.last_insert_rowid();
        let bloco = conn.query_row("SELECT * FROM blocos WHERE id = ?1", [id], bloco_from_row)?;
        Ok(bloco)
    }

    pub fn create_unidade(&self, nova: &NovaUnidade) -> Result<Unidade> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO unidades (numero, andar, bloco_id) VALUES (?1, ?2, ?3)",
            params![nova.numero, nova.andar, nova.bloco_id],
        )?;
        let id = conn.last_insert_rowid();
        let unidade =
            conn.query_row("SELECT * FROM unidades WHERE id = ?1", [id], unidade_from_row)?;
        Ok(unidade)
    }

    /// Blocks with their units, and each unit's residents with vehicles and pets.
    pub fn list_blocos(&self, condominio_id: i64) -> Result<Vec<BlocoView>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT * FROM blocos WHERE condominio_id = ?1 ORDER BY nome")?;
        let blocos = stmt
            .query_map([condominio_id], bloco_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut unidades_stmt =
            conn.prepare("SELECT * FROM unidades WHERE bloco_id = ?1 ORDER BY numero")?;
        blocos
            .into_iter()
            .map(|bloco| {
                let unidades = unidades_stmt
                    .query_map([bloco.id], unidade_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
                    .into_iter()
                    .map(|u| unidade_view(&conn, u))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(BlocoView { bloco, unidades })
            })
            .collect()
    }

    /// Create a user; the password is hashed before it is stored.
    pub fn create_usuario(
        &self,
        condominio_id: i64,
        role: Role,
        novo: &NovoMorador,
    ) -> Result<Usuario> {
        let hash = password::hash_password(&novo.senha)?;
        let conn = self.conn();
        conn.execute(
            "INSERT INTO usuarios (nome, email, senha, role, telefone, condominio_id, unidade_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                novo.nome,
                novo.email.trim().to_lowercase(),
                hash,
                role,
                novo.telefone,
                condominio_id,
                novo.unidade_id,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch_usuario(&conn, id)?.context("usuario vanished after insert")
    }

    pub fn get_usuario(&self, id: i64) -> Result<Option<Usuario>> {
        let conn = self.conn();
        Ok(fetch_usuario(&conn, id)?)
    }

    /// Look up a user and their stored password hash by e-mail.
    pub fn find_credentials(&self, email: &str) -> Result<Option<(Usuario, String)>> {
        let conn = self.conn();
        let found = conn
            .query_row(
                &format!("SELECT {USUARIO_COLUMNS}, senha FROM usuarios WHERE email = ?1"),
                [email.trim().to_lowercase()],
                |row| Ok((usuario_from_row(row)?, row.get::<_, String>("senha")?)),
            )
            .optional()?;
        Ok(found)
    }

    /// Residents of the condominium with unit, block, vehicles and pets.
    pub fn list_moradores(&self, condominio_id: i64) -> Result<Vec<MoradorView>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {USUARIO_COLUMNS} FROM usuarios
             WHERE condominio_id = ?1 AND role = ?2
             ORDER BY nome"
        ))?;
        let usuarios = stmt
            .query_map(params![condominio_id, Role::Morador], usuario_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let moradores = usuarios
            .into_iter()
            .map(|usuario| {
                let unidade = match usuario.unidade_id {
                    Some(unidade_id) => conn
                        .query_row(
                            "SELECT u.id, u.numero, u.andar, u.bloco_id,
                                    b.id AS b_id, b.nome AS b_nome, b.condominio_id AS b_condominio_id
                             FROM unidades u JOIN blocos b ON b.id = u.bloco_id
                             WHERE u.id = ?1",
                            [unidade_id],
                            |row| {
                                Ok(UnidadeComBloco {
                                    unidade: unidade_from_row(row)?,
                                    bloco: Bloco {
                                        id: row.get("b_id")?,
                                        nome: row.get("b_nome")?,
                                        condominio_id: row.get("b_condominio_id")?,
                                    },
                                })
                            },
                        )
                        .optional()?,
                    None => None,
                };
                Ok(MoradorView {
                    veiculos: veiculos_of(&conn, usuario.id)?,
                    pets: pets_of(&conn, usuario.id)?,
                    unidade,
                    usuario,
                })
            })
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(moradores)
    }

    pub fn create_veiculo(&self, morador_id: i64, novo: &NovoVeiculo) -> Result<Veiculo> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO veiculos (placa, modelo, cor, morador_id) VALUES (?1, ?2, ?3, ?4)",
            params![novo.placa.trim().to_uppercase(), novo.modelo, novo.cor, morador_id],
        )?;
        let id = conn.last_insert_rowid();
        let veiculo =
            conn.query_row("SELECT * FROM veiculos WHERE id = ?1", [id], veiculo_from_row)?;
        Ok(veiculo)
    }

    pub fn create_pet(&self, morador_id: i64, novo: &NovoPet) -> Result<Pet> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO pets (nome, tipo, raca, morador_id) VALUES (?1, ?2, ?3, ?4)",
            params![novo.nome, novo.tipo, novo.raca, morador_id],
        )?;
        let id = conn.last_insert_rowid();
        let pet = conn.query_row("SELECT * FROM pets WHERE id = ?1", [id], pet_from_row)?;
        Ok(pet)
    }
}
