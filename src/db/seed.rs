//! Demo data set: one condominium with a block, a unit, an admin, a
//! resident and a few items of everything. Dates are relative to `now`.

use std::fmt;

use anyhow::{Result, bail};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Transaction, params};

use super::Database;
use super::chamados::registrar_historico;
use crate::auth::password;
use crate::model::aviso::AvisoPrioridade;
use crate::model::chamado::{ChamadoStatus, ChamadoTipo, HistoricoTipo, Prioridade};
use crate::model::condominio::Role;
use crate::model::documento::{Categoria, Visibilidade};
use crate::model::encomenda::EncomendaStatus;
use crate::model::evento::{EventoStatus, EventoTipo};

/// Password given to every seeded user.
pub const SEED_PASSWORD: &str = "123456";

/// What a seed run inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub condominio_id: i64,
    pub usuarios: usize,
    pub chamados: usize,
    pub eventos: usize,
    pub prestadores: usize,
    pub espacos: usize,
    pub avisos: usize,
    pub encomendas: usize,
    pub documentos: usize,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "condomínio #{}: {} usuários, {} chamados, {} eventos, {} prestadores, \
             {} espaços, {} avisos, {} encomendas, {} documentos",
            self.condominio_id,
            self.usuarios,
            self.chamados,
            self.eventos,
            self.prestadores,
            self.espacos,
            self.avisos,
            self.encomendas,
            self.documentos,
        )
    }
}

fn insert(tx: &Transaction, sql: &str, params: impl rusqlite::Params) -> Result<i64> {
    tx.execute(sql, params)?;
    Ok(tx.last_insert_rowid())
}

impl Database {
    /// Load the demo data set in one transaction. Refuses to touch a
    /// database that already holds a condominium.
    pub fn seed(&self, now: DateTime<Utc>) -> Result<SeedSummary> {
        if self.has_condominio()? {
            bail!("database already seeded");
        }
        let days = |n: i64| now + Duration::days(n);
        let senha = password::hash_password(SEED_PASSWORD)?;

        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let condominio_id = insert(
            &tx,
            "INSERT INTO condominios (nome, endereco, cnpj, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                "Residencial Domus",
                "Rua das Palmeiras, 123 - São Paulo, SP",
                "12.345.678/0001-90",
                now
            ],
        )?;
        let bloco_id = insert(
            &tx,
            "INSERT INTO blocos (nome, condominio_id) VALUES (?1, ?2)",
            params!["Bloco A", condominio_id],
        )?;
        let unidade_id = insert(
            &tx,
            "INSERT INTO unidades (numero, andar, bloco_id) VALUES (?1, ?2, ?3)",
            params!["101", 1, bloco_id],
        )?;

        let usuario_sql = "INSERT INTO usuarios (nome, email, senha, role, telefone, condominio_id, unidade_id, created_at)
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
        let admin_id = insert(
            &tx,
            usuario_sql,
            params![
                "Admin Domus",
                "admin@domus.com",
                senha,
                Role::Admin,
                None::<String>,
                condominio_id,
                None::<i64>,
                now
            ],
        )?;
        let morador_id = insert(
            &tx,
            usuario_sql,
            params![
                "João Silva",
                "joao@email.com",
                senha,
                Role::Morador,
                "(11) 99999-9999",
                condominio_id,
                unidade_id,
                now
            ],
        )?;

        insert(
            &tx,
            "INSERT INTO veiculos (placa, modelo, cor, morador_id) VALUES (?1, ?2, ?3, ?4)",
            params!["ABC-1234", "Honda Civic", "Prata", morador_id],
        )?;
        insert(
            &tx,
            "INSERT INTO pets (nome, tipo, raca, morador_id) VALUES (?1, ?2, ?3, ?4)",
            params!["Rex", "Cachorro", "Labrador", morador_id],
        )?;

        let chamados = [
            (
                "Lâmpada queimada no corredor",
                "A lâmpada do 3º andar está queimada",
                ChamadoTipo::Manutencao,
                ChamadoStatus::Aberto,
                Prioridade::Media,
                "Corredor 3º andar",
                morador_id,
            ),
            (
                "Vazamento na garagem",
                "Identificado vazamento no teto da garagem",
                ChamadoTipo::Manutencao,
                ChamadoStatus::EmAndamento,
                Prioridade::Alta,
                "Garagem",
                morador_id,
            ),
            (
                "Barulho excessivo no Apto 502",
                "Música alta após as 22h",
                ChamadoTipo::Barulho,
                ChamadoStatus::Aberto,
                Prioridade::Media,
                "Apto 502",
                admin_id,
            ),
            (
                "Fechadura do portão quebrada",
                "Portão social não está trancando",
                ChamadoTipo::Seguranca,
                ChamadoStatus::Resolvido,
                Prioridade::Urgente,
                "Portão social",
                morador_id,
            ),
        ];
        for (titulo, descricao, tipo, status, prioridade, local, criador_id) in chamados {
            let chamado_id = insert(
                &tx,
                "INSERT INTO chamados (titulo, descricao, tipo, status, prioridade, local,
                                       criador_id, condominio_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                params![titulo, descricao, tipo, status, prioridade, local, criador_id, condominio_id, now],
            )?;
            registrar_historico(
                &tx,
                chamado_id,
                HistoricoTipo::Criacao,
                "Chamado aberto",
                Some(criador_id),
                now,
            )?;
        }

        let eventos = [
            (
                "Assembleia Geral Ordinária",
                "Aprovação de obras e prestação de contas",
                days(5),
                "19:00",
                "Salão de Festas",
                EventoTipo::Assembleia,
            ),
            (
                "Manutenção do Elevador",
                "Manutenção preventiva mensal",
                days(2),
                "14:00",
                "Elevadores",
                EventoTipo::Manutencao,
            ),
            (
                "Vistoria Corpo de Bombeiros",
                "Renovação do AVCB",
                days(15),
                "10:00",
                "Todo o prédio",
                EventoTipo::Vistoria,
            ),
        ];
        for (titulo, descricao, data, hora, local, tipo) in eventos {
            insert(
                &tx,
                "INSERT INTO eventos (titulo, descricao, data, hora, local, tipo, status,
                                      condominio_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![titulo, descricao, data, hora, local, tipo, EventoStatus::Agendado, condominio_id, now],
            )?;
        }

        let prestadores = [
            (
                "TechLift Elevadores",
                "Manutenção de Elevadores",
                "(11) 3333-4444",
                Some("contato@techlift.com.br"),
                days(60),
            ),
            ("CleanMax", "Limpeza", "(11) 2222-3333", None, days(90)),
            (
                "Segurança Total",
                "Portaria e Vigilância",
                "(11) 5555-6666",
                None,
                days(20),
            ),
        ];
        for (nome, servico, telefone, email, vencimento) in prestadores {
            insert(
                &tx,
                "INSERT INTO prestadores (nome, servico, telefone, email, contrato_vencimento,
                                          condominio_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![nome, servico, telefone, email, vencimento, condominio_id, now],
            )?;
        }

        let espacos = [
            (
                "Salão de Festas",
                "Espaço para eventos e comemorações",
                100,
                300.0,
                "Horário máximo: 23h. Responsável pela limpeza após uso.",
            ),
            (
                "Churrasqueira",
                "Área de churrasqueira coberta",
                30,
                150.0,
                "Horário máximo: 22h. Limpar após uso.",
            ),
            (
                "Academia",
                "Academia equipada",
                15,
                0.0,
                "Uso de toalha obrigatório. Horário: 6h às 22h.",
            ),
        ];
        for (nome, descricao, capacidade, valor, regras) in espacos {
            insert(
                &tx,
                "INSERT INTO espacos (nome, descricao, capacidade, valor_reserva, regras, condominio_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![nome, descricao, capacidade, valor, regras, condominio_id],
            )?;
        }

        let avisos = [
            (
                "Interrupção de Água",
                "Haverá interrupção no fornecimento de água no dia 05/01 das 8h às 12h para manutenção preventiva.",
                AvisoPrioridade::Urgente,
            ),
            (
                "Nova Regra de Coleta Seletiva",
                "A partir de janeiro, a coleta seletiva será realizada às terças e quintas-feiras.",
                AvisoPrioridade::Informativo,
            ),
            (
                "Manutenção dos Elevadores",
                "Informamos que a manutenção mensal será realizada na próxima segunda-feira.",
                AvisoPrioridade::Manutencao,
            ),
        ];
        for (titulo, conteudo, prioridade) in avisos {
            insert(
                &tx,
                "INSERT INTO avisos (titulo, conteudo, prioridade, condominio_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![titulo, conteudo, prioridade, condominio_id, now],
            )?;
        }

        let encomendas = [
            ("Caixa Amazon", "Amazon", EncomendaStatus::NaPortaria),
            ("Envelope Correios", "Correios", EncomendaStatus::Notificado),
        ];
        for (descricao, remetente, status) in encomendas {
            insert(
                &tx,
                "INSERT INTO encomendas (descricao, remetente, status, destinatario_id, data_recebimento)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![descricao, remetente, status, morador_id, now],
            )?;
        }

        let documentos = [
            (
                "Ata Assembleia Dezembro 2024",
                "/docs/ata-dez-2024.pdf",
                Categoria::Ata,
                Visibilidade::Todos,
            ),
            (
                "Contrato Elevadores 2024",
                "/docs/contrato-elevadores.pdf",
                Categoria::Contrato,
                Visibilidade::Sindico,
            ),
            (
                "Balancete Novembro 2024",
                "/docs/balancete-nov-2024.pdf",
                Categoria::Balancete,
                Visibilidade::Todos,
            ),
        ];
        for (nome, url, categoria, visibilidade) in documentos {
            insert(
                &tx,
                "INSERT INTO documentos (nome, url, categoria, visibilidade, condominio_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![nome, url, categoria, visibilidade, condominio_id, now],
            )?;
        }

        tx.commit()?;

        Ok(SeedSummary {
            condominio_id,
            usuarios: 2,
            chamados: chamados.len(),
            eventos: eventos.len(),
            prestadores: prestadores.len(),
            espacos: espacos.len(),
            avisos: avisos.len(),
            encomendas: encomendas.len(),
            documentos: documentos.len(),
        })
    }
}
