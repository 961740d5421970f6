use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use domus::api::{AppState, router};
use domus::config::Tenant;
use domus::db::Database;
use domus::events::EventBus;
use domus::notifier;

struct TestServer {
    base: String,
    client: Client,
    db: Database,
}

impl TestServer {
    async fn start() -> Self {
        let db = Database::in_memory().unwrap();
        db.seed(Utc::now()).unwrap();

        let events = Arc::new(EventBus::default());
        notifier::spawn(db.clone(), events.subscribe());
        let app = router(AppState::new(db.clone(), events, Tenant::default()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            base: format!("http://{addr}"),
            client: Client::builder().no_proxy().build().unwrap(),
            db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn send(&self, method: reqwest::Method, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .request(method, self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        let text = res.text().await.unwrap();
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, value)
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(reqwest::Method::POST, path, body).await
    }

    async fn patch(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(reqwest::Method::PATCH, path, body).await
    }

    async fn delete(&self, path: &str) -> StatusCode {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .unwrap()
            .status()
    }
}

#[tokio::test]
async fn healthz_answers() {
    let server = TestServer::start().await;
    let res = server
        .client
        .get(format!("{}/healthz", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn dashboard_stats_and_feed() {
    let server = TestServer::start().await;

    let (status, stats) = server.get("/dashboard/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["chamadosAbertos"], 2);
    assert_eq!(stats["taxaResolucao"], 25);

    let (_, atividades) = server.get("/dashboard/atividades").await;
    let atividades = atividades.as_array().unwrap();
    assert_eq!(atividades.len(), 10);
    assert!(atividades.iter().any(|a| a["id"] == "chamado-1"));
}

#[tokio::test]
async fn chamado_crud() {
    let server = TestServer::start().await;

    let (status, todos) = server.get("/chamados?status=TODOS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(todos.as_array().unwrap().len(), 4);
    assert!(todos[0]["criador"]["nome"].is_string());

    let (status, criado) = server
        .post(
            "/chamados",
            json!({ "titulo": "Infiltração", "descricao": "Teto do 101", "prioridade": "ALTA" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(criado["status"], "ABERTO");
    assert_eq!(criado["tipo"], "MANUTENCAO");
    assert_eq!(criado["criadorId"], 1);
    let id = criado["id"].as_i64().unwrap();

    let (status, atualizado) = server
        .patch(
            &format!("/chamados/{id}"),
            json!({ "status": "EM_ANDAMENTO", "responsavelId": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(atualizado["status"], "EM_ANDAMENTO");
    assert_eq!(atualizado["titulo"], "Infiltração");

    let (_, andamento) = server.get("/chamados?status=EM_ANDAMENTO").await;
    assert_eq!(andamento.as_array().unwrap().len(), 2);

    assert_eq!(
        server.delete(&format!("/chamados/{id}")).await,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        server.delete(&format!("/chamados/{id}")).await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn bad_input_is_rejected_with_json() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/chamados?status=FECHADO").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("FECHADO"));

    let (status, body) = server.post("/chamados", json!({ "titulo": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "O campo titulo é obrigatório");

    let (status, body) = server
        .post("/chamados", json!({ "titulo": "x", "tipo": "INCENDIO" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = server.patch("/chamados/9999", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comentarios_on_chamado() {
    let server = TestServer::start().await;

    let (status, _) = server
        .post("/chamados/1/comentarios", json!({ "texto": "Verificando" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, comentarios) = server.get("/chamados/1/comentarios").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comentarios[0]["autor"]["nome"], "Admin Domus");

    let (status, _) = server.get("/chamados/9999/comentarios").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resolved_chamado_is_locked_and_keeps_history() {
    let server = TestServer::start().await;
    let (_, criado) = server
        .post("/chamados", json!({ "titulo": "Goteira no hall" }))
        .await;
    let id = criado["id"].as_i64().unwrap();
    let path = format!("/chamados/{id}");

    let (status, _) = server.patch(&path, json!({ "status": "RESOLVIDO" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, erro) = server
        .patch(&path, json!({ "titulo": "edited after resolve", "status": "ABERTO" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(erro["error"], "Chamado resolvido não pode ser editado");

    let (status, reaberto) = server.patch(&path, json!({ "status": "ABERTO" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reaberto["titulo"], "Goteira no hall");

    server
        .post(&format!("{path}/comentarios"), json!({ "texto": "Reaberto" }))
        .await;

    let (status, historico) = server.get(&format!("{path}/historico")).await;
    assert_eq!(status, StatusCode::OK);
    let tipos: Vec<&str> = historico
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["tipo"].as_str().unwrap())
        .collect();
    assert_eq!(tipos, ["CRIACAO", "STATUS", "STATUS", "COMENTARIO"]);
    assert_eq!(historico[2]["descricao"], "Status alterado de RESOLVIDO para ABERTO");
    assert_eq!(historico[0]["autor"]["nome"], "Admin Domus");
    assert_eq!(historico[0]["chamadoId"], id);

    let (status, _) = server.get("/chamados/9999/historico").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn eventos_carry_situacao() {
    let server = TestServer::start().await;

    let (status, criado) = server
        .post(
            "/eventos",
            json!({ "titulo": "Dedetização", "data": "2020-01-10", "tipo": "MANUTENCAO" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(criado["situacao"], "ATRASADO");
    let id = criado["id"].as_i64().unwrap();

    let (_, eventos) = server.get("/eventos").await;
    let eventos = eventos.as_array().unwrap();
    assert_eq!(eventos[0]["titulo"], "Dedetização");
    assert_eq!(eventos[1]["situacao"], "FUTURO");

    let (_, concluido) = server
        .patch(&format!("/eventos/{id}"), json!({ "status": "CONCLUIDO" }))
        .await;
    assert_eq!(concluido["situacao"], "CONCLUIDO");

    assert_eq!(
        server.delete(&format!("/eventos/{id}")).await,
        StatusCode::NO_CONTENT
    );
}

#[tokio::test]
async fn prestadores_carry_contract_status() {
    let server = TestServer::start().await;

    let (_, prestadores) = server.get("/prestadores").await;
    let nomes: Vec<&str> = prestadores
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nome"].as_str().unwrap())
        .collect();
    assert_eq!(
        nomes,
        ["CleanMax", "Segurança Total", "TechLift Elevadores"]
    );
    assert_eq!(prestadores[1]["statusContrato"], "ATENCAO");
    assert_eq!(prestadores[0]["statusContrato"], "ATIVO");

    let (status, criado) = server
        .post(
            "/prestadores",
            json!({ "nome": "Jardins & Cia", "servico": "Jardinagem" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(criado["statusContrato"], "SEM_CONTRATO");
    let id = criado["id"].as_i64().unwrap();

    let (_, vencido) = server
        .patch(
            &format!("/prestadores/{id}"),
            json!({ "contratoVencimento": "2020-01-01" }),
        )
        .await;
    assert_eq!(vencido["statusContrato"], "VENCIDO");

    for campo in ["nome", "servico"] {
        let (status, erro) = server
            .patch(&format!("/prestadores/{id}"), json!({ campo: "  " }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(erro["error"], format!("O campo {campo} é obrigatório"));
    }
    let (_, prestadores) = server.get("/prestadores").await;
    assert!(prestadores
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["nome"] == "Jardins & Cia" && p["servico"] == "Jardinagem"));
}

#[tokio::test]
async fn reserva_conflict_is_a_bad_request() {
    let server = TestServer::start().await;
    let body = json!({ "espacoId": 2, "data": "2031-06-01" });

    let (status, criada) = server.post("/reservas", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(criada["status"], "PENDENTE");
    assert_eq!(criada["data"], "2031-06-01");

    let (status, erro) = server.post("/reservas", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        erro["error"],
        "Já existe uma reserva para este espaço nesta data"
    );

    let id = criada["id"].as_i64().unwrap();
    let (status, aprovada) = server
        .patch(&format!("/reservas/{id}"), json!({ "status": "APROVADA" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(aprovada["status"], "APROVADA");

    let (_, espacos) = server.get("/espacos").await;
    let churrasqueira = espacos
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == 2)
        .unwrap();
    assert_eq!(churrasqueira["reservas"].as_array().unwrap().len(), 1);

    let (_, reservas) = server.get("/reservas").await;
    assert_eq!(reservas[0]["espaco"]["nome"], "Churrasqueira");
    assert_eq!(reservas[0]["morador"]["nome"], "Admin Domus");

    let (status, movida) = server
        .patch(&format!("/reservas/{id}"), json!({ "espacoId": 3 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movida["espacoId"], 3);
    assert_eq!(movida["status"], "APROVADA");

    let (status, _) = server
        .patch(&format!("/reservas/{id}"), json!({ "espacoId": 9999 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .patch("/reservas/9999", json!({ "status": "CANCELADA" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn encomenda_is_notified_then_delivered() {
    let server = TestServer::start().await;

    let (status, criada) = server
        .post(
            "/encomendas",
            json!({ "descricao": "Caixa Magalu", "destinatarioId": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(criada["status"], "NA_PORTARIA");
    let id = criada["id"].as_i64().unwrap();

    let mut notified = false;
    for _ in 0..50 {
        let encomenda = server.db.get_encomenda(id).unwrap().unwrap();
        if encomenda.status.as_str() == "NOTIFICADO" {
            notified = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(notified, "notifier never advanced the package");

    let (status, entregue) = server
        .patch(&format!("/encomendas/{id}/entregar"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entregue["status"], "ENTREGUE");
    assert!(entregue["dataEntrega"].is_string());

    let (_, na_portaria) = server.get("/encomendas?status=NA_PORTARIA").await;
    assert_eq!(na_portaria.as_array().unwrap().len(), 1);
    assert_eq!(
        na_portaria[0]["destinatario"]["unidade"]["bloco"]["nome"],
        "Bloco A"
    );
}

#[tokio::test]
async fn avisos_and_documentos() {
    let server = TestServer::start().await;

    let (_, urgentes) = server.get("/avisos?prioridade=URGENTE").await;
    assert_eq!(urgentes.as_array().unwrap().len(), 1);

    let (status, aviso) = server
        .post(
            "/avisos",
            json!({ "titulo": "Piscina fechada", "conteudo": "Limpeza anual" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(aviso["prioridade"], "INFORMATIVO");
    let id = aviso["id"].as_i64().unwrap();
    assert_eq!(
        server.delete(&format!("/avisos/{id}")).await,
        StatusCode::NO_CONTENT
    );

    let (_, atas) = server.get("/documentos?categoria=ATA").await;
    assert_eq!(atas.as_array().unwrap().len(), 1);

    let (status, doc) = server
        .post(
            "/documentos",
            json!({ "nome": "Regimento Interno", "url": "/docs/regimento.pdf", "categoria": "LEGAL" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(doc["visibilidade"], "ADMINISTRACAO");
    let id = doc["id"].as_i64().unwrap();
    assert_eq!(
        server.delete(&format!("/documentos/{id}")).await,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        server.delete(&format!("/documentos/{id}")).await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn blocos_unidades_and_moradores() {
    let server = TestServer::start().await;

    let (status, bloco) = server.post("/blocos", json!({ "nome": "Bloco B" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let bloco_id = bloco["id"].as_i64().unwrap();

    let (status, unidade) = server
        .post(
            "/unidades",
            json!({ "numero": "201", "andar": 2, "blocoId": bloco_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, morador) = server
        .post(
            "/moradores",
            json!({
                "nome": "Maria Souza",
                "email": "Maria@Email.com",
                "senha": "segredo",
                "unidadeId": unidade["id"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(morador["role"], "MORADOR");
    assert!(morador.get("senha").is_none());
    let morador_id = morador["id"].as_i64().unwrap();

    let (status, veiculo) = server
        .post(
            &format!("/moradores/{morador_id}/veiculos"),
            json!({ "placa": "xyz-9876", "modelo": "Fiat Uno" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(veiculo["placa"], "XYZ-9876");

    let (status, _) = server
        .post(
            &format!("/moradores/{morador_id}/pets"),
            json!({ "nome": "Mia", "tipo": "Gato" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, moradores) = server.get("/moradores").await;
    let maria = moradores
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["nome"] == "Maria Souza")
        .unwrap();
    assert_eq!(maria["unidade"]["bloco"]["nome"], "Bloco B");
    assert_eq!(maria["veiculos"].as_array().unwrap().len(), 1);
    assert_eq!(maria["pets"].as_array().unwrap().len(), 1);

    let (_, blocos) = server.get("/blocos").await;
    let b = blocos
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["nome"] == "Bloco B")
        .unwrap();
    assert_eq!(b["unidades"][0]["moradores"][0]["email"], "maria@email.com");

    // Unknown bloco violates the foreign key.
    let (status, _) = server
        .post("/unidades", json!({ "numero": "999", "blocoId": 9999 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn veiculos_and_pets_need_a_morador() {
    let server = TestServer::start().await;
    let veiculo = json!({ "placa": "abc-1234" });
    let pet = json!({ "nome": "Rex" });

    // 9999 does not exist and 1 is the administrator.
    for id in [9999, 1] {
        let (status, erro) = server
            .post(&format!("/moradores/{id}/veiculos"), veiculo.clone())
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(erro["error"], "Morador não encontrado");

        let (status, _) = server
            .post(&format!("/moradores/{id}/pets"), pet.clone())
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (status, _) = server.post("/moradores/2/veiculos", veiculo).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = server.post("/moradores/2/pets", pet).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn login_checks_password() {
    let server = TestServer::start().await;

    let (status, perfil) = server
        .post(
            "/auth/login",
            json!({ "email": "joao@email.com", "senha": "123456" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(perfil["nome"], "João Silva");
    assert!(perfil.get("senha").is_none());

    let (status, erro) = server
        .post(
            "/auth/login",
            json!({ "email": "joao@email.com", "senha": "errada" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(erro["error"], "Credenciais inválidas");
}

#[tokio::test]
async fn configuracoes_round_trip() {
    let server = TestServer::start().await;

    let (status, _) = server
        .send(
            reqwest::Method::PUT,
            "/configuracoes/tema",
            json!({ "valor": "escuro" }),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, todas) = server.get("/configuracoes").await;
    assert_eq!(todas["tema"], "escuro");

    assert_eq!(
        server.delete("/configuracoes/tema").await,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        server.delete("/configuracoes/tema").await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let server = TestServer::start().await;

    let res = server
        .client
        .request(reqwest::Method::OPTIONS, server.url("/chamados"))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");

    let res = server.client.get(server.url("/avisos")).send().await.unwrap();
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
}
