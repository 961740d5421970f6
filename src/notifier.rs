//! Background listener that reacts to domain events.
//!
//! Every event is logged. A package arriving at the desk also counts as
//! the resident having been notified, so it moves from `NA_PORTARIA` to
//! `NOTIFICADO`.

use anyhow::Result;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::events::Event;

/// Spawn the notifier on the current runtime. It stops when the bus closes.
pub fn spawn(db: Database, mut rx: broadcast::Receiver<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Err(e) = handle(&db, &event) {
                        warn!(kind = event.kind(), error = %e, "notifier failed to handle event");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notifier lagged behind the event bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// React to a single event.
pub fn handle(db: &Database, event: &Event) -> Result<()> {
    debug!(kind = event.kind(), "event");
    match event {
        Event::ChamadoAberto { id, titulo } => {
            info!(chamado = id, titulo = %titulo, "chamado aberto");
        }
        Event::ChamadoStatusAlterado { id, status } => {
            info!(chamado = id, status = %status, "status do chamado alterado");
        }
        Event::EncomendaRecebida {
            id,
            destinatario_id,
        } => {
            if db.notificar_encomenda(*id)? {
                info!(
                    encomenda = id,
                    destinatario = destinatario_id,
                    "morador notificado sobre encomenda"
                );
            }
        }
        Event::EncomendaEntregue { id } => {
            info!(encomenda = id, "encomenda entregue");
        }
        Event::ReservaSolicitada {
            id,
            espaco_id,
            data,
        } => {
            info!(reserva = id, espaco = espaco_id, %data, "reserva solicitada");
        }
        Event::AvisoPublicado { id, prioridade } => {
            info!(aviso = id, prioridade = %prioridade, "aviso publicado");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::events::EventBus;
    use crate::model::encomenda::{EncomendaStatus, NovaEncomenda};

    fn seeded() -> (Database, i64) {
        let db = Database::in_memory().unwrap();
        db.seed(Utc::now()).unwrap();
        let (morador, _) = db.find_credentials("joao@email.com").unwrap().unwrap();
        (db, morador.id)
    }

    fn nova(destinatario_id: i64, status: Option<EncomendaStatus>) -> NovaEncomenda {
        NovaEncomenda {
            descricao: "Pacote".into(),
            remetente: None,
            destinatario_id,
            status,
        }
    }

    #[test]
    fn received_package_becomes_notified() {
        let (db, morador_id) = seeded();
        let encomenda = db.create_encomenda(&nova(morador_id, None)).unwrap();

        handle(
            &db,
            &Event::EncomendaRecebida {
                id: encomenda.id,
                destinatario_id: morador_id,
            },
        )
        .unwrap();

        let after = db.get_encomenda(encomenda.id).unwrap().unwrap();
        assert_eq!(after.status, EncomendaStatus::Notificado);
    }

    #[test]
    fn delivered_package_is_left_alone() {
        let (db, morador_id) = seeded();
        let encomenda = db
            .create_encomenda(&nova(morador_id, Some(EncomendaStatus::Entregue)))
            .unwrap();

        handle(
            &db,
            &Event::EncomendaRecebida {
                id: encomenda.id,
                destinatario_id: morador_id,
            },
        )
        .unwrap();

        let after = db.get_encomenda(encomenda.id).unwrap().unwrap();
        assert_eq!(after.status, EncomendaStatus::Entregue);
    }

    #[tokio::test]
    async fn spawned_notifier_processes_bus_events() {
        let (db, morador_id) = seeded();
        let bus = EventBus::default();
        let task = spawn(db.clone(), bus.subscribe());

        let encomenda = db.create_encomenda(&nova(morador_id, None)).unwrap();
        bus.emit(Event::EncomendaRecebida {
            id: encomenda.id,
            destinatario_id: morador_id,
        });
        drop(bus);

        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        let after = db.get_encomenda(encomenda.id).unwrap().unwrap();
        assert_eq!(after.status, EncomendaStatus::Notificado);
    }
}
