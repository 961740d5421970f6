//! Domain events published by the HTTP layer after a write succeeds.
//!
//! Listeners such as the [`notifier`](crate::notifier) each hold their own
//! receiver, so a slow listener never holds up a request. Events are not
//! persisted; a listener only sees what happens after it subscribed.

use chrono::NaiveDate;
use tokio::sync::broadcast;

use crate::consts::EVENT_BUS_CAPACITY;
use crate::model::aviso::AvisoPrioridade;
use crate::model::chamado::ChamadoStatus;

/// Something that happened in the condominium.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ChamadoAberto { id: i64, titulo: String },
    ChamadoStatusAlterado { id: i64, status: ChamadoStatus },
    EncomendaRecebida { id: i64, destinatario_id: i64 },
    EncomendaEntregue { id: i64 },
    ReservaSolicitada { id: i64, espaco_id: i64, data: NaiveDate },
    AvisoPublicado { id: i64, prioridade: AvisoPrioridade },
}

impl Event {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ChamadoAberto { .. } => "chamado_aberto",
            Event::ChamadoStatusAlterado { .. } => "chamado_status_alterado",
            Event::EncomendaRecebida { .. } => "encomenda_recebida",
            Event::EncomendaEntregue { .. } => "encomenda_entregue",
            Event::ReservaSolicitada { .. } => "reserva_solicitada",
            Event::AvisoPublicado { .. } => "aviso_publicado",
        }
    }
}

/// Fan-out channel between handlers and listeners.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Listeners that fall more than `capacity` events behind skip ahead.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to whoever is listening and return how many listeners got it.
    /// Nobody listening is not an error.
    pub fn emit(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(EVENT_BUS_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_listener_sees_the_same_event() {
        let bus = EventBus::default();
        let mut notifier = bus.subscribe();
        let mut audit = bus.subscribe();

        let sent = bus.emit(Event::ChamadoAberto {
            id: 1,
            titulo: "Vazamento".to_string(),
        });
        assert_eq!(sent, 2);

        let a = notifier.recv().await.unwrap();
        let b = audit.recv().await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.kind(), "chamado_aberto");
    }

    #[test]
    fn emitting_with_no_listeners_is_fine() {
        let bus = EventBus::default();
        assert_eq!(bus.emit(Event::EncomendaEntregue { id: 1 }), 0);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let bus = EventBus::default();
        let mut early = bus.subscribe();
        bus.emit(Event::EncomendaEntregue { id: 1 });

        let mut late = bus.subscribe();
        bus.emit(Event::EncomendaEntregue { id: 2 });

        assert_eq!(early.recv().await.unwrap(), Event::EncomendaEntregue { id: 1 });
        assert_eq!(late.recv().await.unwrap(), Event::EncomendaEntregue { id: 2 });
    }

    #[tokio::test]
    async fn slow_listener_lags_instead_of_blocking() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();
        for id in 0..5 {
            bus.emit(Event::EncomendaEntregue { id });
        }
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(3))
        ));
    }
}
