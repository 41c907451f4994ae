//! Ordered notifications for external observers of a session.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::collector::CloseReason;
use crate::controls::{ControlKind, UserId};
use crate::error::PaginationError;

/// Event categories observers can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A specific control was dispatched.
    Control(ControlKind),
    /// Any control was dispatched.
    Collect,
    PageChange,
    End,
}

/// A notification emitted by a session.
#[derive(Debug, Clone)]
pub enum PaginationEvent {
    /// Emitted for the dispatched control only.
    Control { control: ControlKind, user_id: UserId },
    /// Emitted for every dispatched control, after the control event.
    Collect { control: ControlKind, user_id: UserId },
    PageChange { index: usize },
    /// The session closed. `error` carries a failed end-of-life update.
    End {
        reason: CloseReason,
        error: Option<Arc<PaginationError>>,
    },
}

impl PaginationEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PaginationEvent::Control { control, .. } => EventKind::Control(*control),
            PaginationEvent::Collect { .. } => EventKind::Collect,
            PaginationEvent::PageChange { .. } => EventKind::PageChange,
            PaginationEvent::End { .. } => EventKind::End,
        }
    }
}

type Observer = Arc<dyn Fn(&PaginationEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    observers: Vec<(EventKind, Observer)>,
    subscribers: Vec<mpsc::UnboundedSender<PaginationEvent>>,
}

/// Cloneable fan-out point for session events.
///
/// Clones share one registry, so observers added through any clone see
/// every later event. Past events are never replayed.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.lock();
        f.debug_struct("EventHub")
            .field("observers", &registry.observers.len())
            .field("subscribers", &registry.subscribers.len())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one event kind.
    pub fn on<F>(&self, kind: EventKind, observer: F)
    where
        F: Fn(&PaginationEvent) + Send + Sync + 'static,
    {
        self.lock().observers.push((kind, Arc::new(observer)));
    }

    /// Receive every later event over a channel.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<PaginationEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    pub(crate) fn emit(&self, event: PaginationEvent) {
        let kind = event.kind();
        let observers: Vec<Observer> = {
            let mut registry = self.lock();
            registry
                .subscribers
                .retain(|subscriber| subscriber.send(event.clone()).is_ok());
            registry
                .observers
                .iter()
                .filter(|(registered, _)| *registered == kind)
                .map(|(_, observer)| Arc::clone(observer))
                .collect()
        };

        // Called without the lock so observers may register further observers.
        for observer in observers {
            observer(&event);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
