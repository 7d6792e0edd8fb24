//! In-process domain event bus.
//!
//! Events decouple the identity and reservation flows from their side
//! effects. The bus is a `tokio::sync::broadcast` channel; publishing
//! never blocks and silently drops events when nobody is listening.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error, info};

use tourhub_core::events::{DomainEvent, EventPayload, UserEvent};

use crate::catalog::CatalogService;

/// Default channel capacity. Slow subscribers lag rather than block.
const CHANNEL_CAPACITY: usize = 256;

/// Broadcast-based publisher for [`DomainEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Creates a bus with the default capacity.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publishes an event to all current subscribers.
    pub fn publish(&self, event: DomainEvent) {
        debug!(event_id = %event.id, "Publishing domain event");
        // A send error only means there are no subscribers right now.
        let _ = self.tx.send(event);
    }

    /// Opens a new subscription starting at the current position.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the catalog listener that hides all routes of a deactivated
/// owner when an `OwnerDeactivated` event arrives.
pub fn spawn_catalog_listener(bus: &EventBus, catalog: Arc<CatalogService>) {
    let mut rx = bus.subscribe();

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let EventPayload::User(UserEvent::OwnerDeactivated { owner_id }) =
                        event.payload
                    {
                        match catalog.cascade_hide_owner_routes(owner_id).await {
                            Ok(hidden) => {
                                info!(%owner_id, hidden, "Hid routes of deactivated owner");
                            }
                            Err(e) => {
                                error!(%owner_id, error = %e, "Cascade hide failed");
                            }
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    error!(skipped, "Catalog listener lagged behind the event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
