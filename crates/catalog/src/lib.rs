//! The built-in action catalog.
//!
//! Five lifecycle actions, each an independent instance of the one
//! runtime shape defined by `stratus-action`:
//!
//! | key            | operation | resource        |
//! |----------------|-----------|-----------------|
//! | `queue.create` | create    | message queue   |
//! | `queue.delete` | delete    | message queue   |
//! | `queue.send`   | send      | queue message   |
//! | `table.create` | create    | key/value table |
//! | `table.delete` | delete    | key/value table |
//!
//! Actions hold their provider API as a trait object, so the same
//! implementations run against production, an emulator, or an in-memory
//! fake — the switch is purely which client they are constructed with.
//!
//! The cataloged ML-analysis integrations (forecasting, clustering,
//! market-basket) are opaque remote APIs and intentionally absent here.

#![warn(missing_docs)]

/// Queue actions.
pub mod queue;
/// Table actions.
pub mod table;

use std::sync::Arc;

use stratus_action::ActionRegistry;
use stratus_provider::{HttpQueueClient, HttpTableClient, Transport};

pub use queue::{QueueCreateAction, QueueDeleteAction, QueueSendAction};
pub use table::{TableCreateAction, TableDeleteAction};

/// Build the registry of all built-in actions over `transport`.
pub fn builtin_registry(transport: &Transport) -> ActionRegistry {
    let queue_api = Arc::new(HttpQueueClient::new(transport.clone()));
    let table_api = Arc::new(HttpTableClient::new(transport.clone()));

    let mut registry = ActionRegistry::new();
    registry.register(Arc::new(QueueCreateAction::new(queue_api.clone())));
    registry.register(Arc::new(QueueDeleteAction::new(queue_api.clone())));
    registry.register(Arc::new(QueueSendAction::new(queue_api)));
    registry.register(Arc::new(TableCreateAction::new(table_api.clone())));
    registry.register(Arc::new(TableDeleteAction::new(table_api)));
    registry
}
