//! Provider clients for the single outbound call an action makes.
//!
//! Speaks the target-header JSON dialect (`X-Amz-Target` +
//! `application/x-amz-json-1.0`) that the queue and table services and
//! their local emulators accept, signed with SigV4. Responses are
//! classified into the Stratus error taxonomy with the provider's own
//! error code preserved, so named conditions (`QueueNameExists`,
//! `ResourceNotFoundException`, ...) remain matchable by the executor.
//!
//! Actions depend on the [`QueueApi`] / [`TableApi`] traits, not on the
//! HTTP clients, so executor-level tests run against in-memory fakes
//! (see [`testing`]) and the emulator/production switch stays pure
//! configuration.

#![warn(missing_docs)]

mod classify;
mod queue;
mod sign;
mod table;
/// In-memory provider fakes for executor-level tests.
pub mod testing;
mod transport;

pub use classify::{is_already_exists, is_not_found};
pub use queue::{HttpQueueClient, QueueApi, SendReceipt};
pub use table::{HttpTableClient, TableApi, TableDescription};
pub use transport::{CallSpec, Transport};
