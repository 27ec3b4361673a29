//! Message-queue lifecycle actions.

mod create;
mod delete;
mod send;

pub use create::QueueCreateAction;
pub use delete::QueueDeleteAction;
pub use send::QueueSendAction;
