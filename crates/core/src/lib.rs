//! Shared vocabulary for the Stratus runtime.
//!
//! Small, dependency-light types used by every other crate: strongly-typed
//! identifiers, the interface version carried in action metadata, and the
//! lifecycle operation discriminant.

#![warn(missing_docs)]

/// Strongly-typed identifiers.
pub mod id;
/// Lifecycle operation discriminant.
pub mod op;
/// Interface versioning for action metadata.
pub mod version;

pub use id::ExecutionId;
pub use op::OperationKind;
pub use version::InterfaceVersion;
