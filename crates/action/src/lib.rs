//! # Stratus Action Runtime
//!
//! The shared contract every lifecycle action satisfies. This crate
//! defines **what** actions are and how one invocation flows through
//! them — validate → execute (with retry) → format outputs — but not the
//! concrete resource operations, which live in the catalog crate.
//!
//! ## Core Types
//!
//! - [`Action`] — base trait providing identity and metadata
//! - [`LifecycleAction`] — the executable operation
//! - [`ActionMetadata`] — static descriptor (key, operation kind, declared
//!   inputs and outputs)
//! - [`ActionContext`] — runtime context with execution id and cancellation
//! - [`LifecycleResult`] — whole-value result carrying identity and status
//! - [`ActionRegistry`] — key → action lookup
//! - [`Runner`] — drives one invocation end to end

#![warn(missing_docs)]

/// Base and executable action traits.
pub mod action;
/// Runtime context provided to actions during execution.
pub mod context;
/// Static metadata and declared outputs.
pub mod metadata;
/// Output formatting.
pub mod outputs;
/// Action registry for discovery and lookup.
pub mod registry;
/// Lifecycle result types.
pub mod result;
/// The invocation pipeline.
pub mod runner;

pub use action::{Action, LifecycleAction};
pub use context::ActionContext;
pub use metadata::{ActionMetadata, OutputDef};
pub use outputs::format_outputs;
pub use registry::ActionRegistry;
pub use result::{LifecycleResult, LifecycleStatus};
pub use runner::Runner;

// Re-export the schema types action authors declare inputs with, so the
// catalog depends on one crate for the authoring surface.
pub use stratus_core::{ExecutionId, InterfaceVersion, OperationKind};
pub use stratus_schema::{ActionRequest, Constraint, InputDef, InputSchema, RawInputs};
