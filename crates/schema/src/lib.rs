//! Declared input schemas and validation for Stratus actions.
//!
//! Every action declares its inputs as an [`InputSchema`]: an ordered list
//! of [`InputDef`]s (name, kind, required flag, constraints). Validation
//! walks the declarations in order and produces a typed [`ActionRequest`],
//! or fails with a `ValidationError` naming the offending field and the
//! violated constraint, before any network call is attempted.
//!
//! ```rust
//! use stratus_schema::{InputDef, InputSchema, RawInputs};
//!
//! let schema = InputSchema::new()
//!     .with(InputDef::text("queue_name").required().not_empty())
//!     .with(InputDef::integer("visibility_timeout").in_range(0, 43_200));
//!
//! let mut raw = RawInputs::new();
//! raw.insert("queue_name".into(), "jobs".into());
//! let request = schema.validate(&raw).unwrap();
//! assert_eq!(request.text("queue_name").unwrap(), "jobs");
//! ```

#![warn(missing_docs)]

mod constraint;
mod def;
mod request;
mod schema;
mod value;

pub use constraint::Constraint;
pub use def::{InputDef, InputKind};
pub use request::ActionRequest;
pub use schema::{InputSchema, RawInputs};
pub use value::InputValue;
