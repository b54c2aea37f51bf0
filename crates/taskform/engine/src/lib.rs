//! Dynamic Task-Form Engine
//!
//! Composes the conditional-visibility evaluator and the action handler
//! registry into a form controller, and binds the result to workflow-task
//! collaborators.
//!
//! # Architecture
//!
//! - [`ConditionalEvaluator`] — Pure filter: given a schema, UI hints, and
//!   current values, returns the schema/hints subtree currently visible.
//! - [`ActionRegistry`] — Maps action ids to async handlers; converts handler
//!   failures into structured outcomes instead of letting them escape.
//! - [`FormController`] — Owns the live form values; re-runs the evaluator on
//!   every change and routes action clicks to the registry (or an injected
//!   override).
//! - [`TaskFormSession`] / [`TaskInbox`] — Thin adapters binding the
//!   controller to the workflow-task fetch/submit/claim collaborators, and
//!   invalidating the activity cache when task state changes.
//!
//! # Example
//!
//! ```rust
//! use taskform_engine::ConditionalEvaluator;
//! use taskform_types::{DisplayIf, FieldHint, FieldSchema, FormSchema, FormValues, UiHints};
//! use serde_json::json;
//!
//! let schema = FormSchema::new("Contact")
//!     .with_field("contact_method", FieldSchema::select("Method", ["email", "phone"]))
//!     .with_field("email", FieldSchema::text("Email"));
//! let hints = UiHints::new().with_hint(
//!     "email",
//!     FieldHint::new().with_display_if(DisplayIf::equals("contact_method", json!("email"))),
//! );
//! let values = FormValues::new().with("contact_method", json!("phone"));
//!
//! let (visible, _) = ConditionalEvaluator::new().apply(&schema, &hints, &values);
//! assert!(!visible.has_field("email"));
//! ```

#![deny(unsafe_code)]

mod controller;
mod evaluator;
mod inbox;
mod registry;
mod session;

pub use controller::*;
pub use evaluator::*;
pub use inbox::*;
pub use registry::*;
pub use session::*;
