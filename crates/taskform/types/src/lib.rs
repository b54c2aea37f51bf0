//! Task-Form Domain Types
//!
//! The declarative contract between the workflow engine and the dynamic form
//! renderer: a [`FormSchema`] describing field types and constraints, a
//! parallel [`UiHints`] tree carrying widget choices and per-field
//! [`DisplayIf`] visibility predicates, and [`ActionDescriptor`]s describing
//! the operations a user may trigger on a form.
//!
//! # Key Concepts
//!
//! - **FormSchema / UiHints pair**: supplied once per form instance (usually
//!   fetched with a workflow task), filtered on every value change, discarded
//!   when the form closes.
//! - **displayIf**: a predicate over current form values controlling runtime
//!   field visibility. Every predicate names a field that exists in the
//!   schema; a misconfigured one simply never matches.
//! - **ActionId**: a closed set of built-in action tags (`submit`,
//!   `save_draft`, `cancel`) plus a `Custom` escape hatch, so the known cases
//!   keep compile-time safety without losing extensibility.
//! - **ActionContext / ActionOutcome**: the sole protocol between the generic
//!   form engine and business-specific handlers.

#![deny(unsafe_code)]

mod action;
mod errors;
mod hints;
mod schema;
mod task;

pub use action::*;
pub use errors::*;
pub use hints::*;
pub use schema::*;
pub use task::*;
