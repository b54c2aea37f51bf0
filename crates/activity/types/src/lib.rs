//! Activity Domain Types
//!
//! An *activity* is a unit of user-facing work — a schedule entry, project
//! task, ticket, time entry, or workflow task — normalized into a common
//! displayable shape. Dashboards, drawers, and the activity cache all consume
//! these types; nothing here performs I/O.
//!
//! # Key Concepts
//!
//! - **ActivityRecord**: A tagged union keyed by [`ActivityType`], each variant
//!   carrying type-specific fields atop a common [`ActivityBase`].
//! - **ActivityFilters**: The filter set a listing request is keyed by. The
//!   cache layer canonicalizes these into deterministic cache keys.
//! - **ActivityPage**: One page of results plus pagination bookkeeping.
//!
//! # Design Principles
//!
//! 1. Records are read-only snapshots from the server. Clients never mutate
//!    them; they discard and refetch.
//! 2. The variant tag *is* the source type — the union makes the
//!    "source type equals type" invariant structural.

#![deny(unsafe_code)]

mod activity;
mod errors;
mod filters;
mod page;

pub use activity::*;
pub use errors::*;
pub use filters::*;
pub use page::*;
