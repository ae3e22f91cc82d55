//! `thinhook-core` — shared building blocks for the thin-event core.
//!
//! This crate holds the error taxonomy and the prefixed identifier types; no
//! wire formats and no store concerns live here.

pub mod error;
pub mod id;

pub use error::{EventError, EventResult};
pub use id::{EventId, MovieId, OrderId};
