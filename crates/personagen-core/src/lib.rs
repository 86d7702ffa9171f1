//! Core data model for synthetic person generation.
//!
//! Profile value objects are defined leaf-first; the [`Person`] aggregate
//! holds plain optional references to them. Nothing in this crate performs
//! I/O or owns random state.

pub mod errors;
pub mod model;
pub mod sampling;

pub use errors::{CoreError, Result};
pub use model::*;
