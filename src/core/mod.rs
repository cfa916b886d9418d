//! Core invoice types, numbering, VAT calculation, and compliance checks.
//!
//! Everything here is a pure function or a state-in/state-out value type.
//! Persistence and lifecycle orchestration live in [`crate::session`].

mod builder;
mod calc;
mod compliance;
mod error;
mod numbering;
mod types;

pub use builder::*;
pub use calc::*;
pub use compliance::*;
pub use error::*;
pub use numbering::*;
pub use types::*;
