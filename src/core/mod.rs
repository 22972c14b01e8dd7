//! Core types: monetary values, reporting periods and the crate error.
//!
//! Everything else in the crate builds on these three pieces.

mod error;
mod money;
mod period;

pub use error::*;
pub use money::*;
pub use period::*;
