//! Console Common Library
//!
//! Shared types and errors used by the access layer and its backend adapters.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
