//! Shared Types

pub mod membership;

pub use membership::*;
