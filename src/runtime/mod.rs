//! # Runtime Module
//!
//! Process-level setup for the resolver binary.

pub mod initialization;

pub use initialization::*;
