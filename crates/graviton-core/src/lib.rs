//! Graviton-core: Shared types, errors, and amount arithmetic
//!
//! This crate provides the foundational types used across the Graviton
//! workspace: supported chains, token and transfer values, the bridge fee
//! quote, and exact decimal-string arithmetic for amount scaling.

pub mod amount;
pub mod errors;
pub mod types;

pub use amount::*;
pub use errors::*;
pub use types::*;
