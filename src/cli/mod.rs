//! CLI command implementations
//!
//! Decode warnings are reported through `tracing` by the codec itself.

pub mod extract;
pub mod pubkey;
pub mod reconstruct;
