//! Key material handling for ssh-scalar
//!
//! This module provides:
//! - The public key derivation capability used during reconstruction
//! - Secure memory handling with automatic zeroing

mod keys;
mod secure_bytes;

pub use keys::{Ed25519Deriver, PublicKeyDeriver};
pub use secure_bytes::SecureBytes;

/// Ed25519 secret scalar (seed) length in bytes
pub const SCALAR_LEN: usize = 32;

/// Ed25519 public key length in bytes
pub const PUBLIC_KEY_LEN: usize = 32;
