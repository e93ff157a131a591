//! ssh-scalar - raw Ed25519 scalars in and out of OpenSSH private keys
//!
//! This crate:
//! - Extracts the 32-byte secret scalar and comment from an unencrypted
//!   `openssh-key-v1` Ed25519 private key
//! - Rebuilds a byte-exact private key file and `authorized_keys` line from
//!   such a scalar
//! - Exchanges scalars as a compact JSON array for paper/QR backups

pub mod cli;
pub mod crypto;
pub mod error;
pub mod openssh;
pub mod record;
pub mod storage;

pub use crypto::{Ed25519Deriver, PublicKeyDeriver};
pub use error::{Result, ScalarKeyError};
pub use openssh::{extract_scalar_and_comment, reconstruct_key, ParseWarning, ReconstructedKey};
pub use record::ScalarRecord;
