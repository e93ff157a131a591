//! Ed25519 public key derivation
//!
//! The codec never does curve arithmetic itself. Reconstruction asks a
//! [`PublicKeyDeriver`] for the public half of a scalar, so callers can plug
//! in a hardware token, a remote signer or a test stub.

use ed25519_dalek::{SigningKey, VerifyingKey};
use zeroize::Zeroize;

use super::{PUBLIC_KEY_LEN, SCALAR_LEN};
use crate::error::Result;

/// Maps a 32-byte Ed25519 scalar to its public key
///
/// Implementations must be deterministic and free of side effects.
pub trait PublicKeyDeriver {
    fn derive_public_key(&self, scalar: &[u8; SCALAR_LEN]) -> Result<[u8; PUBLIC_KEY_LEN]>;
}

impl<F> PublicKeyDeriver for F
where
    F: Fn(&[u8; SCALAR_LEN]) -> Result<[u8; PUBLIC_KEY_LEN]>,
{
    fn derive_public_key(&self, scalar: &[u8; SCALAR_LEN]) -> Result<[u8; PUBLIC_KEY_LEN]> {
        self(scalar)
    }
}

/// Derivation backed by ed25519-dalek
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Deriver;

impl PublicKeyDeriver for Ed25519Deriver {
    fn derive_public_key(&self, scalar: &[u8; SCALAR_LEN]) -> Result<[u8; PUBLIC_KEY_LEN]> {
        let mut key_bytes = *scalar;
        let signing_key = SigningKey::from_bytes(&key_bytes);
        let verifying_key: VerifyingKey = (&signing_key).into();

        // Zeroize the temporary array
        key_bytes.zeroize();

        Ok(verifying_key.to_bytes())
    }
}
