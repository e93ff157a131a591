//! Byte buffer for key material, zeroed on drop
//!
//! Holds scalars, decoded key blobs and private sections. Contents are
//! never printed through `Debug` and are locked in memory where the
//! platform allows it.

use std::ops::Deref;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Owned secret bytes that are zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecureBytes(Vec<u8>);

impl SecureBytes {
    /// Take ownership of `data`; the vector must not be reallocated afterwards
    pub fn new(data: Vec<u8>) -> Self {
        let secure = Self(data);
        secure.lock_memory();
        secure
    }

    /// Lock memory to prevent swapping (best effort, may fail without privileges)
    #[cfg(unix)]
    fn lock_memory(&self) {
        if self.0.capacity() == 0 {
            return;
        }
        unsafe {
            libc::mlock(self.0.as_ptr() as *const libc::c_void, self.0.capacity());
        }
    }

    #[cfg(not(unix))]
    fn lock_memory(&self) {}

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to a regular Vec, consuming self
    /// WARNING: The returned Vec is no longer protected!
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }
}

impl Deref for SecureBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for SecureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SecureBytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for SecureBytes {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl Default for SecureBytes {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl Clone for SecureBytes {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl PartialEq for SecureBytes {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecureBytes {}

// Prevent accidental debug printing of secrets
impl std::fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureBytes")
            .field("len", &self.0.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}
