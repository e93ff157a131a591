//! Outer openssh-key-v1 container
//!
//! ```text
//! "openssh-key-v1\0"
//! string  cipher name
//! string  kdf name
//! string  kdf options
//! u32     number of keys
//! string  public key blob
//! string  private section (encrypted unless cipher is "none")
//! ```

use tracing::debug;

use super::wire::{put_string, put_u32, read_string, read_u32};
use super::{MAGIC, NONE};
use crate::error::{Result, ScalarKeyError};

/// Parsed container fields, borrowed from the decoded blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<'a> {
    pub cipher_name: &'a [u8],
    pub kdf_name: &'a [u8],
    pub kdf_options: &'a [u8],
    pub key_count: u32,
    pub public_key_blob: &'a [u8],
    pub private_section: &'a [u8],
}

/// Parse an unencrypted single-key container
///
/// Every byte of `data` must be accounted for by the container fields.
pub fn parse_container(data: &[u8]) -> Result<Container<'_>> {
    if !data.starts_with(MAGIC) {
        return Err(ScalarKeyError::Format("missing openssh-key-v1 magic".into()));
    }

    let (cipher_name, offset) = read_string(data, MAGIC.len())?;
    let (kdf_name, offset) = read_string(data, offset)?;
    let (kdf_options, offset) = read_string(data, offset)?;

    if cipher_name != NONE || kdf_name != NONE {
        return Err(ScalarKeyError::UnsupportedCipher {
            cipher: String::from_utf8_lossy(cipher_name).into_owned(),
            kdf: String::from_utf8_lossy(kdf_name).into_owned(),
        });
    }

    let (key_count, offset) = read_u32(data, offset)?;
    if key_count != 1 {
        return Err(ScalarKeyError::UnsupportedKeyCount(key_count));
    }

    let (public_key_blob, offset) = read_string(data, offset)?;
    let (private_section, offset) = read_string(data, offset)?;

    if offset != data.len() {
        return Err(ScalarKeyError::Format(format!(
            "{} trailing bytes after private section",
            data.len() - offset
        )));
    }

    debug!(
        public_key_blob_len = public_key_blob.len(),
        private_section_len = private_section.len(),
        "parsed openssh-key-v1 container"
    );

    Ok(Container {
        cipher_name,
        kdf_name,
        kdf_options,
        key_count,
        public_key_blob,
        private_section,
    })
}

/// Build an unencrypted single-key container
pub fn build_container(public_key_blob: &[u8], private_section: &[u8]) -> Vec<u8> {
    let mut data =
        Vec::with_capacity(MAGIC.len() + 4 * 6 + 8 + public_key_blob.len() + private_section.len());

    data.extend_from_slice(MAGIC);
    put_string(&mut data, NONE);
    put_string(&mut data, NONE);
    put_string(&mut data, b"");
    put_u32(&mut data, 1);
    put_string(&mut data, public_key_blob);
    put_string(&mut data, private_section);

    data
}
