//! OpenSSH "openssh-key-v1" private key codec for Ed25519 keys
//!
//! Decoding goes armored text -> base64 blob -> container -> private
//! section -> scalar + comment. Encoding runs the same stages backwards,
//! using an injected [`PublicKeyDeriver`] for the public half.
//!
//! Only unencrypted (`none`/`none`) single-key `ssh-ed25519` files are
//! supported.

mod armor;
mod container;
mod private;
mod pubkey;
mod wire;

use std::fmt;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::{PublicKeyDeriver, SecureBytes, PUBLIC_KEY_LEN, SCALAR_LEN};
use crate::error::{Result, ScalarKeyError};
use crate::record::ScalarRecord;

pub use armor::{armor, unarmor, BEGIN_MARKER, END_MARKER, LINE_WIDTH};
pub use container::{build_container, parse_container, Container};
pub use private::{
    build_private_section, build_private_section_with, parse_private_section, PrivateSection,
    PRIVATE_BLOB_LEN,
};
pub use pubkey::{decode_public_blob, encode_public_blob, PublicKeyLine};
pub use wire::{put_string, put_u32, read_string, read_u32, write_string};

/// Container magic, including the NUL terminator
pub const MAGIC: &[u8] = b"openssh-key-v1\0";

/// Cipher and KDF name of an unencrypted key
pub const NONE: &[u8] = b"none";

/// The only supported key type
pub const KEY_TYPE: &str = "ssh-ed25519";

/// Cipher block size for "none"; the private section is padded to it
pub const BLOCK_SIZE: usize = 8;

/// Check integer written by [`reconstruct_key`]
pub const CHECK_INT: u32 = 0x1122_3344;

/// Non-fatal inconsistencies in an otherwise decodable key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A padding byte does not equal its 1-based position
    Padding {
        position: usize,
        expected: u8,
        found: u8,
    },
    /// More padding than one cipher block
    PaddingLength { len: usize },
    /// Private section is not a multiple of the block size
    Misaligned { len: usize },
    CheckIntMismatch { first: u32, second: u32 },
    /// Public key in the container header differs from the private section
    PublicKeyMismatch,
    /// Tail of the private key blob differs from the embedded public key
    PrivateBlobMismatch,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::Padding {
                position,
                expected,
                found,
            } => write!(
                f,
                "padding byte {} is {:#04x}, expected {:#04x}",
                position, found, expected
            ),
            ParseWarning::PaddingLength { len } => {
                write!(f, "{} padding bytes exceed the {}-byte block", len, BLOCK_SIZE)
            }
            ParseWarning::Misaligned { len } => write!(
                f,
                "private section length {} is not a multiple of {}",
                len, BLOCK_SIZE
            ),
            ParseWarning::CheckIntMismatch { first, second } => {
                write!(f, "check integers differ: {:#010x} != {:#010x}", first, second)
            }
            ParseWarning::PublicKeyMismatch => {
                write!(f, "container public key differs from the private section")
            }
            ParseWarning::PrivateBlobMismatch => {
                write!(f, "private key blob does not end with the embedded public key")
            }
        }
    }
}

/// Everything recovered from a private key file
#[derive(Debug)]
pub struct DecodedKey {
    pub record: ScalarRecord,
    /// Public key embedded in the private section
    pub public_key: [u8; PUBLIC_KEY_LEN],
    /// Public key from the container header, if it is an Ed25519 blob
    pub header_public_key: Option<[u8; PUBLIC_KEY_LEN]>,
    pub warnings: Vec<ParseWarning>,
}

/// Decode an armored private key, keeping the public key and any warnings
pub fn decode_private_key(text: &str) -> Result<DecodedKey> {
    let blob = SecureBytes::new(unarmor(text)?);
    let container = parse_container(&blob)?;
    let section = parse_private_section(container.private_section)?;

    let mut warnings = section.warnings;
    let header_public_key = decode_public_blob(container.public_key_blob).ok();
    if container.public_key_blob != encode_public_blob(&section.public_key).as_slice() {
        warn!("{}", ParseWarning::PublicKeyMismatch);
        warnings.push(ParseWarning::PublicKeyMismatch);
    }

    let record = ScalarRecord::new(&section.scalar, section.comment)?;
    debug!(warnings = warnings.len(), "decoded private key");

    Ok(DecodedKey {
        record,
        public_key: section.public_key,
        header_public_key,
        warnings,
    })
}

/// Recover the scalar and comment from an armored private key
pub fn extract_scalar_and_comment(text: &str) -> Result<ScalarRecord> {
    decode_private_key(text).map(|decoded| decoded.record)
}

/// Options for [`reconstruct_key_with`]
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Value written to both check integers
    pub check_int: u32,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            check_int: CHECK_INT,
        }
    }
}

/// A regenerated key pair
pub struct ReconstructedKey {
    /// Armored private key text
    pub private_key: Zeroizing<String>,
    /// `authorized_keys` line, newline terminated
    pub public_key_line: String,
    pub public_key: [u8; PUBLIC_KEY_LEN],
}

impl fmt::Debug for ReconstructedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReconstructedKey")
            .field("private_key", &"[REDACTED]")
            .field("public_key_line", &self.public_key_line)
            .finish()
    }
}

/// Rebuild an OpenSSH private key and public key line from a raw scalar
pub fn reconstruct_key<D>(scalar: &[u8], comment: &[u8], deriver: &D) -> Result<ReconstructedKey>
where
    D: PublicKeyDeriver + ?Sized,
{
    reconstruct_key_with(scalar, comment, deriver, &ReconstructOptions::default())
}

/// [`reconstruct_key`] with explicit options
pub fn reconstruct_key_with<D>(
    scalar: &[u8],
    comment: &[u8],
    deriver: &D,
    options: &ReconstructOptions,
) -> Result<ReconstructedKey>
where
    D: PublicKeyDeriver + ?Sized,
{
    let scalar: &[u8; SCALAR_LEN] = scalar
        .try_into()
        .map_err(|_| ScalarKeyError::InvalidScalarLength(scalar.len()))?;

    let public_key = deriver.derive_public_key(scalar)?;
    debug!(public_key = %hex::encode(public_key), "derived public key");

    let section = build_private_section_with(options.check_int, scalar, &public_key, comment)?;
    let container = SecureBytes::new(build_container(&encode_public_blob(&public_key), &section));
    let private_key = Zeroizing::new(armor(&container));

    let comment = String::from_utf8_lossy(comment);
    let public_key_line = PublicKeyLine::new(public_key, comment).encode();

    Ok(ReconstructedKey {
        private_key,
        public_key_line,
        public_key,
    })
}

/// Rebuild a key from a record, as produced by [`extract_scalar_and_comment`]
pub fn reconstruct_record<D>(record: &ScalarRecord, deriver: &D) -> Result<ReconstructedKey>
where
    D: PublicKeyDeriver + ?Sized,
{
    reconstruct_key(record.scalar(), record.comment_bytes(), deriver)
}
