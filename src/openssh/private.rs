//! Private section of an unencrypted openssh-key-v1 container
//!
//! ```text
//! u32     check int
//! u32     check int (same value)
//! string  "ssh-ed25519"
//! string  public key (32 bytes)
//! string  scalar (32 bytes) || public key (32 bytes)
//! string  comment
//! byte[]  padding 1, 2, 3, ... up to the block size
//! ```

use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::wire::{put_string, put_u32, read_string, read_u32};
use super::{ParseWarning, BLOCK_SIZE, CHECK_INT, KEY_TYPE};
use crate::crypto::{SecureBytes, PUBLIC_KEY_LEN, SCALAR_LEN};
use crate::error::{Result, ScalarKeyError};

/// Length of the embedded private key blob (scalar followed by public key)
pub const PRIVATE_BLOB_LEN: usize = SCALAR_LEN + PUBLIC_KEY_LEN;

/// Decoded private section
#[derive(Debug)]
pub struct PrivateSection {
    pub check_int1: u32,
    pub check_int2: u32,
    pub public_key: [u8; PUBLIC_KEY_LEN],
    /// First half of the private key blob
    pub scalar: SecureBytes,
    pub comment: String,
    pub padding_len: usize,
    /// Non-fatal inconsistencies found while decoding
    pub warnings: Vec<ParseWarning>,
}

/// Parse a decrypted private section
///
/// Structural problems are errors. Check-int, padding and embedded public
/// key inconsistencies are collected in [`PrivateSection::warnings`]; only
/// the scalar and comment are needed for extraction.
pub fn parse_private_section(data: &[u8]) -> Result<PrivateSection> {
    let mut warnings = Vec::new();

    let (check_int1, offset) = read_u32(data, 0)?;
    let (check_int2, offset) = read_u32(data, offset)?;
    if check_int1 != check_int2 {
        warnings.push(ParseWarning::CheckIntMismatch {
            first: check_int1,
            second: check_int2,
        });
    }

    let (key_type, offset) = read_string(data, offset)?;
    if key_type != KEY_TYPE.as_bytes() {
        return Err(ScalarKeyError::UnsupportedKeyType(
            String::from_utf8_lossy(key_type).into_owned(),
        ));
    }

    let (public, offset) = read_string(data, offset)?;
    let public_key: [u8; PUBLIC_KEY_LEN] =
        public.try_into().map_err(|_| ScalarKeyError::MalformedKey {
            field: "embedded public key",
            expected: PUBLIC_KEY_LEN,
            actual: public.len(),
        })?;

    let (private_blob, offset) = read_string(data, offset)?;
    if private_blob.len() != PRIVATE_BLOB_LEN {
        return Err(ScalarKeyError::MalformedKey {
            field: "private key blob",
            expected: PRIVATE_BLOB_LEN,
            actual: private_blob.len(),
        });
    }
    let (scalar, embedded_public) = private_blob.split_at(SCALAR_LEN);
    if embedded_public != public_key {
        warnings.push(ParseWarning::PrivateBlobMismatch);
    }

    let (comment, offset) = read_string(data, offset)?;
    let comment = String::from_utf8_lossy(comment).into_owned();

    let padding = &data[offset..];
    warnings.extend(check_padding(padding, data.len()));

    for warning in &warnings {
        warn!("{}", warning);
    }
    debug!(
        comment_len = comment.len(),
        padding_len = padding.len(),
        public_key = %hex::encode(public_key),
        "parsed private section"
    );

    Ok(PrivateSection {
        check_int1,
        check_int2,
        public_key,
        scalar: SecureBytes::from(scalar),
        comment,
        padding_len: padding.len(),
        warnings,
    })
}

/// Validate the trailing pad run against the 1, 2, 3, ... sequence
fn check_padding(padding: &[u8], section_len: usize) -> Vec<ParseWarning> {
    let mut warnings = Vec::new();

    if section_len % BLOCK_SIZE != 0 {
        warnings.push(ParseWarning::Misaligned { len: section_len });
    }
    if padding.len() > BLOCK_SIZE {
        warnings.push(ParseWarning::PaddingLength { len: padding.len() });
    }

    let mismatch = padding
        .iter()
        .enumerate()
        .find(|&(i, &byte)| byte != (i + 1) as u8);
    if let Some((i, &found)) = mismatch {
        warnings.push(ParseWarning::Padding {
            position: i + 1,
            expected: (i + 1) as u8,
            found,
        });
    }

    warnings
}

/// Build a private section with the default check int
pub fn build_private_section(
    scalar: &[u8],
    public_key: &[u8; PUBLIC_KEY_LEN],
    comment: &[u8],
) -> Result<SecureBytes> {
    build_private_section_with(CHECK_INT, scalar, public_key, comment)
}

/// Build a private section using `check_int` for both check integers
///
/// Padding is always `BLOCK_SIZE - len % BLOCK_SIZE` bytes, so an already
/// aligned section still gets a full block of 1..=8.
pub fn build_private_section_with(
    check_int: u32,
    scalar: &[u8],
    public_key: &[u8; PUBLIC_KEY_LEN],
    comment: &[u8],
) -> Result<SecureBytes> {
    if scalar.len() != SCALAR_LEN {
        return Err(ScalarKeyError::InvalidScalarLength(scalar.len()));
    }

    let mut private_blob = Zeroizing::new(Vec::with_capacity(PRIVATE_BLOB_LEN));
    private_blob.extend_from_slice(scalar);
    private_blob.extend_from_slice(public_key);

    let unpadded_len = 8 + (4 + KEY_TYPE.len()) + (4 + PUBLIC_KEY_LEN) + (4 + PRIVATE_BLOB_LEN)
        + (4 + comment.len());
    // Capacity covers the padding; the buffer must not reallocate
    let mut section = Vec::with_capacity(unpadded_len + BLOCK_SIZE);

    put_u32(&mut section, check_int);
    put_u32(&mut section, check_int);
    put_string(&mut section, KEY_TYPE.as_bytes());
    put_string(&mut section, public_key);
    put_string(&mut section, &private_blob);
    put_string(&mut section, comment);

    let pad_len = BLOCK_SIZE - section.len() % BLOCK_SIZE;
    section.extend((1..=pad_len).map(|i| i as u8));

    Ok(SecureBytes::new(section))
}
