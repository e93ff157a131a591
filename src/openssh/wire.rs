//! Length-prefixed string primitives
//!
//! Every field of the openssh-key-v1 format is either a bare big-endian
//! `u32` or a string: `[4 bytes: length (u32 BE)][length bytes: data]`.
//! All truncation detection for the format happens here.

use crate::error::{Result, ScalarKeyError};

/// Size of the length prefix and of bare integers
pub const U32_LEN: usize = 4;

/// Read a big-endian u32 at `offset`, returning the value and the next offset
pub fn read_u32(buffer: &[u8], offset: usize) -> Result<(u32, usize)> {
    let remaining = buffer.len().saturating_sub(offset);
    if remaining < U32_LEN {
        return Err(ScalarKeyError::Truncated {
            offset,
            needed: U32_LEN,
            remaining,
        });
    }

    let bytes = [
        buffer[offset],
        buffer[offset + 1],
        buffer[offset + 2],
        buffer[offset + 3],
    ];
    Ok((u32::from_be_bytes(bytes), offset + U32_LEN))
}

/// Read a length-prefixed string at `offset`
///
/// Returns the string contents (borrowed from `buffer`) and the offset of the
/// next field.
pub fn read_string(buffer: &[u8], offset: usize) -> Result<(&[u8], usize)> {
    let (declared, start) = read_u32(buffer, offset)?;
    let remaining = buffer.len() - start;

    // Compared as an unsigned magnitude; anything past usize is simply too long.
    let len = usize::try_from(declared).unwrap_or(usize::MAX);
    if len > remaining {
        return Err(ScalarKeyError::Truncated {
            offset: start,
            needed: len,
            remaining,
        });
    }

    let end = start + len;
    Ok((&buffer[start..end], end))
}

/// Append a big-endian u32
pub fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Append a length-prefixed string
pub fn put_string(out: &mut Vec<u8>, value: &[u8]) {
    put_u32(out, value.len() as u32);
    out.extend_from_slice(value);
}

/// Encode a length-prefixed string
pub fn write_string(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(U32_LEN + value.len());
    put_string(&mut out, value);
    out
}
