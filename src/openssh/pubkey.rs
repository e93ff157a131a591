//! Ed25519 public key blob and `authorized_keys` line
//!
//! Blob format:
//! [4 bytes: length of "ssh-ed25519"][11 bytes: "ssh-ed25519"]
//! [4 bytes: length of key][32 bytes: public key]

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::wire::{put_string, read_string};
use super::KEY_TYPE;
use crate::crypto::PUBLIC_KEY_LEN;
use crate::error::{Result, ScalarKeyError};

/// Encode a raw public key as an OpenSSH public key blob
pub fn encode_public_blob(public_key: &[u8; PUBLIC_KEY_LEN]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(4 + KEY_TYPE.len() + 4 + PUBLIC_KEY_LEN);
    put_string(&mut blob, KEY_TYPE.as_bytes());
    put_string(&mut blob, public_key);
    blob
}

/// Decode an OpenSSH public key blob into the raw 32-byte key
pub fn decode_public_blob(blob: &[u8]) -> Result<[u8; PUBLIC_KEY_LEN]> {
    let (key_type, offset) = read_string(blob, 0)?;
    if key_type != KEY_TYPE.as_bytes() {
        return Err(ScalarKeyError::UnsupportedKeyType(
            String::from_utf8_lossy(key_type).into_owned(),
        ));
    }

    let (key, offset) = read_string(blob, offset)?;
    let public_key: [u8; PUBLIC_KEY_LEN] =
        key.try_into().map_err(|_| ScalarKeyError::MalformedKey {
            field: "public key",
            expected: PUBLIC_KEY_LEN,
            actual: key.len(),
        })?;

    if offset != blob.len() {
        return Err(ScalarKeyError::Format(format!(
            "{} trailing bytes after public key blob",
            blob.len() - offset
        )));
    }

    Ok(public_key)
}

/// A single `authorized_keys` entry for an Ed25519 key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyLine {
    pub public_key: [u8; PUBLIC_KEY_LEN],
    pub comment: String,
}

impl PublicKeyLine {
    pub fn new(public_key: [u8; PUBLIC_KEY_LEN], comment: impl Into<String>) -> Self {
        Self {
            public_key,
            comment: comment.into(),
        }
    }

    /// Parse a line of the form `ssh-ed25519 <base64> [comment]`
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut parts = line.splitn(3, ' ');

        let key_type = parts.next().unwrap_or_default();
        if key_type != KEY_TYPE {
            return Err(ScalarKeyError::UnsupportedKeyType(key_type.to_string()));
        }

        let encoded = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ScalarKeyError::Format("public key line has no key data".into()))?;
        let blob = STANDARD
            .decode(encoded)
            .map_err(|e| ScalarKeyError::Format(format!("invalid base64 in public key: {}", e)))?;

        Ok(Self {
            public_key: decode_public_blob(&blob)?,
            comment: parts.next().unwrap_or_default().to_string(),
        })
    }

    /// Render the line, including the trailing newline
    ///
    /// The separator before the comment is always written, so an empty
    /// comment leaves a trailing space.
    pub fn encode(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for PublicKeyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = STANDARD.encode(encode_public_blob(&self.public_key));
        write!(f, "{} {} {}", KEY_TYPE, encoded, self.comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Public key of the seed 0x01..=0x20
    const SEQ_PUBLIC_KEY: &str = "79b5562e8fe654f94078b112e8a98ba7901f853ae695bed7e0e3910bad049664";
    const SEQ_LINE: &str =
        "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIHm1Vi6P5lT5QHixEuipi6eQH4U65pW+1+DjkQutBJZk test@host\n";

    fn seq_public_key() -> [u8; PUBLIC_KEY_LEN] {
        hex::decode(SEQ_PUBLIC_KEY).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_encode_known_line() {
        let line = PublicKeyLine::new(seq_public_key(), "test@host");
        assert_eq!(line.encode(), SEQ_LINE);
    }

    #[test]
    fn test_empty_comment_keeps_separator() {
        let line = PublicKeyLine::new(seq_public_key(), "");
        assert!(line.encode().ends_with("BJZk \n"));
    }

    #[test]
    fn test_parse_known_line() {
        let line = PublicKeyLine::parse(SEQ_LINE).unwrap();
        assert_eq!(line.public_key, seq_public_key());
        assert_eq!(line.comment, "test@host");
    }

    #[test]
    fn test_parse_comment_with_spaces() {
        let original = PublicKeyLine::new([7u8; 32], "backup key for host a");
        let parsed = PublicKeyLine::parse(&original.encode()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_without_comment() {
        let encoded = STANDARD.encode(encode_public_blob(&[9u8; 32]));
        let parsed = PublicKeyLine::parse(&format!("ssh-ed25519 {}", encoded)).unwrap();
        assert_eq!(parsed.public_key, [9u8; 32]);
        assert!(parsed.comment.is_empty());
    }

    #[test]
    fn test_parse_rejects_other_types() {
        assert!(matches!(
            PublicKeyLine::parse("ssh-rsa AAAAB3NzaC1yc2E= me"),
            Err(ScalarKeyError::UnsupportedKeyType(t)) if t == "ssh-rsa"
        ));
    }

    #[test]
    fn test_parse_rejects_mismatched_inner_type() {
        let mut blob = Vec::new();
        put_string(&mut blob, b"ssh-rsa");
        put_string(&mut blob, &[1u8; 32]);
        let line = format!("ssh-ed25519 {} x", STANDARD.encode(blob));

        assert!(matches!(
            PublicKeyLine::parse(&line),
            Err(ScalarKeyError::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn test_decode_blob_wrong_key_size() {
        let mut blob = Vec::new();
        put_string(&mut blob, KEY_TYPE.as_bytes());
        put_string(&mut blob, &[1u8; 31]);

        assert!(matches!(
            decode_public_blob(&blob),
            Err(ScalarKeyError::MalformedKey { actual: 31, .. })
        ));
    }

    #[test]
    fn test_decode_blob_trailing_bytes() {
        let mut blob = encode_public_blob(&[1u8; 32]);
        blob.push(0);
        assert!(matches!(
            decode_public_blob(&blob),
            Err(ScalarKeyError::Format(_))
        ));
    }
}
