//! Scalar record exchanged with QR rendering and storage
//!
//! External form is a compact JSON array: `["<scalar base64>"]` or
//! `["<scalar base64>","<comment>"]`. An empty comment is never written.
//! Non-ASCII comment characters are written as `\uXXXX` escapes so the
//! payload is plain ASCII.

use std::io;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::crypto::{SecureBytes, SCALAR_LEN};
use crate::error::{Result, ScalarKeyError};

/// A raw Ed25519 scalar with its optional comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarRecord {
    scalar: SecureBytes,
    comment: Option<String>,
}

impl ScalarRecord {
    /// Create a record; an empty comment is stored as no comment
    pub fn new(scalar: &[u8], comment: impl Into<String>) -> Result<Self> {
        if scalar.len() != SCALAR_LEN {
            return Err(ScalarKeyError::InvalidScalarLength(scalar.len()));
        }

        let comment = comment.into();
        Ok(Self {
            scalar: SecureBytes::from(scalar),
            comment: (!comment.is_empty()).then_some(comment),
        })
    }

    pub fn scalar(&self) -> &[u8] {
        &self.scalar
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Comment bytes as written into a key file (empty when absent)
    pub fn comment_bytes(&self) -> &[u8] {
        self.comment.as_deref().unwrap_or_default().as_bytes()
    }

    pub fn scalar_base64(&self) -> String {
        STANDARD.encode(&*self.scalar)
    }

    /// Compact JSON array form, ASCII only
    pub fn to_json(&self) -> Result<String> {
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(|e| ScalarKeyError::InvalidRecord(e.to_string()))
    }

    /// Parse the JSON array form
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;

        let items = match value {
            Value::Array(items) if (1..=2).contains(&items.len()) => items,
            _ => {
                return Err(ScalarKeyError::InvalidRecord(
                    "input must be a JSON array with 1 or 2 elements: [scalar_b64, optional_comment]"
                        .into(),
                ))
            }
        };

        let encoded = items[0]
            .as_str()
            .ok_or_else(|| ScalarKeyError::InvalidRecord("scalar must be a string".into()))?;
        let comment = match items.get(1) {
            Some(Value::String(comment)) => comment.clone(),
            Some(_) => {
                return Err(ScalarKeyError::InvalidRecord(
                    "comment must be a string".into(),
                ))
            }
            None => String::new(),
        };

        let scalar = SecureBytes::new(
            STANDARD
                .decode(encoded)
                .map_err(|e| ScalarKeyError::InvalidRecord(format!("invalid scalar base64: {}", e)))?,
        );

        Self::new(&scalar, comment)
    }
}

/// Compact formatter that escapes every non-ASCII character
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

impl Serialize for ScalarRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.comment.is_some() { 2 } else { 1 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.scalar_base64())?;
        if let Some(comment) = &self.comment {
            seq.serialize_element(comment)?;
        }
        seq.end()
    }
}
