use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScalarKeyError>;

#[derive(Debug, Error)]
pub enum ScalarKeyError {
    #[error("not a valid OpenSSH private key file: {0}")]
    Format(String),

    #[error("truncated input: field at offset {offset} needs {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unsupported cipher '{cipher}' / kdf '{kdf}': only unencrypted keys are supported")]
    UnsupportedCipher { cipher: String, kdf: String },

    #[error("unsupported key count {0}: exactly one key per file is supported")]
    UnsupportedKeyCount(u32),

    #[error("unsupported key type '{0}': only ssh-ed25519 is supported")]
    UnsupportedKeyType(String),

    #[error("malformed {field}: expected {expected} bytes, got {actual}")]
    MalformedKey {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("scalar must be exactly 32 bytes, got {0}")]
    InvalidScalarLength(usize),

    #[error("invalid scalar record: {0}")]
    InvalidRecord(String),

    #[error("public key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
