//! Print the scalar record of a private key file

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::openssh;
use crate::storage;

pub fn run(key_file: &Path, out: &mut impl Write) -> Result<()> {
    let text = storage::read_input(key_file)
        .with_context(|| format!("failed to read {}", key_file.display()))?;

    let record = openssh::extract_scalar_and_comment(&text)
        .with_context(|| format!("failed to extract scalar from {}", key_file.display()))?;

    writeln!(out, "{}", record.to_json()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ed25519Deriver;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_prints_record_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id_ed25519");
        let key = openssh::reconstruct_key(&[1u8; 32], b"me@box", &Ed25519Deriver).unwrap();
        fs::write(&path, key.private_key.as_bytes()).unwrap();

        let mut out = Vec::new();
        run(&path, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\"AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=\",\"me@box\"]\n"
        );
    }

    #[test]
    fn test_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("not-a-key");
        fs::write(&path, "hello\n").unwrap();

        let err = run(&path, &mut Vec::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("not-a-key"));
    }
}
