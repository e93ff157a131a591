//! Rebuild an OpenSSH key pair from a scalar record

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::crypto::Ed25519Deriver;
use crate::openssh;
use crate::record::ScalarRecord;
use crate::storage;

/// `output` wins over `pubkey_to_stdout`; with neither, the private key goes to `out`
pub fn run(
    json_input: &Path,
    output: Option<&Path>,
    pubkey_to_stdout: bool,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> Result<()> {
    let json = storage::read_input(json_input)
        .with_context(|| format!("failed to read {}", json_input.display()))?;
    let record = ScalarRecord::from_json(&json).context("invalid scalar record")?;

    // Everything is built before anything is written
    let key = openssh::reconstruct_record(&record, &Ed25519Deriver)
        .context("failed to reconstruct key")?;

    match output {
        Some(path) => {
            let pub_path = storage::save_key_pair(path, &key)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(diag, "{} Private key written to {}", "✓".green(), path.display())?;
            writeln!(diag, "{} Public key written to {}", "✓".green(), pub_path.display())?;
        }
        None if pubkey_to_stdout => out.write_all(key.public_key_line.as_bytes())?,
        None => out.write_all(key.private_key.as_bytes())?,
    }

    Ok(())
}
