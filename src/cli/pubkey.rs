//! Print the `authorized_keys` line of a private key file

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::crypto::{Ed25519Deriver, PublicKeyDeriver, SCALAR_LEN};
use crate::openssh::{self, PublicKeyLine};
use crate::storage;

/// Derive the public key from the stored scalar and print its line to `out`
///
/// A stored public key (section or header) that does not match the derived
/// one is reported on `diag`.
pub fn run(key_file: &Path, out: &mut impl Write, diag: &mut impl Write) -> Result<()> {
    let text = storage::read_input(key_file)
        .with_context(|| format!("failed to read {}", key_file.display()))?;

    let decoded = openssh::decode_private_key(&text)
        .with_context(|| format!("failed to decode {}", key_file.display()))?;

    let scalar: &[u8; SCALAR_LEN] = decoded.record.scalar().try_into()?;
    let derived = Ed25519Deriver.derive_public_key(scalar)?;

    if derived != decoded.public_key {
        writeln!(
            diag,
            "{} stored public key does not belong to the scalar; printing the derived key",
            "Warning:".yellow().bold()
        )?;
    }
    if decoded.header_public_key != Some(derived) {
        writeln!(
            diag,
            "{} container header public key does not belong to the scalar",
            "Warning:".yellow().bold()
        )?;
    }

    let line = PublicKeyLine::new(derived, decoded.record.comment().unwrap_or_default());
    out.write_all(line.encode().as_bytes())?;
    Ok(())
}
