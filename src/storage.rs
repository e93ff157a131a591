//! Reading key material from disk and writing reconstructed keys
//!
//! A reconstructed key pair is written as:
//! - `<path>`     armored private key, mode 0600 on Unix
//! - `<path>.pub` `authorized_keys` line

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Result, ScalarKeyError};
use crate::openssh::ReconstructedKey;

/// Path argument meaning "standard input"
pub const STDIN_PATH: &str = "-";

const PUB_SUFFIX: &str = ".pub";

/// Read a whole text input from `path`, or from stdin when it is `-`
///
/// Input that is not UTF-8 cannot be a key file and fails as `Format`.
pub fn read_input(path: &Path) -> Result<Zeroizing<String>> {
    let mut bytes = Zeroizing::new(Vec::new());

    if path.as_os_str() == STDIN_PATH {
        io::stdin().read_to_end(&mut bytes)?;
    } else {
        let mut file = File::open(path)?;
        file.read_to_end(&mut bytes)?;
    }

    let content = String::from_utf8(std::mem::take(&mut *bytes)).map_err(|e| {
        e.into_bytes().zeroize();
        ScalarKeyError::Format("key file is not UTF-8 text".into())
    })?;
    let content = Zeroizing::new(content);

    debug!(path = %path.display(), len = content.len(), "read input");
    Ok(content)
}

/// Path of the public key written next to `private_path`
pub fn public_key_path(private_path: &Path) -> PathBuf {
    let mut path = OsString::from(private_path.as_os_str());
    path.push(PUB_SUFFIX);
    PathBuf::from(path)
}

/// Write the private key and its `.pub` file
///
/// Returns the path of the public key file.
pub fn save_key_pair(private_path: &Path, key: &ReconstructedKey) -> Result<PathBuf> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(private_path)?;

    // An existing file keeps its old mode through open(); restrict it before writing
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(private_path, fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(key.private_key.as_bytes())?;
    file.sync_all()?;

    let pub_path = public_key_path(private_path);
    let mut pub_file = File::create(&pub_path)?;
    pub_file.write_all(key.public_key_line.as_bytes())?;
    pub_file.sync_all()?;

    debug!(
        private = %private_path.display(),
        public = %pub_path.display(),
        "wrote key pair"
    );
    Ok(pub_path)
}
