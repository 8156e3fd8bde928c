// Lusakey — Master digest file
//
// The MasterCredential is a single bare hex string on disk. Its presence is
// what "a vault exists" means; vault creation removes and rewrites it.

use std::io;
use std::path::{Path, PathBuf};

/// Handle to the digest file.
pub struct DigestFile {
    path: PathBuf,
}

impl DigestFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the stored digest. `None` means no vault has been created.
    pub fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write the digest, replacing any previous one. Owner-only on Unix.
    pub fn write(&self, digest: &str) -> io::Result<()> {
        std::fs::write(&self.path, digest)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        tracing::debug!(path = %self.path.display(), "Master digest written");
        Ok(())
    }

    /// Remove the digest file. Absence is not an error.
    pub fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::warn!(path = %self.path.display(), "Master digest removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
