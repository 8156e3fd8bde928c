// Lusakey — Paths and fixed policy
//
// The only configurable input is where the vault lives: `$LUSAKEY_DATA_DIR`
// if set, otherwise `<local data dir>/lusakey`.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LUSAKEY_DATA_DIR";

const APP_DIR: &str = "lusakey";
const DIGEST_FILE: &str = "master.hash";
const DB_FILE: &str = "lusakey.db";

/// Minimum master password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Locations of the two persisted artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultPaths {
    data_dir: PathBuf,
}

impl VaultPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the per-user data directory.
    pub fn from_env() -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Self::new(dir);
        }
        let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(APP_DIR))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn digest_path(&self) -> PathBuf {
        self.data_dir.join(DIGEST_FILE)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    /// Create the data directory if needed, owner-only on Unix.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(&self.data_dir, perms)?;
            }

            tracing::info!(path = %self.data_dir.display(), "Created data directory");
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
