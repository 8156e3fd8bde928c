// Lusakey — Vault session state
//
// Explicit replacement for process-wide globals: locked/unlocked flag, the
// master password (zeroized on lock), and the cached record snapshot the
// search engine runs against.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::LusakeyError;
use crate::store::Record;

/// In-memory session. Starts locked.
pub struct VaultSession {
    unlocked: bool,
    master_password: Option<Zeroizing<String>>,
    records: Vec<Record>,
}

impl VaultSession {
    pub fn new() -> Self {
        Self {
            unlocked: false,
            master_password: None,
            records: Vec::new(),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Fail with `NotUnlocked` unless the session is unlocked.
    pub fn require_unlocked(&self) -> Result<(), LusakeyError> {
        if self.unlocked {
            Ok(())
        } else {
            Err(LusakeyError::NotUnlocked)
        }
    }

    /// Fail with `AlreadyUnlocked` unless the session is locked.
    pub fn require_locked(&self) -> Result<(), LusakeyError> {
        if self.unlocked {
            Err(LusakeyError::AlreadyUnlocked)
        } else {
            Ok(())
        }
    }

    /// Locked → Unlocked with the given snapshot.
    pub(crate) fn unlock(&mut self, password: &str, records: Vec<Record>) {
        self.master_password = Some(Zeroizing::new(password.to_string()));
        self.records = records;
        self.unlocked = true;
    }

    /// Unlocked → Locked. Drops the plaintext and the cache.
    pub(crate) fn lock(&mut self) {
        self.master_password = None;
        self.records = Vec::new();
        self.unlocked = false;
    }

    /// Cached snapshot; empty while locked.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn replace_records(&mut self, records: Vec<Record>) {
        tracing::debug!(count = records.len(), "Session cache refreshed");
        self.records = records;
    }

    /// Whether `candidate`, trimmed, equals the master password held by this session.
    /// Used to re-confirm before showing a secret; always false while locked.
    pub fn confirms(&self, candidate: &str) -> bool {
        match &self.master_password {
            Some(password) => password.as_str() == candidate.trim(),
            None => false,
        }
    }
}

impl Default for VaultSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultSession")
            .field("unlocked", &self.unlocked)
            .field("master_password", &self.master_password.as_ref().map(|_| "[REDACTED]"))
            .field("records", &self.records.len())
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
