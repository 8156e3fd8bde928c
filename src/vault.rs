// Lusakey — Vault service
//
// The core facade the presentation layer calls: vault creation and login
// against the digest file, locking, and record operations that keep the
// session's cached snapshot equal to the durable table.
//
// Flow:
//   1. `Vault::open()`: create the data directory and open the record store
//   2. `create_vault()` or `login()`: Locked → Unlocked, snapshot loaded
//   3. `insert()` / `update()` / `delete()`: write and re-read the snapshot in
//      one transaction, then replace the cache
//   4. `lock()`: Unlocked → Locked, plaintext password and cache dropped

use crate::config::{VaultPaths, MIN_PASSWORD_LEN};
use crate::error::{AuthError, Field, LusakeyError, Result, ValidationError};
use crate::gate::{hash_password, verify_password, DigestFile, VaultSession};
use crate::search;
use crate::store::{Database, NewRecord, Record, RecordStore, SqliteRecordStore, StoreError};

/// A single user's vault: digest file, record database, and session.
pub struct Vault {
    paths: VaultPaths,
    digest: DigestFile,
    db: Option<Database>,
    session: VaultSession,
}

impl Vault {
    /// Open the vault rooted at `paths`, starting locked. Fails if the record
    /// store cannot be initialized; there is no in-memory fallback.
    pub fn open(paths: VaultPaths) -> Result<Self> {
        paths.ensure_data_dir().map_err(StoreError::Io)?;
        let db = Database::open(&paths.db_path())?;

        tracing::info!(path = %paths.data_dir().display(), "Vault opened");

        Ok(Self {
            digest: DigestFile::new(paths.digest_path()),
            paths,
            db: Some(db),
            session: VaultSession::new(),
        })
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn session(&self) -> &VaultSession {
        &self.session
    }

    pub fn is_unlocked(&self) -> bool {
        self.session.is_unlocked()
    }

    /// Whether a master digest has been set up.
    pub fn has_vault(&self) -> bool {
        self.digest.exists()
    }

    // ─── Gate ────────────────────────────────────────────────────────────────

    /// Create a new vault protected by `password`.
    ///
    /// Surrounding whitespace is not part of the master password: both inputs
    /// are trimmed before validation and hashing.
    ///
    /// Destroys any existing digest and record store first: this is a full
    /// reset, never a merge.
    pub fn create_vault(&mut self, password: &str, confirmation: &str) -> Result<()> {
        self.session.require_locked()?;
        let password = password.trim();
        validate_new_password(password, confirmation.trim())?;

        if self.has_vault() {
            tracing::warn!("Existing vault will be destroyed");
        }

        if let Some(db) = self.db.take() {
            db.close()?;
        }
        self.digest.remove().map_err(StoreError::Io)?;
        Database::destroy(&self.paths.db_path())?;

        self.paths.ensure_data_dir().map_err(StoreError::Io)?;
        let db = Database::open(&self.paths.db_path())?;
        self.db = Some(db);
        self.digest
            .write(&hash_password(password))
            .map_err(StoreError::Io)?;

        self.session.unlock(password, Vec::new());
        tracing::info!("New vault created and unlocked");
        Ok(())
    }

    /// Verify `password` (trimmed) against the stored digest and load the snapshot.
    pub fn login(&mut self, password: &str) -> Result<()> {
        self.session.require_locked()?;

        let stored = self
            .digest
            .read()
            .map_err(StoreError::Io)?
            .ok_or(AuthError::NoVaultExists)?;

        let password = password.trim();
        if password.is_empty() {
            return Err(ValidationError::EmptyField(Field::Password).into());
        }

        if !verify_password(password, &stored) {
            tracing::warn!("Rejected login attempt");
            return Err(AuthError::InvalidCredential.into());
        }

        let records = SqliteRecordStore::new(self.db()?).list_all()?;
        let count = records.len();
        self.session.unlock(password, records);

        tracing::info!(records = count, "Vault unlocked");
        Ok(())
    }

    /// Drop the in-memory password and cache. Durable data is untouched.
    pub fn lock(&mut self) {
        let was_unlocked = self.session.is_unlocked();
        self.session.lock();
        if was_unlocked {
            tracing::info!("Vault locked");
        }
    }

    // ─── Records ─────────────────────────────────────────────────────────────

    pub fn insert(&mut self, record: NewRecord) -> Result<Record> {
        self.session.require_unlocked()?;
        self.write_through(|store| store.insert(record))
    }

    pub fn update(&mut self, id: i64, record: NewRecord) -> Result<Record> {
        self.session.require_unlocked()?;
        self.write_through(|store| store.update(id, record))
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.session.require_unlocked()?;
        self.write_through(|store| store.delete(id))
    }

    /// Fresh read of every record from durable storage, site ascending.
    pub fn list_all(&self) -> Result<Vec<Record>> {
        self.session.require_unlocked()?;
        Ok(SqliteRecordStore::new(self.db()?).list_all()?)
    }

    /// The cached snapshot loaded at unlock and refreshed after each write.
    pub fn records(&self) -> Result<&[Record]> {
        self.session.require_unlocked()?;
        Ok(self.session.records())
    }

    /// One record from the snapshot.
    pub fn record(&self, id: i64) -> Result<&Record> {
        self.records()?
            .iter()
            .find(|r| r.id == id)
            .ok_or(LusakeyError::NotFound(id))
    }

    /// Filter the snapshot by `query`.
    pub fn search(&self, query: &str) -> Result<Vec<&Record>> {
        Ok(search::search(query, self.records()?))
    }

    /// Close the record store.
    pub fn close(mut self) -> Result<()> {
        self.session.lock();
        if let Some(db) = self.db.take() {
            db.close()?;
        }
        tracing::info!("Vault closed");
        Ok(())
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    fn db(&self) -> Result<&Database> {
        self.db.as_ref().ok_or(LusakeyError::Storage(StoreError::Unavailable))
    }

    /// Run a mutation and re-read the snapshot in the same transaction; the
    /// cache is replaced only after the commit succeeds.
    fn write_through<T>(
        &mut self,
        op: impl FnOnce(&SqliteRecordStore<'_>) -> std::result::Result<T, StoreError>,
    ) -> Result<T> {
        let db = self.db()?;
        let tx = db.conn().unchecked_transaction().map_err(StoreError::from)?;

        let store = SqliteRecordStore::with_connection(&tx);
        let output = op(&store)?;
        let snapshot = store.list_all()?;

        tx.commit().map_err(StoreError::from)?;
        self.session.replace_records(snapshot);

        Ok(output)
    }
}

/// Both inputs arrive trimmed. Check order: blank inputs, then mismatch, then length.
fn validate_new_password(password: &str, confirmation: &str) -> std::result::Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyField(Field::Password));
    }
    if confirmation.is_empty() {
        return Err(ValidationError::EmptyField(Field::Confirmation));
    }
    if password != confirmation {
        return Err(ValidationError::Mismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
