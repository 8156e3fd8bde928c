// Lusakey — SQLite Database Management
//
// Opens the record database, holds it exclusively for the lifetime of the
// process, and runs the schema migration. `destroy()` removes the file and
// its rollback journal so a new vault starts from an empty table.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::StoreError;

/// Wrapper around the SQLite connection that backs the record store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path and hold it exclusively.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        // Keep the file lock until the connection closes.
        let mode: String = conn.pragma_update_and_check(None, "locking_mode", "EXCLUSIVE", |row| {
            row.get(0)
        })?;
        tracing::debug!(path = %path.display(), locking_mode = %mode, "Record database opened");

        let db = Self { conn };
        db.run_migrations()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing only).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, releasing the exclusive lock.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Database(e))?;
        tracing::debug!("Record database closed");
        Ok(())
    }

    /// Remove the database file and its rollback journal, if present.
    /// The database must not be open.
    pub fn destroy(path: &Path) -> Result<(), StoreError> {
        for file in [path.to_path_buf(), journal_path(path)] {
            match std::fs::remove_file(&file) {
                Ok(()) => tracing::debug!(path = %file.display(), "Removed database file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::Io(e)),
            }
        }
        Ok(())
    }

    /// Run schema migrations to create or update tables.
    fn run_migrations(&self) -> Result<(), StoreError> {
        // AUTOINCREMENT keeps ids from being reused after deletion.
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS records (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                site        TEXT NOT NULL CHECK (length(site) > 0),
                login       TEXT NOT NULL CHECK (length(login) > 0),
                secret      TEXT NOT NULL CHECK (length(secret) > 0),
                notes       TEXT,
                url         TEXT,
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
            );

            CREATE INDEX IF NOT EXISTS idx_records_site
                ON records(site);
            ",
        )?;

        tracing::debug!("Database migrations completed successfully");
        Ok(())
    }
}

fn journal_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push("-journal");
    PathBuf::from(name)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
