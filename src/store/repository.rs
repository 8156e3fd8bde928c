// Lusakey — Record Store Repository
//
// Implements the CRUD contract on the `records` table. The store borrows a
// connection, so it can run either directly on the database or inside a
// transaction that also re-reads the snapshot the session caches.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::db::Database;
use super::models::{NewRecord, Record};
use super::StoreError;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over record storage operations.
pub trait RecordStore {
    /// Validate and insert a record. Returns it with its assigned id and timestamp.
    fn insert(&self, record: NewRecord) -> Result<Record, StoreError>;

    /// Validate and overwrite every mutable field of an existing record.
    /// `id` and `created_at` are preserved.
    fn update(&self, id: i64, record: NewRecord) -> Result<Record, StoreError>;

    /// Permanently remove a record. Fails with `NotFound` if it is absent.
    fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Get one record by id.
    fn get(&self, id: i64) -> Result<Option<Record>, StoreError>;

    /// All records ordered by site ascending (binary collation), then id.
    fn list_all(&self) -> Result<Vec<Record>, StoreError>;
}

// ─── SQLite Implementation ──────────────────────────────────────────────────

const SELECT_COLUMNS: &str = "SELECT id, site, login, secret, url, notes, created_at FROM records";

pub struct SqliteRecordStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteRecordStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { conn: db.conn() }
    }

    /// Use an arbitrary connection, typically an open transaction.
    pub fn with_connection(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a record row from the database.
    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
        let id: i64 = row.get(0)?;
        let site: String = row.get(1)?;
        let login: String = row.get(2)?;
        let secret: String = row.get(3)?;
        let url: Option<String> = row.get(4)?;
        let notes: Option<String> = row.get(5)?;
        let created_at_str: String = row.get(6)?;

        let created_at = parse_timestamp(&created_at_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Record::new(id, site, login, secret, url, notes, created_at))
    }
}

/// Accept RFC 3339 as written by this crate and SQLite's
/// `CURRENT_TIMESTAMP` form for rows written by other tools.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| StoreError::Timestamp(value.to_string()))
}

impl<'a> RecordStore for SqliteRecordStore<'a> {
    fn insert(&self, record: NewRecord) -> Result<Record, StoreError> {
        let record = record.normalize()?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO records (site, login, secret, url, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.site,
                record.login,
                record.secret,
                record.url,
                record.notes,
                now,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        let stored = self.get(id)?.ok_or(StoreError::NotFound(id))?;

        tracing::info!(record_id = id, site = %stored.site, "Record stored");

        Ok(stored)
    }

    fn update(&self, id: i64, record: NewRecord) -> Result<Record, StoreError> {
        let record = record.normalize()?;

        let affected = self.conn.execute(
            "UPDATE records SET site = ?1, login = ?2, secret = ?3, url = ?4, notes = ?5
             WHERE id = ?6",
            params![
                record.site,
                record.login,
                record.secret,
                record.url,
                record.notes,
                id,
            ],
        )?;

        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        let stored = self.get(id)?.ok_or(StoreError::NotFound(id))?;
        tracing::info!(record_id = id, site = %stored.site, "Record updated");

        Ok(stored)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::info!(record_id = id, "Record deleted");
        Ok(())
    }

    fn get(&self, id: i64) -> Result<Option<Record>, StoreError> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, params![id], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let sql = format!("{} ORDER BY site ASC, id ASC", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map([], Self::row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }

        Ok(records)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, ValidationError};

    fn setup_store() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteRecordStore::new(&db);

        let record = store
            .insert(
                NewRecord::new("github.com", "octocat", "ghp_test1234567890abcdef")
                    .with_url("https://github.com/login")
                    .with_notes("work account"),
            )
            .unwrap();
        (db, record.id)
    }

    fn count(db: &Database) -> i64 {
        db.conn()
            .query_row("SELECT count(*) FROM records", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_insert_returns_full_record() {
        let (db, id) = setup_store();
        let store = SqliteRecordStore::new(&db);

        let record = store.get(id).unwrap().expect("Record should exist");
        assert_eq!(record.id, id);
        assert_eq!(record.site, "github.com");
        assert_eq!(record.login, "octocat");
        assert_eq!(record.secret(), "ghp_test1234567890abcdef");
        assert_eq!(record.url.as_deref(), Some("https://github.com/login"));
        assert_eq!(record.notes.as_deref(), Some("work account"));
    }

    #[test]
    fn test_first_insert_gets_id_one() {
        let (_db, id) = setup_store();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_insert_rejects_blank_field_and_leaves_store_unchanged() {
        let (db, _id) = setup_store();
        let store = SqliteRecordStore::new(&db);

        let err = store
            .insert(NewRecord::new("", "bob", "secret"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ValidationError::EmptyField(Field::Site))
        ));
        assert_eq!(count(&db), 1);
    }

    #[test]
    fn test_get_nonexistent_returns_none() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteRecordStore::new(&db);

        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn test_list_all_orders_by_site_case_sensitive() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteRecordStore::new(&db);

        for site in &["slack.com", "Zoom.us", "amazon.com", "Apple.com"] {
            store
                .insert(NewRecord::new(*site, "user", format!("secret-{}", site)))
                .unwrap();
        }

        let sites: Vec<String> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| r.site)
            .collect();
        // Binary collation: uppercase sorts before lowercase.
        assert_eq!(sites, vec!["Apple.com", "Zoom.us", "amazon.com", "slack.com"]);
    }

    #[test]
    fn test_list_all_breaks_site_ties_by_id() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteRecordStore::new(&db);

        let first = store.insert(NewRecord::new("mail.com", "b", "x")).unwrap();
        let second = store.insert(NewRecord::new("mail.com", "a", "y")).unwrap();

        let ids: Vec<i64> = store.list_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_update_overwrites_fields_and_preserves_identity() {
        let (db, id) = setup_store();
        let store = SqliteRecordStore::new(&db);
        let before = store.get(id).unwrap().unwrap();

        let after = store
            .update(id, NewRecord::new("gitlab.com", "tanuki", "glpat-new"))
            .unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.site, "gitlab.com");
        assert_eq!(after.login, "tanuki");
        assert_eq!(after.secret(), "glpat-new");
        assert_eq!(after.url, None, "Update replaces optional fields too");
        assert_eq!(after.notes, None);
    }

    #[test]
    fn test_update_nonexistent_returns_not_found() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteRecordStore::new(&db);

        let err = store
            .update(99, NewRecord::new("a", "b", "c"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let (db, id) = setup_store();
        let store = SqliteRecordStore::new(&db);

        let err = store.update(id, NewRecord::new("a", "b", "")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ValidationError::EmptyField(Field::Secret))
        ));
        assert_eq!(store.get(id).unwrap().unwrap().site, "github.com");
    }

    #[test]
    fn test_delete_then_delete_again_is_not_found() {
        let (db, id) = setup_store();
        let store = SqliteRecordStore::new(&db);

        store.delete(id).unwrap();
        assert!(store.get(id).unwrap().is_none());

        let err = store.delete(id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(i) if i == id));
    }

    #[test]
    fn test_ids_are_never_reused_after_delete() {
        let (db, id) = setup_store();
        let store = SqliteRecordStore::new(&db);

        store.delete(id).unwrap();
        let next = store.insert(NewRecord::new("a", "b", "c")).unwrap();
        assert!(next.id > id, "AUTOINCREMENT must not hand out a deleted id");
    }

    #[test]
    fn test_store_on_transaction_rolls_back_when_dropped() {
        let db = Database::open_in_memory().unwrap();
        {
            let tx = db.conn().unchecked_transaction().unwrap();
            let store = SqliteRecordStore::with_connection(&tx);
            store.insert(NewRecord::new("a", "b", "c")).unwrap();
            assert_eq!(store.list_all().unwrap().len(), 1);
        }
        assert_eq!(count(&db), 0);
    }

    #[test]
    fn test_parse_timestamp_accepts_sqlite_format() {
        let dt = parse_timestamp("2024-01-01 10:20:30").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T10:20:30+00:00");
        assert!(parse_timestamp("yesterday").is_err());
    }
}
