// Lusakey — Store Module
//
// Durable credential records in a single SQLite table. Secrets are stored as
// entered; the database file lives next to the master digest file.

mod db;
mod error;
mod models;
mod repository;

pub use db::Database;
pub use error::StoreError;
pub use models::{NewRecord, Record};
pub use repository::{RecordStore, SqliteRecordStore};
