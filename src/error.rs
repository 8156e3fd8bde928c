// Lusakey — Top-level error types
//
// Caller-facing reasons (validation, authentication, not-found, session
// state) plus the aggregated storage and clipboard failures. Every vault
// operation returns one of these instead of panicking.

use std::fmt;

use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::store::StoreError;

/// Names the input that failed a blank check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Site,
    Login,
    Secret,
    Password,
    Confirmation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Site => "site",
            Field::Login => "login",
            Field::Secret => "secret",
            Field::Password => "password",
            Field::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(Field),

    #[error("Passwords do not match")]
    Mismatch,

    #[error("Master password is too short (minimum {min} characters)")]
    TooShort { min: usize },
}

/// Failed attempt to open the vault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No vault exists yet — run `lusakey init` first")]
    NoVaultExists,

    #[error("Invalid master password")]
    InvalidCredential,
}

/// Top-level error type for all Lusakey operations.
#[derive(Debug, Error)]
pub enum LusakeyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Record not found: {0}")]
    NotFound(i64),

    #[error("Vault is locked — unlock it with the master password first")]
    NotUnlocked,

    #[error("Vault is already unlocked — lock it first")]
    AlreadyUnlocked,

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<StoreError> for LusakeyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => LusakeyError::NotFound(id),
            StoreError::Invalid(reason) => LusakeyError::Validation(reason),
            other => LusakeyError::Storage(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, LusakeyError>;

// ─── Tests ───────────────────────────────────────────────────────────────────
