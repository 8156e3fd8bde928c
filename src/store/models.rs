// Lusakey — Record data models
//
// The `secret` field is private and redacted from Debug output. Callers that
// need the raw value go through `Record::secret()`.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{Field, ValidationError};

/// One stored credential entry.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub site: String,
    pub login: String,
    /// Stored verbatim, never logged or Debug-displayed
    secret: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn new(
        id: i64,
        site: String,
        login: String,
        secret: String,
        url: Option<String>,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            site,
            login,
            secret,
            url,
            notes,
            created_at,
        }
    }

    /// Access the raw secret value.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("site", &self.site)
            .field("login", &self.login)
            .field("secret", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.site, self.login)?;
        if let Some(url) = &self.url {
            write!(f, " {}", url)?;
        }
        Ok(())
    }
}

/// Input for inserting or updating a record.
#[derive(Clone, Default)]
pub struct NewRecord {
    pub site: String,
    pub login: String,
    pub secret: String,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl NewRecord {
    pub fn new(site: impl Into<String>, login: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            login: login.into(),
            secret: secret.into(),
            url: None,
            notes: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Trim text fields, drop blank optionals, and check the required fields
    /// in the order site, login, secret. The secret is only blank-checked;
    /// its value is kept exactly as entered.
    pub fn normalize(self) -> Result<Self, ValidationError> {
        let site = self.site.trim().to_string();
        let login = self.login.trim().to_string();

        if site.is_empty() {
            return Err(ValidationError::EmptyField(Field::Site));
        }
        if login.is_empty() {
            return Err(ValidationError::EmptyField(Field::Login));
        }
        if self.secret.trim().is_empty() {
            return Err(ValidationError::EmptyField(Field::Secret));
        }

        Ok(Self {
            site,
            login,
            secret: self.secret,
            url: non_blank(self.url),
            notes: non_blank(self.notes),
        })
    }
}

impl fmt::Debug for NewRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRecord")
            .field("site", &self.site)
            .field("login", &self.login)
            .field("secret", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
