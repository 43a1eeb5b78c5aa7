//! SQLite-backed lead store
//!
//! One flat `leads` table keyed by an autoincrement id. Databases created
//! before the contact/social columns existed are upgraded in place on open.

use crate::error::StoreError;
use crate::normalize::non_empty;
use crate::store::LeadStore;
use crate::types::{LeadRecord, StoredLead, DEFAULT_LANGUAGE, DESCRIPTION_SENTINEL, TITLE_SENTINEL};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS leads (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        company           TEXT,
        url               TEXT NOT NULL,
        title             TEXT,
        description       TEXT,
        email             TEXT,
        phone             TEXT,
        logo_url          TEXT,
        favicon_url       TEXT,
        twitter_handle    TEXT,
        linkedin_url      TEXT,
        facebook_url      TEXT,
        instagram_url     TEXT,
        contact_page      TEXT,
        industry_keywords TEXT,
        language          TEXT,
        created_at        TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_leads_created_at ON leads(created_at);
";

/// Columns added after the first release of the table
const UPGRADE_COLUMNS: &[&str] = &[
    "email",
    "phone",
    "logo_url",
    "favicon_url",
    "twitter_handle",
    "linkedin_url",
    "facebook_url",
    "instagram_url",
    "contact_page",
    "industry_keywords",
    "language",
];

/// Format written by older versions (SQLite `CURRENT_TIMESTAMP`)
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lead store on a single SQLite connection
///
/// The connection is guarded by a mutex: one writer at a time.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        let added = upgrade_columns(&conn)?;
        if !added.is_empty() {
            info!(columns = ?added, "Upgraded leads table");
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Add any of [`UPGRADE_COLUMNS`] missing from an existing table
fn upgrade_columns(conn: &Connection) -> Result<Vec<&'static str>, StoreError> {
    let existing = {
        let mut stmt = conn.prepare("PRAGMA table_info(leads)")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
        names.collect::<Result<HashSet<_>, _>>()?
    };

    let mut added = Vec::new();
    for column in UPGRADE_COLUMNS {
        if !existing.contains(*column) {
            conn.execute(&format!("ALTER TABLE leads ADD COLUMN {column} TEXT"), [])?;
            added.push(*column);
        }
    }
    Ok(added)
}

/// Parse RFC 3339, falling back to the legacy SQLite format
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, LEGACY_TIMESTAMP_FORMAT).map(|ts| ts.and_utc())
        })
        .map_err(|_| StoreError::InvalidTimestamp(value.to_string()))
}

/// Row → record, restoring sentinels and defaults for NULL/blank columns
fn lead_from_row(row: &Row<'_>) -> rusqlite::Result<(i64, LeadRecord, Option<String>)> {
    let lead = LeadRecord {
        company: row.get::<_, Option<String>>("company")?.unwrap_or_default(),
        url: row.get("url")?,
        title: non_empty(row.get("title")?).unwrap_or_else(|| TITLE_SENTINEL.to_string()),
        description: non_empty(row.get("description")?)
            .unwrap_or_else(|| DESCRIPTION_SENTINEL.to_string()),
        email: non_empty(row.get("email")?),
        phone: non_empty(row.get("phone")?),
        logo_url: non_empty(row.get("logo_url")?),
        favicon_url: non_empty(row.get("favicon_url")?),
        twitter_handle: non_empty(row.get("twitter_handle")?),
        linkedin_url: non_empty(row.get("linkedin_url")?),
        facebook_url: non_empty(row.get("facebook_url")?),
        instagram_url: non_empty(row.get("instagram_url")?),
        contact_page: non_empty(row.get("contact_page")?),
        industry_keywords: non_empty(row.get("industry_keywords")?),
        language: non_empty(row.get("language")?).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
    };
    let created_at = non_empty(row.get("created_at")?);
    Ok((row.get("id")?, lead, created_at))
}

impl LeadStore for SqliteStore {
    fn insert(&self, lead: &LeadRecord) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        conn.execute(
            "INSERT INTO leads (company, url, title, description, email, phone, logo_url,
                favicon_url, twitter_handle, linkedin_url, facebook_url, instagram_url,
                contact_page, industry_keywords, language, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                lead.company,
                lead.url,
                lead.title,
                lead.description,
                lead.email,
                lead.phone,
                lead.logo_url,
                lead.favicon_url,
                lead.twitter_handle,
                lead.linkedin_url,
                lead.facebook_url,
                lead.instagram_url,
                lead.contact_page,
                lead.industry_keywords,
                lead.language,
                created_at,
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(id, company = %lead.company, "Stored lead");
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<StoredLead>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        // julianday() reads both the RFC 3339 and the legacy format
        let mut stmt = conn.prepare(
            "SELECT * FROM leads
             ORDER BY julianday(created_at) IS NULL, julianday(created_at) DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], lead_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, lead, created_at)| {
                Ok(StoredLead {
                    id,
                    created_at: created_at.as_deref().map(parse_timestamp).transpose()?,
                    lead,
                })
            })
            .collect()
    }
}
