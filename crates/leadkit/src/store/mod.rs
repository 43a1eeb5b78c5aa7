//! Lead storage
//!
//! The pipeline only sees the [`LeadStore`] trait. Stores assign identity and
//! `created_at`; they are responsible for their own concurrency safety.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::types::{LeadRecord, StoredLead};
use chrono::Utc;
use std::cmp::Reverse;
use std::sync::Mutex;

/// Storage collaborator for leads
pub trait LeadStore: Send + Sync {
    /// Persist a record and return its new id
    fn insert(&self, lead: &LeadRecord) -> Result<i64, StoreError>;

    /// All leads, newest first (ties broken by higher id first); leads
    /// without a creation time come last
    fn list_all(&self) -> Result<Vec<StoredLead>, StoreError>;
}

/// In-process store, mainly for tests and one-off runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    leads: Mutex<Vec<StoredLead>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored leads
    pub fn len(&self) -> usize {
        self.leads.lock().map(|leads| leads.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LeadStore for MemoryStore {
    fn insert(&self, lead: &LeadRecord) -> Result<i64, StoreError> {
        let mut leads = self.leads.lock().map_err(|_| StoreError::Poisoned)?;
        let id = leads.last().map_or(1, |last| last.id + 1);
        leads.push(StoredLead {
            id,
            created_at: Some(Utc::now()),
            lead: lead.clone(),
        });
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<StoredLead>, StoreError> {
        let mut leads = self.leads.lock().map_err(|_| StoreError::Poisoned)?.clone();
        leads.sort_by_key(|stored| Reverse((stored.created_at, stored.id)));
        Ok(leads)
    }
}
