use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Doctor, Invoice, Patient, Prescription, StaffShift};

/// Types that carry their own storage key.
pub trait Keyed {
    fn record_key(&self) -> &str;
}

impl Keyed for Patient {
    fn record_key(&self) -> &str {
        &self.id.0
    }
}

impl Keyed for Doctor {
    fn record_key(&self) -> &str {
        &self.id.0
    }
}

impl Keyed for Invoice {
    fn record_key(&self) -> &str {
        &self.id.0
    }
}

impl Keyed for Prescription {
    fn record_key(&self) -> &str {
        &self.id.0
    }
}

impl Keyed for StaffShift {
    fn record_key(&self) -> &str {
        &self.id.0
    }
}

/// Storage abstraction for one record collection.
///
/// `list` returns records in insertion order; the filter engine relies on
/// that ordering to keep filtered views stable.
pub trait RecordStore<T>: Send + Sync {
    fn insert(&self, record: T) -> Result<T, RepositoryError>;
    fn update(&self, record: T) -> Result<(), RepositoryError>;
    fn fetch(&self, key: &str) -> Result<Option<T>, RepositoryError>;
    fn remove(&self, key: &str) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<T>, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound audit hooks; every mutation of a collection
/// produces one event.
pub trait AuditTrail: Send + Sync {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    pub const fn label(self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
        }
    }
}

/// Structured audit payload so routes and tests can assert mutation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub collection: String,
    pub record_key: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl AuditEvent {
    pub fn new(action: AuditAction, collection: &str, record_key: impl Into<String>) -> Self {
        Self {
            action,
            collection: collection.to_string(),
            record_key: record_key.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Audit dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit transport unavailable: {0}")]
    Transport(String),
}
