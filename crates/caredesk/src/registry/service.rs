use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::query::{self, AggregateSpec, QueryCriteria, Record, Statistics};

use super::repository::{AuditAction, AuditError, AuditEvent, AuditTrail, Keyed, RecordStore, RepositoryError};

/// One management screen's worth of behavior: listing with criteria, keyed
/// lookup, create/update/delete with audit events, and summary statistics.
///
/// Instantiated once per collection; the type parameter is the whole of the
/// per-screen configuration.
pub struct RecordService<T, S, A> {
    collection: &'static str,
    store: Arc<S>,
    audit: Arc<A>,
    _record: PhantomData<fn() -> T>,
}

impl<T, S, A> RecordService<T, S, A>
where
    T: Record + Keyed + Clone,
    S: RecordStore<T>,
    A: AuditTrail,
{
    pub fn new(collection: &'static str, store: Arc<S>, audit: Arc<A>) -> Self {
        Self {
            collection,
            store,
            audit,
            _record: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// The filtered view for the current criteria, in stored order.
    pub fn list(&self, criteria: &QueryCriteria) -> Result<Vec<T>, ServiceError> {
        let records = self.store.list()?;
        Ok(query::filter(&records, criteria))
    }

    pub fn get(&self, key: &str) -> Result<T, ServiceError> {
        let record = self.store.fetch(key)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn create(&self, record: T) -> Result<T, ServiceError> {
        let stored = self.store.insert(record)?;
        self.audit
            .record(self.mutation_event(AuditAction::Created, &stored))?;
        debug!(collection = self.collection, key = stored.record_key(), "record created");
        Ok(stored)
    }

    pub fn update(&self, record: T) -> Result<T, ServiceError> {
        self.store.update(record.clone())?;
        self.audit
            .record(self.mutation_event(AuditAction::Updated, &record))?;
        debug!(collection = self.collection, key = record.record_key(), "record updated");
        Ok(record)
    }

    pub fn remove(&self, key: &str) -> Result<(), ServiceError> {
        self.store.remove(key)?;
        self.audit
            .record(AuditEvent::new(AuditAction::Deleted, self.collection, key))?;
        debug!(collection = self.collection, key = %key, "record deleted");
        Ok(())
    }

    /// Summary statistics over the full, unfiltered collection.
    pub fn stats(&self, specs: &[AggregateSpec]) -> Result<Statistics, ServiceError> {
        let records = self.store.list()?;
        Ok(query::aggregate(&records, specs))
    }

    fn mutation_event(&self, action: AuditAction, record: &T) -> AuditEvent {
        let event = AuditEvent::new(action, self.collection, record.record_key());
        match record.field("status") {
            Some(status) => event.with_detail("status", status.as_ref()),
            None => event,
        }
    }
}

/// Error raised by a record service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
