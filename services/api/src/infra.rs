use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use caredesk::registry::{
    AuditError, AuditEvent, AuditTrail, Doctor, Invoice, Keyed, Patient, Prescription,
    RecordStore, RepositoryError, StaffShift,
};
use caredesk::reporting::{HospitalReportSummary, HospitalSnapshot};

use crate::demo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Vec-backed store; insertion order is the order `list` returns, which the
/// filter engine preserves in every view.
pub(crate) struct InMemoryStore<T> {
    records: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<T> InMemoryStore<T> {
    pub(crate) fn seeded(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl<T: Keyed + Clone + Send + Sync> RecordStore<T> for InMemoryStore<T> {
    fn insert(&self, record: T) -> Result<T, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.record_key() == record.record_key())
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: T) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        match guard
            .iter_mut()
            .find(|existing| existing.record_key() == record.record_key())
        {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, key: &str) -> Result<Option<T>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .find(|existing| existing.record_key() == key)
            .cloned())
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let before = guard.len();
        guard.retain(|existing| existing.record_key() != key);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<T>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditTrail {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl InMemoryAuditTrail {
    pub(crate) fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditTrail for InMemoryAuditTrail {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.events
            .lock()
            .expect("audit mutex poisoned")
            .push(event);
        Ok(())
    }
}

/// The five record collections plus the shared audit trail, one handle per
/// screen.
#[derive(Clone)]
pub(crate) struct ClinicStores {
    pub(crate) patients: Arc<InMemoryStore<Patient>>,
    pub(crate) doctors: Arc<InMemoryStore<Doctor>>,
    pub(crate) invoices: Arc<InMemoryStore<Invoice>>,
    pub(crate) prescriptions: Arc<InMemoryStore<Prescription>>,
    pub(crate) shifts: Arc<InMemoryStore<StaffShift>>,
    pub(crate) audit: Arc<InMemoryAuditTrail>,
}

impl ClinicStores {
    pub(crate) fn empty() -> Self {
        Self {
            patients: Arc::new(InMemoryStore::default()),
            doctors: Arc::new(InMemoryStore::default()),
            invoices: Arc::new(InMemoryStore::default()),
            prescriptions: Arc::new(InMemoryStore::default()),
            shifts: Arc::new(InMemoryStore::default()),
            audit: Arc::new(InMemoryAuditTrail::default()),
        }
    }

    pub(crate) fn seeded() -> Self {
        Self {
            patients: Arc::new(InMemoryStore::seeded(demo::sample_patients())),
            doctors: Arc::new(InMemoryStore::seeded(demo::sample_doctors())),
            invoices: Arc::new(InMemoryStore::seeded(demo::sample_invoices())),
            prescriptions: Arc::new(InMemoryStore::seeded(demo::sample_prescriptions())),
            shifts: Arc::new(InMemoryStore::seeded(demo::sample_shifts())),
            audit: Arc::new(InMemoryAuditTrail::default()),
        }
    }

    pub(crate) fn report_summary(&self) -> Result<HospitalReportSummary, RepositoryError> {
        let patients = self.patients.list()?;
        let doctors = self.doctors.list()?;
        let invoices = self.invoices.list()?;
        let prescriptions = self.prescriptions.list()?;
        let shifts = self.shifts.list()?;

        let snapshot = HospitalSnapshot {
            patients: &patients,
            doctors: &doctors,
            invoices: &invoices,
            prescriptions: &prescriptions,
            shifts: &shifts,
        };
        Ok(snapshot.summary())
    }
}
