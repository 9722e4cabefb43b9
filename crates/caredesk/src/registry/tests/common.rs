use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::registry::domain::{Department, Patient, PatientId, PatientStatus};
use crate::registry::repository::{
    AuditError, AuditEvent, AuditTrail, Keyed, RecordStore, RepositoryError,
};
use crate::registry::router::registry_router;
use crate::registry::service::RecordService;

pub(super) fn patient(id: &str, name: &str, department: Department, status: PatientStatus) -> Patient {
    Patient {
        id: PatientId(id.to_string()),
        full_name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1987, 5, 20).expect("valid date"),
        phone: "0901 234 567".to_string(),
        department,
        status,
        blood_type: None,
        primary_diagnosis: None,
    }
}

pub(super) fn ward_patients() -> Vec<Patient> {
    vec![
        patient(
            "BN-0001",
            "Nguyen Van An",
            Department::Cardiology,
            PatientStatus::Admitted,
        ),
        patient(
            "BN-0002",
            "Tran Thi Binh",
            Department::Pediatrics,
            PatientStatus::Outpatient,
        ),
        patient(
            "BN-0003",
            "Le Minh Chau",
            Department::Cardiology,
            PatientStatus::Discharged,
        ),
    ]
}

pub(super) fn build_patient_service() -> (
    Arc<RecordService<Patient, MemoryStore<Patient>, MemoryAudit>>,
    Arc<MemoryStore<Patient>>,
    Arc<MemoryAudit>,
) {
    let store = Arc::new(MemoryStore::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = Arc::new(RecordService::new("patients", store.clone(), audit.clone()));
    (service, store, audit)
}

pub(super) fn seeded_patient_router() -> axum::Router {
    let (service, store, _) = build_patient_service();
    for record in ward_patients() {
        store.insert(record).expect("seed patient");
    }
    registry_router(service)
}

pub(super) struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Keyed + Clone + Send + Sync> RecordStore<T> for MemoryStore<T> {
    fn insert(&self, record: T) -> Result<T, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.iter().any(|existing| existing.record_key() == record.record_key()) {
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

#[derive(Default)]
pub(super) struct MemoryAudit {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAudit {
    pub(super) fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditTrail for MemoryAudit {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.events
            .lock()
            .expect("audit mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl<T: Keyed + Clone + Send + Sync> RecordStore<T> for UnavailableStore {
    fn insert(&self, _record: T) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: T) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _key: &str) -> Result<Option<T>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn list(&self) -> Result<Vec<T>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) struct FailingAudit;

impl AuditTrail for FailingAudit {
    fn record(&self, _event: AuditEvent) -> Result<(), AuditError> {
        Err(AuditError::Transport("audit sink offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
