//! Record registry: the typed collections behind the management screens plus
//! the storage, service, and HTTP seams around them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Department, Doctor, DoctorId, DoctorStatus, Invoice, InvoiceId, InvoiceStatus, Patient,
    PatientId, PatientStatus, Prescription, PrescriptionId, PrescriptionStatus, ShiftId, ShiftSlot,
    ShiftStatus, StaffRole, StaffShift,
};
pub use repository::{
    AuditAction, AuditError, AuditEvent, AuditTrail, Keyed, RecordStore, RepositoryError,
};
pub use router::registry_router;
pub use service::{RecordService, ServiceError};
