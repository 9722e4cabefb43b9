use serde::Serialize;

use crate::registry::domain::{Department, StaffRole};

#[derive(Debug, Clone, Serialize)]
pub struct PatientTotals {
    pub total: u64,
    pub admitted: u64,
    pub outpatient: u64,
    pub discharged: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorAvailability {
    pub total: u64,
    pub on_duty: u64,
    pub off_duty: u64,
    pub on_leave: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentCensusEntry {
    pub department: Department,
    pub department_label: &'static str,
    pub admitted: u64,
    pub outpatient: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleCoverageEntry {
    pub role: StaffRole,
    pub role_label: &'static str,
    pub scheduled: u64,
    pub on_shift: u64,
    pub absent: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillingSummary {
    pub invoice_count: u64,
    pub paid: u64,
    pub pending: u64,
    pub overdue: u64,
    pub revenue_collected: f64,
    pub outstanding_balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionSummary {
    pub active: u64,
    pub completed: u64,
    pub refills_outstanding: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HospitalReportSummary {
    pub patients: PatientTotals,
    pub doctors: DoctorAvailability,
    pub census: Vec<DepartmentCensusEntry>,
    pub staffing: Vec<RoleCoverageEntry>,
    pub billing: BillingSummary,
    pub prescriptions: PrescriptionSummary,
}

impl HospitalReportSummary {
    /// Plain-language observations for the report screen's callout box.
    pub fn highlights(&self) -> Vec<String> {
        super::generate_highlights(self)
    }
}
