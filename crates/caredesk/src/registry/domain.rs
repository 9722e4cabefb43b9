use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::query::Record;

/// Identifier wrapper for patient records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

/// Identifier wrapper for doctor records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoctorId(pub String);

/// Identifier wrapper for invoices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(pub String);

/// Identifier wrapper for prescriptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrescriptionId(pub String);

/// Identifier wrapper for staff-schedule entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(pub String);

/// Clinical departments the facility schedules around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    GeneralMedicine,
    Cardiology,
    Pediatrics,
    Orthopedics,
    Emergency,
    Oncology,
}

impl Department {
    pub const fn label(self) -> &'static str {
        match self {
            Department::GeneralMedicine => "general_medicine",
            Department::Cardiology => "cardiology",
            Department::Pediatrics => "pediatrics",
            Department::Orthopedics => "orthopedics",
            Department::Emergency => "emergency",
            Department::Oncology => "oncology",
        }
    }

    pub fn ordered() -> Vec<Department> {
        vec![
            Department::GeneralMedicine,
            Department::Cardiology,
            Department::Pediatrics,
            Department::Orthopedics,
            Department::Emergency,
            Department::Oncology,
        ]
    }

    /// Match a roster label, ignoring case and surrounding whitespace.
    pub fn parse_label(value: &str) -> Option<Department> {
        let normalized = value.trim().to_ascii_lowercase();
        Department::ordered()
            .into_iter()
            .find(|department| department.label() == normalized)
    }
}

/// Where a patient currently is in the admission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Admitted,
    Outpatient,
    Discharged,
}

impl PatientStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PatientStatus::Admitted => "admitted",
            PatientStatus::Outpatient => "outpatient",
            PatientStatus::Discharged => "discharged",
        }
    }

    pub fn ordered() -> Vec<PatientStatus> {
        vec![
            PatientStatus::Admitted,
            PatientStatus::Outpatient,
            PatientStatus::Discharged,
        ]
    }

    pub fn parse_label(value: &str) -> Option<PatientStatus> {
        let normalized = value.trim().to_ascii_lowercase();
        PatientStatus::ordered()
            .into_iter()
            .find(|status| status.label() == normalized)
    }
}

/// One row of the patient management screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub department: Department,
    pub status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis: Option<String>,
}

impl Record for Patient {
    fn search_text(&self) -> Vec<Cow<'_, str>> {
        let mut text = vec![
            Cow::from(self.id.0.as_str()),
            Cow::from(self.full_name.as_str()),
            Cow::from(self.phone.as_str()),
        ];
        if let Some(diagnosis) = &self.primary_diagnosis {
            text.push(Cow::from(diagnosis.as_str()));
        }
        text
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::from(self.status.label())),
            "department" => Some(Cow::from(self.department.label())),
            "blood_type" => self.blood_type.as_deref().map(Cow::from),
            _ => None,
        }
    }
}

/// Duty status shown on the doctor roster screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorStatus {
    OnDuty,
    OffDuty,
    OnLeave,
}

impl DoctorStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DoctorStatus::OnDuty => "on_duty",
            DoctorStatus::OffDuty => "off_duty",
            DoctorStatus::OnLeave => "on_leave",
        }
    }
}

/// One row of the doctor management screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub full_name: String,
    pub department: Department,
    pub specialty: String,
    pub phone: String,
    pub status: DoctorStatus,
    pub years_of_experience: u8,
}

impl Record for Doctor {
    fn search_text(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::from(self.id.0.as_str()),
            Cow::from(self.full_name.as_str()),
            Cow::from(self.specialty.as_str()),
            Cow::from(self.phone.as_str()),
        ]
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::from(self.status.label())),
            "department" => Some(Cow::from(self.department.label())),
            "specialty" => Some(Cow::from(self.specialty.as_str())),
            _ => None,
        }
    }

    fn numeric_field(&self, name: &str) -> Option<f64> {
        match name {
            "years_of_experience" => Some(f64::from(self.years_of_experience)),
            _ => None,
        }
    }
}

/// Settlement state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// One row of the billing screen. The patient reference is an informal
/// foreign key carried as data; referential integrity is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub issued_on: NaiveDate,
    /// Whole currency units.
    pub amount_due: u32,
    pub amount_paid: u32,
    pub status: InvoiceStatus,
}

impl Invoice {
    pub fn balance(&self) -> u32 {
        self.amount_due.saturating_sub(self.amount_paid)
    }
}

impl Record for Invoice {
    fn search_text(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::from(self.id.0.as_str()),
            Cow::from(self.patient_id.0.as_str()),
            Cow::from(self.patient_name.as_str()),
        ]
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::from(self.status.label())),
            "patient_id" => Some(Cow::from(self.patient_id.0.as_str())),
            _ => None,
        }
    }

    fn numeric_field(&self, name: &str) -> Option<f64> {
        match name {
            "amount_due" => Some(f64::from(self.amount_due)),
            "amount_paid" => Some(f64::from(self.amount_paid)),
            "balance" => Some(f64::from(self.balance())),
            _ => None,
        }
    }
}

/// Dispensing state of a prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionStatus {
    Active,
    Completed,
    Cancelled,
}

impl PrescriptionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PrescriptionStatus::Active => "active",
            PrescriptionStatus::Completed => "completed",
            PrescriptionStatus::Cancelled => "cancelled",
        }
    }
}

/// One row of the prescription screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub prescriber: String,
    pub medication: String,
    pub dosage: String,
    pub issued_on: NaiveDate,
    pub refills_remaining: u8,
    pub status: PrescriptionStatus,
}

impl Record for Prescription {
    fn search_text(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::from(self.id.0.as_str()),
            Cow::from(self.patient_name.as_str()),
            Cow::from(self.medication.as_str()),
            Cow::from(self.prescriber.as_str()),
        ]
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::from(self.status.label())),
            "patient_id" => Some(Cow::from(self.patient_id.0.as_str())),
            "medication" => Some(Cow::from(self.medication.as_str())),
            _ => None,
        }
    }

    fn numeric_field(&self, name: &str) -> Option<f64> {
        match name {
            "refills_remaining" => Some(f64::from(self.refills_remaining)),
            _ => None,
        }
    }
}

/// Staff roles covered by the schedule screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Physician,
    Nurse,
    Technician,
    Reception,
}

impl StaffRole {
    pub const fn label(self) -> &'static str {
        match self {
            StaffRole::Physician => "physician",
            StaffRole::Nurse => "nurse",
            StaffRole::Technician => "technician",
            StaffRole::Reception => "reception",
        }
    }

    pub fn ordered() -> Vec<StaffRole> {
        vec![
            StaffRole::Physician,
            StaffRole::Nurse,
            StaffRole::Technician,
            StaffRole::Reception,
        ]
    }
}

/// Which part of the day a shift covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSlot {
    Morning,
    Afternoon,
    Night,
}

impl ShiftSlot {
    pub const fn label(self) -> &'static str {
        match self {
            ShiftSlot::Morning => "morning",
            ShiftSlot::Afternoon => "afternoon",
            ShiftSlot::Night => "night",
        }
    }
}

/// Progress state of a scheduled shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Scheduled,
    InProgress,
    Completed,
    Absent,
}

impl ShiftStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ShiftStatus::Scheduled => "scheduled",
            ShiftStatus::InProgress => "in_progress",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Absent => "absent",
        }
    }
}

/// One row of the staff-schedule screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffShift {
    pub id: ShiftId,
    pub staff_name: String,
    pub role: StaffRole,
    pub department: Department,
    pub shift_date: NaiveDate,
    pub slot: ShiftSlot,
    pub status: ShiftStatus,
}

impl Record for StaffShift {
    fn search_text(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::from(self.id.0.as_str()),
            Cow::from(self.staff_name.as_str()),
        ]
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::from(self.status.label())),
            "role" => Some(Cow::from(self.role.label())),
            "department" => Some(Cow::from(self.department.label())),
            "slot" => Some(Cow::from(self.slot.label())),
            _ => None,
        }
    }
}
