use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;

use caredesk::error::AppError;
use caredesk::query::{AggregateSpec, QueryCriteria};
use caredesk::registry::{
    Department, Doctor, DoctorId, DoctorStatus, Invoice, InvoiceId, InvoiceStatus, Patient,
    PatientId, PatientStatus, Prescription, PrescriptionId, PrescriptionStatus, RecordService,
    ShiftId, ShiftSlot, ShiftStatus, StaffRole, StaffShift,
};
use caredesk::reporting::{HospitalReportSummary, HospitalSnapshot};
use caredesk::roster::RosterImporter;

use crate::infra::{ClinicStores, InMemoryStore};
use crate::routes::HospitalReportResponse;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Optional legacy roster CSV to use as the patient collection
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Emit the report as JSON instead of formatted text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional legacy roster CSV to hydrate the patient collection
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Print the overview report only, skipping the CRUD walkthrough
    #[arg(long)]
    pub(crate) report_only: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs { roster_csv, json } = args;

    let patients = match roster_csv {
        Some(path) => RosterImporter::from_path(path)?,
        None => sample_patients(),
    };
    let doctors = sample_doctors();
    let invoices = sample_invoices();
    let prescriptions = sample_prescriptions();
    let shifts = sample_shifts();

    let snapshot = HospitalSnapshot {
        patients: &patients,
        doctors: &doctors,
        invoices: &invoices,
        prescriptions: &prescriptions,
        shifts: &shifts,
    };
    let summary = snapshot.summary();

    if json {
        let highlights = summary.highlights();
        let response = HospitalReportResponse {
            patients: summary.patients,
            doctors: summary.doctors,
            census: summary.census,
            staffing: summary.staffing,
            billing: summary.billing,
            prescriptions: summary.prescriptions,
            highlights,
        };
        match serde_json::to_string_pretty(&response) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("report unavailable: {err}"),
        }
        return Ok(());
    }

    render_report(&summary);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster_csv,
        report_only,
    } = args;

    let stores = ClinicStores::seeded();
    let stores = match roster_csv {
        Some(path) => {
            let patients = RosterImporter::from_path(path)?;
            println!("Hydrated {} patients from roster export", patients.len());
            ClinicStores {
                patients: Arc::new(InMemoryStore::seeded(patients)),
                ..stores
            }
        }
        None => stores,
    };

    println!("CareDesk hospital management demo");
    let summary = match stores.report_summary() {
        Ok(summary) => summary,
        Err(err) => {
            println!("report unavailable: {err}");
            return Ok(());
        }
    };
    render_report(&summary);

    if report_only {
        return Ok(());
    }

    let patients = Arc::new(RecordService::new(
        "patients",
        stores.patients.clone(),
        stores.audit.clone(),
    ));
    let invoices = Arc::new(RecordService::new(
        "invoices",
        stores.invoices.clone(),
        stores.audit.clone(),
    ));

    println!("\nPatient screen walkthrough");

    let admitted = match patients.list(&QueryCriteria::new().constrain("status", "admitted")) {
        Ok(records) => records,
        Err(err) => {
            println!("  listing unavailable: {err}");
            return Ok(());
        }
    };
    println!("- Admitted filter matches {} patient(s)", admitted.len());
    for patient in &admitted {
        println!(
            "  - {} | {} | {}",
            patient.id.0,
            patient.full_name,
            patient.department.label()
        );
    }

    let searched = match patients.list(&QueryCriteria::with_search("tran")) {
        Ok(records) => records,
        Err(err) => {
            println!("  search unavailable: {err}");
            return Ok(());
        }
    };
    println!("- Search 'tran' matches {} patient(s)", searched.len());

    let newcomer = Patient {
        id: PatientId("BN-0900".to_string()),
        full_name: "Hoang Van Em".to_string(),
        date_of_birth: date(1996, 9, 12),
        phone: "0908 765 432".to_string(),
        department: Department::Emergency,
        status: PatientStatus::Admitted,
        blood_type: Some("B+".to_string()),
        primary_diagnosis: Some("Fractured wrist".to_string()),
    };
    let mut registered = match patients.create(newcomer) {
        Ok(record) => {
            println!("- Registered {} ({})", record.full_name, record.id.0);
            record
        }
        Err(err) => {
            println!("  registration rejected: {err}");
            return Ok(());
        }
    };

    registered.status = PatientStatus::Outpatient;
    if let Err(err) = patients.update(registered) {
        println!("  update rejected: {err}");
        return Ok(());
    }
    println!("- Moved BN-0900 to outpatient care");

    if let Err(err) = patients.remove("BN-0900") {
        println!("  discharge rejected: {err}");
        return Ok(());
    }
    println!("- Removed BN-0900 from the register");

    println!("\nBilling stat cards");
    let stats = match invoices.stats(&[
        AggregateSpec::count("invoices", QueryCriteria::new()),
        AggregateSpec::sum(
            "collected",
            "amount_paid",
            QueryCriteria::new().constrain("status", "paid"),
        ),
        AggregateSpec::sum(
            "outstanding",
            "balance",
            QueryCriteria::new().constrain("status", "overdue"),
        ),
    ]) {
        Ok(stats) => stats,
        Err(err) => {
            println!("  billing stats unavailable: {err}");
            return Ok(());
        }
    };
    for (name, value) in &stats {
        println!("- {name}: {:.0}", value.as_f64());
    }

    println!("\nAudit trail");
    let events = stores.audit.events();
    if events.is_empty() {
        println!("- no mutations recorded");
    } else {
        for event in events {
            println!(
                "- {} {} {}",
                event.action.label(),
                event.collection,
                event.record_key
            );
        }
    }

    Ok(())
}

fn render_report(summary: &HospitalReportSummary) {
    println!("\nPatient register");
    println!(
        "- {} patients | {} admitted | {} outpatient | {} discharged",
        summary.patients.total,
        summary.patients.admitted,
        summary.patients.outpatient,
        summary.patients.discharged
    );

    println!("\nDoctor availability");
    println!(
        "- {} doctors | {} on duty | {} off duty | {} on leave",
        summary.doctors.total,
        summary.doctors.on_duty,
        summary.doctors.off_duty,
        summary.doctors.on_leave
    );

    println!("\nDepartment census");
    for entry in &summary.census {
        println!(
            "- {}: {} admitted, {} outpatient",
            entry.department_label, entry.admitted, entry.outpatient
        );
    }

    println!("\nStaffing coverage");
    for entry in &summary.staffing {
        println!(
            "- {}: {} scheduled, {} on shift, {} absent",
            entry.role_label, entry.scheduled, entry.on_shift, entry.absent
        );
    }

    println!("\nBilling");
    println!(
        "- {} invoices | {} paid | {} pending | {} overdue",
        summary.billing.invoice_count,
        summary.billing.paid,
        summary.billing.pending,
        summary.billing.overdue
    );
    println!(
        "- revenue collected {:.0} | outstanding balance {:.0}",
        summary.billing.revenue_collected, summary.billing.outstanding_balance
    );

    println!("\nPrescriptions");
    println!(
        "- {} active | {} completed | {} refills outstanding",
        summary.prescriptions.active,
        summary.prescriptions.completed,
        summary.prescriptions.refills_outstanding
    );

    let highlights = summary.highlights();
    if highlights.is_empty() {
        println!("\nHighlights: none");
    } else {
        println!("\nHighlights");
        for note in highlights {
            println!("- {note}");
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub(crate) fn sample_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: PatientId("BN-0001".to_string()),
            full_name: "Nguyen Van An".to_string(),
            date_of_birth: date(1985, 3, 14),
            phone: "0901 234 567".to_string(),
            department: Department::Cardiology,
            status: PatientStatus::Admitted,
            blood_type: Some("O+".to_string()),
            primary_diagnosis: Some("Hypertension".to_string()),
        },
        Patient {
            id: PatientId("BN-0002".to_string()),
            full_name: "Tran Thi Binh".to_string(),
            date_of_birth: date(1992, 11, 2),
            phone: "0902 345 678".to_string(),
            department: Department::Pediatrics,
            status: PatientStatus::Outpatient,
            blood_type: Some("A+".to_string()),
            primary_diagnosis: None,
        },
        Patient {
            id: PatientId("BN-0003".to_string()),
            full_name: "Le Minh Chau".to_string(),
            date_of_birth: date(1978, 1, 25),
            phone: "0903 456 789".to_string(),
            department: Department::Cardiology,
            status: PatientStatus::Admitted,
            blood_type: Some("A-".to_string()),
            primary_diagnosis: Some("Arrhythmia".to_string()),
        },
        Patient {
            id: PatientId("BN-0004".to_string()),
            full_name: "Pham Quang Dung".to_string(),
            date_of_birth: date(2001, 6, 30),
            phone: "0904 567 890".to_string(),
            department: Department::Orthopedics,
            status: PatientStatus::Outpatient,
            blood_type: None,
            primary_diagnosis: Some("Torn meniscus".to_string()),
        },
        Patient {
            id: PatientId("BN-0005".to_string()),
            full_name: "Vo Thi Giang".to_string(),
            date_of_birth: date(1969, 12, 8),
            phone: "0905 678 901".to_string(),
            department: Department::Oncology,
            status: PatientStatus::Admitted,
            blood_type: Some("B+".to_string()),
            primary_diagnosis: Some("Stage II lymphoma".to_string()),
        },
        Patient {
            id: PatientId("BN-0006".to_string()),
            full_name: "Dang Van Hai".to_string(),
            date_of_birth: date(1990, 4, 17),
            phone: "0906 789 012".to_string(),
            department: Department::GeneralMedicine,
            status: PatientStatus::Discharged,
            blood_type: Some("AB+".to_string()),
            primary_diagnosis: None,
        },
    ]
}

pub(crate) fn sample_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: DoctorId("BS-0001".to_string()),
            full_name: "Bui Thanh Long".to_string(),
            department: Department::Cardiology,
            specialty: "Interventional cardiology".to_string(),
            phone: "0911 222 333".to_string(),
            status: DoctorStatus::OnDuty,
            years_of_experience: 15,
        },
        Doctor {
            id: DoctorId("BS-0002".to_string()),
            full_name: "Do Thi Kim Ngan".to_string(),
            department: Department::Pediatrics,
            specialty: "Neonatology".to_string(),
            phone: "0912 333 444".to_string(),
            status: DoctorStatus::OnDuty,
            years_of_experience: 9,
        },
        Doctor {
            id: DoctorId("BS-0003".to_string()),
            full_name: "Ngo Van Phuc".to_string(),
            department: Department::Orthopedics,
            specialty: "Sports medicine".to_string(),
            phone: "0913 444 555".to_string(),
            status: DoctorStatus::OnLeave,
            years_of_experience: 21,
        },
        Doctor {
            id: DoctorId("BS-0004".to_string()),
            full_name: "Ly Thi Quynh".to_string(),
            department: Department::Oncology,
            specialty: "Medical oncology".to_string(),
            phone: "0914 555 666".to_string(),
            status: DoctorStatus::OffDuty,
            years_of_experience: 12,
        },
    ]
}

pub(crate) fn sample_invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: InvoiceId("INV-2025-101".to_string()),
            patient_id: PatientId("BN-0001".to_string()),
            patient_name: "Nguyen Van An".to_string(),
            issued_on: date(2025, 6, 2),
            amount_due: 320,
            amount_paid: 320,
            status: InvoiceStatus::Paid,
        },
        Invoice {
            id: InvoiceId("INV-2025-102".to_string()),
            patient_id: PatientId("BN-0003".to_string()),
            patient_name: "Le Minh Chau".to_string(),
            issued_on: date(2025, 6, 9),
            amount_due: 540,
            amount_paid: 200,
            status: InvoiceStatus::Pending,
        },
        Invoice {
            id: InvoiceId("INV-2025-103".to_string()),
            patient_id: PatientId("BN-0005".to_string()),
            patient_name: "Vo Thi Giang".to_string(),
            issued_on: date(2025, 5, 18),
            amount_due: 1250,
            amount_paid: 0,
            status: InvoiceStatus::Overdue,
        },
        Invoice {
            id: InvoiceId("INV-2025-104".to_string()),
            patient_id: PatientId("BN-0004".to_string()),
            patient_name: "Pham Quang Dung".to_string(),
            issued_on: date(2025, 6, 12),
            amount_due: 180,
            amount_paid: 180,
            status: InvoiceStatus::Paid,
        },
        Invoice {
            id: InvoiceId("INV-2025-105".to_string()),
            patient_id: PatientId("BN-0006".to_string()),
            patient_name: "Dang Van Hai".to_string(),
            issued_on: date(2025, 6, 1),
            amount_due: 95,
            amount_paid: 0,
            status: InvoiceStatus::Cancelled,
        },
    ]
}

pub(crate) fn sample_prescriptions() -> Vec<Prescription> {
    vec![
        Prescription {
            id: PrescriptionId("RX-5001".to_string()),
            patient_id: PatientId("BN-0001".to_string()),
            patient_name: "Nguyen Van An".to_string(),
            prescriber: "Bui Thanh Long".to_string(),
            medication: "Amlodipine".to_string(),
            dosage: "5mg daily".to_string(),
            issued_on: date(2025, 6, 2),
            refills_remaining: 2,
            status: PrescriptionStatus::Active,
        },
        Prescription {
            id: PrescriptionId("RX-5002".to_string()),
            patient_id: PatientId("BN-0003".to_string()),
            patient_name: "Le Minh Chau".to_string(),
            prescriber: "Bui Thanh Long".to_string(),
            medication: "Metoprolol".to_string(),
            dosage: "25mg twice daily".to_string(),
            issued_on: date(2025, 6, 9),
            refills_remaining: 0,
            status: PrescriptionStatus::Active,
        },
        Prescription {
            id: PrescriptionId("RX-5003".to_string()),
            patient_id: PatientId("BN-0002".to_string()),
            patient_name: "Tran Thi Binh".to_string(),
            prescriber: "Do Thi Kim Ngan".to_string(),
            medication: "Amoxicillin".to_string(),
            dosage: "250mg three times daily".to_string(),
            issued_on: date(2025, 5, 28),
            refills_remaining: 0,
            status: PrescriptionStatus::Completed,
        },
        Prescription {
            id: PrescriptionId("RX-5004".to_string()),
            patient_id: PatientId("BN-0006".to_string()),
            patient_name: "Dang Van Hai".to_string(),
            prescriber: "Ly Thi Quynh".to_string(),
            medication: "Ibuprofen".to_string(),
            dosage: "400mg as needed".to_string(),
            issued_on: date(2025, 6, 1),
            refills_remaining: 1,
            status: PrescriptionStatus::Cancelled,
        },
    ]
}

pub(crate) fn sample_shifts() -> Vec<StaffShift> {
    vec![
        StaffShift {
            id: ShiftId("CA-9001".to_string()),
            staff_name: "Bui Thanh Long".to_string(),
            role: StaffRole::Physician,
            department: Department::Cardiology,
            shift_date: date(2025, 6, 16),
            slot: ShiftSlot::Morning,
            status: ShiftStatus::InProgress,
        },
        StaffShift {
            id: ShiftId("CA-9002".to_string()),
            staff_name: "Mai Thi Sen".to_string(),
            role: StaffRole::Nurse,
            department: Department::Cardiology,
            shift_date: date(2025, 6, 16),
            slot: ShiftSlot::Morning,
            status: ShiftStatus::InProgress,
        },
        StaffShift {
            id: ShiftId("CA-9003".to_string()),
            staff_name: "Trinh Van Tuan".to_string(),
            role: StaffRole::Nurse,
            department: Department::Emergency,
            shift_date: date(2025, 6, 16),
            slot: ShiftSlot::Night,
            status: ShiftStatus::Scheduled,
        },
        StaffShift {
            id: ShiftId("CA-9004".to_string()),
            staff_name: "Cao Thi Uyen".to_string(),
            role: StaffRole::Technician,
            department: Department::Oncology,
            shift_date: date(2025, 6, 16),
            slot: ShiftSlot::Afternoon,
            status: ShiftStatus::Absent,
        },
        StaffShift {
            id: ShiftId("CA-9005".to_string()),
            staff_name: "Duong Van Vinh".to_string(),
            role: StaffRole::Reception,
            department: Department::GeneralMedicine,
            shift_date: date(2025, 6, 16),
            slot: ShiftSlot::Morning,
            status: ShiftStatus::Completed,
        },
    ]
}
