use crate::query::{aggregate, AggregateSpec, QueryCriteria, StatValue};
use crate::registry::domain::{
    Department, Doctor, Invoice, Patient, Prescription, StaffRole, StaffShift,
};

use super::views::{
    BillingSummary, DepartmentCensusEntry, DoctorAvailability, HospitalReportSummary,
    PatientTotals, PrescriptionSummary, RoleCoverageEntry,
};

/// Borrowed view over the five record collections at one instant. Every
/// figure in the summary is recomputed from these slices on each call.
#[derive(Debug, Clone, Copy)]
pub struct HospitalSnapshot<'a> {
    pub patients: &'a [Patient],
    pub doctors: &'a [Doctor],
    pub invoices: &'a [Invoice],
    pub prescriptions: &'a [Prescription],
    pub shifts: &'a [StaffShift],
}

impl HospitalSnapshot<'_> {
    pub fn summary(&self) -> HospitalReportSummary {
        HospitalReportSummary {
            patients: self.patient_totals(),
            doctors: self.doctor_availability(),
            census: self.department_census(),
            staffing: self.role_coverage(),
            billing: self.billing_summary(),
            prescriptions: self.prescription_summary(),
        }
    }

    fn patient_totals(&self) -> PatientTotals {
        let stats = aggregate(
            self.patients,
            &[
                AggregateSpec::count("total", QueryCriteria::new()),
                AggregateSpec::count("admitted", status_is("admitted")),
                AggregateSpec::count("outpatient", status_is("outpatient")),
                AggregateSpec::count("discharged", status_is("discharged")),
            ],
        );

        PatientTotals {
            total: count(&stats, "total"),
            admitted: count(&stats, "admitted"),
            outpatient: count(&stats, "outpatient"),
            discharged: count(&stats, "discharged"),
        }
    }

    fn doctor_availability(&self) -> DoctorAvailability {
        let stats = aggregate(
            self.doctors,
            &[
                AggregateSpec::count("total", QueryCriteria::new()),
                AggregateSpec::count("on_duty", status_is("on_duty")),
                AggregateSpec::count("off_duty", status_is("off_duty")),
                AggregateSpec::count("on_leave", status_is("on_leave")),
            ],
        );

        DoctorAvailability {
            total: count(&stats, "total"),
            on_duty: count(&stats, "on_duty"),
            off_duty: count(&stats, "off_duty"),
            on_leave: count(&stats, "on_leave"),
        }
    }

    fn department_census(&self) -> Vec<DepartmentCensusEntry> {
        Department::ordered()
            .into_iter()
            .map(|department| {
                let stats = aggregate(
                    self.patients,
                    &[
                        AggregateSpec::count(
                            "admitted",
                            status_is("admitted").constrain("department", department.label()),
                        ),
                        AggregateSpec::count(
                            "outpatient",
                            status_is("outpatient").constrain("department", department.label()),
                        ),
                    ],
                );

                DepartmentCensusEntry {
                    department,
                    department_label: department.label(),
                    admitted: count(&stats, "admitted"),
                    outpatient: count(&stats, "outpatient"),
                }
            })
            .collect()
    }

    fn role_coverage(&self) -> Vec<RoleCoverageEntry> {
        StaffRole::ordered()
            .into_iter()
            .map(|role| {
                let for_role = QueryCriteria::new().constrain("role", role.label());
                let stats = aggregate(
                    self.shifts,
                    &[
                        AggregateSpec::count("scheduled", for_role.clone()),
                        AggregateSpec::count(
                            "on_shift",
                            for_role.clone().constrain("status", "in_progress"),
                        ),
                        AggregateSpec::count("absent", for_role.constrain("status", "absent")),
                    ],
                );

                RoleCoverageEntry {
                    role,
                    role_label: role.label(),
                    scheduled: count(&stats, "scheduled"),
                    on_shift: count(&stats, "on_shift"),
                    absent: count(&stats, "absent"),
                }
            })
            .collect()
    }

    fn billing_summary(&self) -> BillingSummary {
        let stats = aggregate(
            self.invoices,
            &[
                AggregateSpec::count("invoice_count", QueryCriteria::new()),
                AggregateSpec::count("paid", status_is("paid")),
                AggregateSpec::count("pending", status_is("pending")),
                AggregateSpec::count("overdue", status_is("overdue")),
                AggregateSpec::sum("revenue_collected", "amount_paid", QueryCriteria::new()),
                AggregateSpec::sum("pending_balance", "balance", status_is("pending")),
                AggregateSpec::sum("overdue_balance", "balance", status_is("overdue")),
            ],
        );

        BillingSummary {
            invoice_count: count(&stats, "invoice_count"),
            paid: count(&stats, "paid"),
            pending: count(&stats, "pending"),
            overdue: count(&stats, "overdue"),
            revenue_collected: sum(&stats, "revenue_collected"),
            outstanding_balance: sum(&stats, "pending_balance") + sum(&stats, "overdue_balance"),
        }
    }

    fn prescription_summary(&self) -> PrescriptionSummary {
        let stats = aggregate(
            self.prescriptions,
            &[
                AggregateSpec::count("active", status_is("active")),
                AggregateSpec::count("completed", status_is("completed")),
                AggregateSpec::sum("refills", "refills_remaining", status_is("active")),
            ],
        );

        PrescriptionSummary {
            active: count(&stats, "active"),
            completed: count(&stats, "completed"),
            refills_outstanding: sum(&stats, "refills") as u64,
        }
    }
}

fn status_is(label: &'static str) -> QueryCriteria {
    QueryCriteria::new().constrain("status", label)
}

fn count(stats: &crate::query::Statistics, name: &'static str) -> u64 {
    stats.get(name).copied().map(StatValue::as_count).unwrap_or(0)
}

fn sum(stats: &crate::query::Statistics, name: &'static str) -> f64 {
    stats.get(name).copied().map(StatValue::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::domain::{
        InvoiceId, InvoiceStatus, Patient, PatientId, PatientStatus, PrescriptionId,
        PrescriptionStatus, ShiftId, ShiftSlot, ShiftStatus,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn patient(id: &str, department: Department, status: PatientStatus) -> Patient {
        Patient {
            id: PatientId(id.to_string()),
            full_name: format!("Patient {id}"),
            date_of_birth: date(1980, 1, 1),
            phone: "0900 000 000".to_string(),
            department,
            status,
            blood_type: None,
            primary_diagnosis: None,
        }
    }

    fn invoice(id: &str, due: u32, paid: u32, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: InvoiceId(id.to_string()),
            patient_id: PatientId("BN-0001".to_string()),
            patient_name: "Nguyen Van An".to_string(),
            issued_on: date(2025, 6, 1),
            amount_due: due,
            amount_paid: paid,
            status,
        }
    }

    fn shift(id: &str, role: StaffRole, status: ShiftStatus) -> StaffShift {
        StaffShift {
            id: ShiftId(id.to_string()),
            staff_name: format!("Staff {id}"),
            role,
            department: Department::GeneralMedicine,
            shift_date: date(2025, 6, 2),
            slot: ShiftSlot::Morning,
            status,
        }
    }

    fn prescription(id: &str, refills: u8, status: PrescriptionStatus) -> Prescription {
        Prescription {
            id: PrescriptionId(id.to_string()),
            patient_id: PatientId("BN-0001".to_string()),
            patient_name: "Nguyen Van An".to_string(),
            prescriber: "Le Minh Chau".to_string(),
            medication: "Amlodipine".to_string(),
            dosage: "5mg daily".to_string(),
            issued_on: date(2025, 6, 2),
            refills_remaining: refills,
            status,
        }
    }

    #[test]
    fn summary_counts_patients_by_status_and_department() {
        let patients = vec![
            patient("BN-0001", Department::Cardiology, PatientStatus::Admitted),
            patient("BN-0002", Department::Cardiology, PatientStatus::Outpatient),
            patient("BN-0003", Department::Pediatrics, PatientStatus::Admitted),
            patient("BN-0004", Department::Pediatrics, PatientStatus::Discharged),
        ];
        let snapshot = HospitalSnapshot {
            patients: &patients,
            doctors: &[],
            invoices: &[],
            prescriptions: &[],
            shifts: &[],
        };

        let summary = snapshot.summary();
        assert_eq!(summary.patients.total, 4);
        assert_eq!(summary.patients.admitted, 2);
        assert_eq!(summary.patients.discharged, 1);

        let cardiology = summary
            .census
            .iter()
            .find(|entry| entry.department == Department::Cardiology)
            .expect("cardiology entry present");
        assert_eq!(cardiology.admitted, 1);
        assert_eq!(cardiology.outpatient, 1);
    }

    #[test]
    fn doctor_availability_counts_by_duty_status() {
        use crate::registry::domain::{Doctor, DoctorId, DoctorStatus};

        let doctors = vec![
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
                full_name: "Ngo Van Phuc".to_string(),
                department: Department::Orthopedics,
                specialty: "Sports medicine".to_string(),
                phone: "0913 444 555".to_string(),
                status: DoctorStatus::OnLeave,
                years_of_experience: 21,
            },
        ];
        let snapshot = HospitalSnapshot {
            patients: &[],
            doctors: &doctors,
            invoices: &[],
            prescriptions: &[],
            shifts: &[],
        };

        let availability = snapshot.summary().doctors;
        assert_eq!(availability.total, 2);
        assert_eq!(availability.on_duty, 1);
        assert_eq!(availability.off_duty, 0);
        assert_eq!(availability.on_leave, 1);
    }

    #[test]
    fn billing_summary_separates_revenue_from_outstanding() {
        let invoices = vec![
            invoice("INV-1", 100, 100, InvoiceStatus::Paid),
            invoice("INV-2", 250, 50, InvoiceStatus::Pending),
            invoice("INV-3", 80, 0, InvoiceStatus::Overdue),
            invoice("INV-4", 120, 0, InvoiceStatus::Cancelled),
        ];
        let snapshot = HospitalSnapshot {
            patients: &[],
            doctors: &[],
            invoices: &invoices,
            prescriptions: &[],
            shifts: &[],
        };

        let billing = snapshot.summary().billing;
        assert_eq!(billing.invoice_count, 4);
        assert_eq!(billing.paid, 1);
        assert_eq!(billing.overdue, 1);
        assert_eq!(billing.revenue_collected, 150.0);
        assert_eq!(billing.outstanding_balance, 280.0);
    }

    #[test]
    fn role_coverage_tracks_absences() {
        let shifts = vec![
            shift("CA-1", StaffRole::Nurse, ShiftStatus::InProgress),
            shift("CA-2", StaffRole::Nurse, ShiftStatus::Absent),
            shift("CA-3", StaffRole::Physician, ShiftStatus::Scheduled),
        ];
        let snapshot = HospitalSnapshot {
            patients: &[],
            doctors: &[],
            invoices: &[],
            prescriptions: &[],
            shifts: &shifts,
        };

        let staffing = snapshot.summary().staffing;
        let nurses = staffing
            .iter()
            .find(|entry| entry.role == StaffRole::Nurse)
            .expect("nurse entry present");
        assert_eq!(nurses.scheduled, 2);
        assert_eq!(nurses.on_shift, 1);
        assert_eq!(nurses.absent, 1);
    }

    #[test]
    fn prescription_summary_sums_active_refills() {
        let prescriptions = vec![
            prescription("RX-1", 2, PrescriptionStatus::Active),
            prescription("RX-2", 3, PrescriptionStatus::Active),
            prescription("RX-3", 5, PrescriptionStatus::Completed),
        ];
        let snapshot = HospitalSnapshot {
            patients: &[],
            doctors: &[],
            invoices: &[],
            prescriptions: &prescriptions,
            shifts: &[],
        };

        let summary = snapshot.summary().prescriptions;
        assert_eq!(summary.active, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.refills_outstanding, 5);
    }

    #[test]
    fn empty_collections_produce_an_all_zero_summary() {
        let snapshot = HospitalSnapshot {
            patients: &[],
            doctors: &[],
            invoices: &[],
            prescriptions: &[],
            shifts: &[],
        };

        let summary = snapshot.summary();
        assert_eq!(summary.patients.total, 0);
        assert_eq!(summary.billing.invoice_count, 0);
        assert_eq!(summary.billing.outstanding_balance, 0.0);
        assert!(summary.census.iter().all(|entry| entry.admitted == 0));
    }
}
