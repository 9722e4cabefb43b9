//! Hospital-wide reporting built on the query engine's aggregates.

mod summary;
pub mod views;

pub use summary::HospitalSnapshot;
pub use views::HospitalReportSummary;

use views::HospitalReportSummary as Summary;

pub(crate) fn generate_highlights(summary: &Summary) -> Vec<String> {
    let mut highlights = Vec::new();

    if let Some(busiest) = summary
        .census
        .iter()
        .filter(|entry| entry.admitted > 0)
        .max_by_key(|entry| entry.admitted)
    {
        highlights.push(format!(
            "{} carries the largest admitted census ({} patients)",
            busiest.department_label, busiest.admitted
        ));
    }

    if summary.doctors.total > 0 && summary.doctors.on_duty == 0 {
        highlights.push("no doctors currently on duty".to_string());
    }

    if summary.billing.overdue > 0 {
        highlights.push(format!(
            "{} invoice(s) overdue with {:.0} outstanding",
            summary.billing.overdue, summary.billing.outstanding_balance
        ));
    }

    for entry in &summary.staffing {
        if entry.absent > 0 {
            highlights.push(format!(
                "{} {} shift(s) marked absent today",
                entry.absent, entry.role_label
            ));
        }
    }

    if summary.prescriptions.active > 0 && summary.prescriptions.refills_outstanding == 0 {
        highlights.push(
            "active prescriptions have no refills remaining; renewals needed".to_string(),
        );
    }

    highlights
}
