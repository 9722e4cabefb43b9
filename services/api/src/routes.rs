use std::io::Cursor;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Serialize;
use serde_json::json;

use caredesk::error::AppError;
use caredesk::registry::{RecordService, ServiceError};
use caredesk::reporting::views::{
    BillingSummary, DepartmentCensusEntry, DoctorAvailability, PatientTotals, PrescriptionSummary,
    RoleCoverageEntry,
};
use caredesk::roster::RosterImporter;

use crate::infra::{AppState, ClinicStores};

#[derive(Debug, Serialize)]
pub(crate) struct HospitalReportResponse {
    pub(crate) patients: PatientTotals,
    pub(crate) doctors: DoctorAvailability,
    pub(crate) census: Vec<DepartmentCensusEntry>,
    pub(crate) staffing: Vec<RoleCoverageEntry>,
    pub(crate) billing: BillingSummary,
    pub(crate) prescriptions: PrescriptionSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) highlights: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterImportResponse {
    pub(crate) imported: usize,
    pub(crate) skipped: usize,
}

/// Operational endpoints plus the cross-collection report and roster import.
/// The per-collection CRUD routers are merged alongside this one in the
/// server module.
pub(crate) fn ops_router(stores: ClinicStores) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/reports/overview", get(hospital_report_endpoint))
        .route("/api/v1/patients/roster", post(roster_import_endpoint))
        .with_state(stores)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn hospital_report_endpoint(
    State(stores): State<ClinicStores>,
) -> axum::response::Response {
    match stores.report_summary() {
        Ok(summary) => {
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
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Accepts a legacy roster CSV as the request body and loads it into the
/// patient collection. Rows colliding with existing patient ids are skipped
/// rather than overwritten.
pub(crate) async fn roster_import_endpoint(
    State(stores): State<ClinicStores>,
    body: String,
) -> axum::response::Response {
    let patients = match RosterImporter::from_reader(Cursor::new(body.into_bytes())) {
        Ok(patients) => patients,
        Err(error) => return AppError::from(error).into_response(),
    };

    let service = RecordService::new("patients", stores.patients.clone(), stores.audit.clone());

    let mut imported = 0;
    let mut skipped = 0;
    for patient in patients {
        match service.create(patient) {
            Ok(_) => imported += 1,
            Err(ServiceError::Repository(
                caredesk::registry::RepositoryError::Conflict,
            )) => skipped += 1,
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
            }
        }
    }

    (
        StatusCode::OK,
        Json(RosterImportResponse { imported, skipped }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use caredesk::registry::AuditAction;
    use tower::ServiceExt;

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn report_endpoint_summarizes_seeded_stores() {
        let router = ops_router(ClinicStores::seeded());

        let response = router
            .oneshot(
                axum::http::Request::get("/api/v1/reports/overview")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert!(body["patients"]["total"].as_u64().expect("total present") > 0);
        assert_eq!(body["census"].as_array().expect("census array").len(), 6);
        assert!(body["billing"]["invoice_count"].as_u64().expect("count") > 0);
    }

    #[tokio::test]
    async fn report_endpoint_handles_empty_stores() {
        let router = ops_router(ClinicStores::empty());

        let response = router
            .oneshot(
                axum::http::Request::get("/api/v1/reports/overview")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["patients"]["total"], 0);
    }

    #[tokio::test]
    async fn roster_import_loads_patients_and_audits() {
        let stores = ClinicStores::empty();
        let router = ops_router(stores.clone());

        let csv = "\
Patient ID,Full Name,Date of Birth,Department,Status,Phone
BN-0001,Nguyen Van An,1985-03-14,Cardiology,admitted,0901 234 567
BN-0002,Tran Thi Binh,1992-11-02,Pediatrics,outpatient,0902 345 678
";

        let response = router
            .oneshot(
                axum::http::Request::post("/api/v1/patients/roster")
                    .header(header::CONTENT_TYPE, "text/csv")
                    .body(axum::body::Body::from(csv))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["imported"], 2);
        assert_eq!(body["skipped"], 0);

        use caredesk::registry::RecordStore;
        assert_eq!(stores.patients.list().expect("list").len(), 2);
        assert!(stores
            .audit
            .events()
            .iter()
            .all(|event| event.action == AuditAction::Created));
    }

    #[tokio::test]
    async fn roster_import_rejects_malformed_csv() {
        let router = ops_router(ClinicStores::empty());

        let csv = "\
Patient ID,Full Name,Date of Birth,Department,Status,Phone
BN-0001,Nguyen Van An,not-a-date,Cardiology,admitted,0901
";

        let response = router
            .oneshot(
                axum::http::Request::post("/api/v1/patients/roster")
                    .header(header::CONTENT_TYPE, "text/csv")
                    .body(axum::body::Body::from(csv))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("not-a-date"));
    }
}
