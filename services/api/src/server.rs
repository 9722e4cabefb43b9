use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use caredesk::config::AppConfig;
use caredesk::error::AppError;
use caredesk::registry::{registry_router, RecordService};
use caredesk::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{AppState, ClinicStores};
use crate::routes::ops_router;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let stores = if config.seed_demo_data {
        ClinicStores::seeded()
    } else {
        ClinicStores::empty()
    };

    let patients = Arc::new(RecordService::new(
        "patients",
        stores.patients.clone(),
        stores.audit.clone(),
    ));
    let doctors = Arc::new(RecordService::new(
        "doctors",
        stores.doctors.clone(),
        stores.audit.clone(),
    ));
    let invoices = Arc::new(RecordService::new(
        "invoices",
        stores.invoices.clone(),
        stores.audit.clone(),
    ));
    let prescriptions = Arc::new(RecordService::new(
        "prescriptions",
        stores.prescriptions.clone(),
        stores.audit.clone(),
    ));
    let shifts = Arc::new(RecordService::new(
        "shifts",
        stores.shifts.clone(),
        stores.audit.clone(),
    ));

    let app = registry_router(patients)
        .merge(registry_router(doctors))
        .merge(registry_router(invoices))
        .merge(registry_router(prescriptions))
        .merge(registry_router(shifts))
        .merge(ops_router(stores))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, seeded = config.seed_demo_data, "hospital management service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
