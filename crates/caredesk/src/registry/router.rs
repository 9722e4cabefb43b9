use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::query::{QueryCriteria, Record};

use super::repository::{AuditTrail, Keyed, RecordStore, RepositoryError};
use super::service::{RecordService, ServiceError};

/// Router builder exposing one collection's CRUD and filtered-list endpoints
/// under `/api/v1/{collection}`.
pub fn registry_router<T, S, A>(service: Arc<RecordService<T, S, A>>) -> Router
where
    T: Record + Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    S: RecordStore<T> + 'static,
    A: AuditTrail + 'static,
{
    let collection = service.collection();
    Router::new()
        .route(
            &format!("/api/v1/{collection}"),
            get(list_handler::<T, S, A>).post(create_handler::<T, S, A>),
        )
        .route(
            &format!("/api/v1/{collection}/:key"),
            get(fetch_handler::<T, S, A>)
                .put(update_handler::<T, S, A>)
                .delete(delete_handler::<T, S, A>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<T, S, A>(
    State(service): State<Arc<RecordService<T, S, A>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response
where
    T: Record + Keyed + Clone + Serialize + Send + Sync + 'static,
    S: RecordStore<T> + 'static,
    A: AuditTrail + 'static,
{
    let criteria = QueryCriteria::from_params(params);
    match service.list(&criteria) {
        Ok(records) => {
            let payload = json!({
                "collection": service.collection(),
                "count": records.len(),
                "records": records,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<T, S, A>(
    State(service): State<Arc<RecordService<T, S, A>>>,
    axum::Json(record): axum::Json<T>,
) -> Response
where
    T: Record + Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    S: RecordStore<T> + 'static,
    A: AuditTrail + 'static,
{
    match service.create(record) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<T, S, A>(
    State(service): State<Arc<RecordService<T, S, A>>>,
    Path(key): Path<String>,
) -> Response
where
    T: Record + Keyed + Clone + Serialize + Send + Sync + 'static,
    S: RecordStore<T> + 'static,
    A: AuditTrail + 'static,
{
    match service.get(&key) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<T, S, A>(
    State(service): State<Arc<RecordService<T, S, A>>>,
    Path(key): Path<String>,
    axum::Json(record): axum::Json<T>,
) -> Response
where
    T: Record + Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    S: RecordStore<T> + 'static,
    A: AuditTrail + 'static,
{
    if record.record_key() != key {
        let payload = json!({
            "error": "record key does not match request path",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    match service.update(record) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<T, S, A>(
    State(service): State<Arc<RecordService<T, S, A>>>,
    Path(key): Path<String>,
) -> Response
where
    T: Record + Keyed + Clone + Serialize + Send + Sync + 'static,
    S: RecordStore<T> + 'static,
    A: AuditTrail + 'static,
{
    match service.remove(&key) {
        Ok(()) => {
            let payload = json!({ "deleted": key });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    match error {
        ServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "record already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        ServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "record not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
