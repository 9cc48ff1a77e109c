use crate::infra::AppState;
use axum::extract::{Multipart, Path};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::Utc;
use lunchping::error::AppError;
use lunchping::places::{restaurant_router, PlaceSearchProvider, RestaurantService};
use lunchping::storage::{object_key, StorageError, StoredObject};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub(crate) fn with_restaurant_routes<P>(service: Arc<RestaurantService<P>>) -> axum::Router
where
    P: PlaceSearchProvider + 'static,
{
    restaurant_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/storage/upload", axum::routing::post(upload_endpoint))
        .route("/files/:bucket/:key", axum::routing::get(file_endpoint))
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

/// Stores the multipart field `file` under a timestamped key.
pub(crate) async fn upload_endpoint(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<StoredObject>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(&original_name)
                    .first_or_octet_stream()
                    .to_string()
            });
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;

        let key = object_key(&original_name, Utc::now().timestamp_millis());
        let stored = state.store.put(&key, &bytes, &content_type).await?;
        info!(key = %stored.key, size = stored.size, "upload stored");
        return Ok((StatusCode::CREATED, Json(stored)));
    }

    Err(StorageError::EmptyUpload.into())
}

pub(crate) async fn file_endpoint(
    Extension(state): Extension<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<Response, AppError> {
    if bucket != state.store.bucket() {
        return Err(AppError::NotFound(format!("bucket '{bucket}'")));
    }
    let blob = state
        .store
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("object '{key}'")))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, blob.content_type)],
        blob.bytes,
    )
        .into_response())
}
