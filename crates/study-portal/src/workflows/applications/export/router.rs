use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::workflows::applications::domain::{ApplicationId, ApplicationRecord};
use crate::workflows::applications::repository::{ApplicationRepository, RepositoryError};

use super::download::ExportArtifact;
use super::options::ExportOptions;
use super::service::{ExportError, ExportService};

/// Shared handler state: the export service plus the store records are looked up in.
#[derive(Clone)]
pub struct ExportState {
    pub service: Arc<ExportService>,
    pub repository: Arc<dyn ApplicationRepository>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkExportRequest {
    pub(crate) applications: Vec<ApplicationRecord>,
    pub(crate) options: ExportOptions,
}

/// Routes returning exports as attachments instead of writing them to disk.
pub fn export_router(state: ExportState) -> Router {
    Router::new()
        .route(
            "/api/v1/applications/export",
            get(export_all_handler).post(export_posted_handler),
        )
        .route(
            "/api/v1/applications/:application_id/export",
            get(export_one_handler),
        )
        .with_state(state)
}

pub(crate) async fn export_one_handler(
    State(state): State<ExportState>,
    Path(application_id): Path<String>,
    Query(options): Query<ExportOptions>,
) -> Response {
    let id = ApplicationId(application_id);
    let record = match state.repository.fetch(&id) {
        Ok(Some(record)) => record,
        Ok(None) => return not_found(&id),
        Err(err) => return repository_failure(err),
    };

    match state.service.prepare_application(&record, &options) {
        Ok(artifact) => attachment(artifact),
        Err(err) => export_failure(err, &options),
    }
}

pub(crate) async fn export_all_handler(
    State(state): State<ExportState>,
    Query(options): Query<ExportOptions>,
) -> Response {
    let records = match state.repository.list() {
        Ok(records) => records,
        Err(err) => return repository_failure(err),
    };

    match state.service.prepare_multiple(&records, &options) {
        Ok(artifact) => attachment(artifact),
        Err(err) => export_failure(err, &options),
    }
}

pub(crate) async fn export_posted_handler(
    State(state): State<ExportState>,
    Json(request): Json<BulkExportRequest>,
) -> Response {
    match state
        .service
        .prepare_multiple(&request.applications, &request.options)
    {
        Ok(artifact) => attachment(artifact),
        Err(err) => export_failure(err, &request.options),
    }
}

fn attachment(artifact: ExportArtifact) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact.file_name.replace('"', "")
    );
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

fn export_failure(err: ExportError, options: &ExportOptions) -> Response {
    error!(format = %options.format, error = %err, "export request failed");
    let status = match err {
        ExportError::UnsupportedFormat { .. } | ExportError::UnsupportedBulkFormat { .. } => {
            StatusCode::BAD_REQUEST
        }
        ExportError::Serialization(_) | ExportError::Download(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}

fn not_found(id: &ApplicationId) -> Response {
    let payload = json!({
        "application_id": id.0,
        "error": RepositoryError::NotFound.to_string(),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn repository_failure(err: RepositoryError) -> Response {
    error!(error = %err, "application lookup failed");
    let status = match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
