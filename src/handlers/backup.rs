use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use model::store::BackupDocument;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use crate::schemas::{api_error, ApiError, ApiResponse, AppState};

/// Counts of what an imported backup document carried
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    /// Number of projects in the document, if the key was present
    pub projects: Option<usize>,
    /// Number of incomes in the document, if the key was present
    pub incomes: Option<usize>,
    /// Whether the document replaced the configuration
    pub config_replaced: bool,
}

/// Export the whole plan as a backup document
///
/// Returns pretty-printed JSON suitable for storage and later re-import.
#[utoipa::path(
    get,
    path = "/api/v1/backup",
    tag = "backup",
    responses(
        (status = 200, description = "Backup document", body = BackupDocument, content_type = "application/json")
    )
)]
#[instrument(skip(state))]
pub async fn export_backup(State(state): State<AppState>) -> Result<Response, ApiError> {
    trace!("Entering export_backup function");

    let plan = state.plan.read().await;
    let document = plan.to_backup();
    let body = serde_json::to_string_pretty(&document).map_err(|err| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "serialization",
            format!("Failed to serialize backup: {}", err),
        )
    })?;

    debug!(
        projects = plan.projects.len(),
        incomes = plan.incomes.len(),
        "exported backup document"
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Import a backup document
///
/// Top-level keys are independently optional: absent keys leave the
/// corresponding collection untouched, present keys replace it wholesale.
#[utoipa::path(
    post,
    path = "/api/v1/backup",
    tag = "backup",
    request_body = BackupDocument,
    responses(
        (status = 200, description = "Backup imported successfully", body = ApiResponse<ImportSummary>)
    )
)]
#[instrument(skip(state, document))]
pub async fn import_backup(
    State(state): State<AppState>,
    Json(document): Json<BackupDocument>,
) -> Result<Json<ApiResponse<ImportSummary>>, ApiError> {
    trace!("Entering import_backup function");

    let summary = ImportSummary {
        projects: document.projects.as_ref().map(Vec::len),
        incomes: document.incomes.as_ref().map(Vec::len),
        config_replaced: document.config.is_some(),
    };

    let mut plan = state.plan.write().await;
    plan.apply_backup(document);
    state.cache.invalidate_all();

    info!(
        projects = ?summary.projects,
        incomes = ?summary.incomes,
        config_replaced = summary.config_replaced,
        "backup imported successfully"
    );

    Ok(Json(ApiResponse {
        data: summary,
        message: "Backup imported successfully".to_string(),
        success: true,
    }))
}
