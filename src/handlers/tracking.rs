use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use compute::{ledger, PlanError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::handlers::projects::ProjectResponse;
use crate::schemas::{api_error, ApiError, ApiResponse, AppState};

/// Request body for upserting one month of tracking
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TrackingRequest {
    /// Month key, `YYYY-MM`
    pub month: String,
    /// Planned amount for the month
    pub planned: Decimal,
    /// Actual amount realized in the month
    pub actual: Decimal,
}

/// Upsert one month of tracking for a project
///
/// Overwrites the entry for the month when one exists, appends otherwise.
/// The project's used amount is re-derived as the sum of all actual values.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}/tracking",
    tag = "projects",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
    ),
    request_body = TrackingRequest,
    responses(
        (status = 200, description = "Tracking entry recorded", body = ApiResponse<ProjectResponse>),
        (status = 400, description = "Invalid month key", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn upsert_tracking_entry(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<TrackingRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    trace!("Entering upsert_tracking_entry for project_id: {}", project_id);

    let mut plan = state.plan.write().await;
    let now = Utc::now().naive_utc();

    let Some(project) = plan.project_mut(project_id) else {
        warn!(project_id, "project not found for tracking update");
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            PlanError::ProjectNotFound(project_id).to_string(),
        ));
    };

    match ledger::add_tracking_entry(project, &request.month, request.planned, request.actual, now)
    {
        Ok(()) => {
            state.cache.invalidate_all();
            info!(project_id, month = %request.month, "tracking entry recorded");
            Ok(Json(ApiResponse {
                data: ProjectResponse::from_project(project, now.date()),
                message: "Tracking entry recorded".to_string(),
                success: true,
            }))
        }
        Err(err @ PlanError::InvalidMonthKey(_)) => {
            warn!(project_id, month = %request.month, "rejected malformed month key");
            Err(api_error(StatusCode::BAD_REQUEST, "invalid_month_key", err.to_string()))
        }
        Err(err) => Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            err.to_string(),
        )),
    }
}
