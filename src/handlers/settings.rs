use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::config::AdminConfig;
use tracing::{debug, info, instrument, trace, warn};

use crate::schemas::{api_error, ApiError, ApiResponse, AppState};

/// Get the admin configuration
#[utoipa::path(
    get,
    path = "/api/v1/config",
    tag = "config",
    responses(
        (status = 200, description = "Configuration retrieved successfully", body = ApiResponse<AdminConfig>)
    )
)]
#[instrument(skip(state))]
pub async fn get_config(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdminConfig>>, ApiError> {
    trace!("Entering get_config function");

    let plan = state.plan.read().await;
    Ok(Json(ApiResponse {
        data: plan.config.clone(),
        message: "Configuration retrieved successfully".to_string(),
        success: true,
    }))
}

/// Replace the admin configuration
///
/// The document replaces the whole configuration. Value lists already
/// referenced by stored items may shrink; existing items keep their values
/// and only new writes are validated against the new lists.
#[utoipa::path(
    put,
    path = "/api/v1/config",
    tag = "config",
    request_body = AdminConfig,
    responses(
        (status = 200, description = "Configuration updated successfully", body = ApiResponse<AdminConfig>),
        (status = 400, description = "Invalid configuration", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_config(
    State(state): State<AppState>,
    Json(request): Json<AdminConfig>,
) -> Result<Json<ApiResponse<AdminConfig>>, ApiError> {
    trace!("Entering update_config function");

    let lists = &request.lists;
    if lists.project_categories.is_empty()
        || lists.project_statuses.is_empty()
        || lists.priorities.is_empty()
        || lists.income_kinds.is_empty()
        || lists.owners.is_empty()
    {
        warn!("rejected configuration with an empty value list");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "empty_list",
            "Every configured value list must keep at least one entry",
        ));
    }

    let mut plan = state.plan.write().await;
    plan.config = request;
    state.cache.invalidate_all();

    info!("configuration updated successfully");
    debug!(
        categories = plan.config.lists.project_categories.len(),
        mentors = plan.config.mentor_advice.len(),
        "new configuration applied"
    );

    Ok(Json(ApiResponse {
        data: plan.config.clone(),
        message: "Configuration updated successfully".to_string(),
        success: true,
    }))
}
