use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use compute::PlanError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{api_error, ApiError, ApiResponse, AppState};

/// One mentor's take on the project
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MentorAdvice {
    /// Mentor name
    pub mentor: String,
    /// Advice snippet for the project's category
    pub advice: String,
}

/// Advice for a project across all configured mentors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdviceResponse {
    pub project_id: i32,
    pub project_name: String,
    pub category: String,
    pub advice: Vec<MentorAdvice>,
}

/// Get mentor advice for a project
///
/// Looks up each configured mentor's snippet for the project's category; a
/// mentor with no snippet for that category gets a placeholder line.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/advice",
    tag = "advice",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
    ),
    responses(
        (status = 200, description = "Advice retrieved successfully", body = ApiResponse<AdviceResponse>),
        (status = 404, description = "Project not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project_advice(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdviceResponse>>, ApiError> {
    trace!(
        "Entering get_project_advice function for project_id: {}",
        project_id
    );

    let plan = state.plan.read().await;
    let Some(project) = plan.project(project_id) else {
        warn!(project_id, "project not found");
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            PlanError::ProjectNotFound(project_id).to_string(),
        ));
    };

    let advice: Vec<MentorAdvice> = plan
        .config
        .mentor_advice
        .iter()
        .map(|(mentor, by_category)| MentorAdvice {
            mentor: mentor.clone(),
            advice: by_category
                .get(&project.category)
                .cloned()
                .unwrap_or_else(|| {
                    format!("No advice available for the {} category.", project.category)
                }),
        })
        .collect();

    debug!(project_id, mentors = advice.len(), "retrieved mentor advice");
    Ok(Json(ApiResponse {
        data: AdviceResponse {
            project_id: project.id,
            project_name: project.name.clone(),
            category: project.category.clone(),
            advice,
        },
        message: "Advice retrieved successfully".to_string(),
        success: true,
    }))
}
