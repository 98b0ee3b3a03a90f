use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use compute::{ledger, PlanError};
use model::entities::config::ListsConfig;
use model::entities::project::{Project, ReceivedAllocation, TrackingEntry};
use model::store::ProjectDraft;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{api_error, ApiError, ApiResponse, AppState, AsOfQuery};

/// Request body for creating or fully updating a project
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateProjectRequest {
    /// Project name
    pub name: String,
    /// Project category; must be one of the configured category values
    pub category: String,
    /// Total budget, non-negative
    pub total_budget: Decimal,
    /// Planned monthly allocation
    pub monthly_allocation: Decimal,
    /// Amount used so far; ignored on update once tracking entries exist
    pub amount_used: Option<Decimal>,
    /// Estimated monthly cash flow, signed
    pub monthly_cash_flow: Decimal,
    /// Project status; must be one of the configured status values
    pub status: String,
    /// Due date (YYYY-MM-DD)
    pub due_date: NaiveDate,
    /// Expected return on investment in percent
    pub expected_roi_pct: f64,
    /// Priority; must be one of the configured priority values
    pub priority: String,
    /// Free-text description
    pub description: Option<String>,
    /// Income or source financing this project
    pub funding_source: Option<String>,
    /// Responsible party
    pub owner: String,
    /// Person recording the change (defaults to the owner)
    pub author: Option<String>,
}

/// Health bucket of a project, with its display label and color
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectHealth {
    pub bucket: String,
    pub label: String,
    pub color: String,
}

/// Project response model, including the derived read-only fields
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub total_budget: Decimal,
    pub monthly_allocation: Decimal,
    pub amount_used: Decimal,
    pub monthly_cash_flow: Decimal,
    pub status: String,
    pub due_date: NaiveDate,
    pub expected_roi_pct: f64,
    pub priority: String,
    pub description: String,
    pub funding_source: String,
    pub owner: String,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub monthly_tracking: Vec<TrackingEntry>,
    pub allocations_received: Vec<ReceivedAllocation>,
    /// Budget progress in percent; 0 when the total budget is 0
    pub progress_pct: f64,
    /// Days until the due date; negative once overdue
    pub days_remaining: i64,
    pub health: ProjectHealth,
    /// Trailing 3-month average of actual spend
    pub monthly_velocity: Decimal,
    /// Heuristic success score in [0, 100]
    pub success_probability: u8,
}

impl ProjectResponse {
    /// Builds the response for a project, deriving the read-only fields
    /// against the given reference date.
    pub fn from_project(project: &Project, today: NaiveDate) -> Self {
        let bucket = ledger::categorize(project, today);
        Self {
            id: project.id,
            name: project.name.clone(),
            category: project.category.clone(),
            total_budget: project.total_budget,
            monthly_allocation: project.monthly_allocation,
            amount_used: project.amount_used,
            monthly_cash_flow: project.monthly_cash_flow,
            status: project.status.clone(),
            due_date: project.due_date,
            expected_roi_pct: project.expected_roi_pct,
            priority: project.priority.clone(),
            description: project.description.clone(),
            funding_source: project.funding_source.clone(),
            owner: project.owner.clone(),
            created_by: project.created_by.clone(),
            updated_by: project.updated_by.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
            monthly_tracking: project.monthly_tracking.clone(),
            allocations_received: project.allocations_received.clone(),
            progress_pct: ledger::progress_pct(project),
            days_remaining: ledger::days_remaining(project, today),
            health: ProjectHealth {
                bucket: bucket.slug().to_string(),
                label: bucket.label().to_string(),
                color: bucket.color().to_string(),
            },
            monthly_velocity: ledger::monthly_velocity(project),
            success_probability: ledger::success_probability(project, today),
        }
    }
}

/// Checks the request's tagged strings against the configured lists.
fn validate_tags(lists: &ListsConfig, request: &CreateProjectRequest) -> Result<(), ApiError> {
    if !lists.has_category(&request.category) {
        warn!(category = %request.category, "rejected project with unknown category");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "unknown_list_value",
            PlanError::UnknownListValue {
                list: "category",
                value: request.category.clone(),
            }
            .to_string(),
        ));
    }
    if !lists.has_status(&request.status) {
        warn!(status = %request.status, "rejected project with unknown status");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "unknown_list_value",
            PlanError::UnknownListValue {
                list: "status",
                value: request.status.clone(),
            }
            .to_string(),
        ));
    }
    if !lists.has_priority(&request.priority) {
        warn!(priority = %request.priority, "rejected project with unknown priority");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "unknown_list_value",
            PlanError::UnknownListValue {
                list: "priority",
                value: request.priority.clone(),
            }
            .to_string(),
        ));
    }
    if request.total_budget < Decimal::ZERO {
        warn!("rejected project with negative total budget");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "negative_budget",
            "Total budget must not be negative",
        ));
    }
    Ok(())
}

fn draft_from(request: CreateProjectRequest) -> ProjectDraft {
    let author = request.author.unwrap_or_else(|| request.owner.clone());
    ProjectDraft {
        name: request.name,
        category: request.category,
        total_budget: request.total_budget,
        monthly_allocation: request.monthly_allocation,
        amount_used: request.amount_used.unwrap_or(Decimal::ZERO),
        monthly_cash_flow: request.monthly_cash_flow,
        status: request.status,
        due_date: request.due_date,
        expected_roi_pct: request.expected_roi_pct,
        priority: request.priority,
        description: request.description.unwrap_or_default(),
        funding_source: request.funding_source.unwrap_or_default(),
        owner: request.owner,
        author,
    }
}

/// Create a new project
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = ApiResponse<ProjectResponse>),
        (status = 400, description = "Invalid request", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectResponse>>), ApiError> {
    trace!("Entering create_project function");
    debug!(name = %request.name, category = %request.category, "creating project");

    let mut plan = state.plan.write().await;
    validate_tags(&plan.config.lists, &request)?;

    let now = Utc::now().naive_utc();
    let id = plan.add_project(draft_from(request), now);
    state.cache.invalidate_all();

    let project = plan
        .project(id)
        .ok_or_else(|| api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "Project vanished after insert"))?;
    info!(id, name = %project.name, "project created successfully");

    let response = ApiResponse {
        data: ProjectResponse::from_project(project, now.date()),
        message: "Project created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all projects
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "projects",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Projects retrieved successfully", body = ApiResponse<Vec<ProjectResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_projects(
    Query(query): Query<AsOfQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProjectResponse>>>, ApiError> {
    trace!("Entering get_projects function");
    let today = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let plan = state.plan.read().await;
    let projects: Vec<ProjectResponse> = plan
        .projects
        .iter()
        .map(|p| ProjectResponse::from_project(p, today))
        .collect();

    debug!(count = projects.len(), "retrieved projects");
    Ok(Json(ApiResponse {
        data: projects,
        message: "Projects retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific project by ID
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
        AsOfQuery,
    ),
    responses(
        (status = 200, description = "Project retrieved successfully", body = ApiResponse<ProjectResponse>),
        (status = 404, description = "Project not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project(
    Path(project_id): Path<i32>,
    Query(query): Query<AsOfQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    trace!("Entering get_project function for project_id: {}", project_id);
    let today = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let plan = state.plan.read().await;
    match plan.project(project_id) {
        Some(project) => {
            debug!(id = project.id, name = %project.name, "retrieved project");
            Ok(Json(ApiResponse {
                data: ProjectResponse::from_project(project, today),
                message: "Project retrieved successfully".to_string(),
                success: true,
            }))
        }
        None => {
            warn!(project_id, "project not found");
            Err(api_error(
                StatusCode::NOT_FOUND,
                "not_found",
                PlanError::ProjectNotFound(project_id).to_string(),
            ))
        }
    }
}

/// Update a project (full-field update)
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
    ),
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ApiResponse<ProjectResponse>),
        (status = 400, description = "Invalid request", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_project(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    trace!("Entering update_project function for project_id: {}", project_id);

    let mut plan = state.plan.write().await;
    validate_tags(&plan.config.lists, &request)?;

    let now = Utc::now().naive_utc();
    if !plan.update_project(project_id, draft_from(request), now) {
        warn!(project_id, "project not found for update");
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            PlanError::ProjectNotFound(project_id).to_string(),
        ));
    }
    state.cache.invalidate_all();

    let project = plan
        .project(project_id)
        .ok_or_else(|| api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "Project vanished after update"))?;
    info!(project_id, "project updated successfully");

    Ok(Json(ApiResponse {
        data: ProjectResponse::from_project(project, now.date()),
        message: "Project updated successfully".to_string(),
        success: true,
    }))
}

/// Delete a project
///
/// No cascade: allocation records referencing the project become orphaned and
/// are tolerated by readers.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
    ),
    responses(
        (status = 200, description = "Project deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Project not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_project(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_project function for project_id: {}", project_id);

    let mut plan = state.plan.write().await;
    if !plan.remove_project(project_id) {
        warn!(project_id, "project not found for deletion");
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            PlanError::ProjectNotFound(project_id).to_string(),
        ));
    }
    state.cache.invalidate_all();

    info!(project_id, "project deleted successfully");
    Ok(Json(ApiResponse {
        data: format!("Project {} deleted", project_id),
        message: "Project deleted successfully".to_string(),
        success: true,
    }))
}
