use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use compute::allocator::{self, AllocationOutcome};
use compute::PlanError;
use model::entities::income::AllocationEntry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{api_error, ApiError, ApiResponse, AppState};

/// One line of an income's allocation split
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AllocationEntryRequest {
    /// Target project ID
    pub project_id: i32,
    /// Amount allocated to that project
    pub amount: Decimal,
    /// Month the allocation applies to (YYYY-MM)
    pub month: String,
}

/// Request body replacing an income's allocation split
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AllocateRequest {
    /// Complete desired split; replaces any prior split for this income
    pub entries: Vec<AllocationEntryRequest>,
}

/// Outcome of applying an allocation split
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllocationResult {
    /// Projects that received an allocation record
    pub applied: usize,
    /// Entry project ids that did not resolve and were skipped
    pub skipped_projects: Vec<i32>,
}

/// Allocation record as seen from the receiving project
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReceivedAllocationView {
    pub income_id: i32,
    /// Current income name, or the recorded snapshot suffixed with
    /// "(deleted)" when the income no longer exists
    pub income_name: String,
    pub amount: Decimal,
    pub month: String,
    pub allocated_at: chrono::NaiveDateTime,
}

/// Replace an income's allocation split
///
/// Validates the whole split against the income's monthly amount before
/// applying anything; a rejected split leaves the ledger untouched.
#[utoipa::path(
    put,
    path = "/api/v1/incomes/{income_id}/allocations",
    tag = "allocations",
    params(
        ("income_id" = i32, Path, description = "Income ID"),
    ),
    request_body = AllocateRequest,
    responses(
        (status = 200, description = "Allocation applied successfully", body = ApiResponse<AllocationResult>),
        (status = 404, description = "Income not found", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Split exceeds the income's monthly amount", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn allocate_income(
    Path(income_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<AllocateRequest>,
) -> Result<Json<ApiResponse<AllocationResult>>, ApiError> {
    trace!("Entering allocate_income function for income_id: {}", income_id);
    debug!(income_id, entries = request.entries.len(), "applying allocation split");

    let entries: Vec<AllocationEntry> = request
        .entries
        .into_iter()
        .map(|e| AllocationEntry {
            project_id: e.project_id,
            amount: e.amount,
            month: e.month,
        })
        .collect();

    let mut plan = state.plan.write().await;
    let now = Utc::now().naive_utc();

    match allocator::allocate(&mut plan, income_id, entries, now) {
        Ok(AllocationOutcome {
            applied,
            skipped_projects,
            message,
        }) => {
            state.cache.invalidate_all();
            Ok(Json(ApiResponse {
                data: AllocationResult {
                    applied,
                    skipped_projects,
                },
                message,
                success: true,
            }))
        }
        Err(err @ PlanError::IncomeNotFound(_)) => {
            warn!(income_id, "allocation target income not found");
            Err(api_error(StatusCode::NOT_FOUND, "not_found", err.to_string()))
        }
        Err(err @ PlanError::OverAllocation { .. }) => {
            warn!(income_id, "allocation split rejected: {}", err);
            Err(api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "over_allocation",
                err.to_string(),
            ))
        }
        Err(err) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "invalid_allocation",
            err.to_string(),
        )),
    }
}

/// Get the allocations a project has received
///
/// Income names are resolved against the current income list; records whose
/// income was deleted keep the stored name snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/allocations",
    tag = "allocations",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
    ),
    responses(
        (status = 200, description = "Allocations retrieved successfully", body = ApiResponse<Vec<ReceivedAllocationView>>),
        (status = 404, description = "Project not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project_allocations(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ReceivedAllocationView>>>, ApiError> {
    trace!(
        "Entering get_project_allocations function for project_id: {}",
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

    let views: Vec<ReceivedAllocationView> = project
        .allocations_received
        .iter()
        .map(|record| {
            let income_name = match plan.income(record.income_id) {
                Some(income) => income.name.clone(),
                None => format!("{} (deleted)", record.income_name),
            };
            ReceivedAllocationView {
                income_id: record.income_id,
                income_name,
                amount: record.amount,
                month: record.month.clone(),
                allocated_at: record.allocated_at,
            }
        })
        .collect();

    debug!(project_id, count = views.len(), "retrieved received allocations");
    Ok(Json(ApiResponse {
        data: views,
        message: "Allocations retrieved successfully".to_string(),
        success: true,
    }))
}
