use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use compute::PlanError;
use model::entities::income::{AllocationEntry, Income};
use model::store::IncomeDraft;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{api_error, ApiError, ApiResponse, AppState};

/// Request body for creating or fully updating an income
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateIncomeRequest {
    /// Income name
    pub name: String,
    /// Monthly amount, non-negative
    pub monthly_amount: Decimal,
    /// Income kind; must be one of the configured kind values
    pub kind: String,
    /// True for predictable incomes, false for variable ones
    pub regular: bool,
    /// Responsible party
    pub owner: String,
    /// Date from which the income is available (YYYY-MM-DD)
    pub available_from: NaiveDate,
    /// Person recording the change (defaults to the owner)
    pub author: Option<String>,
}

/// Income response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncomeResponse {
    pub id: i32,
    pub name: String,
    pub monthly_amount: Decimal,
    pub kind: String,
    pub regular: bool,
    pub owner: String,
    pub available_from: NaiveDate,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub allocations: Vec<AllocationEntry>,
    /// Sum of the currently allocated amounts
    pub allocated_total: Decimal,
    /// Monthly amount not yet assigned to a project
    pub unallocated: Decimal,
}

impl From<&Income> for IncomeResponse {
    fn from(income: &Income) -> Self {
        let allocated_total = income.allocated_total();
        Self {
            id: income.id,
            name: income.name.clone(),
            monthly_amount: income.monthly_amount,
            kind: income.kind.clone(),
            regular: income.regular,
            owner: income.owner.clone(),
            available_from: income.available_from,
            created_by: income.created_by.clone(),
            updated_by: income.updated_by.clone(),
            created_at: income.created_at,
            updated_at: income.updated_at,
            allocations: income.allocations.clone(),
            allocated_total,
            unallocated: income.monthly_amount - allocated_total,
        }
    }
}

fn validate_income(
    lists: &model::entities::config::ListsConfig,
    request: &CreateIncomeRequest,
) -> Result<(), ApiError> {
    if !lists.has_income_kind(&request.kind) {
        warn!(kind = %request.kind, "rejected income with unknown kind");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "unknown_list_value",
            PlanError::UnknownListValue {
                list: "income kind",
                value: request.kind.clone(),
            }
            .to_string(),
        ));
    }
    if request.monthly_amount < Decimal::ZERO {
        warn!("rejected income with negative monthly amount");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "negative_amount",
            "Monthly amount must not be negative",
        ));
    }
    Ok(())
}

fn draft_from(request: CreateIncomeRequest) -> IncomeDraft {
    let author = request.author.unwrap_or_else(|| request.owner.clone());
    IncomeDraft {
        name: request.name,
        monthly_amount: request.monthly_amount,
        kind: request.kind,
        regular: request.regular,
        owner: request.owner,
        available_from: request.available_from,
        author,
    }
}

/// Create a new income
#[utoipa::path(
    post,
    path = "/api/v1/incomes",
    tag = "incomes",
    request_body = CreateIncomeRequest,
    responses(
        (status = 201, description = "Income created successfully", body = ApiResponse<IncomeResponse>),
        (status = 400, description = "Invalid request", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_income(
    State(state): State<AppState>,
    Json(request): Json<CreateIncomeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IncomeResponse>>), ApiError> {
    trace!("Entering create_income function");
    debug!(name = %request.name, kind = %request.kind, "creating income");

    let mut plan = state.plan.write().await;
    validate_income(&plan.config.lists, &request)?;

    let now = Utc::now().naive_utc();
    let id = plan.add_income(draft_from(request), now);
    state.cache.invalidate_all();

    let income = plan
        .income(id)
        .ok_or_else(|| api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "Income vanished after insert"))?;
    info!(id, name = %income.name, "income created successfully");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: IncomeResponse::from(income),
            message: "Income created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all incomes
#[utoipa::path(
    get,
    path = "/api/v1/incomes",
    tag = "incomes",
    responses(
        (status = 200, description = "Incomes retrieved successfully", body = ApiResponse<Vec<IncomeResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_incomes(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<IncomeResponse>>>, ApiError> {
    trace!("Entering get_incomes function");

    let plan = state.plan.read().await;
    let incomes: Vec<IncomeResponse> = plan.incomes.iter().map(IncomeResponse::from).collect();

    debug!(count = incomes.len(), "retrieved incomes");
    Ok(Json(ApiResponse {
        data: incomes,
        message: "Incomes retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific income by ID
#[utoipa::path(
    get,
    path = "/api/v1/incomes/{income_id}",
    tag = "incomes",
    params(
        ("income_id" = i32, Path, description = "Income ID"),
    ),
    responses(
        (status = 200, description = "Income retrieved successfully", body = ApiResponse<IncomeResponse>),
        (status = 404, description = "Income not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_income(
    Path(income_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<IncomeResponse>>, ApiError> {
    trace!("Entering get_income function for income_id: {}", income_id);

    let plan = state.plan.read().await;
    match plan.income(income_id) {
        Some(income) => Ok(Json(ApiResponse {
            data: IncomeResponse::from(income),
            message: "Income retrieved successfully".to_string(),
            success: true,
        })),
        None => {
            warn!(income_id, "income not found");
            Err(api_error(
                StatusCode::NOT_FOUND,
                "not_found",
                PlanError::IncomeNotFound(income_id).to_string(),
            ))
        }
    }
}

/// Update an income (full-field update)
#[utoipa::path(
    put,
    path = "/api/v1/incomes/{income_id}",
    tag = "incomes",
    params(
        ("income_id" = i32, Path, description = "Income ID"),
    ),
    request_body = CreateIncomeRequest,
    responses(
        (status = 200, description = "Income updated successfully", body = ApiResponse<IncomeResponse>),
        (status = 400, description = "Invalid request", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Income not found", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Monthly amount below the allocated total", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_income(
    Path(income_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateIncomeRequest>,
) -> Result<Json<ApiResponse<IncomeResponse>>, ApiError> {
    trace!("Entering update_income function for income_id: {}", income_id);

    let mut plan = state.plan.write().await;
    validate_income(&plan.config.lists, &request)?;

    let Some(income) = plan.income(income_id) else {
        warn!(income_id, "income not found for update");
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            PlanError::IncomeNotFound(income_id).to_string(),
        ));
    };

    // The current split must still fit under the edited monthly amount;
    // shrinking below it would leave the stored allocations over-committed.
    let allocated = income.allocated_total();
    if request.monthly_amount < allocated {
        warn!(income_id, "rejected income edit below its allocated total");
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "over_allocation",
            PlanError::OverAllocation {
                requested: allocated,
                available: request.monthly_amount,
            }
            .to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    plan.update_income(income_id, draft_from(request), now);
    state.cache.invalidate_all();

    let income = plan
        .income(income_id)
        .ok_or_else(|| api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "Income vanished after update"))?;
    info!(income_id, "income updated successfully");

    Ok(Json(ApiResponse {
        data: IncomeResponse::from(income),
        message: "Income updated successfully".to_string(),
        success: true,
    }))
}

/// Delete an income
///
/// Project-side allocation records keep their income-name snapshot and are
/// resolved leniently afterwards.
#[utoipa::path(
    delete,
    path = "/api/v1/incomes/{income_id}",
    tag = "incomes",
    params(
        ("income_id" = i32, Path, description = "Income ID"),
    ),
    responses(
        (status = 200, description = "Income deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Income not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_income(
    Path(income_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_income function for income_id: {}", income_id);

    let mut plan = state.plan.write().await;
    if !plan.remove_income(income_id) {
        warn!(income_id, "income not found for deletion");
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            PlanError::IncomeNotFound(income_id).to_string(),
        ));
    }
    state.cache.invalidate_all();

    info!(income_id, "income deleted successfully");
    Ok(Json(ApiResponse {
        data: format!("Income {} deleted", income_id),
        message: "Income deleted successfully".to_string(),
        success: true,
    }))
}
