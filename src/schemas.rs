use axum::http::StatusCode;
use axum::response::Json;
use chrono::NaiveDate;
use common::KpiSummary;
use model::store::PlanData;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// The whole plan, owned by the process. Mutating handlers hold the write
    /// lock for the full operation so every mutation is atomic to callers.
    pub plan: Arc<RwLock<PlanData>>,
    /// Cache for computed KPI summaries, invalidated on any mutation.
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Kpis(KpiSummary),
}

/// Query parameters for the KPI endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct KpiQuery {
    /// Restrict to items created in this year (omit for all years)
    pub year: Option<i32>,
    /// Restrict to items active in this month, 1-12 (omit for all months)
    pub month: Option<u32>,
    /// Reference date; defaults to today
    pub as_of: Option<NaiveDate>,
}

/// Query parameter selecting the reference date for derived project fields
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct AsOfQuery {
    /// Reference date for progress, health and scoring; defaults to today
    pub as_of: Option<NaiveDate>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Error shape returned by handlers: a status code plus a body the caller can
/// surface directly.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(code, error)))
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of projects in the store
    pub projects: usize,
    /// Number of incomes in the store
    pub incomes: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::projects::create_project,
        crate::handlers::projects::get_projects,
        crate::handlers::projects::get_project,
        crate::handlers::projects::update_project,
        crate::handlers::projects::delete_project,
        crate::handlers::tracking::upsert_tracking_entry,
        crate::handlers::advice::get_project_advice,
        crate::handlers::incomes::create_income,
        crate::handlers::incomes::get_incomes,
        crate::handlers::incomes::get_income,
        crate::handlers::incomes::update_income,
        crate::handlers::incomes::delete_income,
        crate::handlers::allocations::allocate_income,
        crate::handlers::allocations::get_project_allocations,
        crate::handlers::kpis::get_kpis,
        crate::handlers::settings::get_config,
        crate::handlers::settings::update_config,
        crate::handlers::backup::export_backup,
        crate::handlers::backup::import_backup,
        crate::handlers::export::projects_csv,
        crate::handlers::export::incomes_csv,
        crate::handlers::export::kpis_csv,
        crate::handlers::export::tracking_csv,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            KpiQuery,
            AsOfQuery,
            KpiSummary,
            common::Phase,
            model::entities::project::Project,
            model::entities::project::TrackingEntry,
            model::entities::project::ReceivedAllocation,
            model::entities::income::Income,
            model::entities::income::AllocationEntry,
            model::entities::config::AdminConfig,
            model::entities::config::KpiTargets,
            model::entities::config::ListsConfig,
            model::store::BackupDocument,
            crate::handlers::projects::CreateProjectRequest,
            crate::handlers::projects::ProjectResponse,
            crate::handlers::projects::ProjectHealth,
            crate::handlers::tracking::TrackingRequest,
            crate::handlers::advice::AdviceResponse,
            crate::handlers::advice::MentorAdvice,
            crate::handlers::incomes::CreateIncomeRequest,
            crate::handlers::incomes::IncomeResponse,
            crate::handlers::allocations::AllocateRequest,
            crate::handlers::allocations::AllocationEntryRequest,
            crate::handlers::allocations::AllocationResult,
            crate::handlers::allocations::ReceivedAllocationView,
            crate::handlers::backup::ImportSummary,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "projects", description = "Project ledger endpoints"),
        (name = "incomes", description = "Income endpoints"),
        (name = "allocations", description = "Income-to-project allocation endpoints"),
        (name = "advice", description = "Mentor advice endpoints"),
        (name = "kpis", description = "KPI aggregation endpoints"),
        (name = "config", description = "Admin configuration endpoints"),
        (name = "backup", description = "Backup import/export endpoints"),
        (name = "export", description = "CSV spreadsheet export endpoints"),
    ),
    info(
        title = "FamPlan API",
        description = "Family financial plan API - project ledger, income allocation and KPI dashboard backend",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
