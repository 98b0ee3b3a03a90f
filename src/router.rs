use crate::handlers::{
    advice::get_project_advice,
    allocations::{allocate_income, get_project_allocations},
    backup::{export_backup, import_backup},
    export::{incomes_csv, kpis_csv, projects_csv, tracking_csv},
    health::health_check,
    incomes::{create_income, delete_income, get_income, get_incomes, update_income},
    kpis::get_kpis,
    projects::{create_project, delete_project, get_project, get_projects, update_project},
    settings::{get_config, update_config},
    tracking::upsert_tracking_entry,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Project CRUD routes
        .route("/api/v1/projects", post(create_project))
        .route("/api/v1/projects", get(get_projects))
        .route("/api/v1/projects/:project_id", get(get_project))
        .route("/api/v1/projects/:project_id", put(update_project))
        .route("/api/v1/projects/:project_id", delete(delete_project))
        // Monthly tracking and per-project views
        .route(
            "/api/v1/projects/:project_id/tracking",
            put(upsert_tracking_entry),
        )
        .route(
            "/api/v1/projects/:project_id/allocations",
            get(get_project_allocations),
        )
        .route("/api/v1/projects/:project_id/advice", get(get_project_advice))
        // Income CRUD routes
        .route("/api/v1/incomes", post(create_income))
        .route("/api/v1/incomes", get(get_incomes))
        .route("/api/v1/incomes/:income_id", get(get_income))
        .route("/api/v1/incomes/:income_id", put(update_income))
        .route("/api/v1/incomes/:income_id", delete(delete_income))
        .route(
            "/api/v1/incomes/:income_id/allocations",
            put(allocate_income),
        )
        // Aggregates and configuration
        .route("/api/v1/kpis", get(get_kpis))
        .route("/api/v1/config", get(get_config))
        .route("/api/v1/config", put(update_config))
        // Backup and spreadsheet exports
        .route("/api/v1/backup", get(export_backup))
        .route("/api/v1/backup", post(import_backup))
        .route("/api/v1/export/projects.csv", get(projects_csv))
        .route("/api/v1/export/incomes.csv", get(incomes_csv))
        .route("/api/v1/export/kpis.csv", get(kpis_csv))
        .route("/api/v1/export/tracking.csv", get(tracking_csv))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
