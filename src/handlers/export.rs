use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use compute::{kpi, ledger};
use tracing::{debug, instrument, trace};

use crate::schemas::{api_error, ApiError, AppState, AsOfQuery};

fn csv_response(filename: &str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

fn csv_error(err: csv::Error) -> ApiError {
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "serialization",
        format!("Failed to write CSV: {}", err),
    )
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, ApiError> {
    writer.into_inner().map_err(|err| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "serialization",
            format!("Failed to finish CSV: {}", err),
        )
    })
}

/// Export the project ledger as a flat CSV sheet
#[utoipa::path(
    get,
    path = "/api/v1/export/projects.csv",
    tag = "export",
    params(AsOfQuery),
    responses(
        (status = 200, description = "Projects CSV", content_type = "text/csv")
    )
)]
#[instrument(skip(state))]
pub async fn projects_csv(
    Query(query): Query<AsOfQuery>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    trace!("Entering projects_csv function");

    let today = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let plan = state.plan.read().await;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "id",
            "name",
            "category",
            "status",
            "priority",
            "owner",
            "total_budget",
            "amount_used",
            "monthly_allocation",
            "monthly_cash_flow",
            "progress_pct",
            "health",
            "days_remaining",
            "success_probability",
            "due_date",
        ])
        .map_err(csv_error)?;

    for project in &plan.projects {
        let health = ledger::categorize(project, today);
        writer
            .write_record([
                project.id.to_string(),
                project.name.clone(),
                project.category.clone(),
                project.status.clone(),
                project.priority.clone(),
                project.owner.clone(),
                project.total_budget.to_string(),
                project.amount_used.to_string(),
                project.monthly_allocation.to_string(),
                project.monthly_cash_flow.to_string(),
                format!("{:.1}", ledger::progress_pct(project)),
                health.label().to_string(),
                ledger::days_remaining(project, today).to_string(),
                ledger::success_probability(project, today).to_string(),
                project.due_date.to_string(),
            ])
            .map_err(csv_error)?;
    }

    debug!(rows = plan.projects.len(), "exported projects CSV");
    Ok(csv_response("projects.csv", finish(writer)?))
}

/// Export incomes as a flat CSV sheet
#[utoipa::path(
    get,
    path = "/api/v1/export/incomes.csv",
    tag = "export",
    responses(
        (status = 200, description = "Incomes CSV", content_type = "text/csv")
    )
)]
#[instrument(skip(state))]
pub async fn incomes_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    trace!("Entering incomes_csv function");

    let plan = state.plan.read().await;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "id",
            "name",
            "kind",
            "regular",
            "owner",
            "monthly_amount",
            "allocated_total",
            "unallocated",
            "available_from",
        ])
        .map_err(csv_error)?;

    for income in &plan.incomes {
        let allocated = income.allocated_total();
        writer
            .write_record([
                income.id.to_string(),
                income.name.clone(),
                income.kind.clone(),
                income.regular.to_string(),
                income.owner.clone(),
                income.monthly_amount.to_string(),
                allocated.to_string(),
                (income.monthly_amount - allocated).to_string(),
                income.available_from.to_string(),
            ])
            .map_err(csv_error)?;
    }

    debug!(rows = plan.incomes.len(), "exported incomes CSV");
    Ok(csv_response("incomes.csv", finish(writer)?))
}

/// Export the KPI summary as a two-column CSV sheet
#[utoipa::path(
    get,
    path = "/api/v1/export/kpis.csv",
    tag = "export",
    responses(
        (status = 200, description = "KPI CSV", content_type = "text/csv")
    )
)]
#[instrument(skip(state))]
pub async fn kpis_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    trace!("Entering kpis_csv function");

    let plan = state.plan.read().await;
    let summary = kpi::summarize(&plan.projects, &plan.incomes);
    drop(plan);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["indicator", "value"]).map_err(csv_error)?;

    let rows: [(&str, String); 12] = [
        ("total_monthly_income", summary.total_monthly_income.to_string()),
        ("monthly_cash_flow", summary.monthly_cash_flow.to_string()),
        (
            "total_generating_assets",
            summary.total_generating_assets.to_string(),
        ),
        ("total_liabilities", summary.total_liabilities.to_string()),
        ("total_education", summary.total_education.to_string()),
        ("asset_ratio_pct", format!("{:.1}", summary.asset_ratio_pct)),
        (
            "passive_income_pct",
            format!("{:.1}", summary.passive_income_pct),
        ),
        (
            "generating_asset_count",
            summary.generating_asset_count.to_string(),
        ),
        ("monthly_expenses", summary.monthly_expenses.to_string()),
        (
            "emergency_fund_months",
            summary.emergency_fund_months.to_string(),
        ),
        ("baby_step", summary.baby_step.to_string()),
        ("phase", summary.phase.to_string()),
    ];
    for (indicator, value) in rows {
        writer
            .write_record([indicator, value.as_str()])
            .map_err(csv_error)?;
    }

    debug!("exported KPI CSV");
    Ok(csv_response("kpis.csv", finish(writer)?))
}

/// Export every project's monthly tracking as a flat CSV sheet
///
/// One row per tracking entry, with a variance column (actual minus planned).
#[utoipa::path(
    get,
    path = "/api/v1/export/tracking.csv",
    tag = "export",
    responses(
        (status = 200, description = "Tracking CSV", content_type = "text/csv")
    )
)]
#[instrument(skip(state))]
pub async fn tracking_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    trace!("Entering tracking_csv function");

    let plan = state.plan.read().await;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "project_id",
            "project_name",
            "month",
            "planned",
            "actual",
            "variance",
        ])
        .map_err(csv_error)?;

    let mut rows = 0usize;
    for project in &plan.projects {
        for entry in &project.monthly_tracking {
            writer
                .write_record([
                    project.id.to_string(),
                    project.name.clone(),
                    entry.month.clone(),
                    entry.planned.to_string(),
                    entry.actual.to_string(),
                    (entry.actual - entry.planned).to_string(),
                ])
                .map_err(csv_error)?;
            rows += 1;
        }
    }

    debug!(rows, "exported tracking CSV");
    Ok(csv_response("tracking.csv", finish(writer)?))
}
