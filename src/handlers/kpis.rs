use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::Utc;
use common::KpiSummary;
use compute::kpi;
use compute::period::{self, PeriodFilter};
use tracing::{debug, instrument, trace};

use crate::schemas::{ApiError, ApiResponse, AppState, CachedData, KpiQuery};

/// Get the dashboard KPI summary
///
/// Optional year/month filters restrict the aggregation to items active in
/// that period. Results are cached until the next mutation.
#[utoipa::path(
    get,
    path = "/api/v1/kpis",
    tag = "kpis",
    params(KpiQuery),
    responses(
        (status = 200, description = "KPI summary computed successfully", body = ApiResponse<KpiSummary>)
    )
)]
#[instrument(skip(state))]
pub async fn get_kpis(
    Query(query): Query<KpiQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<KpiSummary>>, ApiError> {
    trace!("Entering get_kpis function");

    let today = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let cache_key = format!(
        "kpis:{}:{}:{}",
        query.year.map_or_else(|| "all".to_string(), |y| y.to_string()),
        query.month.map_or_else(|| "all".to_string(), |m| m.to_string()),
        today,
    );

    if let Some(CachedData::Kpis(summary)) = state.cache.get(&cache_key).await {
        debug!(cache_key, "returning cached KPI summary");
        return Ok(Json(ApiResponse {
            data: summary,
            message: "KPI summary computed successfully".to_string(),
            success: true,
        }));
    }

    let plan = state.plan.read().await;
    let filter = PeriodFilter {
        year: query.year,
        month: query.month,
    };
    let projects = period::filter_projects(&plan.projects, filter);
    let incomes = period::filter_incomes(&plan.incomes, filter, today);
    drop(plan);

    let summary = kpi::summarize(&projects, &incomes);
    debug!(
        projects = projects.len(),
        incomes = incomes.len(),
        phase = %summary.phase,
        "computed KPI summary"
    );

    state
        .cache
        .insert(cache_key, CachedData::Kpis(summary.clone()))
        .await;

    Ok(Json(ApiResponse {
        data: summary,
        message: "KPI summary computed successfully".to_string(),
        success: true,
    }))
}
