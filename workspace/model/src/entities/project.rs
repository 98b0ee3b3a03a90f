use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One month of planned-versus-actual tracking.
///
/// Month keys are `YYYY-MM` strings, unique within a project; plain string
/// ordering is chronological ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrackingEntry {
    pub month: String,
    pub planned: Decimal,
    pub actual: Decimal,
}

/// Denormalized record of an inbound income allocation.
///
/// The income name is a snapshot taken at allocation time. The income id is a
/// weak reference: the income may be deleted later and readers must fall back
/// to the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReceivedAllocation {
    pub income_id: i32,
    pub income_name: String,
    pub amount: Decimal,
    pub month: String,
    pub allocated_at: NaiveDateTime,
}

/// A tracked financial initiative: a generating asset, a liability or an
/// education investment, with a budget, a schedule and a monthly tracking
/// history.
///
/// `category`, `status` and `priority` are tagged strings validated against
/// the configured lists at the boundary; the lists are user-extensible at
/// runtime so they are not closed enums here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub category: String,
    /// Total budget; never negative.
    pub total_budget: Decimal,
    /// Planned monthly allocation.
    pub monthly_allocation: Decimal,
    /// Amount spent so far. Derived from the tracking history whenever
    /// tracking entries exist; directly editable only while tracking is empty.
    pub amount_used: Decimal,
    /// Estimated monthly cash flow; negative for money leaving the pocket.
    pub monthly_cash_flow: Decimal,
    pub status: String,
    pub due_date: NaiveDate,
    pub expected_roi_pct: f64,
    pub priority: String,
    pub description: String,
    /// Free-text reference to the income or source funding this project.
    pub funding_source: String,
    pub owner: String,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Ordered-by-month tracking history, one entry per month key.
    #[serde(default)]
    pub monthly_tracking: Vec<TrackingEntry>,
    /// Append-only history of allocations received from incomes.
    #[serde(default)]
    pub allocations_received: Vec<ReceivedAllocation>,
}
