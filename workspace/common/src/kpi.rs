use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Coarse classification of the household's overall financial health.
///
/// The three phases are checked in a fixed order by the aggregator because the
/// conditions are not mutually exclusive in every edge case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Phase {
    Stabilization,
    Transition,
    Expansion,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Stabilization => write!(f, "Stabilization"),
            Phase::Transition => write!(f, "Transition"),
            Phase::Expansion => write!(f, "Expansion"),
        }
    }
}

/// Summary figures reduced from the project and income collections.
///
/// Produced by the compute crate and served as-is by the KPI endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KpiSummary {
    /// Sum of monthly amounts over all incomes in scope.
    pub total_monthly_income: Decimal,
    /// Sum of monthly cash flow over all projects in scope; may be negative.
    pub monthly_cash_flow: Decimal,
    /// Total budget of generating-asset projects.
    pub total_generating_assets: Decimal,
    /// Total budget of liability projects.
    pub total_liabilities: Decimal,
    /// Total budget of education-investment projects.
    pub total_education: Decimal,
    /// Generating-asset share of the combined category totals, in percent.
    pub asset_ratio_pct: f64,
    /// Positive generating-asset cash flow relative to total income, in percent.
    pub passive_income_pct: f64,
    /// Number of generating-asset projects in scope.
    pub generating_asset_count: usize,
    /// Absolute value of the summed negative cash flows.
    pub monthly_expenses: Decimal,
    /// Months of expenses covered by the emergency fund (not yet tracked).
    pub emergency_fund_months: u32,
    /// Current Ramsey baby step (not yet tracked).
    pub baby_step: u8,
    pub phase: Phase,
}
