//! Reduces the project and income collections into the dashboard's summary
//! figures. Pure function of its inputs; no side effects.

use common::{KpiSummary, Phase};
use model::entities::config::{
    CATEGORY_EDUCATION, CATEGORY_GENERATING_ASSET, CATEGORY_LIABILITY,
};
use model::entities::income::Income;
use model::entities::project::Project;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

fn pct(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    (numerator / denominator * Decimal::from(100)).to_f64().unwrap_or(0.0)
}

/// Computes the KPI summary for the collections in scope.
///
/// The phase conditions are checked in a fixed order: Stabilization, then
/// Transition, then Expansion. They are not mutually exclusive by
/// construction, so the guard ordering is load-bearing.
pub fn summarize(projects: &[Project], incomes: &[Income]) -> KpiSummary {
    let total_monthly_income: Decimal = incomes.iter().map(|i| i.monthly_amount).sum();
    let monthly_cash_flow: Decimal = projects.iter().map(|p| p.monthly_cash_flow).sum();

    let budget_of = |category: &str| -> Decimal {
        projects
            .iter()
            .filter(|p| p.category == category)
            .map(|p| p.total_budget)
            .sum()
    };
    let total_generating_assets = budget_of(CATEGORY_GENERATING_ASSET);
    let total_liabilities = budget_of(CATEGORY_LIABILITY);
    let total_education = budget_of(CATEGORY_EDUCATION);
    let total_global = total_generating_assets + total_liabilities + total_education;

    let asset_ratio_pct = pct(total_generating_assets, total_global);

    let passive_income: Decimal = projects
        .iter()
        .filter(|p| p.category == CATEGORY_GENERATING_ASSET && p.monthly_cash_flow > Decimal::ZERO)
        .map(|p| p.monthly_cash_flow)
        .sum();
    let passive_income_pct = pct(passive_income, total_monthly_income);

    let generating_asset_count = projects
        .iter()
        .filter(|p| p.category == CATEGORY_GENERATING_ASSET)
        .count();

    let monthly_expenses: Decimal = -projects
        .iter()
        .map(|p| p.monthly_cash_flow)
        .filter(|cf| *cf < Decimal::ZERO)
        .sum::<Decimal>();

    let phase = if monthly_cash_flow < Decimal::ZERO || passive_income_pct < 10.0 {
        Phase::Stabilization
    } else if monthly_cash_flow >= Decimal::ZERO
        && (10.0..30.0).contains(&passive_income_pct)
    {
        Phase::Transition
    } else {
        Phase::Expansion
    };

    KpiSummary {
        total_monthly_income,
        monthly_cash_flow,
        total_generating_assets,
        total_liabilities,
        total_education,
        asset_ratio_pct,
        passive_income_pct,
        generating_asset_count,
        monthly_expenses,
        emergency_fund_months: 0,
        baby_step: 1,
        phase,
    }
}
