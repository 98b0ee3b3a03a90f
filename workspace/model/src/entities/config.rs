use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Built-in project categories. The list is user-extensible at runtime but the
/// KPI aggregator groups on these three.
pub const CATEGORY_GENERATING_ASSET: &str = "Generating asset";
pub const CATEGORY_LIABILITY: &str = "Liability";
pub const CATEGORY_EDUCATION: &str = "Education investment";

/// Household KPI objectives shown next to the computed figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KpiTargets {
    pub cash_flow_target: Decimal,
    pub asset_ratio_target_pct: f64,
    pub passive_income_target_pct: f64,
    pub emergency_fund_target_months: u32,
}

impl Default for KpiTargets {
    fn default() -> Self {
        Self {
            cash_flow_target: Decimal::from(500_000),
            asset_ratio_target_pct: 40.0,
            passive_income_target_pct: 30.0,
            emergency_fund_target_months: 6,
        }
    }
}

/// Runtime-configurable sets of allowed tagged-string values.
///
/// The admin surface can add and remove values, so these are open lists rather
/// than compile-time enums; membership is checked at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListsConfig {
    pub project_categories: Vec<String>,
    pub project_statuses: Vec<String>,
    pub priorities: Vec<String>,
    pub income_kinds: Vec<String>,
    pub owners: Vec<String>,
}

impl ListsConfig {
    pub fn has_category(&self, value: &str) -> bool {
        self.project_categories.iter().any(|v| v == value)
    }

    pub fn has_status(&self, value: &str) -> bool {
        self.project_statuses.iter().any(|v| v == value)
    }

    pub fn has_priority(&self, value: &str) -> bool {
        self.priorities.iter().any(|v| v == value)
    }

    pub fn has_income_kind(&self, value: &str) -> bool {
        self.income_kinds.iter().any(|v| v == value)
    }
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            project_categories: vec![
                CATEGORY_GENERATING_ASSET.to_string(),
                CATEGORY_LIABILITY.to_string(),
                CATEGORY_EDUCATION.to_string(),
            ],
            project_statuses: vec![
                "Planned".to_string(),
                "In progress".to_string(),
                "In development".to_string(),
                "Completed".to_string(),
                "Suspended".to_string(),
            ],
            priorities: vec![
                "Critical".to_string(),
                "High".to_string(),
                "Medium".to_string(),
                "Low".to_string(),
            ],
            income_kinds: vec![
                "Salary".to_string(),
                "Business".to_string(),
                "Rent".to_string(),
                "Investment".to_string(),
                "Savings".to_string(),
                "Other".to_string(),
            ],
            owners: vec!["Alix".to_string(), "William".to_string(), "Family".to_string()],
        }
    }
}

/// Admin configuration: KPI objectives, allowed-value lists and the mentor
/// advice snippets keyed by mentor then project category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdminConfig {
    pub kpi_targets: KpiTargets,
    pub lists: ListsConfig,
    pub mentor_advice: BTreeMap<String, BTreeMap<String, String>>,
    pub education_module_active: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            kpi_targets: KpiTargets::default(),
            lists: ListsConfig::default(),
            mentor_advice: default_mentor_advice(),
            education_module_active: false,
        }
    }
}

fn default_mentor_advice() -> BTreeMap<String, BTreeMap<String, String>> {
    let mut advice = BTreeMap::new();

    advice.insert(
        "Kiyosaki".to_string(),
        BTreeMap::from([
            (
                CATEGORY_GENERATING_ASSET.to_string(),
                "Excellent! This asset produces passive income and moves you toward the investor quadrant.".to_string(),
            ),
            (
                CATEGORY_LIABILITY.to_string(),
                "This liability takes money out of your pocket. Is it really necessary?".to_string(),
            ),
            (
                CATEGORY_EDUCATION.to_string(),
                "Education is an asset that produces higher future income.".to_string(),
            ),
        ]),
    );
    advice.insert(
        "Buffett".to_string(),
        BTreeMap::from([
            (
                CATEGORY_GENERATING_ASSET.to_string(),
                "Make sure you fully understand this business and its long-term potential.".to_string(),
            ),
            (
                CATEGORY_LIABILITY.to_string(),
                "What is the opportunity cost? Could this money be invested better?".to_string(),
            ),
            (
                CATEGORY_EDUCATION.to_string(),
                "The best investment is in yourself and your family.".to_string(),
            ),
        ]),
    );
    advice.insert(
        "Ramsey".to_string(),
        BTreeMap::from([
            (
                CATEGORY_GENERATING_ASSET.to_string(),
                "If this project does not over-leverage you, it is excellent for your independence.".to_string(),
            ),
            (
                CATEGORY_LIABILITY.to_string(),
                "Check that this spending fits your 50/30/20 budget.".to_string(),
            ),
            (
                CATEGORY_EDUCATION.to_string(),
                "Education always pays off in the long run.".to_string(),
            ),
        ]),
    );

    advice
}
