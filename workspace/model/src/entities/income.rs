use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One slice of an income's monthly amount assigned to a project.
///
/// The project id is a weak reference; the project may no longer exist and
/// readers resolve it leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AllocationEntry {
    pub project_id: i32,
    pub amount: Decimal,
    pub month: String,
}

/// A recurring or variable monthly inflow that can be split across projects.
///
/// Invariant: the sum of `allocations[*].amount` never exceeds
/// `monthly_amount`; the allocator rejects violating splits outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Income {
    pub id: i32,
    pub name: String,
    pub monthly_amount: Decimal,
    /// Tagged income kind string validated against the configured list.
    pub kind: String,
    /// True for predictable incomes, false for variable ones.
    pub regular: bool,
    pub owner: String,
    /// Date from which the income is available; used by the period filter.
    pub available_from: NaiveDate,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Current split of the monthly amount, replaced atomically on allocation.
    #[serde(default)]
    pub allocations: Vec<AllocationEntry>,
}

impl Income {
    /// Sum of the currently allocated amounts.
    pub fn allocated_total(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}
