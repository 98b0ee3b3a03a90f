//! Splits an income's monthly amount across projects and keeps both sides of
//! the relationship consistent.

use chrono::NaiveDateTime;
use model::entities::income::AllocationEntry;
use model::entities::project::ReceivedAllocation;
use model::store::PlanData;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{PlanError, Result};

/// Outcome of a successful allocation call.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    /// Projects that received an allocation record.
    pub applied: usize,
    /// Entry project ids that did not resolve and were skipped.
    pub skipped_projects: Vec<i32>,
    pub message: String,
}

/// Replaces an income's allocation split and mirrors it onto the projects.
///
/// The entry list is the complete desired split for the income: this call
/// replaces the prior state, it does not append to it. Validation happens
/// before any mutation, so a rejected call leaves the store untouched.
///
/// Entries whose project id does not resolve are skipped on the project side
/// with a warning; that inconsistency is tolerated rather than failing the
/// whole call. The income side is written first.
pub fn allocate(
    data: &mut PlanData,
    income_id: i32,
    entries: Vec<AllocationEntry>,
    now: NaiveDateTime,
) -> Result<AllocationOutcome> {
    let Some(income) = data.income(income_id) else {
        return Err(PlanError::IncomeNotFound(income_id));
    };

    let requested: Decimal = entries.iter().map(|e| e.amount).sum();
    if requested > income.monthly_amount {
        return Err(PlanError::OverAllocation {
            requested,
            available: income.monthly_amount,
        });
    }

    let income_name = income.name.clone();
    debug!(
        income_id,
        entries = entries.len(),
        %requested,
        "applying allocation split"
    );

    // Income side first; the project side mirrors it below.
    {
        let income = data
            .income_mut(income_id)
            .ok_or(PlanError::IncomeNotFound(income_id))?;
        income.allocations = entries.clone();
        income.updated_at = now;
    }

    let mut applied = 0;
    let mut skipped_projects = Vec::new();
    for entry in &entries {
        match data.project_mut(entry.project_id) {
            Some(project) => {
                project.allocations_received.push(ReceivedAllocation {
                    income_id,
                    income_name: income_name.clone(),
                    amount: entry.amount,
                    month: entry.month.clone(),
                    allocated_at: now,
                });
                project.updated_at = now;
                applied += 1;
            }
            None => {
                warn!(
                    income_id,
                    project_id = entry.project_id,
                    "allocation references a missing project; skipping project side"
                );
                skipped_projects.push(entry.project_id);
            }
        }
    }

    Ok(AllocationOutcome {
        applied,
        skipped_projects,
        message: "Allocation applied successfully".to_string(),
    })
}
