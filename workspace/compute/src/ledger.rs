//! Read-only derived views over projects plus the tracking-history mutator.
//!
//! The categorization buckets and the success-probability weights reproduce
//! the dashboard's heuristics exactly; they are scoring rules, not a model,
//! and must not be tuned here.

use chrono::{NaiveDate, NaiveDateTime};
use model::entities::project::{Project, TrackingEntry};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::error::{PlanError, Result};

/// Mutually exclusive project health states, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBucket {
    Overdue,
    AtRisk,
    Ahead,
    BudgetExhausted,
    OnTrack,
}

impl HealthBucket {
    /// Stable identifier; the only semantically load-bearing part.
    pub fn slug(&self) -> &'static str {
        match self {
            HealthBucket::Overdue => "overdue",
            HealthBucket::AtRisk => "at-risk",
            HealthBucket::Ahead => "ahead",
            HealthBucket::BudgetExhausted => "budget-exhausted",
            HealthBucket::OnTrack => "on-track",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBucket::Overdue => "Overdue",
            HealthBucket::AtRisk => "At risk",
            HealthBucket::Ahead => "Ahead",
            HealthBucket::BudgetExhausted => "Budget exhausted",
            HealthBucket::OnTrack => "On track",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            HealthBucket::Overdue => "#ff4444",
            HealthBucket::AtRisk => "#ff8800",
            HealthBucket::Ahead => "#00aa00",
            HealthBucket::BudgetExhausted => "#666666",
            HealthBucket::OnTrack => "#007bff",
        }
    }
}

/// Budget progress in percent; defined as 0 when the total budget is 0.
pub fn progress_pct(project: &Project) -> f64 {
    if project.total_budget.is_zero() {
        return 0.0;
    }
    (project.amount_used / project.total_budget * Decimal::from(100))
        .to_f64()
        .unwrap_or(0.0)
}

/// Days between today and the due date; negative once overdue.
pub fn days_remaining(project: &Project, today: NaiveDate) -> i64 {
    (project.due_date - today).num_days()
}

/// Sorts a project into one of the five health buckets.
///
/// Rules are evaluated in precedence order and the first match wins: an
/// overdue project stays `Overdue` no matter how far along it is.
pub fn categorize(project: &Project, today: NaiveDate) -> HealthBucket {
    let progress = progress_pct(project);
    let days = days_remaining(project, today);

    if project.due_date < today {
        HealthBucket::Overdue
    } else if days <= 30 && progress < 70.0 {
        HealthBucket::AtRisk
    } else if progress > 90.0 {
        HealthBucket::Ahead
    } else if !project.total_budget.is_zero() && project.amount_used >= project.total_budget {
        // Zero-budget projects fall through to OnTrack instead.
        HealthBucket::BudgetExhausted
    } else {
        HealthBucket::OnTrack
    }
}

/// Trailing average of actual spend over the 3 most recent tracking months.
///
/// Returns 0 with fewer than 2 entries; a single month is not meaningful
/// history.
pub fn monthly_velocity(project: &Project) -> Decimal {
    if project.monthly_tracking.len() < 2 {
        return Decimal::ZERO;
    }

    let mut entries: Vec<&TrackingEntry> = project.monthly_tracking.iter().collect();
    entries.sort_by(|a, b| a.month.cmp(&b.month));
    let recent = &entries[entries.len().saturating_sub(3)..];

    let total: Decimal = recent.iter().map(|e| e.actual).sum();
    total / Decimal::from(recent.len())
}

/// Heuristic success score in [0, 100].
///
/// Base 50, adjusted by progress, schedule slack and velocity bands. The
/// progress bands are not exhaustive: values in [10, 50] get no adjustment.
pub fn success_probability(project: &Project, today: NaiveDate) -> u8 {
    let progress = progress_pct(project);
    let days = days_remaining(project, today);
    let velocity = monthly_velocity(project);

    let mut score: i32 = 50;

    if progress > 75.0 {
        score += 20;
    } else if progress > 50.0 {
        score += 10;
    } else if progress < 10.0 {
        score -= 20;
    }

    if days > 90 {
        score += 15;
    } else if days < 30 {
        score -= 25;
    }

    if velocity > project.monthly_allocation * Decimal::new(8, 1) {
        score += 15;
    } else if velocity < project.monthly_allocation * Decimal::new(3, 1) {
        score -= 15;
    }

    score.clamp(0, 100) as u8
}

/// Upserts one month of tracking and re-derives the used amount.
///
/// An existing entry for the month is overwritten, otherwise the month is
/// appended. `amount_used` is recomputed as the sum of all actual values;
/// this is the single source of truth for used amount once tracking exists.
pub fn add_tracking_entry(
    project: &mut Project,
    month: &str,
    planned: Decimal,
    actual: Decimal,
    now: NaiveDateTime,
) -> Result<()> {
    if !common::is_month_key(month) {
        return Err(PlanError::InvalidMonthKey(month.to_string()));
    }

    match project.monthly_tracking.iter_mut().find(|e| e.month == month) {
        Some(entry) => {
            debug!(project = project.id, month, "overwriting tracking entry");
            entry.planned = planned;
            entry.actual = actual;
        }
        None => {
            debug!(project = project.id, month, "appending tracking entry");
            project.monthly_tracking.push(TrackingEntry {
                month: month.to_string(),
                planned,
                actual,
            });
        }
    }

    project.amount_used = project.monthly_tracking.iter().map(|e| e.actual).sum();
    project.updated_at = now;
    Ok(())
}
