//! Optional year/month visibility filter applied to both collections before
//! KPI aggregation.

use chrono::{Datelike, NaiveDate};
use model::entities::income::Income;
use model::entities::project::Project;

/// Year and/or month restriction; `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl PeriodFilter {
    pub fn is_all(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    /// Visibility of a span under this filter.
    ///
    /// The year filter matches the span's start year. The month filter only
    /// applies when start and end fall in the same year; spans crossing a
    /// year boundary are visible in any month.
    fn span_visible(&self, start: NaiveDate, end: NaiveDate) -> bool {
        if let Some(year) = self.year {
            if start.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if start.year() == end.year() {
                return (start.month()..=end.month()).contains(&month);
            }
        }
        true
    }

    /// A project spans from its creation date to its due date.
    pub fn project_visible(&self, project: &Project) -> bool {
        self.span_visible(project.created_at.date(), project.due_date)
    }

    /// An income spans from its availability date until today; it stays in
    /// scope as long as it keeps paying out.
    pub fn income_visible(&self, income: &Income, today: NaiveDate) -> bool {
        self.span_visible(income.available_from, today)
    }
}

/// Clones the projects visible under the filter.
pub fn filter_projects(projects: &[Project], filter: PeriodFilter) -> Vec<Project> {
    if filter.is_all() {
        return projects.to_vec();
    }
    projects.iter().filter(|p| filter.project_visible(p)).cloned().collect()
}

/// Clones the incomes visible under the filter.
pub fn filter_incomes(incomes: &[Income], filter: PeriodFilter, today: NaiveDate) -> Vec<Income> {
    if filter.is_all() {
        return incomes.to_vec();
    }
    incomes.iter().filter(|i| filter.income_visible(i, today)).cloned().collect()
}
