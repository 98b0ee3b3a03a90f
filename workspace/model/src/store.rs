use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::entities::config::AdminConfig;
use crate::entities::income::Income;
use crate::entities::project::Project;

/// Root application store: every project, income and the admin configuration.
///
/// One value of this type is owned by the process and handed by reference to
/// the ledger, allocator and aggregator operations. Mutations run to
/// completion before the next operation; there is no finer-grained locking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanData {
    pub projects: Vec<Project>,
    pub incomes: Vec<Income>,
    pub config: AdminConfig,
}

/// Editable project fields as submitted by the create and full-field edit
/// operations. Identity, timestamps and the two collections are managed by
/// the store.
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub category: String,
    pub total_budget: Decimal,
    pub monthly_allocation: Decimal,
    pub amount_used: Decimal,
    pub monthly_cash_flow: Decimal,
    pub status: String,
    pub due_date: NaiveDate,
    pub expected_roi_pct: f64,
    pub priority: String,
    pub description: String,
    pub funding_source: String,
    pub owner: String,
    pub author: String,
}

/// Editable income fields, same contract as [`ProjectDraft`].
#[derive(Debug, Clone)]
pub struct IncomeDraft {
    pub name: String,
    pub monthly_amount: Decimal,
    pub kind: String,
    pub regular: bool,
    pub owner: String,
    pub available_from: NaiveDate,
    pub author: String,
}

/// Serialization contract for backup and restore.
///
/// The three top-level keys are independently optional on import: keys absent
/// from the document leave the corresponding collection untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BackupDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incomes: Option<Vec<Income>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<AdminConfig>,
}

impl PlanData {
    /// Next sequential project id: max existing id + 1, or 1 when empty.
    pub fn next_project_id(&self) -> i32 {
        self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Next sequential income id: max existing id + 1, or 1 when empty.
    pub fn next_income_id(&self) -> i32 {
        self.incomes.iter().map(|i| i.id).max().unwrap_or(0) + 1
    }

    pub fn project(&self, id: i32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: i32) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn income(&self, id: i32) -> Option<&Income> {
        self.incomes.iter().find(|i| i.id == id)
    }

    pub fn income_mut(&mut self, id: i32) -> Option<&mut Income> {
        self.incomes.iter_mut().find(|i| i.id == id)
    }

    /// Creates a project from a draft and returns its assigned id.
    pub fn add_project(&mut self, draft: ProjectDraft, now: NaiveDateTime) -> i32 {
        let id = self.next_project_id();
        debug!(id, name = %draft.name, "adding project");
        self.projects.push(Project {
            id,
            name: draft.name,
            category: draft.category,
            total_budget: draft.total_budget,
            monthly_allocation: draft.monthly_allocation,
            amount_used: draft.amount_used,
            monthly_cash_flow: draft.monthly_cash_flow,
            status: draft.status,
            due_date: draft.due_date,
            expected_roi_pct: draft.expected_roi_pct,
            priority: draft.priority,
            description: draft.description,
            funding_source: draft.funding_source,
            owner: draft.owner,
            created_by: draft.author.clone(),
            updated_by: draft.author,
            created_at: now,
            updated_at: now,
            monthly_tracking: Vec::new(),
            allocations_received: Vec::new(),
        });
        id
    }

    /// Full-field project update; returns false when the id does not resolve.
    ///
    /// `amount_used` stays derived from the tracking history whenever tracking
    /// entries exist; the drafted value only applies while tracking is empty.
    pub fn update_project(&mut self, id: i32, draft: ProjectDraft, now: NaiveDateTime) -> bool {
        let Some(project) = self.project_mut(id) else {
            return false;
        };
        debug!(id, name = %draft.name, "updating project");
        project.name = draft.name;
        project.category = draft.category;
        project.total_budget = draft.total_budget;
        project.monthly_allocation = draft.monthly_allocation;
        if project.monthly_tracking.is_empty() {
            project.amount_used = draft.amount_used;
        }
        project.monthly_cash_flow = draft.monthly_cash_flow;
        project.status = draft.status;
        project.due_date = draft.due_date;
        project.expected_roi_pct = draft.expected_roi_pct;
        project.priority = draft.priority;
        project.description = draft.description;
        project.funding_source = draft.funding_source;
        project.owner = draft.owner;
        project.updated_by = draft.author;
        project.updated_at = now;
        true
    }

    /// Removes a project by id. No cascade: allocation history referencing the
    /// project becomes orphaned and readers tolerate it.
    pub fn remove_project(&mut self, id: i32) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.projects.len() != before
    }

    /// Creates an income from a draft and returns its assigned id.
    pub fn add_income(&mut self, draft: IncomeDraft, now: NaiveDateTime) -> i32 {
        let id = self.next_income_id();
        debug!(id, name = %draft.name, "adding income");
        self.incomes.push(Income {
            id,
            name: draft.name,
            monthly_amount: draft.monthly_amount,
            kind: draft.kind,
            regular: draft.regular,
            owner: draft.owner,
            available_from: draft.available_from,
            created_by: draft.author.clone(),
            updated_by: draft.author,
            created_at: now,
            updated_at: now,
            allocations: Vec::new(),
        });
        id
    }

    /// Full-field income update; returns false when the id does not resolve.
    pub fn update_income(&mut self, id: i32, draft: IncomeDraft, now: NaiveDateTime) -> bool {
        let Some(income) = self.income_mut(id) else {
            return false;
        };
        debug!(id, name = %draft.name, "updating income");
        income.name = draft.name;
        income.monthly_amount = draft.monthly_amount;
        income.kind = draft.kind;
        income.regular = draft.regular;
        income.owner = draft.owner;
        income.available_from = draft.available_from;
        income.updated_by = draft.author;
        income.updated_at = now;
        true
    }

    /// Removes an income by id. Project-side allocation records keep their
    /// name snapshot and are resolved leniently afterwards.
    pub fn remove_income(&mut self, id: i32) -> bool {
        let before = self.incomes.len();
        self.incomes.retain(|i| i.id != id);
        self.incomes.len() != before
    }

    /// Snapshot of the full store as a backup document.
    pub fn to_backup(&self) -> BackupDocument {
        BackupDocument {
            projects: Some(self.projects.clone()),
            incomes: Some(self.incomes.clone()),
            config: Some(self.config.clone()),
        }
    }

    /// Applies a backup document; only the keys present in the document
    /// replace the corresponding collection.
    pub fn apply_backup(&mut self, doc: BackupDocument) {
        if let Some(projects) = doc.projects {
            debug!(count = projects.len(), "restoring projects from backup");
            self.projects = projects;
        }
        if let Some(incomes) = doc.incomes {
            debug!(count = incomes.len(), "restoring incomes from backup");
            self.incomes = incomes;
        }
        if let Some(config) = doc.config {
            debug!("restoring admin config from backup");
            self.config = config;
        }
    }
}
