use anyhow::{Context, Result};
use moka::future::Cache;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::schemas::AppState;
use model::seed;
use model::store::{BackupDocument, PlanData};

/// Where the initial plan comes from.
#[derive(Debug, Clone)]
pub enum StateSource {
    /// The built-in demo plan.
    Demo,
    /// An empty plan with default configuration.
    Empty,
    /// A backup document previously exported by this application.
    File(PathBuf),
}

impl StateSource {
    /// Resolve the source from CLI flags and the FAMPLAN_DATA variable.
    pub fn resolve(data: Option<PathBuf>, empty: bool) -> Self {
        if empty {
            return StateSource::Empty;
        }
        if let Some(path) = data {
            return StateSource::File(path);
        }
        match std::env::var("FAMPLAN_DATA") {
            Ok(path) if !path.is_empty() => StateSource::File(PathBuf::from(path)),
            _ => StateSource::Demo,
        }
    }
}

/// Load a backup document from disk and build a plan from it.
pub fn load_plan_from_file(path: &Path) -> Result<PlanData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file: {}", path.display()))?;
    let document: BackupDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse plan file: {}", path.display()))?;
    let mut plan = PlanData::default();
    plan.apply_backup(document);
    Ok(plan)
}

/// Initialize application configuration and state
pub async fn initialize_app_state(source: StateSource) -> Result<AppState> {
    let plan = match source {
        StateSource::Demo => {
            tracing::info!("Seeding the built-in demo plan");
            seed::demo_plan()
        }
        StateSource::Empty => {
            tracing::info!("Starting with an empty plan");
            PlanData::default()
        }
        StateSource::File(path) => {
            tracing::info!("Loading plan from file: {}", path.display());
            load_plan_from_file(&path)?
        }
    };

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    Ok(AppState {
        plan: Arc::new(RwLock::new(plan)),
        cache,
    })
}

/// Get bind address from environment or use default
pub fn get_bind_address() -> String {
    std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}
