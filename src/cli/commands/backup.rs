use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, trace};

use crate::config::load_plan_from_file;
use model::seed;

/// Write the demo plan to `output` as a pretty-printed backup document.
pub fn export_plan(output: &Path) -> Result<()> {
    trace!("Entering export_plan function");

    let plan = seed::demo_plan();
    let document = plan.to_backup();
    let body = serde_json::to_string_pretty(&document).context("Failed to serialize plan")?;
    std::fs::write(output, body)
        .with_context(|| format!("Failed to write plan file: {}", output.display()))?;

    info!(
        projects = plan.projects.len(),
        incomes = plan.incomes.len(),
        "exported demo plan to {}",
        output.display()
    );
    Ok(())
}

/// Read a backup document, rebuild the plan and write it back out.
///
/// Normalizes partial documents: absent top-level keys come back as the
/// defaults, so the result is always a complete document.
pub fn import_plan(input: &Path, output: Option<&Path>) -> Result<()> {
    trace!("Entering import_plan function");

    let plan = load_plan_from_file(input)?;
    let target = output.unwrap_or(input);
    let body =
        serde_json::to_string_pretty(&plan.to_backup()).context("Failed to serialize plan")?;
    std::fs::write(target, body)
        .with_context(|| format!("Failed to write plan file: {}", target.display()))?;

    info!(
        projects = plan.projects.len(),
        incomes = plan.incomes.len(),
        "imported plan from {} and wrote {}",
        input.display(),
        target.display()
    );
    Ok(())
}
