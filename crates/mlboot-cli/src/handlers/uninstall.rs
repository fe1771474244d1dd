//! Uninstall command handler.

use std::process::ExitCode;

use anyhow::Result;
use mlboot_core::{RemovalOutcome, uninstall};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Offer to remove each item mlboot created. User scripts are left alone.
pub fn execute(ctx: &CliContext) -> Result<ExitCode> {
    let report = uninstall(&ctx.layout, ctx.prompt.as_ref()).map_err(CliError::from)?;

    for record in &report.records {
        let path = record.path.display();
        let label = record.target.label();
        match &record.outcome {
            RemovalOutcome::Removed => println!("Removed {label} ({path})"),
            RemovalOutcome::Absent => println!("No {label} at {path}"),
            RemovalOutcome::Skipped => println!("Kept {label} ({path})"),
            RemovalOutcome::Failed { reason, .. } => {
                eprintln!("Warning: could not remove {label} ({path}): {reason}");
            }
        }
    }

    if report.has_errors() {
        let failed: Vec<_> = report
            .records
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    RemovalOutcome::Failed {
                        advisory: false,
                        ..
                    }
                )
            })
            .map(|r| r.target.label())
            .collect();
        return Err(CliError::UninstallIncomplete(failed.join(", ")).into());
    }

    if !report.removed_any() {
        println!("Nothing removed.");
    }
    Ok(ExitCode::SUCCESS)
}
