//! Detect command handler.

use std::process::ExitCode;

use anyhow::Result;
use mlboot_core::{Accelerator, SelectionSource, Variant, detect_accelerator, select_variant};
use serde::Serialize;

use crate::bootstrap::CliContext;

#[derive(Debug, Serialize)]
struct DetectReport {
    accelerator: Accelerator,
    variant: Variant,
    index_url: String,
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

/// Print the accelerator and the variant a bootstrap would install.
/// Nothing is installed or written.
pub fn execute(ctx: &CliContext, json: bool) -> Result<ExitCode> {
    let accelerator = detect_accelerator(ctx.runner.as_ref(), ctx.platform);
    let selection = select_variant(&accelerator, ctx.config.variant);
    let (source, warning) = match selection.source {
        SelectionSource::Override => ("override", None),
        SelectionSource::Detected => ("detected", None),
        SelectionSource::NoAccelerator => ("no_accelerator", None),
        SelectionSource::Fallback(reason) => ("fallback", Some(reason)),
    };
    let report = DetectReport {
        accelerator,
        variant: selection.variant,
        index_url: selection.variant.index_url(),
        source,
        warning,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("accelerator = {}", report.accelerator);
    println!("variant     = {}", report.variant);
    println!("index       = {}", report.index_url);
    println!("source      = {}", report.source);
    if let Some(warning) = &report.warning {
        eprintln!("Warning: {warning}");
    }
    Ok(ExitCode::SUCCESS)
}
