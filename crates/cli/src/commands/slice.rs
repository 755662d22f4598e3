use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use trace_slicer_core::config::{SliceConfig, SliceSettings};
use trace_slicer_core::log::RecordLog;
use trace_slicer_core::program::ProgramManifest;
use trace_slicer_core::report::{InputFingerprint, SliceReport};

use crate::sha256_file;

/// Merge the optional config file with command-line overrides.
pub fn resolve_slice_settings(
    config_path: Option<&Path>,
    overrides: SliceConfig,
) -> Result<SliceSettings> {
    let base = match config_path {
        Some(path) => SliceConfig::load(path)?,
        None => SliceConfig::default(),
    };
    base.overlay(overrides).resolve()
}

/// Load inputs, slice both pointers, and build the report.
pub fn build_slice_report(settings: &SliceSettings) -> Result<SliceReport> {
    let log = RecordLog::load(&settings.log)
        .with_context(|| format!("Failed to load log at {}", settings.log.display()))?;
    let program = ProgramManifest::load(&settings.program).with_context(|| {
        format!("Failed to load program manifest at {}", settings.program.display())
    })?;

    let [pt1, pt2] = settings.starts;
    let outcome = trace_slicer_core::slicer::slice(&log, &program, settings.starts)
        .with_context(|| format!("Failed to slice pointers at records {pt1} and {pt2}"))?;

    let inputs = InputFingerprint {
        log_path: settings.log.display().to_string(),
        log_sha256: sha256_file(&settings.log)?,
        program_path: settings.program.display().to_string(),
        program_sha256: sha256_file(&settings.program)?,
    };

    Ok(SliceReport::build(&outcome, &program, settings.merge_mode)
        .with_inputs(inputs)
        .with_generated_at(Utc::now().to_rfc3339()))
}

/// Render a report as the tab-separated listing or pretty JSON.
pub fn render_slice_report(report: &SliceReport, json: bool) -> Result<String> {
    if json {
        let mut serialized = serde_json::to_string_pretty(report)
            .context("Failed to serialize slice report to JSON")?;
        serialized.push('\n');
        Ok(serialized)
    } else {
        Ok(report.render_text())
    }
}

/// Slice two pointers and print the result.
pub fn slice_command(config_path: Option<&Path>, overrides: SliceConfig) -> Result<()> {
    let settings = resolve_slice_settings(config_path, overrides)?;
    let report = build_slice_report(&settings)?;
    for pointer in &report.pointers {
        tracing::info!(
            label = %pointer.label,
            matches = pointer.rows.len(),
            termination = ?pointer.termination,
            "pointer sliced"
        );
    }
    print!("{}", render_slice_report(&report, settings.json)?);
    Ok(())
}
