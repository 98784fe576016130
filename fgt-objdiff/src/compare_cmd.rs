use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fgt_objdiff::config::{default_config, load_config, CompareConfig};
use fgt_objdiff::report::{render_summary, render_text};
use fgt_objdiff_core::{
    build_filtered_report, compare_texts, format_json, load_file, ComparisonReport, DiffFilter,
};

use crate::cli::{CompareArgs, OutputFormat};
use crate::path_guard;

pub fn run_compare(args: CompareArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    if let Some(out_path) = &args.output {
        let mut reads: Vec<&Path> = args.files.iter().map(PathBuf::as_path).collect();
        reads.extend(args.config.as_deref());
        path_guard::ensure_report_path_is_free(out_path, &reads)?;
    }

    let mut inputs = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match load_file(path) {
            Ok(text) => inputs.push((path.display().to_string(), text)),
            Err(err) => tracing::warn!("skipping source: {err}"),
        }
    }

    let loaded = inputs.len();
    let run = compare_texts(inputs, &config.normalize_options())
        .with_context(|| format!("failed to compare {loaded} readable file(s)"))?;
    for warning in &run.warnings {
        tracing::warn!(source = %warning.source, "{}", warning.warning);
    }

    let filter = DiffFilter {
        types: args.types.clone(),
        properties: args.properties.clone(),
        name: args.name.clone(),
        value: args.value.clone(),
        invert: args.invert,
    };
    let view = filter.apply(&run.diffs);
    let report = build_filtered_report(&run.index, &view, &config.report_options());
    tracing::debug!(
        rows = report.rows.len(),
        filtered = !filter.is_empty(),
        "built report"
    );

    if let Some(out_path) = &args.output {
        fs::write(out_path, format_json(&report))
            .with_context(|| format!("failed to write report file {}", out_path.display()))?;
    }

    if args.summary {
        println!("{}", render_summary(&report.summary));
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", format_json(&report)),
    }

    Ok(())
}

/// Embedded or `--config` settings with command-line overrides applied.
fn resolve_config(args: &CompareArgs) -> Result<CompareConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };
    if args.ignore_associated_interface {
        config.normalize.ignore_associated_interface = true;
    }
    config
        .normalize
        .exclude_properties
        .extend(args.exclude.iter().cloned());
    Ok(config)
}

fn print_text(report: &ComparisonReport) {
    if report.rows.is_empty() {
        println!("no differing objects");
    } else {
        println!("{}", render_text(report));
    }
    println!();
    println!("{}", render_summary(&report.summary));
}
