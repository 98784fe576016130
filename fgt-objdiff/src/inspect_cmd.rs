use anyhow::{Context, Result};
use fgt_objdiff::config::default_config;
use fgt_objdiff::inspect::build_inspect_report;
use fgt_objdiff::report::render_inspect;
use fgt_objdiff_core::parse_file;

use crate::cli::{InspectArgs, OutputFormat};

pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let parsed = parse_file(&args.file, &default_config().normalize_options())
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let source = args.file.display().to_string();
    for warning in &parsed.warnings {
        tracing::warn!(source = %source, "{warning}");
    }

    let report = build_inspect_report(&source, &parsed);
    match args.format {
        OutputFormat::Text => println!("{}", render_inspect(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
