use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fgt-objdiff")]
#[command(about = "Compare FortiGate address and service objects across VDOMs and config files")]
pub struct Cli {
    /// Log parsing and diff details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare firewall objects across every (file, VDOM) pair.
    Compare(CompareArgs),
    /// Show VDOMs, object types and object counts of one config file.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print summary counts only.
    #[arg(long)]
    pub summary: bool,
    /// Keep object types containing this text (repeatable).
    #[arg(long = "type")]
    pub types: Vec<String>,
    /// Keep properties whose name contains this text (repeatable).
    #[arg(long = "property")]
    pub properties: Vec<String>,
    /// Keep objects whose name contains this text.
    #[arg(long)]
    pub name: Option<String>,
    /// Keep properties where any value contains this text.
    #[arg(long)]
    pub value: Option<String>,
    /// Invert the --type/--property conditions.
    #[arg(long)]
    pub invert: bool,
    /// Drop associated-interface before comparing.
    #[arg(long)]
    pub ignore_associated_interface: bool,
    /// Drop an extra property before comparing (repeatable).
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,
    /// TOML settings file; defaults to the embedded settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Also write the JSON report to this file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
