//! Shared argument types for CLI commands.

use clap::Args;
use std::path::PathBuf;

/// How a rendered value is written out
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderFormat {
    /// Indented plain-text outline
    Outline,
    /// HTML fragment of nested tables
    Html,
    /// Standalone HTML page with the summary table
    Page,
    /// The decoded JSON document
    Json,
}

/// Common output arguments for commands that render a value
#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "outline")]
    pub format: RenderFormat,

    /// File to write to instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Title of the generated page (`--format page`)
    #[arg(long, default_value = "Report Summary")]
    pub title: String,
}
