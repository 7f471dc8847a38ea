use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(version, about = "Render JSON page descriptions into UI element trees", long_about = None)]
pub struct Cli {
    /// Log debug output from the renderer
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub options: OptionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Renderer settings; flags override the options file
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// JSON file with renderer options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not queue presentation effects
    #[arg(long, global = true)]
    pub no_animations: bool,

    /// Do not validate on blur/submit
    #[arg(long, global = true)]
    pub no_validation: bool,

    /// Report unsupported component types as warnings
    #[arg(long, global = true)]
    pub debug: bool,

    /// Deepest nesting level that is still built
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Refuse string event handlers instead of compiling them
    #[arg(long, global = true)]
    pub reject_scripts: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a document and print the element tree as JSON
    Render {
        /// Path to the JSON document
        file: PathBuf,
        /// Re-render every time the file changes
        #[arg(short, long)]
        watch: bool,
        /// Print JSON on a single line
        #[arg(short, long)]
        compact: bool,
    },
    /// Render a document, fill in field values and validate its forms
    Validate {
        /// Path to the JSON document
        file: PathBuf,
        /// Field value as name=value; repeatable
        #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{raw}`")),
    }
}
