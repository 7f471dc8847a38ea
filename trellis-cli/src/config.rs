use crate::cli::OptionArgs;
use anyhow::{Context, Result};
use std::fs;
use trellis_ui::{RendererOptions, ScriptPolicy};

/// Options file (if any) with command line flags applied on top
pub fn load_options(args: &OptionArgs) -> Result<RendererOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file: {}", path.display()))?;
            RendererOptions::from_json(&text)
                .with_context(|| format!("Invalid options file: {}", path.display()))?
        }
        None => RendererOptions::default(),
    };

    if args.no_animations {
        options.enable_animations = false;
    }
    if args.no_validation {
        options.enable_validation = false;
    }
    if args.debug {
        options.debug_mode = true;
    }
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    if args.reject_scripts {
        options.script_policy = ScriptPolicy::Reject;
    }

    tracing::debug!("renderer options: {:?}", options);
    Ok(options)
}

/// Filter used when `RUST_LOG` is unset: `TRELLIS_LOG`, else the verbosity flag
pub fn log_filter(verbose: bool) -> String {
    match std::env::var("TRELLIS_LOG") {
        Ok(level) if !level.trim().is_empty() => level,
        _ if verbose => "debug".to_string(),
        _ => "warn".to_string(),
    }
}
