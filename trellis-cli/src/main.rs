mod cli;
mod config;
mod render;
mod validate;
mod watch;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use trellis_ui::Renderer;

fn main() -> Result<()> {
    // .env may set TRELLIS_LOG, so it has to load before the subscriber
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::log_filter(cli.verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => tracing::debug!("Loaded .env file from: {:?}", path),
        Err(e) => tracing::debug!("No .env file found: {}", e),
    }

    let options = config::load_options(&cli.options)?;
    let renderer = Renderer::new(options);

    match cli.command {
        Commands::Render {
            file,
            watch,
            compact,
        } => {
            if watch {
                watch::run_watch(&renderer, &file, compact)
            } else {
                render::run_render(&renderer, &render::RenderOptions { file: &file, compact })
            }
        }
        Commands::Validate { file, set } => {
            let valid = validate::run_validate(
                &renderer,
                &validate::ValidateOptions {
                    file: &file,
                    values: &set,
                },
            )?;
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
