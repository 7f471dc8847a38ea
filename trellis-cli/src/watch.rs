use crate::render::{format_tree, render_file};
use anyhow::{Context, Result};
use colored::Colorize;
use notify::{EventKind, RecursiveMode, Watcher, event::ModifyKind};
use notify_debouncer_full::{DebounceEventResult, DebouncedEvent, new_debouncer};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, warn};
use trellis_ui::Renderer;

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Render now, then again after every debounced change to `file`
pub fn run_watch(renderer: &Renderer, file: &Path, compact: bool) -> Result<()> {
    let file = file
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", file.display()))?;
    let dir = file
        .parent()
        .context("Watched file has no parent directory")?
        .to_path_buf();

    let (tx, rx) = mpsc::channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(DEBOUNCE, None, tx).context("Failed to start file watcher")?;
    // editors often replace the file, so watch its directory
    debouncer
        .watcher()
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", dir.display()))?;

    eprintln!("{} {}", "Watching".bold().cyan(), file.display());
    render_once(renderer, &file, compact);

    for result in rx {
        match result {
            Ok(events) => {
                if events.iter().any(|event| touches(event, &file)) {
                    eprintln!("{} {}", "Re-rendering".bold().cyan(), file.display());
                    render_once(renderer, &file, compact);
                }
            }
            Err(errors) => {
                for error in errors {
                    warn!("watch error: {}", error);
                }
            }
        }
    }

    Ok(())
}

fn render_once(renderer: &Renderer, file: &Path, compact: bool) {
    match render_file(renderer, file).and_then(|tree| format_tree(&tree, compact)) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("{} {:#}", "error:".red().bold(), e),
    }
}

fn touches(event: &DebouncedEvent, file: &Path) -> bool {
    let relevant = match &event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(kind) => !matches!(kind, ModifyKind::Metadata(_)),
        _ => false,
    };
    if !relevant {
        return false;
    }

    let hit = event
        .paths
        .iter()
        .any(|path| path == file || path.file_name() == file.file_name());
    if hit {
        debug!("change detected: {:?}", event.kind);
    }
    hit
}
