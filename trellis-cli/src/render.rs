use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::Path;
use trellis_ui::{DocumentSource, FileSource, Renderer, UiTree};

pub struct RenderOptions<'a> {
    pub file: &'a Path,
    pub compact: bool,
}

/// Render the file once and print the tree
pub fn run_render(renderer: &Renderer, options: &RenderOptions<'_>) -> Result<()> {
    let tree = render_file(renderer, options.file)?;
    println!("{}", format_tree(&tree, options.compact)?);
    Ok(())
}

pub fn render_file(renderer: &Renderer, file: &Path) -> Result<UiTree> {
    let source = FileSource::new(file);
    renderer
        .render_source(&source)
        .with_context(|| format!("Failed to render {}", source.describe()))
}

/// Page title (if any) and the snapshot of every top-level element
pub fn tree_json(tree: &UiTree) -> Result<Value> {
    Ok(json!({
        "title": tree.title(),
        "roots": serde_json::to_value(tree.snapshot_roots())?,
    }))
}

pub fn format_tree(tree: &UiTree, compact: bool) -> Result<String> {
    let value = tree_json(tree)?;
    let text = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(text)
}
