use crate::error::Result;
use crate::schema::Document;
use std::path::{Path, PathBuf};

/// Supplies the raw document a renderer builds from. Failures come back as
/// errors; nothing is retried.
pub trait DocumentSource {
    fn fetch(&self) -> Result<Document>;

    /// Human-readable origin, for diagnostics
    fn describe(&self) -> String;
}

/// Document read from a JSON file on every fetch
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self) -> Result<Document> {
        let text = std::fs::read_to_string(&self.path)?;
        Document::from_json(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory document text
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DocumentSource for StaticSource {
    fn fetch(&self) -> Result<Document> {
        Document::from_json(&self.text)
    }

    fn describe(&self) -> String {
        "<static>".to_string()
    }
}
