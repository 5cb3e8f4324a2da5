//! JSON layout-dump source.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{DocumentSource, SourceDocument};

/// A document backed by a JSON layout dump on disk.
///
/// One file per document: `{ "pages": [...], "declaredPeriod": ...,
/// "reportLink": ..., "obtainedDate": ... }` in the serde model of
/// [`SourceDocument`].
#[derive(Debug, Clone)]
pub struct JsonLayoutSource {
    path: PathBuf,
    name: String,
}

impl JsonLayoutSource {
    /// Create a source for one layout dump.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for JsonLayoutSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<SourceDocument> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let document: SourceDocument = serde_json::from_reader(reader)?;
        if document.pages.is_empty() {
            return Err(Error::Layout(format!("{}: no pages", self.name)));
        }
        Ok(document)
    }
}

/// Whether a directory entry looks like a layout dump.
pub fn is_layout_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
        && path.is_file()
}
