//! # sitrep
//!
//! Disaster situation-report table extraction for Rust.
//!
//! Situation reports are multi-page bulletins of ruled tables, each
//! preceded by a free-text section heading. This library turns them into
//! normalized structured records: one CSV per section, every row
//! annotated with an inferred four-level administrative hierarchy
//! (region, province, municipality/city, barangay), plus event metadata
//! with a normalized date range.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use sitrep::ExtractOptions;
//!
//! fn main() -> sitrep::Result<()> {
//!     let summary = sitrep::process_dir(
//!         Path::new("layouts/"),
//!         Path::new("parsed/"),
//!         &ExtractOptions::default(),
//!     )?;
//!     println!("processed {}/{}", summary.processed, summary.total);
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! - **Section tracking**: the heading band above each table is searched
//!   for a new "… as of <date>" title; tables without one continue the
//!   previous section, even across pages.
//! - **Hierarchy reconstruction**: each row's leftmost cell is classified
//!   by text alignment and casing into one of the four administrative
//!   levels, threading a running context through the table.
//! - **Period grammar**: heterogeneous date expressions ("1918-1919",
//!   "April–June 1957", "2–7 July 2001") normalize to inclusive ISO
//!   start/end pairs.
//! - **Batch isolation**: one rayon task per document; a failing
//!   document is logged and skipped without disturbing its siblings.

pub mod batch;
pub mod dates;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod source;

// Re-export commonly used types
pub use batch::{run_batch, BatchSummary, DocumentFailure};
pub use dates::{parse_period, DateRange, PeriodGrammar};
pub use error::{Error, Result};
pub use extract::{
    DocumentExtractor, ExtractOptions, ExtractedDocument, SectionTable, SectionTracker,
};
pub use model::{
    BBox, DetectedTable, DisasterEvent, HierarchyContext, Level, Page, RowRecord, TableCell,
    TableRow, Word,
};
pub use source::{DocumentSource, JsonLayoutSource, SourceDocument};

use std::path::{Path, PathBuf};

/// Everything produced for one successfully processed document.
#[derive(Debug)]
pub struct ProcessedDocument {
    /// Final event metadata as persisted
    pub event: DisasterEvent,
    /// Emitted section tables
    pub tables: Vec<SectionTable>,
    /// Directory the outputs were written to
    pub output_dir: PathBuf,
}

/// Process every layout dump in a directory.
///
/// See [`batch::run_batch`]; this is the main entry point.
pub fn process_dir(
    input_dir: &Path,
    out_root: &Path,
    options: &ExtractOptions,
) -> Result<BatchSummary> {
    batch::run_batch(input_dir, out_root, options)
}

/// Process a single layout dump, writing its outputs under `out_root`.
pub fn process_file(
    path: &Path,
    out_root: &Path,
    options: &ExtractOptions,
) -> Result<ProcessedDocument> {
    let source = JsonLayoutSource::new(path);
    batch::process_document(&source, out_root, options)
}
