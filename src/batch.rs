//! Batch orchestration: one independent worker task per document.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::{DocumentExtractor, ExtractOptions};
use crate::model::DisasterEvent;
use crate::output::write_document;
use crate::source::{is_layout_file, DocumentSource, JsonLayoutSource};
use crate::{dates, ProcessedDocument};

/// One captured per-document failure.
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    /// Report filename
    pub document: String,
    /// Rendered cause
    pub error: String,
}

/// Result of one batch run.
#[derive(Debug)]
pub struct BatchSummary {
    /// Documents that produced output
    pub processed: usize,
    /// Documents dispatched
    pub total: usize,
    /// Captured per-document failures
    pub failures: Vec<DocumentFailure>,
}

impl BatchSummary {
    /// Whether every dispatched document succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Process every layout dump in `input_dir`, writing one output
/// subdirectory per document under `out_root`.
///
/// A missing or unreadable input directory is fatal and aborts before
/// any dispatch. After that, documents are dispatched one task each to
/// the rayon pool; no state is shared between tasks, so one document's
/// failure is captured and logged without touching its siblings. The
/// summary is returned only once every task has finished.
pub fn run_batch(input_dir: &Path, out_root: &Path, options: &ExtractOptions) -> Result<BatchSummary> {
    let documents = scan_input_dir(input_dir)?;
    let total = documents.len();
    log::info!("dispatching {total} document(s) from {}", input_dir.display());

    fs::create_dir_all(out_root)?;

    let results: Vec<(String, Result<()>)> = documents
        .par_iter()
        .map(|path| {
            let source = JsonLayoutSource::new(path);
            let name = source.name().to_string();
            let outcome = process_document(&source, out_root, options).map(|_| ());
            (name, outcome)
        })
        .collect();

    let mut failures = Vec::new();
    for (document, outcome) in results {
        if let Err(err) = outcome {
            log::error!("failed to process {document}: {err}");
            failures.push(DocumentFailure {
                document,
                error: err.to_string(),
            });
        }
    }

    let summary = BatchSummary {
        processed: total - failures.len(),
        total,
        failures,
    };
    log::info!("finished: {}/{} processed", summary.processed, summary.total);
    Ok(summary)
}

/// Process one document end to end: load, extract, normalize the
/// declared period, persist.
pub fn process_document<S: DocumentSource>(
    source: &S,
    out_root: &Path,
    options: &ExtractOptions,
) -> Result<ProcessedDocument> {
    let name = source.name();
    log::info!("processing {name}");

    let document = source.load()?;
    let mut event = DisasterEvent::for_report(name);
    if let Some(link) = &document.report_link {
        event.report_link = link.clone();
    }
    if let Some(obtained) = &document.obtained_date {
        event.obtained_date = obtained.clone();
    }

    let extractor = DocumentExtractor::with_options(options.clone());
    let extracted = extractor.extract(&document.pages);
    if let Some(last_update) = extracted.last_update {
        event.last_update_date = last_update;
    }

    if let Some(period) = &document.declared_period {
        let range = dates::parse_period(period);
        if range.is_empty() {
            log::warn!("{name}: declared period '{period}' did not parse");
        }
        event.start_date = range.start_iso();
        event.end_date = range.end_iso();
    }

    let dir = write_document(out_root, &event, &extracted.tables)?;
    Ok(ProcessedDocument {
        event,
        tables: extracted.tables,
        output_dir: dir,
    })
}

/// Enumerate layout dumps in the input directory, sorted by filename so
/// dispatch order is stable.
fn scan_input_dir(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir).map_err(|_| Error::InputDir(input_dir.to_path_buf()))?;

    let mut documents: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_layout_file(path))
        .collect();
    documents.sort();
    Ok(documents)
}
