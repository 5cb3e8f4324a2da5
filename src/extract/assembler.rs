//! Grouping classified rows into title-keyed section tables.

use std::collections::HashMap;

use crate::model::RowRecord;

/// One emitted section table: a resolved title and its accumulated rows.
#[derive(Debug, Clone)]
pub struct SectionTable {
    /// Canonical section title
    pub title: String,

    /// Rows in document order
    pub rows: Vec<RowRecord>,
}

/// Accumulates rows into per-title buckets for one document.
///
/// Bucket identity is title-string equality: a section that resumes on a
/// later, non-contiguous page lands in the same bucket as its first
/// appearance. First-seen title order is preserved so the output file
/// set is deterministic.
#[derive(Debug, Default)]
pub struct RecordAssembler {
    order: Vec<String>,
    buckets: HashMap<String, Vec<RowRecord>>,
}

impl RecordAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a bucket exists for a title. Called on entering a table so
    /// that continuation tables append rather than reopen.
    pub fn open(&mut self, title: &str) {
        if !self.buckets.contains_key(title) {
            self.order.push(title.to_string());
            self.buckets.insert(title.to_string(), Vec::new());
        }
    }

    /// Append a row to a title's bucket.
    pub fn push(&mut self, title: &str, record: RowRecord) {
        self.open(title);
        if let Some(bucket) = self.buckets.get_mut(title) {
            bucket.push(record);
        }
    }

    /// Emit all non-empty buckets in first-seen order. Empty buckets
    /// (titles whose tables yielded no rows) are discarded silently.
    pub fn finish(mut self) -> Vec<SectionTable> {
        self.order
            .drain(..)
            .filter_map(|title| {
                let rows = self.buckets.remove(&title)?;
                if rows.is_empty() {
                    None
                } else {
                    Some(SectionTable { title, rows })
                }
            })
            .collect()
    }
}
