//! Table extraction and hierarchy reconstruction.
//!
//! Drives one document's pages in order, resolving the section title for
//! each detected table, classifying rows into the administrative
//! hierarchy, and bucketing them by title. All state lives in explicit
//! values scoped to one document; nothing leaks across documents.

mod assembler;
mod hierarchy;
mod options;
mod section;

pub use assembler::{RecordAssembler, SectionTable};
pub use hierarchy::{classify, is_repeated_header, measure_cell, Alignment, Casing, CellStyle};
pub use options::ExtractOptions;
pub use section::{SectionTitle, SectionTracker};

use crate::model::{HierarchyContext, Page, RowRecord, TableRow};

/// Everything extracted from one document.
#[derive(Debug)]
pub struct ExtractedDocument {
    /// Non-empty section tables in first-seen title order
    pub tables: Vec<SectionTable>,

    /// Latest report timestamp found in any section heading
    pub last_update: Option<String>,
}

/// Extracts section tables from one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    options: ExtractOptions,
}

impl DocumentExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Process a document's pages in order.
    ///
    /// Pages and tables must be visited sequentially: the section title
    /// persists across tables and pages, and the hierarchy context is
    /// threaded forward through each table's rows.
    pub fn extract(&self, pages: &[Page]) -> ExtractedDocument {
        let mut tracker = SectionTracker::new(&self.options);
        let mut assembler = RecordAssembler::new();
        let mut last_update = None;

        for page in pages {
            if !page.has_tables() {
                continue;
            }
            log::debug!("page {}: {} table(s)", page.number, page.tables.len());

            for table in &page.tables {
                let title = tracker.resolve(page, &table.bbox);
                if let Some(ts) = &title.timestamp {
                    last_update = Some(ts.clone());
                }
                let title = title.label.clone();
                assembler.open(&title);

                let mut context = HierarchyContext::new();
                for row in &table.rows {
                    match self.classify_row(page, row, &context) {
                        RowOutcome::Keep(next, record) => {
                            context = next;
                            assembler.push(&title, record);
                        }
                        RowOutcome::Drop => {}
                    }
                }
            }
        }

        ExtractedDocument {
            tables: assembler.finish(),
            last_update,
        }
    }

    /// Classify one row, producing the updated context and its record,
    /// or dropping it (repeated header, blank row, no cells).
    fn classify_row(
        &self,
        page: &Page,
        row: &TableRow,
        context: &HierarchyContext,
    ) -> RowOutcome {
        let Some(leftmost) = row.leftmost() else {
            return RowOutcome::Drop;
        };

        if is_repeated_header(&leftmost.clean_text()) {
            return RowOutcome::Drop;
        }
        let style = measure_cell(page, leftmost, self.options.alignment_tolerance);
        if let Some(style) = &style {
            if is_repeated_header(&style.text) {
                return RowOutcome::Drop;
            }
        }

        if row.is_blank() {
            return RowOutcome::Drop;
        }

        let (next, _level) = classify(context, style.as_ref());
        let values: Vec<String> = row.cells.iter().skip(1).map(|c| c.clean_text()).collect();
        let record = RowRecord::new(page.number, next.clone(), values);
        RowOutcome::Keep(next, record)
    }
}

enum RowOutcome {
    Keep(HierarchyContext, RowRecord),
    Drop,
}
