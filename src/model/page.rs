//! Page-level types.

use serde::{Deserialize, Serialize};

use super::{BBox, Word};

/// Vertical tolerance when grouping words into text lines.
const LINE_TOLERANCE: f32 = 3.0;

/// A single page of a source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Positioned words on the page
    #[serde(default)]
    pub words: Vec<Word>,

    /// Tables detected on the page, in reading order
    #[serde(default)]
    pub tables: Vec<DetectedTable>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            words: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Add a word to the page.
    pub fn add_word(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Add a detected table to the page.
    pub fn add_table(&mut self, table: DetectedTable) {
        self.tables.push(table);
    }

    /// Words whose center point lies inside the given region.
    pub fn words_in(&self, region: &BBox) -> Vec<&Word> {
        self.words
            .iter()
            .filter(|w| region.contains_word(w))
            .collect()
    }

    /// Text lines inside the given region, top to bottom.
    ///
    /// Words are grouped into lines by their top coordinate and joined
    /// left to right with single spaces.
    pub fn lines_in(&self, region: &BBox) -> Vec<String> {
        let mut words = self.words_in(region);
        if words.is_empty() {
            return Vec::new();
        }

        words.sort_by(|a, b| {
            a.top
                .partial_cmp(&b.top)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut lines: Vec<String> = Vec::new();
        let mut line_top = f32::NEG_INFINITY;
        for word in words {
            if (word.top - line_top).abs() > LINE_TOLERANCE {
                line_top = word.top;
                lines.push(word.text.clone());
            } else if let Some(last) = lines.last_mut() {
                last.push(' ');
                last.push_str(&word.text);
            }
        }
        lines
    }

    /// Check if the page has any detected tables.
    pub fn has_tables(&self) -> bool {
        !self.tables.is_empty()
    }
}

/// A ruled table detected on one page.
///
/// Detection itself happens upstream (the acquisition pipeline runs a
/// line-based detector over the PDF); this type carries only the geometry
/// and the extracted cell grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedTable {
    /// Bounding box of the whole table
    pub bbox: BBox,

    /// Rows in the table, top to bottom
    pub rows: Vec<TableRow>,
}

impl DetectedTable {
    /// Create a new table with the given bounds.
    pub fn new(bbox: BBox) -> Self {
        Self {
            bbox,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A row of cells in a detected table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row, left to right
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// The leftmost cell, if the row has any.
    pub fn leftmost(&self) -> Option<&TableCell> {
        self.cells.first()
    }

    /// Whether every cell in the row is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.is_blank())
    }
}

/// A single table cell.
///
/// Ruled extraction can yield cells with no geometry (merged regions) or
/// no text; both are represented as `None` rather than sentinel values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell bounds, absent for merged-away cells
    pub bbox: Option<BBox>,

    /// Raw cell text, absent when the extractor found nothing
    pub text: Option<String>,
}

impl TableCell {
    /// Create a cell with geometry and text.
    pub fn new(bbox: BBox, text: impl Into<String>) -> Self {
        Self {
            bbox: Some(bbox),
            text: Some(text.into()),
        }
    }

    /// Create a cell with text but no usable geometry.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            bbox: None,
            text: Some(text.into()),
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self {
            bbox: None,
            text: None,
        }
    }

    /// Cell text with newlines collapsed to spaces and ends trimmed.
    pub fn clean_text(&self) -> String {
        self.text
            .as_deref()
            .unwrap_or("")
            .replace('\n', " ")
            .trim()
            .to_string()
    }

    /// Whether the cell carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.clean_text().is_empty()
    }
}
