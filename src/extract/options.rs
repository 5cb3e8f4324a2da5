//! Extraction options and configuration.

/// Options for table extraction and hierarchy reconstruction.
///
/// The heading and alignment heuristics are threshold-based with no
/// labeled ground truth behind them; the thresholds stay tunable here
/// rather than hard-coded.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Height of the band searched for a section heading directly above
    /// each table, in points
    pub header_band: f32,

    /// Margin tolerance when deciding cell text alignment, in points
    pub alignment_tolerance: f32,

    /// A heading candidate longer than this (and not fully upper-case)
    /// is treated as a paragraph continuation, not a new title
    pub max_title_len: usize,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header search band height.
    pub fn with_header_band(mut self, points: f32) -> Self {
        self.header_band = points;
        self
    }

    /// Set the alignment tolerance.
    pub fn with_alignment_tolerance(mut self, points: f32) -> Self {
        self.alignment_tolerance = points;
        self
    }

    /// Set the maximum title length.
    pub fn with_max_title_len(mut self, chars: usize) -> Self {
        self.max_title_len = chars;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_band: 80.0,
            alignment_tolerance: 5.0,
            max_title_len: 100,
        }
    }
}
