//! Geometric primitives for page layout.
//!
//! Coordinates are in points with a top-down Y axis (`top` < `bottom`),
//! matching the layout dumps produced by the acquisition pipeline.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box on a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge (smaller Y is higher on the page)
    pub top: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self { x0, top, x1, bottom }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Whether the box has positive area.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Whether a point lies inside the box (edges inclusive).
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.top && y <= self.bottom
    }

    /// Whether a word's center point lies inside the box.
    ///
    /// Center-point containment tolerates words that slightly overhang a
    /// ruled cell border, which is common in tight table layouts.
    pub fn contains_word(&self, word: &Word) -> bool {
        self.contains_point(word.center_x(), word.center_y())
    }
}

/// A positioned text token on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The text content
    pub text: String,
    /// Left edge
    pub x0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub top: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl Word {
    /// Create a new word.
    pub fn new(text: impl Into<String>, x0: f32, x1: f32, top: f32, bottom: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
            bottom,
        }
    }

    /// Horizontal center of the word.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Vertical center of the word.
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BBox::new(10.0, 20.0, 110.0, 50.0);
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 30.0);
        assert!(!bbox.is_degenerate());
    }

    #[test]
    fn test_degenerate_bbox() {
        let bbox = BBox::new(0.0, 50.0, 612.0, 50.0);
        assert!(bbox.is_degenerate());
    }

    #[test]
    fn test_contains_word_by_center() {
        let cell = BBox::new(0.0, 0.0, 100.0, 20.0);
        // Overhangs the right border but its center is inside.
        let word = Word::new("REGION", 80.0, 110.0, 5.0, 15.0);
        assert!(cell.contains_word(&word));

        let outside = Word::new("X", 120.0, 130.0, 5.0, 15.0);
        assert!(!cell.contains_word(&outside));
    }
}
