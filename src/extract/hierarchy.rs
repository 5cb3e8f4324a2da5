//! Row classification: inferring administrative levels from the leftmost
//! cell's text geometry and casing.

use crate::model::{HierarchyContext, Level, Page, TableCell};

/// Horizontal alignment of text within its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Text hugs the left border
    Left,
    /// Left and right margins are near-equal
    Center,
    /// Text hugs the right border
    Right,
    /// None of the above, or no usable geometry
    Unknown,
}

/// Casing of a cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    /// Entirely upper-case
    Upper,
    /// Title-case (each word capitalized)
    Title,
    /// Anything else
    Mixed,
}

/// The leftmost cell's measured style and joined text.
#[derive(Debug, Clone)]
pub struct CellStyle {
    /// Measured alignment
    pub alignment: Alignment,
    /// Measured casing
    pub casing: Casing,
    /// Joined word text
    pub text: String,
}

/// Measure the leftmost cell of a row: alignment from the word bounding
/// box margins against the cell borders, casing from the joined text.
///
/// Returns `None` when the cell has no geometry or contains no words;
/// such rows carry no classification signal.
pub fn measure_cell(page: &Page, cell: &TableCell, tolerance: f32) -> Option<CellStyle> {
    let bbox = cell.bbox?;
    let words = page.words_in(&bbox);
    if words.is_empty() {
        return None;
    }

    let text = words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    let text_x0 = words.iter().map(|w| w.x0).fold(f32::INFINITY, f32::min);
    let text_x1 = words.iter().map(|w| w.x1).fold(f32::NEG_INFINITY, f32::max);
    let left_margin = text_x0 - bbox.x0;
    let right_margin = bbox.x1 - text_x1;

    let alignment = if (left_margin - right_margin).abs() < tolerance {
        Alignment::Center
    } else if left_margin < tolerance * 2.0 {
        Alignment::Left
    } else if right_margin < tolerance * 2.0 {
        Alignment::Right
    } else {
        Alignment::Unknown
    };

    Some(CellStyle {
        alignment,
        casing: casing_of(&text),
        text,
    })
}

/// Whether a leftmost-cell text is a repeated table header rather than a
/// data row. Such rows are dropped entirely; they neither produce a
/// record nor touch the hierarchy context.
pub fn is_repeated_header(text: &str) -> bool {
    text.contains("REGION") && text.contains("PROVINCE")
}

/// Classify one row against the running context.
///
/// Pure: the input context is not mutated; the updated context and the
/// level that was set (if any) are returned. The decision table is
/// ordered, first match wins:
///
/// | alignment | casing    | effect                        |
/// |-----------|-----------|-------------------------------|
/// | CENTER    | UPPER     | set region                    |
/// | LEFT      | UPPER     | set province                  |
/// | CENTER    | not UPPER | set municipality              |
/// | RIGHT     | any       | set barangay                  |
/// | other     | any       | no change (row inherits)      |
pub fn classify(
    context: &HierarchyContext,
    style: Option<&CellStyle>,
) -> (HierarchyContext, Option<Level>) {
    let mut next = context.clone();

    let Some(style) = style else {
        return (next, None);
    };
    if style.text.is_empty() {
        return (next, None);
    }

    let level = match (style.alignment, style.casing) {
        (Alignment::Center, Casing::Upper) => Some(Level::Region),
        (Alignment::Left, Casing::Upper) => Some(Level::Province),
        (Alignment::Center, _) => Some(Level::Municipality),
        (Alignment::Right, _) => Some(Level::Barangay),
        _ => None,
    };

    if let Some(level) = level {
        next.set(level, style.text.clone());
    }
    (next, level)
}

/// Casing of a text: UPPER when no lowercase letters exist, TITLE when
/// every word starts with an upper-case letter followed only by
/// lowercase, MIXED otherwise.
fn casing_of(text: &str) -> Casing {
    if is_upper(text) {
        return Casing::Upper;
    }
    if is_title(text) {
        return Casing::Title;
    }
    Casing::Mixed
}

fn is_upper(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

fn is_title(text: &str) -> bool {
    let mut has_cased = false;
    for word in text.split_whitespace() {
        let mut letters = word.chars().filter(|c| c.is_alphabetic());
        match letters.next() {
            Some(first) if first.is_uppercase() => {
                has_cased = true;
                if letters.any(|c| c.is_uppercase()) {
                    return false;
                }
            }
            Some(_) => return false,
            None => continue,
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Word};

    fn page_with_cell(text_words: &[(&str, f32, f32)]) -> (Page, TableCell) {
        let mut page = Page::new(1, 612.0, 792.0);
        for (text, x0, x1) in text_words {
            page.add_word(Word::new(*text, *x0, *x1, 102.0, 112.0));
        }
        let cell = TableCell::new(BBox::new(0.0, 100.0, 200.0, 115.0), "");
        (page, cell)
    }

    fn style_for(text_words: &[(&str, f32, f32)]) -> CellStyle {
        let (page, cell) = page_with_cell(text_words);
        measure_cell(&page, &cell, 5.0).unwrap()
    }

    #[test]
    fn test_center_upper_is_region() {
        // Margins 60 on both sides of a 200pt cell.
        let style = style_for(&[("REGION", 60.0, 100.0), ("V", 105.0, 140.0)]);
        assert_eq!(style.alignment, Alignment::Center);
        assert_eq!(style.casing, Casing::Upper);

        let (ctx, level) = classify(&HierarchyContext::new(), Some(&style));
        assert_eq!(level, Some(Level::Region));
        assert_eq!(ctx.region.as_deref(), Some("REGION V"));
    }

    #[test]
    fn test_left_upper_is_province() {
        let style = style_for(&[("ALBAY", 2.0, 60.0)]);
        assert_eq!(style.alignment, Alignment::Left);

        let mut ctx = HierarchyContext::new();
        ctx.set(Level::Region, "REGION V");
        ctx.set(Level::Municipality, "Legazpi City");

        let (next, level) = classify(&ctx, Some(&style));
        assert_eq!(level, Some(Level::Province));
        assert_eq!(next.region.as_deref(), Some("REGION V"));
        assert_eq!(next.province.as_deref(), Some("ALBAY"));
        assert!(next.municipality.is_none());
    }

    #[test]
    fn test_center_title_is_municipality() {
        let style = style_for(&[("Legazpi", 60.0, 110.0), ("City", 115.0, 140.0)]);
        assert_eq!(style.alignment, Alignment::Center);
        assert_eq!(style.casing, Casing::Title);

        let (ctx, level) = classify(&HierarchyContext::new(), Some(&style));
        assert_eq!(level, Some(Level::Municipality));
        assert_eq!(ctx.municipality.as_deref(), Some("Legazpi City"));
    }

    #[test]
    fn test_right_any_is_barangay() {
        let style = style_for(&[("Bgy.", 120.0, 150.0), ("Bogtong", 155.0, 198.0)]);
        assert_eq!(style.alignment, Alignment::Right);

        let mut ctx = HierarchyContext::new();
        ctx.set(Level::Region, "REGION V");
        let (next, level) = classify(&ctx, Some(&style));
        assert_eq!(level, Some(Level::Barangay));
        assert_eq!(next.region.as_deref(), Some("REGION V"));
        assert_eq!(next.barangay.as_deref(), Some("Bgy. Bogtong"));
        // Intermediate levels stay empty until explicitly set.
        assert!(next.province.is_none());
        assert!(next.municipality.is_none());
    }

    #[test]
    fn test_unknown_alignment_inherits() {
        // 40pt left margin, 110pt right margin: neither centered nor snug.
        let style = style_for(&[("TOTAL", 40.0, 90.0)]);
        assert_eq!(style.alignment, Alignment::Unknown);

        let mut ctx = HierarchyContext::new();
        ctx.set(Level::Region, "REGION V");
        let (next, level) = classify(&ctx, Some(&style));
        assert!(level.is_none());
        assert_eq!(next, ctx);
    }

    #[test]
    fn test_missing_geometry_inherits() {
        let ctx = HierarchyContext::new();
        let (next, level) = classify(&ctx, None);
        assert!(level.is_none());
        assert!(next.is_empty());
    }

    #[test]
    fn test_repeated_header_detection() {
        assert!(is_repeated_header("REGION / PROVINCE / CITY"));
        assert!(!is_repeated_header("REGION V"));
        assert!(!is_repeated_header("Province of Albay"));
    }

    #[test]
    fn test_casing_of() {
        assert_eq!(casing_of("REGION V"), Casing::Upper);
        assert_eq!(casing_of("Legazpi City"), Casing::Title);
        assert_eq!(casing_of("Bgy. BOGTONG"), Casing::Mixed);
        assert_eq!(casing_of("CAMSUR (partial)"), Casing::Mixed);
    }

    #[test]
    fn test_measure_empty_cell() {
        let page = Page::new(1, 612.0, 792.0);
        let cell = TableCell::new(BBox::new(0.0, 100.0, 200.0, 115.0), "");
        assert!(measure_cell(&page, &cell, 5.0).is_none());
        assert!(measure_cell(&page, &TableCell::empty(), 5.0).is_none());
    }
}
