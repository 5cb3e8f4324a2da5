//! Section title tracking across pages.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{BBox, Page};

use super::ExtractOptions;

/// Title used before any heading has been recognized.
const UNKNOWN_SECTION: &str = "unknown_section";

/// Marker splitting a heading into label and freshness timestamp.
const FRESHNESS_MARKER: &str = "as of";

/// Report timestamp formats seen in the wild, tried in order.
/// Date-only formats first, then date-plus-time.
const TIMESTAMP_DATE_FORMATS: &[&str] = &["%b %d, %Y", "%B %d %Y"];
const TIMESTAMP_DATETIME_FORMATS: &[&str] = &["%B %d, %Y %H:%M", "%b %d, %Y %H:%M"];

/// A resolved section title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTitle {
    /// Canonical label: lower-cased, spaces as underscores, filtered to
    /// alphanumerics plus `._-`
    pub label: String,

    /// Report timestamp embedded in the heading. Normalized to
    /// `YYYY-MM-DD HH:MM:SS` when one of the known formats parses,
    /// otherwise the raw heading text.
    pub timestamp: Option<String>,
}

impl SectionTitle {
    fn unknown() -> Self {
        Self {
            label: UNKNOWN_SECTION.to_string(),
            timestamp: None,
        }
    }
}

/// Resolves the section title governing each table, carrying the last
/// resolved title across tables and pages.
///
/// Only a heading carrying the freshness marker establishes a title. A
/// table with no such heading above it is a continuation of the previous
/// section; the tracker keeps the previous title in that case. Once a
/// title has been established it is never unset for the rest of the
/// document.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    current: SectionTitle,
    header_band: f32,
    max_title_len: usize,
}

impl SectionTracker {
    /// Create a tracker for one document.
    pub fn new(options: &ExtractOptions) -> Self {
        Self {
            current: SectionTitle::unknown(),
            header_band: options.header_band,
            max_title_len: options.max_title_len,
        }
    }

    /// The current title.
    pub fn current(&self) -> &SectionTitle {
        &self.current
    }

    /// Resolve the title for a table at `table_bbox` on `page`.
    ///
    /// Looks for heading text in a fixed-height band directly above the
    /// table. Absence of a usable heading is a normal outcome, not an
    /// error: the previous title is kept and returned. That covers an
    /// empty band, a paragraph-length line, a candidate without the
    /// freshness marker, and a band that degenerates above the page top.
    pub fn resolve(&mut self, page: &Page, table_bbox: &BBox) -> &SectionTitle {
        if let Some(candidate) = self.heading_candidate(page, table_bbox) {
            if is_upper(&candidate) || candidate.chars().count() < self.max_title_len {
                if let Some(title) = split_title(&candidate) {
                    self.current = title;
                    log::debug!(
                        "page {}: new section '{}'",
                        page.number,
                        self.current.label
                    );
                }
            }
        }
        &self.current
    }

    /// Last non-empty text line in the header band, if any.
    fn heading_candidate(&self, page: &Page, table_bbox: &BBox) -> Option<String> {
        let band = BBox::new(
            0.0,
            (table_bbox.top - self.header_band).max(0.0),
            page.width,
            table_bbox.top,
        );
        if band.is_degenerate() {
            return None;
        }

        page.lines_in(&band)
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .last()
    }
}

/// Split a heading at the freshness marker into canonical label and
/// normalized timestamp.
///
/// A candidate without the marker is not a section title: `None` keeps
/// the tracker on the previous section.
fn split_title(heading: &str) -> Option<SectionTitle> {
    let (label, raw_timestamp) = heading.split_once(FRESHNESS_MARKER)?;
    let raw = raw_timestamp.replace(['(', ')'], "").trim().to_string();
    let timestamp = normalize_timestamp(&raw).unwrap_or(raw);
    Some(SectionTitle {
        label: canonicalize(label),
        timestamp: Some(timestamp),
    })
}

/// Canonicalize a heading label: lowercase, spaces to underscores,
/// filtered to alphanumerics plus `._-`.
fn canonicalize(label: &str) -> String {
    let canonical: String = label
        .trim()
        .replace(' ', "_")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || "._-".contains(*c))
        .collect();
    if canonical.is_empty() {
        UNKNOWN_SECTION.to_string()
    } else {
        canonical
    }
}

/// Try the known timestamp formats in order; `None` means the raw text
/// should be stored unchanged. A deliberate fallback, not an error.
fn normalize_timestamp(raw: &str) -> Option<String> {
    for fmt in TIMESTAMP_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            let dt = date.and_hms_opt(0, 0, 0)?;
            return Some(dt.format("%Y-%m-%d %H:%M:%S").to_string());
        }
    }
    for fmt in TIMESTAMP_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.format("%Y-%m-%d %H:%M:%S").to_string());
        }
    }
    None
}

/// Entirely upper-case: at least one cased character and no lowercase.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DetectedTable, Word};

    fn page_with_heading(heading_words: &[(&str, f32, f32)], table_top: f32) -> (Page, BBox) {
        let mut page = Page::new(1, 612.0, 792.0);
        for (text, x0, x1) in heading_words {
            page.add_word(Word::new(*text, *x0, *x1, table_top - 30.0, table_top - 18.0));
        }
        let bbox = BBox::new(36.0, table_top, 576.0, table_top + 200.0);
        page.add_table(DetectedTable::new(bbox));
        (page, bbox)
    }

    #[test]
    fn test_markerless_heading_never_sets_title() {
        let (page, bbox) = page_with_heading(
            &[("AFFECTED", 40.0, 110.0), ("POPULATION", 115.0, 200.0)],
            200.0,
        );
        let mut tracker = SectionTracker::new(&ExtractOptions::default());
        let title = tracker.resolve(&page, &bbox);
        assert_eq!(title.label, "unknown_section");
        assert!(title.timestamp.is_none());
    }

    #[test]
    fn test_markerless_heading_continues_previous_section() {
        let (page, bbox) = page_with_heading(
            &[
                ("CASUALTIES", 40.0, 130.0),
                ("as", 135.0, 148.0),
                ("of", 151.0, 164.0),
                ("Nov", 169.0, 195.0),
                ("10,", 200.0, 220.0),
                ("2025", 225.0, 255.0),
            ],
            200.0,
        );
        let mut tracker = SectionTracker::new(&ExtractOptions::default());
        tracker.resolve(&page, &bbox);

        // A later table under a bare label stays in the running section.
        let (next, next_bbox) = page_with_heading(&[("DAMAGES", 40.0, 100.0)], 200.0);
        let title = tracker.resolve(&next, &next_bbox);
        assert_eq!(title.label, "casualties");
    }

    #[test]
    fn test_resolve_heading_with_timestamp() {
        let (page, bbox) = page_with_heading(
            &[
                ("Affected", 40.0, 100.0),
                ("Population", 105.0, 180.0),
                ("as", 185.0, 200.0),
                ("of", 205.0, 218.0),
                ("(Nov", 223.0, 255.0),
                ("10,", 260.0, 280.0),
                ("2025)", 285.0, 320.0),
            ],
            200.0,
        );
        let mut tracker = SectionTracker::new(&ExtractOptions::default());
        let title = tracker.resolve(&page, &bbox);
        assert_eq!(title.label, "affected_population");
        assert_eq!(title.timestamp.as_deref(), Some("2025-11-10 00:00:00"));
    }

    #[test]
    fn test_unparseable_timestamp_kept_raw() {
        let (page, bbox) = page_with_heading(
            &[
                ("Damages", 40.0, 100.0),
                ("as", 105.0, 118.0),
                ("of", 121.0, 134.0),
                ("yesterday", 139.0, 200.0),
            ],
            200.0,
        );
        let mut tracker = SectionTracker::new(&ExtractOptions::default());
        let title = tracker.resolve(&page, &bbox);
        assert_eq!(title.timestamp.as_deref(), Some("yesterday"));
    }

    #[test]
    fn test_continuation_keeps_previous_title() {
        let (page, bbox) = page_with_heading(
            &[
                ("CASUALTIES", 40.0, 130.0),
                ("as", 135.0, 148.0),
                ("of", 151.0, 164.0),
                ("Nov", 169.0, 195.0),
                ("10,", 200.0, 220.0),
                ("2025", 225.0, 255.0),
            ],
            200.0,
        );
        let mut tracker = SectionTracker::new(&ExtractOptions::default());
        tracker.resolve(&page, &bbox);

        // Next table has nothing above it.
        let bare = Page::new(2, 612.0, 792.0);
        let table = BBox::new(36.0, 50.0, 576.0, 400.0);
        let title = tracker.resolve(&bare, &table);
        assert_eq!(title.label, "casualties");
    }

    #[test]
    fn test_long_mixed_case_line_is_continuation() {
        // Paragraph-length line, marker included: rejected by the length
        // cutoff, previous (unknown) title retained.
        let mut long_line: Vec<(String, f32, f32)> = (0..20)
            .map(|i| {
                let x = 40.0 + i as f32 * 18.0;
                (format!("word{i}"), x, x + 16.0)
            })
            .collect();
        for (text, x0, x1) in [
            ("as", 400.0, 412.0),
            ("of", 415.0, 427.0),
            ("January", 430.0, 480.0),
            ("1,", 485.0, 495.0),
            ("2025", 500.0, 530.0),
        ] {
            long_line.push((text.to_string(), x0, x1));
        }
        let refs: Vec<(&str, f32, f32)> = long_line
            .iter()
            .map(|(t, a, b)| (t.as_str(), *a, *b))
            .collect();
        let (page, bbox) = page_with_heading(&refs, 200.0);

        let mut tracker = SectionTracker::new(&ExtractOptions::default());
        let title = tracker.resolve(&page, &bbox);
        assert_eq!(title.label, "unknown_section");
    }

    #[test]
    fn test_band_above_page_top_is_absorbed() {
        let page = Page::new(1, 612.0, 792.0);
        let table = BBox::new(36.0, 0.0, 576.0, 120.0);
        let mut tracker = SectionTracker::new(&ExtractOptions::default());
        let title = tracker.resolve(&page, &table);
        assert_eq!(title.label, "unknown_section");
    }

    #[test]
    fn test_is_upper() {
        assert!(is_upper("AFFECTED POPULATION (REGION V)"));
        assert!(!is_upper("Affected Population"));
        assert!(!is_upper("12345"));
    }
}
