//! Date and period normalization.
//!
//! Archive records declare event periods in wildly heterogeneous forms:
//! `"1918-1919"`, `"April–June 1957"`, `"2–7 July 2001"`,
//! `"August 31 – September 4, 1984"`, bare years, already-ISO dates.
//! [`PeriodGrammar`] normalizes them all into an inclusive
//! (start, end) pair of calendar dates.
//!
//! The grammar is a strict precedence ladder: the first case whose
//! pattern structurally matches wins. A case that matches structurally
//! but names an unknown month falls through to the later cases.
//! Input that nothing parses maps to an empty range; the caller decides
//! whether to drop the record.

use chrono::NaiveDate;
use regex::Regex;

/// An inclusive calendar-date range.
///
/// Both ends absent means the input was unparseable. One grammar case
/// (month-year to month-year) performs no ordering check, so `end` may
/// precede `start`; see [`PeriodGrammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// First day of the period
    pub start: Option<NaiveDate>,
    /// Last day of the period
    pub end: Option<NaiveDate>,
}

impl DateRange {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    fn single(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Whether neither end is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// ISO (`YYYY-MM-DD`) start string, empty when unset.
    pub fn start_iso(&self) -> String {
        self.start.map(|d| d.to_string()).unwrap_or_default()
    }

    /// ISO (`YYYY-MM-DD`) end string, empty when unset.
    pub fn end_iso(&self) -> String {
        self.end.map(|d| d.to_string()).unwrap_or_default()
    }
}

/// Normalize a raw date/period string. Convenience wrapper that builds a
/// [`PeriodGrammar`] per call; hold a grammar when parsing in bulk.
pub fn parse_period(raw: &str) -> DateRange {
    PeriodGrammar::new().parse(raw)
}

/// The compiled period grammar.
pub struct PeriodGrammar {
    tz_paren: Regex,
    tz_bare: Regex,
    clock: Regex,
    iso: Regex,
    year_span: Regex,
    long_span: Regex,
    month_span: Regex,
    month_year_span: Regex,
    day_span: Regex,
    month_day_span: Regex,
    cross_month_span: Regex,
    bare_year: Regex,
}

/// Dash class accepted as a range separator: hyphen, en dash, em dash.
const DASH: &str = "[-–—]";

impl PeriodGrammar {
    /// Compile the grammar.
    pub fn new() -> Self {
        let month = r"[A-Za-z]+\.?";
        Self {
            tz_paren: Regex::new(r"\(\s*[A-Z]{2,4}\s*\)").unwrap(),
            tz_bare: Regex::new(r"\b[A-Z]{2,4}\b").unwrap(),
            clock: Regex::new(r"\b\d{1,2}:\d{2}(:\d{2})?\s*([AaPp]\.?[Mm]\.?)?").unwrap(),
            iso: Regex::new(r"^(\d{4})-(\d{2})-(\d{2})([ T].*)?$").unwrap(),
            year_span: Regex::new(&format!(r"^(\d{{4}})\s*{DASH}\s*(\d{{4}})$")).unwrap(),
            long_span: Regex::new(&format!(
                r"^({month}\s+\d{{1,2}},?\s+\d{{4}})\s*{DASH}\s*({month}\s+\d{{1,2}},?\s+\d{{4}})$"
            ))
            .unwrap(),
            month_span: Regex::new(&format!(r"^({month})\s*{DASH}\s*({month})\s+(\d{{4}})$"))
                .unwrap(),
            month_year_span: Regex::new(&format!(
                r"^({month})\s+(\d{{4}})\s*{DASH}\s*({month})\s+(\d{{4}})$"
            ))
            .unwrap(),
            day_span: Regex::new(&format!(
                r"^(\d{{1,2}})\s*{DASH}\s*(\d{{1,2}})\s+({month})\s+(\d{{4}})$"
            ))
            .unwrap(),
            month_day_span: Regex::new(&format!(
                r"^({month})\s+(\d{{1,2}})\s*{DASH}\s*(\d{{1,2}}),?\s+(\d{{4}})$"
            ))
            .unwrap(),
            cross_month_span: Regex::new(&format!(
                r"^({month})\s+(\d{{1,2}})\s*{DASH}\s*({month})\s+(\d{{1,2}}),?\s+(\d{{4}})$"
            ))
            .unwrap(),
            bare_year: Regex::new(r"^(\d{4})$").unwrap(),
        }
    }

    /// Normalize one raw date/period string.
    pub fn parse(&self, raw: &str) -> DateRange {
        let text = self.pre_clean(raw);
        if text.is_empty() {
            return DateRange::default();
        }

        self.parse_iso(&text)
            .or_else(|| self.parse_year_span(&text))
            .or_else(|| self.parse_long_span(&text))
            .or_else(|| self.parse_month_span(&text))
            .or_else(|| self.parse_month_year_span(&text))
            .or_else(|| self.parse_day_span(&text))
            .or_else(|| self.parse_month_day_span(&text))
            .or_else(|| self.parse_cross_month_span(&text))
            .or_else(|| self.parse_bare_year(&text))
            .or_else(|| self.parse_fallback(&text))
            .unwrap_or_default()
    }

    /// Strip timezone-like tokens and clock times, collapse whitespace.
    fn pre_clean(&self, raw: &str) -> String {
        let text = self.tz_paren.replace_all(raw, " ");
        let text = self.clock.replace_all(&text, " ");
        let text = self.strip_bare_tz(&text);
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Remove bare 2-4 letter upper-case tokens, keeping upper-case month
    /// abbreviations (`NOV 2003` must survive the timezone sweep).
    fn strip_bare_tz(&self, text: &str) -> String {
        self.tz_bare
            .replace_all(text, |caps: &regex::Captures| {
                let token = caps.get(0).map(|m| m.as_str()).unwrap_or("");
                if month_number(token).is_some() {
                    token.to_string()
                } else {
                    " ".to_string()
                }
            })
            .into_owned()
    }

    /// Case 0: already an ISO date, optionally with a time part to drop.
    fn parse_iso(&self, text: &str) -> Option<DateRange> {
        let caps = self.iso.captures(text)?;
        let date = ymd(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        Some(DateRange::single(date))
    }

    /// Case 1: `YYYY-YYYY` spans whole years.
    fn parse_year_span(&self, text: &str) -> Option<DateRange> {
        let caps = self.year_span.captures(text)?;
        let first: i32 = caps[1].parse().ok()?;
        let second: i32 = caps[2].parse().ok()?;
        Some(DateRange::new(
            ymd(first, 1, 1)?,
            ymd(second, 12, 31)?,
        ))
    }

    /// Case 2: two full dates, each parsed independently.
    fn parse_long_span(&self, text: &str) -> Option<DateRange> {
        let caps = self.long_span.captures(text)?;
        let start = self.parse_single(&caps[1])?;
        let end = self.parse_single(&caps[2])?;
        Some(DateRange::new(start, end))
    }

    /// Case 3: `Month-Month Year`, both months in the same year.
    fn parse_month_span(&self, text: &str) -> Option<DateRange> {
        let caps = self.month_span.captures(text)?;
        let first = month_number(&caps[1])?;
        let second = month_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        Some(DateRange::new(
            ymd(year, first, 1)?,
            last_day_of_month(year, second)?,
        ))
    }

    /// Case 4: `Month Year-Month Year`.
    ///
    /// Deliberately performs no `end >= start` check: reversed ranges in
    /// the archive (possible citation artifacts) pass through unchanged.
    fn parse_month_year_span(&self, text: &str) -> Option<DateRange> {
        let caps = self.month_year_span.captures(text)?;
        let first = month_number(&caps[1])?;
        let first_year: i32 = caps[2].parse().ok()?;
        let second = month_number(&caps[3])?;
        let second_year: i32 = caps[4].parse().ok()?;
        Some(DateRange::new(
            ymd(first_year, first, 1)?,
            last_day_of_month(second_year, second)?,
        ))
    }

    /// Case 5: `Day-Day Month Year`, shared month and year.
    fn parse_day_span(&self, text: &str) -> Option<DateRange> {
        let caps = self.day_span.captures(text)?;
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let month = month_number(&caps[3])?;
        let year: i32 = caps[4].parse().ok()?;
        Some(DateRange::new(
            ymd(year, month, first)?,
            ymd(year, month, second)?,
        ))
    }

    /// Case 6: `Month Day-Day Year`, shared month and year.
    fn parse_month_day_span(&self, text: &str) -> Option<DateRange> {
        let caps = self.month_day_span.captures(text)?;
        let month = month_number(&caps[1])?;
        let first: u32 = caps[2].parse().ok()?;
        let second: u32 = caps[3].parse().ok()?;
        let year: i32 = caps[4].parse().ok()?;
        Some(DateRange::new(
            ymd(year, month, first)?,
            ymd(year, month, second)?,
        ))
    }

    /// Case 7: `Month Day - Month Day, Year`, shared year.
    fn parse_cross_month_span(&self, text: &str) -> Option<DateRange> {
        let caps = self.cross_month_span.captures(text)?;
        let first_month = month_number(&caps[1])?;
        let first_day: u32 = caps[2].parse().ok()?;
        let second_month = month_number(&caps[3])?;
        let second_day: u32 = caps[4].parse().ok()?;
        let year: i32 = caps[5].parse().ok()?;
        Some(DateRange::new(
            ymd(year, first_month, first_day)?,
            ymd(year, second_month, second_day)?,
        ))
    }

    /// Case 8: a bare year spans the whole year.
    fn parse_bare_year(&self, text: &str) -> Option<DateRange> {
        let caps = self.bare_year.captures(text)?;
        let year: i32 = caps[1].parse().ok()?;
        Some(DateRange::new(ymd(year, 1, 1)?, ymd(year, 12, 31)?))
    }

    /// Case 9: one generic date, month-first then day-first.
    fn parse_fallback(&self, text: &str) -> Option<DateRange> {
        self.parse_single(text).map(DateRange::single)
    }

    /// Parse one date expression, trying month-first forms before
    /// day-first forms.
    fn parse_single(&self, text: &str) -> Option<NaiveDate> {
        const MONTH_FIRST: &[&str] = &["%B %d, %Y", "%B %d %Y", "%b %d, %Y", "%b %d %Y", "%m/%d/%Y"];
        const DAY_FIRST: &[&str] = &["%d %B %Y", "%d %b %Y", "%d/%m/%Y"];

        let text = text.replace('.', "");
        for fmt in MONTH_FIRST.iter().chain(DAY_FIRST) {
            if let Ok(date) = NaiveDate::parse_from_str(&text, fmt) {
                return Some(date);
            }
        }
        None
    }
}

impl Default for PeriodGrammar {
    fn default() -> Self {
        Self::new()
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Last calendar day of a month, leap years included.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        ymd(year + 1, 1, 1)?
    } else {
        ymd(year, month + 1, 1)?
    };
    Some(first_of_next.pred_opt()?)
}

/// Month number from an English name or 3-letter abbreviation, optional
/// trailing period, any casing.
fn month_number(name: &str) -> Option<u32> {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    let months = [
        ("january", "jan"),
        ("february", "feb"),
        ("march", "mar"),
        ("april", "apr"),
        ("may", "may"),
        ("june", "jun"),
        ("july", "jul"),
        ("august", "aug"),
        ("september", "sep"),
        ("october", "oct"),
        ("november", "nov"),
        ("december", "dec"),
    ];
    months
        .iter()
        .position(|(full, abbr)| name == *full || name == *abbr)
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(
            start.parse().unwrap(),
            end.parse().unwrap(),
        )
    }

    #[test]
    fn test_iso_passthrough() {
        assert_eq!(parse_period("2020-05-01"), range("2020-05-01", "2020-05-01"));
    }

    #[test]
    fn test_iso_datetime_truncated() {
        assert_eq!(
            parse_period("2020-05-01T08:30:00"),
            range("2020-05-01", "2020-05-01")
        );
    }

    #[test]
    fn test_year_span() {
        assert_eq!(parse_period("1918-1919"), range("1918-01-01", "1919-12-31"));
    }

    #[test]
    fn test_long_span() {
        assert_eq!(
            parse_period("August 10, 2008 \u{2013} July 14, 2009"),
            range("2008-08-10", "2009-07-14")
        );
    }

    #[test]
    fn test_month_span() {
        assert_eq!(
            parse_period("April\u{2013}June 1957"),
            range("1957-04-01", "1957-06-30")
        );
    }

    #[test]
    fn test_month_year_span_reversed_preserved() {
        // No ordering check: a reversed archive range passes through.
        assert_eq!(
            parse_period("April 1965\u{2013}June 1957"),
            range("1965-04-01", "1957-06-30")
        );
    }

    #[test]
    fn test_day_span() {
        assert_eq!(parse_period("2-7 July 2001"), range("2001-07-02", "2001-07-07"));
    }

    #[test]
    fn test_month_day_span() {
        assert_eq!(
            parse_period("Nov 12-15 2003"),
            range("2003-11-12", "2003-11-15")
        );
    }

    #[test]
    fn test_cross_month_span() {
        assert_eq!(
            parse_period("August 31 \u{2013} September 4, 1984"),
            range("1984-08-31", "1984-09-04")
        );
    }

    #[test]
    fn test_bare_year() {
        assert_eq!(parse_period("2013"), range("2013-01-01", "2013-12-31"));
    }

    #[test]
    fn test_fallback_single_date() {
        assert_eq!(
            parse_period("November 8, 2013"),
            range("2013-11-08", "2013-11-08")
        );
        assert_eq!(parse_period("8 November 2013"), range("2013-11-08", "2013-11-08"));
    }

    #[test]
    fn test_unparseable_maps_to_empty() {
        let result = parse_period("unknown text");
        assert!(result.is_empty());
        assert_eq!(result.start_iso(), "");
    }

    #[test]
    fn test_timezone_and_clock_stripped() {
        assert_eq!(
            parse_period("2-7 July 2001 (PST)"),
            range("2001-07-02", "2001-07-07")
        );
        assert_eq!(
            parse_period("November 8, 2013 04:40 UTC"),
            range("2013-11-08", "2013-11-08")
        );
    }

    #[test]
    fn test_upper_case_month_survives_tz_sweep() {
        assert_eq!(
            parse_period("NOV 12-15 2003"),
            range("2003-11-12", "2003-11-15")
        );
    }

    #[test]
    fn test_february_leap_year_end() {
        assert_eq!(
            parse_period("January\u{2013}February 2020"),
            range("2020-01-01", "2020-02-29")
        );
    }

    #[test]
    fn test_invalid_month_falls_through_to_empty() {
        assert!(parse_period("Aprol\u{2013}Juny 1957").is_empty());
    }

    #[test]
    fn test_december_span_end() {
        assert_eq!(
            parse_period("October\u{2013}December 1999"),
            range("1999-10-01", "1999-12-31")
        );
    }
}
