//! Disaster event metadata.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Agency credited as the recorder when a report does not say otherwise.
const DEFAULT_RECORDER: &str = "NDRRMC";

/// Subject abbreviations applied to derived event names.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Tropical Storm", "TS"),
    ("Typhoon", "TY"),
    ("Tropical Cyclone", "TC"),
    ("Situational Report", "SitRep"),
    ("Southwest Monsoon", "SWM"),
    ("Low Pressure Area", "LPA"),
    ("Terminal Report", "TR"),
    ("Final Report", "FR"),
];

/// Per-document event metadata.
///
/// Created once per document at batch start; the section tracker fills the
/// report timestamp and the period grammar fills the date range. Persisted
/// once at document completion, split across `metadata.json` and
/// `source.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterEvent {
    /// Event name derived from the report filename
    pub event_name: String,

    /// Normalized period start (ISO date), empty when unknown
    pub start_date: String,

    /// Normalized period end (ISO date), empty when unknown
    pub end_date: String,

    /// Report freshness timestamp taken from the section headings
    pub last_update_date: String,

    /// Source report filename
    pub report_name: String,

    /// Recording agency
    pub recorded_by: String,

    /// When the report was obtained from the publisher
    pub obtained_date: String,

    /// Link to the published report
    pub report_link: String,
}

impl DisasterEvent {
    /// Create an event shell for one report file.
    pub fn for_report(report_name: &str) -> Self {
        Self {
            event_name: derive_event_name(report_name),
            start_date: String::new(),
            end_date: String::new(),
            last_update_date: String::new(),
            report_name: report_name.to_string(),
            recorded_by: DEFAULT_RECORDER.to_string(),
            obtained_date: String::new(),
            report_link: String::new(),
        }
    }
}

/// Compiled filename patterns for event-name derivation.
pub struct EventNamer {
    boilerplate: Regex,
    subject: Regex,
    trailing: Regex,
    article: Regex,
    abbreviations: Vec<(Regex, &'static str)>,
    whitespace: Regex,
}

impl EventNamer {
    /// Compile the patterns.
    pub fn new() -> Self {
        Self {
            boilerplate: Regex::new(
                r"(?i)(Breakdown|Final_Report|SitRep|Situational_Report|Terminal_Report|Table)",
            )
            .unwrap(),
            subject: Regex::new(r"(?i)for (.+)").unwrap(),
            trailing: Regex::new(r"(?i)(Breakdown.*)$").unwrap(),
            article: Regex::new(r"(?i)\bthe\b").unwrap(),
            abbreviations: ABBREVIATIONS
                .iter()
                .map(|(full, abbr)| {
                    let re = Regex::new(&format!("(?i){}", regex::escape(full))).unwrap();
                    (re, *abbr)
                })
                .collect(),
            whitespace: Regex::new(r"\s{2,}").unwrap(),
        }
    }

    /// Derive a human-readable event name from a report filename.
    ///
    /// Report filenames look like
    /// `_Breakdown__Final_Report_for_Taal_Volcano_Eruption_2020.pdf`:
    /// boilerplate tokens around a "for <subject>" core. The boilerplate is
    /// stripped, the subject extracted, and long disaster-type phrases
    /// abbreviated.
    pub fn derive(&self, filename: &str) -> String {
        let stem = filename
            .rsplit_once('.')
            .map(|(stem, _ext)| stem)
            .unwrap_or(filename);

        let name = self.boilerplate.replace_all(stem, "").replace('_', " ");

        // The subject usually follows "for"; fall back to the whole name.
        let subject = self
            .subject
            .captures(&name)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or(&name);

        let subject = self.trailing.replace(subject, "");
        let subject = self.article.replace_all(&subject, "");

        let mut subject = subject
            .replace(" -", "")
            .replace(['(', ')'], "")
            .trim()
            .to_string();

        for (re, abbr) in &self.abbreviations {
            subject = re.replace_all(&subject, *abbr).into_owned();
        }

        self.whitespace
            .replace_all(subject.trim(), " ")
            .into_owned()
    }
}

impl Default for EventNamer {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive an event name through a process-wide [`EventNamer`].
pub fn derive_event_name(filename: &str) -> String {
    static NAMER: OnceLock<EventNamer> = OnceLock::new();
    NAMER.get_or_init(EventNamer::new).derive(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_shell_defaults() {
        let event = DisasterEvent::for_report("SitRep_for_TY_Egay.pdf");
        assert_eq!(event.recorded_by, "NDRRMC");
        assert_eq!(event.report_name, "SitRep_for_TY_Egay.pdf");
        assert!(event.start_date.is_empty());
    }

    #[test]
    fn test_derive_event_name_boilerplate() {
        let name =
            derive_event_name("_Breakdown__Final_Report_for_Taal_Volcano_Eruption_2020.pdf");
        assert_eq!(name, "Taal Volcano Eruption 2020");
    }

    #[test]
    fn test_derive_event_name_abbreviates_subject() {
        let name = derive_event_name("Breakdown_Final_Report_for_Severe_Tropical_Storm_MARING_.pdf");
        assert_eq!(name, "Severe TS MARING");
    }

    #[test]
    fn test_derive_event_name_without_for() {
        let name = derive_event_name("Typhoon_Odette_Table.pdf");
        assert_eq!(name, "TY Odette");
    }

    #[test]
    fn test_namer_reused_across_filenames() {
        let namer = EventNamer::new();
        assert_eq!(namer.derive("SitRep_for_TY_Egay.json"), "TY Egay");
        assert_eq!(
            namer.derive("Terminal_Report_for_Tropical_Storm_Paeng.pdf"),
            "TS Paeng"
        );
    }

    #[test]
    fn test_serde_field_names() {
        let event = DisasterEvent::for_report("report.pdf");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("eventName").is_some());
        assert!(json.get("lastUpdateDate").is_some());
        assert!(json.get("recordedBy").is_some());
    }
}
