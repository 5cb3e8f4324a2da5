//! Document sources.
//!
//! The core never reads PDFs itself; the acquisition pipeline runs a
//! line-based table detector upstream and hands over layout dumps
//! (positioned words plus detected table grids per page). A
//! [`DocumentSource`] supplies those pages for one document.

mod json;

pub use json::{is_layout_file, JsonLayoutSource};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Page;

/// Supplies pages and report-level metadata for one document.
pub trait DocumentSource {
    /// Report filename, used to derive the event name and label failures.
    fn name(&self) -> &str;

    /// Load the document's pages and declared metadata.
    fn load(&self) -> Result<SourceDocument>;
}

/// One loaded source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    /// Pages in document order
    pub pages: Vec<Page>,

    /// The document's declared date or period, verbatim (e.g.
    /// "2–7 July 2001"), when the publisher supplied one
    #[serde(default)]
    pub declared_period: Option<String>,

    /// Link to the published report
    #[serde(default)]
    pub report_link: Option<String>,

    /// When the report was downloaded
    #[serde(default)]
    pub obtained_date: Option<String>,
}

impl SourceDocument {
    /// Create a document from pages alone.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            declared_period: None,
            report_link: None,
            obtained_date: None,
        }
    }
}
