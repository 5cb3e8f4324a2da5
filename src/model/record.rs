//! Classified row records and the administrative hierarchy context.

use serde::{Deserialize, Serialize};

/// The four administrative levels, largest to smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Administrative region
    Region,
    /// Province
    Province,
    /// Municipality or city
    Municipality,
    /// Barangay, the smallest subdivision
    Barangay,
}

/// The running (region, province, municipality, barangay) tuple inferred
/// while walking one table's rows.
///
/// Scope is a single detected table: reset to all-empty at table start.
/// Setting a level clears every level strictly below it; unset levels
/// inherit whatever was last set at or above them within the same table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyContext {
    /// Current region
    pub region: Option<String>,
    /// Current province
    pub province: Option<String>,
    /// Current municipality or city
    pub municipality: Option<String>,
    /// Current barangay
    pub barangay: Option<String>,
}

impl HierarchyContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one level and clear all levels strictly below it.
    pub fn set(&mut self, level: Level, name: impl Into<String>) {
        let name = name.into();
        match level {
            Level::Region => {
                self.region = Some(name);
                self.province = None;
                self.municipality = None;
                self.barangay = None;
            }
            Level::Province => {
                self.province = Some(name);
                self.municipality = None;
                self.barangay = None;
            }
            Level::Municipality => {
                self.municipality = Some(name);
                self.barangay = None;
            }
            Level::Barangay => {
                self.barangay = Some(name);
            }
        }
    }

    /// Get the value at one level.
    pub fn get(&self, level: Level) -> Option<&str> {
        match level {
            Level::Region => self.region.as_deref(),
            Level::Province => self.province.as_deref(),
            Level::Municipality => self.municipality.as_deref(),
            Level::Barangay => self.barangay.as_deref(),
        }
    }

    /// Whether no level is set.
    pub fn is_empty(&self) -> bool {
        self.region.is_none()
            && self.province.is_none()
            && self.municipality.is_none()
            && self.barangay.is_none()
    }
}

/// One retained table row: page number, a snapshot of the hierarchy
/// context at that row, and the remaining cell values in column order.
///
/// There is no fixed column schema; values are keyed positionally as
/// `Column_1 .. Column_N` at output time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowRecord {
    /// Page the row was found on (1-indexed)
    pub page: u32,

    /// Hierarchy context snapshot at this row
    pub hierarchy: HierarchyContext,

    /// Cell values after the leftmost cell, newline-collapsed and trimmed
    pub values: Vec<String>,
}

impl RowRecord {
    /// Create a new record.
    pub fn new(page: u32, hierarchy: HierarchyContext, values: Vec<String>) -> Self {
        Self {
            page,
            hierarchy,
            values,
        }
    }
}
