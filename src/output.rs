//! Output writers: per-section CSV tables plus event metadata JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::error::Result;
use crate::extract::SectionTable;
use crate::model::DisasterEvent;

/// Fixed leading columns in every section table.
const FIXED_COLUMNS: &[&str] = &["Page", "Region", "Province", "City_Muni", "Barangay"];

/// Write one document's outputs under `out_root`.
///
/// Creates a subdirectory named by the event, one `<title>.csv` per
/// section table, a `metadata.json` with the event identity and period,
/// and a `source.json` with the provenance fields. Returns the document
/// directory.
pub fn write_document(
    out_root: &Path,
    event: &DisasterEvent,
    tables: &[SectionTable],
) -> Result<PathBuf> {
    let dir = out_root.join(&event.event_name);
    fs::create_dir_all(&dir)?;

    for table in tables {
        let path = dir.join(format!("{}.csv", table.title));
        write_table(&path, table)?;
        log::info!("saved table: {}", path.display());
    }

    write_event(&dir, event)?;
    Ok(dir)
}

/// Write one section table as CSV.
///
/// Header: `Page, Region, Province, City_Muni, Barangay, Column_1 ..
/// Column_N` where N is the widest row in the bucket; narrower rows are
/// padded with empty fields.
fn write_table(path: &Path, table: &SectionTable) -> Result<()> {
    let width = table.rows.iter().map(|r| r.values.len()).max().unwrap_or(0);

    let mut writer = csv::Writer::from_path(path)?;
    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    for i in 1..=width {
        header.push(format!("Column_{i}"));
    }
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record: Vec<String> = vec![
            row.page.to_string(),
            row.hierarchy.region.clone().unwrap_or_default(),
            row.hierarchy.province.clone().unwrap_or_default(),
            row.hierarchy.municipality.clone().unwrap_or_default(),
            row.hierarchy.barangay.clone().unwrap_or_default(),
        ];
        record.extend(row.values.iter().cloned());
        record.resize(FIXED_COLUMNS.len() + width, String::new());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `metadata.json` (event identity and period) and `source.json`
/// (provenance) side by side in the document directory.
fn write_event(dir: &Path, event: &DisasterEvent) -> Result<()> {
    let metadata = json!({
        "eventName": event.event_name,
        "startDate": event.start_date,
        "endDate": event.end_date,
    });
    let source = json!({
        "reportName": event.report_name,
        "recordedBy": event.recorded_by,
        "obtainedDate": event.obtained_date,
        "reportLink": event.report_link,
        "lastUpdateDate": event.last_update_date,
    });

    fs::write(
        dir.join("metadata.json"),
        serde_json::to_string_pretty(&metadata)?,
    )?;
    fs::write(
        dir.join("source.json"),
        serde_json::to_string_pretty(&source)?,
    )?;
    Ok(())
}
