//! Output formatting and persistence for records and aggregates.
//!
//! JSON rendering for the CLI views and the delimited-text export.

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use tracing::info;

use crate::record::Record;

/// Column titles of the export, in field order.
pub const EXPORT_HEADERS: [&str; 10] = [
    "Year",
    "State",
    "District",
    "Gender",
    "Applied",
    "Worked",
    "Not Worked",
    "Days Worked",
    "Wage Rate",
    "Total Wages",
];

/// Content type of the export, as served for download.
pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8;";

pub const DEFAULT_EXPORT_FILENAME: &str = "mgnrega-data.csv";

/// Renders a value as pretty-printed JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serializes records as comma-separated text: a header line, then one line
/// per record, joined by `\n` with no trailing newline.
///
/// Fields are never quoted, so a value containing a comma shifts the columns
/// of its row.
pub fn to_delimited_text(records: &[Record]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush export buffer: {}", e.error()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }

    Ok(text)
}

/// Writes the export of `records` to `path`, replacing any existing file.
pub fn write_export(path: &str, records: &[Record]) -> Result<()> {
    let text = to_delimited_text(records)?;
    std::fs::write(path, &text).with_context(|| format!("failed to write export to {path}"))?;

    info!(
        path,
        records = records.len(),
        bytes = text.len(),
        content_type = EXPORT_MIME_TYPE,
        "Export written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::Path;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn chennai_2005() -> Record {
        Record {
            year: 2005,
            state: "Tamil Nadu".to_string(),
            district: "Chennai".to_string(),
            gender: "Male".to_string(),
            applied: 100,
            worked: 90,
            not_worked: 10,
            days_worked: 80,
            wage_rate: 100,
            total_wages: 720000,
        }
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&chennai_2005()).unwrap();
        assert!(json.contains("\"district\": \"Chennai\""));
    }

    #[test]
    fn test_export_single_record() {
        let text = to_delimited_text(&[chennai_2005()]).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Year,State,District,Gender,Applied,Worked,Not Worked,Days Worked,Wage Rate,Total Wages"
        );
        assert_eq!(lines[1], "2005,Tamil Nadu,Chennai,Male,100,90,10,80,100,720000");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_export_empty_is_header_only() {
        let text = to_delimited_text(&[]).unwrap();
        assert_eq!(text, EXPORT_HEADERS.join(","));
    }

    #[test]
    fn test_export_does_not_quote() {
        let mut record = chennai_2005();
        record.district = "Chennai, North".to_string();

        let text = to_delimited_text(&[record]).unwrap();
        let row = text.lines().nth(1).unwrap();

        assert_eq!(row.split(',').count(), 11);
        assert!(!row.contains('"'));
    }

    #[test]
    fn test_write_export_creates_file() {
        let path = temp_path("mgnrega_insights_test_export.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        write_export(&path, &[chennai_2005(), chennai_2005()]).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
