//! CSV codec for entity export and import
//!
//! Export writes every value double-quoted with `\n` line endings. Import
//! zips each data line with the header line, producing the same
//! `{status, total, data}` document the conversion endpoint returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::Record;

/// Serialize rows to CSV text.
///
/// The header is the key set of the first row; later rows missing a key
/// write an empty value. Returns `None` when there are no rows.
pub fn export_csv(rows: &[Record]) -> Result<Option<String>> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };
    let header: Vec<&str> = first.keys().collect();

    let mut writer = ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Always)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&header)?;
    for row in rows {
        writer.write_record(header.iter().map(|key| row.text(key)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::import(format!("failed to flush CSV: {e}")))?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| Error::import(format!("CSV output is not UTF-8: {e}")))
}

/// Successful conversion document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub status: String,
    pub total: usize,
    pub data: Vec<Record>,
}

/// Body returned by a conversion endpoint: the document or `{error}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConversionReply {
    Converted(ConversionResponse),
    Failed { error: String },
}

impl ConversionReply {
    pub fn into_result(self) -> Result<ConversionResponse> {
        match self {
            ConversionReply::Converted(response) => Ok(response),
            ConversionReply::Failed { error } => Err(Error::import(error)),
        }
    }
}

/// Convert CSV text locally.
///
/// Every value is kept as a string. A data line whose field count differs
/// from the header is an import error.
pub fn convert_csv(text: &str) -> Result<ConversionResponse> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::None)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::import("Unable to read header from CSV"));
    }

    let mut data = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() != header.len() {
            return Err(Error::import(format!(
                "line {} has {} fields, header has {}",
                index + 2,
                row.len(),
                header.len()
            )));
        }
        let record: Record = header
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key.clone(), Value::String(value.to_string())))
            .collect();
        data.push(record);
    }

    Ok(ConversionResponse {
        status: "success".to_string(),
        total: data.len(),
        data,
    })
}

/// File name an entity export is written to.
pub fn export_file_name(entity: &str) -> String {
    format!("{entity}_export.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owner(id: i64, name: &str, city: Value) -> Record {
        Record::from_pairs([
            ("owner_id", json!(id)),
            ("owner_name", json!(name)),
            ("city", city),
        ])
    }

    #[test]
    fn test_export_quotes_every_value() {
        let rows = vec![
            owner(1, "Alice", json!("Porto")),
            owner(2, "Bob \"Bobby\" Reyes", Value::Null),
        ];
        let csv = export_csv(&rows).unwrap().unwrap();
        insta::assert_snapshot!(csv.trim_end(), @r###"
        "owner_id","owner_name","city"
        "1","Alice","Porto"
        "2","Bob ""Bobby"" Reyes",""
        "###);
    }

    #[test]
    fn test_export_empty_rows_is_none() {
        assert!(export_csv(&[]).unwrap().is_none());
    }

    #[test]
    fn test_export_header_follows_first_row() {
        let rows = vec![
            Record::from_pairs([("b", json!(1)), ("a", json!(2))]),
            Record::from_pairs([("a", json!(3)), ("c", json!(4))]),
        ];
        let csv = export_csv(&rows).unwrap().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec![r#""b","a""#, r#""1","2""#, r#""","3""#]);
    }

    #[test]
    fn test_convert_zips_header_with_lines() {
        let converted = convert_csv("owner_name,city\nAlice,Porto\nBob,Lisbon\n").unwrap();
        assert_eq!(converted.status, "success");
        assert_eq!(converted.total, 2);
        assert_eq!(converted.data[0].text("owner_name"), "Alice");
        assert_eq!(converted.data[1].text("city"), "Lisbon");
        assert_eq!(converted.data[1].get("city"), Some(&json!("Lisbon")));
    }

    #[test]
    fn test_convert_header_only() {
        let converted = convert_csv("owner_name,city\n").unwrap();
        assert_eq!(converted.total, 0);
        assert!(converted.data.is_empty());
    }

    #[test]
    fn test_convert_rejects_ragged_line() {
        let err = convert_csv("a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, Error::Import { .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_convert_rejects_missing_header() {
        assert!(matches!(convert_csv(""), Err(Error::Import { .. })));
    }

    #[test]
    fn test_export_then_convert_reproduces_strings() {
        let rows = vec![
            owner(1, "Alice, Jr.", json!("Porto")),
            owner(2, "Line\nBreak", json!("")),
        ];
        let csv = export_csv(&rows).unwrap().unwrap();
        let converted = convert_csv(&csv).unwrap();
        assert_eq!(converted.total, 2);
        for (original, round) in rows.iter().zip(&converted.data) {
            for key in ["owner_name", "city"] {
                assert_eq!(original.text(key), round.text(key));
            }
        }
    }

    #[test]
    fn test_conversion_reply_error_document() {
        let reply: ConversionReply =
            serde_json::from_value(json!({"error": "No file uploaded"})).unwrap();
        let err = reply.into_result().unwrap_err();
        assert!(err.to_string().contains("No file uploaded"));
    }

    #[test]
    fn test_conversion_reply_success_document() {
        let reply: ConversionReply = serde_json::from_value(json!({
            "status": "success",
            "total": 1,
            "data": [{"owner_name": "Alice"}]
        }))
        .unwrap();
        let response = reply.into_result().unwrap();
        assert_eq!(response.total, 1);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("owners"), "owners_export.csv");
    }
}
