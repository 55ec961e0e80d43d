// TutorFinder - platform/fs.rs
//
// Tutor data loading from disk. Reads a fresh snapshot on every call;
// nothing is cached between searches because the sheet may be edited
// at any time.
//
// Supported formats (by extension):
//   .csv  - header row plus one row per tutor
//   .json - `[{ "Tutor Name": ..., "Stage Range": ... }, ...]`
//           (the shape written by pandas `to_json(orient="records")`)

use crate::core::model::{CellValue, TutorRecord};
use crate::util::constants;
use crate::util::error::LoadError;
use serde_json::Value as JsonValue;
use std::io::Read;
use std::path::Path;

/// Load all tutor records from a data file, dispatching on its extension.
pub fn load_records(path: &Path) -> Result<Vec<TutorRecord>, LoadError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > constants::MAX_DATA_FILE_SIZE {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_DATA_FILE_SIZE,
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let records = match extension.as_str() {
        "csv" => read_csv(file, path)?,
        "json" => read_json(file, path)?,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    };

    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        "Loaded tutor data"
    );

    Ok(records)
}

/// Read CSV tutor rows. `path` is used for error context only.
///
/// Header cells are trimmed; data cells are kept verbatim and typed with
/// [`CellValue::guess`]. Short rows are tolerated: missing cells are simply
/// absent from the record.
pub fn read_csv<R: Read>(reader: R, path: &Path) -> Result<Vec<TutorRecord>, LoadError> {
    let csv_err = |e: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_err)?;
        if records.len() >= constants::MAX_RECORDS {
            return Err(LoadError::TooManyRecords {
                path: path.to_path_buf(),
                max: constants::MAX_RECORDS,
            });
        }
        let columns = headers
            .iter()
            .zip(row.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, cell)| (header.clone(), CellValue::guess(cell)));
        records.push(TutorRecord::from_columns(columns));
    }

    Ok(records)
}

/// Read JSON tutor records. `path` is used for error context only.
pub fn read_json<R: Read>(reader: R, path: &Path) -> Result<Vec<TutorRecord>, LoadError> {
    let root: JsonValue = serde_json::from_reader(reader).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rows = root.as_array().ok_or_else(|| LoadError::NotAnArray {
        path: path.to_path_buf(),
    })?;

    if rows.len() > constants::MAX_RECORDS {
        return Err(LoadError::TooManyRecords {
            path: path.to_path_buf(),
            max: constants::MAX_RECORDS,
        });
    }

    rows.iter()
        .enumerate()
        .map(|(row, value)| {
            let obj = value.as_object().ok_or_else(|| LoadError::RowNotObject {
                path: path.to_path_buf(),
                row,
            })?;
            Ok(TutorRecord::from_columns(
                obj.iter().map(|(k, v)| (k.clone(), json_to_cell(v))),
            ))
        })
        .collect()
}

fn json_to_cell(value: &JsonValue) -> CellValue {
    match value {
        JsonValue::Null => CellValue::Empty,
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Number(n) => match n.as_f64() {
            Some(value) => CellValue::Number {
                value,
                raw: n.to_string(),
            },
            None => CellValue::Text(n.to_string()),
        },
        JsonValue::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::TutorField;

    #[test]
    fn test_read_csv_types_cells() {
        let data = "Tutor Name,Stage Range,Years\nAmira,G11,4\nOmar,,\n";
        let records = read_csv(data.as_bytes(), Path::new("t.csv")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text(TutorField::TutorName), "Amira");
        assert_eq!(records[0].column("Years"), Some(&CellValue::number(4.0)));
        assert_eq!(records[1].get(TutorField::StageRange), Some(&CellValue::Empty));
    }

    #[test]
    fn test_read_csv_numeric_cells_keep_their_text() {
        let data = "Tutor Name,Stage,Phone\nAmira,007,0100\nOmar,+5,1.50\n";
        let records = read_csv(data.as_bytes(), Path::new("t.csv")).unwrap();
        assert_eq!(records[0].text(TutorField::Stage), "007");
        assert_eq!(records[0].column("Phone").unwrap().to_string(), "0100");
        assert_eq!(records[1].text(TutorField::Stage), "+5");
        assert_eq!(records[1].column("Phone").unwrap().to_string(), "1.50");
    }

    #[test]
    fn test_read_csv_short_row_leaves_fields_missing() {
        let data = "Tutor Name,Email,Status\nAmira\n";
        let records = read_csv(data.as_bytes(), Path::new("t.csv")).unwrap();
        assert_eq!(records[0].len(), 1);
        assert!(records[0].get(TutorField::Status).is_none());
    }

    #[test]
    fn test_read_csv_strips_bom_and_header_padding() {
        let data = "\u{feff}Tutor Name , Email\nAmira,a@x.org\n";
        let records = read_csv(data.as_bytes(), Path::new("t.csv")).unwrap();
        assert_eq!(records[0].text(TutorField::TutorName), "Amira");
        assert_eq!(records[0].text(TutorField::Email), "a@x.org");
    }

    #[test]
    fn test_read_json_records() {
        let data = r#"[{"Tutor Name":"Amira","Stage Range":null,"Status":"active"},
                      {"Tutor Name":"Omar","Stage Range":11}]"#;
        let records = read_json(data.as_bytes(), Path::new("t.json")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(TutorField::StageRange), Some(&CellValue::Empty));
        assert_eq!(records[1].get(TutorField::StageRange), Some(&CellValue::number(11.0)));
    }

    #[test]
    fn test_read_json_rejects_non_array() {
        let result = read_json(r#"{"a":1}"#.as_bytes(), Path::new("t.json"));
        assert!(matches!(result, Err(LoadError::NotAnArray { .. })));
    }

    #[test]
    fn test_read_json_rejects_non_object_row() {
        let result = read_json(r#"[{"a":1}, 2]"#.as_bytes(), Path::new("t.json"));
        assert!(matches!(result, Err(LoadError::RowNotObject { row: 1, .. })));
    }
}
