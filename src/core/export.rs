// TutorFinder - core/export.rs
//
// CSV and JSON export of filtered tutor records.
// Core layer: writes to any Write trait object.

use crate::core::model::{TutorField, TutorRecord};
use crate::util::error::ExportError;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// Export records to CSV.
///
/// The searchable fields come first under their spreadsheet headers, followed
/// by every other column seen in any record, in header order. Cells a record
/// lacks are written empty.
pub fn export_csv<W: Write>(
    records: &[&TutorRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let extra: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.columns().map(|(header, _)| header))
        .filter(|header| TutorField::from_header(header).is_none())
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);

    let header: Vec<&str> = TutorField::all()
        .iter()
        .map(|f| f.header())
        .chain(extra.iter().copied())
        .collect();
    csv_writer.write_record(&header).map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        let row: Vec<String> = TutorField::all()
            .iter()
            .map(|f| record.text(*f))
            .chain(extra.iter().map(|h| {
                record
                    .column(h)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            }))
            .collect();
        csv_writer.write_record(&row).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export records to JSON (array of objects keyed by column header).
pub fn export_json<W: Write>(
    records: &[&TutorRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}
