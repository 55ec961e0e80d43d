// TutorFinder - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Cell values
// =============================================================================

/// A single untyped spreadsheet cell.
///
/// The source sheet is hand-maintained, so any column may hold a number,
/// a boolean, free text, or nothing at all. Numbers keep the text they were
/// read from, so "0100" or "+5" compare and export exactly as written.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number { value: f64, raw: String },
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// A number whose text form is its canonical rendering.
    pub fn number(value: f64) -> Self {
        CellValue::Number {
            value,
            raw: canonical_number(value),
        }
    }

    /// Type a raw CSV cell: empty, integer/float, `true`/`false`, else text.
    pub fn guess(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Empty;
        }
        let value = raw
            .parse::<i64>()
            .map(|i| i as f64)
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()));
        if let Some(value) = value {
            return CellValue::Number {
                value,
                raw: raw.to_string(),
            };
        }
        match raw {
            "true" => CellValue::Bool(true),
            "false" => CellValue::Bool(false),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// True for cells that carry no usable value (missing, empty text, zero).
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number { value, .. } => *value == 0.0,
            CellValue::Bool(b) => !b,
            CellValue::Text(s) => s.is_empty(),
        }
    }
}

/// Whole numbers render without a trailing ".0".
fn canonical_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number { raw, .. } => f.write_str(raw),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            // A number written as "0100" or "+5" would lose its spelling as a
            // JSON number, so it is exported as a string instead.
            CellValue::Number { value, raw } if *raw != canonical_number(*value) => {
                serializer.serialize_str(raw)
            }
            CellValue::Number { value, .. } if value.fract() == 0.0 && value.abs() < 1e15 => {
                serializer.serialize_i64(*value as i64)
            }
            CellValue::Number { value, .. } => serializer.serialize_f64(*value),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::number(n)
    }
}

// =============================================================================
// Known fields
// =============================================================================

/// The searchable tutor fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TutorField {
    TutorName,
    Email,
    Subject,
    Stage,
    StageRange,
    Status,
}

impl TutorField {
    /// All searchable fields in display order.
    pub fn all() -> &'static [TutorField] {
        &[
            TutorField::TutorName,
            TutorField::Email,
            TutorField::Subject,
            TutorField::Stage,
            TutorField::StageRange,
            TutorField::Status,
        ]
    }

    /// Column header as written in the tutor spreadsheet.
    pub fn header(&self) -> &'static str {
        match self {
            TutorField::TutorName => "Tutor Name",
            TutorField::Email => "Email",
            TutorField::Subject => "Subject",
            TutorField::Stage => "Stage",
            TutorField::StageRange => "Stage Range",
            TutorField::Status => "Status",
        }
    }

    /// Resolve a raw column header to a known field.
    ///
    /// Case, spaces, underscores and hyphens are ignored, so `Tutor Name`,
    /// `TutorName` and `tutor_name` all resolve to [`TutorField::TutorName`].
    pub fn from_header(header: &str) -> Option<TutorField> {
        let key = header_key(header);
        TutorField::all()
            .iter()
            .copied()
            .find(|field| header_key(field.header()) == key)
    }
}

impl fmt::Display for TutorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

fn header_key(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Tutor record
// =============================================================================

/// One row of the tutor spreadsheet: column header -> cell value.
///
/// Records are read-only snapshots. Columns beyond the searchable fields are
/// preserved so exports carry the full row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TutorRecord {
    columns: BTreeMap<String, CellValue>,
}

impl TutorRecord {
    /// Build a record from `(header, value)` pairs. Later duplicates win.
    pub fn from_columns<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up a raw column by its exact header.
    pub fn column(&self, header: &str) -> Option<&CellValue> {
        self.columns.get(header)
    }

    /// Look up a searchable field, tolerating header spelling variants.
    pub fn get(&self, field: TutorField) -> Option<&CellValue> {
        if let Some(value) = self.columns.get(field.header()) {
            return Some(value);
        }
        self.columns
            .iter()
            .find(|(header, _)| TutorField::from_header(header) == Some(field))
            .map(|(_, value)| value)
    }

    /// Text form of a field; a missing field reads as the empty string.
    pub fn text(&self, field: TutorField) -> String {
        self.get(field).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Iterate over all columns in header order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for TutorRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.columns.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_cell_types() {
        assert_eq!(CellValue::guess(""), CellValue::Empty);
        assert_eq!(CellValue::guess("11"), CellValue::number(11.0));
        assert_eq!(CellValue::guess("2.5"), CellValue::number(2.5));
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(CellValue::guess("G11"), CellValue::Text("G11".to_string()));
        assert_eq!(CellValue::guess("NaN"), CellValue::Text("NaN".to_string()));
    }

    #[test]
    fn test_number_display_drops_integral_fraction() {
        assert_eq!(CellValue::number(1001.0).to_string(), "1001");
        assert_eq!(CellValue::number(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_guessed_number_keeps_source_text() {
        for raw in ["007", "+5", "1.50", "0100", "-0"] {
            let cell = CellValue::guess(raw);
            assert!(matches!(cell, CellValue::Number { .. }), "{raw}");
            assert_eq!(cell.to_string(), raw);
        }
        assert!(CellValue::guess("000").is_blank());
    }

    #[test]
    fn test_number_serialises_as_written() {
        let json = serde_json::to_string(&[
            CellValue::guess("0100"),
            CellValue::guess("12"),
            CellValue::guess("2.5"),
        ])
        .unwrap();
        assert_eq!(json, r#"["0100",12,2.5]"#);
    }

    #[test]
    fn test_field_from_header_variants() {
        assert_eq!(
            TutorField::from_header("Tutor Name"),
            Some(TutorField::TutorName)
        );
        assert_eq!(
            TutorField::from_header("TutorName"),
            Some(TutorField::TutorName)
        );
        assert_eq!(
            TutorField::from_header(" stage_range "),
            Some(TutorField::StageRange)
        );
        assert_eq!(TutorField::from_header("Phone"), None);
    }

    #[test]
    fn test_record_get_resolves_aliases() {
        let record = TutorRecord::from_columns([
            ("StageRange", CellValue::from("G11")),
            ("Email", CellValue::from("a@b.com")),
        ]);
        assert_eq!(record.text(TutorField::StageRange), "G11");
        assert_eq!(record.text(TutorField::Email), "a@b.com");
    }

    #[test]
    fn test_missing_field_reads_empty() {
        let record = TutorRecord::default();
        assert!(record.get(TutorField::Status).is_none());
        assert_eq!(record.text(TutorField::Status), "");
    }

    #[test]
    fn test_record_serialises_as_object() {
        let record = TutorRecord::from_columns([
            ("Tutor Name", CellValue::from("Sara")),
            ("Stage", CellValue::Empty),
            ("Id", CellValue::number(7.0)),
        ]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Id":7,"Stage":null,"Tutor Name":"Sara"}"#);
    }
}
