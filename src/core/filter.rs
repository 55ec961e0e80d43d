// TutorFinder - core/filter.rs
//
// Multi-field filter engine for tutor records.
// All populated criteria are AND-combined.
// Core layer: pure logic, no I/O. Malformed or missing data never errors,
// it simply does not match.

use crate::core::grades::extract_grades;
use crate::core::model::{TutorField, TutorRecord};
use crate::util::constants;
use crate::util::error::QueryError;

/// Raw, un-normalised query text as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub stage: Option<String>,
    pub stage_range: Option<String>,
    pub status: Option<String>,
}

/// Normalised query. An empty criterion imposes no constraint.
///
/// Text criteria are trimmed and lower-cased; `stage_range` is trimmed and
/// upper-cased so it compares directly against canonical grade codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorQuery {
    /// Substring of the tutor name.
    pub name: String,
    /// Substring of the email address.
    pub email: String,
    /// Substring of the subject.
    pub subject: String,
    /// Exact stage.
    pub stage: String,
    /// Exact grade code, matched against any code in the stage range.
    pub stage_range: String,
    /// Exact status.
    pub status: String,
}

impl TutorQuery {
    pub fn new(params: QueryParams) -> Self {
        let lower = |v: Option<String>| v.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        Self {
            name: lower(params.name),
            email: lower(params.email),
            subject: lower(params.subject),
            stage: lower(params.stage),
            status: lower(params.status),
            stage_range: params
                .stage_range
                .map(|s| s.trim().to_uppercase())
                .unwrap_or_default(),
        }
    }

    /// Build a query from request-style `key=value` pairs.
    ///
    /// Unknown keys are ignored. A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = QueryParams::default();
        for (key, value) in pairs {
            let slot = match key.as_ref().trim() {
                constants::PARAM_NAME => &mut params.name,
                constants::PARAM_EMAIL => &mut params.email,
                constants::PARAM_SUBJECT => &mut params.subject,
                constants::PARAM_STAGE => &mut params.stage,
                constants::PARAM_STAGE_RANGE => &mut params.stage_range,
                constants::PARAM_STATUS => &mut params.status,
                other => {
                    tracing::debug!(key = other, "Ignoring unknown query parameter");
                    continue;
                }
            };
            *slot = Some(value.into());
        }
        Self::new(params)
    }

    /// Returns true if no criteria are populated.
    pub fn is_empty(&self) -> bool {
        self.active_criteria() == 0
    }

    /// Number of populated criteria.
    pub fn active_criteria(&self) -> usize {
        [
            &self.name,
            &self.email,
            &self.subject,
            &self.stage,
            &self.stage_range,
            &self.status,
        ]
        .iter()
        .filter(|c| !c.is_empty())
        .count()
    }
}

/// Split a `key=value` parameter. The value may itself contain `=`.
pub fn parse_param(raw: &str) -> Result<(String, String), QueryError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(QueryError::MalformedParam {
            raw: raw.to_string(),
        }),
    }
}

/// Apply the query to a slice of records, returning indices of matches.
///
/// Indices refer to the original slice and are in ascending order.
pub fn apply_filters(records: &[TutorRecord], query: &TutorQuery) -> Vec<usize> {
    if query.is_empty() {
        return (0..records.len()).collect();
    }

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, query))
        .map(|(idx, _)| idx)
        .collect()
}

/// Apply the query and return the matching records in input order.
pub fn filter_records<'a>(records: &'a [TutorRecord], query: &TutorQuery) -> Vec<&'a TutorRecord> {
    apply_filters(records, query)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}

/// Check if a single record satisfies every populated criterion.
pub fn matches_all(record: &TutorRecord, query: &TutorQuery) -> bool {
    // Substring criteria
    if !contains(record, TutorField::TutorName, &query.name)
        || !contains(record, TutorField::Email, &query.email)
        || !contains(record, TutorField::Subject, &query.subject)
    {
        return false;
    }

    // Exact criteria
    if !equals(record, TutorField::Stage, &query.stage)
        || !equals(record, TutorField::Status, &query.status)
    {
        return false;
    }

    // Grade membership: only parsed when asked for
    if !query.stage_range.is_empty() {
        let grades = extract_grades(record.get(TutorField::StageRange));
        if !grades.iter().any(|g| g.as_str() == query.stage_range) {
            return false;
        }
    }

    true
}

fn contains(record: &TutorRecord, field: TutorField, needle: &str) -> bool {
    needle.is_empty() || record.text(field).to_lowercase().contains(needle)
}

fn equals(record: &TutorRecord, field: TutorField, expected: &str) -> bool {
    expected.is_empty() || record.text(field).trim().to_lowercase() == expected
}
