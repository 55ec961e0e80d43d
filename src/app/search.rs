// TutorFinder - app/search.rs
//
// One search request: load a fresh snapshot of the tutor data, apply the
// query, and hand back the snapshot together with the matching indices.
// The dataset is never cached between calls.

use crate::core::filter::{self, TutorQuery};
use crate::core::model::TutorRecord;
use crate::util::error::LoadError;
use std::path::Path;

/// Outcome of a single search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Every record loaded for this search.
    pub records: Vec<TutorRecord>,

    /// Indices of records matching the query (into `records`), ascending.
    pub matched: Vec<usize>,
}

impl SearchOutcome {
    /// Matching records in their original order.
    pub fn matches(&self) -> Vec<&TutorRecord> {
        self.matched.iter().map(|&idx| &self.records[idx]).collect()
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }
}

/// Filter an already-loaded snapshot.
pub fn search(records: Vec<TutorRecord>, query: &TutorQuery) -> SearchOutcome {
    let matched = filter::apply_filters(&records, query);
    tracing::info!(
        criteria = query.active_criteria(),
        total = records.len(),
        matched = matched.len(),
        "Search complete"
    );
    SearchOutcome { records, matched }
}

/// Load the data file and filter it.
pub fn run_search(data_path: &Path, query: &TutorQuery) -> Result<SearchOutcome, LoadError> {
    let records = crate::platform::fs::load_records(data_path)?;
    Ok(search(records, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::QueryParams;
    use crate::core::model::{CellValue, TutorField};

    fn make_record(name: &str, stage_range: &str) -> TutorRecord {
        TutorRecord::from_columns([
            ("Tutor Name", CellValue::from(name)),
            ("Stage Range", CellValue::from(stage_range)),
        ])
    }

    #[test]
    fn test_search_returns_matches_in_order() {
        let records = vec![
            make_record("Amira", "G10, G11"),
            make_record("Omar", "EG01"),
            make_record("Laila", "g11"),
        ];
        let query = TutorQuery::new(QueryParams {
            stage_range: Some("G11".to_string()),
            ..Default::default()
        });
        let outcome = search(records, &query);
        assert_eq!(outcome.total(), 3);
        let names: Vec<String> = outcome
            .matches()
            .iter()
            .map(|r| r.text(TutorField::TutorName))
            .collect();
        assert_eq!(names, vec!["Amira", "Laila"]);
    }

    #[test]
    fn test_run_search_reloads_each_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tutors.csv");
        std::fs::write(&path, "Tutor Name,Status\nAmira,active\n").unwrap();

        let query = TutorQuery::default();
        assert_eq!(run_search(&path, &query).unwrap().matched.len(), 1);

        std::fs::write(&path, "Tutor Name,Status\nAmira,active\nOmar,active\n").unwrap();
        assert_eq!(run_search(&path, &query).unwrap().matched.len(), 2);
    }

    #[test]
    fn test_run_search_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_search(&dir.path().join("nope.csv"), &TutorQuery::default());
        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }
}
