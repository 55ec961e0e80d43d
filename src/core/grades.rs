// TutorFinder - core/grades.rs
//
// Grade range normalisation: turns a hand-typed "Stage Range" cell such as
// "eg1 - EG 04, G11" into canonical grade codes (EG01, EG04, G11).
// Core layer: pure logic, never fails. Unparseable text yields no codes.

use crate::core::model::CellValue;
use crate::util::constants;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Grade code prefix. `EG` is always tried before `G` at each position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GradePrefix {
    EG,
    G,
}

impl GradePrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradePrefix::EG => "EG",
            GradePrefix::G => "G",
        }
    }
}

/// A canonical grade code: prefix followed by a two-digit, zero-padded number.
///
/// Only [`extract_grades`] and [`extract_grades_from_text`] construct these,
/// so every value is guaranteed to be in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GradeCode {
    prefix: GradePrefix,
    code: String,
}

impl GradeCode {
    fn new(prefix: GradePrefix, digits: &str) -> Self {
        let code = format!(
            "{}{:0>width$}",
            prefix.as_str(),
            digits,
            width = constants::GRADE_NUMBER_WIDTH
        );
        Self { prefix, code }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn prefix(&self) -> GradePrefix {
        self.prefix
    }

    /// Numeric grade level, e.g. 4 for `EG04`.
    pub fn number(&self) -> u8 {
        self.code[self.prefix.as_str().len()..]
            .parse()
            .unwrap_or_default()
    }
}

impl fmt::Display for GradeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl PartialEq<str> for GradeCode {
    fn eq(&self, other: &str) -> bool {
        self.code == other
    }
}

impl PartialEq<&str> for GradeCode {
    fn eq(&self, other: &&str) -> bool {
        self.code == *other
    }
}

/// Compiled grade pattern, shared process-wide.
///
/// Leftmost-first alternation makes `EG` win over `G`, so "EG01" is never
/// read as a stray "E" followed by "G01". Digits are ASCII only.
fn grade_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(EG|G)\s*0?([0-9]{1,2})").expect("grade pattern is a valid regex")
    })
}

/// Extract canonical grade codes from an untyped spreadsheet cell.
///
/// Missing, blank, and numeric-zero cells yield no codes.
pub fn extract_grades(value: Option<&CellValue>) -> Vec<GradeCode> {
    match value {
        None => Vec::new(),
        Some(v) if v.is_blank() => Vec::new(),
        Some(v) => extract_grades_from_text(&v.to_string()),
    }
}

/// Extract canonical grade codes from free text.
///
/// Every non-overlapping occurrence contributes one code, in text order.
/// Duplicates are kept; ranges such as "EG04-EG06" are not expanded.
pub fn extract_grades_from_text(text: &str) -> Vec<GradeCode> {
    if text.is_empty() {
        return Vec::new();
    }

    let upper = text.to_uppercase();
    if constants::GRADE_SENTINELS.contains(&upper.as_str()) {
        return Vec::new();
    }

    grade_pattern()
        .captures_iter(&upper)
        .filter_map(|caps| {
            let prefix = match caps.get(1)?.as_str() {
                "EG" => GradePrefix::EG,
                _ => GradePrefix::G,
            };
            Some(GradeCode::new(prefix, caps.get(2)?.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(text: &str) -> Vec<String> {
        extract_grades_from_text(text)
            .iter()
            .map(|g| g.to_string())
            .collect()
    }

    #[test]
    fn test_sentinels_yield_nothing() {
        assert!(codes("0").is_empty());
        assert!(codes("#N/A").is_empty());
        assert!(codes("#n/a").is_empty());
        assert!(codes("").is_empty());
        assert!(extract_grades(None).is_empty());
        assert!(extract_grades(Some(&CellValue::Empty)).is_empty());
        assert!(extract_grades(Some(&CellValue::number(0.0))).is_empty());
    }

    #[test]
    fn test_single_digit_is_zero_padded() {
        assert_eq!(codes("EG1"), vec!["EG01"]);
        assert_eq!(codes("g7"), vec!["G07"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(codes("eg01"), vec!["EG01"]);
        assert_eq!(codes("Eg 12"), vec!["EG12"]);
    }

    #[test]
    fn test_multiple_occurrences_in_order() {
        assert_eq!(codes("G10, G11"), vec!["G10", "G11"]);
        assert_eq!(codes("EG01, G11"), vec!["EG01", "G11"]);
    }

    #[test]
    fn test_range_is_not_expanded() {
        assert_eq!(codes("EG04-EG06"), vec!["EG04", "EG06"]);
    }

    #[test]
    fn test_canonical_code_is_idempotent() {
        assert_eq!(codes("EG01"), vec!["EG01"]);
        assert_eq!(codes("G11"), vec!["G11"]);
    }

    #[test]
    fn test_eg_preferred_over_g() {
        let grades = extract_grades_from_text("EG01");
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].prefix(), GradePrefix::EG);
        assert_eq!(grades[0].number(), 1);
    }

    #[test]
    fn test_whitespace_and_leading_zero() {
        assert_eq!(codes("G 05"), vec!["G05"]);
        assert_eq!(codes("G\t011"), vec!["G11"]);
        assert_eq!(codes("G001"), vec!["G01"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        assert_eq!(codes("G10 / g10"), vec!["G10", "G10"]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(codes("primary school").is_empty());
        assert!(codes("grade").is_empty());
        assert!(extract_grades(Some(&CellValue::number(11.0))).is_empty());
    }

    #[test]
    fn test_long_number_is_split() {
        assert_eq!(codes("EG123"), vec!["EG12"]);
    }

    #[test]
    fn test_output_is_always_canonical() {
        let samples = [
            "EG1-EG4, g 10 and G011",
            "stage: eg 09 / Gx / G",
            "EEG1 GG2 EGG3",
            "G٣ G1",
        ];
        for sample in samples {
            for grade in extract_grades_from_text(sample) {
                let s = grade.as_str();
                let digits = s.trim_start_matches(grade.prefix().as_str());
                assert_eq!(digits.len(), 2, "non-canonical {s} from {sample:?}");
                assert!(digits.chars().all(|c| c.is_ascii_digit()), "{s}");
            }
        }
    }

    #[test]
    fn test_compares_with_str() {
        let grades = extract_grades_from_text("G11");
        assert!(grades[0] == "G11");
        assert!(grades.iter().any(|g| g == "G11"));
    }
}
