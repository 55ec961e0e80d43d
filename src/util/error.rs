// TutorFinder - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Only the I/O boundaries (loading, export, config, CLI query parsing)
// produce errors; grade normalisation and filtering never fail.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all TutorFinder operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum TutorFinderError {
    /// Tutor data could not be loaded.
    Load(LoadError),

    /// Export operation failed.
    Export(ExportError),

    /// A query parameter could not be understood.
    Query(QueryError),
}

impl fmt::Display for TutorFinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Query(e) => write!(f, "Query error: {e}"),
        }
    }
}

impl std::error::Error for TutorFinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Query(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors related to reading the tutor data file.
#[derive(Debug)]
pub enum LoadError {
    /// The data file does not exist.
    NotFound { path: PathBuf },

    /// Data file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File extension is not a supported data format.
    UnsupportedFormat { path: PathBuf, extension: String },

    /// CSV parsing failed.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON parsing failed.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// JSON document is not an array of records.
    NotAnArray { path: PathBuf },

    /// A JSON record is not an object.
    RowNotObject { path: PathBuf, row: usize },

    /// Data file holds more records than allowed.
    TooManyRecords { path: PathBuf, max: usize },

    /// I/O error reading the data file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Data file '{}' does not exist", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Data file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::UnsupportedFormat { path, extension } => write!(
                f,
                "Data file '{}' has unsupported extension '.{extension}'. \
                 Export the sheet as .csv or .json records.",
                path.display()
            ),
            Self::Csv { path, source } => {
                write!(f, "Failed to parse CSV '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "Failed to parse JSON '{}': {source}", path.display())
            }
            Self::NotAnArray { path } => write!(
                f,
                "JSON data file '{}' must be a top-level array of records",
                path.display()
            ),
            Self::RowNotObject { path, row } => {
                write!(f, "'{}' row {row}: record is not a JSON object", path.display())
            }
            Self::TooManyRecords { path, max } => write!(
                f,
                "Data file '{}' holds more than {max} records",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for TutorFinderError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for TutorFinderError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Errors related to parsing caller-supplied query parameters.
#[derive(Debug)]
pub enum QueryError {
    /// A `key=value` parameter had no `=` or an empty key.
    MalformedParam { raw: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedParam { raw } => {
                write!(f, "Malformed query parameter '{raw}', expected key=value")
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for TutorFinderError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

/// Convenience type alias for TutorFinder results.
pub type Result<T> = std::result::Result<T, TutorFinderError>;
