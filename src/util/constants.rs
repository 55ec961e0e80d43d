// TutorFinder - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "TutorFinder";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "TutorFinder";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Grade normalisation
// =============================================================================

/// Upper-cased stage-range values that mean "no grade specified".
/// Spreadsheet exports write these for blank or failed lookups.
pub const GRADE_SENTINELS: &[&str] = &["0", "#N/A"];

/// Width of the zero-padded numeric part of a grade code.
pub const GRADE_NUMBER_WIDTH: usize = 2;

// =============================================================================
// Query parameter names (request-style key=value pairs)
// =============================================================================

pub const PARAM_NAME: &str = "name";
pub const PARAM_EMAIL: &str = "email";
pub const PARAM_SUBJECT: &str = "subject";
pub const PARAM_STAGE: &str = "stage";
pub const PARAM_STAGE_RANGE: &str = "stage_range";
pub const PARAM_STATUS: &str = "status";

// =============================================================================
// Loader limits
// =============================================================================

/// Maximum size of a tutor data file in bytes.
pub const MAX_DATA_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MB

/// Maximum number of records read from a single data file.
pub const MAX_RECORDS: usize = 500_000;

/// Default data file name, resolved relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/tutors.csv";

// =============================================================================
// Output
// =============================================================================

/// Maximum number of resource links accepted from config.toml.
pub const MAX_LINKS: usize = 200;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
