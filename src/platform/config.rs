// TutorFinder - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for TutorFinder configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/tutorfinder/ or %APPDATA%\TutorFinder\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of config.toml inside the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[data]` section.
    pub data: DataSection,
    /// `[output]` section.
    pub output: OutputSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[[links]]` entries.
    pub links: Vec<RawLink>,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Tutor data file (.csv or .json).
    pub path: Option<String>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Default output format: "table", "csv" or "json".
    pub format: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Append log events to this file instead of stderr.
    pub file: Option<String>,
}

/// One `[[links]]` entry.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct RawLink {
    pub title: String,
    pub url: String,
}

/// Result rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A titled resource link.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Tutor data file.
    pub data_path: PathBuf,
    /// Default result format.
    pub output_format: OutputFormat,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path, if logging should go to a file.
    pub log_file: Option<PathBuf>,
    /// Resource links shown by the `links` command.
    pub links: Vec<ResourceLink>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(constants::DEFAULT_DATA_FILE),
            output_format: OutputFormat::default(),
            log_level: None,
            log_file: None,
            links: Vec::new(),
        }
    }
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults and a warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    let (config, warnings) = parse_config(&content, config_path);
    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    (config, warnings)
}

/// Parse and validate config.toml content. `path` is used for messages only.
pub fn parse_config(content: &str, path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Data: path --
    if let Some(ref data_path) = raw.data.path {
        if data_path.trim().is_empty() {
            warnings.push(format!(
                "[data] path is empty. Using default ({}).",
                constants::DEFAULT_DATA_FILE
            ));
        } else {
            config.data_path = PathBuf::from(data_path);
        }
    }

    // -- Output: format --
    if let Some(ref format) = raw.output.format {
        match OutputFormat::parse(format) {
            Some(f) => config.output_format = f,
            None => warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[output] format".to_string(),
                    value: format.clone(),
                    expected: "\"table\", \"csv\" or \"json\"; using table".to_string(),
                }
                .to_string(),
            ),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if file.trim().is_empty() {
            warnings.push("[logging] file is empty. Logging to stderr.".to_string());
        } else {
            config.log_file = Some(PathBuf::from(file.trim()));
        }
    }

    // -- Links --
    for (idx, link) in raw.links.into_iter().enumerate() {
        if config.links.len() >= constants::MAX_LINKS {
            warnings.push(format!(
                "More than {} [[links]] entries; the rest are ignored.",
                constants::MAX_LINKS
            ));
            break;
        }
        let title = link.title.trim();
        let url = link.url.trim();
        if title.is_empty() || url.is_empty() {
            warnings.push(format!(
                "[[links]] entry {} needs both a title and a url; skipped.",
                idx + 1
            ));
            continue;
        }
        config.links.push(ResourceLink {
            title: title.to_string(),
            url: url.to_string(),
        });
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> (AppConfig, Vec<String>) {
        parse_config(content, Path::new("config.toml"))
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert!(warnings.is_empty());
        assert_eq!(config.data_path, PathBuf::from(constants::DEFAULT_DATA_FILE));
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.links.is_empty());
    }

    #[test]
    fn test_full_config() {
        let (config, warnings) = parse(
            r#"
            [data]
            path = "/srv/tutors.json"

            [output]
            format = "JSON"

            [logging]
            level = "Debug"
            file = "/var/log/tutorfinder.log"

            [[links]]
            title = "Tutor portal"
            url = "https://tutors.example.org/"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.data_path, PathBuf::from("/srv/tutors.json"));
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.log_file.as_deref(),
            Some(Path::new("/var/log/tutorfinder.log"))
        );
        assert_eq!(config.links.len(), 1);
        assert_eq!(config.links[0].title, "Tutor portal");
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (config, warnings) = parse(
            r#"
            [output]
            format = "xml"

            [logging]
            level = "loud"

            [[links]]
            title = "No url"
            "#,
        );
        assert_eq!(warnings.len(), 3, "{warnings:?}");
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.log_level.is_none());
        assert!(config.links.is_empty());
    }

    #[test]
    fn test_blank_log_file_keeps_stderr() {
        let (config, warnings) = parse("[logging]\nfile = \"  \"\n");
        assert_eq!(warnings.len(), 1, "{warnings:?}");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_unparseable_config_falls_back() {
        let (config, warnings) = parse("[data\npath = ");
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.data_path, PathBuf::from(constants::DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let (_, warnings) = load_config(&dir.path().join("config.toml"));
        assert!(warnings.is_empty());
    }
}
