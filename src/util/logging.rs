// TutorFinder - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Output: stderr, so stdout stays clean for CSV/JSON results. When
// `[logging] file` is set, events are appended to that file instead.
// Never logs tutor names, emails, or other row contents.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Where the active log level came from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource<'a> {
    /// RUST_LOG is set and is used verbatim.
    Env,
    /// `--debug` on the command line.
    DebugFlag,
    /// `[logging] level` from config.toml.
    Config(&'a str),
    /// Nothing asked for a level.
    Default,
}

impl<'a> LevelSource<'a> {
    /// Resolve the level source. RUST_LOG > --debug > config > default.
    pub fn resolve(rust_log_set: bool, debug_flag: bool, config_level: Option<&'a str>) -> Self {
        if rust_log_set {
            LevelSource::Env
        } else if debug_flag {
            LevelSource::DebugFlag
        } else if let Some(level) = config_level {
            LevelSource::Config(level)
        } else {
            LevelSource::Default
        }
    }

    /// Filter directive, or `None` when RUST_LOG supplies it.
    pub fn directive(&self) -> Option<&'a str> {
        match *self {
            LevelSource::Env => None,
            LevelSource::DebugFlag => Some("debug"),
            LevelSource::Config(level) => Some(level),
            LevelSource::Default => Some(super::constants::DEFAULT_LOG_LEVEL),
        }
    }

    fn filter(&self) -> EnvFilter {
        match self.directive() {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::from_default_env(),
        }
    }
}

/// Open a log file for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialise the logging subsystem.
///
/// A log file that cannot be opened is reported once on stderr and
/// logging carries on there.
pub fn init(debug_flag: bool, config_level: Option<&str>, log_file: Option<&Path>) {
    let source = LevelSource::resolve(std::env::var_os("RUST_LOG").is_some(), debug_flag, config_level);

    let mut file_error = None;
    let file = log_file.and_then(|path| match open_log_file(path) {
        Ok(f) => Some(f),
        Err(e) => {
            file_error = Some((path, e));
            None
        }
    });

    let to_file = file.is_some();
    let writer = match file {
        Some(f) => BoxMakeWriter::new(Mutex::new(f)),
        None => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(source.filter())
        .with_writer(writer)
        .with_ansi(!to_file)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    if let Some((path, e)) = file_error {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Could not open log file; logging to stderr"
        );
    }

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        level_source = ?source,
        "Logging initialised"
    );
}
