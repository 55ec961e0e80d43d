// TutorFinder - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to the search or links command

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tutorfinder::core::export;
use tutorfinder::core::filter::{parse_param, TutorQuery};
use tutorfinder::core::model::TutorRecord;
use tutorfinder::platform::config::{self, AppConfig, OutputFormat, PlatformPaths};
use tutorfinder::util::error::{ExportError, Result, TutorFinderError};
use tutorfinder::{app, ui, util};

/// TutorFinder - search tutor records by name, subject, stage and grade.
///
/// Grade ranges are matched after normalisation, so "eg1 - EG 04" matches
/// a search for EG01 or EG04.
#[derive(Parser, Debug)]
#[command(name = "TutorFinder", version, about)]
struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search tutor records. All given criteria must match.
    Search(SearchArgs),

    /// List the configured resource links.
    Links,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Tutor data file (.csv or .json). Overrides [data] path.
    #[arg(short = 'i', long = "data")]
    data: Option<PathBuf>,

    /// Tutor name contains (case-insensitive).
    #[arg(long)]
    name: Option<String>,

    /// Email contains (case-insensitive).
    #[arg(long)]
    email: Option<String>,

    /// Subject contains (case-insensitive).
    #[arg(long)]
    subject: Option<String>,

    /// Stage equals (case-insensitive).
    #[arg(long)]
    stage: Option<String>,

    /// Grade code covered by the stage range, e.g. EG01 or G11.
    #[arg(long = "stage-range")]
    stage_range: Option<String>,

    /// Status equals (case-insensitive).
    #[arg(long)]
    status: Option<String>,

    /// Request-style criterion, e.g. --param stage_range=G11. Repeatable.
    /// Applied after the dedicated flags, so it wins on conflict.
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Output format. Overrides [output] format.
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<OutputFormat>,

    /// Write results to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

impl SearchArgs {
    fn query(&self) -> Result<TutorQuery> {
        let params = self
            .params
            .iter()
            .map(|raw| parse_param(raw))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let flags = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("stage", &self.stage),
            ("stage_range", &self.stage_range),
            ("status", &self.status),
        ];
        let mut pairs: Vec<(String, String)> = flags
            .into_iter()
            .filter_map(|(key, value)| value.clone().map(|v| (key.to_string(), v)))
            .collect();
        pairs.extend(params);

        Ok(TutorQuery::from_pairs(pairs))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "TutorFinder starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    let result = match &cli.command {
        Command::Search(args) => run_search(args, &app_config),
        Command::Links => run_links(&app_config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_search(args: &SearchArgs, app_config: &AppConfig) -> Result<()> {
    let query = args.query()?;
    let data_path = args
        .data
        .as_deref()
        .unwrap_or(app_config.data_path.as_path());
    let format = args.format.unwrap_or(app_config.output_format);

    let outcome = app::search::run_search(data_path, &query)?;
    let matches = outcome.matches();

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
                path: path.clone(),
                source: e,
            })?;
            write_results(&matches, format, std::io::BufWriter::new(file), path)?;
            tracing::info!(path = %path.display(), count = matches.len(), "Results written");
        }
        None => {
            let stdout = std::io::stdout();
            write_results(&matches, format, stdout.lock(), Path::new("<stdout>"))?;
        }
    }

    if format == OutputFormat::Table {
        eprintln!("{} of {} tutors matched.", matches.len(), outcome.total());
    }
    Ok(())
}

fn write_results<W: Write>(
    matches: &[&TutorRecord],
    format: OutputFormat,
    mut writer: W,
    path: &Path,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            export::export_csv(matches, &mut writer, path)?;
        }
        OutputFormat::Json => {
            export::export_json(matches, &mut writer, path)?;
            writeln!(writer).map_err(|e| io_err(path, e))?;
        }
        OutputFormat::Table => {
            writeln!(writer, "{}", ui::table::records_table(matches))
                .map_err(|e| io_err(path, e))?;
        }
    }
    writer.flush().map_err(|e| io_err(path, e))?;
    Ok(())
}

fn run_links(app_config: &AppConfig) -> Result<()> {
    if app_config.links.is_empty() {
        eprintln!("No resource links configured. Add [[links]] entries to config.toml.");
        return Ok(());
    }
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", ui::table::links_table(&app_config.links))
        .map_err(|e| io_err(Path::new("<stdout>"), e))?;
    Ok(())
}

fn io_err(path: &Path, source: std::io::Error) -> TutorFinderError {
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
    .into()
}
