use log::{debug, info, warn};

use prize_wheel::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::raffle::config_reader::*;
use crate::raffle::io_common::simplify_file_name;
use crate::raffle::terminal::{ClockScheduler, TerminalRenderer};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;
mod terminal;

#[derive(Debug, Snafu)]
pub enum RaffleError {
    #[snafu(display("Unsupported file type '{extension}' for {path}: expected csv, txt or xlsx"))]
    UnsupportedFileType { path: String, extension: String },
    #[snafu(display("Could not read the file {path}"))]
    ReadingText {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Could not read the file {path}: it is not valid UTF-8 text"))]
    DecodingText {
        source: std::string::FromUtf8Error,
        path: String,
    },
    #[snafu(display("Could not read the spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Could not read the spreadsheet {path}: no worksheet named {worksheet}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("Could not read the spreadsheet {path}: the workbook has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("{source}"))]
    ParsingParticipants { source: ParseError },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a number"))]
    ParsingJsonNumber {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("{source}"))]
    Session { source: SessionError },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the draws and the reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RaffleResult<T> = Result<T, RaffleError>;

/// The formats a participant file can come in.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    /// Semicolon separated text.
    Csv,
    /// Excel workbook.
    Xlsx,
}

impl InputType {
    /// The input type named by the user (`--input-type` or the `provider` of the config).
    pub fn from_name(path: &str, name: &str) -> RaffleResult<InputType> {
        match name.to_lowercase().as_str() {
            "csv" | "txt" => Ok(InputType::Csv),
            "xlsx" => Ok(InputType::Xlsx),
            x => UnsupportedFileTypeSnafu {
                path,
                extension: x,
            }
            .fail(),
        }
    }

    /// The input type deduced from the extension of the file.
    pub fn from_path(path: &str) -> RaffleResult<InputType> {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        InputType::from_name(path, extension)
    }
}

/// Reads the participants of a file. Failures leave nothing behind: either the whole
/// list is returned, or an error.
pub fn read_participants(
    path: &str,
    input_type: InputType,
    worksheet_name: Option<&str>,
) -> RaffleResult<Vec<Participant>> {
    info!(
        "Attempting to read participant file {:?} as {:?}",
        path, input_type
    );
    match input_type {
        InputType::Csv => io_csv::read_csv_participants(path),
        InputType::Xlsx => io_xlsx::read_xlsx_participants(path, worksheet_name),
    }
}

/// The settings of a raffle, once the configuration file and the command line are merged.
#[derive(PartialEq, Debug, Clone)]
pub struct RaffleSettings {
    pub raffle_name: String,
    pub input: Option<(String, InputType)>,
    pub worksheet_name: Option<String>,
    pub count: Option<usize>,
    pub rules: SpinRules,
    pub frame_interval: Duration,
    pub seed: Option<u64>,
    pub draws: Option<usize>,
}

const DEFAULT_RAFFLE_NAME: &str = "Raffle";
const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Merges the command line arguments over the configuration file, if any.
pub fn resolve_settings(
    args: &Args,
    config: Option<(&RaffleConfig, &Path)>,
) -> RaffleResult<RaffleSettings> {
    let (config, root_dir) = match config {
        Some((c, root)) => (c.clone(), Some(root)),
        None => (RaffleConfig::default(), None),
    };
    let source = config.participant_source.clone();

    let input_path: Option<String> = match (&args.input, &source) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(s)) => {
            let p: PathBuf = match root_dir {
                Some(root) => [root, Path::new(&s.file_path)].iter().collect(),
                None => PathBuf::from(&s.file_path),
            };
            Some(p.as_path().display().to_string())
        }
        (None, None) => None,
    };
    let input = match input_path {
        Some(path) => {
            let provider = args
                .input_type
                .clone()
                .or_else(|| source.as_ref().and_then(|s| s.provider.clone()));
            let input_type = match provider {
                Some(name) => InputType::from_name(&path, &name)?,
                None => InputType::from_path(&path)?,
            };
            Some((path, input_type))
        }
        None => None,
    };

    let spin = config.spin_settings.clone().unwrap_or_default();
    let defaults = SpinRules::DEFAULT_RULES;
    let rules = SpinRules {
        min_turns: spin.min_turns.unwrap_or(defaults.min_turns),
        extra_turns: spin.extra_turns.unwrap_or(defaults.extra_turns),
        duration: args
            .duration_ms
            .or(spin.duration_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.duration),
    };

    let seed = match args.seed {
        Some(s) => Some(s),
        None => config.random_seed()?,
    };

    Ok(RaffleSettings {
        raffle_name: config
            .raffle_name
            .clone()
            .unwrap_or_else(|| DEFAULT_RAFFLE_NAME.to_string()),
        input,
        worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or_else(|| source.and_then(|s| s.excel_worksheet_name)),
        count: args.count.or(config.participant_count),
        rules,
        frame_interval: spin
            .frame_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_FRAME_INTERVAL),
        seed,
        draws: args.draws.or(config.number_of_draws),
    })
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub raffle: String,
    pub source: Option<String>,
    pub participants: usize,
    pub seed: Option<String>,
}

fn draws_to_json(draws: &[Draw]) -> Vec<JSValue> {
    draws
        .iter()
        .map(|d| {
            json!({
                "round": d.round,
                "winner": { "id": d.participant.id, "name": d.participant.name },
                "remaining": d.remaining
            })
        })
        .collect()
}

fn build_summary_js(config: &OutputConfig, draws: &[Draw]) -> JSValue {
    json!({
        "config": config,
        "results": draws_to_json(draws) })
}

fn new_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Builds the session for the participants described in the settings.
fn open_session(settings: &RaffleSettings) -> RaffleResult<RaffleSession<StdRng>> {
    let selector = SpinSelector::new(new_rng(settings.seed), settings.rules.clone());
    match (&settings.input, settings.count) {
        (Some((path, input_type)), _) => {
            let participants =
                read_participants(path, *input_type, settings.worksheet_name.as_deref())?;
            Ok(RaffleSession::new(participants, true, selector))
        }
        (None, Some(count)) => RaffleSession::from_count(count, selector).context(SessionSnafu {}),
        (None, None) => {
            whatever!("No participants: provide a file with --input or a number with --count")
        }
    }
}

/// Spins the wheel until the requested number of draws is reached, or until fewer than
/// 2 participants remain.
pub fn draw_winners<S: Scheduler, D: Renderer>(
    session: &mut RaffleSession<StdRng>,
    max_draws: Option<usize>,
    scheduler: &mut S,
    renderer: &mut D,
) -> RaffleResult<Vec<Draw>> {
    while session.can_spin() && max_draws.map_or(true, |m| session.history().len() < m) {
        let winner = session.spin(scheduler, renderer).context(SessionSnafu {})?;
        debug!("draw_winners: winner {:?}", winner);
        session.remove_winner().context(SessionSnafu {})?;
    }
    if let Some(m) = max_draws {
        if session.history().len() < m {
            warn!(
                "Only {} draws out of {} requested: not enough participants left",
                session.history().len(),
                m
            );
        }
    }
    Ok(session.history().to_vec())
}

fn write_summary(out: &str, pretty_js: &str) -> RaffleResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js);
        Ok(())
    } else {
        info!("Writing summary to {}", out);
        fs::write(out, pretty_js).context(WritingSummarySnafu { path: out })
    }
}

/// Checks the summary against a reference file and prints the differences.
fn check_reference(reference_path: &str, pretty_js_stats: &str) -> RaffleResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("The draws match the reference summary {}", reference_path);
    Ok(())
}

pub fn run_raffle(args: &Args) -> RaffleResult<()> {
    let config = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            Some((config, root_p))
        }
        None => None,
    };
    let settings = resolve_settings(args, config.as_ref().map(|(c, p)| (c, p.as_path())))?;
    info!("settings: {:?}", settings);

    let mut session = open_session(&settings)?;
    info!(
        "Starting raffle {:?} with {} participants",
        settings.raffle_name,
        session.pool().len()
    );
    let initial_count = session.pool().len();

    let mut scheduler = ClockScheduler::new(settings.frame_interval);
    let mut renderer = TerminalRenderer::new(session.is_from_file());
    renderer.show_pool(session.pool());
    let draws = draw_winners(&mut session, settings.draws, &mut scheduler, &mut renderer)?;
    renderer.show_remaining(session.pool());

    let output_config = OutputConfig {
        raffle: settings.raffle_name.clone(),
        source: settings
            .input
            .as_ref()
            .map(|(p, _)| simplify_file_name(p)),
        participants: initial_count,
        seed: settings.seed.map(|s| s.to_string()),
    };
    let result_js = build_summary_js(&output_config, &draws);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    if let Some(out) = &args.out {
        write_summary(out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    Ok(())
}
