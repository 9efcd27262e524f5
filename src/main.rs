//! Terminal distractor runner (default binary).
//!
//! Plays one time-bounded session in the terminal, then prints the results record
//! and optionally appends it to a results file. Quitting early exits non-zero.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use tetromino_distractor::core::SimpleRng;
use tetromino_distractor::engine::{
    duration_from_secs, run_session, MonotonicClock, ResultsRecord, SessionConfig, SessionError,
    SessionHost, SessionOutcome, SessionResult, TimingConfig,
};
use tetromino_distractor::input::{KeyBindings, TerminalInput};
use tetromino_distractor::term::{fit_board_to_viewport, GameView, TerminalCanvas, Viewport, PANEL_WIDTH};
use tetromino_distractor::types::{DEFAULT_COLUMNS, DEFAULT_FRAME_RATE, DEFAULT_ROWS};

/// Exit status after a quit request
const ABORTED_EXIT_CODE: i32 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "tetromino-distractor",
    about = "Play a time-bounded falling-block distractor task in the terminal."
)]
struct Args {
    /// Session length in seconds
    #[arg(long, env = "TETROMINO_DURATION", default_value_t = 60.0)]
    duration: f64,

    /// Board width in cells
    #[arg(long, env = "TETROMINO_COLUMNS", default_value_t = DEFAULT_COLUMNS)]
    columns: u16,

    /// Board height in cells
    #[arg(long, env = "TETROMINO_ROWS", default_value_t = DEFAULT_ROWS)]
    rows: u16,

    /// Maximum frames per second
    #[arg(long, env = "TETROMINO_FPS", default_value_t = DEFAULT_FRAME_RATE)]
    fps: u32,

    /// Fixed gravity interval in milliseconds, replacing the level-based curve
    #[arg(long, env = "TETROMINO_FALL_MS")]
    fall_ms: Option<u64>,

    /// Seed for piece generation (time-based when omitted)
    #[arg(long, env = "TETROMINO_SEED")]
    seed: Option<u32>,

    /// File the results record is appended to
    #[arg(long, env = "TETROMINO_RESULTS")]
    results: Option<PathBuf>,

    /// Log file; nothing is logged when omitted
    #[arg(long, env = "TETROMINO_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig> {
        let timing = TimingConfig {
            fixed_gravity: self.fall_ms.map(Duration::from_millis),
            ..TimingConfig::default()
        };
        let config = SessionConfig::new(duration_from_secs(self.duration)?)
            .with_board(self.columns, self.rows)
            .with_frame_rate(self.fps)
            .with_timing(timing);
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = args.session_config()?;
    let seed = args.seed.unwrap_or_else(seed_from_time);
    info!(seed, "piece generator seeded");

    // Refuse to start in a terminal that cannot hold the board.
    let (w, h) = crossterm::terminal::size().context("failed to query terminal size")?;
    let view = GameView::default();
    fit_board_to_viewport(Viewport::new(w, h), view.margins(), PANEL_WIDTH, config.columns, config.rows)?;

    let mut canvas = TerminalCanvas::new(view);
    canvas.enter()?;
    let result = play(&config, seed, &mut canvas);

    // Always try to restore terminal state.
    let _ = canvas.exit();

    match result {
        Ok(outcome) => {
            let record = ResultsRecord::from(outcome);
            if let Some(path) = &args.results {
                record
                    .append_to_path(path)
                    .with_context(|| format!("failed to append results to {}", path.display()))?;
            }
            println!("{record}");
            Ok(())
        }
        Err(SessionError::Aborted) => std::process::exit(ABORTED_EXIT_CODE),
        Err(err) => Err(err.into()),
    }
}

fn play(config: &SessionConfig, seed: u32, canvas: &mut TerminalCanvas) -> SessionResult<SessionOutcome> {
    let mut input = TerminalInput::enter(KeyBindings::default()).map_err(SessionError::Backend)?;

    let mut clock = MonotonicClock::new();
    let result = run_session(
        config,
        SimpleRng::new(seed),
        SessionHost {
            clock: &mut clock,
            input: &mut input,
            render: canvas,
            audio: None,
        },
    );

    let _ = input.exit();
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // The alternate screen owns stdout and stderr, so logs only ever go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn seed_from_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
