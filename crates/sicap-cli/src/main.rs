//! `sicap` — terminal dashboard for the SI-CAP curriculum workspace.
//!
//! # Usage
//!
//! ```
//! sicap --kkm 75
//! sicap --config ~/.config/sicap/config.toml --settings-db sicap.db
//! ```
//!
//! Flags override `SICAP_*` environment variables, which override the
//! config file. Logs go to a file so they never tear the terminal UI.

mod app;
mod dialog;
mod prefs;
mod ui;

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use prefs::Prefs;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use sicap_core::{kkm::Kkm, seed, settings::AppSettings};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sicap", about = "Terminal dashboard for SI-CAP curriculum data")]
struct Args {
  /// Path to a TOML config file (settings_db, kkm, log_file).
  #[arg(short, long, value_name = "FILE", env = "SICAP_CONFIG")]
  config: Option<PathBuf>,

  /// SQLite file holding UI preferences.
  #[arg(long, value_name = "PATH")]
  settings_db: Option<PathBuf>,

  /// Minimum passing score shown on the dashboard charts (0-100).
  #[arg(long, value_name = "N")]
  kkm: Option<u8>,

  /// Where log lines are written.
  #[arg(long, value_name = "PATH")]
  log_file: Option<PathBuf>,
}

// ─── Config ───────────────────────────────────────────────────────────────────

/// Shape of the layered configuration (file, then `SICAP_*` environment).
#[derive(Deserialize, Default, Debug)]
struct ConfigFile {
  #[serde(default)]
  settings_db: Option<PathBuf>,
  #[serde(default)]
  kkm:         Option<u8>,
  #[serde(default)]
  log_file:    Option<PathBuf>,
}

/// Fully resolved start-up options.
#[derive(Debug)]
struct Options {
  settings_db: PathBuf,
  kkm:         Kkm,
  log_file:    PathBuf,
}

fn load_options(args: Args) -> Result<Options> {
  let mut builder = config::Config::builder();
  if let Some(path) = &args.config {
    builder = builder.add_source(config::File::from(path.as_path()).required(true));
  }
  let file_cfg: ConfigFile = builder
    .add_source(config::Environment::with_prefix("SICAP"))
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("failed to deserialise configuration")?;

  // CLI flags override the layered config, which overrides defaults.
  Ok(Options {
    settings_db: args
      .settings_db
      .or(file_cfg.settings_db)
      .unwrap_or_else(|| PathBuf::from("sicap.db")),
    kkm:         args.kkm.or(file_cfg.kkm).map(Kkm::new).unwrap_or_default(),
    log_file:    args
      .log_file
      .or(file_cfg.log_file)
      .unwrap_or_else(|| PathBuf::from("sicap.log")),
  })
}

fn init_logging(path: &Path) -> Result<()> {
  let file =
    File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let opts = load_options(Args::parse())?;
  init_logging(&opts.log_file)?;
  info!(?opts, "starting sicap");

  let prefs = Prefs::open(&opts.settings_db);
  let settings = AppSettings::load(&prefs).unwrap_or_else(|e| {
    warn!(error = %e, "unreadable settings; using defaults");
    AppSettings::default()
  });

  let mut app = App::new(seed::workspace(), prefs, settings, opts.kkm);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  info!("sicap exited");
  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(50)).context("polling events")? {
      continue;
    }
    match event::read().context("reading event")? {
      Event::Key(key) => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}
