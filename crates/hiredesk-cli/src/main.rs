//! `hiredesk`: terminal recruiter dashboard for the applicant-tracking API.
//!
//! # Usage
//!
//! ```
//! hiredesk --url https://ats.example.com/api --token <jwt> --save-token
//! hiredesk --config ~/.config/hiredesk/config.toml --org 3
//! ```

mod app;
mod client;
mod session;
mod settings;
mod ui;

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hiredesk_core::api::RecruitingApi;
use ratatui::{Terminal, backend::CrosstermBackend};
use session::TokenStore;
use settings::{Overrides, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hiredesk", version, about = "Terminal recruiter dashboard")]
struct Args {
  /// Path to a TOML config file (default: ~/.config/hiredesk/config.toml).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the API, including the `/api` prefix.
  #[arg(long, env = "HIREDESK_URL")]
  url: Option<String>,

  /// Bearer token; falls back to the one saved by `--save-token`.
  #[arg(long, env = "HIREDESK_TOKEN", hide_env_values = true)]
  token: Option<String>,

  /// Organization to scope requests to, instead of the first membership.
  #[arg(long, env = "HIREDESK_ORG")]
  org: Option<i64>,

  /// Remember the token for later sessions.
  #[arg(long)]
  save_token: bool,

  /// Where downloaded documents are written.
  #[arg(long, value_name = "DIR")]
  download_dir: Option<PathBuf>,

  /// Log file (the terminal belongs to the UI).
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let settings = Settings::load(Overrides {
    config_file:     args.config,
    base_url:        args.url,
    token:           args.token,
    organization_id: args.org,
    download_dir:    args.download_dir,
    log_file:        args.log_file,
  })?;

  init_tracing(&settings)?;
  tracing::info!(base_url = %settings.base_url, "starting");

  let store = TokenStore::new(&settings.session_file);
  let token = match settings.token.clone() {
    Some(token) => {
      if args.save_token {
        store.save(&token)?;
      }
      Some(token)
    }
    None => store.load()?,
  };
  if token.is_none() {
    tracing::warn!("no bearer token configured; requests will be anonymous");
  }

  let client = ApiClient::new(ApiConfig {
    base_url: settings.base_url.clone(),
    token,
    timeout: Duration::from_secs(settings.timeout_secs),
  })?;
  let mut app = App::new(client)
    .with_organization(settings.organization_id)
    .with_download_dir(settings.download_dir.clone())
    .with_token_store(store);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  if app.signed_out {
    println!("Signed out.");
  }
  run_result
}

fn init_tracing(settings: &Settings) -> Result<()> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&settings.log_file)
    .with_context(|| format!("opening log file {}", settings.log_file.display()))?;

  tracing_subscriber::fmt()
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<A: RecruitingApi>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<A>,
) -> Result<()> {
  while app.running {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Queued work runs after the frame so loading states are visible.
    if !app.pending.is_empty() {
      app.run_pending().await;
      continue;
    }

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    app.toasts.prune();
    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
    {
      app.handle_key(key);
    }
  }

  Ok(())
}
