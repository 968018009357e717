use anyhow::{Context, Result};
use market_entry::config::{Config, DEFAULT_CONFIG_FILE};
use market_entry::engine::compute;
use market_entry::export::write_export;
use market_entry::tui::{self, state::AppState, TuiCommand};
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
enum Mode {
    Interactive,
    Json,
    Export,
}

fn parse_args(args: &[String]) -> Result<(Mode, PathBuf)> {
    let mut mode = Mode::Interactive;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => mode = Mode::Json,
            "--export" => mode = Mode::Export,
            "--config" => {
                let path = iter.next().context("--config needs a file path")?;
                config_path = PathBuf::from(path);
            }
            other => anyhow::bail!(
                "unknown argument '{}' (usage: market-entry [--config <path>] [--json | --export])",
                other
            ),
        }
    }
    Ok((mode, config_path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (mode, config_path) = parse_args(&args)?;
    let config = Config::load_or_default(&config_path)?;

    let log_file = std::fs::File::create(&config.logging.file).with_context(|| {
        format!("Failed to create log file: {}", config.logging.file.display())
    })?;
    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("Invalid logging filter: {}", config.logging.filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    tracing::info!(config = %config_path.display(), mode = ?mode, "market entry calculator starting");

    match mode {
        Mode::Json => {
            let results = compute(&config.scenario);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Mode::Export => {
            let results = compute(&config.scenario);
            let today = chrono::Local::now().date_naive();
            let path = write_export(&config.export.output_dir, &config.scenario, &results, today)?;
            println!("{}", path.display());
        }
        Mode::Interactive => run_interactive(config).await?,
    }
    Ok(())
}

/// Engine loop: owns the state, applies commands from the form and
/// publishes a fresh snapshot after each one.
async fn run_interactive(config: Config) -> Result<()> {
    let (state_tx, state_rx) = watch::channel(AppState::new(config.scenario.clone()));
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<TuiCommand>(16);

    let tui_handle = tokio::spawn(tui::run_tui(state_rx, cmd_tx));

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            TuiCommand::Quit => break,
            TuiCommand::SetField { key, value } => {
                state_tx.send_modify(|s| {
                    s.set_field(key, &value);
                });
            }
            TuiCommand::CycleField(key) => state_tx.send_modify(|s| s.cycle_field(key)),
            TuiCommand::Reset => state_tx.send_modify(|s| s.reset(config.scenario.clone())),
            TuiCommand::Export => {
                let today = chrono::Local::now().date_naive();
                state_tx.send_modify(|s| s.export_to(&config.export.output_dir, today));
            }
        }
    }

    tui_handle.await.context("TUI task failed to join")??;
    tracing::info!("market entry calculator stopped");
    Ok(())
}
