//! Grammar Fixer
//!
//! Command-line entry point: settings management, connection probe and a
//! correction cycle run against a simulated browser page.

mod cli;
mod cmd_config;
mod cmd_fix;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use grammarfix_config::{ConfigLoader, FileSettingsStore, SettingsStore};

use crate::cli::{Cli, Commands};
use crate::cmd_config::{handle_config_command, handle_test_command};
use crate::cmd_fix::handle_fix_command;

/// Get the grammarfix data directory path.
fn grammarfix_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("grammarfix"))
        .unwrap_or_else(|| PathBuf::from(".grammarfix"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to `<data dir>/grammarfix/logs/` with daily rotation.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = grammarfix_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("grammarfix")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The worker guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console output goes to stderr so command results stay clean on stdout.
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn settings_store(path: Option<PathBuf>) -> anyhow::Result<FileSettingsStore> {
    let path = match path {
        Some(path) => ConfigLoader::expand_path(&path.to_string_lossy()),
        None => ConfigLoader::default_path().context("Cannot locate a config directory")?,
    };
    debug!(path = %path.display(), "Using settings file");
    Ok(FileSettingsStore::new(path))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let store = Arc::new(settings_store(cli.settings)?);

    match cli.command {
        Commands::Config { action } => handle_config_command(action, store.as_ref()).await,
        Commands::Test => handle_test_command(store.as_ref()).await,
        Commands::Fix {
            text,
            page_url,
            textarea,
        } => {
            let store: Arc<dyn SettingsStore> = store;
            handle_fix_command(store, text, page_url, textarea).await
        }
    }
}
