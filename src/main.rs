//! Glycocheck: Diabetes Risk Assessment client
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glycocheck::adapters::sanitize::SanitizingMakeWriter;
use glycocheck::config::{Config, LogMode};
use glycocheck::tui::App;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Writing logs to the terminal corrupts the TUI (alternate screen).
    // Auto mode logs to a file on an interactive TTY, to stdout otherwise.
    let use_file = match config.log_mode {
        LogMode::File => true,
        LogMode::Stdout => false,
        LogMode::Auto => std::io::stdout().is_terminal(),
    };

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(!use_file)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    tracing::info!(endpoint = %config.predict_url(), "Starting Glycocheck...");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Glycocheck shutdown complete.");
    Ok(())
}
