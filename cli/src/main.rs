//! CLI entrypoint for scout
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use scout_application::{NoTranscript, TranscriptLogger};
use scout_domain::Effort;
use scout_infrastructure::{
    ArboardClipboard, ConfigLoader, FileConfig, HttpModelCatalog, JsonlTranscriptLogger,
    LangGraphBackend,
};
use scout_presentation::{Cli, TuiApp, TuiOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        let config = load_config(&cli)?;
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let config = load_config(&cli)?;

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(|e| format!("  - {}", e)).collect();
        bail!("Invalid configuration:\n{}", details.join("\n"));
    }
    let effort: Effort = match cli.effort {
        Some(arg) => arg.into(),
        None => config.defaults.parse_effort()?,
    };

    // The TUI owns the terminal, so logs go to a file
    let _log_guard = init_logging(cli.verbose, config.logging.resolved_file().as_deref());

    info!("Starting scout against {}", config.backend.normalized_base_url());

    // === Dependency Injection ===
    let base_url = config.backend.normalized_base_url().to_string();
    let backend = Arc::new(LangGraphBackend::new(
        base_url.clone(),
        config.backend.assistant_id.clone(),
    ));
    let catalog = Arc::new(
        HttpModelCatalog::new(base_url.clone(), config.backend.request_timeout())
            .context("Failed to build HTTP client")?,
    );
    let clipboard = Arc::new(ArboardClipboard::new());
    let transcript: Arc<dyn TranscriptLogger> = match config
        .logging
        .transcript_dir
        .as_ref()
        .and_then(|dir| JsonlTranscriptLogger::in_dir(dir))
    {
        Some(logger) => {
            info!("Writing transcript to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoTranscript),
    };

    let options = TuiOptions {
        reveal_delay: config.ui.reveal_delay(),
        copied_feedback: config.ui.copied_feedback(),
        tick: config.ui.tick(),
        max_input_height: config.ui.max_input_height,
        effort,
        preferred_model: config.defaults.model.clone(),
        backend_label: base_url,
    };

    let mut app = TuiApp::new(backend, catalog, clipboard, transcript, options);
    app.run().await?;

    info!("scout exited");
    Ok(())
}

/// Merge config sources, then apply CLI flags on top
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(url) = &cli.url {
        config.backend.base_url = url.clone();
    }
    if let Some(model) = &cli.model {
        config.defaults.model = Some(model.clone());
    }
    if let Some(effort) = cli.effort {
        config.defaults.effort = Effort::from(effort).as_str().to_string();
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.clone());
    }
    Ok(config)
}

/// Install the tracing subscriber writing to `log_file`.
///
/// `-v` flags win over `RUST_LOG`. Without a usable file nothing is logged.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let path = log_file?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path.file_name()?;
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Could not create log directory {}: {}", dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();

    if verbose > 0 {
        warn!("Verbose logging enabled (level {})", verbose);
    }
    Some(guard)
}
