use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use audio_endpoint_list::audio::EndpointSnapshot;
use audio_endpoint_list::config::{Config, ConfigLoader};
use audio_endpoint_list::report::{ConsoleSink, ReportRenderer, ReportSink, Verbosity};
use audio_endpoint_list::system;

#[derive(Parser)]
#[command(name = "audio-endpoint-list")]
#[command(about = "Enumerate audio endpoint devices and print a one-shot report")]
#[command(version)]
struct Cli {
    /// Show index and description only instead of the full per-device line
    #[arg(short, long)]
    terse: bool,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Present the report in a blocking dialog (Windows only)
    #[arg(long)]
    dialog: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let (config, config_err) = load_config(cli.config.as_deref());

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!("audio_endpoint_list={}", log_level))
        .init();

    if let Some(e) = config_err {
        warn!("configuration not loaded, using defaults: {:#}", e);
    }

    let verbosity = if cli.terse {
        Verbosity::Terse
    } else {
        config.report.verbosity
    };
    let title = cli.title.unwrap_or(config.report.title);
    let use_dialog = cli.dialog || config.report.dialog;

    run_pass(verbosity, &title, use_dialog);

    // The process exits 0 on every path, including pass-level failures.
    // The original tool behaved this way and callers rely on it.
}

/// CLI flags override the file; a broken or missing file never aborts the
/// tool, it falls back to defaults.
fn load_config(path: Option<&str>) -> (Config, Option<anyhow::Error>) {
    let loader = match path {
        Some(p) => Ok(ConfigLoader::new_production(PathBuf::from(p))),
        None => ConfigLoader::new_with_default_path(),
    };

    match loader.and_then(|l| l.load_config()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

/// One enumeration pass: snapshot, render, present. Pass-level failures
/// produce no report, only a warning.
fn run_pass(verbosity: Verbosity, title: &str, use_dialog: bool) {
    let source = match system::native_source() {
        Ok(source) => source,
        Err(e) => {
            warn!("audio subsystem unavailable: {}", e);
            return;
        }
    };

    let records = match EndpointSnapshot::new(source).capture() {
        Ok(records) => records,
        Err(e) => {
            warn!("enumeration pass aborted: {}", e);
            return;
        }
    };

    info!("report covers {} device(s)", records.len());
    let body = ReportRenderer::new(verbosity).render(&records);

    if let Err(e) = make_sink(use_dialog).present(title, &body) {
        warn!("failed to present report: {:#}", e);
    }
}

fn make_sink(use_dialog: bool) -> Box<dyn ReportSink> {
    #[cfg(windows)]
    if use_dialog {
        return Box::new(audio_endpoint_list::report::DialogSink);
    }

    #[cfg(not(windows))]
    if use_dialog {
        warn!("dialog presentation is only available on Windows, writing to stdout");
    }

    Box::new(ConsoleSink)
}
