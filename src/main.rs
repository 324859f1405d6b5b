//! CLI entry point for the reelfetch tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use reelfetch_core::tool::DEFAULT_TOOL;
use reelfetch_core::{MediaFetcher, NoopFetcher, Pipeline, ProjectLayout, YtDlp};
use tracing::{debug, error, info};

mod app_config;
mod cli;

use app_config::{FileConfig, VerbositySetting, load_default_file_config};
use cli::Args;

/// Process outcome mapped to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessExit {
    /// Manifest written (possibly from local files only).
    Success,
    /// Configuration error or nothing to publish.
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::from(1),
        }
    }
}

/// CLI flags merged over file config.
#[derive(Debug)]
struct RunSettings {
    layout: ProjectLayout,
    tool: String,
    no_fetch: bool,
    quiet: bool,
    log_level: &'static str,
    force_cli_log_level: bool,
}

fn resolve_settings(args: &Args, file_config: Option<&FileConfig>) -> RunSettings {
    let root = args
        .root
        .clone()
        .or_else(|| file_config.and_then(|c| c.root.clone()))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut layout = ProjectLayout::new(root);
    if let Some(sources) = &args.sources {
        layout = layout.with_sources_path(sources);
    }
    if let Some(output) = &args.output {
        layout = layout.with_manifest_path(output);
    }

    let tool = args
        .tool
        .clone()
        .or_else(|| file_config.and_then(|c| c.tool.clone()))
        .unwrap_or_else(|| DEFAULT_TOOL.to_string());

    let no_fetch = args.no_fetch || file_config.and_then(|c| c.no_fetch).unwrap_or(false);

    // Priority: explicit CLI flag > RUST_LOG env var > config verbosity > info
    let file_verbosity = file_config.and_then(|c| c.verbosity);
    let force_cli_log_level = args.quiet || args.verbose > 0;
    let log_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_verbosity.map_or("info", VerbositySetting::log_level),
            1 => "debug",
            _ => "trace",
        }
    };
    let quiet = args.quiet || (!force_cli_log_level && file_verbosity == Some(VerbositySetting::Quiet));

    RunSettings {
        layout,
        tool,
        no_fetch,
        quiet,
        log_level,
        force_cli_log_level,
    }
}

fn init_tracing(default_level: &str, force_cli_level: bool) {
    let filter = if force_cli_level {
        tracing_subscriber::EnvFilter::new(default_level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(filter)
        .try_init();
}

fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

fn should_show_progress(stderr_is_terminal: bool, quiet: bool, dumb_terminal: bool) -> bool {
    stderr_is_terminal && !quiet && !dumb_terminal
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let file_config = match load_default_file_config() {
        Ok(config) => config,
        Err(config_error) => {
            eprintln!("Error: {config_error:#}");
            return ProcessExit::Failure.into();
        }
    };

    let settings = resolve_settings(&args, file_config.as_ref());
    init_tracing(settings.log_level, settings.force_cli_log_level);
    debug!(?args, ?settings, "Settings resolved");

    run(settings).await.into()
}

async fn run(settings: RunSettings) -> ProcessExit {
    let show_progress =
        should_show_progress(io::stderr().is_terminal(), settings.quiet, is_dumb_terminal());
    let fetcher: Box<dyn MediaFetcher> = if settings.no_fetch {
        Box::new(NoopFetcher)
    } else {
        Box::new(YtDlp::new(&settings.tool))
    };

    let pipeline = Pipeline::new(settings.layout, fetcher)
        .with_skip_fetch(settings.no_fetch)
        .with_progress(show_progress);

    match pipeline.run().await {
        Ok(report) => {
            info!(
                written = report.written,
                discovered = report.discovered,
                fetched = report.fetched,
                failed = report.failed,
                tool_available = report.tool_available,
                used_fallback = report.used_fallback,
                "Manifest build complete"
            );
            ProcessExit::Success
        }
        Err(pipeline_error) => {
            error!(error = %pipeline_error, "Manifest build failed");
            ProcessExit::Failure
        }
    }
}
