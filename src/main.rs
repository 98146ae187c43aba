//! Drydock CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use drydock::cli::Cli;
use drydock::config::{HostPaths, RunConfig};
use drydock::host::SystemHost;
use drydock::stages::{Stage, StageOrchestrator};
use drydock::ui::TerminalUI;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("drydock=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("drydock=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Drydock starting with args: {:?}", cli);

    let config = RunConfig::from_cli(&cli);
    let paths = HostPaths::discover();
    let host = SystemHost::new();
    let mut ui = TerminalUI::new(&config);

    let orchestrator = StageOrchestrator::new(&host, &paths, &config);
    match orchestrator.run(&mut ui) {
        Stage::Done => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    }
}
