//! wallet-batch
//!
//! # Architecture Overview
//!
//! ```text
//!   clap args ──┐
//!               ├─▶ Command ─▶ dispatch ─┬─▶ generate ─▶ AccountProvider ─▶ LedgerStore (address.txt, key.txt)
//!   menu ───────┘                        │
//!                                        ├─▶ transfer ─┐
//!                                        │             ├─▶ Sequencer ─▶ gas oracle + RPC ─▶ report file
//!                                        └─▶ balance ──┘
//! ```
//!
//! Items in a batch run one at a time with a growing delay; each outcome is
//! written to the network's report file before the next item starts.

use std::io;
use std::net::SocketAddr;
use std::path::Path;

use clap::Parser;

use wallet_batch::cli::{prompt_command, Cli, MenuError};
use wallet_batch::config::{load_or_default, resolve_config_path};
use wallet_batch::network::NetworkRegistry;
use wallet_batch::observability::{logging, metrics};
use wallet_batch::{dispatch, Command, Context};

fn command_from_menu(registry: &NetworkRegistry) -> Result<Option<Command>, MenuError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match prompt_command(&mut input, &mut output, registry) {
        Ok(command) => Ok(Some(command)),
        Err(MenuError::Rejected(message)) => {
            println!("{}", message);
            Ok(None)
        }
        Err(MenuError::Closed) => Ok(None),
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_deref(), Path::new("."));
    let config = load_or_default(config_path.as_deref())?;

    logging::init_logging(&config.observability)?;
    tracing::info!("wallet-batch v{} starting", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => tracing::info!(path = %path.display(), "Using config file"),
        None => tracing::info!("No config file, using built-in defaults"),
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics endpoint");
        }
    }

    let ctx = Context::from_config(&config)?;
    tracing::info!(
        networks = ctx.registry.len(),
        data_dir = %config.files.data_dir.display(),
        "Configuration loaded"
    );

    let command = match cli.command.and_then(|c| c.into_command()) {
        Some(command) => command,
        None => match command_from_menu(&ctx.registry)? {
            Some(command) => command,
            None => return Ok(()),
        },
    };

    match dispatch(command, &ctx).await {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(e) if e.is_input_error() => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Run stopped");
            Err(e.into())
        }
    }
}
