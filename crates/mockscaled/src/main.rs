//! mockscaled — the mockscale daemon.
//!
//! Runs the WiFi scale emulator, or acts as a reference client against
//! one:
//! - `serve`: HTTP emulator (`GET /api/weight`, `POST /api/tare`)
//! - `watch`: poll a scale and log every reading
//! - `tare`: send a single tare command
//!
//! # Usage
//!
//! ```text
//! mockscaled serve --port 8080 --config mockscale.toml
//! mockscaled watch --address 192.168.1.200:80
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mockscale_core::{ScaleConfig, WireFormat};
use tracing::{debug, error};

mod serve;
mod watch;

#[derive(Parser)]
#[command(name = "mockscaled", about = "Mock WiFi scale daemon", version)]
struct Cli {
    /// Path to a mockscale.toml config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scale emulator.
    Serve {
        /// Interface to bind.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on.
        #[arg(long)]
        port: Option<u16>,

        /// Payload dialect: standard, nested, or compact.
        #[arg(long)]
        format: Option<WireFormat>,

        /// Fixed RNG seed for a reproducible signal.
        #[arg(long)]
        seed: Option<u64>,

        /// Probability that a reading is flagged stable.
        #[arg(long)]
        stable_probability: Option<f64>,
    },
    /// Poll a scale and log its readings until interrupted.
    Watch {
        /// Scale address as host:port.
        #[arg(long)]
        address: Option<String>,

        /// Polling interval in milliseconds.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Send one tare command to a scale.
    Tare {
        /// Scale address as host:port.
        #[arg(long)]
        address: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mockscaled=debug,mockscale=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    let result = match cli.command {
        Command::Serve {
            host,
            port,
            format,
            seed,
            stable_probability,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(format) = format {
                config.server.format = format;
            }
            if seed.is_some() {
                config.instrument.seed = seed;
            }
            if let Some(p) = stable_probability {
                config.instrument.stable_probability = p;
            }
            config.validate()?;
            serve::run_serve(config).await
        }
        Command::Watch {
            address,
            interval_ms,
        } => {
            if let Some(address) = address {
                config.client.address = address;
            }
            if let Some(ms) = interval_ms {
                config.client.read_interval_ms = ms;
            }
            config.client.validate()?;
            watch::run_watch(config).await
        }
        Command::Tare { address } => {
            if let Some(address) = address {
                config.client.address = address;
            }
            config.client.validate()?;
            watch::run_tare(config).await
        }
    };

    if let Err(ref e) = result {
        error!(error = %e, "mockscaled exiting with error");
    }
    result
}

/// Read the config file if one was given, otherwise start from defaults.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ScaleConfig> {
    match path {
        Some(path) => {
            let config = ScaleConfig::from_file(path)?;
            debug!(path = %path.display(), "config loaded");
            Ok(config)
        }
        None => Ok(ScaleConfig::default()),
    }
}

/// Resolve when the operator presses Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}
