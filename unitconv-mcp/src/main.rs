//! unitconv MCP Server
//!
//! Line-delimited JSON-RPC over stdio: one request per stdin line, one
//! response per stdout line. Logs go to stderr.
//!
//! Environment:
//! - UNITCONV_DECIMALS: decimal places in formatted results (default 6)
//! - RUST_LOG: log filter (default "info")

mod config;
mod server;

use std::io::{self, BufRead, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use server::{handle_line, PROTOCOL_VERSION, SERVER_VERSION};

fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|e| {
        eprintln!("Invalid RUST_LOG '{}': {}, using info", config.log_filter, e);
        EnvFilter::new("info")
    });

    // stdout carries protocol frames only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let config = ServerConfig::from_env();
    init_logging(&config);

    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "unitconv MCP server started");
    tracing::info!(decimals = config.decimals, "configuration loaded");
    tracing::debug!(
        stdin_is_terminal = io::stdin().is_terminal(),
        stdout_is_terminal = io::stdout().is_terminal(),
        "stdio"
    );

    // Use BufReader for stdin (line-based protocol)
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    tracing::info!("server ready, waiting for requests");

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                // EOF - client disconnected
                tracing::info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                tracing::trace!(bytes = line.len(), "received");

                let Some(response) = handle_line(&config, &line) else {
                    continue;
                };

                let response_json = match serde_json::to_string(&response) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(error = %e, "error serializing response");
                        continue;
                    }
                };

                // Write response directly to stdout (no buffering)
                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response_json) {
                    tracing::error!(error = %e, "error writing response");
                    break;
                }
                if let Err(e) = stdout.flush() {
                    tracing::error!(error = %e, "error flushing stdout");
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "error reading input");
                break;
            }
        }
    }

    tracing::info!("server shutting down");
}
