//! Command-line interface
//!
//! Owns startup: configuration loading, gateway connection and server
//! launch. `main` stays a thin shim over [`run`].

mod args;
mod errors;

pub use args::{Cli, Command};
pub use errors::{CliError, CliResult};

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::http::{AppState, HttpServer};
use crate::observability::Logger;
use crate::store::PgStore;

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve {
            host,
            port,
            database_url,
        } => serve(host, port, database_url),
    }
}

fn serve(
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
) -> CliResult<()> {
    let mut config = ServiceConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(url) = database_url {
        config.database_url = url;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let store = Arc::new(PgStore::connect(&config.database_url).await?);
        Logger::info("STORE_CONNECTED", &[]);

        let state = AppState::new(store.clone(), store);
        HttpServer::new(config, state).start().await?;
        Ok(())
    })
}
