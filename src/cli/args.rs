//! CLI argument definitions using clap
//!
//! Commands:
//! - matricula serve [--host <host>] [--port <port>] [--database-url <url>]

use clap::{Parser, Subcommand};

/// matricula - student and enrollment record-keeping service
#[derive(Parser, Debug)]
#[command(name = "matricula")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides MATRICULA_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides MATRICULA_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// PostgreSQL connection string (overrides DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
