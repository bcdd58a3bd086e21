//! CLI binary for torrent-scout.
//!
//! Results are printed to stdout as JSON. All tracing output goes to stderr
//! so that stdout stays machine-readable.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use torrent_scout::commands;
use torrent_scout::{AppConfig, ScoutError};
use torrent_search::TorrentSearch;
use tracing_subscriber::EnvFilter;

/// torrent-scout: search several torrent indexes at once.
#[derive(Parser)]
#[command(name = "torrent-scout", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search one or all sources and print ranked results.
    Search {
        /// Search terms.
        query: String,

        /// Source to query (`all`, `1337x`, `TPB`, `Apibay`, `YTS`, `RARBG`).
        #[arg(short, long, default_value = "all")]
        source: String,
    },

    /// Resolve a magnet link from a source's detail page by identifier.
    Magnet {
        /// Detail layout (`1337x`, `rarbg`, `tpb`).
        source: String,

        /// Torrent identifier on that site.
        id: String,
    },

    /// Resolve a magnet link from a detail page URL.
    Extract {
        /// Detail page URL.
        url: String,

        /// Detail layout (`1337x`, `rarbg`, `tpb`).
        source: String,
    },

    /// List available sources.
    Sources,

    /// Write the effective configuration to the default path.
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only; stdout carries the JSON output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("torrent_scout=info,torrent_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match run(cli.command, config).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            let body = commands::error_body(&err);
            println!("{}", serde_json::to_string_pretty(&body)?);
            std::process::exit(1);
        }
    }
}

async fn run(command: Command, config: AppConfig) -> Result<String, ScoutError> {
    let value = match command {
        Command::Sources => commands::sources()?,
        Command::InitConfig => {
            let path = AppConfig::default_config_path();
            config.save_to_file(&path)?;
            tracing::info!(path = %path.display(), "configuration written");
            serde_json::json!({ "path": path })
        }
        Command::Search { query, source } => {
            let client = TorrentSearch::new(config.search)?;
            commands::search(&client, &query, &source).await?
        }
        Command::Magnet { source, id } => {
            let client = TorrentSearch::new(config.search)?;
            commands::magnet(&client, &source, &id).await?
        }
        Command::Extract { url, source } => {
            let client = TorrentSearch::new(config.search)?;
            commands::extract(&client, &url, &source).await?
        }
    };
    commands::render(&value)
}
