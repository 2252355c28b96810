//! Command-line driver for the Mining Discovery portal.
//!
//! Runs the same route resolver, page host, and components a browser would,
//! against an in-memory navigation port, and prints the rendered document.
//!
//! # Usage
//!
//! ```text
//! discovery-portal render '#/news/gold'
//! discovery-portal render '#/' '#/article/sx6gn6ckwbiljfpq226eqzbz'
//! discovery-portal download https://cdn.example.com/uploads/issue.pdf --name march-issue
//! discovery-portal routes
//! ```
//!
//! Logs go to stderr so stdout carries only the command's output.

mod commands;
mod config;
mod error;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use discovery_cms::CmsClient;
use discovery_views::Renderer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::PortalConfig;

#[derive(Parser)]
#[command(name = "discovery-portal")]
#[command(about = "Render Mining Discovery pages from the CMS", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply each fragment as a navigation event, then print the final page
    Render {
        /// URL fragments such as `#/news/gold`, applied in order from `#/`
        #[arg(value_name = "FRAGMENT")]
        fragments: Vec<String>,
    },

    /// Download a PDF into the download directory
    Download {
        /// Absolute or CMS-relative URL of the PDF
        #[arg(value_name = "URL")]
        url: String,

        /// File name to save under (defaults to the URL's last segment)
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },

    /// List every route and its canonical fragment
    Routes,
}

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// and runs the requested subcommand on a single-threaded runtime.
///
/// # Errors
///
/// Returns an error if configuration, rendering, or a download fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if matches!(cli.command, Command::Routes) {
        print!("{}", commands::routes_table());
        return Ok(());
    }

    let config = PortalConfig::from_env()?;
    info!(
        cms = config.cms.base_url,
        timeout_ms = config.cms.timeout.as_millis(),
        download_dir = %config.download_dir.display(),
        "configuration loaded"
    );
    let client = Arc::new(CmsClient::from_config(config.cms.clone())?);

    match cli.command {
        Command::Render { fragments } => {
            let renderer = Renderer::new(&config.templates, &config.site_url)?;
            let html =
                commands::render_fragments(client, renderer, config.download_dir, &fragments)
                    .await?;
            println!("{html}");
        }
        Command::Download { url, name } => {
            let path =
                commands::download(&client, &url, name.as_deref(), &config.download_dir).await?;
            println!("{}", path.display());
        }
        Command::Routes => {}
    }

    Ok(())
}
