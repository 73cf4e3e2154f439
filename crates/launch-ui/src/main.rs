//! Launch search - command-line entry point.
//!
//! Renders the front page (optionally with results for `--query`) or the
//! detail page for `--id`, then prints the resulting document as HTML.
//! Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use launch_core::{load_config, AppConfig, LaunchId};
use launch_dom::SharedDocument;
use launch_ui::{HttpLaunchApi, Renderer};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "launch-search", version, about = "Search rocket launches")]
struct Args {
    /// Search for launches matching this text.
    #[arg(long, conflicts_with = "id")]
    query: Option<String>,

    /// Show the launch with this id.
    #[arg(long)]
    id: Option<String>,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long)]
    api_url: Option<String>,
}

// =============================================================================
// Initialization
// =============================================================================

fn load(args: &Args) -> Result<AppConfig, String> {
    let mut config = load_config(args.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(url) = &args.api_url {
        tracing::info!("Using API at {}", url);
        config.api.base_url = url.clone();
    }
    Ok(config)
}

async fn render(args: Args, config: AppConfig) -> Result<String, String> {
    let api = HttpLaunchApi::new(&config.api).map_err(|e| e.to_string())?;
    let doc = SharedDocument::new();
    let renderer = Renderer::new(Arc::new(api), doc.clone(), config.messages);
    let body = doc.body();

    match args.id {
        Some(id) => {
            renderer
                .render_details(body, &LaunchId::from(id))
                .await
                .map_err(|e| format!("Failed to render launch: {}", e))?;
        }
        None => {
            let pending = renderer
                .render_frontpage(body, renderer.search_handler(body), args.query.as_deref())
                .map_err(|e| format!("Failed to render front page: {}", e))?;
            if let Some(search) = pending {
                search
                    .await
                    .map_err(|e| format!("Search task failed: {}", e))?;
            }
        }
    }

    Ok(doc.to_html())
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match load(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    match rt.block_on(render(args, config)) {
        Ok(html) => println!("{}", html),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
