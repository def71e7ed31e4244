mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod prompt;
mod server;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{Level, warn};

use crate::cmd::batch::{self, BatchCommandArgs};
use crate::cmd::serve::{self, ServeCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::gemini::GeminiClient;
use crate::services::ClassifierService;

#[derive(Parser)]
#[command(name = "triage", author, version, about = "LLM-assisted support ticket triage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP triage service.
    Serve(ServeArgs),
    /// Classify every ticket in a JSON file and print the results.
    Batch(BatchArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Override the port configured via TRIAGE_PORT.
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Args)]
struct BatchArgs {
    /// Path to a JSON file containing an array of tickets.
    #[arg(short, long)]
    tickets: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Serve(args) => {
            // Matching the original web interface: a missing API key is not
            // fatal here, the health endpoint reports the degraded state.
            let classifier = match GeminiClient::from_config(&config) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn ClassifierService>),
                Err(error) => {
                    warn!("classifier unavailable: {error}");
                    None
                }
            };
            let ctx = AppContext::new(config, classifier);
            serve::run(ctx, ServeCommandArgs { port: args.port }).await
        }
        Commands::Batch(args) => {
            let classifier: Arc<dyn ClassifierService> =
                Arc::new(GeminiClient::from_config(&config)?);
            let ctx = AppContext::new(config, Some(classifier));
            batch::run(&ctx, BatchCommandArgs { tickets: args.tickets }).await
        }
    }
}
