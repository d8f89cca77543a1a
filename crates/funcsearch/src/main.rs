use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use funcsearch_common::{logger, AppConfig};
use funcsearch_embedding::create_provider;
use funcsearch_server::{SearchHit, VectorDbService};
use funcsearch_vector::Metric;
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "funcsearch")]
#[command(about = "funcsearch - semantic search over function descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP search server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Collection file to load
        #[arg(long)]
        collection: Option<PathBuf>,
    },

    /// Embed a CSV of function/code pairs and write a collection file
    Ingest {
        /// CSV with columns id, FunctionDescription, FunctionCode
        #[arg(long)]
        csv: PathBuf,

        /// Output collection file (defaults to COLLECTION_PATH)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run one query against the collection file
    Search {
        /// Free-text query
        query: String,

        /// cosine, dotproduct or euclidean
        #[arg(long, default_value = "cosine")]
        metric: Metric,

        /// Collection file (defaults to COLLECTION_PATH)
        #[arg(long)]
        collection: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port, collection }) => {
            let mut config = AppConfig::from_env()?;
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            if let Some(collection) = collection {
                config.collection_path = collection;
            }

            serve(config).await?;
        }
        Some(Commands::Ingest { csv, output }) => {
            let config = AppConfig::from_env()?;
            logger::setup_console_logging(&config.log_level)?;

            let output = output.unwrap_or_else(|| config.collection_path.clone());
            let provider = create_provider(&config)?;

            let service = VectorDbService::from_config(&config, provider);

            let count = service
                .build_from_csv(&csv, &output, true)
                .await
                .with_context(|| format!("Failed to ingest {}", csv.display()))?;

            println!("Wrote {} records to {}", count, output.display());
        }
        Some(Commands::Search { query, metric, collection }) => {
            let mut config = AppConfig::from_env()?;
            logger::setup_console_logging(&config.log_level)?;
            if let Some(collection) = collection {
                config.collection_path = collection;
            }

            let provider = create_provider(&config)?;
            let service = VectorDbService::from_config(&config, provider);
            service.reload().await?;

            let hit: SearchHit = service.search(metric, &query).await?;
            println!("{}", serde_json::to_string_pretty(&hit)?);
        }
        None => {
            let config = AppConfig::from_env()?;
            serve(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("funcsearch starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Collection: {}", config.collection_path.display());
    tracing::info!(
        "  Embeddings: {} {} (dimension {})",
        config.embedding_provider,
        config.embedding_model,
        config.embedding_dimension
    );

    println!("Server listening on http://{}", config.server_bind_address());

    funcsearch_server::start_server(config).await?;
    Ok(())
}
