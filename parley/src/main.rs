use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use parley::{ParleyConfig, ProviderId, chat_service, list_models_with_api_key, serve};

#[derive(Debug, Parser)]
#[command(name = "parley", version, about = "Chat relay with ordered LLM provider fallback")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Overrides HOST.
        #[arg(long)]
        host: Option<std::net::IpAddr>,
        /// Overrides PORT.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the Gemini models available to GEMINI_API_KEY.
    ListModels,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ParleyConfig::from_env().context("failed to read configuration")?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            run_server(config).await
        }
        Command::ListModels => list_models(config).await,
    }
}

async fn run_server(config: ParleyConfig) -> Result<()> {
    let service = chat_service(&config).with_context(|| {
        format!(
            "failed to open history store at {}",
            config.history_path.display()
        )
    })?;
    if service.provider_ids().is_empty() {
        tracing::warn!("no provider is configured; every chat request will fail");
    }

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    serve(listener, service).await.context("server error")
}

async fn list_models(config: ParleyConfig) -> Result<()> {
    let Some(api_key) = config.gemini_api_key else {
        bail!("GEMINI_API_KEY is not set");
    };

    let models = list_models_with_api_key(ProviderId::Gemini, api_key.expose())
        .await
        .context("failed to list Gemini models")?;
    for model in models {
        println!("{model}");
    }
    Ok(())
}
