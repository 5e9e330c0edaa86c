//! Charla relay binary.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use charla::config::Config;
use charla::llm::AzureOpenAIProvider;
use charla::server::{AppState, build_app};

#[derive(Parser)]
#[command(
    name = "charla",
    about = "HTTP relay that forwards chat turns to Azure OpenAI",
    version
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "charla.yaml")]
    config: String,

    /// Override the configured listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .await
        .with_context(|| format!("failed to load {}", cli.config))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let provider = AzureOpenAIProvider::from_env()
        .context("Azure OpenAI provider is not configured")?;

    let state = AppState {
        provider: Arc::new(provider),
        preamble: config.chat.preamble.as_str().into(),
    };
    let app = build_app(state, config.server.request_timeout_seconds);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("charla relay listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
