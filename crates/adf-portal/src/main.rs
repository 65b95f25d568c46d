//! Azure Data Factory support portal
//!
//! Serves a form where a user describes a pipeline problem. The text is
//! scrubbed of SSNs, emails and phone numbers, searched against Microsoft
//! Learn, Stack Overflow and Reddit, and handed to an Azure OpenAI deployment
//! for an explanation and suggested fix.

use adf_portal::{load_dotenv, router, Pipeline, PortalConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

/// Portal server arguments
#[derive(Parser, Debug)]
#[command(name = "adf-portal")]
#[command(about = "Azure Data Factory support portal")]
struct Args {
    /// Address to bind
    #[arg(long, env = "ADF_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "ADF_PORT", default_value = "8501")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    load_dotenv();
    let args = Args::parse();

    let config = PortalConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;
    let pipeline = Pipeline::from_config(&config).context("failed to build pipeline")?;

    let app = router(Arc::new(pipeline));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
