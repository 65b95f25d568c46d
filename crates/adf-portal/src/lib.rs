//! # ADF Portal
//!
//! A single-page web form for Azure Data Factory support issues. Each
//! submission is scrubbed of PII, used to look up a few reference links, and
//! sent with those links to a chat-completion model that writes an
//! explanation and a suggested fix.
//!
//! ```rust,ignore
//! let config = PortalConfig::from_env()?;
//! let pipeline = Arc::new(Pipeline::from_config(&config)?);
//! let app = web::router(pipeline);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod pipeline;
pub mod render;
pub mod retry;
pub mod web;

pub use config::{load_dotenv, ConfigError, PortalConfig};
pub use pipeline::{FailureNotice, Outcome, Pipeline, Solution};
pub use retry::RetryPolicy;
pub use web::router;
