//! # ADF Guard
//!
//! Best-effort PII scrubbing for free-text support issues.
//!
//! Issue text typed by a user is forwarded to a web search engine and to a
//! hosted chat-completion model. Before it leaves the process, the
//! [`Redactor`] replaces anything that looks like an SSN, an email address or
//! a phone number with a fixed placeholder token.
//!
//! ## Quick Start
//!
//! ```rust
//! use adf_guard::{Redactor, SanitizeResult};
//!
//! let redactor = Redactor::default();
//! let result = redactor.sanitize("My SSN is 123-45-6789, email me at a@b.com");
//!
//! match result {
//!     SanitizeResult::Clean(text) => println!("Clean: {}", text),
//!     SanitizeResult::Redacted { text, redactions } => {
//!         assert!(text.contains("[REDACTED-SSN]"));
//!         assert!(text.contains("[REDACTED-EMAIL]"));
//!         println!("Redacted: {} ({} kinds)", text, redactions.len());
//!     }
//! }
//! ```
//!
//! The patterns are applied in a fixed order (SSN, email, phone), each to the
//! output of the previous one. Placeholders never match any pattern, so
//! redaction is idempotent.
//!
//! This is a filter, not a guarantee: SSNs written with spaces, international
//! phone formats and the like are missed, and unrelated digit runs of the same
//! shape are redacted.

pub mod config;
pub mod pii;
pub mod types;

pub use config::RedactorConfig;
pub use pii::{sanitize_input, Redactor};
pub use types::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::RedactorConfig;
    pub use crate::pii::{sanitize_input, Redactor};
    pub use crate::types::*;
}
