//! Core types for the redactor

use serde::{Deserialize, Serialize};

/// Result of sanitizing issue text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SanitizeResult {
    /// Nothing matched, text is unchanged
    Clean(String),

    /// At least one PII pattern matched
    Redacted {
        /// The sanitized text with placeholders substituted
        text: String,
        /// How many matches each pattern class replaced, in application order
        redactions: Vec<Redaction>,
    },
}

impl SanitizeResult {
    /// Get the sanitized text
    pub fn text(&self) -> &str {
        match self {
            SanitizeResult::Clean(text) => text,
            SanitizeResult::Redacted { text, .. } => text,
        }
    }

    /// Consume the result, keeping only the sanitized text
    pub fn into_text(self) -> String {
        match self {
            SanitizeResult::Clean(text) => text,
            SanitizeResult::Redacted { text, .. } => text,
        }
    }

    /// Check if content was modified
    pub fn is_modified(&self) -> bool {
        matches!(self, SanitizeResult::Redacted { .. })
    }

    /// Total number of substrings replaced
    pub fn redaction_count(&self) -> usize {
        match self {
            SanitizeResult::Clean(_) => 0,
            SanitizeResult::Redacted { redactions, .. } => {
                redactions.iter().map(|r| r.count).sum()
            }
        }
    }
}

/// Replacements made by one pattern class.
///
/// Only counts are kept; the matched values are dropped so nothing sensitive
/// survives into logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redaction {
    /// Pattern class that matched
    pub kind: RedactionKind,
    /// Number of substrings replaced
    pub count: usize,
}

/// Pattern classes, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedactionKind {
    /// Social Security Number
    Ssn,
    /// Email Address
    Email,
    /// Phone Number
    Phone,
}

impl RedactionKind {
    /// Fixed token substituted for every match of this class
    pub fn placeholder(&self) -> &'static str {
        match self {
            RedactionKind::Ssn => "[REDACTED-SSN]",
            RedactionKind::Email => "[REDACTED-EMAIL]",
            RedactionKind::Phone => "[REDACTED-PHONE]",
        }
    }
}

impl std::fmt::Display for RedactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedactionKind::Ssn => write!(f, "SSN"),
            RedactionKind::Email => write!(f, "Email"),
            RedactionKind::Phone => write!(f, "Phone"),
        }
    }
}
