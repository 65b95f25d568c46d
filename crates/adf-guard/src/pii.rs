//! PII (Personally Identifiable Information) detection and redaction

use crate::config::RedactorConfig;
use crate::types::{Redaction, RedactionKind, SanitizeResult};

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use tracing::debug;

static PATTERNS: Lazy<PiiPatterns> = Lazy::new(PiiPatterns::new);

static DEFAULT_REDACTOR: Lazy<Redactor> = Lazy::new(Redactor::default);

struct PiiPatterns {
    ssn: Regex,
    email: Regex,
    phone: Regex,
}

impl PiiPatterns {
    fn new() -> Self {
        Self {
            // SSN: 123-45-6789 or 123456789
            ssn: Regex::new(r"\b(?:\d{3}-\d{2}-\d{4}|\d{9})\b").expect("SSN pattern compiles"),
            // Email addresses
            email: Regex::new(r"\b[\w.-]+@[\w.-]+\.\w{2,4}\b").expect("email pattern compiles"),
            // Phone numbers: optional country code, optional parenthesized area code
            phone: Regex::new(
                r"\b(?:\+?\d{1,3})?[-.\s]?(?:\(?\d{3}\)?)[-.\s]?\d{3}[-.\s]?\d{4}\b",
            )
            .expect("phone pattern compiles"),
        }
    }

    fn get(&self, kind: RedactionKind) -> &Regex {
        match kind {
            RedactionKind::Ssn => &self.ssn,
            RedactionKind::Email => &self.email,
            RedactionKind::Phone => &self.phone,
        }
    }
}

/// Scrubs SSN-, email- and phone-shaped substrings from text.
///
/// Patterns run in order SSN, email, phone; each sees the output of the one
/// before, so a span already replaced is never matched again.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    config: RedactorConfig,
}

impl Redactor {
    /// Create a new redactor with the given configuration
    pub fn new(config: RedactorConfig) -> Self {
        Self { config }
    }

    /// Pattern classes this redactor applies, in application order
    pub fn kinds(&self) -> Vec<RedactionKind> {
        let mut kinds = Vec::with_capacity(3);
        if self.config.detect_ssn {
            kinds.push(RedactionKind::Ssn);
        }
        if self.config.detect_email {
            kinds.push(RedactionKind::Email);
        }
        if self.config.detect_phone {
            kinds.push(RedactionKind::Phone);
        }
        kinds
    }

    /// Replace every match with its placeholder and report per-class counts
    pub fn sanitize(&self, text: &str) -> SanitizeResult {
        let mut current = text.to_string();
        let mut redactions = vec![];

        for kind in self.kinds() {
            let pattern = PATTERNS.get(kind);
            let count = pattern.find_iter(&current).count();
            if count == 0 {
                continue;
            }
            current = pattern
                .replace_all(&current, NoExpand(kind.placeholder()))
                .into_owned();
            redactions.push(Redaction { kind, count });
        }

        if redactions.is_empty() {
            SanitizeResult::Clean(current)
        } else {
            debug!(
                input_len = text.len(),
                output_len = current.len(),
                redactions = ?redactions,
                "Redacted PII from issue text"
            );
            SanitizeResult::Redacted {
                text: current,
                redactions,
            }
        }
    }

    /// Redact PII from text, discarding the report
    pub fn redact(&self, text: &str) -> String {
        self.sanitize(text).into_text()
    }
}

/// Redact text with the default redactor (all pattern classes enabled)
pub fn sanitize_input(text: &str) -> String {
    DEFAULT_REDACTOR.redact(text)
}
