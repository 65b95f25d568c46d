//! Configuration for the redactor

use serde::{Deserialize, Serialize};

/// Which PII classes the [`Redactor`](crate::Redactor) scrubs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactorConfig {
    /// Detect SSNs (`123-45-6789` or nine bare digits)
    pub detect_ssn: bool,
    /// Detect email addresses
    pub detect_email: bool,
    /// Detect phone numbers
    pub detect_phone: bool,
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            detect_ssn: true,
            detect_email: true,
            detect_phone: true,
        }
    }
}

impl RedactorConfig {
    /// Enable or disable SSN detection
    pub fn with_ssn(mut self, enabled: bool) -> Self {
        self.detect_ssn = enabled;
        self
    }

    /// Enable or disable email detection
    pub fn with_email(mut self, enabled: bool) -> Self {
        self.detect_email = enabled;
        self
    }

    /// Enable or disable phone detection
    pub fn with_phone(mut self, enabled: bool) -> Self {
        self.detect_phone = enabled;
        self
    }
}
