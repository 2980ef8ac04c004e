use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use sha2::{Digest, Sha256};

use self::patterns::{EMAIL_REGEX, IP_REGEX, PHONE_REGEX};

mod patterns {
    // Literal patterns only; `compiled_patterns_are_valid` checks each one.
    #![allow(clippy::unwrap_used)]

    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        pub(super) static ref EMAIL_REGEX: Regex =
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
        pub(super) static ref PHONE_REGEX: Regex =
            Regex::new(r"(?:\+\d{1,2}[-.\s]?)?\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap();
        pub(super) static ref IP_REGEX: Regex =
            Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").unwrap();
    }
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_ip_addresses: bool,
    /// Replace matches with a short stable hash so log lines stay correlatable
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_ip_addresses: false,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        if self.config.redact_phones {
            result = self.redact_phones(&result);
        }

        if self.config.redact_ip_addresses {
            result = self.redact_ip_addresses(&result);
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                let email = caps.get(0).map_or("", |m| m.as_str());
                if self.config.hash_for_correlation {
                    format!("EMAIL[{}]", hash_value(email))
                } else {
                    match email.split_once('@') {
                        Some((local, domain)) => format!(
                            "{}***@{}***",
                            first_char(local),
                            first_char(domain)
                        ),
                        None => "***@***".to_string(),
                    }
                }
            })
            .to_string()
    }

    fn redact_phones(&self, text: &str) -> String {
        PHONE_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("PHONE[{}]", hash_value(caps.get(0).map_or("", |m| m.as_str())))
                } else {
                    "(***) ***-****".to_string()
                }
            })
            .to_string()
    }

    fn redact_ip_addresses(&self, text: &str) -> String {
        IP_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                let ip = caps.get(0).map_or("", |m| m.as_str());
                if self.config.hash_for_correlation {
                    format!("IP[{}]", hash_value(ip))
                } else {
                    match (ip.split('.').next(), ip.rsplit('.').next()) {
                        (Some(first), Some(last)) => format!("{first}.***.***.{last}"),
                        _ => "***.***.***.***".to_string(),
                    }
                }
            })
            .to_string()
    }
}

fn first_char(s: &str) -> String {
    s.chars().next().map(String::from).unwrap_or_default()
}

fn hash_value(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    // First 8 bytes are enough to correlate without revealing the value
    general_purpose::STANDARD.encode(digest.get(..8).unwrap_or_default())
}
