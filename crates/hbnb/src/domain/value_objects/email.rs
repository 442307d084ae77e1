//! Email - validated user e-mail address

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::errors::DomainError;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// E-mail address that matched the address pattern at construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse<T: Into<String>>(raw: T) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::validation("Email cannot be empty"));
        }
        if !email_regex().is_match(&raw) {
            return Err(DomainError::validation("Invalid email format"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        for raw in [
            "john.doe@example.com",
            "a+tag@sub.example.org",
            "first_last-1@host-name.io",
        ] {
            assert!(Email::parse(raw).is_ok(), "{raw} should be accepted");
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for raw in ["", "   ", "plainaddress", "@example.com", "john@", "john@example", "jo hn@example.com"] {
            assert!(Email::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_empty_email_message() {
        let err = Email::parse("").unwrap_err();
        assert_eq!(err, DomainError::validation("Email cannot be empty"));
    }
}
