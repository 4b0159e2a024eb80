//! Email address value object.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::outcome::{Error as OutcomeError, ErrorKind, Outcome};
use crate::value_object::ValueObject;

/// Maximum length of a normalized email, in characters.
pub const MAX_EMAIL_LENGTH: usize = 255;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Reasons an email address is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email cannot exceed 255 characters")]
    TooLong,

    #[error("Email format is invalid")]
    InvalidFormat,
}

impl EmailError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            EmailError::Empty => "Email.Empty",
            EmailError::TooLong => "Email.TooLong",
            EmailError::InvalidFormat => "Email.InvalidFormat",
        }
    }
}

impl From<EmailError> for OutcomeError {
    fn from(e: EmailError) -> Self {
        OutcomeError::new(e.code(), e.to_string(), ErrorKind::Validation)
    }
}

/// A validated, normalized (trimmed, lower-case) email address.
///
/// The only way to obtain one is [`Email::create`]; deserialization goes
/// through the same validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and normalizes a raw address.
    pub fn create(raw: &str) -> Outcome<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty.into());
        }

        let normalized = trimmed.to_lowercase();

        if normalized.chars().count() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong.into());
        }

        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(EmailError::InvalidFormat.into());
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {
    type Components<'a> = (&'a str,);

    fn components(&self) -> Self::Components<'_> {
        (&self.0,)
    }
}

crate::value_object!(Email);

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = OutcomeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::create(&raw)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
