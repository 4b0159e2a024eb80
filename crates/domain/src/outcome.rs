//! Value-based success/failure channel for expected business rule violations.
//!
//! Every kernel operation that can fail for a business reason returns an
//! [`Outcome`]. Failures are plain values carrying a classified [`Error`];
//! nothing in the kernel throws and catches its own validation failures.

use serde::{Deserialize, Serialize};

/// Classification of a failure.
///
/// The taxonomy is closed. `None` exists only to describe "no error" at the
/// transport boundary; an [`Error`] can never be built with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    None,
    Validation,
    NotFound,
    Conflict,
    Failure,
    Unauthorized,
    Forbidden,
}

impl ErrorKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::None => "None",
            ErrorKind::Validation => "Validation",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Failure => "Failure",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified business failure.
///
/// `code` is a stable, dotted machine identifier (`"User.Email.SameAsOld"`),
/// `message` is for humans and `kind` drives how outer layers react.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct Error {
    code: String,
    message: String,
    kind: ErrorKind,
}

impl Error {
    /// Creates an error of the given kind.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is [`ErrorKind::None`]: a failure without a real
    /// classification is a programming error.
    #[track_caller]
    pub fn new(code: impl Into<String>, message: impl Into<String>, kind: ErrorKind) -> Self {
        let code = code.into();
        assert!(
            kind != ErrorKind::None,
            "failure `{code}` must carry a real error kind"
        );
        Self {
            code,
            message: message.into(),
            kind,
        }
    }

    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, ErrorKind::Validation)
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, ErrorKind::NotFound)
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, ErrorKind::Conflict)
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, ErrorKind::Failure)
    }

    pub fn unauthorized(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, ErrorKind::Unauthorized)
    }

    pub fn forbidden(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, ErrorKind::Forbidden)
    }

    /// Returns the machine-readable code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the failure classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Success with a value, or a classified failure.
///
/// `Outcome` (no type argument) is the value-less form used by mutators.
pub type Outcome<T = ()> = std::result::Result<T, Error>;

/// Accessors that make the fail-fast contract of an [`Outcome`] explicit.
pub trait OutcomeExt<T> {
    /// Drops the success payload, keeping the error if there is one.
    fn discard_value(self) -> Outcome;

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a failure.
    fn into_value(self) -> T;

    /// Returns the failure.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a success.
    fn into_error(self) -> Error;
}

impl<T> OutcomeExt<T> for Outcome<T> {
    fn discard_value(self) -> Outcome {
        self.map(|_| ())
    }

    #[track_caller]
    fn into_value(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("cannot access the value of a failed outcome: {error}"),
        }
    }

    #[track_caller]
    fn into_error(self) -> Error {
        match self {
            Ok(_) => panic!("cannot access the error of a successful outcome"),
            Err(error) => error,
        }
    }
}
