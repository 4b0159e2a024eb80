//! HTTP route handlers.

pub mod health;
pub mod metrics;
pub mod todos;
pub mod users;

use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path segment into a typed id.
fn parse_id<I: FromStr>(raw: &str) -> Result<I, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId(raw.to_string()))
}
