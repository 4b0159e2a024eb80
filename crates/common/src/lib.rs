//! Shared primitives used across the workspace.
//!
//! - Strongly-typed, UUID-backed identifiers (`uuid_id!`, [`EventId`])
//! - The injected time source ([`Clock`], re-exported from `mockable`) used
//!   by aggregates to stamp creation times and domain events, plus a
//!   controllable [`FixedClock`] for tests

pub mod clock;
pub mod types;

pub use clock::{Clock, DefaultClock, FixedClock};
pub use types::EventId;
