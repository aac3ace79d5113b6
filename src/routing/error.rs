//! Routing error types.

use axum::http::Method;
use thiserror::Error;

/// Errors raised while registering routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Two patterns need different wildcard children at the same position.
    #[error("{segment} in new path {pattern} conflicts with existing wildcard {existing}")]
    Conflict {
        segment: String,
        pattern: String,
        existing: String,
    },

    /// The pattern is malformed.
    #[error("invalid route pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The exact (method, pattern) pair is already registered.
    #[error("route {method} {pattern} is already registered")]
    Duplicate { method: Method, pattern: String },
}

/// No registered pattern matches the request.
///
/// Routine outcome of dispatch, kept separate from [`RouteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("no route matched")]
pub struct NotFound;
