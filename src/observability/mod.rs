//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing + http produce:
//!     → tracing events (method, path, pattern, request_id)
//!     → logging.rs (subscriber: filter + fmt layer)
//!     → stdout (pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never formatted-in values, for machine parsing
//! - Request ID attached to every request span

pub mod logging;
