//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → routing::Router::dispatch (pattern + params, or NotFound → 404)
//!     → context.rs (params, query, form)
//!     → engine.rs Handler
//!     → Send to client
//! ```

pub mod context;
pub mod engine;
pub mod request;
pub mod server;

pub use context::Context;
pub use engine::{handler, Engine, Handler};
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::HttpServer;
