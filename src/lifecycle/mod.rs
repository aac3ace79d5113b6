//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Init logging → Register routes → Freeze → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Route registration errors abort startup before the listener binds
//! - Shutdown is a broadcast so every long-running task can observe it

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
