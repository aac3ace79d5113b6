//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GeaConfig (validated, immutable)
//!     → passed by value to the server and logging setup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes are code, not config
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, parse_config, ConfigError};
pub use schema::{
    GeaConfig, ListenerConfig, LogFormat, ObservabilityConfig, RoutingConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
