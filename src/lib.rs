//! gea: a small web framework built around a per-method segment trie.
//!
//! Patterns are `/`-separated segments: literal text, `:name` for one
//! segment, `*name` for everything that follows.
//!
//! ```
//! use axum::http::Method;
//! use gea::routing::RouterBuilder;
//!
//! let mut builder = RouterBuilder::new();
//! builder.add_route(Method::GET, "/hello/:name", "hello").unwrap();
//! builder.add_route(Method::GET, "/assets/*filepath", "assets").unwrap();
//! let router = builder.build();
//!
//! let route = router.resolve(&Method::GET, "/assets/css/a.css").unwrap();
//! assert_eq!(route.pattern, "/assets/*filepath");
//! assert_eq!(route.params["filepath"], "css/a.css");
//! ```

pub mod config;
pub mod demo;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GeaConfig;
pub use http::{Context, Engine, HttpServer};
pub use lifecycle::Shutdown;
pub use routing::{NotFound, RouteError, RouteMatch, Router, RouterBuilder};
