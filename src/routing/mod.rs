//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (method, pattern, handler)
//!     → segment.rs (validate & tokenize)
//!     → trie.rs (insert into the method's trie)
//!     → router.rs (record handler)
//!     → build(): freeze as immutable Router
//!
//! Incoming Request (method, path)
//!     → segment.rs (tokenize path)
//!     → trie.rs (depth-first search)
//!     → router.rs (bind params from the matched pattern)
//!     → Return: RouteMatch + handler, or NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex: static, `:param` and trailing `*catch-all` segments only
//! - Deterministic: a static child shadows its wildcard sibling
//! - Conflicting wildcards are a registration error, never a panic

pub mod error;
pub mod router;
pub mod segment;
pub mod trie;

pub use error::{NotFound, RouteError};
pub use router::{
    validate_pattern, Dispatch, DuplicatePolicy, Params, RouteMatch, Router, RouterBuilder,
};
pub use segment::{tokenize, Segment};
pub use trie::{NodeId, PatternTrie, TrieNode};
