//! Route registration and lookup.
//!
//! # Responsibilities
//! - Validate and register (method, pattern, handler) triples
//! - Keep one [`PatternTrie`] per method, created on first use
//! - Resolve a request path to its pattern and bound parameters
//!
//! # Design Decisions
//! - Registration happens on [`RouterBuilder`]; `build()` freezes it into an
//!   immutable [`Router`] that has no mutation API and is shared via `Arc`
//! - Lookup returns an explicit [`NotFound`] rather than a silent default
//! - Parameters are bound by re-tokenizing the matched pattern and walking it
//!   in lock-step with the request segments

use std::collections::HashMap;

use axum::http::Method;
use serde::{Deserialize, Serialize};

use crate::routing::error::{NotFound, RouteError};
use crate::routing::segment::{tokenize, Segment};
use crate::routing::trie::PatternTrie;

/// Parameters extracted from a matched request path.
pub type Params = HashMap<String, String>;

/// What to do when a pattern is registered twice for the same method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Replace the earlier handler and log a warning.
    #[default]
    Overwrite,
    /// Fail with [`RouteError::Duplicate`].
    Reject,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'r> {
    /// The registered pattern that matched, e.g. `/hello/:name`.
    pub pattern: &'r str,
    pub params: Params,
}

/// A successful lookup together with the handler registered for it.
#[derive(Debug)]
pub struct Dispatch<'r, H> {
    pub handler: &'r H,
    pub route: RouteMatch<'r>,
}

/// Mutable registration phase of a [`Router`].
#[derive(Debug)]
pub struct RouterBuilder<H> {
    roots: HashMap<Method, PatternTrie>,
    handlers: HashMap<Method, HashMap<String, H>>,
    duplicate_policy: DuplicatePolicy,
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self {
            roots: HashMap::new(),
            handlers: HashMap::new(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl<H> RouterBuilder<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Register `handler` for `method` requests matching `pattern`.
    ///
    /// Patterns that tokenize identically (`/a/b`, `/a//b/`) occupy the same
    /// trie node and count as the same route for the duplicate policy.
    pub fn add_route(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouteError> {
        validate_pattern(pattern)?;
        let segments = tokenize(pattern);

        let trie = self.roots.entry(method.clone()).or_default();
        let previous = trie
            .lookup(&segments)
            .and_then(|id| trie.node(id).pattern())
            .map(str::to_string);

        if let Some(previous) = &previous {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(RouteError::Duplicate {
                        method,
                        pattern: previous.clone(),
                    });
                }
                DuplicatePolicy::Overwrite => {
                    tracing::warn!(
                        method = %method,
                        pattern = %pattern,
                        previous = %previous,
                        "Route registered twice, replacing handler"
                    );
                }
            }
        }

        trie.insert(pattern, &segments)?;

        let table = self.handlers.entry(method.clone()).or_default();
        if let Some(previous) = previous {
            table.remove(&previous);
        }
        table.insert(pattern.to_string(), handler);

        tracing::debug!(method = %method, pattern = %pattern, "Route registered");
        Ok(())
    }

    /// Freeze the route table.
    pub fn build(self) -> Router<H> {
        let routes: usize = self.handlers.values().map(HashMap::len).sum();
        tracing::info!(
            methods = self.roots.len(),
            routes,
            "Route table frozen"
        );
        Router {
            roots: self.roots,
            handlers: self.handlers,
        }
    }
}

/// Immutable route table, safe to share across request tasks.
#[derive(Debug)]
pub struct Router<H> {
    roots: HashMap<Method, PatternTrie>,
    handlers: HashMap<Method, HashMap<String, H>>,
}

impl<H> Router<H> {
    pub fn builder() -> RouterBuilder<H> {
        RouterBuilder::new()
    }

    /// Find the pattern matching `path` and bind its parameters.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, NotFound> {
        let segments = tokenize(path);
        let trie = self.roots.get(method).ok_or(NotFound)?;
        let node = trie.search(&segments).ok_or(NotFound)?;
        let pattern = trie.node(node).pattern().ok_or(NotFound)?;

        Ok(RouteMatch {
            pattern,
            params: bind_params(pattern, &segments),
        })
    }

    /// Resolve `path` and look up the handler registered for the match.
    pub fn dispatch(&self, method: &Method, path: &str) -> Result<Dispatch<'_, H>, NotFound> {
        let route = self.resolve(method, path)?;
        let handler = self
            .handlers
            .get(method)
            .and_then(|table| table.get(route.pattern))
            .ok_or(NotFound)?;

        Ok(Dispatch { handler, route })
    }

    /// Handler registered for the exact `(method, pattern)` pair.
    pub fn handler(&self, method: &Method, pattern: &str) -> Option<&H> {
        self.handlers.get(method)?.get(pattern)
    }

    /// Registered patterns for `method`, in trie pre-order.
    pub fn routes(&self, method: &Method) -> Vec<&str> {
        self.roots
            .get(method)
            .map(|trie| trie.traverse().into_iter().filter_map(|node| node.pattern()).collect())
            .unwrap_or_default()
    }

    /// Methods with at least one registered route, sorted by name.
    pub fn methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self
            .roots
            .iter()
            .filter(|(_, trie)| !trie.is_empty())
            .map(|(method, _)| method)
            .collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }
}

/// Reject patterns the trie cannot represent faithfully.
pub fn validate_pattern(pattern: &str) -> Result<(), RouteError> {
    let invalid = |reason: String| RouteError::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    };

    if !pattern.starts_with('/') {
        return Err(invalid("pattern must start with '/'".to_string()));
    }

    let mut names: Vec<&str> = Vec::new();
    let mut catch_all: Option<&str> = None;

    for raw in pattern.split('/').filter(|s| !s.is_empty()) {
        if let Some(previous) = catch_all {
            return Err(invalid(format!(
                "catch-all {} must be the last segment, found {} after it",
                previous, raw
            )));
        }

        let segment = Segment::parse(raw);
        match segment {
            Segment::Static(_) => {}
            Segment::Param(_) | Segment::CatchAll(_) => {
                let name = segment.name().unwrap_or_default();
                if name.is_empty() && !segment.is_catch_all() {
                    return Err(invalid("parameter segment needs a name".to_string()));
                }
                if !name.is_empty() {
                    if names.contains(&name) {
                        return Err(invalid(format!("parameter name {} is used twice", name)));
                    }
                    names.push(name);
                }
                if segment.is_catch_all() {
                    catch_all = Some(raw);
                }
            }
        }
    }

    Ok(())
}

fn bind_params(pattern: &str, segments: &[Segment<'_>]) -> Params {
    let mut params = Params::new();

    for (index, part) in tokenize(pattern).into_iter().enumerate() {
        match part {
            Segment::Static(_) => {}
            Segment::Param(_) => {
                if let (Some(name), Some(value)) = (part.name(), segments.get(index)) {
                    params.insert(name.to_string(), value.as_str().to_string());
                }
            }
            Segment::CatchAll(_) => {
                let name = part.name().unwrap_or_default();
                if !name.is_empty() {
                    let rest: Vec<&str> = segments
                        .get(index..)
                        .unwrap_or_default()
                        .iter()
                        .map(Segment::as_str)
                        .collect();
                    params.insert(name.to_string(), rest.join("/"));
                }
                break;
            }
        }
    }

    params
}
