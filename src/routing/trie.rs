//! Per-method segment trie.
//!
//! # Responsibilities
//! - Store registered patterns one segment per node
//! - Reject a second, different wildcard at the same position
//! - Find the node that terminates the first structurally compatible pattern
//!
//! # Design Decisions
//! - Nodes live in an arena (`Vec<TrieNode>`) and refer to each other by index
//! - Insert and search are iterative; search keeps an explicit stack so a
//!   dead end under a static child falls back to the wildcard sibling
//! - No scoring: the exact static child is tried before the wildcard child,
//!   first hit wins

use crate::routing::error::RouteError;
use crate::routing::segment::{is_wildcard_text, Segment};

/// Index of a node inside its [`PatternTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

/// One segment position in a method's trie.
#[derive(Debug, Clone)]
pub struct TrieNode {
    segment: String,
    is_wildcard: bool,
    children: Vec<NodeId>,
    pattern: Option<String>,
}

impl TrieNode {
    fn new(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
            is_wildcard: is_wildcard_text(segment),
            children: Vec::new(),
            pattern: None,
        }
    }

    /// Raw segment text; empty for the root.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    fn is_catch_all(&self) -> bool {
        self.segment.starts_with('*')
    }

    /// The full pattern registered to end here, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Prefix trie over path segments for a single HTTP method.
#[derive(Debug, Clone)]
pub struct PatternTrie {
    nodes: Vec<TrieNode>,
}

impl Default for PatternTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternTrie {
    /// Create a trie holding only the synthetic root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new("")],
        }
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT.0].children.is_empty() && self.nodes[ROOT.0].pattern.is_none()
    }

    /// Insert `pattern`, already tokenized into `segments`.
    ///
    /// Returns the terminal node. Inserting an identical pattern again
    /// reuses the same path and overwrites the terminal pattern.
    pub fn insert(&mut self, pattern: &str, segments: &[Segment<'_>]) -> Result<NodeId, RouteError> {
        if let Some(pos) = segments.iter().position(Segment::is_catch_all) {
            if let Some(next) = segments.get(pos + 1) {
                return Err(RouteError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: format!("segment {} follows a catch-all", next),
                });
            }
        }

        let mut current = ROOT;

        for segment in segments {
            let part = segment.as_str();

            if segment.is_wildcard() {
                if let Some(wild) = self.wildcard_child(current) {
                    let existing = self.node(wild).segment();
                    if existing != part {
                        return Err(RouteError::Conflict {
                            segment: part.to_string(),
                            pattern: pattern.to_string(),
                            existing: existing.to_string(),
                        });
                    }
                }
            }

            current = match self.exact_child(current, part) {
                Some(child) => child,
                None => self.push_child(current, part),
            };
        }

        self.nodes[current.0].pattern = Some(pattern.to_string());
        Ok(current)
    }

    /// Find the node terminating the first pattern compatible with `segments`.
    pub fn search(&self, segments: &[Segment<'_>]) -> Option<NodeId> {
        let mut stack = vec![(ROOT, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);

            if depth == segments.len() || node.is_catch_all() {
                if node.pattern.is_some() {
                    return Some(id);
                }
                continue;
            }

            let part = segments[depth].as_str();
            // Pushed last, popped first: the static child shadows the wildcard.
            if let Some(wild) = self.wildcard_child(id) {
                stack.push((wild, depth + 1));
            }
            if let Some(exact) = self.static_child(id, part) {
                stack.push((exact, depth + 1));
            }
        }

        None
    }

    /// Follow `segments` by exact text, wildcards compared literally.
    ///
    /// Finds where an insert of the same segments would terminate, without
    /// creating anything.
    pub fn lookup(&self, segments: &[Segment<'_>]) -> Option<NodeId> {
        segments
            .iter()
            .try_fold(ROOT, |current, segment| self.exact_child(current, segment.as_str()))
    }

    /// Every node carrying a pattern, in pre-order.
    pub fn traverse(&self) -> Vec<&TrieNode> {
        let mut found = Vec::new();
        let mut stack = vec![ROOT];

        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.pattern.is_some() {
                found.push(node);
            }
            stack.extend(node.children.iter().rev().copied());
        }

        found
    }

    fn wildcard_child(&self, parent: NodeId) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).is_wildcard)
    }

    fn exact_child(&self, parent: NodeId, part: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).segment == part)
    }

    fn static_child(&self, parent: NodeId, part: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| {
                let node = self.node(child);
                !node.is_wildcard && node.segment == part
            })
    }

    fn push_child(&mut self, parent: NodeId, part: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TrieNode::new(part));
        self.nodes[parent.0].children.push(id);
        id
    }
}
