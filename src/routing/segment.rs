//! Path segment tokenization.
//!
//! # Responsibilities
//! - Split patterns and request paths on `/`
//! - Classify each token as static, param or catch-all
//! - Stop after the first catch-all token
//!
//! # Design Decisions
//! - One tokenizer for both registration and lookup
//! - Tokens borrow from the input (no allocation per segment)

/// One `/`-delimited token of a pattern or request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// Literal text, matched by equality.
    Static(&'a str),
    /// `:name`, binds exactly one request segment.
    Param(&'a str),
    /// `*name`, binds every remaining request segment.
    CatchAll(&'a str),
}

impl<'a> Segment<'a> {
    /// Classify a raw, non-empty token by its first character.
    pub fn parse(raw: &'a str) -> Self {
        match raw.as_bytes().first().copied() {
            Some(b':') => Segment::Param(raw),
            Some(b'*') => Segment::CatchAll(raw),
            _ => Segment::Static(raw),
        }
    }

    /// The raw token text, prefix included.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Static(raw) | Segment::Param(raw) | Segment::CatchAll(raw) => raw,
        }
    }

    /// Binding name for params and catch-alls (prefix stripped).
    ///
    /// A bare `*` yields `Some("")`; static segments yield `None`.
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Segment::Static(_) => None,
            Segment::Param(raw) | Segment::CatchAll(raw) => Some(&raw[1..]),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        !matches!(self, Segment::Static(_))
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Segment::CatchAll(_))
    }
}

impl std::fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if the raw token would start a wildcard segment.
pub(crate) fn is_wildcard_text(raw: &str) -> bool {
    raw.starts_with(':') || raw.starts_with('*')
}

/// Tokenize a pattern or request path.
///
/// Empty components are dropped, so `/a//b/` and `a/b` tokenize the same.
/// Tokenization ends right after the first catch-all segment; anything
/// following it in the input is ignored.
pub fn tokenize(path: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    for raw in path.split('/').filter(|s| !s.is_empty()) {
        let segment = Segment::parse(raw);
        segments.push(segment);
        if segment.is_catch_all() {
            break;
        }
    }
    segments
}
