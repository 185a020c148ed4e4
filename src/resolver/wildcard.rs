//! Hostname wildcard matching.
//!
//! # Responsibilities
//! - Compile a hostname pattern with `*` wildcards once
//! - Test route hostnames against it as a whole-string match
//!
//! # Design Decisions
//! - `*` matches zero or more non-dot characters, so it never spans labels
//! - A pattern without `*` is a plain equality check, no regex compiled
//! - Matching is case-insensitive, hostnames are normalized to lowercase

use regex::Regex;

#[derive(Debug, Clone)]
enum Compiled {
    Exact(String),
    Pattern(Regex),
}

/// A compiled hostname pattern such as `*.apps.example.com`.
#[derive(Debug, Clone)]
pub struct WildcardMatcher {
    pattern: String,
    compiled: Compiled,
}

impl WildcardMatcher {
    pub fn new(pattern: &str) -> Self {
        let pattern = pattern.to_lowercase();
        let compiled = if pattern.contains('*') {
            // An escaped pattern always parses; only the compiled size limit can reject it
            match Regex::new(&translate(&pattern)) {
                Ok(re) => Compiled::Pattern(re),
                Err(e) => {
                    tracing::warn!(%pattern, error = %e, "Wildcard did not compile, falling back to exact match");
                    Compiled::Exact(pattern.clone())
                }
            }
        } else {
            Compiled::Exact(pattern.clone())
        };
        Self { pattern, compiled }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if `candidate` matches the whole pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return self.pattern.is_empty();
        }
        let candidate = candidate.to_lowercase();
        match &self.compiled {
            Compiled::Exact(expected) => *expected == candidate,
            Compiled::Pattern(re) => re.is_match(&candidate),
        }
    }
}

/// Escape the pattern, then let each `*` match within a single label.
fn translate(pattern: &str) -> String {
    format!("^{}$", regex::escape(pattern).replace(r"\*", "[^.]*"))
}

/// One-shot form of [`WildcardMatcher::matches`].
pub fn matches(pattern: &str, candidate: &str) -> bool {
    WildcardMatcher::new(pattern).matches(candidate)
}
