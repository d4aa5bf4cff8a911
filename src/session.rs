//! Caller-owned cache of computed patch results.
//!
//! Interactive exploration wants the last computed result per loaded
//! surface kept around without recomputation. [`PatchSession`] is an
//! explicit, caller-owned map from a surface name to its [`TopKResult`] —
//! no ambient global state.
//!
//! # Example
//!
//! ```
//! use surfpatch::session::PatchSession;
//! use surfpatch::result::TopKResult;
//!
//! let mut session = PatchSession::new();
//! let result = TopKResult {
//!     centers: vec![0],
//!     scores: vec![1.0],
//!     vertex_indices: vec![vec![0, 1]],
//! };
//! session.insert("1abc_A", result);
//!
//! assert_eq!(session.get("1abc_A").map(|r| r.len()), Some(1));
//! ```

use std::collections::HashMap;

use crate::result::TopKResult;

/// Named storage for computed [`TopKResult`]s.
#[derive(Debug, Clone, Default)]
pub struct PatchSession {
    results: HashMap<String, TopKResult>,
}

impl PatchSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result under `name`, returning the previous result for that
    /// name if any.
    pub fn insert(&mut self, name: &str, result: TopKResult) -> Option<TopKResult> {
        self.results.insert(name.to_string(), result)
    }

    /// The stored result for `name`.
    pub fn get(&self, name: &str) -> Option<&TopKResult> {
        self.results.get(name)
    }

    /// Remove and return the stored result for `name`.
    pub fn remove(&mut self, name: &str) -> Option<TopKResult> {
        self.results.remove(name)
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the session holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over `(name, result)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TopKResult)> {
        self.results.iter().map(|(name, r)| (name.as_str(), r))
    }

    /// Per-entry summaries: `(name, patch count)` pairs, for listing loaded
    /// results to a user.
    pub fn summaries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter().map(|(name, r)| (name, r.len()))
    }
}
