//! Identifier allocation
//!
//! Produces the unique, sanitized string identifiers bound to exported nodes.
//! Identifiers are scoped to a namespace and cached per node, so re-querying
//! the same node is stable while distinct nodes never collide within one
//! export pass. The allocator is owned by the pass context and discarded with
//! it; no state survives between exports.

use std::collections::{HashMap, HashSet};

use crate::scene::node::NodeKey;

/// Placeholder for names that clean down to nothing
const EMPTY_NAME_PLACEHOLDER: &str = "None";

/// Scoping bucket within which identifiers are unique
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Camera identifiers
    Views,
    /// Light identifiers
    Lights,
    /// Stage element (prefab instance) identifiers
    Objects,
    /// World-level identifiers
    World,
}

impl Namespace {
    const COUNT: usize = 4;

    const fn index(self) -> usize {
        match self {
            Self::Views => 0,
            Self::Lights => 1,
            Self::Objects => 2,
            Self::World => 3,
        }
    }
}

#[derive(Debug, Default)]
struct NamespaceCache {
    by_node: HashMap<NodeKey, String>,
    taken: HashSet<String>,
}

/// Per-pass identifier allocator with one cache per namespace
#[derive(Debug, Default)]
pub struct IdentifierAllocator {
    caches: [NamespaceCache; Namespace::COUNT],
}

impl IdentifierAllocator {
    /// Create an empty allocator for one export pass
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate (or retrieve) the identifier for a node in a namespace
    ///
    /// The raw name is cleaned first; if the cleaned name is already taken by
    /// a different node in the same namespace, an incrementing `_{n}` suffix
    /// disambiguates it.
    pub fn allocate(&mut self, namespace: Namespace, key: NodeKey, raw_name: &str) -> String {
        let cache = &mut self.caches[namespace.index()];

        if let Some(existing) = cache.by_node.get(&key) {
            return existing.clone();
        }

        let base = clean(raw_name);
        let mut candidate = base.clone();
        let mut counter = 1u32;
        while cache.taken.contains(&candidate) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }

        cache.taken.insert(candidate.clone());
        cache.by_node.insert(key, candidate.clone());
        candidate
    }
}

/// Clean a raw host name into identifier-safe text
///
/// Empty input becomes a fixed placeholder; a leading digit or sign gets an
/// underscore prefix; every banned character is replaced with an underscore.
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return EMPTY_NAME_PLACEHOLDER.to_string();
    }

    let mut cleaned = String::with_capacity(text.len() + 1);
    if text.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-') {
        cleaned.push('_');
    }
    for c in text.chars() {
        cleaned.push(if is_banned(c) { '_' } else { c });
    }
    cleaned
}

/// Characters that may never appear in an identifier
fn is_banned(c: char) -> bool {
    matches!(c,
        '\u{01}'..='\u{1f}'
        | '\u{7f}'
        | ' '
        | '"'
        | '\''
        | '#'
        | ','
        | '.'
        | '['
        | ']'
        | '\\'
        | '{'
        | '}')
}
