//! Hierarchy reconstruction over the exported node subset
//!
//! The host's parent graph may contain nodes that are not part of an export
//! (hidden, unselected, unsupported). The resolver re-parents every exported
//! node onto its nearest *exported* ancestor, producing a forest whose
//! nesting matches what the document should contain.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::scene::node::NodeKey;
use crate::scene::snapshot::SceneSnapshot;

/// One node in the resolved forest with its attached children
#[derive(Debug)]
pub struct HierarchyEntry {
    /// The node this entry represents
    pub key: NodeKey,
    /// Children in collection encounter order
    pub children: Vec<HierarchyEntry>,
}

/// Fatal hierarchy integrity failures
///
/// The host guarantees an acyclic parent graph; these are defensive checks
/// that abort the export rather than looping or emitting a broken document.
#[derive(Error, Debug)]
pub enum HierarchyError {
    /// An ancestor walk revisited a node
    #[error("ancestor walk for node '{node}' did not terminate (parent cycle)")]
    CycleDetected {
        /// Name of the node whose ancestor chain cycles
        node: String,
    },

    /// A parent reference points at a node missing from the snapshot
    #[error("node '{node}' references a parent that is not in the snapshot")]
    DanglingParent {
        /// Name of the node with the dangling reference
        node: String,
    },
}

/// Build the export forest for the given node keys
///
/// Each node's logical parent is the nearest ancestor that is itself part of
/// `keys`; ancestors outside the export set are skipped over. Nodes whose
/// ancestor chains exhaust without hitting an exported node become roots.
/// Sibling order follows the order of `keys`.
pub fn build(
    snapshot: &SceneSnapshot,
    keys: &[NodeKey],
) -> Result<Vec<HierarchyEntry>, HierarchyError> {
    let export_set: HashSet<NodeKey> = keys.iter().copied().collect();

    // Group every node under its resolved logical parent, preserving order.
    let mut groups: HashMap<Option<NodeKey>, Vec<NodeKey>> = HashMap::new();
    for &key in keys {
        let parent = resolve_logical_parent(snapshot, key, &export_set)?;
        groups.entry(parent).or_default().push(key);
    }

    let roots = groups.get(&None).map_or_else(Vec::new, Clone::clone);
    Ok(attach_children(&groups, &roots))
}

/// Walk the ancestor chain until it hits the export set or runs out
fn resolve_logical_parent(
    snapshot: &SceneSnapshot,
    key: NodeKey,
    export_set: &HashSet<NodeKey>,
) -> Result<Option<NodeKey>, HierarchyError> {
    let node_name = |key: NodeKey| {
        snapshot
            .get(key)
            .map_or_else(|| "<unknown>".to_string(), |node| node.name.clone())
    };

    let mut visited: HashSet<NodeKey> = HashSet::new();
    visited.insert(key);

    let mut current = snapshot.get(key).and_then(|node| node.parent);
    while let Some(ancestor) = current {
        if !visited.insert(ancestor) {
            return Err(HierarchyError::CycleDetected {
                node: node_name(key),
            });
        }
        if export_set.contains(&ancestor) {
            return Ok(Some(ancestor));
        }
        let Some(ancestor_node) = snapshot.get(ancestor) else {
            return Err(HierarchyError::DanglingParent {
                node: node_name(key),
            });
        };
        current = ancestor_node.parent;
    }

    Ok(None)
}

/// Recursively attach each grouped node's own children
fn attach_children(
    groups: &HashMap<Option<NodeKey>, Vec<NodeKey>>,
    keys: &[NodeKey],
) -> Vec<HierarchyEntry> {
    keys.iter()
        .map(|&key| {
            let children = groups
                .get(&Some(key))
                .map_or_else(Vec::new, |child_keys| attach_children(groups, child_keys));
            HierarchyEntry { key, children }
        })
        .collect()
}
