//! Scene snapshot - the host collaboration boundary
//!
//! A [`SceneSnapshot`] is the already-resolved, in-memory picture of the host
//! scene handed to the exporter: every candidate node with its transforms,
//! typed data, and metadata, plus the optional world settings. The snapshot
//! is immutable during an export pass and discarded afterwards.

use slotmap::SlotMap;

use crate::scene::node::{NodeKey, SceneNode};
use crate::scene::world::WorldSettings;

/// Host scene snapshot consumed by one export pass
#[derive(Debug, Default)]
pub struct SceneSnapshot {
    nodes: SlotMap<NodeKey, SceneNode>,
    /// Host enumeration order; drives sibling order in the output document
    order: Vec<NodeKey>,
    /// Scene-wide settings, when the host has a world configured
    pub world: Option<WorldSettings>,
}

impl SceneSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, recording its host enumeration order
    pub fn insert(&mut self, node: SceneNode) -> NodeKey {
        let key = self.nodes.insert(node);
        self.order.push(key);
        key
    }

    /// Look up a node
    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Look up a node mutably
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Number of nodes in the snapshot
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the snapshot holds no nodes
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate nodes in host enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.order
            .iter()
            .filter_map(move |&key| self.nodes.get(key).map(|node| (key, node)))
    }

    /// Collect the keys of nodes that participate in the export
    ///
    /// A node is exportable when it is visible; with `selection_only` it must
    /// additionally be selected. Encounter order is preserved.
    pub fn collect_exportable(&self, selection_only: bool) -> Vec<NodeKey> {
        self.iter()
            .filter(|(_, node)| node.visible && (!selection_only || node.selected))
            .map(|(key, _)| key)
            .collect()
    }
}
