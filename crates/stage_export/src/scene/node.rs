//! Scene node data
//!
//! A [`SceneNode`] is a pure-data record of one host object, captured into a
//! [`crate::scene::SceneSnapshot`] for the duration of a single export pass.
//! Children are derived by the hierarchy resolver from parent references;
//! nodes never store child lists.

use slotmap::new_key_type;

use crate::foundation::math::{Mat4, Vec3};
use crate::scene::camera::CameraSpec;
use crate::scene::layers::LayerMask;
use crate::scene::light::LightSpec;
use crate::scene::properties::PropertyValue;

new_key_type! {
    /// Key identifying a node inside one snapshot
    pub struct NodeKey;
}

/// External sub-scene reference carried by a prefab instance node
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabLink {
    /// Library file path as supplied by the host, including any
    /// path-normalization marker prefix
    pub path: String,
    /// Eight bounding-box corner points in the node's local frame
    pub bounding_box: [Vec3; 8],
}

/// Node type tag with type-specific payload
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Camera node
    Camera(CameraSpec),
    /// Light node
    Light(LightSpec),
    /// Mesh node; geometry export is deferred and never emitted
    Mesh,
    /// Node backed by an externally authored sub-scene
    PrefabInstance(PrefabLink),
    /// Anything else, carrying the host's raw type tag for diagnostics
    Other(String),
}

impl NodeKind {
    /// Short tag used in logs and diagnostics
    pub fn tag(&self) -> &str {
        match self {
            Self::Camera(_) => "Camera",
            Self::Light(_) => "Light",
            Self::Mesh => "Mesh",
            Self::PrefabInstance(_) => "PrefabInstance",
            Self::Other(tag) => tag,
        }
    }
}

/// One host object captured for export
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Host-visible object name; cleaned into an identifier at export time
    pub name: String,

    /// Type tag and type-specific data
    pub kind: NodeKind,

    /// World-space transform as resolved by the host
    pub world_transform: Mat4,

    /// Transform relative to the host's direct parent
    ///
    /// Kept for diagnostics; emission derives parent-relative matrices from
    /// world transforms because the resolved parent may skip non-exported
    /// ancestors.
    pub local_transform: Mat4,

    /// Host parent reference (direct parent, exported or not)
    pub parent: Option<NodeKey>,

    /// Whether the node is visible in the host scene
    pub visible: bool,

    /// Whether the node is selected in the host scene
    pub selected: bool,

    /// Visibility layer membership
    pub layers: LayerMask,

    /// Custom key/value metadata in host encounter order
    pub properties: Vec<(String, PropertyValue)>,
}

impl SceneNode {
    /// Create a visible, unselected root node with identity transforms
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            world_transform: Mat4::identity(),
            local_transform: Mat4::identity(),
            parent: None,
            visible: true,
            selected: false,
            layers: LayerMask::default(),
            properties: Vec::new(),
        }
    }

    /// Set the world transform
    #[must_use]
    pub fn with_world_transform(mut self, transform: Mat4) -> Self {
        self.world_transform = transform;
        self
    }

    /// Set the host parent reference
    #[must_use]
    pub fn with_parent(mut self, parent: NodeKey) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attach a custom property
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }

    /// Explicit diagnostic summary of the fields the export core consumes
    pub fn describe(&self) -> String {
        format!(
            "{} [{}] visible={} selected={} layers={:#07x} properties={}",
            self.name,
            self.kind.tag(),
            self.visible,
            self.selected,
            self.layers.bits(),
            self.properties.len(),
        )
    }
}
