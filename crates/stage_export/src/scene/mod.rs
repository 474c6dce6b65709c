//! Scene data model
//!
//! Pure-data types describing the host scene for one export pass: nodes with
//! type tags and transforms, lights, cameras, world settings, custom
//! properties, and the hierarchy resolver that reconstructs a forest over the
//! exported subset.
//!
//! Everything here is transient: a [`SceneSnapshot`] is built fresh from the
//! host before each export and dropped when the pass completes.

pub mod camera;
pub mod hierarchy;
pub mod layers;
pub mod light;
pub mod node;
pub mod properties;
pub mod snapshot;
pub mod world;

pub use camera::CameraSpec;
pub use hierarchy::{HierarchyEntry, HierarchyError};
pub use layers::LayerMask;
pub use light::{LightKind, LightSpec};
pub use node::{NodeKey, NodeKind, PrefabLink, SceneNode};
pub use properties::PropertyValue;
pub use snapshot::SceneSnapshot;
pub use world::{FogFalloff, FogSettings, WorldSettings};
