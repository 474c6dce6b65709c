//! # Stage Export
//!
//! A scene-graph export pipeline that converts an in-memory 3D scene into a
//! Stage document: a nested, XML-like text format describing cameras, lights,
//! and prefab-instance elements for a game runtime.
//!
//! ## Features
//!
//! - **Snapshot Model**: Pure-data scene capture decoupled from any host
//! - **Hierarchy Resolution**: Re-parents nodes over non-exported ancestors
//! - **Stable Identifiers**: Sanitized, per-namespace unique element ids
//! - **Transactional Output**: The sink only sees complete documents
//! - **Cooperative Cancellation**: Abort between nodes from another thread
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stage_export::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut snapshot = SceneSnapshot::new();
//!     snapshot.insert(SceneNode::new(
//!         "Main",
//!         NodeKind::Camera(CameraSpec::new(0.8)),
//!     ));
//!
//!     let exporter = StageExporter::new(ExportOptions {
//!         file_name: "level.stage".into(),
//!         ..ExportOptions::default()
//!     });
//!
//!     let mut file = std::fs::File::create("level.stage")?;
//!     let summary = exporter.export(&snapshot, &CancelToken::new(), &mut file)?;
//!     println!("exported {} nodes", summary.nodes_exported);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod export;
pub mod foundation;
pub mod scene;

pub use export::{CancelToken, ExportError, ExportOptions, ExportSummary, StageExporter};

/// Common imports for pipeline users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        export::{CancelToken, ExportError, ExportOptions, ExportSummary, StageExporter},
        foundation::math::{Mat4, Transform, Vec3},
        scene::{
            CameraSpec, FogFalloff, LayerMask, LightKind, LightSpec, NodeKind, PrefabLink,
            PropertyValue, SceneNode, SceneSnapshot, WorldSettings,
        },
    };
}
