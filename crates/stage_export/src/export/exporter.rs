//! Export pass orchestration
//!
//! [`StageExporter`] drives one export pass: collect the exportable node
//! subset, resolve the hierarchy forest, walk it depth-first while emitting
//! elements through the [`StageWriter`], then flush the finished document to
//! the sink in a single write. Failures and cancellation abort before
//! anything reaches the sink.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::identifier::{IdentifierAllocator, Namespace};
use crate::export::light_params::LightParams;
use crate::export::writer::StageWriter;
use crate::foundation::math::{forward_direction, Mat4, Transform};
use crate::scene::hierarchy::{self, HierarchyEntry, HierarchyError};
use crate::scene::node::{NodeKind, SceneNode};
use crate::scene::snapshot::SceneSnapshot;

/// Library file extension expected in prefab links after normalization
const LINK_SOURCE_EXTENSION: &str = ".blend";
/// Extension substituted into emitted prefab links
const LINK_TARGET_EXTENSION: &str = ".dae";

/// User-facing options for one export pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Restrict the pass to selected nodes
    pub selection_only: bool,
    /// Source file name recorded in the document head
    pub file_name: String,
    /// Generator string recorded in the document head
    pub generator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            selection_only: false,
            file_name: String::new(),
            generator: format!("stage_export {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Shared cancellation flag checked between sibling nodes
///
/// Clones observe the same flag, so a UI thread can cancel a pass running
/// elsewhere. Cancellation is cooperative; an in-flight node finishes before
/// the pass aborts.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the pass observing this token
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Outcome counters for a completed pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Nodes emitted into the document
    pub nodes_exported: usize,
    /// Exportable nodes skipped (unsupported kind, failed precondition)
    pub nodes_skipped: usize,
    /// Warnings logged during the pass
    pub warnings: usize,
    /// Size of the flushed document in bytes
    pub bytes_written: usize,
}

/// Failures that abort an export pass
#[derive(Error, Debug)]
pub enum ExportError {
    /// The sink rejected the finished document
    #[error("failed to write stage document: {0}")]
    Sink(#[from] io::Error),

    /// The scene's parent graph is not a forest
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// Cancellation was requested between nodes
    #[error("export cancelled")]
    Cancelled,
}

/// Exporter for one configured conversion of snapshots into Stage documents
#[derive(Debug, Default)]
pub struct StageExporter {
    options: ExportOptions,
}

impl StageExporter {
    /// Create an exporter with the given options
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Run one export pass and flush the document to `sink`
    ///
    /// The document is buffered in memory for the whole pass; the sink only
    /// sees bytes after every node has been emitted, so an error or a
    /// cancellation never leaves a truncated document behind.
    pub fn export<W: io::Write>(
        &self,
        snapshot: &SceneSnapshot,
        cancel: &CancelToken,
        sink: &mut W,
    ) -> Result<ExportSummary, ExportError> {
        log::info!(
            "starting stage export: {} nodes in snapshot, selection_only={}",
            snapshot.len(),
            self.options.selection_only
        );

        let keys = snapshot.collect_exportable(self.options.selection_only);
        let forest = hierarchy::build(snapshot, &keys)?;

        let mut pass = ExportPass {
            snapshot,
            cancel,
            writer: StageWriter::new(),
            identifiers: IdentifierAllocator::new(),
            summary: ExportSummary::default(),
        };

        pass.writer
            .write_header(&self.options.file_name, &self.options.generator);
        if let Some(world) = &snapshot.world {
            pass.writer.write_fog(world);
        }
        pass.visit_siblings(&forest, &Mat4::identity())?;
        pass.writer.write_footer();

        let document = pass.writer.finish();
        sink.write_all(document.as_bytes())?;
        sink.flush()?;

        let mut summary = pass.summary;
        summary.bytes_written = document.len();
        log::info!(
            "stage export finished: {} exported, {} skipped, {} warnings, {} bytes",
            summary.nodes_exported,
            summary.nodes_skipped,
            summary.warnings,
            summary.bytes_written
        );
        Ok(summary)
    }
}

/// Mutable state threaded through one depth-first emission walk
struct ExportPass<'a> {
    snapshot: &'a SceneSnapshot,
    cancel: &'a CancelToken,
    writer: StageWriter,
    identifiers: IdentifierAllocator,
    summary: ExportSummary,
}

impl ExportPass<'_> {
    /// Emit a sibling run, honoring cancellation between nodes
    fn visit_siblings(
        &mut self,
        entries: &[HierarchyEntry],
        parent_world: &Mat4,
    ) -> Result<(), ExportError> {
        for entry in entries {
            if self.cancel.is_cancelled() {
                log::info!("export cancelled between nodes");
                return Err(ExportError::Cancelled);
            }
            self.visit(entry, parent_world)?;
        }
        Ok(())
    }

    /// Emit one node and, nested inside it, its resolved children
    fn visit(&mut self, entry: &HierarchyEntry, parent_world: &Mat4) -> Result<(), ExportError> {
        let Some(node) = self.snapshot.get(entry.key) else {
            self.warn(format_args!("node vanished from snapshot mid-pass"));
            return self.visit_siblings(&entry.children, parent_world);
        };

        let relative = self.relative_matrix(parent_world, &node.world_transform);
        let transform = Transform::from_matrix(&relative);

        match &node.kind {
            NodeKind::Camera(spec) => {
                if !transform.has_normalized_rotation() {
                    return self.skip_degenerate(entry, node, parent_world);
                }
                let id = self
                    .identifiers
                    .allocate(Namespace::Views, entry.key, &node.name);
                log::debug!("camera '{id}': {}", node.describe());
                self.writer
                    .open_camera(&id, spec, &transform, node.layers, &node.properties);
                self.summary.nodes_exported += 1;
                self.visit_siblings(&entry.children, &node.world_transform)?;
                self.writer.close_node();
            }
            NodeKind::Light(spec) => {
                let params = LightParams::derive(spec, self.snapshot.world.as_ref());
                let direction = params.emits_direction.then(|| forward_direction(&relative));
                let location = params.emits_location.then_some(transform.position);
                let id = self
                    .identifiers
                    .allocate(Namespace::Lights, entry.key, &node.name);
                log::debug!("light '{id}': {}", node.describe());
                self.writer.open_light(
                    &id,
                    spec,
                    &params,
                    direction,
                    location,
                    node.layers,
                    &node.properties,
                );
                self.summary.nodes_exported += 1;
                self.visit_siblings(&entry.children, &node.world_transform)?;
                self.writer.close_node();
            }
            NodeKind::PrefabInstance(link) => {
                if !transform.has_normalized_rotation() {
                    return self.skip_degenerate(entry, node, parent_world);
                }
                let id = self
                    .identifiers
                    .allocate(Namespace::Objects, entry.key, &node.name);
                log::debug!("element '{id}': {}", node.describe());
                self.writer.open_element(
                    &id,
                    &derive_link(&link.path),
                    &transform,
                    &link.bounding_box,
                    node.layers,
                    &node.properties,
                );
                self.summary.nodes_exported += 1;
                self.visit_siblings(&entry.children, &node.world_transform)?;
                self.writer.close_node();
            }
            NodeKind::Mesh => {
                // Standalone geometry is not part of the format yet; children
                // are still emitted at this node's level.
                log::debug!("mesh node '{}' has no stage representation", node.name);
                self.summary.nodes_skipped += 1;
                self.visit_siblings(&entry.children, parent_world)?;
            }
            NodeKind::Other(tag) => {
                self.warn(format_args!(
                    "skipping node '{}' with unsupported type '{tag}'",
                    node.name
                ));
                self.summary.nodes_skipped += 1;
                self.visit_siblings(&entry.children, parent_world)?;
            }
        }

        Ok(())
    }

    /// Skip a node whose decomposed rotation failed the precondition
    ///
    /// Only the node itself is dropped; its children are emitted at the
    /// parent's level so the rest of the subtree survives.
    fn skip_degenerate(
        &mut self,
        entry: &HierarchyEntry,
        node: &SceneNode,
        parent_world: &Mat4,
    ) -> Result<(), ExportError> {
        self.warn(format_args!(
            "skipping node '{}': transform does not decompose to a normalized rotation",
            node.name
        ));
        self.summary.nodes_skipped += 1;
        self.visit_siblings(&entry.children, parent_world)
    }

    /// Parent-relative matrix for emission
    ///
    /// Uses the resolved parent's world transform, not the host parent's, so
    /// nodes re-parented over skipped ancestors keep their world placement. A
    /// non-invertible parent falls back to the node's world transform.
    fn relative_matrix(&mut self, parent_world: &Mat4, world: &Mat4) -> Mat4 {
        if let Some(inverse) = parent_world.try_inverse() {
            inverse * world
        } else {
            self.warn(format_args!(
                "parent transform is not invertible; emitting world-space transform"
            ));
            *world
        }
    }

    fn warn(&mut self, message: std::fmt::Arguments<'_>) {
        log::warn!("{message}");
        self.summary.warnings += 1;
    }
}

/// Derive the emitted link path from the host library path
///
/// Strips the host's path-normalization markers and rewrites the source
/// extension to the runtime's sub-scene format.
fn derive_link(path: &str) -> String {
    let stripped = path.replace("//", "");
    stripped
        .strip_suffix(LINK_SOURCE_EXTENSION)
        .map_or(stripped.clone(), |stem| {
            format!("{stem}{LINK_TARGET_EXTENSION}")
        })
}
