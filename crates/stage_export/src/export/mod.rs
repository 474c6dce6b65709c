//! Stage document emission
//!
//! Everything that turns a [`crate::scene::SceneSnapshot`] into Stage
//! document text: the pass orchestrator, the identifier allocator, light
//! parameter derivation, and the buffered writer.

pub mod exporter;
#[cfg(test)]
mod tests;
pub mod identifier;
pub mod light_params;
pub mod writer;

pub use exporter::{CancelToken, ExportError, ExportOptions, ExportSummary, StageExporter};
pub use identifier::{IdentifierAllocator, Namespace};
pub use light_params::{LightParams, SpotParams};
pub use writer::StageWriter;
