//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the exporter:
//! - Math types and transform decomposition
//! - Logging utilities

pub mod logging;
pub mod math;
