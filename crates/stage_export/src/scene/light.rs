//! Light data for scene nodes
//!
//! Pure data describing a light source as supplied by the host. Derived
//! export parameters (intensity, radius, spot geometry) live in
//! [`crate::export::light_params`]; this module carries only what the host
//! authored.

use crate::foundation::math::Vec3;

/// Kind of light source, with kind-specific parameters as enum payloads
///
/// Point and directional lights structurally have no spot size.
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Light radiating in all directions from a position
    Point {
        /// Falloff distance
        distance: f32,
    },
    /// Cone of light from a position along a direction
    Spot {
        /// Falloff distance
        distance: f32,
        /// Full cone aperture in radians
        spot_size: f32,
    },
    /// Parallel-ray light (like sunlight); direction only
    Directional,
}

/// Light source description supplied by the host
#[derive(Debug, Clone, PartialEq)]
pub struct LightSpec {
    /// The kind of light and its kind-specific parameters
    pub kind: LightKind,
    /// Raw authored energy; converted to intensity at export time
    pub energy: f32,
    /// RGB color; clamped to [0, 1] per channel immediately before emission
    pub color: Vec3,
}

impl LightSpec {
    /// Create a point light
    pub fn point(color: Vec3, energy: f32, distance: f32) -> Self {
        Self {
            kind: LightKind::Point { distance },
            energy,
            color,
        }
    }

    /// Create a spot light with a full cone aperture in radians
    pub fn spot(color: Vec3, energy: f32, distance: f32, spot_size: f32) -> Self {
        Self {
            kind: LightKind::Spot {
                distance,
                spot_size,
            },
            energy,
            color,
        }
    }

    /// Create a directional light
    pub fn directional(color: Vec3, energy: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            energy,
            color,
        }
    }

    /// The kind name emitted as the light element's type attribute
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LightKind::Point { .. } => "Point",
            LightKind::Spot { .. } => "Spot",
            LightKind::Directional => "Directional",
        }
    }
}
