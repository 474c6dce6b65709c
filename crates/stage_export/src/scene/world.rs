//! Global world settings
//!
//! Scene-wide atmosphere and ambient lighting supplied by the host. These
//! feed the document's fog block and the derived ambient intensity of every
//! exported light.

use crate::foundation::math::Vec3;

/// Fog falloff curve
///
/// The document format only distinguishes linear from exponential; hosts with
/// richer falloff models map onto these two at the collaborator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FogFalloff {
    /// Linear falloff with distance
    Linear,
    /// Exponential falloff with distance
    Exponential,
}

impl FogFalloff {
    /// The marker emitted as the fog element's type attribute
    pub fn type_marker(self) -> &'static str {
        match self {
            Self::Linear => "LINEAR",
            Self::Exponential => "EXPONENTIAL",
        }
    }
}

/// Fog parameters, present only when the host enables mist
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogSettings {
    /// Falloff curve
    pub falloff: FogFalloff,
    /// Fog depth
    pub depth: f32,
}

/// Scene-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSettings {
    /// Global ambient color; averaged into each light's ambient intensity
    pub ambient_color: Vec3,
    /// Horizon color; emitted as the fog color, clamped per channel
    pub horizon_color: Vec3,
    /// Fog settings when mist is enabled
    pub fog: Option<FogSettings>,
}

impl WorldSettings {
    /// Create world settings without fog
    pub fn new(ambient_color: Vec3, horizon_color: Vec3) -> Self {
        Self {
            ambient_color,
            horizon_color,
            fog: None,
        }
    }

    /// Enable fog with the given falloff and depth
    #[must_use]
    pub fn with_fog(mut self, falloff: FogFalloff, depth: f32) -> Self {
        self.fog = Some(FogSettings { falloff, depth });
        self
    }
}
