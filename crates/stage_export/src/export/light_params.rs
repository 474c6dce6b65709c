//! Light parameter derivation
//!
//! Converts the host's raw light data into the derived parameters the Stage
//! format carries: intensity, ambient contribution, spot geometry, and
//! radius. Directional lights (and any unrecognized kind, via the enum's
//! exhaustiveness) carry no radius.

use crate::foundation::math::Vec3;
use crate::scene::light::{LightKind, LightSpec};
use crate::scene::world::WorldSettings;

/// Divisor converting authored energy into emitted intensity
const ENERGY_SCALE: f32 = 1.75;

/// Divisor converting the mean ambient channel into ambient intensity
const AMBIENT_SCALE: f32 = 2.5;

/// Narrowing factor applied to the authored spot aperture
const SPOT_SIZE_FACTOR: f32 = 0.37;

/// Beam angle as a multiple of the narrowed spot size
const BEAM_ANGLE_FACTOR: f32 = 1.3;

/// Spot-specific derived geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotParams {
    /// Narrowed spot size in radians
    pub spot_size: f32,
    /// Beam angle in radians
    pub angle: f32,
}

/// Derived per-light export parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    /// Emitted intensity; clamped from above at 1.0, never floored
    pub intensity: f32,
    /// Contribution derived from the world ambient color, 0.0 without a world
    pub ambient_intensity: f32,
    /// Effective radius; absent for directional lights
    pub radius: Option<f32>,
    /// Spot geometry; present only for spot lights
    pub spot: Option<SpotParams>,
    /// Whether the light element carries a location
    pub emits_location: bool,
    /// Whether the light element carries a direction
    pub emits_direction: bool,
}

impl LightParams {
    /// Derive export parameters for a light under the given world settings
    pub fn derive(spec: &LightSpec, world: Option<&WorldSettings>) -> Self {
        // Energy may be negative; only the upper bound is clamped.
        let intensity = (spec.energy / ENERGY_SCALE).min(1.0);
        let ambient_intensity = ambient_intensity(world);

        match spec.kind {
            LightKind::Point { distance } => Self {
                intensity,
                ambient_intensity,
                radius: Some(distance),
                spot: None,
                emits_location: true,
                emits_direction: false,
            },
            LightKind::Spot {
                distance,
                spot_size,
            } => {
                let spot_size = spot_size * SPOT_SIZE_FACTOR;
                Self {
                    intensity,
                    ambient_intensity,
                    radius: Some(distance * spot_size.cos()),
                    spot: Some(SpotParams {
                        spot_size,
                        angle: spot_size * BEAM_ANGLE_FACTOR,
                    }),
                    emits_location: true,
                    emits_direction: true,
                }
            }
            LightKind::Directional => Self {
                intensity,
                ambient_intensity,
                radius: None,
                spot: None,
                emits_location: false,
                emits_direction: true,
            },
        }
    }
}

/// Mean world ambient channel scaled into an intensity, 0.0 without a world
pub fn ambient_intensity(world: Option<&WorldSettings>) -> f32 {
    world.map_or(0.0, |world| {
        let ambient = world.ambient_color;
        ((ambient.x + ambient.y + ambient.z) / 3.0) / AMBIENT_SCALE
    })
}

/// Clamp a color to [0.0, 1.0] per channel immediately before emission
pub fn clamp_color(color: Vec3) -> Vec3 {
    Vec3::new(
        color.x.clamp(0.0, 1.0),
        color.y.clamp(0.0, 1.0),
        color.z.clamp(0.0, 1.0),
    )
}
