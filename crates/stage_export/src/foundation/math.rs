//! Math utilities and types
//!
//! Provides the fundamental math types used by the export pipeline, plus the
//! transform codec that decomposes host matrices into stable
//! translation/rotation/scale triples.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, UnitQuaternion, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Canonical forward vector used for directional-style lights
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Transform representing position, rotation, and scale
///
/// Rotation is always carried as a quaternion; consumers that need an
/// axis-angle form go through [`Transform::rotation_axis_angle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in the parent-relative frame
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Per-axis scale factors (non-uniform scale permitted)
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Decompose a transformation matrix into translation, rotation, and scale
    ///
    /// Translation comes from the fourth column, per-axis scale from the
    /// basis column magnitudes, and rotation from the scale-free 3x3 block.
    /// A degenerate matrix (zero scale, non-finite entries) produces a
    /// non-finite rotation, which [`Transform::has_normalized_rotation`]
    /// reports so callers can reject the node.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        // Extract position
        let position = Vec3::new(matrix.m14, matrix.m24, matrix.m34);

        // Extract scale from the matrix columns
        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();
        let scale = Vec3::new(scale_x, scale_y, scale_z);

        // Extract rotation by removing scale from the rotation matrix
        let rotation_matrix = Matrix3::new(
            matrix.m11 / scale_x, matrix.m12 / scale_y, matrix.m13 / scale_z,
            matrix.m21 / scale_x, matrix.m22 / scale_y, matrix.m23 / scale_z,
            matrix.m31 / scale_x, matrix.m32 / scale_y, matrix.m33 / scale_z,
        );
        let rotation = Quat::from_rotation_matrix(&nalgebra::Rotation3::from_matrix_unchecked(
            rotation_matrix,
        ));

        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Check that the rotation is a finite, normalized quaternion
    ///
    /// This is the precondition cameras and prefab instances must satisfy at
    /// export time. Decomposition of a degenerate matrix fails this check.
    pub fn has_normalized_rotation(&self) -> bool {
        let norm = self.rotation.as_ref().coords.norm();
        norm.is_finite() && (norm - 1.0).abs() < 1.0e-3
    }

    /// Convert the rotation to axis-angle form
    ///
    /// Conversion utility for consumers that cannot take a quaternion; the
    /// identity rotation maps to the Z axis with a zero angle.
    pub fn rotation_axis_angle(&self) -> (Vec3, f32) {
        self.rotation
            .axis_angle()
            .map_or((Vec3::z(), 0.0), |(axis, angle)| (axis.into_inner(), angle))
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Derive the world-space forward vector of a transform matrix
///
/// Applies the matrix 3x3 block to the canonical forward vector `(0, 0, -1)`
/// and normalizes. Used for directional-style lights. A degenerate matrix
/// falls back to the canonical forward vector.
pub fn forward_direction(matrix: &Mat4) -> Vec3 {
    let basis = Mat3::new(
        matrix.m11, matrix.m12, matrix.m13,
        matrix.m21, matrix.m22, matrix.m23,
        matrix.m31, matrix.m32, matrix.m33,
    );
    (basis * FORWARD).try_normalize(1.0e-6).unwrap_or(FORWARD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_decomposition() {
        let transform = Transform::from_matrix(&Mat4::identity());

        assert_relative_eq!(transform.position, Vec3::zeros());
        assert_relative_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
        assert!(transform.has_normalized_rotation());
        assert_relative_eq!(transform.rotation.angle(), 0.0);
    }

    #[test]
    fn test_decompose_translation_and_scale() {
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 3.0, 4.0));
        let transform = Transform::from_matrix(&matrix);

        assert_relative_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(transform.scale, Vec3::new(2.0, 3.0, 4.0), epsilon = 1.0e-5);
        assert!(transform.has_normalized_rotation());
    }

    #[test]
    fn test_decompose_rotation_round_trip() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), 0.75);
        let matrix = rotation.to_homogeneous();
        let transform = Transform::from_matrix(&matrix);

        assert!(transform.has_normalized_rotation());
        assert_relative_eq!(transform.rotation.angle(), 0.75, epsilon = 1.0e-5);
    }

    #[test]
    fn test_zero_scale_fails_rotation_precondition() {
        let matrix = Mat4::new_nonuniform_scaling(&Vec3::new(0.0, 1.0, 1.0));
        let transform = Transform::from_matrix(&matrix);

        assert!(!transform.has_normalized_rotation());
    }

    #[test]
    fn test_forward_direction_identity() {
        let direction = forward_direction(&Mat4::identity());
        assert_relative_eq!(direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_forward_direction_rotated() {
        // Rotating -Z by 90 degrees around Y points the light down -X
        let matrix = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2)
            .to_homogeneous();
        let direction = forward_direction(&matrix);

        assert_relative_eq!(direction, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1.0e-5);
    }

    #[test]
    fn test_axis_angle_conversion() {
        let mut transform = Transform::identity();
        transform.rotation = Quat::from_axis_angle(&Vec3::x_axis(), 1.25);

        let (axis, angle) = transform.rotation_axis_angle();
        assert_relative_eq!(axis, Vec3::new(1.0, 0.0, 0.0), epsilon = 1.0e-5);
        assert_relative_eq!(angle, 1.25, epsilon = 1.0e-5);
    }
}
