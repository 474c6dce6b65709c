//! Camera data for scene nodes

/// Camera description supplied by the host
///
/// The camera's orientation comes from its node transform; at export time the
/// decomposed rotation must be a finite, normalized quaternion (see
/// [`crate::foundation::math::Transform::has_normalized_rotation`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSpec {
    /// Field-of-view angle in radians
    pub fov: f32,
}

impl CameraSpec {
    /// Create a camera with the given field-of-view angle in radians
    pub fn new(fov: f32) -> Self {
        Self { fov }
    }
}
