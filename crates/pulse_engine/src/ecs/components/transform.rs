//! Transform component for the ECS system

use crate::ecs::Component;
use crate::foundation::math::{Quat, Vec3};

/// ECS Transform component
///
/// Pure data component representing an entity's placement in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space translation
    pub translation: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from translation only
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation about the z axis (radians)
    #[must_use]
    pub fn with_rotation_z(mut self, angle: f32) -> Self {
        self.rotation = Quat::from_axis_angle(&Vec3::z_axis(), angle);
        self
    }

    /// Builder pattern: Set scale (uniform)
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }
}
