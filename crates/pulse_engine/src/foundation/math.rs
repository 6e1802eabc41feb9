//! Math utilities and types
//!
//! Thin aliases over `nalgebra` so the rest of the engine speaks one
//! vocabulary.

pub use nalgebra::{Vector2, Vector3, Vector4, Quaternion, Unit};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Drop the z component of a 3D vector
pub fn truncate(v: &Vec3) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Extend a 2D vector with the given z component
pub fn extend(v: &Vec2, z: f32) -> Vec3 {
    Vec3::new(v.x, v.y, z)
}
