//! ECS Components module
//!
//! Pure data components the host stores on entities.

pub mod transform;
pub mod rigidbody2d;
pub mod script;

pub use transform::TransformComponent;
pub use rigidbody2d::{Rigidbody2DComponent, BodyType};
pub use script::ScriptComponent;
