//! 2D rigid body component
//!
//! Holds the state an impulse acts on. There is no integrator here: whatever
//! steps the simulation reads `linear_velocity` back out.

use serde::{Deserialize, Serialize};

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// How a body responds to forces and impulses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves
    #[default]
    Static,
    /// Moved by impulses and forces
    Dynamic,
    /// Moved only by setting its velocity directly
    Kinematic,
}

/// Component for entities simulated as a 2D rigid body
#[derive(Debug, Clone, PartialEq)]
pub struct Rigidbody2DComponent {
    /// Body type
    pub body_type: BodyType,

    /// Mass in kilograms
    pub mass: f32,

    /// Linear velocity in units per second
    pub linear_velocity: Vec2,

    /// Whether the body is currently simulated
    pub awake: bool,

    /// Whether the body may fall asleep when at rest
    pub allow_sleep: bool,
}

impl Component for Rigidbody2DComponent {}

impl Default for Rigidbody2DComponent {
    fn default() -> Self {
        Self {
            body_type: BodyType::Static,
            mass: 1.0,
            linear_velocity: Vec2::zeros(),
            awake: true,
            allow_sleep: true,
        }
    }
}

impl Rigidbody2DComponent {
    /// Create a dynamic body with unit mass
    pub fn dynamic() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            ..Default::default()
        }
    }

    /// Create a static body
    pub fn fixed() -> Self {
        Self::default()
    }

    /// Builder pattern: Set mass
    #[must_use]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Builder pattern: Start asleep
    #[must_use]
    pub fn asleep(mut self) -> Self {
        self.awake = false;
        self
    }

    /// Apply an impulse at the center of mass
    ///
    /// Only dynamic bodies respond. A sleeping body ignores the impulse unless
    /// `wake` is set, in which case it is woken first.
    pub fn apply_linear_impulse_to_center(&mut self, impulse: Vec2, wake: bool) {
        if self.body_type != BodyType::Dynamic {
            return;
        }

        if wake && !self.awake {
            self.awake = true;
        }

        if self.awake {
            self.linear_velocity += impulse * self.inverse_mass();
        }
    }

    /// Put the body to sleep, clearing its velocity
    pub fn sleep(&mut self) {
        if self.allow_sleep {
            self.awake = false;
            self.linear_velocity = Vec2::zeros();
        }
    }

    /// Inverse mass; non-positive mass is treated as unit mass
    pub fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            1.0
        }
    }
}
