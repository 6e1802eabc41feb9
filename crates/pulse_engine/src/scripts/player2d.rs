//! 2D player controller
//!
//! Pushes the entity's rigid body around from the keyboard and keeps a named
//! camera entity parked on the player.
//!
//! The camera is placed at the translation captured in `on_create`, not at
//! the player's current translation, so it does not track the body as it
//! moves.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ecs::components::{Rigidbody2DComponent, TransformComponent};
use crate::ecs::Entity;
use crate::foundation::math::{Vec2, Vec3};
use crate::foundation::time::FrameTime;
use crate::input::{KeyCode, KeyState};
use crate::scripting::{Script, ScriptContext, ScriptError, ScriptFieldMap, ScriptFieldType, ScriptFieldValue};

/// Keys driving the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Push left
    pub left: KeyCode,
    /// Push right
    pub right: KeyCode,
    /// Push up
    pub jump: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::A,
            right: KeyCode::D,
            jump: KeyCode::Space,
        }
    }
}

/// Player tuning, loadable from TOML or RON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Impulse scale applied per second of frame time
    pub speed: f32,
    /// Name of the entity the camera follows from
    pub camera_name: String,
    /// Horizontal direction magnitude before scaling
    pub move_strength: f32,
    /// Vertical direction magnitude before scaling
    pub jump_strength: f32,
    /// Key bindings
    pub bindings: KeyBindings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 0.1,
            camera_name: "Camera".to_string(),
            move_strength: 1.0,
            jump_strength: 2.0,
            bindings: KeyBindings::default(),
        }
    }
}

impl Config for PlayerConfig {}

/// Unscaled movement direction for the current key state
///
/// Left and right are exclusive: left is checked first, so holding both
/// pushes left.
pub fn movement_direction<K: KeyState + ?Sized>(input: &K, config: &PlayerConfig) -> Vec2 {
    let bindings = &config.bindings;
    let mut direction = Vec2::zeros();

    if input.is_key_pressed(bindings.left) {
        direction.x -= config.move_strength;
    } else if input.is_key_pressed(bindings.right) {
        direction.x += config.move_strength;
    }

    if input.is_key_pressed(bindings.jump) {
        direction.y += config.jump_strength;
    }

    direction
}

/// Player behavior script
#[derive(Debug, Clone)]
pub struct Player2D {
    config: PlayerConfig,
    translation: Vec3,
    body: Option<Entity>,
    camera: Option<Entity>,
}

impl Default for Player2D {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl Player2D {
    /// Class name the script is registered under
    pub const CLASS_NAME: &'static str = "Player2D";

    /// Create an uninitialized player script
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            translation: Vec3::zeros(),
            body: None,
            camera: None,
        }
    }

    /// Current speed
    pub const fn speed(&self) -> f32 {
        self.config.speed
    }

    /// Translation captured at creation
    pub const fn cached_translation(&self) -> Vec3 {
        self.translation
    }

    /// Camera entity resolved at creation
    pub const fn camera(&self) -> Option<Entity> {
        self.camera
    }

    /// Impulse for one frame: direction scaled by speed and elapsed seconds
    pub fn frame_impulse<K: KeyState + ?Sized>(&self, input: &K, frame_time: FrameTime) -> Vec2 {
        movement_direction(input, &self.config) * (self.config.speed * frame_time.as_seconds())
    }
}

impl Script for Player2D {
    fn on_create(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        log::warn!("Player2D::on_create - {}", ctx.entity_id());

        let translation = ctx.get_component::<TransformComponent>()?.translation;
        ctx.get_component::<Rigidbody2DComponent>()?;
        let camera = ctx
            .find_entity_by_name(&self.config.camera_name)
            .ok_or_else(|| ScriptError::EntityNotFound(self.config.camera_name.clone()))?;

        self.translation = translation;
        self.body = Some(ctx.entity());
        self.camera = Some(camera);
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut ScriptContext<'_>, frame_time: FrameTime) -> Result<(), ScriptError> {
        let body = self.body.ok_or(ScriptError::NotInitialized("rigid body"))?;
        let camera = self.camera.ok_or(ScriptError::NotInitialized("camera"))?;

        let impulse = self.frame_impulse(ctx.input(), frame_time);
        ctx.apply_linear_impulse_to_center(body, impulse, true)?;

        ctx.set_position(camera, self.translation)
    }

    fn fields(&self) -> ScriptFieldMap {
        let mut fields = ScriptFieldMap::new();
        fields.insert("speed".to_string(), ScriptFieldValue::Float(self.config.speed));
        fields
    }

    fn set_field(&mut self, name: &str, value: ScriptFieldValue) -> Result<(), ScriptError> {
        match name {
            "speed" => {
                self.config.speed = value.as_float().ok_or(ScriptError::FieldTypeMismatch {
                    field: name.to_string(),
                    expected: ScriptFieldType::Float,
                    found: value.field_type(),
                })?;
                Ok(())
            }
            _ => Err(ScriptError::UnknownField(name.to_string())),
        }
    }
}
