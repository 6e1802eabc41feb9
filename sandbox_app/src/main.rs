//! Headless sandbox for the Player2D script
//!
//! Builds a player and a camera, holds random movement keys for a while and
//! logs where the body and camera end up. Usage:
//!
//! ```text
//! sandbox [config.toml|config.ron] [frames]
//! ```

use pulse_engine::foundation::math::{extend, truncate};
use pulse_engine::prelude::*;
use rand::prelude::*;

/// Frames a randomly chosen key combination stays held
const HOLD_FRAMES: u64 = 20;

const MOVEMENT_KEYS: [KeyCode; 3] = [KeyCode::A, KeyCode::D, KeyCode::Space];

fn build_scene(engine: &mut Engine) -> (Entity, Entity) {
    let world = engine.world_mut();

    let player = world.create_entity("Player");
    world.add_component(player, TransformComponent::from_translation(Vec3::new(0.0, 1.0, 0.0)));
    world.add_component(player, Rigidbody2DComponent::dynamic().with_mass(0.5));
    world.add_component(player, ScriptComponent::new(Player2D::CLASS_NAME));

    let camera = world.create_entity("Camera");
    world.add_component(camera, TransformComponent::from_translation(Vec3::new(0.0, 0.0, 10.0)));

    (player, camera)
}

/// Stand-in for a physics step: move the body by its velocity
fn integrate(engine: &mut Engine, player: Entity, dt: f32) {
    let world = engine.world_mut();
    let Some(velocity) = world
        .get_component::<Rigidbody2DComponent>(player)
        .map(|body| body.linear_velocity)
    else {
        return;
    };
    if let Some(transform) = world.get_component_mut::<TransformComponent>(player) {
        let z = transform.translation.z;
        transform.translation = extend(&(truncate(&transform.translation) + velocity * dt), z);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pulse_engine::foundation::logging::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => EngineConfig::load_or_default(path)?,
        None => EngineConfig::default(),
    };
    let frames: u64 = match args.next() {
        Some(frames) => frames.parse()?,
        None => 240,
    };

    log::info!("Starting sandbox for {} frames", frames);

    let dt = config.fixed_time_step;
    let mut engine = Engine::new(config);
    let (player, camera) = build_scene(&mut engine);

    let started = engine.start()?;
    if started == 0 {
        log::error!("No scripts started, nothing to simulate");
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    for frame in 0..frames {
        if frame % HOLD_FRAMES == 0 {
            let input = engine.input_mut();
            input.clear();
            for key in MOVEMENT_KEYS {
                if rng.gen_bool(0.4) {
                    input.press(key);
                }
            }
            let held: Vec<KeyCode> = input.pressed_keys().collect();
            log::debug!("Frame {}: holding {:?}", frame, held);
        }

        engine.tick(FrameTime::from_secs_f32(dt))?;
        integrate(&mut engine, player, dt);
    }

    let world = engine.world();
    if let (Some(body), Some(player_transform), Some(camera_transform)) = (
        world.get_component::<Rigidbody2DComponent>(player),
        world.get_component::<TransformComponent>(player),
        world.get_component::<TransformComponent>(camera),
    ) {
        log::info!(
            "Player at ({:.3}, {:.3}) moving ({:.3}, {:.3}); camera at ({:.3}, {:.3}, {:.3})",
            player_transform.translation.x,
            player_transform.translation.y,
            body.linear_velocity.x,
            body.linear_velocity.y,
            camera_transform.translation.x,
            camera_transform.translation.y,
            camera_transform.translation.z,
        );
    }

    engine.stop();
    Ok(())
}
