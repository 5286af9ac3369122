//! Input sampling.
//!
//! Sampled every rendered frame in `Update`. Held values are overwritten each frame;
//! button edges are latched until the fixed step consumes them, so a press is never
//! lost when a frame runs no fixed step.

use bevy::prelude::*;

#[derive(Resource, Default, Debug, Clone)]
pub struct PlayerInput {
    /// Movement stick / WASD, each axis in [-1, 1].
    pub movement: Vec2,
    /// Aim stick / arrow keys, each axis in [-1, 1].
    pub aim: Vec2,
    pub crouch_held: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub fire_pressed: bool,
    /// Restart request. Read in `Update`, not latched.
    pub cancel: bool,
}

impl PlayerInput {
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.jump_released = false;
        self.fire_pressed = false;
    }
}

fn key_axis(keys: &ButtonInput<KeyCode>, neg: KeyCode, pos: KeyCode) -> f32 {
    let mut v = 0.0;
    if keys.pressed(neg) {
        v -= 1.0;
    }
    if keys.pressed(pos) {
        v += 1.0;
    }
    v
}

/// Keyboard and any connected gamepads, merged.
///
/// Missing keyboard input (headless runs) is treated as nothing held.
pub fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    gamepads: Query<&Gamepad>,
    mut input: ResMut<PlayerInput>,
) {
    let mut movement = Vec2::ZERO;
    let mut aim = Vec2::ZERO;
    let mut crouch = false;
    let mut jump_held = false;
    let mut cancel = false;

    if let Some(keys) = keys.as_deref() {
        movement += Vec2::new(key_axis(keys, KeyCode::KeyA, KeyCode::KeyD), key_axis(keys, KeyCode::KeyS, KeyCode::KeyW));
        aim += Vec2::new(
            key_axis(keys, KeyCode::ArrowLeft, KeyCode::ArrowRight),
            key_axis(keys, KeyCode::ArrowDown, KeyCode::ArrowUp),
        );
        crouch |= keys.any_pressed([KeyCode::KeyC, KeyCode::ControlLeft]);
        jump_held |= keys.pressed(KeyCode::Space);
        input.jump_pressed |= keys.just_pressed(KeyCode::Space);
        input.jump_released |= keys.just_released(KeyCode::Space);
        input.fire_pressed |= keys.just_pressed(KeyCode::KeyJ);
        cancel |= keys.just_pressed(KeyCode::Escape);
    }

    for pad in &gamepads {
        movement += pad.left_stick();
        aim += pad.right_stick();
        crouch |= pad.pressed(GamepadButton::LeftTrigger2);
        jump_held |= pad.pressed(GamepadButton::South);
        input.jump_pressed |= pad.just_pressed(GamepadButton::South);
        input.jump_released |= pad.just_released(GamepadButton::South);
        input.fire_pressed |= pad.just_pressed(GamepadButton::West) || pad.just_pressed(GamepadButton::RightTrigger2);
        cancel |= pad.just_pressed(GamepadButton::Start);
    }

    input.movement = movement.clamp(Vec2::NEG_ONE, Vec2::ONE);
    input.aim = aim.clamp(Vec2::NEG_ONE, Vec2::ONE);
    input.crouch_held = crouch;
    input.jump_held = jump_held;
    input.cancel = cancel;
}

/// Last fixed-step system of the player pipeline.
pub fn consume_input_edges(mut input: ResMut<PlayerInput>) {
    input.clear_edges();
}
