use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Turn keys rotate the body, forward/back push along the body's facing.
    CharacterRelative,
    /// Keys move relative to the camera; the body faces the camera.
    #[default]
    Strafe,
    /// Like `Strafe`, but facing is pinned to the camera even under joystick input.
    AutoFace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpMode {
    #[default]
    Single,
    Multi {
        max_jumps: u8,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    pub move_speed: f32,
    pub turn_rate: f32,

    /// Upper bound on how fast facing chases the joystick, in rad/s.
    pub facing_turn_rate: f32,
    pub pitch_limit: f32,

    pub jump_impulse: f32,
    pub grounded_velocity_threshold: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 202.0,
            turn_rate: 3.0,

            facing_turn_rate: 10.0,
            pitch_limit: std::f32::consts::FRAC_PI_3,

            jump_impulse: 8.0,
            grounded_velocity_threshold: 0.5,
        }
    }
}

impl JumpMode {
    pub const DEFAULT_MAX_JUMPS: u8 = 5;

    pub fn multi() -> Self {
        Self::Multi {
            max_jumps: Self::DEFAULT_MAX_JUMPS,
        }
    }
}
