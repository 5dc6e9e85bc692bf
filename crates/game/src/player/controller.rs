use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::input::Intent;

use super::{ControlScheme, JumpMode, MotionState, MovementConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementOutput {
    pub impulse: Vec3,
    pub facing: f32,
    pub moving: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpAction {
    pub impulse: Vec3,
    /// Vertical velocity must be cleared before the impulse so every jump reaches the same height.
    pub reset_vertical: bool,
}

pub trait MovementPolicy {
    fn steer(
        &self,
        intent: &Intent,
        motion: &mut MotionState,
        config: &MovementConfig,
        dt: f32,
    ) -> MovementOutput;
}

pub struct CharacterRelative;

pub struct Strafe;

pub struct AutoFace;

impl MovementPolicy for CharacterRelative {
    fn steer(
        &self,
        intent: &Intent,
        motion: &mut MotionState,
        config: &MovementConfig,
        dt: f32,
    ) -> MovementOutput {
        let turn = config.turn_rate * dt;
        if intent.turn_left || intent.strafe_left {
            motion.facing += turn;
            motion.look.yaw += turn;
        }
        if intent.turn_right || intent.strafe_right {
            motion.facing -= turn;
            motion.look.yaw -= turn;
        }

        if let Some(heading) = joystick_heading(intent, motion.look.yaw) {
            motion.facing = heading;
            return MovementOutput {
                impulse: heading_direction(heading) * config.move_speed * dt,
                facing: heading,
                moving: true,
            };
        }

        let moving = intent.move_forward || intent.move_back;
        let impulse =
            heading_direction(motion.facing) * intent.forward_axis() * config.move_speed * dt;

        MovementOutput {
            impulse,
            facing: motion.facing,
            moving,
        }
    }
}

impl MovementPolicy for Strafe {
    fn steer(
        &self,
        intent: &Intent,
        motion: &mut MotionState,
        config: &MovementConfig,
        dt: f32,
    ) -> MovementOutput {
        let yaw = motion.look.yaw;

        if let Some(heading) = joystick_heading(intent, yaw) {
            motion.facing = approach_angle(motion.facing, heading, config.facing_turn_rate * dt);
            return MovementOutput {
                impulse: heading_direction(heading) * config.move_speed * dt,
                facing: motion.facing,
                moving: true,
            };
        }

        motion.facing = yaw;
        camera_relative_output(intent, yaw, motion.facing, config, dt)
    }
}

impl MovementPolicy for AutoFace {
    fn steer(
        &self,
        intent: &Intent,
        motion: &mut MotionState,
        config: &MovementConfig,
        dt: f32,
    ) -> MovementOutput {
        let yaw = motion.look.yaw;
        motion.facing = yaw;

        if let Some(heading) = joystick_heading(intent, yaw) {
            return MovementOutput {
                impulse: heading_direction(heading) * config.move_speed * dt,
                facing: yaw,
                moving: true,
            };
        }

        camera_relative_output(intent, yaw, yaw, config, dt)
    }
}

pub struct PlayerController {
    config: MovementConfig,
    jump_mode: JumpMode,
    policy: Box<dyn MovementPolicy>,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(MovementConfig::default(), ControlScheme::default(), JumpMode::default())
    }
}

impl PlayerController {
    pub fn new(config: MovementConfig, scheme: ControlScheme, jump_mode: JumpMode) -> Self {
        let policy: Box<dyn MovementPolicy> = match scheme {
            ControlScheme::CharacterRelative => Box::new(CharacterRelative),
            ControlScheme::Strafe => Box::new(Strafe),
            ControlScheme::AutoFace => Box::new(AutoFace),
        };

        Self {
            config,
            jump_mode,
            policy,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn jump_mode(&self) -> JumpMode {
        self.jump_mode
    }

    pub fn apply_look(&self, intent: &Intent, motion: &mut MotionState) {
        motion
            .look
            .apply_delta(intent.look_delta_x, intent.look_delta_y, self.config.pitch_limit);
    }

    pub fn steer(&self, intent: &Intent, motion: &mut MotionState, dt: f32) -> MovementOutput {
        self.apply_look(intent, motion);
        self.policy.steer(intent, motion, &self.config, dt)
    }

    /// Decides whether a requested jump happens, given the body's current
    /// vertical velocity. Must be called every tick so landings are observed
    /// even when no jump is requested.
    pub fn jump(
        &self,
        requested: bool,
        vertical_velocity: f32,
        motion: &mut MotionState,
    ) -> Option<JumpAction> {
        let grounded = vertical_velocity.abs() < self.config.grounded_velocity_threshold;
        if grounded && !motion.was_grounded {
            motion.jump_count = 0;
        }
        motion.was_grounded = grounded;

        if !requested {
            return None;
        }

        let impulse = Vec3::Y * self.config.jump_impulse;
        match self.jump_mode {
            JumpMode::Single if grounded => Some(JumpAction {
                impulse,
                reset_vertical: false,
            }),
            JumpMode::Single => None,
            JumpMode::Multi { max_jumps } if motion.jump_count < max_jumps => {
                motion.jump_count += 1;
                Some(JumpAction {
                    impulse,
                    reset_vertical: true,
                })
            }
            JumpMode::Multi { .. } => None,
        }
    }
}

/// Unit vector on the ground plane for a heading, with 0 pointing along +Z.
pub fn heading_direction(angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(sin, 0.0, cos)
}

/// Wraps an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Moves `current` toward `target` along the shorter arc by at most `max_step`.
pub fn approach_angle(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = wrap_angle(target - current);
    if diff.abs() <= max_step {
        wrap_angle(target)
    } else {
        wrap_angle(current + max_step * diff.signum())
    }
}

fn joystick_heading(intent: &Intent, yaw: f32) -> Option<f32> {
    intent.joystick.map(|stick| stick.angle + PI + yaw)
}

fn camera_relative_output(
    intent: &Intent,
    yaw: f32,
    facing: f32,
    config: &MovementConfig,
    dt: f32,
) -> MovementOutput {
    let forward = heading_direction(yaw);
    let right = Vec3::new(-yaw.cos(), 0.0, yaw.sin());

    let direction =
        (forward * intent.forward_axis() + right * intent.strafe_axis()).normalize_or_zero();

    MovementOutput {
        impulse: direction * config.move_speed * dt,
        facing,
        moving: intent.wants_keyboard_move(),
    }
}
