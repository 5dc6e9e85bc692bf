mod animation;
mod config;
mod controller;
mod loadout;
mod record;
mod state;

pub use animation::AnimationState;
pub use config::{ControlScheme, JumpMode, MovementConfig};
pub use controller::{
    AutoFace, CharacterRelative, JumpAction, MovementOutput, MovementPolicy, PlayerController,
    Strafe, approach_angle, heading_direction, wrap_angle,
};
pub use loadout::{DEFAULT_SKIN, Loadout, Weapon, WeaponClass};
pub use record::Player;
pub use state::{LookAngles, MotionState};

pub type PlayerId = u32;
