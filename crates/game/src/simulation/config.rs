use serde::{Deserialize, Serialize};

use crate::combat::CombatConfig;
use crate::player::{ControlScheme, JumpMode, MovementConfig};
use crate::score::DEFAULT_DEBOUNCE_MS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub movement: MovementConfig,
    pub combat: CombatConfig,
    pub control_scheme: ControlScheme,
    pub jump_mode: JumpMode,

    pub event_capacity: usize,
    /// Account the local player's kills are reported under. `None` plays anonymously.
    pub account: Option<String>,
    pub highscore_debounce_ms: u64,
    /// Seed for spawn selection. Random when unset.
    pub seed: Option<u64>,
    pub viewport_width: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            combat: CombatConfig::default(),
            control_scheme: ControlScheme::default(),
            jump_mode: JumpMode::default(),

            event_capacity: 256,
            account: None,
            highscore_debounce_ms: DEFAULT_DEBOUNCE_MS,
            seed: None,
            viewport_width: 1280.0,
        }
    }
}
