use arena::{ControlScheme, JumpMode, SessionConfig};

#[derive(Debug, Clone)]
pub struct HostConfig {
    pub tick_rate: u32,
    pub bots: usize,
    pub frames: u32,
    pub arena_half_size: f32,
    /// Polls a message spends in flight between peers.
    pub delay_polls: u64,
    pub seed: Option<u64>,
    pub control_scheme: ControlScheme,
    pub jump_mode: JumpMode,
    pub realtime: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            bots: 3,
            frames: 3600,
            arena_half_size: 25.0,
            delay_polls: 0,
            seed: None,
            control_scheme: ControlScheme::default(),
            jump_mode: JumpMode::default(),
            realtime: false,
        }
    }
}

impl HostConfig {
    /// Session settings for one participant. Seeds differ per participant so
    /// bots do not all pick the same spawn.
    pub fn session(&self, index: usize, account: Option<String>) -> SessionConfig {
        SessionConfig {
            control_scheme: self.control_scheme,
            jump_mode: self.jump_mode,
            account,
            seed: self.seed.map(|seed| seed.wrapping_add(index as u64)),
            ..Default::default()
        }
    }
}
