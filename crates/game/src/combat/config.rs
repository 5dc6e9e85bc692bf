use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConfig {
    pub fire_rate_ms: u64,
    pub respawn_delay_ms: u64,

    pub bullet_speed: f32,
    pub bullet_lifetime_ms: u64,
    pub hit_effect_ms: u64,

    pub max_health: u8,
    /// Muzzle position relative to the player's origin, before facing rotation.
    pub weapon_offset: Vec3,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            fire_rate_ms: 380,
            respawn_delay_ms: 2000,

            bullet_speed: 20.0,
            bullet_lifetime_ms: 1000,
            hit_effect_ms: 500,

            max_health: 100,
            weapon_offset: Vec3::new(-0.2, 1.4, 0.8),
        }
    }
}
