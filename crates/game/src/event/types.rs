use crate::combat::ProjectileId;
use crate::player::{PlayerId, Weapon};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlayerJoined {
        player_id: PlayerId,
        name: String,
    },
    PlayerLeft {
        player_id: PlayerId,
    },
    ProjectileFired {
        owner_id: PlayerId,
        projectile_id: ProjectileId,
        weapon: Weapon,
    },
    ProjectileHit {
        projectile_id: ProjectileId,
        hit_player: Option<PlayerId>,
        position: [f32; 3],
    },
    DamageDealt {
        attacker_id: PlayerId,
        target_id: PlayerId,
        damage: u8,
        remaining_health: u8,
    },
    PlayerKill {
        killer_id: PlayerId,
        victim_id: PlayerId,
    },
    PlayerDeath {
        player_id: PlayerId,
    },
    PlayerRespawn {
        player_id: PlayerId,
        position: [f32; 3],
    },
}

impl GameEvent {
    /// Transient events are the first to go when the queue overflows.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ProjectileFired { .. } | Self::ProjectileHit { .. } | Self::DamageDealt { .. }
        )
    }
}
