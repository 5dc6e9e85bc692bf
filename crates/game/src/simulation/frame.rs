use glam::Vec3;

use crate::camera::{CameraRig, ViewMode};
use crate::combat::{HitEffect, Projectile};
use crate::player::{AnimationState, Loadout, Player, PlayerId};

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub position: Vec3,
    pub facing: f32,
    pub animation: AnimationState,
    pub health: u8,
    pub dead: bool,
    pub kills: u32,
    pub deaths: u32,
    pub loadout: Loadout,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        let vitals = player.vitals();
        Self {
            id: player.id,
            position: player.position,
            facing: player.facing(),
            animation: player.animation,
            health: vitals.health(),
            dead: vitals.is_dead(),
            kills: vitals.kills(),
            deaths: vitals.deaths(),
            loadout: player.loadout.clone(),
        }
    }
}

/// Everything a renderer needs to draw one tick from the local player's view.
#[derive(Debug, Clone)]
pub struct Frame {
    pub now_ms: u64,
    pub local_id: PlayerId,
    pub players: Vec<PlayerView>,
    pub bullets: Vec<Projectile>,
    pub hits: Vec<HitEffect>,
    pub camera: CameraRig,
    pub view_mode: ViewMode,
}

impl Frame {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn local_player(&self) -> Option<&PlayerView> {
        self.player(self.local_id)
    }
}
