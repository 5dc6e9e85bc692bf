use std::fmt;

use glam::Vec3;
use rkyv::{Archive, Deserialize, Serialize};

use crate::player::PlayerId;

/// Identifies a projectile by who fired it and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct ProjectileId {
    pub owner: PlayerId,
    pub fired_at_ms: u64,
}

impl ProjectileId {
    pub fn new(owner: PlayerId, fired_at_ms: u64) -> Self {
        Self { owner, fired_at_ms }
    }
}

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.owner, self.fired_at_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct Projectile {
    pub id: ProjectileId,
    pub origin: [f32; 3],
    pub angle: f32,
    pub owner: PlayerId,
    pub damage: u8,
}

impl Projectile {
    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }

    pub fn fired_at_ms(&self) -> u64 {
        self.id.fired_at_ms
    }
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct HitEffect {
    pub id: ProjectileId,
    pub position: [f32; 3],
}

impl HitEffect {
    pub fn new(id: ProjectileId, position: Vec3) -> Self {
        Self {
            id,
            position: position.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}
