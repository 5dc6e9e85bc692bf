use rkyv::{Archive, Deserialize, Serialize};

use crate::combat::{HitEffect, Projectile};
use crate::player::Loadout;

/// Per-player replicated slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub enum PlayerKey {
    Position,
    Facing,
    Health,
    Dead,
    Kills,
    Deaths,
    Character,
}

/// Session-wide replicated slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub enum Channel {
    Bullets,
    Hits,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub enum ReplicatedValue {
    Position([f32; 3]),
    Facing(f32),
    Health(u8),
    Dead(bool),
    Kills(u32),
    Deaths(u32),
    Character(Loadout),
    Bullets(Vec<Projectile>),
    Hits(Vec<HitEffect>),
}
