use glam::Vec3;

use crate::net::{Network, NetworkError};
use crate::player::Player;

use super::{DirtyFields, PlayerKey, ReplicatedValue};

/// Writes a player's authoritative fields. Position and facing go out every
/// call; everything else only when it changed.
pub fn publish_player(network: &mut dyn Network, player: &mut Player) -> Result<(), NetworkError> {
    let dirty = player.take_dirty();
    let result = write_fields(network, player, dirty);
    if result.is_err() {
        player.mark_dirty(dirty);
    }
    result
}

fn write_fields(
    network: &mut dyn Network,
    player: &Player,
    dirty: DirtyFields,
) -> Result<(), NetworkError> {
    let id = player.id;

    network.set_state(
        id,
        PlayerKey::Position,
        ReplicatedValue::Position(player.position.to_array()),
    )?;
    network.set_state(id, PlayerKey::Facing, ReplicatedValue::Facing(player.facing()))?;

    let vitals = player.vitals();
    if dirty.contains(DirtyFields::HEALTH) {
        network.set_state(id, PlayerKey::Health, ReplicatedValue::Health(vitals.health()))?;
    }
    if dirty.contains(DirtyFields::DEAD) {
        network.set_state(id, PlayerKey::Dead, ReplicatedValue::Dead(vitals.is_dead()))?;
    }
    if dirty.contains(DirtyFields::KILLS) {
        network.set_state(id, PlayerKey::Kills, ReplicatedValue::Kills(vitals.kills()))?;
    }
    if dirty.contains(DirtyFields::DEATHS) {
        network.set_state(id, PlayerKey::Deaths, ReplicatedValue::Deaths(vitals.deaths()))?;
    }
    if dirty.contains(DirtyFields::CHARACTER) {
        network.set_state(
            id,
            PlayerKey::Character,
            ReplicatedValue::Character(player.loadout.clone()),
        )?;
    }
    Ok(())
}

/// Overwrites a mirrored player with the host's latest values. Nothing is
/// smoothed: the local copy becomes exactly what was published.
pub fn consume_player(network: &dyn Network, player: &mut Player) {
    let id = player.id;

    if let Some(ReplicatedValue::Position(position)) = network.get_state(id, PlayerKey::Position) {
        player.position = Vec3::from_array(*position);
    }
    if let Some(ReplicatedValue::Facing(facing)) = network.get_state(id, PlayerKey::Facing) {
        player.motion.facing = *facing;
    }

    let vitals = player.vitals();
    let mut health = vitals.health();
    let mut dead = vitals.is_dead();
    let mut kills = vitals.kills();
    let mut deaths = vitals.deaths();

    if let Some(ReplicatedValue::Health(value)) = network.get_state(id, PlayerKey::Health) {
        health = *value;
    }
    if let Some(ReplicatedValue::Dead(value)) = network.get_state(id, PlayerKey::Dead) {
        dead = *value;
    }
    if let Some(ReplicatedValue::Kills(value)) = network.get_state(id, PlayerKey::Kills) {
        kills = *value;
    }
    if let Some(ReplicatedValue::Deaths(value)) = network.get_state(id, PlayerKey::Deaths) {
        deaths = *value;
    }
    player.mirror_vitals(health, dead, kills, deaths);

    if let Some(ReplicatedValue::Character(loadout)) = network.get_state(id, PlayerKey::Character) {
        if player.loadout != *loadout {
            player.loadout = loadout.clone();
        }
    }
}
