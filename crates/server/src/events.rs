use arena::{GameEvent, PendingEvent};

pub fn log_event(pending: &PendingEvent) {
    let at = pending.timestamp_ms;
    match &pending.event {
        GameEvent::PlayerJoined { player_id, name } => {
            log::info!("[{at}ms] {name} joined as player {player_id}");
        }
        GameEvent::PlayerLeft { player_id } => {
            log::info!("[{at}ms] player {player_id} left");
        }
        GameEvent::ProjectileFired {
            owner_id, weapon, ..
        } => {
            log::trace!("[{at}ms] player {owner_id} fired {}", weapon.display_name());
        }
        GameEvent::ProjectileHit {
            projectile_id,
            hit_player,
            ..
        } => match hit_player {
            Some(player) => log::debug!("[{at}ms] bullet {projectile_id} hit player {player}"),
            None => log::trace!("[{at}ms] bullet {projectile_id} hit the map"),
        },
        GameEvent::DamageDealt {
            attacker_id,
            target_id,
            damage,
            remaining_health,
        } => {
            log::debug!(
                "[{at}ms] player {attacker_id} dealt {damage} to player {target_id} ({remaining_health} left)"
            );
        }
        GameEvent::PlayerKill {
            killer_id,
            victim_id,
        } => {
            log::info!("[{at}ms] player {killer_id} killed player {victim_id}");
        }
        GameEvent::PlayerDeath { player_id } => {
            log::debug!("[{at}ms] player {player_id} died");
        }
        GameEvent::PlayerRespawn {
            player_id,
            position,
        } => {
            log::debug!("[{at}ms] player {player_id} respawned at {position:?}");
        }
    }
}
