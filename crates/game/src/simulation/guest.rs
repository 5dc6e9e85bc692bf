use std::collections::HashMap;

use glam::Vec3;

use crate::event::GameEvent;
use crate::input::Intent;
use crate::physics::BodyKind;
use crate::player::{AnimationState, Player, PlayerController, PlayerId};
use crate::replication::{Role, Roster, consume_player};

use super::SessionConfig;
use super::role::{RoleSimulation, TickContext};

/// Positions closer than this between ticks count as standing still.
const MOVE_EPSILON: f32 = 1e-3;

/// Mirrors the host. Only the local camera and the upstream intent are
/// produced here; everything else is read back from replicated state.
pub struct GuestSimulation {
    controller: PlayerController,
    local_intent: Intent,
    last_positions: HashMap<PlayerId, Vec3>,
}

impl GuestSimulation {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            controller: PlayerController::new(
                config.movement.clone(),
                config.control_scheme,
                config.jump_mode,
            ),
            local_intent: Intent::default(),
            last_positions: HashMap::new(),
        }
    }
}

impl RoleSimulation for GuestSimulation {
    fn role(&self) -> Role {
        Role::Guest
    }

    fn on_join(&mut self, ctx: &mut TickContext<'_>, player: &mut Player) {
        consume_player(ctx.network, player);
        player.body = Some(
            ctx.physics
                .add_player(player.id, player.position, BodyKind::Kinematic),
        );
        self.last_positions.insert(player.id, player.position);
        log::info!("player {} ({}) joined", player.id, player.loadout.name);
    }

    fn on_leave(&mut self, ctx: &mut TickContext<'_>, player: &Player) {
        if let Some(body) = player.body {
            ctx.physics.remove_body(body);
        }
        self.last_positions.remove(&player.id);
        log::info!("player {} left", player.id);
    }

    fn begin(&mut self, ctx: &mut TickContext<'_>, local_intent: &Intent) {
        self.local_intent = *local_intent;
        if let Err(err) = ctx.network.send_intent(*local_intent) {
            log::warn!("failed to send intent: {err}");
        }
    }

    fn simulate(&mut self, ctx: &mut TickContext<'_>, player: &mut Player) {
        let was_dead = player.vitals().is_dead();
        let local = player.id == ctx.local_id;
        if local {
            self.controller.apply_look(&self.local_intent, &mut player.motion);
        }

        consume_player(ctx.network, player);
        if let Some(body) = player.body {
            ctx.physics.set_translation(body, player.position);
        }

        let dead = player.vitals().is_dead();
        if dead && !was_dead {
            ctx.events
                .push(ctx.now_ms, GameEvent::PlayerDeath { player_id: player.id });
        } else if was_dead && !dead {
            ctx.events.push(
                ctx.now_ms,
                GameEvent::PlayerRespawn {
                    player_id: player.id,
                    position: player.position.to_array(),
                },
            );
        }

        let previous = self
            .last_positions
            .insert(player.id, player.position)
            .unwrap_or(player.position);

        if dead {
            player.firing = false;
            player.animation = AnimationState::Death;
            return;
        }

        let moving = if local {
            self.local_intent.has_movement()
        } else {
            previous.distance(player.position) > MOVE_EPSILON
        };
        player.firing = local && self.local_intent.is_firing();
        player.animation = AnimationState::from_motion(moving, player.firing);
    }

    fn settle(&mut self, ctx: &mut TickContext<'_>, _roster: &mut Roster) {
        ctx.physics.step(ctx.dt);
        ctx.effects.consume(ctx.network);
    }
}
