use std::collections::HashMap;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::combat::{CombatModel, HitEffect, HitOutcome, ProjectileId};
use crate::event::GameEvent;
use crate::input::Intent;
use crate::physics::{BodyId, BodyKind, BodyTag, BulletTag, Intersection};
use crate::player::{AnimationState, Player, PlayerController, PlayerId};
use crate::replication::{Role, Roster, publish_player};
use crate::spawn::SpawnSelector;

use super::SessionConfig;
use super::role::{RoleSimulation, TickContext};

/// Authoritative simulation: owns movement, combat, spawning and every
/// replicated write.
pub struct HostSimulation {
    controller: PlayerController,
    combat: CombatModel,
    spawns: SpawnSelector,
    rng: StdRng,
    intents: HashMap<PlayerId, Intent>,
    bullet_bodies: HashMap<ProjectileId, BodyId>,
}

impl HostSimulation {
    pub fn new(config: &SessionConfig, spawns: SpawnSelector) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            controller: PlayerController::new(
                config.movement.clone(),
                config.control_scheme,
                config.jump_mode,
            ),
            combat: CombatModel::new(config.combat.clone()),
            spawns,
            rng,
            intents: HashMap::new(),
            bullet_bodies: HashMap::new(),
        }
    }

    fn next_intent(&mut self, player: PlayerId) -> Intent {
        let Some(stored) = self.intents.get_mut(&player) else {
            return Intent::default();
        };
        let intent = *stored;
        stored.clear_one_shots();
        intent
    }

    fn move_player(
        &mut self,
        ctx: &mut TickContext<'_>,
        player: &mut Player,
        intent: &Intent,
    ) -> bool {
        let output = self.controller.steer(intent, &mut player.motion, ctx.dt);

        let Some(body) = player.body else {
            return output.moving;
        };

        if output.impulse != Vec3::ZERO {
            ctx.physics.apply_impulse(body, output.impulse, true);
        }

        let velocity = ctx.physics.linear_velocity(body).unwrap_or(Vec3::ZERO);
        if let Some(jump) = self
            .controller
            .jump(intent.jump, velocity.y, &mut player.motion)
        {
            if jump.reset_vertical {
                ctx.physics
                    .set_linear_velocity(body, Vec3::new(velocity.x, 0.0, velocity.z));
            }
            ctx.physics.apply_impulse(body, jump.impulse, true);
        }

        output.moving
    }

    fn fire(&mut self, ctx: &mut TickContext<'_>, player: &mut Player, firing: bool) {
        let facing = player.facing();
        let Some(projectile) = self.combat.try_fire(
            &mut player.fire,
            firing,
            ctx.now_ms,
            player.id,
            player.position,
            facing,
            player.loadout.weapon,
        ) else {
            return;
        };

        let tag = BulletTag {
            projectile: projectile.id,
            damage: projectile.damage,
            owner: player.id,
        };
        let velocity = self.combat.bullet_velocity(projectile.angle);
        let body = ctx.physics.add_bullet(tag, projectile.origin(), velocity);
        self.bullet_bodies.insert(projectile.id, body);

        ctx.events.push(
            ctx.now_ms,
            GameEvent::ProjectileFired {
                owner_id: player.id,
                projectile_id: projectile.id,
                weapon: player.loadout.weapon,
            },
        );
        ctx.effects.push_bullet(projectile);
    }

    fn resolve_intersection(
        &mut self,
        ctx: &mut TickContext<'_>,
        roster: &mut Roster,
        intersection: Intersection,
    ) {
        let (bullet_body, bullet, other) = match (
            ctx.physics.tag(intersection.body),
            ctx.physics.tag(intersection.other),
        ) {
            (Some(BodyTag::Bullet(bullet)), Some(other)) => (intersection.body, bullet, other),
            (Some(other), Some(BodyTag::Bullet(bullet))) => (intersection.other, bullet, other),
            _ => return,
        };

        let victim = match other {
            BodyTag::Player(id) if id == bullet.owner => return,
            BodyTag::Player(id) => Some(id),
            BodyTag::Map => None,
            BodyTag::Bullet(_) => return,
        };

        let position = ctx
            .physics
            .translation(bullet_body)
            .unwrap_or(Vec3::ZERO);
        ctx.physics.remove_body(bullet_body);
        self.bullet_bodies.remove(&bullet.projectile);
        ctx.effects.remove_bullet(bullet.projectile);
        ctx.effects.push_hit(
            HitEffect::new(bullet.projectile, position),
            ctx.now_ms + self.combat.config().hit_effect_ms,
        );
        ctx.events.push(
            ctx.now_ms,
            GameEvent::ProjectileHit {
                projectile_id: bullet.projectile,
                hit_player: victim,
                position: position.to_array(),
            },
        );

        let Some(target) = victim.and_then(|id| roster.get_mut(id)) else {
            return;
        };
        let target_id = target.id;

        match self
            .combat
            .on_projectile_hit(target, &bullet, ctx.physics, ctx.now_ms)
        {
            HitOutcome::Ignored => {}
            HitOutcome::Damaged { health } => {
                ctx.events.push(
                    ctx.now_ms,
                    GameEvent::DamageDealt {
                        attacker_id: bullet.owner,
                        target_id,
                        damage: bullet.damage,
                        remaining_health: health,
                    },
                );
            }
            HitOutcome::Killed { victim, killer } => {
                log::info!("player {killer} killed player {victim}");
                ctx.events.push(
                    ctx.now_ms,
                    GameEvent::DamageDealt {
                        attacker_id: killer,
                        target_id: victim,
                        damage: bullet.damage,
                        remaining_health: 0,
                    },
                );
                ctx.events
                    .push(ctx.now_ms, GameEvent::PlayerDeath { player_id: victim });
                ctx.events.push(
                    ctx.now_ms,
                    GameEvent::PlayerKill {
                        killer_id: killer,
                        victim_id: victim,
                    },
                );

                if let Some(killer) = roster.get_mut(killer) {
                    killer.credit_kill();
                }
            }
        }
    }

    fn expire_bullets(&mut self, ctx: &mut TickContext<'_>) {
        let lifetime = self.combat.config().bullet_lifetime_ms;
        for id in ctx.effects.expire(ctx.now_ms, lifetime) {
            if let Some(body) = self.bullet_bodies.remove(&id) {
                ctx.physics.remove_body(body);
            }
        }

        // Bodies whose list entry is already gone.
        let stale: Vec<ProjectileId> = self
            .bullet_bodies
            .keys()
            .filter(|id| ctx.now_ms.saturating_sub(id.fired_at_ms) >= lifetime)
            .copied()
            .collect();
        for id in stale {
            if let Some(body) = self.bullet_bodies.remove(&id) {
                ctx.physics.remove_body(body);
            }
        }
    }

    fn run_respawns(&mut self, ctx: &mut TickContext<'_>, roster: &mut Roster) {
        for id in self.combat.due_respawns(ctx.now_ms) {
            let Some(player) = roster.get_mut(id) else {
                log::debug!("respawn timer fired for departed player {id}");
                continue;
            };

            let spawn = self.spawns.choose(&mut self.rng);
            self.combat.respawn(player, ctx.physics, spawn);
            ctx.events.push(
                ctx.now_ms,
                GameEvent::PlayerRespawn {
                    player_id: id,
                    position: spawn.to_array(),
                },
            );
            log::debug!("player {id} respawned at {spawn}");
        }
    }
}

impl RoleSimulation for HostSimulation {
    fn role(&self) -> Role {
        Role::Host
    }

    fn on_join(&mut self, ctx: &mut TickContext<'_>, player: &mut Player) {
        let spawn = self.spawns.choose(&mut self.rng);
        player.position = spawn;
        player.body = Some(ctx.physics.add_player(player.id, spawn, BodyKind::Dynamic));

        if let Err(err) = publish_player(ctx.network, player) {
            log::warn!("failed to publish baseline for player {}: {err}", player.id);
        }
        log::info!("player {} ({}) joined", player.id, player.loadout.name);
    }

    fn on_leave(&mut self, ctx: &mut TickContext<'_>, player: &Player) {
        if let Some(body) = player.body {
            ctx.physics.remove_body(body);
        }
        self.intents.remove(&player.id);
        log::info!("player {} left", player.id);
    }

    fn begin(&mut self, ctx: &mut TickContext<'_>, local_intent: &Intent) {
        let mut incoming = ctx.network.take_intents();
        incoming.push((ctx.local_id, *local_intent));

        for (player, intent) in incoming {
            self.intents.entry(player).or_default().merge(intent);
        }
    }

    fn simulate(&mut self, ctx: &mut TickContext<'_>, player: &mut Player) {
        let intent = self.next_intent(player.id);

        if !player.is_alive() {
            player.firing = false;
            player.animation = AnimationState::Death;
            return;
        }

        let moving = self.move_player(ctx, player, &intent);
        self.fire(ctx, player, intent.is_firing());

        if intent.respawn {
            let spawn = self.spawns.choose(&mut self.rng);
            if self.combat.reposition(player, ctx.physics, spawn) {
                ctx.events.push(
                    ctx.now_ms,
                    GameEvent::PlayerRespawn {
                        player_id: player.id,
                        position: spawn.to_array(),
                    },
                );
            }
        }

        player.firing = intent.is_firing();
        player.animation = AnimationState::from_motion(moving, player.firing);
    }

    fn settle(&mut self, ctx: &mut TickContext<'_>, roster: &mut Roster) {
        ctx.physics.step(ctx.dt);

        for player in roster.iter_mut() {
            if let Some(position) = player.body.and_then(|body| ctx.physics.translation(body)) {
                player.position = position;
            }
        }

        for intersection in ctx.physics.drain_intersections() {
            self.resolve_intersection(ctx, roster, intersection);
        }

        self.expire_bullets(ctx);
        self.run_respawns(ctx, roster);

        for player in roster.iter_mut() {
            if let Err(err) = publish_player(ctx.network, player) {
                log::warn!("failed to publish player {}: {err}", player.id);
            }
        }
        if let Err(err) = ctx.effects.publish(ctx.network) {
            log::warn!("failed to publish effects: {err}");
        }
    }
}
