use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::{Quat, Vec3};

use crate::physics::{BulletTag, Physics};
use crate::player::{Player, PlayerId, Weapon, heading_direction};
use crate::replication::DirtyFields;

use super::{CombatConfig, DamageOutcome, Projectile, ProjectileId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireState {
    last_fire_ms: Option<u64>,
}

impl FireState {
    pub fn last_fire_ms(&self) -> Option<u64> {
        self.last_fire_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Ignored,
    Damaged { health: u8 },
    Killed { victim: PlayerId, killer: PlayerId },
}

#[derive(Debug)]
struct PendingRespawn {
    due_ms: u64,
    player: PlayerId,
}

impl PartialEq for PendingRespawn {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.player == other.player
    }
}

impl Eq for PendingRespawn {}

impl PartialOrd for PendingRespawn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingRespawn {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.player.cmp(&self.player))
    }
}

/// Host-side combat rules: fire gating, hit resolution and the respawn timer.
pub struct CombatModel {
    config: CombatConfig,
    respawns: BinaryHeap<PendingRespawn>,
}

impl Default for CombatModel {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CombatModel {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            respawns: BinaryHeap::new(),
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn muzzle_position(&self, position: Vec3, facing: f32) -> Vec3 {
        position + Quat::from_rotation_y(facing) * self.config.weapon_offset
    }

    pub fn bullet_velocity(&self, angle: f32) -> Vec3 {
        heading_direction(angle) * self.config.bullet_speed
    }

    /// Returns a projectile when `firing` is set and the cooldown has elapsed.
    /// The first shot a player ever fires is never gated.
    #[allow(clippy::too_many_arguments)]
    pub fn try_fire(
        &self,
        fire: &mut FireState,
        firing: bool,
        now_ms: u64,
        owner: PlayerId,
        position: Vec3,
        facing: f32,
        weapon: Weapon,
    ) -> Option<Projectile> {
        if !firing {
            return None;
        }

        if let Some(last) = fire.last_fire_ms {
            if now_ms.saturating_sub(last) <= self.config.fire_rate_ms {
                return None;
            }
        }
        fire.last_fire_ms = Some(now_ms);

        Some(Projectile {
            id: ProjectileId::new(owner, now_ms),
            origin: self.muzzle_position(position, facing).to_array(),
            angle: facing,
            owner,
            damage: weapon.damage(),
        })
    }

    pub fn on_projectile_hit(
        &mut self,
        victim: &mut Player,
        bullet: &BulletTag,
        physics: &mut dyn Physics,
        now_ms: u64,
    ) -> HitOutcome {
        if bullet.owner == victim.id {
            return HitOutcome::Ignored;
        }

        match victim.apply_damage(bullet.damage) {
            DamageOutcome::Ignored => HitOutcome::Ignored,
            DamageOutcome::Damaged { health } => HitOutcome::Damaged { health },
            DamageOutcome::Killed => {
                if let Some(body) = victim.body {
                    physics.set_linear_velocity(body, Vec3::ZERO);
                    physics.set_angular_velocity(body, Vec3::ZERO);
                    physics.set_enabled(body, false);
                }

                let due_ms = now_ms + self.config.respawn_delay_ms;
                self.respawns.push(PendingRespawn {
                    due_ms,
                    player: victim.id,
                });
                log::debug!("player {} respawns at {due_ms}ms", victim.id);

                HitOutcome::Killed {
                    victim: victim.id,
                    killer: bullet.owner,
                }
            }
        }
    }

    /// Pops every respawn whose timer has elapsed. The players may have left
    /// since the timer was scheduled.
    pub fn due_respawns(&mut self, now_ms: u64) -> Vec<PlayerId> {
        let mut due = Vec::new();
        while let Some(next) = self.respawns.peek() {
            if next.due_ms > now_ms {
                break;
            }
            if let Some(next) = self.respawns.pop() {
                due.push(next.player);
            }
        }
        due
    }

    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    pub fn respawn(&self, player: &mut Player, physics: &mut dyn Physics, spawn: Vec3) {
        if let Some(body) = player.body {
            physics.set_translation(body, spawn);
            physics.set_linear_velocity(body, Vec3::ZERO);
            physics.set_angular_velocity(body, Vec3::ZERO);
            physics.set_enabled(body, true);
        }

        player.position = spawn;
        player.motion.reset_jumps();
        player.revive(self.config.max_health);
    }

    /// Moves a living player to `spawn` without touching health.
    pub fn reposition(&self, player: &mut Player, physics: &mut dyn Physics, spawn: Vec3) -> bool {
        if !player.vitals().is_alive() {
            return false;
        }

        if let Some(body) = player.body {
            physics.set_translation(body, spawn);
            physics.set_linear_velocity(body, Vec3::ZERO);
        }
        player.position = spawn;
        player.motion.reset_jumps();
        player.mark_dirty(DirtyFields::POSITION);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::testing::FakePhysics;
    use crate::physics::{BodyKind, BodyTag};
    use crate::player::Loadout;

    fn bullet(owner: PlayerId, damage: u8) -> BulletTag {
        BulletTag {
            projectile: ProjectileId::new(owner, 0),
            damage,
            owner,
        }
    }

    fn spawned(physics: &mut FakePhysics, id: PlayerId) -> Player {
        let mut player = Player::new(id, Loadout::default(), 100);
        player.body = Some(physics.add_player(id, Vec3::ZERO, BodyKind::Dynamic));
        player
    }

    #[test]
    fn fire_rate_is_gated() {
        let combat = CombatModel::default();
        let mut fire = FireState::default();
        let shoot = |fire: &mut FireState, now| {
            combat.try_fire(fire, true, now, 1, Vec3::ZERO, 0.0, Weapon::Ak)
        };

        assert!(shoot(&mut fire, 0).is_some());
        assert!(shoot(&mut fire, 200).is_none());
        assert!(shoot(&mut fire, 380).is_none());
        assert!(shoot(&mut fire, 381).is_some());
        assert_eq!(fire.last_fire_ms(), Some(381));

        assert!(combat
            .try_fire(&mut fire, false, 5000, 1, Vec3::ZERO, 0.0, Weapon::Ak)
            .is_none());
        assert_eq!(fire.last_fire_ms(), Some(381));
    }

    #[test]
    fn projectile_starts_at_rotated_muzzle() {
        let combat = CombatModel::default();
        let mut fire = FireState::default();
        let projectile = combat
            .try_fire(
                &mut fire,
                true,
                120,
                4,
                Vec3::new(1.0, 0.0, 1.0),
                std::f32::consts::PI,
                Weapon::Sniper,
            )
            .unwrap();

        let origin = projectile.origin();
        assert!((origin - Vec3::new(1.2, 1.4, 0.2)).length() < 1e-4);
        assert_eq!(projectile.id.to_string(), "4-120");
        assert_eq!(projectile.damage, Weapon::Sniper.damage());
    }

    #[test]
    fn lethal_hit_disables_body_and_schedules_respawn() {
        let mut physics = FakePhysics::default();
        let mut combat = CombatModel::default();
        let mut victim = spawned(&mut physics, 2);
        let body = victim.body.unwrap();
        physics.set_linear_velocity(body, Vec3::new(3.0, 0.0, 0.0));
        physics.set_angular_velocity(body, Vec3::Y);

        assert_eq!(
            combat.on_projectile_hit(&mut victim, &bullet(1, 60), &mut physics, 100),
            HitOutcome::Damaged { health: 40 }
        );
        assert_eq!(
            combat.on_projectile_hit(&mut victim, &bullet(1, 60), &mut physics, 200),
            HitOutcome::Killed { victim: 2, killer: 1 }
        );

        let fake = physics.get(body).unwrap();
        assert!(!fake.enabled);
        assert_eq!(fake.velocity, Vec3::ZERO);
        assert_eq!(fake.angular_velocity, Vec3::ZERO);
        assert_eq!(combat.pending_respawns(), 1);

        assert_eq!(
            combat.on_projectile_hit(&mut victim, &bullet(1, 60), &mut physics, 300),
            HitOutcome::Ignored
        );
        assert_eq!(combat.pending_respawns(), 1);

        assert!(combat.due_respawns(2199).is_empty());
        assert_eq!(combat.due_respawns(2200), vec![2]);

        combat.respawn(&mut victim, &mut physics, Vec3::new(10.0, 1.0, 10.0));
        let fake = physics.get(body).unwrap();
        assert!(fake.enabled);
        assert_eq!(fake.position, Vec3::new(10.0, 1.0, 10.0));
        assert_eq!(victim.vitals().health(), 100);
        assert!(!victim.vitals().is_dead());
    }

    #[test]
    fn self_hits_do_nothing() {
        let mut physics = FakePhysics::default();
        let mut combat = CombatModel::default();
        let mut player = spawned(&mut physics, 5);

        assert_eq!(
            combat.on_projectile_hit(&mut player, &bullet(5, 90), &mut physics, 0),
            HitOutcome::Ignored
        );
        assert_eq!(player.vitals().health(), 100);
    }

    #[test]
    fn respawns_pop_in_due_order() {
        let mut physics = FakePhysics::default();
        let mut combat = CombatModel::default();
        let mut late = spawned(&mut physics, 1);
        let mut early = spawned(&mut physics, 2);

        combat.on_projectile_hit(&mut late, &bullet(9, 100), &mut physics, 500);
        combat.on_projectile_hit(&mut early, &bullet(9, 100), &mut physics, 100);

        assert_eq!(combat.due_respawns(10_000), vec![2, 1]);
        assert!(matches!(physics.tag(late.body.unwrap()), Some(BodyTag::Player(1))));
    }

    #[test]
    fn dead_players_cannot_reposition() {
        let mut physics = FakePhysics::default();
        let mut combat = CombatModel::default();
        let mut player = spawned(&mut physics, 3);

        assert!(combat.reposition(&mut player, &mut physics, Vec3::X));
        assert_eq!(player.position, Vec3::X);

        combat.on_projectile_hit(&mut player, &bullet(1, 100), &mut physics, 0);
        assert!(!combat.reposition(&mut player, &mut physics, Vec3::Z));
        assert_eq!(player.position, Vec3::X);
    }
}
