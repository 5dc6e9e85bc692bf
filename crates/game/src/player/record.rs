use glam::Vec3;

use crate::combat::{DamageOutcome, FireState, Vitals};
use crate::physics::BodyId;
use crate::replication::DirtyFields;

use super::{AnimationState, Loadout, MotionState, PlayerId};

/// Everything the session knows about one connected participant.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub loadout: Loadout,
    pub body: Option<BodyId>,
    pub position: Vec3,
    pub motion: MotionState,
    pub fire: FireState,
    pub animation: AnimationState,
    pub firing: bool,
    vitals: Vitals,
    dirty: DirtyFields,
}

impl Player {
    pub fn new(id: PlayerId, loadout: Loadout, max_health: u8) -> Self {
        Self {
            id,
            loadout,
            body: None,
            position: Vec3::ZERO,
            motion: MotionState::new(),
            fire: FireState::default(),
            animation: AnimationState::Idle,
            firing: false,
            vitals: Vitals::new(max_health),
            dirty: DirtyFields::all(),
        }
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn facing(&self) -> f32 {
        self.motion.facing
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn apply_damage(&mut self, amount: u8) -> DamageOutcome {
        let outcome = self.vitals.apply_damage(amount);
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Damaged { .. } => self.dirty |= DirtyFields::HEALTH,
            DamageOutcome::Killed => {
                self.dirty |= DirtyFields::HEALTH | DirtyFields::DEAD | DirtyFields::DEATHS;
                self.animation = AnimationState::Death;
            }
        }
        outcome
    }

    pub fn revive(&mut self, max_health: u8) {
        self.vitals.revive(max_health);
        self.animation = AnimationState::Idle;
        self.dirty |= DirtyFields::HEALTH | DirtyFields::DEAD | DirtyFields::POSITION;
    }

    pub fn credit_kill(&mut self) {
        self.vitals.credit_kill();
        self.dirty |= DirtyFields::KILLS;
    }

    pub fn mark_dirty(&mut self, fields: DirtyFields) {
        self.dirty |= fields;
    }

    pub fn mirror_vitals(&mut self, health: u8, dead: bool, kills: u32, deaths: u32) {
        self.vitals.mirror(health, dead, kills, deaths);
    }

    pub fn take_dirty(&mut self) -> DirtyFields {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_players_publish_everything_once() {
        let mut player = Player::new(1, Loadout::default(), 100);
        assert_eq!(player.take_dirty(), DirtyFields::all());
        assert_eq!(player.take_dirty(), DirtyFields::empty());
    }

    #[test]
    fn damage_marks_only_changed_fields() {
        let mut player = Player::new(1, Loadout::default(), 100);
        player.take_dirty();

        player.apply_damage(10);
        assert_eq!(player.take_dirty(), DirtyFields::HEALTH);

        player.apply_damage(200);
        let dirty = player.take_dirty();
        assert!(dirty.contains(DirtyFields::DEAD | DirtyFields::DEATHS));
        assert!(!dirty.contains(DirtyFields::KILLS));
        assert_eq!(player.animation, AnimationState::Death);

        player.apply_damage(10);
        assert!(player.take_dirty().is_empty());
    }
}
