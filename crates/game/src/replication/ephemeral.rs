use crate::combat::{HitEffect, Projectile, ProjectileId};
use crate::net::{Network, NetworkError};

use super::{Channel, ReplicatedValue};

/// Session-wide `bullets` and `hits` lists. The host edits and republishes
/// them wholesale; guests replace their copy with whatever arrived last.
#[derive(Debug, Default)]
pub struct EffectLists {
    bullets: Vec<Projectile>,
    hits: Vec<HitEffect>,
    hit_expiry: Vec<u64>,
    bullets_dirty: bool,
    hits_dirty: bool,
}

impl EffectLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bullets(&self) -> &[Projectile] {
        &self.bullets
    }

    pub fn hits(&self) -> &[HitEffect] {
        &self.hits
    }

    pub fn push_bullet(&mut self, projectile: Projectile) {
        self.bullets.push(projectile);
        self.bullets_dirty = true;
    }

    pub fn remove_bullet(&mut self, id: ProjectileId) -> Option<Projectile> {
        let index = self.bullets.iter().position(|bullet| bullet.id == id)?;
        self.bullets_dirty = true;
        Some(self.bullets.remove(index))
    }

    pub fn push_hit(&mut self, hit: HitEffect, expires_at_ms: u64) {
        self.hits.push(hit);
        self.hit_expiry.push(expires_at_ms);
        self.hits_dirty = true;
    }

    /// Drops bullets older than `bullet_lifetime_ms` and hits past their
    /// display time. Returns the ids of the expired bullets.
    pub fn expire(&mut self, now_ms: u64, bullet_lifetime_ms: u64) -> Vec<ProjectileId> {
        let mut expired = Vec::new();
        self.bullets.retain(|bullet| {
            let alive = now_ms.saturating_sub(bullet.fired_at_ms()) < bullet_lifetime_ms;
            if !alive {
                expired.push(bullet.id);
            }
            alive
        });
        if !expired.is_empty() {
            self.bullets_dirty = true;
        }

        let before = self.hits.len();
        let mut index = 0;
        while index < self.hits.len() {
            if self.hit_expiry[index] <= now_ms {
                self.hits.remove(index);
                self.hit_expiry.remove(index);
            } else {
                index += 1;
            }
        }
        if self.hits.len() != before {
            self.hits_dirty = true;
        }

        expired
    }

    pub fn publish(&mut self, network: &mut dyn Network) -> Result<(), NetworkError> {
        if self.bullets_dirty {
            network.set_shared_state(
                Channel::Bullets,
                ReplicatedValue::Bullets(self.bullets.clone()),
            )?;
            self.bullets_dirty = false;
        }
        if self.hits_dirty {
            network.set_shared_state(Channel::Hits, ReplicatedValue::Hits(self.hits.clone()))?;
            self.hits_dirty = false;
        }
        Ok(())
    }

    pub fn consume(&mut self, network: &dyn Network) {
        if let Some(ReplicatedValue::Bullets(bullets)) = network.shared_state(Channel::Bullets) {
            self.bullets.clone_from(bullets);
        }
        if let Some(ReplicatedValue::Hits(hits)) = network.shared_state(Channel::Hits) {
            self.hits.clone_from(hits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet(owner: u32, fired_at_ms: u64) -> Projectile {
        Projectile {
            id: ProjectileId::new(owner, fired_at_ms),
            origin: [0.0; 3],
            angle: 0.0,
            owner,
            damage: 10,
        }
    }

    #[test]
    fn bullets_expire_after_lifetime() {
        let mut lists = EffectLists::new();
        lists.push_bullet(bullet(1, 0));
        lists.push_bullet(bullet(2, 600));

        assert!(lists.expire(999, 1000).is_empty());
        assert_eq!(lists.expire(1000, 1000), vec![ProjectileId::new(1, 0)]);
        assert_eq!(lists.bullets().len(), 1);
    }

    #[test]
    fn hits_expire_at_deadline() {
        let mut lists = EffectLists::new();
        lists.push_hit(HitEffect::new(ProjectileId::new(1, 0), glam::Vec3::ZERO), 500);
        lists.push_hit(HitEffect::new(ProjectileId::new(1, 400), glam::Vec3::ONE), 900);

        lists.expire(500, 1000);
        assert_eq!(lists.hits().len(), 1);
        assert_eq!(lists.hits()[0].id, ProjectileId::new(1, 400));
    }

    #[test]
    fn removing_unknown_bullet_is_a_no_op() {
        let mut lists = EffectLists::new();
        lists.push_bullet(bullet(1, 0));
        assert!(lists.remove_bullet(ProjectileId::new(3, 3)).is_none());
        assert!(lists.remove_bullet(ProjectileId::new(1, 0)).is_some());
        assert!(lists.bullets().is_empty());
    }
}
