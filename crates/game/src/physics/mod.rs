mod world;

#[cfg(test)]
pub(crate) mod testing;

use glam::Vec3;

use crate::combat::ProjectileId;
use crate::player::PlayerId;

pub use world::PhysicsWorld;

/// Opaque handle to a body owned by a [`Physics`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Driven by impulses and gravity. Used for players on the host.
    Dynamic,
    /// Positioned explicitly. Used for mirrored players on guests.
    Kinematic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletTag {
    pub projectile: ProjectileId,
    pub damage: u8,
    pub owner: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTag {
    Player(PlayerId),
    Bullet(BulletTag),
    Map,
}

/// Two bodies whose colliders started overlapping during the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub body: BodyId,
    pub other: BodyId,
}

/// The physics engine as seen by the simulation. Every per-body operation is
/// a no-op (or `None`) when the body no longer exists.
pub trait Physics {
    fn add_player(&mut self, player: PlayerId, position: Vec3, kind: BodyKind) -> BodyId;
    fn add_bullet(&mut self, bullet: BulletTag, origin: Vec3, velocity: Vec3) -> BodyId;
    fn remove_body(&mut self, body: BodyId);
    fn tag(&self, body: BodyId) -> Option<BodyTag>;

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3, wake: bool);
    fn set_translation(&mut self, body: BodyId, position: Vec3);
    fn set_linear_velocity(&mut self, body: BodyId, velocity: Vec3);
    fn set_angular_velocity(&mut self, body: BodyId, velocity: Vec3);
    /// Disabled bodies keep their pose but take no part in collisions or integration.
    fn set_enabled(&mut self, body: BodyId, enabled: bool);

    fn translation(&self, body: BodyId) -> Option<Vec3>;
    fn linear_velocity(&self, body: BodyId) -> Option<Vec3>;

    fn step(&mut self, dt: f32);
    fn drain_intersections(&mut self) -> Vec<Intersection>;
}
