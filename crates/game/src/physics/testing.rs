use std::collections::HashMap;

use glam::Vec3;

use crate::player::PlayerId;

use super::{BodyId, BodyKind, BodyTag, BulletTag, Intersection, Physics};

/// Last state written to a body. Nothing integrates it.
#[derive(Debug, Clone)]
pub struct FakeBody {
    pub tag: BodyTag,
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub enabled: bool,
}

/// Physics for combat unit tests: bodies hold whatever the model last wrote.
#[derive(Default)]
pub struct FakePhysics {
    bodies: HashMap<BodyId, FakeBody>,
    next_id: u64,
}

impl FakePhysics {
    pub fn get(&self, body: BodyId) -> Option<&FakeBody> {
        self.bodies.get(&body)
    }

    fn insert(&mut self, tag: BodyTag, position: Vec3, velocity: Vec3) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(
            id,
            FakeBody {
                tag,
                position,
                velocity,
                angular_velocity: Vec3::ZERO,
                enabled: true,
            },
        );
        id
    }
}

impl Physics for FakePhysics {
    fn add_player(&mut self, player: PlayerId, position: Vec3, _kind: BodyKind) -> BodyId {
        self.insert(BodyTag::Player(player), position, Vec3::ZERO)
    }

    fn add_bullet(&mut self, bullet: BulletTag, origin: Vec3, velocity: Vec3) -> BodyId {
        self.insert(BodyTag::Bullet(bullet), origin, velocity)
    }

    fn remove_body(&mut self, body: BodyId) {
        self.bodies.remove(&body);
    }

    fn tag(&self, body: BodyId) -> Option<BodyTag> {
        self.bodies.get(&body).map(|b| b.tag)
    }

    fn apply_impulse(&mut self, _body: BodyId, _impulse: Vec3, _wake: bool) {}

    fn set_translation(&mut self, body: BodyId, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(&body) {
            body.position = position;
        }
    }

    fn set_linear_velocity(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(&body) {
            body.velocity = velocity;
        }
    }

    fn set_angular_velocity(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(&body) {
            body.angular_velocity = velocity;
        }
    }

    fn set_enabled(&mut self, body: BodyId, enabled: bool) {
        if let Some(body) = self.bodies.get_mut(&body) {
            body.enabled = enabled;
        }
    }

    fn translation(&self, body: BodyId) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.position)
    }

    fn linear_velocity(&self, body: BodyId) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.velocity)
    }

    fn step(&mut self, _dt: f32) {}

    fn drain_intersections(&mut self) -> Vec<Intersection> {
        Vec::new()
    }
}
