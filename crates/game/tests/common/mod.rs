#![allow(dead_code)]

use std::collections::HashMap;

use arena::{
    BodyId, BodyKind, BodyTag, BulletTag, Intersection, Intent, Loadout, LoopbackHub,
    LoopbackPeer, Physics, PlayerId, ProjectileId, SessionConfig, SimulationLoop, SpawnSelector,
};
use glam::Vec3;

pub const DT: f32 = 1.0 / 60.0;

pub type TestLoop = SimulationLoop<FakePhysics, LoopbackPeer>;

pub struct FakeBody {
    pub tag: BodyTag,
    pub position: Vec3,
    pub velocity: Vec3,
    pub enabled: bool,
}

/// Velocity writes and impulses, in the order the simulation issued them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyOp {
    Impulse(Vec3),
    SetVelocity(Vec3),
}

/// Physics that never moves anything on its own. Tests place bodies and
/// queue intersections by hand.
#[derive(Default)]
pub struct FakePhysics {
    pub bodies: HashMap<BodyId, FakeBody>,
    pub pending: Vec<Intersection>,
    pub ops: Vec<(BodyId, BodyOp)>,
    next_id: u64,
}

impl FakePhysics {
    fn insert(&mut self, tag: BodyTag, position: Vec3, velocity: Vec3) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(
            id,
            FakeBody {
                tag,
                position,
                velocity,
                enabled: true,
            },
        );
        id
    }

    pub fn ops_on(&self, body: BodyId) -> Vec<BodyOp> {
        self.ops
            .iter()
            .filter(|(id, _)| *id == body)
            .map(|(_, op)| *op)
            .collect()
    }

    pub fn player_bodies(&self) -> usize {
        self.bodies
            .values()
            .filter(|b| matches!(b.tag, BodyTag::Player(_)))
            .count()
    }

    pub fn bullet_bodies(&self) -> usize {
        self.bodies
            .values()
            .filter(|b| matches!(b.tag, BodyTag::Bullet(_)))
            .count()
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

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3, _wake: bool) {
        if self.bodies.contains_key(&body) {
            self.ops.push((body, BodyOp::Impulse(impulse)));
        }
    }

    fn set_translation(&mut self, body: BodyId, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(&body) {
            body.position = position;
        }
    }

    fn set_linear_velocity(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(state) = self.bodies.get_mut(&body) {
            state.velocity = velocity;
            self.ops.push((body, BodyOp::SetVelocity(velocity)));
        }
    }

    fn set_angular_velocity(&mut self, _body: BodyId, _velocity: Vec3) {}

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
        std::mem::take(&mut self.pending)
    }
}

pub fn config() -> SessionConfig {
    SessionConfig {
        seed: Some(7),
        ..Default::default()
    }
}

pub fn spawn_loop(hub: &LoopbackHub, name: &str, config: SessionConfig) -> TestLoop {
    let peer = hub.connect(Loadout::named(name)).unwrap();
    SimulationLoop::new(config, FakePhysics::default(), peer, SpawnSelector::default())
}

/// Host plus one guest, both ticked once so each knows about the other.
pub fn host_and_guest() -> (LoopbackHub, TestLoop, TestLoop) {
    let hub = LoopbackHub::default();
    let mut host = spawn_loop(&hub, "host", config());
    let mut guest = spawn_loop(&hub, "guest", config());

    host.tick(DT, Intent::default());
    guest.tick(DT, Intent::default());
    (hub, host, guest)
}

/// Makes a bullet from `owner` overlap `victim` during the next host tick.
pub fn queue_hit(host: &mut TestLoop, owner: PlayerId, victim: PlayerId, damage: u8) {
    let now = host.now_ms();
    let target = host
        .player(victim)
        .and_then(|p| p.body)
        .expect("victim has a body");

    let physics = host.physics_mut();
    let bullet = physics.add_bullet(
        BulletTag {
            projectile: ProjectileId::new(owner, now),
            damage,
            owner,
        },
        Vec3::ZERO,
        Vec3::Z,
    );
    physics.pending.push(Intersection {
        body: bullet,
        other: target,
    });
}

pub fn run(sim: &mut TestLoop, ticks: usize, dt: f32) {
    for _ in 0..ticks {
        sim.tick(dt, Intent::default());
    }
}
