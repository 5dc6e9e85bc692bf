use std::collections::HashMap;
use std::sync::Mutex;

use glam::Vec3;
use rapier3d::prelude::*;

use crate::player::PlayerId;

use super::{BodyId, BodyKind, BodyTag, BulletTag, Intersection, Physics};

const PLAYER_HALF_HEIGHT: Real = 0.7;
const PLAYER_RADIUS: Real = 0.6;
const PLAYER_COLLIDER_OFFSET: Real = 1.28;
const PLAYER_DAMPING: Real = 12.0;
const BULLET_RADIUS: Real = 0.1;

#[derive(Default)]
struct IntersectionCollector {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl EventHandler for IntersectionCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let CollisionEvent::Started(a, b, _) = event {
            if let Ok(mut started) = self.started.lock() {
                started.push((a, b));
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vector,

    collector: IntersectionCollector,
    handles: HashMap<BodyId, RigidBodyHandle>,
    ids: HashMap<RigidBodyHandle, BodyId>,
    tags: HashMap<BodyId, BodyTag>,
    next_id: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    const TICK_RATE: Real = 1.0 / 60.0;

    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = Self::TICK_RATE;
        integration_parameters.min_ccd_dt = Self::TICK_RATE / 100.0;

        Self {
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vector::new(0.0, -9.81, 0.0),

            collector: IntersectionCollector::default(),
            handles: HashMap::new(),
            ids: HashMap::new(),
            tags: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn add_ground(&mut self, y: Real, half_size: Real) -> BodyId {
        self.add_static_box(Vec3::new(0.0, y - 0.1, 0.0), Vec3::new(half_size, 0.1, half_size))
    }

    pub fn add_static_box(&mut self, position: Vec3, half_extents: Vec3) -> BodyId {
        let body = RigidBodyBuilder::fixed()
            .translation(to_vector(position))
            .build();
        let handle = self.bodies.insert(body);

        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.register(handle, BodyTag::Map)
    }

    pub fn body_count(&self) -> usize {
        self.handles.len()
    }

    fn register(&mut self, handle: RigidBodyHandle, tag: BodyTag) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;

        self.handles.insert(id, handle);
        self.ids.insert(handle, id);
        self.tags.insert(id, tag);
        id
    }

    fn body_mut(&mut self, body: BodyId) -> Option<&mut RigidBody> {
        let handle = *self.handles.get(&body)?;
        self.bodies.get_mut(handle)
    }

    fn body(&self, body: BodyId) -> Option<&RigidBody> {
        let handle = *self.handles.get(&body)?;
        self.bodies.get(handle)
    }

    fn owner_of(&self, collider: ColliderHandle) -> Option<BodyId> {
        let parent = self.colliders.get(collider)?.parent()?;
        self.ids.get(&parent).copied()
    }
}

impl Physics for PhysicsWorld {
    fn add_player(&mut self, player: PlayerId, position: Vec3, kind: BodyKind) -> BodyId {
        let builder = match kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().linear_damping(PLAYER_DAMPING),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
        };
        let body = builder
            .translation(to_vector(position))
            .lock_rotations()
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::capsule_y(PLAYER_HALF_HEIGHT, PLAYER_RADIUS)
            .translation(Vector::new(0.0, PLAYER_COLLIDER_OFFSET, 0.0))
            .friction(0.0)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.register(handle, BodyTag::Player(player))
    }

    fn add_bullet(&mut self, bullet: BulletTag, origin: Vec3, velocity: Vec3) -> BodyId {
        let body = RigidBodyBuilder::kinematic_velocity_based()
            .translation(to_vector(origin))
            .linvel(to_vector(velocity))
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(BULLET_RADIUS)
            .sensor(true)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .active_collision_types(
                ActiveCollisionTypes::default()
                    | ActiveCollisionTypes::KINEMATIC_FIXED
                    | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
            )
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.register(handle, BodyTag::Bullet(bullet))
    }

    fn remove_body(&mut self, body: BodyId) {
        let Some(handle) = self.handles.remove(&body) else {
            return;
        };
        self.ids.remove(&handle);
        self.tags.remove(&body);

        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn tag(&self, body: BodyId) -> Option<BodyTag> {
        self.tags.get(&body).copied()
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3, wake: bool) {
        if let Some(body) = self.body_mut(body) {
            body.apply_impulse(to_vector(impulse), wake);
        }
    }

    fn set_translation(&mut self, body: BodyId, position: Vec3) {
        if let Some(body) = self.body_mut(body) {
            let rotation = *body.rotation();
            body.set_position(Pose::from_parts(to_vector(position), rotation), true);
        }
    }

    fn set_linear_velocity(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(body) = self.body_mut(body) {
            body.set_linvel(to_vector(velocity), true);
        }
    }

    fn set_angular_velocity(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(body) = self.body_mut(body) {
            body.set_angvel(to_vector(velocity), true);
        }
    }

    fn set_enabled(&mut self, body: BodyId, enabled: bool) {
        if let Some(body) = self.body_mut(body) {
            body.set_enabled(enabled);
        }
    }

    fn translation(&self, body: BodyId) -> Option<Vec3> {
        self.body(body).map(|b| {
            let t = b.translation();
            Vec3::new(t.x, t.y, t.z)
        })
    }

    fn linear_velocity(&self, body: BodyId) -> Option<Vec3> {
        self.body(body).map(|b| {
            let v = b.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.integration_parameters.min_ccd_dt = dt / 100.0;

        self.pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &self.collector,
        );
    }

    fn drain_intersections(&mut self) -> Vec<Intersection> {
        let started = match self.collector.started.lock() {
            Ok(mut started) => std::mem::take(&mut *started),
            Err(_) => return Vec::new(),
        };

        started
            .into_iter()
            .filter_map(|(a, b)| {
                Some(Intersection {
                    body: self.owner_of(a)?,
                    other: self.owner_of(b)?,
                })
            })
            .collect()
    }
}

fn to_vector(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ProjectileId;

    #[test]
    fn dynamic_player_falls_onto_ground() {
        let mut world = PhysicsWorld::new();
        world.add_ground(0.0, 50.0);
        let body = world.add_player(1, Vec3::new(0.0, 3.0, 0.0), BodyKind::Dynamic);

        for _ in 0..180 {
            world.step(1.0 / 60.0);
        }

        let position = world.translation(body).unwrap();
        assert!(position.y < 3.0);
        assert!(position.y > -1.0);
    }

    #[test]
    fn removed_bodies_are_ignored() {
        let mut world = PhysicsWorld::new();
        let body = world.add_player(7, Vec3::ZERO, BodyKind::Kinematic);
        assert_eq!(world.tag(body), Some(BodyTag::Player(7)));

        world.remove_body(body);
        world.set_translation(body, Vec3::ONE);
        assert_eq!(world.translation(body), None);
        assert_eq!(world.tag(body), None);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn bullet_reports_intersection_with_player() {
        let mut world = PhysicsWorld::new();
        let target = world.add_player(2, Vec3::new(0.0, 0.0, 3.0), BodyKind::Kinematic);
        let bullet = world.add_bullet(
            BulletTag {
                projectile: ProjectileId::new(1, 0),
                damage: 10,
                owner: 1,
            },
            Vec3::new(0.0, 1.3, 0.0),
            Vec3::new(0.0, 0.0, 20.0),
        );

        let mut hits = Vec::new();
        for _ in 0..30 {
            world.step(1.0 / 60.0);
            hits.extend(world.drain_intersections());
        }

        assert!(hits.iter().any(|hit| {
            (hit.body == bullet && hit.other == target) || (hit.body == target && hit.other == bullet)
        }));
    }
}
