use std::collections::HashMap;
use std::f32::consts::TAU;

use arena::PhysicsWorld;
use glam::Vec3;

const WALL_HEIGHT: f32 = 3.0;
const SPAWN_RING: usize = 8;

/// Flat floor, four boundary walls and some cover. Returns the world
/// together with its `spawn_{i}` markers.
pub fn build_arena(half_size: f32) -> (PhysicsWorld, HashMap<String, Vec3>) {
    let mut world = PhysicsWorld::new();
    world.add_ground(0.0, half_size);

    for (position, half_extents) in [
        (Vec3::new(0.0, WALL_HEIGHT, half_size), Vec3::new(half_size, WALL_HEIGHT, 0.5)),
        (Vec3::new(0.0, WALL_HEIGHT, -half_size), Vec3::new(half_size, WALL_HEIGHT, 0.5)),
        (Vec3::new(half_size, WALL_HEIGHT, 0.0), Vec3::new(0.5, WALL_HEIGHT, half_size)),
        (Vec3::new(-half_size, WALL_HEIGHT, 0.0), Vec3::new(0.5, WALL_HEIGHT, half_size)),
    ] {
        world.add_static_box(position, half_extents);
    }

    let cover = half_size * 0.3;
    for (x, z) in [(cover, 0.0), (-cover, 0.0), (0.0, cover), (0.0, -cover)] {
        world.add_static_box(Vec3::new(x, 1.0, z), Vec3::new(1.5, 1.0, 1.5));
    }

    let radius = half_size * 0.7;
    let markers = (0..SPAWN_RING)
        .map(|i| {
            let angle = i as f32 / SPAWN_RING as f32 * TAU;
            let position = Vec3::new(angle.sin() * radius, 1.0, angle.cos() * radius);
            (format!("spawn_{i}"), position)
        })
        .collect();

    (world, markers)
}

#[cfg(test)]
mod tests {
    use arena::SpawnSelector;

    use super::*;

    #[test]
    fn arena_exports_a_ring_of_spawns() {
        let (world, markers) = build_arena(20.0);
        let spawns = SpawnSelector::scan(&markers);

        assert!(!spawns.uses_fallback());
        assert_eq!(spawns.points().len(), SPAWN_RING);
        assert!(spawns.points().iter().all(|p| p.x.abs() < 20.0 && p.z.abs() < 20.0));
        assert_eq!(world.body_count(), 9);
    }
}
