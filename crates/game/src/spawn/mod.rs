use std::collections::HashMap;

use glam::Vec3;
use rand::Rng;

/// Highest index probed when scanning for `spawn_{i}` markers.
pub const MAX_SPAWN_SCAN: usize = 1000;

pub const FALLBACK_SPAWNS: [Vec3; 8] = [
    Vec3::new(10.0, 1.0, 10.0),
    Vec3::new(-10.0, 1.0, -10.0),
    Vec3::new(10.0, 1.0, -10.0),
    Vec3::new(-10.0, 1.0, 10.0),
    Vec3::new(0.0, 1.0, 15.0),
    Vec3::new(0.0, 1.0, -15.0),
    Vec3::new(15.0, 1.0, 0.0),
    Vec3::new(-15.0, 1.0, 0.0),
];

/// Named positions exported by a level, e.g. marker objects in a scene.
pub trait SpawnSource {
    fn find(&self, name: &str) -> Option<Vec3>;
}

impl SpawnSource for HashMap<String, Vec3> {
    fn find(&self, name: &str) -> Option<Vec3> {
        self.get(name).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpawnSelector {
    points: Vec<Vec3>,
}

impl SpawnSelector {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Collects `spawn_0`, `spawn_1`, ... until the first missing index.
    pub fn scan(source: &dyn SpawnSource) -> Self {
        let points: Vec<Vec3> = (0..MAX_SPAWN_SCAN)
            .map_while(|i| source.find(&format!("spawn_{i}")))
            .collect();

        if points.is_empty() {
            log::debug!("no spawn markers found, using fallback table");
        } else {
            log::debug!("found {} spawn markers", points.len());
        }
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn uses_fallback(&self) -> bool {
        self.points.is_empty()
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let table: &[Vec3] = if self.points.is_empty() {
            &FALLBACK_SPAWNS
        } else {
            &self.points
        };
        table[rng.gen_range(0..table.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn scan_stops_at_first_gap() {
        let mut markers = HashMap::new();
        markers.insert("spawn_0".to_string(), Vec3::X);
        markers.insert("spawn_1".to_string(), Vec3::Y);
        markers.insert("spawn_3".to_string(), Vec3::Z);

        let selector = SpawnSelector::scan(&markers);
        assert_eq!(selector.points(), &[Vec3::X, Vec3::Y]);
    }

    #[test]
    fn registered_points_are_the_only_choices() {
        let selector = SpawnSelector::new(vec![Vec3::X, Vec3::NEG_X]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let spawn = selector.choose(&mut rng);
            assert!(spawn == Vec3::X || spawn == Vec3::NEG_X);
        }
    }

    #[test]
    fn empty_level_uses_fallback_table() {
        let selector = SpawnSelector::scan(&HashMap::<String, Vec3>::new());
        assert!(selector.uses_fallback());

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let spawn = selector.choose(&mut rng);
            assert!(FALLBACK_SPAWNS.contains(&spawn));
        }
    }
}
