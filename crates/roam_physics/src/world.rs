//! Collision world and traversal

use slotmap::{new_key_type, SlotMap};

use crate::collision::{CollisionFilter, ProbeRay};
use crate::probe::{GroundProbeResult, SurfaceHit};
use crate::shapes::Collider;

new_key_type! {
    /// Key to a static collider in the collision world
    ///
    /// Generational: a key to a removed collider never resolves to a newer
    /// collider that reused its slot.
    pub struct ColliderKey;
}

/// A named, immovable collision shape
#[derive(Clone, Debug)]
pub struct StaticCollider {
    /// Surface name reported in probe hits
    pub name: String,
    pub shape: Collider,
    pub filter: CollisionFilter,
}

impl StaticCollider {
    /// Create a collider on the static world layer
    pub fn new(name: impl Into<String>, shape: Collider) -> Self {
        Self {
            name: name.into(),
            shape,
            filter: CollisionFilter::static_world(),
        }
    }

    /// Builder: set the collision filter
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Casts a batch of probes against the scene
pub trait CollisionTraverser {
    /// Cast every probe once and return one sorted result per probe,
    /// in the same order as `probes`.
    fn traverse(&mut self, probes: &[ProbeRay]) -> Vec<GroundProbeResult>;
}

/// Container for all static colliders
#[derive(Default)]
pub struct CollisionWorld {
    colliders: SlotMap<ColliderKey, StaticCollider>,
    traversals: u64,
}

impl CollisionWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self {
            colliders: SlotMap::with_key(),
            traversals: 0,
        }
    }

    /// Add a collider and return its key
    pub fn add(&mut self, collider: StaticCollider) -> ColliderKey {
        log::debug!("Adding collider '{}'", collider.name);
        self.colliders.insert(collider)
    }

    /// Remove a collider and return it
    pub fn remove(&mut self, key: ColliderKey) -> Option<StaticCollider> {
        self.colliders.remove(key)
    }

    pub fn get(&self, key: ColliderKey) -> Option<&StaticCollider> {
        self.colliders.get(key)
    }

    /// First collider with the given name
    pub fn find(&self, name: &str) -> Option<ColliderKey> {
        self.colliders
            .iter()
            .find(|(_, c)| c.name == name)
            .map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColliderKey, &StaticCollider)> {
        self.colliders.iter()
    }

    /// Number of traversals run so far
    pub fn traversal_count(&self) -> u64 {
        self.traversals
    }

    /// Cast a single probe, returning hits nearest first
    pub fn cast(&self, probe: &ProbeRay) -> GroundProbeResult {
        let filter = probe.filter();
        let hits = self
            .colliders
            .values()
            .filter(|collider| filter.detects(&collider.filter))
            .filter_map(|collider| {
                collider
                    .shape
                    .intersect_ray(&probe.ray)
                    .map(|hit| SurfaceHit::new(collider.name.clone(), hit.point, hit.distance))
            })
            .collect();
        GroundProbeResult::from_hits(hits)
    }
}

impl CollisionTraverser for CollisionWorld {
    fn traverse(&mut self, probes: &[ProbeRay]) -> Vec<GroundProbeResult> {
        self.traversals += 1;
        probes.iter().map(|probe| self.cast(probe)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionLayer, Ray};
    use crate::probe::GroundRay;
    use crate::shapes::{Box3, Cylinder, Heightfield};
    use roam_math::Vec3;

    fn world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add(StaticCollider::new(
            "terrain",
            Collider::Heightfield(Heightfield::flat(Vec3::ZERO, 100.0)),
        ));
        world.add(StaticCollider::new(
            "rock",
            Collider::Box(Box3::from_center_half_extents(
                Vec3::new(10.0, 0.0, 1.0),
                Vec3::new(2.0, 2.0, 1.0),
            )),
        ));
        world.add(StaticCollider::new(
            "tree",
            Collider::Cylinder(Cylinder::new(Vec3::new(-10.0, 0.0, 0.0), 1.0, 8.0).unwrap()),
        ));
        world
    }

    #[test]
    fn test_open_ground_hits_terrain() {
        let world = world();
        let result = world.cast(&GroundRay::default().at(Vec3::new(0.0, 0.0, 0.0)));
        assert_eq!(result.len(), 1);
        assert_eq!(result.nearest().unwrap().surface, "terrain");
    }

    #[test]
    fn test_rock_is_nearest_above_terrain() {
        let world = world();
        let result = world.cast(&GroundRay::default().at(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(result.len(), 2);
        let nearest = result.nearest().unwrap();
        assert_eq!(nearest.surface, "rock");
        assert!((nearest.point.z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_tree_is_nearest() {
        let world = world();
        let result = world.cast(&GroundRay::default().at(Vec3::new(-10.0, 0.5, 0.0)));
        assert_eq!(result.nearest().unwrap().surface, "tree");
    }

    #[test]
    fn test_off_map_hits_nothing() {
        let world = world();
        let result = world.cast(&GroundRay::default().at(Vec3::new(500.0, 0.0, 0.0)));
        assert!(result.is_empty());
    }

    #[test]
    fn test_mask_filters_colliders() {
        let mut world = world();
        world.add(
            StaticCollider::new(
                "camera_blocker",
                Collider::Box(Box3::new(Vec3::new(-1.0, -1.0, 50.0), Vec3::new(1.0, 1.0, 51.0))),
            )
            .with_filter(CollisionFilter::new(CollisionLayer::empty(), CollisionLayer::CAMERA)),
        );

        let ground = world.cast(&GroundRay::default().at(Vec3::ZERO));
        assert_eq!(ground.nearest().unwrap().surface, "terrain");

        let camera_ray = GroundRay::default().with_mask(CollisionLayer::DEFAULT | CollisionLayer::CAMERA);
        let camera = world.cast(&camera_ray.at(Vec3::ZERO));
        assert_eq!(camera.nearest().unwrap().surface, "camera_blocker");
    }

    #[test]
    fn test_traverse_preserves_probe_order() {
        let mut world = world();
        let probes = [
            GroundRay::default().at(Vec3::new(10.0, 0.0, 0.0)),
            GroundRay::default().at(Vec3::new(0.0, 30.0, 0.0)),
        ];
        let results = world.traverse(&probes);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].nearest().unwrap().surface, "rock");
        assert_eq!(results[1].nearest().unwrap().surface, "terrain");
        assert_eq!(world.traversal_count(), 1);
    }

    #[test]
    fn test_remove_and_find() {
        let mut world = world();
        let rock = world.find("rock").unwrap();
        assert!(world.remove(rock).is_some());
        assert!(world.get(rock).is_none());
        assert!(world.find("rock").is_none());
        assert_eq!(world.len(), 2);

        let result = world.cast(&ProbeRay::new(
            Ray::downward(Vec3::new(10.0, 0.0, 100.0)),
            CollisionLayer::DEFAULT,
        ));
        assert_eq!(result.nearest().unwrap().surface, "terrain");
    }
}
