//! Ground clamping for a walking character and its camera
//!
//! A character move is only committed when the nearest surface under the
//! character is the terrain. Anything else (a rock, a tree, or nothing at
//! all) rejects the whole move and the character goes back to where it stood
//! at the start of the frame.

use roam_math::Vec3;

use crate::probe::GroundProbeResult;

/// Surface name that counts as walkable ground
pub const TERRAIN_SURFACE: &str = "terrain";

/// Outcome of judging a character probe
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GroundDecision {
    /// Keep the proposed position, with its height snapped to `z`
    Commit { z: f32 },
    /// Discard the proposed position
    Revert,
}

/// A frame's proposed character position together with its rollback point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveCandidate {
    start: Vec3,
    proposed: Vec3,
}

impl MoveCandidate {
    /// Snapshot `start`; the proposal begins equal to it
    pub fn new(start: Vec3) -> Self {
        Self { start, proposed: start }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn proposed(&self) -> Vec3 {
        self.proposed
    }

    pub fn propose(&mut self, position: Vec3) {
        self.proposed = position;
    }

    /// Whether the proposal differs from the start point
    pub fn has_moved(&self) -> bool {
        self.start != self.proposed
    }

    /// Final position after applying `decision`
    pub fn resolve(self, decision: GroundDecision) -> Vec3 {
        match decision {
            GroundDecision::Commit { z } => self.proposed.with_z(z),
            GroundDecision::Revert => self.start,
        }
    }
}

/// Decides character and camera heights from ground probes
#[derive(Clone, Debug, PartialEq)]
pub struct GroundClamper {
    /// Surface name that counts as walkable
    pub terrain_surface: String,
    /// Camera height above the terrain under it
    pub camera_clearance: f32,
    /// Minimum camera height above the character
    pub camera_min_height: f32,
}

impl Default for GroundClamper {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundClamper {
    pub fn new() -> Self {
        Self {
            terrain_surface: TERRAIN_SURFACE.to_string(),
            camera_clearance: 1.0,
            camera_min_height: 2.0,
        }
    }

    /// Builder: set the walkable surface name
    pub fn with_terrain_surface(mut self, name: impl Into<String>) -> Self {
        self.terrain_surface = name.into();
        self
    }

    /// Builder: set camera clearance above the terrain
    pub fn with_camera_clearance(mut self, clearance: f32) -> Self {
        self.camera_clearance = clearance;
        self
    }

    /// Builder: set minimum camera height above the character
    pub fn with_camera_min_height(mut self, height: f32) -> Self {
        self.camera_min_height = height;
        self
    }

    /// Judge the character probe. Only the nearest hit counts.
    pub fn judge(&self, probe: &GroundProbeResult) -> GroundDecision {
        match probe.nearest_height_on(&self.terrain_surface) {
            Some(z) => GroundDecision::Commit { z },
            None => GroundDecision::Revert,
        }
    }

    /// Resolve a character move against its probe
    pub fn clamp_character(&self, probe: &GroundProbeResult, candidate: MoveCandidate) -> Vec3 {
        let decision = self.judge(probe);
        if decision == GroundDecision::Revert && candidate.has_moved() {
            match probe.nearest() {
                Some(hit) => log::debug!("Move blocked by '{}', reverting", hit.surface),
                None => log::debug!("No ground under character, reverting"),
            }
        }
        candidate.resolve(decision)
    }

    /// Camera height for this frame
    ///
    /// Sits `camera_clearance` above terrain when the camera probe lands on
    /// terrain, keeps `camera_z` otherwise, and never goes below
    /// `character_z + camera_min_height`.
    pub fn camera_height(&self, probe: &GroundProbeResult, camera_z: f32, character_z: f32) -> f32 {
        let z = probe
            .nearest_height_on(&self.terrain_surface)
            .map_or(camera_z, |ground| ground + self.camera_clearance);
        z.max(character_z + self.camera_min_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::SurfaceHit;

    fn probe(hits: &[(&str, f32)]) -> GroundProbeResult {
        GroundProbeResult::from_hits(
            hits.iter()
                .map(|(name, z)| SurfaceHit::new(*name, Vec3::new(0.0, 0.0, *z), 1000.0 - z))
                .collect(),
        )
    }

    fn candidate() -> MoveCandidate {
        let mut c = MoveCandidate::new(Vec3::new(1.0, 2.0, 3.0));
        c.propose(Vec3::new(1.0, -23.0, 3.0));
        c
    }

    #[test]
    fn test_terrain_commits_height() {
        let clamper = GroundClamper::new();
        let pos = clamper.clamp_character(&probe(&[("terrain", 7.25)]), candidate());
        assert_eq!(pos, Vec3::new(1.0, -23.0, 7.25));
    }

    #[test]
    fn test_obstacle_reverts_all_coordinates() {
        let clamper = GroundClamper::new();
        let pos = clamper.clamp_character(&probe(&[("terrain", 0.0), ("rock", 2.0)]), candidate());
        assert_eq!(pos, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_empty_probe_reverts() {
        let clamper = GroundClamper::new();
        let pos = clamper.clamp_character(&GroundProbeResult::new(), candidate());
        assert_eq!(pos, candidate().start());
    }

    #[test]
    fn test_custom_terrain_name() {
        let clamper = GroundClamper::new().with_terrain_surface("ground");
        assert_eq!(clamper.judge(&probe(&[("ground", 1.0)])), GroundDecision::Commit { z: 1.0 });
        assert_eq!(clamper.judge(&probe(&[("terrain", 1.0)])), GroundDecision::Revert);
    }

    #[test]
    fn test_camera_above_terrain() {
        let clamper = GroundClamper::new();
        let z = clamper.camera_height(&probe(&[("terrain", 4.0)]), 0.0, 0.0);
        assert_eq!(z, 5.0);
    }

    #[test]
    fn test_camera_floor_over_character() {
        let clamper = GroundClamper::new();
        // Terrain under the camera is low, the character stands high
        let z = clamper.camera_height(&probe(&[("terrain", 0.0)]), 0.0, 6.0);
        assert_eq!(z, 8.0);
    }

    #[test]
    fn test_camera_keeps_height_over_obstacle() {
        let clamper = GroundClamper::new();
        let z = clamper.camera_height(&probe(&[("tree", 9.0)]), 12.0, 0.0);
        assert_eq!(z, 12.0);
        let z = clamper.camera_height(&GroundProbeResult::new(), 0.5, 0.0);
        assert_eq!(z, 2.0);
    }

    #[test]
    fn test_candidate_resolve() {
        let c = candidate();
        assert!(c.has_moved());
        assert_eq!(c.resolve(GroundDecision::Revert), c.start());
        assert_eq!(c.resolve(GroundDecision::Commit { z: 0.0 }), Vec3::new(1.0, -23.0, 0.0));
        assert!(!MoveCandidate::new(Vec3::ZERO).has_moved());
    }

    #[test]
    fn test_builders() {
        let clamper = GroundClamper::new()
            .with_camera_clearance(0.5)
            .with_camera_min_height(3.0);
        assert_eq!(clamper.camera_clearance, 0.5);
        assert_eq!(clamper.camera_min_height, 3.0);
        assert_eq!(clamper.terrain_surface, TERRAIN_SURFACE);
    }
}
