//! Scene description
//!
//! Describes the walkable world in a RON file: a terrain heightfield, named
//! obstacles standing on it, and where the character starts.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use roam_math::Vec3;
use roam_physics::{
    Box3, Collider, CollisionWorld, Cylinder, Heightfield, ShapeError, StaticCollider,
    TERRAIN_SURFACE,
};

/// Terrain heightfield layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainTemplate {
    /// World position of sample (0, 0) [x, y]
    pub origin: [f32; 2],
    /// Spacing between samples
    pub cell_size: f32,
    /// Samples per row (along +X)
    pub columns: usize,
    /// Number of rows (along +Y)
    pub rows: usize,
    /// Row-major height samples
    pub heights: Vec<f32>,
}

impl TerrainTemplate {
    /// A flat square terrain at height zero
    pub fn flat(half_extent: f32) -> Self {
        Self {
            origin: [-half_extent, -half_extent],
            cell_size: half_extent * 2.0,
            columns: 2,
            rows: 2,
            heights: vec![0.0; 4],
        }
    }

    pub fn to_heightfield(&self) -> Result<Heightfield, ShapeError> {
        Heightfield::new(self.origin, self.cell_size, self.columns, self.rows, self.heights.clone())
    }
}

/// Shape of an obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    Box {
        center: [f32; 3],
        half_extents: [f32; 3],
    },
    Cylinder {
        /// Center of the bottom cap
        base: [f32; 3],
        radius: f32,
        height: f32,
    },
}

impl ObstacleShape {
    pub fn to_collider(&self) -> Result<Collider, ShapeError> {
        match self {
            ObstacleShape::Box { center, half_extents } => Ok(Collider::Box(
                Box3::from_center_half_extents(Vec3::from_array(*center), Vec3::from_array(*half_extents)),
            )),
            ObstacleShape::Cylinder { base, radius, height } => Ok(Collider::Cylinder(
                Cylinder::new(Vec3::from_array(*base), *radius, *height)?,
            )),
        }
    }
}

/// A named obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    /// Surface name reported by ground probes
    pub name: String,
    pub shape: ObstacleShape,
}

/// A serializable world layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name (for display/debugging)
    pub name: String,
    pub terrain: TerrainTemplate,
    #[serde(default)]
    pub obstacles: Vec<ObstacleTemplate>,
    /// Character start position [x, y, z]
    pub start_point: [f32; 3],
}

impl SceneDescription {
    /// Create a scene with flat terrain and no obstacles
    pub fn new(name: impl Into<String>, terrain: TerrainTemplate) -> Self {
        Self {
            name: name.into(),
            terrain,
            obstacles: Vec::new(),
            start_point: [0.0, 0.0, 0.0],
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a scene from RON text
    pub fn from_ron(contents: &str) -> Result<Self, SceneLoadError> {
        let scene: Self = ron::from_str(contents)?;
        scene.terrain.to_heightfield()?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Serialize to pretty RON text
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty)
    }

    /// Builder: add an obstacle
    pub fn with_obstacle(mut self, name: impl Into<String>, shape: ObstacleShape) -> Self {
        self.obstacles.push(ObstacleTemplate { name: name.into(), shape });
        self
    }

    /// Builder: set the start point
    pub fn with_start_point(mut self, x: f32, y: f32, z: f32) -> Self {
        self.start_point = [x, y, z];
        self
    }

    pub fn start_point(&self) -> Vec3 {
        Vec3::from_array(self.start_point)
    }

    /// Build the collision world: the terrain is named `terrain`, obstacles
    /// keep their own names.
    pub fn build_collision_world(&self) -> Result<CollisionWorld, ShapeError> {
        let mut world = CollisionWorld::new();
        world.add(StaticCollider::new(
            TERRAIN_SURFACE,
            Collider::Heightfield(self.terrain.to_heightfield()?),
        ));
        for obstacle in &self.obstacles {
            world.add(StaticCollider::new(obstacle.name.clone(), obstacle.shape.to_collider()?));
        }
        log::info!(
            "Built collision world for '{}' with {} colliders",
            self.name,
            world.len()
        );
        Ok(world)
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// The description parsed but does not form valid geometry
    Shape(ShapeError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl From<ShapeError> for SceneLoadError {
    fn from(e: ShapeError) -> Self {
        SceneLoadError::Shape(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneLoadError::Shape(e) => write!(f, "Invalid geometry: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
