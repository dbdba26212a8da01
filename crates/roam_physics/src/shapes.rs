//! Static collision shapes
//!
//! Each shape answers one question: where does a ray first touch it?

use roam_math::Vec3;

use crate::collision::Ray;

/// First intersection of a ray with a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin
    pub distance: f32,
    /// Surface point in world space
    pub point: Vec3,
}

/// Error building a shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Heightfield needs at least a 2x2 grid of samples
    GridTooSmall { columns: usize, rows: usize },
    /// Number of height samples does not match the grid
    SampleCount { expected: usize, actual: usize },
    /// Cell size, radius or height must be positive
    NonPositive(&'static str),
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeError::GridTooSmall { columns, rows } => {
                write!(f, "heightfield grid {}x{} is smaller than 2x2", columns, rows)
            }
            ShapeError::SampleCount { expected, actual } => {
                write!(f, "heightfield expects {} samples, got {}", expected, actual)
            }
            ShapeError::NonPositive(what) => write!(f, "{} must be positive", what),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Terrain as a regular grid of height samples
///
/// Samples are stored row-major: row `j` runs along +X at
/// `y = origin_y + j * cell_size`. Heights between samples are bilinear.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    origin_x: f32,
    origin_y: f32,
    cell_size: f32,
    columns: usize,
    rows: usize,
    heights: Vec<f32>,
}

impl Heightfield {
    /// Create a heightfield from its grid description
    pub fn new(
        origin: [f32; 2],
        cell_size: f32,
        columns: usize,
        rows: usize,
        heights: Vec<f32>,
    ) -> Result<Self, ShapeError> {
        if columns < 2 || rows < 2 {
            return Err(ShapeError::GridTooSmall { columns, rows });
        }
        if heights.len() != columns * rows {
            return Err(ShapeError::SampleCount {
                expected: columns * rows,
                actual: heights.len(),
            });
        }
        if cell_size <= 0.0 {
            return Err(ShapeError::NonPositive("cell size"));
        }
        Ok(Self {
            origin_x: origin[0],
            origin_y: origin[1],
            cell_size,
            columns,
            rows,
            heights,
        })
    }

    /// A flat square of the given half extent at height `z`
    pub fn flat(center: Vec3, half_extent: f32) -> Self {
        let size = (half_extent * 2.0).max(f32::EPSILON);
        Self {
            origin_x: center.x - half_extent,
            origin_y: center.y - half_extent,
            cell_size: size,
            columns: 2,
            rows: 2,
            heights: vec![center.z; 4],
        }
    }

    /// Sample at grid coordinates
    #[inline]
    fn sample(&self, column: usize, row: usize) -> f32 {
        self.heights[row * self.columns + column]
    }

    /// Interpolated terrain height at a horizontal position
    ///
    /// Returns `None` outside the grid.
    pub fn height_at(&self, x: f32, y: f32) -> Option<f32> {
        let fx = (x - self.origin_x) / self.cell_size;
        let fy = (y - self.origin_y) / self.cell_size;
        let max_x = (self.columns - 1) as f32;
        let max_y = (self.rows - 1) as f32;
        if !(0.0..=max_x).contains(&fx) || !(0.0..=max_y).contains(&fy) {
            return None;
        }

        let i = (fx.floor() as usize).min(self.columns - 2);
        let j = (fy.floor() as usize).min(self.rows - 2);
        let tx = fx - i as f32;
        let ty = fy - j as f32;

        let h00 = self.sample(i, j);
        let h10 = self.sample(i + 1, j);
        let h01 = self.sample(i, j + 1);
        let h11 = self.sample(i + 1, j + 1);

        let near = h00 + (h10 - h00) * tx;
        let far = h01 + (h11 - h01) * tx;
        Some(near + (far - near) * ty)
    }

    /// Intersect a ray with the terrain surface
    ///
    /// Only vertical downward rays are supported; any other ray reports no hit.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        if !ray.is_vertical_down() {
            return None;
        }
        let height = self.height_at(ray.origin.x, ray.origin.y)?;
        if ray.origin.z < height {
            return None;
        }
        Some(RayHit {
            distance: (ray.origin.z - height) / -ray.direction.z,
            point: ray.origin.with_z(height),
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }
}

/// An axis-aligned box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Box3 {
    /// Create a box from two opposite corners in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min_components(b),
            max: a.max_components(b),
        }
    }

    /// Create a box centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Check if a point is inside or on the box
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x
            && p.y >= self.min.y && p.y <= self.max.y
            && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Slab test; a ray starting inside hits at distance zero
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        let origin = ray.origin.to_array();
        let dir = ray.direction.to_array();
        let min = self.min.to_array();
        let max = self.max.to_array();

        let mut t_enter = 0.0_f32;
        let mut t_exit = f32::INFINITY;
        for axis in 0..3 {
            if dir[axis].abs() < 1e-8 {
                if origin[axis] < min[axis] || origin[axis] > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[axis];
            let mut t0 = (min[axis] - origin[axis]) * inv;
            let mut t1 = (max[axis] - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(RayHit {
            distance: t_enter,
            point: ray.point_at(t_enter),
        })
    }
}

/// A cylinder standing on the ground with a vertical axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    /// Center of the bottom cap
    pub base: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Cylinder {
    pub fn new(base: Vec3, radius: f32, height: f32) -> Result<Self, ShapeError> {
        if radius <= 0.0 {
            return Err(ShapeError::NonPositive("cylinder radius"));
        }
        if height <= 0.0 {
            return Err(ShapeError::NonPositive("cylinder height"));
        }
        Ok(Self { base, radius, height })
    }

    #[inline]
    fn top(&self) -> f32 {
        self.base.z + self.height
    }

    fn within_radius(&self, p: Vec3) -> bool {
        self.base.planar_distance(p) <= self.radius
    }

    fn within_height(&self, z: f32) -> bool {
        z >= self.base.z && z <= self.top()
    }

    /// Nearest intersection with the side wall or either cap
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        if self.within_radius(ray.origin) && self.within_height(ray.origin.z) {
            return Some(RayHit { distance: 0.0, point: ray.origin });
        }

        let mut best: Option<f32> = None;
        let mut consider = |t: f32| {
            if t >= 0.0 && best.map_or(true, |b| t < b) {
                best = Some(t);
            }
        };

        // Side wall
        let o = (ray.origin - self.base).planar();
        let d = ray.direction.planar();
        let a = d.length_squared();
        if a > 1e-12 {
            let b = 2.0 * o.dot(d);
            let c = o.length_squared() - self.radius * self.radius;
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let t = (-b - disc.sqrt()) / (2.0 * a);
                if self.within_height(ray.point_at(t).z) {
                    consider(t);
                }
            }
        }

        // Caps
        if ray.direction.z.abs() > 1e-12 {
            for cap_z in [self.top(), self.base.z] {
                let t = (cap_z - ray.origin.z) / ray.direction.z;
                if self.within_radius(ray.point_at(t)) {
                    consider(t);
                }
            }
        }

        best.map(|t| RayHit { distance: t, point: ray.point_at(t) })
    }
}

/// A static collision shape
#[derive(Clone, Debug, PartialEq)]
pub enum Collider {
    Heightfield(Heightfield),
    Box(Box3),
    Cylinder(Cylinder),
}

impl Collider {
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        match self {
            Collider::Heightfield(h) => h.intersect_ray(ray),
            Collider::Box(b) => b.intersect_ray(ray),
            Collider::Cylinder(c) => c.intersect_ray(ray),
        }
    }
}
