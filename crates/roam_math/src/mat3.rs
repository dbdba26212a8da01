//! 3x3 rotation matrix utilities
//!
//! Matrices are stored row-major, and each row is one local axis expressed in
//! the parent space: row 0 = right (+X), row 1 = forward (+Y), row 2 = up (+Z).
//! A local vector `v` maps to `v.x * row0 + v.y * row1 + v.z * row2`.

use crate::{Hpr, Vec3};

/// 3x3 matrix type (rows are local axes)
pub type Mat3 = [[f32; 3]; 3];

/// Identity matrix
pub const IDENTITY: Mat3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Build the rotation for a heading/pitch/roll orientation.
///
/// Roll (about +Y) is applied first, then pitch (about +X), then heading
/// (about +Z). All angles are in degrees.
pub fn from_hpr(hpr: Hpr) -> Mat3 {
    let (sh, ch) = hpr.h.to_radians().sin_cos();
    let (sp, cp) = hpr.p.to_radians().sin_cos();
    let (sr, cr) = hpr.r.to_radians().sin_cos();

    [
        [cr * ch - sr * sp * sh, cr * sh + sr * sp * ch, -sr * cp],
        [-cp * sh, cp * ch, sp],
        [sr * ch + cr * sp * sh, sr * sh - cr * sp * ch, cr * cp],
    ]
}

/// Get one row (local axis) as a vector
#[inline]
pub fn row(m: &Mat3, index: usize) -> Vec3 {
    Vec3::from_array(m[index])
}

/// Transform a local direction into the parent space
pub fn transform(m: &Mat3, v: Vec3) -> Vec3 {
    row(m, 0) * v.x + row(m, 1) * v.y + row(m, 2) * v.z
}

/// Compose two rotations: the result applies `inner` first, then `outer`
pub fn compose(outer: &Mat3, inner: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for (i, inner_row) in inner.iter().enumerate() {
        result[i] = transform(outer, Vec3::from_array(*inner_row)).to_array();
    }
    result
}

/// Transpose (the inverse of a pure rotation)
pub fn transpose(m: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for (i, row) in m.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            result[j][i] = *value;
        }
    }
    result
}
