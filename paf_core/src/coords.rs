//! Coordinate mathematics for dense voxel grids.
//!
//! Voxels are stored in a flat buffer in fixed row-major order:
//! `index = w*h*z + w*y + x`. Every function here preserves that layout, and
//! [`linearize`] / [`delinearize`] are exact inverses over `[0, w*h*d)`.

use crate::types::{Dimensions, Point3, VoxelCoord};

/// Compute grid dimensions from world-space extents.
///
/// Each axis is `ceil(|extent * resolution|)`, computed independently. Non-finite
/// extents collapse to zero voxels on that axis.
///
/// # Example
/// ```
/// use paf_core::coords::dimensions_from_extents;
/// use paf_core::types::Dimensions;
///
/// let dims = dimensions_from_extents(1.5, -2.0, 0.1, 4);
/// assert_eq!(dims, Dimensions::new(6, 8, 1));
/// ```
#[inline]
pub fn dimensions_from_extents(width: f32, height: f32, depth: f32, resolution: u32) -> Dimensions {
    let res = resolution as f32;
    Dimensions::new(
        axis_count(width, res),
        axis_count(height, res),
        axis_count(depth, res),
    )
}

#[inline]
fn axis_count(extent: f32, res: f32) -> u32 {
    let count = libm::ceilf(libm::fabsf(extent * res));
    if count.is_finite() {
        // `as` saturates at u32::MAX
        count as u32
    } else {
        0
    }
}

/// Convert a voxel coordinate to its linear buffer index.
///
/// Returns `None` if any component is outside `dims` or the index overflows `usize`.
#[inline]
pub fn linearize(dims: Dimensions, coord: VoxelCoord) -> Option<usize> {
    if !dims.contains(coord) {
        return None;
    }
    let w = dims.width as usize;
    let plane = w.checked_mul(dims.height as usize)?;
    let row = w.checked_mul(coord.y as usize)?;
    plane
        .checked_mul(coord.z as usize)?
        .checked_add(row)?
        .checked_add(coord.x as usize)
}

/// Linear index without the bounds check.
///
/// The result is only meaningful for coordinates inside `dims`.
#[inline]
pub const fn linearize_unchecked(dims: Dimensions, coord: VoxelCoord) -> usize {
    let w = dims.width as usize;
    let h = dims.height as usize;
    w * h * coord.z as usize + w * coord.y as usize + coord.x as usize
}

/// Convert a linear buffer index back to its voxel coordinate.
///
/// Returns `None` if `index >= dims.volume()`.
#[inline]
pub fn delinearize(dims: Dimensions, index: usize) -> Option<VoxelCoord> {
    if dims.checked_volume().is_some_and(|volume| index >= volume) {
        return None;
    }

    let w = dims.width as usize;
    let plane = w * dims.height as usize;

    let (z, rem) = divmod(index, plane);
    let (y, x) = divmod(rem, w);

    Some(VoxelCoord::new(x as u32, y as u32, z as u32))
}

#[inline]
const fn divmod(numerator: usize, denominator: usize) -> (usize, usize) {
    (numerator / denominator, numerator % denominator)
}

/// Convert a grid-space position to world space.
///
/// Grid space measures in voxels; world space divides by `resolution`.
#[inline]
pub fn grid_to_world(p: Point3, resolution: u32) -> Point3 {
    p / resolution as f32
}

/// Stable key identifying the lattice edge between two adjacent voxels.
///
/// The key is `linear(lower corner) * 3 + axis`, so every edge of the grid maps to
/// exactly one key regardless of which march cube visits it or in what order the
/// endpoints are given. `a` and `b` must differ by one step along a single axis.
#[inline]
pub fn edge_key(dims: Dimensions, a: VoxelCoord, b: VoxelCoord) -> u64 {
    let lower = VoxelCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
    let axis = if a.x != b.x {
        0
    } else if a.y != b.y {
        1
    } else {
        2
    };

    linearize_unchecked(dims, lower) as u64 * 3 + axis
}
