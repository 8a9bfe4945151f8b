//! Traits for storage abstraction in paf_core.
//!
//! These traits let downstream crates (paf_voxel, and any procedural-graph stage that
//! owns its own buffers) share the polygonization algorithm without sharing storage.

use crate::coords::linearize;
use crate::types::{Dimensions, Voxel, VoxelCoord};

/// Read access to a dense scalar field sampled on a regular grid.
///
/// Implementors provide the voxel counts per axis, the resolution (voxels per world
/// unit) and the value at each voxel center.
pub trait VoxelSource {
    /// The voxel counts along each axis.
    fn dimensions(&self) -> Dimensions;

    /// Voxels per world-space unit.
    ///
    /// A source reporting `0` has no defined world mapping; extraction yields nothing.
    fn resolution(&self) -> u32;

    /// Get the value of the voxel at `coord`.
    ///
    /// # Returns
    /// * `Some(value)` - The stored sample
    /// * `None` - If the coordinate is outside the grid or the sample is missing
    fn value(&self, coord: VoxelCoord) -> Option<Voxel>;

    /// The linear buffer index of `coord`, if it is inside the grid.
    #[inline]
    fn index_of(&self, coord: VoxelCoord) -> Option<usize> {
        linearize(self.dimensions(), coord)
    }
}

impl<T: VoxelSource + ?Sized> VoxelSource for &T {
    #[inline]
    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }

    #[inline]
    fn resolution(&self) -> u32 {
        (**self).resolution()
    }

    #[inline]
    fn value(&self, coord: VoxelCoord) -> Option<Voxel> {
        (**self).value(coord)
    }
}

/// Convert a corner index (0-7) to a corner offset tuple (i, j, k).
///
/// The corner ordering follows the standard marching cubes convention:
/// ```text
/// Corner:  0      1      2      3      4      5      6      7
/// Offset: (0,0,0)(1,0,0)(1,1,0)(0,1,0)(0,0,1)(1,0,1)(1,1,1)(0,1,1)
/// ```
///
/// - Corners 0-3: z=0 plane, counter-clockwise from the origin
/// - Corners 4-7: z=1 plane, same order
#[inline]
pub const fn corner_from_index(idx: usize) -> (u32, u32, u32) {
    const CORNERS: [(u32, u32, u32); 8] = [
        (0, 0, 0), // 0
        (1, 0, 0), // 1
        (1, 1, 0), // 2
        (0, 1, 0), // 3
        (0, 0, 1), // 4
        (1, 0, 1), // 5
        (1, 1, 1), // 6
        (0, 1, 1), // 7
    ];
    CORNERS[idx & 7]
}

/// Convert a corner offset tuple (i, j, k) to a corner index (0-7).
///
/// This is the inverse of `corner_from_index`.
#[inline]
pub const fn index_from_corner(corner: (u32, u32, u32)) -> usize {
    match (corner.0 & 1, corner.1 & 1, corner.2 & 1) {
        (0, 0, 0) => 0,
        (1, 0, 0) => 1,
        (1, 1, 0) => 2,
        (0, 1, 0) => 3,
        (0, 0, 1) => 4,
        (1, 0, 1) => 5,
        (1, 1, 1) => 6,
        _ => 7,
    }
}
