//! Borrowed field views.

use paf_core::coords::linearize;
use paf_core::{Dimensions, Voxel, VoxelCoord, VoxelSource};

/// A [`VoxelSource`] over a borrowed buffer, for callers that own their storage.
///
/// The buffer length is not checked against `dims`. Samples past the end of the buffer
/// read as missing, so any march cube touching them produces no triangles.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    cells: &'a [Voxel],
    dims: Dimensions,
    resolution: u32,
}

impl<'a> FieldView<'a> {
    /// Wrap `cells`, laid out row-major over `dims`.
    pub fn new(cells: &'a [Voxel], dims: Dimensions, resolution: u32) -> Self {
        Self {
            cells,
            dims,
            resolution,
        }
    }

    /// Whether the buffer holds exactly `dims.volume()` samples.
    pub fn is_complete(&self) -> bool {
        self.dims.checked_volume() == Some(self.cells.len())
    }

    /// The borrowed buffer.
    pub fn cells(&self) -> &'a [Voxel] {
        self.cells
    }
}

impl VoxelSource for FieldView<'_> {
    #[inline]
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    fn value(&self, coord: VoxelCoord) -> Option<Voxel> {
        linearize(self.dims, coord).and_then(|i| self.cells.get(i).copied())
    }
}
