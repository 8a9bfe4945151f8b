//! Dense voxel grid storage.
//!
//! A [`VoxelGrid`] owns a flat buffer of `w * h * d` scalar values in row-major order
//! (`index = w*h*z + w*y + x`). Dimensions are fixed at construction; resizing always
//! produces a new grid.

use paf_core::coords::{
    delinearize, dimensions_from_extents, grid_to_world, linearize, linearize_unchecked,
};
use paf_core::{CoreError, Dimensions, Point3, Voxel, VoxelCoord, VoxelSource};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{Result, VoxelError};

/// Dense 3D grid of normalized occupancy values.
///
/// Coordinate and index access come in two flavors: the plain methods fail fast with a
/// panic on misuse, and the `try_*` methods return a [`VoxelError`] instead. Both
/// report the same message.
///
/// `Clone` is a deep copy; the clone never aliases the original's cells.
///
/// # Example
///
/// ```ignore
/// use paf_voxel::VoxelGrid;
///
/// let mut grid = VoxelGrid::new(2.0, 2.0, 2.0, 4); // 8 x 8 x 8 voxels
/// grid.randomize(42).high_pass(0.5);
/// let mesh = grid.extract_surface(0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    dims: Dimensions,
    resolution: u32,
    cells: Vec<Voxel>,
}

#[inline]
fn checked_volume(dims: Dimensions) -> Result<usize> {
    dims.checked_volume().ok_or(VoxelError::Core(CoreError::TooLarge { dims }))
}

/// Unwrap a fallible grid call, panicking with the error's message.
#[track_caller]
#[inline]
fn fail_fast<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

impl VoxelGrid {
    /// Create a zero-filled grid covering the given world-space extents.
    ///
    /// Each axis holds `ceil(|extent| * resolution)` voxels.
    ///
    /// # Panics
    /// If `resolution` is zero. Use [`VoxelGrid::try_new`] to get an error instead.
    #[track_caller]
    pub fn new(width: f32, height: f32, depth: f32, resolution: u32) -> Self {
        fail_fast(Self::try_new(width, height, depth, resolution))
    }

    /// Fallible form of [`VoxelGrid::new`].
    ///
    /// # Errors
    /// - `ZeroResolution` if `resolution` is zero
    /// - `TooLarge` if the voxel count overflows `usize`
    pub fn try_new(width: f32, height: f32, depth: f32, resolution: u32) -> Result<Self> {
        if resolution == 0 {
            return Err(CoreError::ZeroResolution.into());
        }
        let dims = dimensions_from_extents(width, height, depth, resolution);
        Self::with_dimensions(dims, resolution)
    }

    /// Create a zero-filled grid with explicit voxel counts.
    ///
    /// # Errors
    /// - `ZeroResolution` if `resolution` is zero
    /// - `TooLarge` if the voxel count overflows `usize`
    pub fn with_dimensions(dims: Dimensions, resolution: u32) -> Result<Self> {
        let volume = checked_volume(dims)?;
        Self::from_cells(dims, resolution, vec![0.0; volume])
    }

    /// Wrap an existing buffer laid out in row-major order.
    ///
    /// Values are stored as given, without clamping.
    ///
    /// # Errors
    /// - `ZeroResolution` if `resolution` is zero
    /// - `TooLarge` if the voxel count overflows `usize`
    /// - `CellCountMismatch` if `cells.len() != dims.volume()`
    pub fn from_cells(dims: Dimensions, resolution: u32, cells: Vec<Voxel>) -> Result<Self> {
        if resolution == 0 {
            return Err(CoreError::ZeroResolution.into());
        }
        let expected = checked_volume(dims)?;
        if cells.len() != expected {
            return Err(VoxelError::CellCountMismatch {
                dims,
                expected,
                got: cells.len(),
            });
        }

        debug!(
            width = dims.width,
            height = dims.height,
            depth = dims.depth,
            resolution,
            "created voxel grid"
        );

        Ok(Self {
            dims,
            resolution,
            cells,
        })
    }

    /// Voxel counts along each axis.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Voxels per world-space unit.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Total number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no voxels (some axis has zero length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Size of the grid in world units.
    pub fn world_extents(&self) -> Point3 {
        let [w, h, d] = self.dims.as_array();
        grid_to_world(Point3::new(w as f32, h as f32, d as f32), self.resolution)
    }

    /// Linear index of `(x, y, z)`.
    ///
    /// # Panics
    /// If any coordinate is outside the grid.
    #[track_caller]
    pub fn index_of(&self, x: u32, y: u32, z: u32) -> usize {
        fail_fast(self.try_index_of(x, y, z))
    }

    /// Fallible form of [`VoxelGrid::index_of`].
    pub fn try_index_of(&self, x: u32, y: u32, z: u32) -> Result<usize> {
        let coord = VoxelCoord::new(x, y, z);
        linearize(self.dims, coord).ok_or_else(|| {
            CoreError::CoordinateOutOfBounds {
                coord,
                dims: self.dims,
            }
            .into()
        })
    }

    /// Coordinate of a linear index. Inverse of [`VoxelGrid::index_of`].
    ///
    /// # Panics
    /// If `index >= self.len()`.
    #[track_caller]
    pub fn coordinate_of(&self, index: usize) -> VoxelCoord {
        fail_fast(self.try_coordinate_of(index))
    }

    /// Fallible form of [`VoxelGrid::coordinate_of`].
    pub fn try_coordinate_of(&self, index: usize) -> Result<VoxelCoord> {
        delinearize(self.dims, index).ok_or_else(|| {
            CoreError::IndexOutOfBounds {
                index,
                len: self.cells.len(),
            }
            .into()
        })
    }

    /// Value at `(x, y, z)`.
    ///
    /// # Panics
    /// If any coordinate is outside the grid.
    #[track_caller]
    pub fn get(&self, x: u32, y: u32, z: u32) -> Voxel {
        fail_fast(self.try_get(x, y, z))
    }

    /// Fallible form of [`VoxelGrid::get`].
    pub fn try_get(&self, x: u32, y: u32, z: u32) -> Result<Voxel> {
        let index = self.try_index_of(x, y, z)?;
        Ok(self.cells[index])
    }

    /// Store `value` at `(x, y, z)`. The value is not clamped.
    ///
    /// # Panics
    /// If any coordinate is outside the grid.
    #[track_caller]
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: Voxel) {
        fail_fast(self.try_set(x, y, z, value))
    }

    /// Fallible form of [`VoxelGrid::set`].
    pub fn try_set(&mut self, x: u32, y: u32, z: u32, value: Voxel) -> Result<()> {
        let index = self.try_index_of(x, y, z)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Assign `value`, clamped to `[0, 1]`, to every voxel. NaN becomes `0`.
    pub fn fill(&mut self, value: Voxel) -> &mut Self {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.cells.fill(value);
        self
    }

    /// Fill every voxel with an independent uniform draw from `[0, 1)`.
    ///
    /// The generator is ChaCha8 seeded from `seed`, owned by this call, so the same
    /// seed yields bit-identical grids on every run and platform.
    pub fn randomize(&mut self, seed: i64) -> &mut Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        for cell in &mut self.cells {
            *cell = rng.random::<f32>();
        }
        self
    }

    /// Binarize: `1` where `value > tolerance`, otherwise `0`.
    pub fn high_pass(&mut self, tolerance: Voxel) -> &mut Self {
        for cell in &mut self.cells {
            *cell = if *cell > tolerance { 1.0 } else { 0.0 };
        }
        self
    }

    /// World-space positions of every voxel with value `>= 0.5`, in ascending index order.
    pub fn vertex_points(&self) -> Vec<Point3> {
        self.iter()
            .filter(|&(_, value)| value >= 0.5)
            .map(|(coord, _)| grid_to_world(Point3::from(coord), self.resolution))
            .collect()
    }

    /// Iterate `(coordinate, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, Voxel)> + '_ {
        let dims = self.dims;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, &value)| delinearize(dims, i).map(|coord| (coord, value)))
    }

    /// A new grid with `dims` voxels and the same resolution.
    ///
    /// The overlapping region is copied; new voxels are zero.
    ///
    /// # Panics
    /// If the voxel count of `dims` overflows `usize`. Use [`VoxelGrid::try_resized`]
    /// to get an error instead.
    #[track_caller]
    pub fn resized(&self, dims: Dimensions) -> VoxelGrid {
        fail_fast(self.try_resized(dims))
    }

    /// Fallible form of [`VoxelGrid::resized`].
    ///
    /// # Errors
    /// `TooLarge` if the voxel count of `dims` overflows `usize`.
    pub fn try_resized(&self, dims: Dimensions) -> Result<VoxelGrid> {
        let mut cells = vec![0.0; checked_volume(dims)?];
        let keep_w = self.dims.width.min(dims.width);
        let keep_h = self.dims.height.min(dims.height);
        let keep_d = self.dims.depth.min(dims.depth);

        for z in 0..keep_d {
            for y in 0..keep_h {
                let src = linearize_unchecked(self.dims, VoxelCoord::new(0, y, z));
                let dst = linearize_unchecked(dims, VoxelCoord::new(0, y, z));
                let row = keep_w as usize;
                cells[dst..dst + row].copy_from_slice(&self.cells[src..src + row]);
            }
        }

        Ok(VoxelGrid {
            dims,
            resolution: self.resolution,
            cells,
        })
    }

    /// Raw cell buffer in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Voxel] {
        &self.cells
    }

    /// Mutable raw cell buffer. Its length cannot change.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Voxel] {
        &mut self.cells
    }

    /// Consume the grid, returning its cell buffer.
    pub fn into_cells(self) -> Vec<Voxel> {
        self.cells
    }
}

impl VoxelSource for VoxelGrid {
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
        linearize(self.dims, coord).map(|i| self.cells[i])
    }
}
