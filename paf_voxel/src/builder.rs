//! VoxelGridBuilder pattern for constructing VoxelGrid.
//!
//! Provides a fluent API for building grids with validation.

use paf_core::{CoreError, Dimensions};

use crate::error::{Result, VoxelError};
use crate::grid::VoxelGrid;
use crate::ops::{Fill, GridOp, HighPass, Pipeline, Randomize};

/// The requested size, in world units or voxels.
#[derive(Debug, Clone, Copy)]
enum Size {
    Extents(f32, f32, f32),
    Dimensions(Dimensions),
}

/// Builder for constructing [`VoxelGrid`] instances.
///
/// Mutators added with [`fill`](Self::fill), [`randomize`](Self::randomize) and
/// [`high_pass`](Self::high_pass) run in the order they were added, after allocation.
///
/// # Example
///
/// ```ignore
/// use paf_voxel::VoxelGridBuilder;
///
/// let grid = VoxelGridBuilder::new(8)
///     .extents(2.0, 1.0, 1.0)   // 16 x 8 x 8 voxels
///     .randomize(42)
///     .high_pass(0.6)
///     .build()?;
/// ```
pub struct VoxelGridBuilder {
    resolution: u32,
    size: Option<Size>,
    steps: Pipeline,
}

impl VoxelGridBuilder {
    /// Create a builder for grids with `resolution` voxels per world unit.
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            size: None,
            steps: Pipeline::new(),
        }
    }

    /// Size the grid from world-space extents.
    ///
    /// Each axis gets `ceil(|extent| * resolution)` voxels. Replaces any earlier size.
    pub fn extents(mut self, width: f32, height: f32, depth: f32) -> Self {
        self.size = Some(Size::Extents(width, height, depth));
        self
    }

    /// Size the grid with explicit voxel counts. Replaces any earlier size.
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.size = Some(Size::Dimensions(dims));
        self
    }

    /// Fill every voxel with `value`, clamped to `[0, 1]`.
    pub fn fill(self, value: f32) -> Self {
        self.step(Fill(value))
    }

    /// Fill with seeded uniform noise.
    pub fn randomize(self, seed: i64) -> Self {
        self.step(Randomize(seed))
    }

    /// Binarize against `tolerance`.
    pub fn high_pass(self, tolerance: f32) -> Self {
        self.step(HighPass(tolerance))
    }

    /// Append an arbitrary operator.
    pub fn step<O: GridOp + Send + Sync + 'static>(mut self, op: O) -> Self {
        self.steps = self.steps.then(op);
        self
    }

    /// Build the final grid.
    ///
    /// # Errors
    /// - `ZeroResolution` if the resolution is 0
    /// - `MissingSize` if neither `extents` nor `dimensions` was called
    pub fn build(self) -> Result<VoxelGrid> {
        if self.resolution == 0 {
            return Err(CoreError::ZeroResolution.into());
        }

        let mut grid = match self.size.ok_or(VoxelError::MissingSize)? {
            Size::Extents(w, h, d) => VoxelGrid::try_new(w, h, d, self.resolution)?,
            Size::Dimensions(dims) => VoxelGrid::with_dimensions(dims, self.resolution)?,
        };

        self.steps.run(&mut grid);
        Ok(grid)
    }
}
