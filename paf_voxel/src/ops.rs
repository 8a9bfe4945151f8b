//! Grid-to-grid operators.
//!
//! Every mutator on [`VoxelGrid`] is also available as a [`GridOp`] value, so a
//! procedural graph can compose them into a [`Pipeline`] that ends in surface
//! extraction.

use core::fmt;

use paf_core::VoxelCoord;
use tracing::trace;

use crate::grid::VoxelGrid;

/// A transform applied to a grid in place.
pub trait GridOp {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Mutate `grid`.
    fn apply(&self, grid: &mut VoxelGrid);
}

/// Assign a clamped constant to every voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill(pub f32);

impl GridOp for Fill {
    fn name(&self) -> &str {
        "fill"
    }

    fn apply(&self, grid: &mut VoxelGrid) {
        grid.fill(self.0);
    }
}

/// Seeded uniform noise in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Randomize(pub i64);

impl GridOp for Randomize {
    fn name(&self) -> &str {
        "randomize"
    }

    fn apply(&self, grid: &mut VoxelGrid) {
        grid.randomize(self.0);
    }
}

/// Binarize against a tolerance (strictly greater becomes `1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighPass(pub f32);

impl GridOp for HighPass {
    fn name(&self) -> &str {
        "high_pass"
    }

    fn apply(&self, grid: &mut VoxelGrid) {
        grid.high_pass(self.0);
    }
}

/// Write one voxel.
///
/// Coordinates outside the grid are a programming error and panic, like
/// [`VoxelGrid::set`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetVoxel {
    /// Target voxel.
    pub coord: VoxelCoord,
    /// Value to store, unclamped.
    pub value: f32,
}

impl GridOp for SetVoxel {
    fn name(&self) -> &str {
        "set_voxel"
    }

    fn apply(&self, grid: &mut VoxelGrid) {
        grid.set(self.coord.x, self.coord.y, self.coord.z, self.value);
    }
}

/// An ordered list of operators.
#[derive(Default)]
pub struct Pipeline {
    ops: Vec<Box<dyn GridOp + Send + Sync>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `op`.
    pub fn then<O: GridOp + Send + Sync + 'static>(mut self, op: O) -> Self {
        self.ops.push(Box::new(op));
        self
    }

    /// Number of operators.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the pipeline has no operators.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every operator to `grid` in order.
    pub fn run(&self, grid: &mut VoxelGrid) {
        for (step, op) in self.ops.iter().enumerate() {
            trace!(step, op = op.name(), "applying grid op");
            op.apply(grid);
        }
    }

    /// Run on a deep copy of `grid`, leaving the input untouched.
    pub fn run_on_copy(&self, grid: &VoxelGrid) -> VoxelGrid {
        let mut copy = grid.clone();
        self.run(&mut copy);
        copy
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.ops.iter().map(|op| op.name()))
            .finish()
    }
}
