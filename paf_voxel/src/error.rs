//! Error types for paf_voxel operations.

use paf_core::{CoreError, Dimensions};
use thiserror::Error;

/// Errors that can occur while building or addressing voxel grids.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoxelError {
    /// Coordinate or index failure from the core math.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A raw cell buffer does not match the requested dimensions.
    #[error("cell buffer has {got} values but dimensions {dims:?} require {expected}")]
    CellCountMismatch {
        /// Dimensions the buffer was meant for.
        dims: Dimensions,
        /// `w * h * d`.
        expected: usize,
        /// Length of the provided buffer.
        got: usize,
    },

    /// The builder was asked to build without a size.
    #[error("grid size not specified: call extents() or dimensions() before build()")]
    MissingSize,
}

/// Result type alias for paf_voxel operations.
pub type Result<T> = core::result::Result<T, VoxelError>;
