//! Error types for paf_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.

use core::fmt;

use crate::types::{Dimensions, VoxelCoord};

/// Error types that can occur during paf_core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// A voxel coordinate lies outside the grid dimensions.
    CoordinateOutOfBounds {
        /// The offending coordinate.
        coord: VoxelCoord,
        /// The grid dimensions it was checked against.
        dims: Dimensions,
    },
    /// A linear index is not smaller than the number of voxels.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The number of voxels in the grid.
        len: usize,
    },
    /// A grid was requested with zero voxels per world unit.
    ZeroResolution,
    /// `w * h * d` does not fit in `usize`.
    TooLarge {
        /// The requested dimensions.
        dims: Dimensions,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::CoordinateOutOfBounds { coord, dims } => write!(
                f,
                "x, y, z coordinate of {}, {}, {} exceeds voxel dimensions of {}, {}, {}",
                coord.x, coord.y, coord.z, dims.width, dims.height, dims.depth
            ),
            CoreError::IndexOutOfBounds { index, len } => {
                write!(
                    f,
                    "index {} exceeds the size of the voxel grid ({} voxels)",
                    index, len
                )
            }
            CoreError::ZeroResolution => write!(f, "resolution must be at least 1 voxel per unit"),
            CoreError::TooLarge { dims } => write!(
                f,
                "voxel dimensions of {}, {}, {} exceed the addressable cell count",
                dims.width, dims.height, dims.depth
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
