//! # paf_core
//!
//! Pure algorithms for dense voxel fields in the OpenPAF procedural asset toolchain.
//!
//! This crate holds the math that does not care where voxel values live: the
//! coordinate↔index linearization of a dense grid, the marching-cubes lookup tables
//! and the per-cube polygonization step. Storage, mutation and whole-grid extraction
//! live in `paf_voxel`.
//!
//! ## Features
//!
//! - **no_std compatible**: Works in embedded environments with the `alloc` feature
//! - **Pure algorithms**: No storage implementation, just math
//! - **Marching cubes**: The standard 256-case table as static data
//! - **Checked coordinates**: Every index conversion has an `Option`-returning form
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables standard library support (implies `alloc`)
//! - `alloc`: Enables heap allocation (Vec, etc.) without full std
//! - `serde`: Serialize/Deserialize for [`Point3`], [`VoxelCoord`] and [`Dimensions`]
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, VoxelCoord, Dimensions, Voxel)
//! - [`traits`]: The [`VoxelSource`] read abstraction and corner ordering helpers
//! - [`coords`]: Coordinate conversion functions
//! - [`marching_cubes`]: Lookup tables and per-cube polygonization
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```ignore
//! use paf_core::prelude::*;
//!
//! let dims = dimensions_from_extents(2.0, 1.0, 1.0, 4); // 8 x 4 x 4 voxels
//! let index = linearize(dims, VoxelCoord::new(3, 2, 1)).unwrap();
//! assert_eq!(delinearize(dims, index), Some(VoxelCoord::new(3, 2, 1)));
//!
//! // Polygonize one cube of any VoxelSource
//! let count = polygonize_cube(&source, VoxelCoord::new(0, 0, 0), 0.5, |tri| {
//!     // tri: [CubeVertex; 3] in grid space
//! });
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

// Internal alloc prelude for conditional compilation
#[cfg(feature = "std")]
mod alloc_prelude {
    pub use std::vec::Vec;
}

#[cfg(all(feature = "alloc", not(feature = "std")))]
mod alloc_prelude {
    pub use alloc::vec::Vec;
}

pub mod coords;
pub mod error;
pub mod marching_cubes;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::coords::{
        delinearize, dimensions_from_extents, edge_key, grid_to_world, linearize,
    };
    pub use crate::error::CoreError;
    pub use crate::marching_cubes::{
        cube_index, interpolate_vertex, polygonize_cube, polygonize_cube_no_alloc, CubeVertex,
        MAX_TRIANGLES_PER_CUBE,
    };
    pub use crate::traits::{corner_from_index, index_from_corner, VoxelSource};
    pub use crate::types::{Dimensions, Point3, Voxel, VoxelCoord};

    #[cfg(feature = "alloc")]
    pub use crate::marching_cubes::polygonize_cube_vec;
}

// Re-export everything at crate root for convenience
pub use coords::{delinearize, dimensions_from_extents, edge_key, grid_to_world, linearize};
pub use error::CoreError;
pub use marching_cubes::{CubeVertex, MAX_TRIANGLES_PER_CUBE};
pub use traits::{corner_from_index, index_from_corner, VoxelSource};
pub use types::{Dimensions, Point3, Voxel, VoxelCoord};
