//! # paf_voxel
//!
//! Dense voxel grids and iso-surface extraction for the OpenPAF procedural asset
//! toolchain.
//!
//! This crate provides the runtime side of the OpenPAF voxel stack:
//!
//! - **VoxelGrid**: A dense, row-major array of occupancy values with bounds-checked
//!   coordinate transforms and chainable mutators
//! - **Operators**: Grid-to-grid transforms composable into a pipeline
//! - **SurfaceExtractor**: Marching cubes over any [`VoxelSource`], with vertex welding
//!   and deterministic parallel extraction
//!
//! ## Quick Start
//!
//! ```ignore
//! use paf_voxel::prelude::*;
//!
//! let mut grid = VoxelGrid::new(2.0, 2.0, 2.0, 8); // 16 x 16 x 16 voxels
//! grid.randomize(42).high_pass(0.55);
//!
//! let mesh = grid.extract_surface(0.5);
//! println!("{} triangles, {} vertices", mesh.triangle_count(), mesh.vertex_count());
//!
//! // Hand off to a renderer
//! let positions: Vec<f32> = mesh.positions_flat();
//! let indices: Vec<u32> = mesh.indices_flat();
//! ```
//!
//! ## Error Handling
//!
//! Coordinate misuse is a programming error: [`VoxelGrid::get`], [`VoxelGrid::set`] and
//! friends panic on out-of-range input. Each has a `try_*` twin returning
//! [`VoxelError`]. Extraction never fails; degenerate input yields an empty [`Mesh`].
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Parallel extraction via rayon
//! - `serde`: Serialize/Deserialize for [`Mesh`] and [`ExtractorConfig`]
//!
//! ## Concurrency
//!
//! Extraction only reads the source. Mutating a grid while it is being extracted is
//! prevented by the borrow checker; to keep editing while a mesh is built elsewhere,
//! extract from a clone.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod config;
mod error;
mod grid;
mod mesh;
mod ops;
mod view;

pub use builder::VoxelGridBuilder;
pub use config::ExtractorConfig;
pub use error::{Result, VoxelError};
pub use grid::VoxelGrid;
pub use mesh::{Mesh, MeshStats, SurfaceExtractor, Triangle};
pub use ops::{Fill, GridOp, HighPass, Pipeline, Randomize, SetVoxel};
pub use view::FieldView;

// Re-export paf_core types for convenience
pub use paf_core::{CoreError, Dimensions, Point3, Voxel, VoxelCoord, VoxelSource};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use paf_voxel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::builder::VoxelGridBuilder;
    pub use crate::config::ExtractorConfig;
    pub use crate::error::{Result, VoxelError};
    pub use crate::grid::VoxelGrid;
    pub use crate::mesh::{Mesh, MeshStats, SurfaceExtractor};
    pub use crate::ops::{GridOp, Pipeline};
    pub use crate::view::FieldView;

    pub use paf_core::{Dimensions, Point3, VoxelCoord, VoxelSource};
}
