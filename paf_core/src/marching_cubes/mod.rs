//! Marching Cubes surface polygonization.
//!
//! This module provides the marching cubes building blocks for extracting triangle
//! meshes from dense voxel fields. It includes:
//!
//! - The standard lookup tables for the 256 cube configurations
//! - Functions for classifying and polygonizing individual cubes
//! - Both allocating and no-alloc variants for flexibility
//!
//! # Example
//!
//! ```ignore
//! use paf_core::marching_cubes::{polygonize_cube, polygonize_cube_no_alloc};
//! use paf_core::types::VoxelCoord;
//!
//! // Stream triangles with their edge keys
//! polygonize_cube(&source, VoxelCoord::new(0, 0, 0), 0.5, |tri| { /* ... */ });
//!
//! // Fixed-capacity variant for embedded/no_std
//! let (triangles, count) = polygonize_cube_no_alloc(&source, VoxelCoord::new(0, 0, 0), 0.5);
//! ```

mod algorithm;
mod tables;

pub use algorithm::{
    cube_index, interpolate_vertex, polygonize_cube, polygonize_cube_no_alloc, CubeVertex,
    MAX_TRIANGLES_PER_CUBE,
};
pub use tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

#[cfg(feature = "alloc")]
pub use algorithm::polygonize_cube_vec;
