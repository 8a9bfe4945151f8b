//! Mesh extraction using marching cubes.
//!
//! Wraps paf_core's per-cube polygonization with whole-grid traversal, optional vertex
//! welding and parallel processing support.
//!
//! The grid is marched in z-slabs. Each slab produces its own chunk of positions, edge
//! keys and chunk-local triangles; chunks are then concatenated in z order with their
//! index offsets recomputed. Sequential and parallel extraction therefore produce
//! identical meshes.

use std::collections::HashMap;

use paf_core::coords::grid_to_world;
use paf_core::marching_cubes::polygonize_cube;
use paf_core::{Point3, VoxelCoord, VoxelSource};
use tracing::{debug, info_span};

use crate::config::ExtractorConfig;
use crate::grid::VoxelGrid;

/// A triangle represented by three vertices.
pub type Triangle = [Point3; 3];

/// Indexed triangle mesh in world-space units.
///
/// Every triangle is wound counter-clockwise when viewed from outside the solid region,
/// so right-hand normals point from voxels above the iso-value toward voxels below it.
///
/// Indices are `u32`, so a mesh holds at most `u32::MAX + 1` vertices.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Index triples into `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Vertex positions as a flat `[x0, y0, z0, x1, ...]` buffer.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.as_array()).collect()
    }

    /// Triangle indices as a flat buffer.
    pub fn indices_flat(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// The three vertex positions of triangle `index`.
    pub fn triangle_positions(&self, index: usize) -> Option<Triangle> {
        let [a, b, c] = *self.triangles.get(index)?;
        Some([
            *self.vertices.get(a as usize)?,
            *self.vertices.get(b as usize)?,
            *self.vertices.get(c as usize)?,
        ])
    }

    /// Iterate triangles as vertex positions.
    pub fn triangle_iter(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangles.len()).filter_map(move |i| self.triangle_positions(i))
    }

    /// A copy with every vertex multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Mesh {
        Mesh {
            vertices: self.vertices.iter().map(|&v| v * factor).collect(),
            triangles: self.triangles.clone(),
        }
    }
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of distinct vertices.
    pub vertex_count: usize,
    /// Sum of triangle areas.
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics from a mesh.
    ///
    /// An empty mesh reports a zero-sized bounding box at the origin.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut surface_area = 0.0;
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);

        for &v in &mesh.vertices {
            bbox_min = bbox_min.min(v);
            bbox_max = bbox_max.max(v);
        }

        for tri in mesh.triangle_iter() {
            let e1 = tri[1] - tri[0];
            let e2 = tri[2] - tri[0];
            surface_area += e1.cross(e2).length() * 0.5;
        }

        if mesh.vertices.is_empty() {
            bbox_min = Point3::default();
            bbox_max = Point3::default();
        }

        Self {
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            surface_area,
            bbox_min,
            bbox_max,
        }
    }
}

/// Marching cubes surface extractor.
///
/// # Example
///
/// ```ignore
/// use paf_voxel::{ExtractorConfig, SurfaceExtractor, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(4.0, 4.0, 4.0, 8);
/// grid.randomize(1).high_pass(0.7);
///
/// let extractor = SurfaceExtractor::new(ExtractorConfig::new(0.5).with_weld_vertices(false));
/// let mesh = extractor.extract(&grid);
/// println!("{} triangles", mesh.triangle_count());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceExtractor {
    config: ExtractorConfig,
}

/// Output of one z-slab, in grid space with chunk-local indices.
#[derive(Debug, Default)]
struct Slab {
    positions: Vec<Point3>,
    edge_keys: Vec<u64>,
    triangles: Vec<[u32; 3]>,
}

impl SurfaceExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the iso-surface of `source`.
    ///
    /// Runs on the rayon thread pool when enabled in the config and the grid has at
    /// least `min_parallel_cubes` march cubes. Degenerate input (an axis shorter than 2,
    /// zero resolution, missing samples) yields an empty mesh for the affected cubes
    /// instead of an error.
    pub fn extract<S: VoxelSource + Sync + ?Sized>(&self, source: &S) -> Mesh {
        let _span = info_span!("extract_surface").entered();

        let Some(depth) = self.cube_depth(source) else {
            return Mesh::default();
        };

        let cubes = source.dimensions().cube_volume();
        let parallel = self.config.parallel && cubes >= self.config.min_parallel_cubes;
        let iso = self.config.iso_value;

        let slabs = if parallel {
            march_slabs_parallel(source, depth, iso)
        } else {
            march_slabs(source, depth, iso)
        };

        self.assemble(source, slabs, parallel)
    }

    /// Extract on the calling thread, for sources that are not `Sync`.
    pub fn extract_sequential<S: VoxelSource + ?Sized>(&self, source: &S) -> Mesh {
        let _span = info_span!("extract_surface").entered();

        let Some(depth) = self.cube_depth(source) else {
            return Mesh::default();
        };

        let slabs = march_slabs(source, depth, self.config.iso_value);
        self.assemble(source, slabs, false)
    }

    /// Number of z-slabs to march, or `None` if no cube can produce output.
    fn cube_depth<S: VoxelSource + ?Sized>(&self, source: &S) -> Option<u32> {
        let dims = source.dimensions();
        if source.resolution() == 0 || !dims.has_cubes() {
            debug!(
                width = dims.width,
                height = dims.height,
                depth = dims.depth,
                resolution = source.resolution(),
                "no complete march cube, skipping extraction"
            );
            return None;
        }
        Some(dims.cube_counts().2)
    }

    /// Concatenate slab chunks in z order into a world-space mesh.
    fn assemble<S: VoxelSource + ?Sized>(&self, source: &S, slabs: Vec<Slab>, parallel: bool) -> Mesh {
        let resolution = source.resolution();
        let emitted: usize = slabs.iter().map(|s| s.positions.len()).sum();
        let triangle_count: usize = slabs.iter().map(|s| s.triangles.len()).sum();

        let mut mesh = Mesh {
            vertices: Vec::with_capacity(if self.config.weld_vertices {
                emitted / 3
            } else {
                emitted
            }),
            triangles: Vec::with_capacity(triangle_count),
        };

        if self.config.weld_vertices {
            let mut welded: HashMap<u64, u32> = HashMap::with_capacity(emitted / 3);
            let mut remap = Vec::new();

            for slab in slabs {
                remap.clear();
                for (&position, &key) in slab.positions.iter().zip(&slab.edge_keys) {
                    let index = *welded.entry(key).or_insert_with(|| {
                        mesh.vertices.push(grid_to_world(position, resolution));
                        vertex_index(mesh.vertices.len() - 1)
                    });
                    remap.push(index);
                }
                mesh.triangles.extend(
                    slab.triangles
                        .iter()
                        .map(|t| t.map(|local| remap[local as usize])),
                );
            }
        } else {
            for slab in slabs {
                let offset = vertex_index(mesh.vertices.len());
                mesh.vertices.extend(
                    slab.positions
                        .iter()
                        .map(|&p| grid_to_world(p, resolution)),
                );
                mesh.triangles
                    .extend(slab.triangles.iter().map(|t| t.map(|local| local + offset)));
            }
        }

        debug!(
            cubes = source.dimensions().cube_volume(),
            triangles = mesh.triangle_count(),
            vertices = mesh.vertex_count(),
            emitted_vertices = emitted,
            welded = self.config.weld_vertices,
            parallel,
            "extracted surface"
        );

        mesh
    }
}

/// Narrow a vertex position in a buffer to a mesh index.
#[inline]
fn vertex_index(n: usize) -> u32 {
    debug_assert!(
        u32::try_from(n).is_ok(),
        "vertex index {} exceeds the u32 index range",
        n
    );
    n as u32
}

/// March every cube in the slab `z`.
fn march_slab<S: VoxelSource + ?Sized>(source: &S, z: u32, iso_value: f32) -> Slab {
    let (cx, cy, _) = source.dimensions().cube_counts();
    let mut slab = Slab::default();

    for y in 0..cy {
        for x in 0..cx {
            polygonize_cube(source, VoxelCoord::new(x, y, z), iso_value, |tri| {
                let base = vertex_index(slab.positions.len());
                for v in tri {
                    slab.positions.push(v.position);
                    slab.edge_keys.push(v.edge_key);
                }
                slab.triangles.push([base, base + 1, base + 2]);
            });
        }
    }

    slab
}

fn march_slabs<S: VoxelSource + ?Sized>(source: &S, depth: u32, iso_value: f32) -> Vec<Slab> {
    (0..depth).map(|z| march_slab(source, z, iso_value)).collect()
}

#[cfg(feature = "parallel")]
fn march_slabs_parallel<S: VoxelSource + Sync + ?Sized>(
    source: &S,
    depth: u32,
    iso_value: f32,
) -> Vec<Slab> {
    use rayon::prelude::*;

    // Indexed collect keeps slabs in z order
    (0..depth)
        .into_par_iter()
        .map(|z| march_slab(source, z, iso_value))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn march_slabs_parallel<S: VoxelSource + Sync + ?Sized>(
    source: &S,
    depth: u32,
    iso_value: f32,
) -> Vec<Slab> {
    march_slabs(source, depth, iso_value)
}

impl VoxelGrid {
    /// Extract the iso-surface at `iso_value` with the default options.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mesh = grid.extract_surface(0.5);
    /// println!("Generated {} triangles", mesh.triangle_count());
    /// ```
    pub fn extract_surface(&self, iso_value: f32) -> Mesh {
        SurfaceExtractor::new(ExtractorConfig::new(iso_value)).extract(self)
    }
}
