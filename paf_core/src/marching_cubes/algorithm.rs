//! Marching Cubes per-cube polygonization.
//!
//! Provides the classification, edge interpolation and triangle emission for a single
//! 2x2x2 march cube. Whole-grid traversal, vertex welding and world-space conversion
//! are left to the caller.

use crate::coords::edge_key;
use crate::traits::VoxelSource;
use crate::types::{Point3, VoxelCoord};

use super::tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

/// Upper bound on triangles produced by a single cube configuration.
pub const MAX_TRIANGLES_PER_CUBE: usize = 5;

/// A surface crossing on one cube edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CubeVertex {
    /// Interpolated position in grid space (voxel units).
    pub position: Point3,
    /// Key of the grid lattice edge the vertex lies on, see [`edge_key`].
    pub edge_key: u64,
}

/// Interpolate vertex position along an edge where the field crosses the iso-value.
///
/// Uses linear interpolation to find the crossing point.
///
/// # Arguments
/// * `p0` - Position of the first corner
/// * `p1` - Position of the second corner
/// * `v0` - Field value at the first corner
/// * `v1` - Field value at the second corner
/// * `iso_value` - The iso-surface value
///
/// # Returns
/// The interpolated position where the surface crosses the edge.
#[inline]
pub fn interpolate_vertex(p0: Point3, p1: Point3, v0: f32, v1: f32, iso_value: f32) -> Point3 {
    // Equal-valued edges have no unique crossing
    let denom = v1 - v0;
    if libm::fabsf(denom) < 1e-10 {
        return p0.lerp(p1, 0.5);
    }

    let t = (iso_value - v0) / denom;

    // Clamp to [0, 1] to handle numerical errors
    let t = t.clamp(0.0, 1.0);

    p0.lerp(p1, t)
}

/// Compute the cube configuration index from corner values.
///
/// # Arguments
/// * `corner_values` - Field values at the 8 corners, in [`CORNER_OFFSETS`] order
/// * `iso_value` - The iso-surface value
///
/// # Returns
/// An 8-bit index where bit i is set if corner i is above the surface (value > iso_value).
#[inline]
pub fn cube_index(corner_values: &[f32; 8], iso_value: f32) -> usize {
    let mut index = 0;
    for (i, &val) in corner_values.iter().enumerate() {
        if val > iso_value {
            index |= 1 << i;
        }
    }
    index
}

/// Read the 8 corner values of the cube at `origin`.
///
/// Returns `None` if the cube does not fit inside the source or any corner is missing.
#[inline]
fn gather_corners<S: VoxelSource + ?Sized>(source: &S, origin: VoxelCoord) -> Option<[f32; 8]> {
    let (cx, cy, cz) = source.dimensions().cube_counts();
    if origin.x >= cx || origin.y >= cy || origin.z >= cz {
        return None;
    }

    let mut values = [0.0f32; 8];
    for (value, &offset) in values.iter_mut().zip(CORNER_OFFSETS.iter()) {
        *value = source.value(origin.offset(offset))?;
    }
    Some(values)
}

/// Polygonize the march cube whose lowest corner is `origin`.
///
/// Each emitted triangle is wound counter-clockwise when viewed from the side below
/// the iso-value, so its right-hand normal points away from the above-iso region.
/// Positions are in grid space.
///
/// # Arguments
/// * `source` - Field providing the corner values
/// * `origin` - The cube's `(0, 0, 0)` corner
/// * `iso_value` - The iso-surface value
/// * `emit` - Called once per triangle
///
/// # Returns
/// The number of triangles emitted. Zero if the cube lies (partly) outside the source,
/// a corner sample is missing, or the surface does not cross the cube.
pub fn polygonize_cube<S, F>(source: &S, origin: VoxelCoord, iso_value: f32, mut emit: F) -> usize
where
    S: VoxelSource + ?Sized,
    F: FnMut([CubeVertex; 3]),
{
    let corner_values = match gather_corners(source, origin) {
        Some(values) => values,
        None => return 0,
    };

    let config = cube_index(&corner_values, iso_value);

    // Check if the surface intersects this cube
    let edge_flags = EDGE_TABLE[config];
    if edge_flags == 0 {
        return 0;
    }

    let dims = source.dimensions();

    // Compute edge intersection vertices
    let mut edge_vertices = [CubeVertex::default(); 12];
    for (edge_idx, vertex) in edge_vertices.iter_mut().enumerate() {
        if (edge_flags & (1 << edge_idx)) == 0 {
            continue;
        }

        let (a, b) = EDGE_VERTICES[edge_idx];
        let ca = origin.offset(CORNER_OFFSETS[a]);
        let cb = origin.offset(CORNER_OFFSETS[b]);

        *vertex = CubeVertex {
            position: interpolate_vertex(
                Point3::from(ca),
                Point3::from(cb),
                corner_values[a],
                corner_values[b],
                iso_value,
            ),
            edge_key: edge_key(dims, ca, cb),
        };
    }

    // Table rows wind toward the above-iso corners; swap the last two to face outward
    let tri_list = &TRI_TABLE[config];
    let mut count = 0;
    for tri in tri_list.chunks_exact(3) {
        if tri[0] < 0 {
            break;
        }
        emit([
            edge_vertices[tri[0] as usize],
            edge_vertices[tri[2] as usize],
            edge_vertices[tri[1] as usize],
        ]);
        count += 1;
    }

    count
}

/// Polygonize a single cube without dynamic allocation.
///
/// Returns a fixed-size array that can hold up to [`MAX_TRIANGLES_PER_CUBE`] triangles.
///
/// # Returns
/// A tuple of (triangles, count) where triangles is a fixed array of grid-space
/// positions and count is the number of valid triangles.
pub fn polygonize_cube_no_alloc<S: VoxelSource + ?Sized>(
    source: &S,
    origin: VoxelCoord,
    iso_value: f32,
) -> ([[Point3; 3]; MAX_TRIANGLES_PER_CUBE], usize) {
    let mut triangles = [[Point3::default(); 3]; MAX_TRIANGLES_PER_CUBE];
    let mut count = 0;

    polygonize_cube(source, origin, iso_value, |[a, b, c]| {
        if count < MAX_TRIANGLES_PER_CUBE {
            triangles[count] = [a.position, b.position, c.position];
            count += 1;
        }
    });

    (triangles, count)
}

/// Polygonize a single cube into a vector of grid-space triangles.
#[cfg(feature = "alloc")]
pub fn polygonize_cube_vec<S: VoxelSource + ?Sized>(
    source: &S,
    origin: VoxelCoord,
    iso_value: f32,
) -> crate::alloc_prelude::Vec<[Point3; 3]> {
    use crate::alloc_prelude::Vec;

    let mut triangles = Vec::new();
    polygonize_cube(source, origin, iso_value, |[a, b, c]| {
        triangles.push([a.position, b.position, c.position]);
    });
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, Voxel};

    /// Mock source: a 2x2x2 cube with explicit corner values in corner order.
    struct CubeSource {
        corners: [f32; 8],
    }

    impl VoxelSource for CubeSource {
        fn dimensions(&self) -> Dimensions {
            Dimensions::new(2, 2, 2)
        }

        fn resolution(&self) -> u32 {
            1
        }

        fn value(&self, coord: VoxelCoord) -> Option<Voxel> {
            if !self.dimensions().contains(coord) {
                return None;
            }
            let idx = crate::traits::index_from_corner((coord.x, coord.y, coord.z));
            Some(self.corners[idx])
        }
    }

    /// Source whose samples are missing beyond `available` voxels.
    struct Truncated {
        available: usize,
    }

    impl VoxelSource for Truncated {
        fn dimensions(&self) -> Dimensions {
            Dimensions::new(2, 2, 2)
        }

        fn resolution(&self) -> u32 {
            1
        }

        fn value(&self, coord: VoxelCoord) -> Option<Voxel> {
            let idx = self.index_of(coord)?;
            (idx < self.available).then_some(if idx == 0 { 1.0 } else { 0.0 })
        }
    }

    #[test]
    fn test_interpolate_vertex_midpoint() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);

        let result = interpolate_vertex(p0, p1, 0.0, 1.0, 0.5);
        assert!((result.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_interpolate_vertex_at_corners() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);

        // Value at p0 equals iso -> result at p0
        let result = interpolate_vertex(p0, p1, 0.5, 1.0, 0.5);
        assert!((result.x - 0.0).abs() < 1e-6);

        // Value at p1 equals iso -> result at p1
        let result = interpolate_vertex(p0, p1, 0.0, 0.5, 0.5);
        assert!((result.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_interpolate_vertex_clamps_outside_edge() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);

        let result = interpolate_vertex(p0, p1, 0.2, 0.4, 0.9);
        assert_eq!(result, p1);

        let result = interpolate_vertex(p0, p1, 0.2, 0.4, -1.0);
        assert_eq!(result, p0);
    }

    #[test]
    fn test_interpolate_vertex_degenerate_edge() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(0.0, 2.0, 0.0);

        let result = interpolate_vertex(p0, p1, 0.5, 0.5, 0.5);
        assert_eq!(result, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_cube_index() {
        // All below
        let values = [0.0; 8];
        assert_eq!(cube_index(&values, 0.5), 0);

        // All above
        let values = [1.0; 8];
        assert_eq!(cube_index(&values, 0.5), 255);

        // Only corner 0 above
        let mut values = [0.0; 8];
        values[0] = 1.0;
        assert_eq!(cube_index(&values, 0.5), 1);

        // Corners 0 and 1 above
        values[1] = 1.0;
        assert_eq!(cube_index(&values, 0.5), 3);
    }

    #[test]
    fn test_cube_index_equal_to_iso_is_below() {
        let values = [0.5; 8];
        assert_eq!(cube_index(&values, 0.5), 0);
    }

    #[test]
    fn test_single_corner_emits_one_triangle_on_adjacent_edges() {
        let mut corners = [0.0; 8];
        corners[0] = 1.0;
        let source = CubeSource { corners };

        let mut emitted = [[CubeVertex::default(); 3]; 1];
        let count = polygonize_cube(&source, VoxelCoord::new(0, 0, 0), 0.5, |tri| {
            emitted[0] = tri;
        });
        assert_eq!(count, 1);

        // Each vertex sits halfway along one of the three edges leaving corner 0
        let mut seen = [false; 3];
        for v in &emitted[0] {
            let p = v.position;
            let on_axis = [
                p.y == 0.0 && p.z == 0.0 && p.x > 0.0 && p.x < 1.0,
                p.x == 0.0 && p.z == 0.0 && p.y > 0.0 && p.y < 1.0,
                p.x == 0.0 && p.y == 0.0 && p.z > 0.0 && p.z < 1.0,
            ];
            let axis = on_axis.iter().position(|&b| b).expect("vertex off corner edges");
            seen[axis] = true;
            assert!((p.x + p.y + p.z - 0.5).abs() < 1e-6);
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_single_corner_normal_faces_away_from_solid() {
        let mut corners = [0.0; 8];
        corners[0] = 1.0;
        let source = CubeSource { corners };

        let (tris, count) = polygonize_cube_no_alloc(&source, VoxelCoord::new(0, 0, 0), 0.5);
        assert_eq!(count, 1);

        let [a, b, c] = tris[0];
        let normal = (b - a).cross(c - a);
        let to_solid = Point3::new(0.0, 0.0, 0.0) - a;
        assert!(
            normal.dot(to_solid) < 0.0,
            "normal {:?} should point away from the solid corner",
            normal
        );
    }

    #[test]
    fn test_uniform_cube_is_empty() {
        let above = CubeSource { corners: [1.0; 8] };
        let below = CubeSource { corners: [0.0; 8] };

        assert_eq!(polygonize_cube(&above, VoxelCoord::new(0, 0, 0), 0.5, |_| {}), 0);
        assert_eq!(polygonize_cube(&below, VoxelCoord::new(0, 0, 0), 0.5, |_| {}), 0);
    }

    #[test]
    fn test_cube_outside_source_is_empty() {
        let mut corners = [0.0; 8];
        corners[0] = 1.0;
        let source = CubeSource { corners };

        assert_eq!(polygonize_cube(&source, VoxelCoord::new(1, 0, 0), 0.5, |_| {}), 0);
    }

    #[test]
    fn test_origin_at_coordinate_limit_is_empty() {
        let mut corners = [0.0; 8];
        corners[0] = 1.0;
        let source = CubeSource { corners };

        for origin in [
            VoxelCoord::new(u32::MAX, 0, 0),
            VoxelCoord::new(0, u32::MAX, 0),
            VoxelCoord::new(0, 0, u32::MAX),
            VoxelCoord::new(u32::MAX, u32::MAX, u32::MAX),
        ] {
            assert_eq!(polygonize_cube(&source, origin, 0.5, |_| {}), 0);
            assert_eq!(polygonize_cube_no_alloc(&source, origin, 0.5).1, 0);
        }
    }

    #[test]
    fn test_missing_corner_skips_cube() {
        let partial = Truncated { available: 7 };
        let complete = Truncated { available: 8 };

        assert_eq!(polygonize_cube(&partial, VoxelCoord::new(0, 0, 0), 0.5, |_| {}), 0);
        assert_eq!(polygonize_cube(&complete, VoxelCoord::new(0, 0, 0), 0.5, |_| {}), 1);
    }

    #[test]
    fn test_edge_keys_match_lattice_edges() {
        let mut corners = [0.0; 8];
        corners[0] = 1.0;
        let source = CubeSource { corners };
        let dims = source.dimensions();

        let mut keys = [0u64; 3];
        polygonize_cube(&source, VoxelCoord::new(0, 0, 0), 0.5, |tri| {
            for (k, v) in keys.iter_mut().zip(tri.iter()) {
                *k = v.edge_key;
            }
        });

        let origin = VoxelCoord::new(0, 0, 0);
        for key in keys {
            assert!(
                key == edge_key(dims, origin, VoxelCoord::new(1, 0, 0))
                    || key == edge_key(dims, origin, VoxelCoord::new(0, 1, 0))
                    || key == edge_key(dims, origin, VoxelCoord::new(0, 0, 1)),
                "unexpected edge key {}",
                key
            );
        }
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn test_alloc_and_no_alloc_match() {
        let source = CubeSource {
            corners: [0.9, 0.1, 0.7, 0.2, 0.3, 0.8, 0.05, 0.6],
        };
        let origin = VoxelCoord::new(0, 0, 0);

        let alloc_triangles = polygonize_cube_vec(&source, origin, 0.5);
        let (fixed, count) = polygonize_cube_no_alloc(&source, origin, 0.5);

        assert_eq!(alloc_triangles.len(), count);
        assert!(count > 0);
        for i in 0..count {
            assert_eq!(alloc_triangles[i], fixed[i]);
        }
    }
}
