//! End-to-end tests: build a grid, run operators, extract and hand off buffers.

use paf_voxel::prelude::*;
use paf_voxel::{Fill, HighPass, Randomize, SetVoxel};

const SPHERE_RADIUS: f32 = 6.0;

/// 16^3 voxels at resolution 4 holding a sphere of radius 1.5 world units.
///
/// Values fall off linearly with distance so the 0.5 level set sits on the sphere.
fn create_sphere_grid() -> VoxelGrid {
    let mut grid = VoxelGridBuilder::new(4)
        .extents(4.0, 4.0, 4.0)
        .build()
        .unwrap();

    let center = Point3::splat(7.5);
    let values: Vec<f32> = grid
        .iter()
        .map(|(coord, _)| {
            let d = (Point3::from(coord) - center).length();
            (0.5 + (SPHERE_RADIUS - d) * 0.1).clamp(0.0, 1.0)
        })
        .collect();
    grid.cells_mut().copy_from_slice(&values);
    grid
}

#[test]
fn test_sphere_surface_area() {
    let grid = create_sphere_grid();
    let mesh = grid.extract_surface(0.5);
    let stats = MeshStats::from_mesh(&mesh);

    let r = SPHERE_RADIUS / 4.0;
    let expected = 4.0 * std::f32::consts::PI * r * r;
    let error = (stats.surface_area - expected).abs() / expected;
    assert!(
        error < 0.05,
        "area {} vs analytic {} ({:.2}% off)",
        stats.surface_area,
        expected,
        error * 100.0
    );
}

#[test]
fn test_sphere_bounding_box() {
    let grid = create_sphere_grid();
    let stats = MeshStats::from_mesh(&grid.extract_surface(0.5));

    let lo = (7.5 - SPHERE_RADIUS) / 4.0;
    let hi = (7.5 + SPHERE_RADIUS) / 4.0;
    for (min, max) in [
        (stats.bbox_min.x, stats.bbox_max.x),
        (stats.bbox_min.y, stats.bbox_max.y),
        (stats.bbox_min.z, stats.bbox_max.z),
    ] {
        assert!((min - lo).abs() < 0.05, "bbox min {} vs {}", min, lo);
        assert!((max - hi).abs() < 0.05, "bbox max {} vs {}", max, hi);
    }
}

#[test]
fn test_sphere_is_closed_genus_zero() {
    let mesh = create_sphere_grid().extract_surface(0.5);

    let v = mesh.vertex_count() as i64;
    let f = mesh.triangle_count() as i64;
    assert_eq!(f % 2, 0);
    assert_eq!(v - 3 * f / 2 + f, 2, "Euler characteristic of a sphere");
}

#[test]
fn test_sphere_normals_point_outward() {
    let mesh = create_sphere_grid().extract_surface(0.5);
    let center = Point3::splat(7.5 / 4.0);

    for i in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle_positions(i).unwrap();
        let normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(
            normal.dot(centroid - center) > 0.0,
            "triangle {} faces inward",
            i
        );
    }
}

#[test]
fn test_pipeline_matches_builder() {
    let pipeline = Pipeline::new().then(Randomize(2024)).then(HighPass(0.55));

    let from_pipeline = pipeline.run_on_copy(&VoxelGrid::new(2.0, 1.0, 1.0, 8));
    let from_builder = VoxelGridBuilder::new(8)
        .extents(2.0, 1.0, 1.0)
        .randomize(2024)
        .high_pass(0.55)
        .build()
        .unwrap();

    assert_eq!(from_pipeline, from_builder);
    assert_eq!(
        from_pipeline.extract_surface(0.5),
        from_builder.extract_surface(0.5)
    );
}

#[test]
fn test_pipeline_to_gpu_buffers() {
    let pipeline = Pipeline::new()
        .then(Fill(0.0))
        .then(SetVoxel {
            coord: VoxelCoord::new(2, 2, 2),
            value: 1.0,
        })
        .then(SetVoxel {
            coord: VoxelCoord::new(3, 2, 2),
            value: 1.0,
        });

    let mut grid = VoxelGrid::new(6.0, 5.0, 5.0, 1);
    pipeline.run(&mut grid);
    let mesh = grid.extract_surface(0.5);

    let positions = mesh.positions_flat();
    let indices = mesh.indices_flat();
    assert_eq!(positions.len(), mesh.vertex_count() * 3);
    assert_eq!(indices.len(), mesh.triangle_count() * 3);
    assert!(indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));

    // Two adjacent solid voxels: a closed capsule around them
    let f = mesh.triangle_count() as i64;
    let v = mesh.vertex_count() as i64;
    assert_eq!(v - 3 * f / 2 + f, 2);
}

#[test]
fn test_unwelded_and_welded_same_geometry() {
    let grid = create_sphere_grid();
    let welded = grid.extract_surface(0.5);
    let raw = SurfaceExtractor::new(ExtractorConfig::new(0.5).with_weld_vertices(false))
        .extract(&grid);

    assert_eq!(welded.triangle_count(), raw.triangle_count());
    let welded_area = MeshStats::from_mesh(&welded).surface_area;
    let raw_area = MeshStats::from_mesh(&raw).surface_area;
    assert!((welded_area - raw_area).abs() / raw_area < 1e-3);
}

#[test]
fn test_vertex_points_cover_sphere_interior() {
    let grid = create_sphere_grid();
    let points = grid.vertex_points();
    let center = Point3::splat(7.5 / 4.0);
    let r = SPHERE_RADIUS / 4.0;

    assert!(!points.is_empty());
    for p in &points {
        assert!((*p - center).length() <= r + 1e-4);
    }
}

#[test]
fn test_extract_from_raw_buffer() {
    let grid = create_sphere_grid();
    let view = FieldView::new(grid.cells(), grid.dimensions(), grid.resolution());

    assert_eq!(
        SurfaceExtractor::default().extract(&view),
        grid.extract_surface(0.5)
    );
}
