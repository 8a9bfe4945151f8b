//! Boundary condition tests for paf_voxel.
//!
//! These tests exercise the edges of the grid: first and last voxels, axes of length
//! 0, 1 and 2, iso-values at and beyond the value range, and buffers that do not
//! match their dimensions.

use paf_voxel::{
    Dimensions, ExtractorConfig, FieldView, Point3, SurfaceExtractor, VoxelCoord, VoxelError,
    VoxelGrid, VoxelSource,
};

// =============================================================================
// Test Grid Factories
// =============================================================================

/// Grid whose value equals its x coordinate divided by the width
fn create_ramp_grid(dims: Dimensions) -> VoxelGrid {
    let cells = (0..dims.volume())
        .map(|i| (i % dims.width as usize) as f32 / dims.width as f32)
        .collect();
    VoxelGrid::from_cells(dims, 1, cells).unwrap()
}

fn sequential(iso: f32) -> SurfaceExtractor {
    SurfaceExtractor::new(ExtractorConfig::new(iso).with_parallel(false))
}

// =============================================================================
// Coordinate Extremes
// =============================================================================

#[test]
fn test_first_and_last_voxel() {
    let mut grid = VoxelGrid::new(1.25, 0.5, 2.0, 4);
    let dims = grid.dimensions();
    let (lx, ly, lz) = (dims.width - 1, dims.height - 1, dims.depth - 1);

    assert_eq!(grid.index_of(0, 0, 0), 0);
    assert_eq!(grid.index_of(lx, ly, lz), grid.len() - 1);
    assert_eq!(grid.coordinate_of(grid.len() - 1), VoxelCoord::new(lx, ly, lz));

    grid.set(lx, ly, lz, 0.75);
    assert_eq!(grid.get(lx, ly, lz), 0.75);
    assert_eq!(*grid.cells().last().unwrap(), 0.75);
}

#[test]
fn test_one_past_each_axis_is_rejected() {
    let grid = VoxelGrid::new(1.0, 1.0, 1.0, 3);
    let dims = grid.dimensions();

    for (x, y, z) in [
        (dims.width, 0, 0),
        (0, dims.height, 0),
        (0, 0, dims.depth),
        (u32::MAX, u32::MAX, u32::MAX),
    ] {
        assert!(matches!(
            grid.try_index_of(x, y, z),
            Err(VoxelError::Core(_))
        ));
        assert!(grid.try_get(x, y, z).is_err());
    }
}

#[test]
fn test_index_equal_to_len_is_rejected() {
    let grid = VoxelGrid::new(1.0, 1.0, 1.0, 3);
    assert!(grid.try_coordinate_of(grid.len() - 1).is_ok());
    assert!(grid.try_coordinate_of(grid.len()).is_err());
}

#[test]
fn test_try_set_out_of_bounds_leaves_grid_unchanged() {
    let mut grid = VoxelGrid::new(1.0, 1.0, 1.0, 2);
    let before = grid.clone();

    assert!(grid.try_set(2, 0, 0, 1.0).is_err());
    assert_eq!(grid, before);
}

#[test]
#[should_panic(expected = "x, y, z coordinate of 0, 0, 9")]
fn test_get_panics_with_coordinates() {
    let grid = VoxelGrid::new(1.0, 1.0, 1.0, 2);
    grid.get(0, 0, 9);
}

#[test]
#[should_panic(expected = "exceeds voxel dimensions")]
fn test_set_panics_out_of_bounds() {
    let mut grid = VoxelGrid::new(1.0, 1.0, 1.0, 2);
    grid.set(0, 2, 0, 1.0);
}

// =============================================================================
// Extents and Resolution
// =============================================================================

#[test]
fn test_negative_extents_use_magnitude() {
    let a = VoxelGrid::new(-1.5, 2.0, -0.25, 4);
    let b = VoxelGrid::new(1.5, 2.0, 0.25, 4);
    assert_eq!(a.dimensions(), b.dimensions());
}

#[test]
fn test_fractional_extent_rounds_up() {
    let grid = VoxelGrid::new(0.01, 0.01, 0.01, 1);
    assert_eq!(grid.dimensions(), Dimensions::new(1, 1, 1));
    assert_eq!(grid.get(0, 0, 0), 0.0);
}

#[test]
fn test_zero_resolution_rejected_everywhere() {
    assert!(VoxelGrid::try_new(1.0, 1.0, 1.0, 0).is_err());
    assert!(VoxelGrid::with_dimensions(Dimensions::new(2, 2, 2), 0).is_err());
    assert!(VoxelGrid::from_cells(Dimensions::new(1, 1, 1), 0, vec![0.0]).is_err());
}

#[test]
fn test_empty_grid_operations() {
    let mut grid = VoxelGrid::new(0.0, 0.0, 0.0, 4);
    assert!(grid.is_empty());

    grid.fill(1.0).randomize(1).high_pass(0.5);
    assert!(grid.vertex_points().is_empty());
    assert!(grid.extract_surface(0.5).is_empty());
    assert!(grid.try_coordinate_of(0).is_err());
}

// =============================================================================
// Extraction Boundaries
// =============================================================================

#[test]
fn test_axis_length_one_yields_empty_mesh() {
    for dims in [
        Dimensions::new(1, 4, 4),
        Dimensions::new(4, 1, 4),
        Dimensions::new(4, 4, 1),
    ] {
        let grid = create_ramp_grid(dims);
        assert!(sequential(0.3).extract(&grid).is_empty(), "{:?}", dims);
    }
}

#[test]
fn test_axis_length_two_is_minimal() {
    let grid = create_ramp_grid(Dimensions::new(2, 2, 2));
    // Ramp 0.0 / 0.5 along x; iso 0.25 crosses the four x-edges
    let mesh = sequential(0.25).extract(&grid);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertex_count(), 4);
    for v in &mesh.vertices {
        assert!((v.x - 0.5).abs() < 1e-6);
    }
}

#[test]
fn test_iso_at_value_range_edges() {
    let mut grid = VoxelGrid::new(2.0, 2.0, 2.0, 2);
    grid.fill(1.0);
    // Nothing is strictly above 1.0
    assert!(grid.extract_surface(1.0).is_empty());

    grid.fill(0.0);
    grid.set(1, 1, 1, 1.0);
    // Everything is strictly above -0.0001
    assert!(grid.extract_surface(-0.0001).is_empty());
    assert!(!grid.extract_surface(0.0).is_empty());
}

#[test]
fn test_vertices_stay_inside_world_extents() {
    let mut grid = VoxelGrid::new(1.5, 1.0, 0.75, 4);
    grid.randomize(8);

    let extents = grid.world_extents();
    let mesh = grid.extract_surface(0.5);
    assert!(!mesh.is_empty());

    for v in &mesh.vertices {
        assert!(v.x >= 0.0 && v.x <= extents.x);
        assert!(v.y >= 0.0 && v.y <= extents.y);
        assert!(v.z >= 0.0 && v.z <= extents.z);
    }
}

#[test]
fn test_solid_on_boundary_is_open() {
    // Solid voxels on the outer face have no cube beyond them, so the surface is open
    let mut grid = VoxelGrid::with_dimensions(Dimensions::new(3, 3, 3), 1).unwrap();
    grid.set(0, 0, 0, 1.0);

    let mesh = grid.extract_surface(0.5);
    assert_eq!(mesh.triangle_count(), 1);
}

// =============================================================================
// Malformed Buffers
// =============================================================================

#[test]
fn test_undersized_view_skips_incomplete_cubes() {
    let dims = Dimensions::new(2, 2, 3);
    let mut cells = vec![0.0f32; dims.volume()];
    cells[0] = 1.0; // solid corner in the z = 0 slab
    cells[dims.volume() - 1] = 1.0; // solid corner in the z = 1 slab

    // z = 2 plane missing entirely except its first voxel
    let view = FieldView::new(&cells[..9], dims, 1);
    let mesh = sequential(0.5).extract(&view);

    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(view.value(VoxelCoord::new(1, 1, 2)), None);
}

#[test]
fn test_empty_view_is_empty() {
    let view = FieldView::new(&[], Dimensions::new(8, 8, 8), 1);
    assert!(sequential(0.5).extract(&view).is_empty());
}

#[test]
fn test_oversized_view_ignores_tail() {
    let mut cells = vec![0.0f32; 8];
    cells[0] = 1.0;
    cells.extend([1.0; 4]);

    let view = FieldView::new(&cells, Dimensions::new(2, 2, 2), 1);
    let mesh = sequential(0.5).extract(&view);
    assert_eq!(mesh.triangle_count(), 1);
    assert!(mesh.vertices.iter().all(|v| *v != Point3::default()));
}
