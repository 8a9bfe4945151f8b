//! Surface extraction configuration.

/// Parameters for [`SurfaceExtractor`](crate::SurfaceExtractor).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractorConfig {
    /// Threshold separating solid (`> iso_value`) from empty voxels.
    pub iso_value: f32,
    /// Merge vertices that lie on the same grid edge into one shared vertex.
    pub weld_vertices: bool,
    /// March z-slabs on the rayon thread pool. Ignored without the `parallel` feature.
    pub parallel: bool,
    /// Grids with fewer march cubes than this run sequentially.
    pub min_parallel_cubes: usize,
}

impl ExtractorConfig {
    /// Create a configuration with the given iso-value and default options.
    #[inline]
    pub const fn new(iso_value: f32) -> Self {
        Self {
            iso_value,
            weld_vertices: true,
            parallel: cfg!(feature = "parallel"),
            min_parallel_cubes: 4096,
        }
    }

    /// Set the iso-value.
    #[inline]
    pub const fn with_iso_value(mut self, iso_value: f32) -> Self {
        self.iso_value = iso_value;
        self
    }

    /// Enable or disable vertex welding.
    #[inline]
    pub const fn with_weld_vertices(mut self, weld: bool) -> Self {
        self.weld_vertices = weld;
        self
    }

    /// Enable or disable parallel extraction.
    #[inline]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the cube-count threshold for parallel extraction.
    #[inline]
    pub const fn with_min_parallel_cubes(mut self, cubes: usize) -> Self {
        self.min_parallel_cubes = cubes;
        self
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::new(0.5)
    }
}
