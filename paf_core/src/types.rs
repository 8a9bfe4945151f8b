//! Core types for paf_core voxel operations.
//!
//! Provides the scalar voxel type, grid coordinates and dimensions, and the point type
//! used for mesh vertices throughout the toolchain.

use core::ops::{Add, Div, Mul, Sub};

/// A single voxel sample: normalized density/occupancy at the voxel center.
///
/// Mutators that normalize (fill, randomize, high-pass) keep values in `[0, 1]`;
/// direct writes are stored as given.
pub type Voxel = f32;

/// A point (or vector) in grid or world space.
///
/// Mesh vertices, interpolation endpoints and bounding boxes all use this type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All three components equal to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// The components as `[x, y, z]`.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    #[inline]
    fn zip_with(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(f(self.x, other.x), f(self.y, other.y), f(self.z, other.z))
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self.zip_with(other, |a, b| a + (b - a) * t)
    }

    /// Dot product, treating both points as vectors.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product, treating both points as vectors.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.dot(self))
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        self.zip_with(other, libm::fminf)
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        self.zip_with(other, libm::fmaxf)
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3> for [f32; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl From<VoxelCoord> for Point3 {
    #[inline]
    fn from(c: VoxelCoord) -> Self {
        Self::new(c.x as f32, c.y as f32, c.z as f32)
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.map(|a| a * rhs)
    }
}

impl Div<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.map(|a| a / rhs)
    }
}

/// Integer voxel coordinates inside a dense grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate (0 to width-1).
    pub x: u32,
    /// Y coordinate (0 to height-1).
    pub y: u32,
    /// Z coordinate (0 to depth-1).
    pub z: u32,
}

impl VoxelCoord {
    /// Create a new VoxelCoord.
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }

    /// Offset by a marching-cubes corner offset (each component 0 or 1).
    #[inline]
    pub const fn offset(self, (dx, dy, dz): (u32, u32, u32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl From<[u32; 3]> for VoxelCoord {
    #[inline]
    fn from(arr: [u32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<(u32, u32, u32)> for VoxelCoord {
    #[inline]
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self { x, y, z }
    }
}

/// Voxel counts along each axis of a dense grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Voxels along X.
    pub width: u32,
    /// Voxels along Y.
    pub height: u32,
    /// Voxels along Z.
    pub depth: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[inline]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of voxels (`w * h * d`).
    #[inline]
    pub const fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// `w * h * d`, or `None` if the product does not fit in `usize`.
    #[inline]
    pub const fn checked_volume(&self) -> Option<usize> {
        match (self.width as usize).checked_mul(self.height as usize) {
            Some(plane) => plane.checked_mul(self.depth as usize),
            None => None,
        }
    }

    /// Whether `coord` lies inside these dimensions.
    #[inline]
    pub const fn contains(&self, coord: VoxelCoord) -> bool {
        coord.x < self.width && coord.y < self.height && coord.z < self.depth
    }

    /// Number of complete 2x2x2 march cubes along each axis.
    #[inline]
    pub const fn cube_counts(&self) -> (u32, u32, u32) {
        (
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
            self.depth.saturating_sub(1),
        )
    }

    /// Total number of complete march cubes.
    #[inline]
    pub const fn cube_volume(&self) -> usize {
        let (x, y, z) = self.cube_counts();
        x as usize * y as usize * z as usize
    }

    /// Whether at least one complete march cube exists.
    #[inline]
    pub const fn has_cubes(&self) -> bool {
        self.width >= 2 && self.height >= 2 && self.depth >= 2
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }
}

impl From<[u32; 3]> for Dimensions {
    #[inline]
    fn from(arr: [u32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}
