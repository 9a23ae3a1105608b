//! Continuous and voxel coordinates.
//!
//! The world session reports the avatar and entities as continuous
//! [`Vec3`] positions; blocks live on the integer [`BlockPos`] lattice.
//! A continuous position belongs to the voxel obtained by flooring each
//! axis independently.

use serde::{Deserialize, Serialize};

/// A point (or direction) in continuous world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// East-west axis.
    pub x: f64,
    /// Vertical axis.
    pub y: f64,
    /// North-south axis.
    pub z: f64,
}

impl Vec3 {
    /// The origin / zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Construct a vector from its three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Return this point shifted by the given per-axis deltas.
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Return this point shifted by another vector.
    pub fn add(self, other: Self) -> Self {
        self.offset(other.x, other.y, other.z)
    }

    /// Straight-line (Euclidean) distance to another point.
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// The point `distance` units away in the horizontal facing direction
    /// `yaw` (radians), keeping the vertical component.
    ///
    /// Yaw 0 faces +x; increasing yaw rotates toward +z.
    pub fn forward(self, yaw: f64, distance: f64) -> Self {
        Self::new(
            self.x + yaw.cos() * distance,
            self.y,
            self.z + yaw.sin() * distance,
        )
    }

    /// The voxel containing this point.
    ///
    /// Components outside the `i32` range saturate.
    #[allow(clippy::cast_possible_truncation)]
    pub fn floored(self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    /// Whether every component is finite (no NaN or infinity).
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl core::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Integer coordinates of one voxel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl BlockPos {
    /// Construct a voxel coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return the voxel shifted by integer deltas, saturating at the `i32`
    /// bounds.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }
}

impl core::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
