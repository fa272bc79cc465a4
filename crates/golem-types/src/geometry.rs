//! Voxel-grid geometry: block coordinates, continuous positions, and faces.
//!
//! The world is a grid of unit voxels addressed by integer [`BlockPos`]
//! coordinates. The agent itself moves through continuous space, so steering
//! and reach checks use the floating-point [`Position`]. A [`Face`] names one
//! of the six axis-aligned directions and is used as the placement normal
//! when attaching a new block to a support block.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An absolute voxel coordinate in the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BlockPos {
    /// East/west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North/south axis.
    pub z: i32,
}

impl BlockPos {
    /// Create a block position from its three components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return this position shifted by the given deltas.
    ///
    /// Saturates at the grid boundary rather than wrapping; planned
    /// structures near `i32` limits are clamped, not corrupted.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    /// Return the neighboring voxel in the direction of `face`.
    pub const fn neighbor(self, face: Face) -> Self {
        let (dx, dy, dz) = face.normal();
        self.offset(dx, dy, dz)
    }

    /// The continuous center point of this voxel.
    ///
    /// Used when orienting toward a block or steering into placement reach.
    pub fn center(self) -> Position {
        Position {
            x: f64::from(self.x) + 0.5,
            y: f64::from(self.y) + 0.5,
            z: f64::from(self.z) + 0.5,
        }
    }
}

impl core::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// A continuous point in world space (the agent's own coordinate system).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// East/west axis.
    pub x: f64,
    /// Vertical axis.
    pub y: f64,
    /// North/south axis.
    pub z: f64,
}

impl Position {
    /// Create a position from its three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line (Euclidean) distance to another position.
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// The voxel containing this position (component-wise floor).
    pub fn block(self) -> BlockPos {
        BlockPos {
            x: floor_to_i32(self.x),
            y: floor_to_i32(self.y),
            z: floor_to_i32(self.z),
        }
    }
}

/// Floor a world coordinate to its voxel index, saturating at grid bounds.
#[allow(clippy::cast_possible_truncation)] // saturating float-to-int cast is the intended clamp
fn floor_to_i32(v: f64) -> i32 {
    v.floor() as i32
}

/// One of the six axis-aligned face directions of a voxel.
///
/// When placing a block, the face is the normal pointing from the support
/// block toward the voxel being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Face {
    /// Toward positive x.
    PosX,
    /// Toward negative x.
    NegX,
    /// Toward positive y (up).
    PosY,
    /// Toward negative y (down).
    NegY,
    /// Toward positive z.
    PosZ,
    /// Toward negative z.
    NegZ,
}

impl Face {
    /// The unit normal vector of this face as integer components.
    pub const fn normal(self) -> (i32, i32, i32) {
        match self {
            Self::PosX => (1, 0, 0),
            Self::NegX => (-1, 0, 0),
            Self::PosY => (0, 1, 0),
            Self::NegY => (0, -1, 0),
            Self::PosZ => (0, 0, 1),
            Self::NegZ => (0, 0, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_follows_face_normal() {
        let pos = BlockPos::new(10, 64, -3);
        assert_eq!(pos.neighbor(Face::PosY), BlockPos::new(10, 65, -3));
        assert_eq!(pos.neighbor(Face::NegX), BlockPos::new(9, 64, -3));
        assert_eq!(pos.neighbor(Face::NegZ), BlockPos::new(10, 64, -4));
    }

    #[test]
    fn center_is_voxel_midpoint() {
        let center = BlockPos::new(0, 64, -2).center();
        assert!((center.x - 0.5).abs() < f64::EPSILON);
        assert!((center.y - 64.5).abs() < f64::EPSILON);
        assert!((center.z - -1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn block_floors_components() {
        let pos = Position::new(1.9, 64.2, -0.1);
        assert_eq!(pos.block(), BlockPos::new(1, 64, -1));
    }
}
