//! Tile and world coordinates.
//!
//! Commands address the map in tile coordinates. Heights are always in world
//! units (one land step is [`LAND_HEIGHT_STEP`] units, one storage step is
//! [`COORDS_Z_STEP`]). World XY positions are only produced for results,
//! where a position is reported at the centre of a tile.

use serde::{Deserialize, Serialize};

/// World units per tile along X and Y.
pub const COORDS_XY_STEP: i32 = 32;

/// World units per storage height step.
pub const COORDS_Z_STEP: i32 = 8;

/// World units per land height step (two storage steps).
pub const LAND_HEIGHT_STEP: i32 = 2 * COORDS_Z_STEP;

/// A cardinal direction, `0..=3`.
///
/// `0` faces -X, `1` faces +Y, `2` faces +X, `3` faces -Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Direction(u8);

impl Direction {
    /// All four directions in index order.
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Build a direction from a raw value, rejecting anything above 3.
    pub const fn new(value: u8) -> Option<Self> {
        if value < 4 { Some(Self(value)) } else { None }
    }

    /// Build a direction from the low two bits of a raw value.
    pub const fn from_masked(value: u8) -> Self {
        Self(value & 3)
    }

    /// Return the raw value.
    pub const fn into_inner(self) -> u8 {
        self.0
    }

    /// The opposite direction.
    pub const fn reverse(self) -> Self {
        Self((self.0 ^ 2) & 3)
    }

    /// Tile offset for one step in this direction.
    pub const fn tile_delta(self) -> (i32, i32) {
        match self.0 {
            0 => (-1, 0),
            1 => (0, 1),
            2 => (1, 0),
            _ => (0, -1),
        }
    }

    /// Bit for this direction in a 4-bit edge mask.
    pub const fn edge_bit(self) -> u8 {
        1 << self.0
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tile position on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileCoords {
    /// Tile column.
    pub x: i32,
    /// Tile row.
    pub y: i32,
}

impl TileCoords {
    /// Create a tile coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent tile one step in `direction`, or `None` on overflow.
    pub fn neighbour(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.tile_delta();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// World position of the tile centre at height `z`.
    pub fn centre_at(self, z: i32) -> Option<CoordsXYZ> {
        let half = COORDS_XY_STEP / 2;
        Some(CoordsXYZ {
            x: self.x.checked_mul(COORDS_XY_STEP)?.checked_add(half)?,
            y: self.y.checked_mul(COORDS_XY_STEP)?.checked_add(half)?,
            z,
        })
    }
}

impl core::fmt::Display for TileCoords {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A world-unit position with height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoordsXYZ {
    /// World X.
    pub x: i32,
    /// World Y.
    pub y: i32,
    /// World height.
    pub z: i32,
}

/// A tile position with a world height and a facing, as stored on a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileCoordsXYZD {
    /// Tile column.
    pub x: i32,
    /// Tile row.
    pub y: i32,
    /// World height of the element base.
    pub z: i32,
    /// Facing of the element.
    pub direction: Direction,
}

impl TileCoordsXYZD {
    /// Create a positioned, oriented tile coordinate.
    pub const fn new(tile: TileCoords, z: i32, direction: Direction) -> Self {
        Self {
            x: tile.x,
            y: tile.y,
            z,
            direction,
        }
    }

    /// Drop height and direction.
    pub const fn tile(self) -> TileCoords {
        TileCoords {
            x: self.x,
            y: self.y,
        }
    }
}

/// A 3D tile volume: one tile, from `base_z` (inclusive) to `clearance_z`
/// (exclusive), both in world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileVolume {
    /// The tile.
    pub tile: TileCoords,
    /// Bottom of the volume.
    pub base_z: i32,
    /// Top of the volume.
    pub clearance_z: i32,
}

impl TileVolume {
    /// Whether this volume vertically overlaps the half-open range `[base_z, clearance_z)`.
    pub const fn overlaps(&self, base_z: i32, clearance_z: i32) -> bool {
        self.base_z < clearance_z && base_z < self.clearance_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_rejects_out_of_range() {
        assert!(Direction::new(3).is_some());
        assert!(Direction::new(4).is_none());
        assert_eq!(Direction::from_masked(6).into_inner(), 2);
    }

    #[test]
    fn reverse_is_opposite() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.tile_delta();
            let (rx, ry) = dir.reverse().tile_delta();
            assert_eq!((dx + rx, dy + ry), (0, 0));
        }
    }

    #[test]
    fn tile_centre_is_half_a_tile_in() {
        let centre = TileCoords::new(10, 20).centre_at(112);
        assert_eq!(centre, Some(CoordsXYZ { x: 336, y: 656, z: 112 }));
    }

    #[test]
    fn neighbour_steps_one_tile() {
        let tile = TileCoords::new(5, 5);
        assert_eq!(tile.neighbour(Direction::ALL[0]), Some(TileCoords::new(4, 5)));
        assert_eq!(tile.neighbour(Direction::ALL[1]), Some(TileCoords::new(5, 6)));
        assert_eq!(TileCoords::new(i32::MAX, 0).neighbour(Direction::ALL[2]), None);
    }

    #[test]
    fn volume_overlap_is_half_open() {
        let volume = TileVolume {
            tile: TileCoords::new(0, 0),
            base_z: 16,
            clearance_z: 32,
        };
        assert!(volume.overlaps(24, 40));
        assert!(!volume.overlaps(32, 48));
        assert!(!volume.overlaps(0, 16));
    }
}
