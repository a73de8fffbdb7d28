//! Tile elements: everything stacked on a tile above its surface.

use parkway_types::{Direction, EntranceType, Money, RideId, StationIndex, StringId};
use serde::{Deserialize, Serialize};

/// Quadrant mask covering a whole tile.
pub const FULL_TILE_QUADRANTS: u8 = 0b1111;

/// One element stacked on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileElement {
    /// Bottom of the element, in world units.
    pub base_z: i32,
    /// Top of the element (exclusive), in world units.
    pub clearance_z: i32,
    /// Facing.
    pub direction: Direction,
    /// Which quarters of the tile the element occupies.
    pub quadrants: u8,
    /// Preview element that must not have persistent side effects.
    pub ghost: bool,
    /// What the element is.
    pub kind: ElementKind,
}

impl TileElement {
    /// Whether the element occupies any part of `[base_z, clearance_z)` in
    /// any of the quarters in `quadrants`.
    pub const fn intersects(&self, base_z: i32, clearance_z: i32, quadrants: u8) -> bool {
        self.quadrants & quadrants != 0 && self.base_z < clearance_z && base_z < self.clearance_z
    }

    /// The entrance payload, if this is a ride entrance or exit.
    pub const fn as_entrance(&self) -> Option<&EntranceElement> {
        match &self.kind {
            ElementKind::Entrance(entrance) => Some(entrance),
            _ => None,
        }
    }

    /// The footpath payload, if this is a footpath.
    pub const fn as_path(&self) -> Option<&PathElement> {
        match &self.kind {
            ElementKind::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Mutable footpath payload, if this is a footpath.
    pub const fn as_path_mut(&mut self) -> Option<&mut PathElement> {
        match &mut self.kind {
            ElementKind::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Mutable track payload, if this is ride track.
    pub const fn as_track_mut(&mut self) -> Option<&mut TrackElement> {
        match &mut self.kind {
            ElementKind::Track(track) => Some(track),
            _ => None,
        }
    }
}

/// The payload of a [`TileElement`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A ride entrance or exit.
    Entrance(EntranceElement),
    /// A footpath or queue tile.
    Path(PathElement),
    /// A piece of ride track (including maze hedges).
    Track(TrackElement),
    /// A wall along a tile edge.
    Wall,
    /// Removable small scenery.
    SmallScenery(SceneryElement),
}

impl ElementKind {
    /// Catalog name used in "{STRINGID} in the way".
    pub const fn name(&self) -> StringId {
        match self {
            Self::Entrance(_) => StringId::ElementEntrance,
            Self::Path(_) => StringId::ElementFootpath,
            Self::Track(_) => StringId::ElementTrack,
            Self::Wall => StringId::ElementWall,
            Self::SmallScenery(_) => StringId::ElementScenery,
        }
    }
}

/// A ride entrance or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntranceElement {
    /// Entrance or exit.
    pub entrance_type: EntranceType,
    /// Owning ride.
    pub ride: RideId,
    /// Owning station.
    pub station: StationIndex,
}

/// A footpath tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PathElement {
    /// Queue line rather than a plain path.
    pub is_queue: bool,
    /// Connected edges, one bit per [`Direction`].
    pub edges: u8,
    /// The ride and station this queue leads to, once chained.
    pub queue_for: Option<(RideId, StationIndex)>,
}

/// A piece of ride track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackElement {
    /// Owning ride.
    pub ride: RideId,
    /// Hedge walls standing on each edge (maze track only), one bit per [`Direction`].
    pub hedges: u8,
}

/// Small scenery that clearance may remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneryElement {
    /// Cost charged to clear it.
    pub removal_price: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(base_z: i32, clearance_z: i32, quadrants: u8) -> TileElement {
        TileElement {
            base_z,
            clearance_z,
            direction: Direction::from_masked(0),
            quadrants,
            ghost: false,
            kind: ElementKind::Wall,
        }
    }

    #[test]
    fn intersection_needs_height_and_quadrant_overlap() {
        let element = wall(16, 64, 0b0001);
        assert!(element.intersects(32, 48, FULL_TILE_QUADRANTS));
        assert!(!element.intersects(32, 48, 0b0010));
        assert!(!element.intersects(64, 96, FULL_TILE_QUADRANTS));
    }

    #[test]
    fn kinds_name_themselves() {
        assert_eq!(ElementKind::Wall.name(), StringId::ElementWall);
        let path = ElementKind::Path(PathElement::default());
        assert_eq!(path.name(), StringId::ElementFootpath);
    }
}
