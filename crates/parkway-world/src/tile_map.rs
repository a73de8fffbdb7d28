//! Tile storage: surfaces, stacked elements, and element capacity.
//!
//! Capacity is tracked the way a fixed-size element pool would be. Removing
//! an element leaves its slot stale until [`TileMap::reorganise`] compacts
//! the pool, so a pool that looks full may still have room once
//! reorganised. Query-side checks count stale slots as reclaimable; only the
//! mutating path actually reorganises.

use std::collections::BTreeMap;

use parkway_types::{LAND_HEIGHT_STEP, TileCoords};
use serde::{Deserialize, Serialize};

use crate::element::TileElement;
use crate::error::WorldError;

/// Land ownership of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ownership {
    /// Not owned by the park.
    Unowned,
    /// Owned outright.
    Owned,
    /// Only the right to build above or below the surface.
    ConstructionRights,
}

/// The land surface of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Surface {
    /// Height of the land, in world units.
    pub base_z: i32,
    /// Height of the water surface; `0` means no water.
    pub water_z: i32,
    /// Park ownership.
    pub ownership: Ownership,
}

/// A map tile: its surface and everything stacked on it, bottom to top.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Land surface.
    pub surface: Surface,
    /// Elements in insertion order.
    pub elements: Vec<TileElement>,
}

/// Parameters for generating a flat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapSettings {
    /// Tiles per side.
    pub size: i32,
    /// Element slots in the whole pool.
    pub max_elements: usize,
    /// Elements allowed on one tile.
    pub max_elements_per_tile: usize,
    /// Initial land height, in world units.
    pub base_height: i32,
    /// Initial water height; `0` means dry land.
    pub water_height: i32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            size: 64,
            max_elements: 4096,
            max_elements_per_tile: 16,
            base_height: 112,
            water_height: 0,
        }
    }
}

/// All tiles plus the element pool accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    size: i32,
    tiles: BTreeMap<TileCoords, Tile>,
    max_elements: usize,
    max_elements_per_tile: usize,
    live: usize,
    stale: usize,
}

impl TileMap {
    /// Generate a flat, park-owned map.
    pub fn new(settings: &MapSettings) -> Self {
        let size = settings.size.max(0);
        let mut tiles = BTreeMap::new();
        for y in 0..size {
            for x in 0..size {
                tiles.insert(
                    TileCoords::new(x, y),
                    Tile {
                        surface: Surface {
                            base_z: settings.base_height,
                            water_z: settings.water_height,
                            ownership: Ownership::Owned,
                        },
                        elements: Vec::new(),
                    },
                );
            }
        }
        Self {
            size,
            tiles,
            max_elements: settings.max_elements,
            max_elements_per_tile: settings.max_elements_per_tile,
            live: 0,
            stale: 0,
        }
    }

    /// Tiles per side.
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Whether the tile lies on the map.
    pub const fn contains(&self, tile: TileCoords) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.size && tile.y < self.size
    }

    /// Look up a tile.
    pub fn tile(&self, tile: TileCoords) -> Option<&Tile> {
        self.tiles.get(&tile)
    }

    /// Look up a tile mutably.
    pub fn tile_mut(&mut self, tile: TileCoords) -> Option<&mut Tile> {
        self.tiles.get_mut(&tile)
    }

    /// Iterate every tile in coordinate order.
    pub fn tiles(&self) -> impl Iterator<Item = (&TileCoords, &Tile)> {
        self.tiles.iter()
    }

    /// Elements currently stored.
    pub const fn live_elements(&self) -> usize {
        self.live
    }

    /// Slots freed by removals but not yet reclaimed.
    pub const fn stale_elements(&self) -> usize {
        self.stale
    }

    /// Whether one more element fits on `tile`, counting stale slots as
    /// reclaimable. Never mutates. Off-map tiles only check the pool; bounds
    /// are the caller's concern.
    pub fn has_free_elements(&self, tile: TileCoords) -> bool {
        let tile_has_room = self
            .tiles
            .get(&tile)
            .is_none_or(|t| t.elements.len() < self.max_elements_per_tile);
        self.live < self.max_elements && tile_has_room
    }

    /// Like [`has_free_elements`](Self::has_free_elements), but reclaims
    /// stale slots first when the pool is otherwise exhausted.
    pub fn check_capacity_and_reorganise(&mut self, tile: TileCoords) -> bool {
        if self.live.saturating_add(self.stale) >= self.max_elements {
            self.reorganise();
        }
        self.has_free_elements(tile)
    }

    /// Compact the pool, reclaiming every stale slot.
    pub fn reorganise(&mut self) {
        if self.stale > 0 {
            tracing::debug!(reclaimed = self.stale, "Element pool reorganised");
        }
        self.stale = 0;
    }

    /// Append an element to a tile and return its index, reorganising first
    /// if only stale slots are left.
    pub fn insert(&mut self, tile: TileCoords, element: TileElement) -> Result<usize, WorldError> {
        if self.live.saturating_add(self.stale) >= self.max_elements {
            self.reorganise();
        }
        let pool_full = self.live >= self.max_elements;
        let limit = self.max_elements;
        let live = self.live;
        let per_tile = self.max_elements_per_tile;
        let t = self
            .tiles
            .get_mut(&tile)
            .ok_or(WorldError::TileOutOfBounds(tile))?;
        if pool_full || t.elements.len() >= per_tile {
            return Err(WorldError::ElementLimitReached { tile, live, limit });
        }
        t.elements.push(element);
        self.live = self.live.saturating_add(1);
        Ok(t.elements.len().saturating_sub(1))
    }

    /// Remove the element at `index` on `tile`, leaving its slot stale.
    pub fn remove(&mut self, tile: TileCoords, index: usize) -> Result<TileElement, WorldError> {
        let t = self
            .tiles
            .get_mut(&tile)
            .ok_or(WorldError::TileOutOfBounds(tile))?;
        if index >= t.elements.len() {
            return Err(WorldError::ElementNotFound { tile, index });
        }
        let removed = t.elements.remove(index);
        self.live = self.live.saturating_sub(1);
        self.stale = self.stale.saturating_add(1);
        Ok(removed)
    }

    /// Remove every element on `tile` matching `predicate`; returns how many went.
    pub fn remove_where(
        &mut self,
        tile: TileCoords,
        mut predicate: impl FnMut(&TileElement) -> bool,
    ) -> usize {
        let Some(t) = self.tiles.get_mut(&tile) else {
            return 0;
        };
        let before = t.elements.len();
        t.elements.retain(|e| !predicate(e));
        let removed = before.saturating_sub(t.elements.len());
        self.live = self.live.saturating_sub(removed);
        self.stale = self.stale.saturating_add(removed);
        removed
    }

    /// Whether the park may build at height `z` on `tile`.
    ///
    /// Owned land always qualifies. Construction rights only allow building
    /// below the surface or clear above it.
    pub fn is_location_owned(&self, tile: TileCoords, z: i32) -> bool {
        let Some(t) = self.tiles.get(&tile) else {
            return false;
        };
        match t.surface.ownership {
            Ownership::Owned => true,
            Ownership::ConstructionRights => {
                let surface = t.surface.base_z;
                z < surface || z.saturating_sub(LAND_HEIGHT_STEP) > surface
            }
            Ownership::Unowned => false,
        }
    }
}
