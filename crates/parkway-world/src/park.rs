//! The in-memory park: one owner for every piece of state a command touches.
//!
//! [`ParkWorld`] implements both collaborator traits. Commands never see it
//! directly; Query gets it as `&dyn WorldRead` and Execute as
//! `&mut dyn WorldWrite`.

use std::collections::{BTreeMap, BTreeSet};

use parkway_types::{
    AgentId, AnimationKind, CommandFlags, CoordsXYZ, Direction, EntranceType, LAND_HEIGHT_STEP,
    Money, RideId, RideKind, StationIndex, TileCoords,
};

use crate::access::{
    ClearanceCheck, ClearanceFailure, ClearanceRequest, ElementIndex, WorldRead, WorldWrite,
};
use crate::agent::{Agent, Litter};
use crate::clearance::plan_clearance;
use crate::element::{
    ElementKind, FULL_TILE_QUADRANTS, PathElement, SceneryElement, TileElement, TrackElement,
};
use crate::error::WorldError;
use crate::footpath::{self, QueueChainStart};
use crate::hash::StateHasher;
use crate::ride::Ride;
use crate::tile_map::{MapSettings, Ownership, TileMap};

/// Height a wall occupies above its base, in world units.
const WALL_CLEAR_HEIGHT: i32 = 48;

/// Height of a footpath or track piece, in world units.
const FLAT_PIECE_HEIGHT: i32 = 32;

/// Hedge mask with a hedge on every edge.
const ALL_HEDGES: u8 = 0b1111;

/// A registered periodic animation.
pub type Animation = (AnimationKind, CoordsXYZ);

/// The whole mutable park state.
#[derive(Debug, Clone)]
pub struct ParkWorld {
    map: TileMap,
    rides: BTreeMap<RideId, Ride>,
    agents: BTreeMap<AgentId, Agent>,
    litter: Vec<Litter>,
    animations: BTreeSet<Animation>,
    queue_chains: Vec<QueueChainStart>,
    invalidated: BTreeSet<TileCoords>,
    sandbox_mode: bool,
}

impl ParkWorld {
    /// An empty park on a freshly generated flat map.
    pub fn new(settings: &MapSettings) -> Self {
        Self {
            map: TileMap::new(settings),
            rides: BTreeMap::new(),
            agents: BTreeMap::new(),
            litter: Vec::new(),
            animations: BTreeSet::new(),
            queue_chains: Vec::new(),
            invalidated: BTreeSet::new(),
            sandbox_mode: false,
        }
    }

    /// Turn the ownership bypass on or off.
    pub const fn set_sandbox_mode(&mut self, enabled: bool) {
        self.sandbox_mode = enabled;
    }

    /// Register a ride.
    pub fn add_ride(&mut self, ride: Ride) -> Result<(), WorldError> {
        if self.rides.contains_key(&ride.id) {
            return Err(WorldError::DuplicateRide(ride.id));
        }
        self.rides.insert(ride.id, ride);
        Ok(())
    }

    /// Register a visitor.
    pub fn add_agent(&mut self, agent: Agent) -> Result<(), WorldError> {
        if self.agents.contains_key(&agent.id) {
            return Err(WorldError::DuplicateAgent(agent.id));
        }
        self.agents.insert(agent.id, agent);
        Ok(())
    }

    /// Place an arbitrary element, bypassing every construction rule.
    pub fn place_element(
        &mut self,
        tile: TileCoords,
        element: TileElement,
    ) -> Result<ElementIndex, WorldError> {
        self.map.insert(tile, element)
    }

    /// Lay a footpath or queue tile.
    pub fn add_path(
        &mut self,
        tile: TileCoords,
        z: i32,
        is_queue: bool,
        edges: u8,
    ) -> Result<ElementIndex, WorldError> {
        self.place_element(
            tile,
            flat_piece(
                z,
                ElementKind::Path(PathElement {
                    is_queue,
                    edges,
                    queue_for: None,
                }),
            ),
        )
    }

    /// Lay a piece of ride track. Maze track starts with every hedge standing.
    pub fn add_track(&mut self, tile: TileCoords, z: i32, ride: RideId) -> Result<ElementIndex, WorldError> {
        let hedges = match self.rides.get(&ride).map(|r| r.kind) {
            Some(RideKind::Maze) => ALL_HEDGES,
            _ => 0,
        };
        self.place_element(
            tile,
            flat_piece(z, ElementKind::Track(TrackElement { ride, hedges })),
        )
    }

    /// Build a wall.
    pub fn add_wall(&mut self, tile: TileCoords, z: i32) -> Result<ElementIndex, WorldError> {
        let mut wall = flat_piece(z, ElementKind::Wall);
        wall.clearance_z = z.saturating_add(WALL_CLEAR_HEIGHT);
        self.place_element(tile, wall)
    }

    /// Plant removable scenery.
    pub fn add_scenery(
        &mut self,
        tile: TileCoords,
        z: i32,
        removal_price: Money,
    ) -> Result<ElementIndex, WorldError> {
        self.place_element(
            tile,
            flat_piece(z, ElementKind::SmallScenery(SceneryElement { removal_price })),
        )
    }

    /// Drop litter.
    pub fn add_litter(&mut self, tile: TileCoords, z: i32) {
        self.litter.push(Litter { tile, z });
    }

    /// Change who owns a tile.
    pub fn set_ownership(&mut self, tile: TileCoords, ownership: Ownership) -> Result<(), WorldError> {
        let t = self
            .map
            .tile_mut(tile)
            .ok_or(WorldError::TileOutOfBounds(tile))?;
        t.surface.ownership = ownership;
        Ok(())
    }

    /// Flood (or drain, with `0`) a tile.
    pub fn set_water_height(&mut self, tile: TileCoords, water_z: i32) -> Result<(), WorldError> {
        let t = self
            .map
            .tile_mut(tile)
            .ok_or(WorldError::TileOutOfBounds(tile))?;
        t.surface.water_z = water_z;
        Ok(())
    }

    /// Tile storage.
    pub const fn map(&self) -> &TileMap {
        &self.map
    }

    /// Every ride, by index.
    pub const fn rides(&self) -> &BTreeMap<RideId, Ride> {
        &self.rides
    }

    /// Look up a visitor.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Litter still lying around.
    pub fn litter(&self) -> &[Litter] {
        &self.litter
    }

    /// Registered animations.
    pub const fn animations(&self) -> &BTreeSet<Animation> {
        &self.animations
    }

    /// Tiles marked for redraw since the last [`take_invalidated`](Self::take_invalidated).
    pub const fn invalidated(&self) -> &BTreeSet<TileCoords> {
        &self.invalidated
    }

    /// Hand the redraw set to the renderer, clearing it.
    pub fn take_invalidated(&mut self) -> BTreeSet<TileCoords> {
        core::mem::take(&mut self.invalidated)
    }

    /// The element stack on a tile; empty off the map.
    pub fn elements_at(&self, tile: TileCoords) -> &[TileElement] {
        self.map.tile(tile).map_or(&[], |t| t.elements.as_slice())
    }

    /// Count entrance or exit elements belonging to a station, anywhere on the map.
    pub fn count_entrance_elements(
        &self,
        ride: RideId,
        station: StationIndex,
        entrance_type: EntranceType,
    ) -> usize {
        self.map
            .tiles()
            .flat_map(|(_, t)| t.elements.iter())
            .filter_map(TileElement::as_entrance)
            .filter(|e| e.ride == ride && e.station == station && e.entrance_type == entrance_type)
            .count()
    }

    /// Remove every ghost element, as when a preview is discarded.
    ///
    /// Station locations pointing at a removed ghost entrance or exit are
    /// cleared too. Returns how many elements went.
    pub fn remove_ghosts(&mut self) -> usize {
        let mut ghost_entrances = Vec::new();
        let mut ghost_tiles = Vec::new();
        for (tile, t) in self.map.tiles() {
            let mut has_ghost = false;
            for element in t.elements.iter().filter(|e| e.ghost) {
                has_ghost = true;
                if let Some(entrance) = element.as_entrance() {
                    ghost_entrances.push((*tile, element.base_z, *entrance));
                }
            }
            if has_ghost {
                ghost_tiles.push(*tile);
            }
        }

        for (tile, z, entrance) in ghost_entrances {
            let Some(ride) = self.rides.get_mut(&entrance.ride) else {
                continue;
            };
            let exit = entrance.entrance_type.is_exit();
            let current = if exit {
                ride.exit_location(entrance.station)
            } else {
                ride.entrance_location(entrance.station)
            };
            if current.is_some_and(|loc| loc.tile() == tile && loc.z == z) {
                if exit {
                    ride.set_exit_location(entrance.station, None);
                } else {
                    ride.set_entrance_location(entrance.station, None);
                }
            }
        }

        let mut removed = 0_usize;
        for tile in ghost_tiles {
            removed = removed.saturating_add(self.map.remove_where(tile, |e| e.ghost));
            self.invalidated.insert(tile);
        }
        if removed > 0 {
            tracing::debug!(removed, "Ghost elements removed");
        }
        removed
    }

    /// Checksum of everything that affects simulation outcome.
    ///
    /// Redraw state and element pool bookkeeping are excluded: neither
    /// changes what a later command does.
    pub fn checksum(&self) -> u64 {
        use core::hash::{Hash, Hasher};

        let mut hasher = StateHasher::new();
        self.map.size().hash(&mut hasher);
        for (coords, tile) in self.map.tiles() {
            coords.hash(&mut hasher);
            tile.hash(&mut hasher);
        }
        for ride in self.rides.values() {
            ride.hash(&mut hasher);
        }
        for agent in self.agents.values() {
            agent.hash(&mut hasher);
        }
        self.litter.hash(&mut hasher);
        for animation in &self.animations {
            animation.hash(&mut hasher);
        }
        self.sandbox_mode.hash(&mut hasher);
        hasher.finish()
    }

    fn entrance_on_maze(&self, tile: TileCoords, index: ElementIndex) -> bool {
        self.map
            .tile(tile)
            .and_then(|t| t.elements.get(index))
            .and_then(TileElement::as_entrance)
            .and_then(|e| self.rides.get(&e.ride))
            .is_some_and(|ride| ride.kind == RideKind::Maze)
    }
}

const fn flat_piece(z: i32, kind: ElementKind) -> TileElement {
    TileElement {
        base_z: z,
        clearance_z: z.saturating_add(FLAT_PIECE_HEIGHT),
        direction: Direction::from_masked(0),
        quadrants: FULL_TILE_QUADRANTS,
        ghost: false,
        kind,
    }
}

impl WorldRead for ParkWorld {
    fn ride(&self, id: RideId) -> Option<&Ride> {
        self.rides.get(&id)
    }

    fn has_free_elements(&self, tile: TileCoords) -> bool {
        self.map.has_free_elements(tile)
    }

    fn is_location_valid(&self, tile: TileCoords) -> bool {
        self.map.contains(tile)
    }

    fn is_location_owned(&self, tile: TileCoords, z: i32) -> bool {
        self.map.is_location_owned(tile, z)
    }

    fn sandbox_mode(&self) -> bool {
        self.sandbox_mode
    }

    fn check_clearance(&self, request: &ClearanceRequest) -> Result<ClearanceCheck, ClearanceFailure> {
        plan_clearance(&self.map, request).map(|plan| plan.check)
    }

    fn surface_height(&self, tile: TileCoords) -> Option<i32> {
        self.map.tile(tile).map(|t| t.surface.base_z)
    }

    fn element(&self, tile: TileCoords, index: ElementIndex) -> Option<&TileElement> {
        self.map.tile(tile)?.elements.get(index)
    }

    fn find_entrance_element(
        &self,
        tile: TileCoords,
        ride: RideId,
        station: StationIndex,
        entrance_type: EntranceType,
        flags: CommandFlags,
    ) -> Option<ElementIndex> {
        let elements = self.map.tile(tile)?.elements.as_slice();
        let mut matching = elements.iter().enumerate().filter(|(_, e)| {
            e.as_entrance().is_some_and(|entrance| {
                entrance.ride == ride
                    && entrance.station == station
                    && entrance.entrance_type == entrance_type
            })
        });
        if flags.is_ghost() {
            let all: Vec<_> = matching.collect();
            all.iter()
                .find(|(_, e)| e.ghost)
                .or_else(|| all.first())
                .map(|(index, _)| *index)
        } else {
            matching.next().map(|(index, _)| index)
        }
    }
}

impl WorldWrite for ParkWorld {
    fn ride_mut(&mut self, id: RideId) -> Option<&mut Ride> {
        self.rides.get_mut(&id)
    }

    fn check_capacity_and_reorganise(&mut self, tile: TileCoords) -> bool {
        self.map.check_capacity_and_reorganise(tile)
    }

    fn clear_for_construction(
        &mut self,
        request: &ClearanceRequest,
    ) -> Result<ClearanceCheck, ClearanceFailure> {
        let plan = plan_clearance(&self.map, request)?;
        if request.flags.contains(CommandFlags::APPLY) && !request.flags.is_ghost() {
            for &index in plan.removable.iter().rev() {
                if let Err(error) = self.map.remove(request.volume.tile, index) {
                    tracing::error!(%error, "Failed to clear scenery");
                }
            }
            if !plan.removable.is_empty() {
                self.invalidated.insert(request.volume.tile);
            }
        }
        Ok(plan.check)
    }

    fn insert_element(
        &mut self,
        tile: TileCoords,
        element: TileElement,
    ) -> Result<ElementIndex, WorldError> {
        self.map.insert(tile, element)
    }

    fn remove_element(
        &mut self,
        tile: TileCoords,
        index: ElementIndex,
    ) -> Result<TileElement, WorldError> {
        self.map.remove(tile, index)
    }

    fn clear_ride_for_construction(&mut self, ride: RideId) {
        if let Some(ride) = self.rides.get_mut(&ride) {
            ride.clear_for_construction();
        }
    }

    fn evict_ride_agents(&mut self, ride: RideId) -> usize {
        let mut evicted = 0_usize;
        for agent in self.agents.values_mut() {
            if agent.current_ride == Some(ride) {
                agent.evict();
                evicted = evicted.saturating_add(1);
            }
        }
        if let Some(r) = self.rides.get_mut(&ride) {
            for station in &mut r.stations {
                station.queue_length = 0;
                station.last_agent_in_queue = None;
            }
        }
        if evicted > 0 {
            tracing::debug!(ride = %ride, evicted, "Agents evicted from ride");
        }
        evicted
    }

    fn invalidate_ride_test_results(&mut self, ride: RideId) {
        if let Some(ride) = self.rides.get_mut(&ride) {
            ride.invalidate_test_results();
        }
    }

    fn remove_litter(&mut self, tile: TileCoords, z: i32) {
        let reach = LAND_HEIGHT_STEP.unsigned_abs();
        self.litter
            .retain(|l| l.tile != tile || l.z.abs_diff(z) > reach);
    }

    fn remove_walls_at_z(&mut self, tile: TileCoords, z: i32) {
        let top = z.saturating_add(WALL_CLEAR_HEIGHT);
        let removed = self.map.remove_where(tile, |e| {
            matches!(e.kind, ElementKind::Wall) && e.intersects(z, top, FULL_TILE_QUADRANTS)
        });
        if removed > 0 {
            self.invalidated.insert(tile);
        }
    }

    fn reset_queue_chains(&mut self) {
        self.queue_chains.clear();
    }

    fn update_queue_chains(&mut self) {
        footpath::update_queue_chains(&mut self.map, &mut self.queue_chains);
    }

    fn connect_footpath_edges(&mut self, tile: TileCoords, index: ElementIndex, flags: CommandFlags) {
        if flags.is_ghost() {
            return;
        }
        if let Some(start) = footpath::connect_edges(&mut self.map, tile, index) {
            self.queue_chains.push(start);
        }
    }

    fn remove_footpath_edges(&mut self, tile: TileCoords, index: ElementIndex) {
        footpath::remove_edges(&mut self.map, tile, index);
    }

    fn remove_maze_hedges(&mut self, tile: TileCoords, index: ElementIndex) {
        if self.entrance_on_maze(tile, index) {
            footpath::set_maze_hedge(&mut self.map, tile, index, false);
        }
    }

    fn replace_maze_hedges(&mut self, tile: TileCoords, index: ElementIndex) {
        if self.entrance_on_maze(tile, index) {
            footpath::set_maze_hedge(&mut self.map, tile, index, true);
        }
    }

    fn create_animation(&mut self, kind: AnimationKind, position: CoordsXYZ) {
        self.animations.insert((kind, position));
    }

    fn invalidate_tile(&mut self, tile: TileCoords) {
        self.invalidated.insert(tile);
    }
}
