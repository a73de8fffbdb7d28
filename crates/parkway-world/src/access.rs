//! The narrow interfaces commands use to reach world state.
//!
//! Query passes receive `&dyn WorldRead` and Execute passes receive
//! `&mut dyn WorldWrite`, so a Query that tried to mutate the world would
//! not compile. Every collaborator a command consumes (storage, ownership,
//! clearance, rides, footpaths, animations, redraw) is reached through one
//! of these two traits; [`ParkWorld`](crate::ParkWorld) is the in-memory
//! implementation.

use parkway_types::{
    AnimationKind, CommandFlags, CoordsXYZ, EntranceType, FormatArg, Money, RideId, StationIndex,
    StringId, TileCoords, TileVolume,
};

use crate::element::TileElement;
use crate::error::WorldError;
use crate::ride::Ride;

/// Input to a clearance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearanceRequest {
    /// The volume to clear.
    pub volume: TileVolume,
    /// Which quarters of the tile the new element needs.
    pub quadrants: u8,
    /// Permission flags of the command asking.
    pub flags: CommandFlags,
}

/// Where the checked volume sits relative to land and water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroundFlags {
    /// The whole volume is below the water surface.
    pub underwater: bool,
}

/// A passed clearance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearanceCheck {
    /// Cost of clearing removable scenery out of the volume.
    pub cost: Money,
    /// Ground position of the volume.
    pub ground: GroundFlags,
}

/// A failed clearance check: the message and arguments to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearanceFailure {
    /// Catalog message.
    pub message: StringId,
    /// Message arguments.
    pub args: Vec<FormatArg>,
}

/// Index of an element within its tile's stack.
pub type ElementIndex = usize;

/// Read-only world access for Query passes.
pub trait WorldRead {
    /// Resolve a ride by index.
    fn ride(&self, id: RideId) -> Option<&Ride>;

    /// Whether storage could take one more element on `tile`.
    fn has_free_elements(&self, tile: TileCoords) -> bool;

    /// Whether `tile` lies on the map.
    fn is_location_valid(&self, tile: TileCoords) -> bool;

    /// Whether the park may build at height `z` on `tile`.
    fn is_location_owned(&self, tile: TileCoords, z: i32) -> bool;

    /// Whether the sandbox override bypasses ownership checks.
    fn sandbox_mode(&self) -> bool;

    /// Check a volume for collisions without touching anything.
    fn check_clearance(&self, request: &ClearanceRequest) -> Result<ClearanceCheck, ClearanceFailure>;

    /// Land height of a tile.
    fn surface_height(&self, tile: TileCoords) -> Option<i32>;

    /// Look up an element.
    fn element(&self, tile: TileCoords, index: ElementIndex) -> Option<&TileElement>;

    /// Find the entrance or exit of `ride`/`station` on `tile`.
    ///
    /// With [`CommandFlags::GHOST`] set, ghost elements are preferred; a real
    /// element is still returned when no ghost matches, so callers can tell
    /// "wrong kind" from "missing".
    fn find_entrance_element(
        &self,
        tile: TileCoords,
        ride: RideId,
        station: StationIndex,
        entrance_type: EntranceType,
        flags: CommandFlags,
    ) -> Option<ElementIndex>;
}

/// Mutable world access for Execute passes.
pub trait WorldWrite: WorldRead {
    /// Resolve a ride by index, mutably.
    fn ride_mut(&mut self, id: RideId) -> Option<&mut Ride>;

    /// Capacity check that may compact storage to make room.
    fn check_capacity_and_reorganise(&mut self, tile: TileCoords) -> bool;

    /// Clearance check in apply mode: removable scenery in the volume is
    /// removed unless the request is a ghost.
    fn clear_for_construction(
        &mut self,
        request: &ClearanceRequest,
    ) -> Result<ClearanceCheck, ClearanceFailure>;

    /// Store a new element.
    fn insert_element(
        &mut self,
        tile: TileCoords,
        element: TileElement,
    ) -> Result<ElementIndex, WorldError>;

    /// Remove an element from storage.
    fn remove_element(
        &mut self,
        tile: TileCoords,
        index: ElementIndex,
    ) -> Result<TileElement, WorldError>;

    /// Reset a ride's breakdown and test state before construction.
    fn clear_ride_for_construction(&mut self, ride: RideId);

    /// Send every visitor queuing for or riding `ride` away. Returns how many.
    fn evict_ride_agents(&mut self, ride: RideId) -> usize;

    /// Forget a ride's test results.
    fn invalidate_ride_test_results(&mut self, ride: RideId);

    /// Sweep litter near height `z` on `tile`.
    fn remove_litter(&mut self, tile: TileCoords, z: i32);

    /// Knock down walls standing at height `z` on `tile`.
    fn remove_walls_at_z(&mut self, tile: TileCoords, z: i32);

    /// Forget pending queue chains.
    fn reset_queue_chains(&mut self);

    /// Propagate ride/station ownership along pending queue chains.
    fn update_queue_chains(&mut self);

    /// Join an entrance or exit to the footpath it faces.
    fn connect_footpath_edges(&mut self, tile: TileCoords, index: ElementIndex, flags: CommandFlags);

    /// Detach the footpath an entrance or exit faces.
    fn remove_footpath_edges(&mut self, tile: TileCoords, index: ElementIndex);

    /// Cut the maze hedge behind a maze entrance or exit.
    fn remove_maze_hedges(&mut self, tile: TileCoords, index: ElementIndex);

    /// Restore the maze hedge behind a maze entrance or exit.
    fn replace_maze_hedges(&mut self, tile: TileCoords, index: ElementIndex);

    /// Register a periodic animation.
    fn create_animation(&mut self, kind: AnimationKind, position: CoordsXYZ);

    /// Mark a tile for redraw.
    fn invalidate_tile(&mut self, tile: TileCoords);
}
