use parkway_types::{
    ActionResult, AnimationKind, CommandFlags, Direction, EntranceType, RideId, Status,
    StationIndex, StringId, TileCoords, TileCoordsXYZD,
};
use parkway_world::{
    ElementKind, EntranceElement, FULL_TILE_QUADRANTS, Ride, TileElement, WorldRead, WorldWrite,
};

use super::{
    RideEntranceExitRemoveAction, check_site, clearance_request, construction_result,
    no_clearance, placement_title,
};
use crate::command::{CommandBase, CommandType, GameCommand};
use crate::error::StreamError;
use crate::nested::{execute_nested, query_nested};
use crate::params::{ParamValue, ParameterVisitor};
use crate::stream::DataSerialiser;

/// Build or move the entrance or exit of one ride station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideEntranceExitPlaceAction {
    base: CommandBase,
    location: TileCoords,
    direction: Direction,
    ride: RideId,
    station: StationIndex,
    is_exit: bool,
}

impl Default for RideEntranceExitPlaceAction {
    fn default() -> Self {
        Self::new(
            TileCoords::new(0, 0),
            Direction::from_masked(0),
            RideId::new(0),
            StationIndex::new(0),
            false,
        )
    }
}

impl RideEntranceExitPlaceAction {
    /// A placement with no permission flags.
    pub fn new(
        location: TileCoords,
        direction: Direction,
        ride: RideId,
        station: StationIndex,
        is_exit: bool,
    ) -> Self {
        Self {
            base: CommandBase::default(),
            location,
            direction,
            ride,
            station,
            is_exit,
        }
    }

    /// Set the permission flags.
    #[must_use]
    pub fn with_flags(mut self, flags: CommandFlags) -> Self {
        self.base.flags = flags;
        self
    }

    /// Target tile.
    pub const fn location(&self) -> TileCoords {
        self.location
    }

    /// Whether this places an exit rather than an entrance.
    pub const fn is_exit(&self) -> bool {
        self.is_exit
    }

    const fn entrance_type(&self) -> EntranceType {
        EntranceType::from_exit_flag(self.is_exit)
    }

    /// Resolve the ride and check the station index against it.
    fn resolve_ride<'w>(&self, ride: Option<&'w Ride>) -> Result<&'w Ride, ActionResult> {
        let title = placement_title(self.is_exit);
        let Some(ride) = ride else {
            tracing::warn!(ride = %self.ride, "Invalid game command for ride");
            return Err(ActionResult::error(Status::InvalidParameters, title));
        };
        if ride.station(self.station).is_none() {
            tracing::warn!(
                ride = %self.ride,
                station = %self.station,
                stations = ride.station_count(),
                "Invalid station number for ride"
            );
            return Err(ActionResult::error(Status::InvalidParameters, title));
        }
        Ok(ride)
    }

    /// Where this station's entrance or exit currently stands.
    fn existing(&self, ride: &Ride) -> Option<TileCoordsXYZD> {
        if self.is_exit {
            ride.exit_location(self.station)
        } else {
            ride.entrance_location(self.station)
        }
    }

    fn removal_of(&self, existing: TileCoordsXYZD) -> RideEntranceExitRemoveAction {
        RideEntranceExitRemoveAction::new(existing.tile(), self.ride, self.station, self.is_exit)
    }

    fn station_z(ride: &Ride, station: StationIndex) -> i32 {
        ride.station(station).map_or(0, |s| s.base_z)
    }

    fn validate(&self, world: &dyn WorldRead) -> Result<ActionResult, ActionResult> {
        let title = placement_title(self.is_exit);
        if !world.has_free_elements(self.location) {
            return Err(ActionResult::error(Status::NoFreeElements, title));
        }

        let ride = self.resolve_ride(world.ride(self.ride))?;

        if !ride.status.allows_station_changes() {
            return Err(ActionResult::error_with_message(
                Status::NotClosed,
                title,
                StringId::MustBeClosedFirst,
            ));
        }

        if ride
            .lifecycle
            .contains(parkway_world::RideLifecycle::INDESTRUCTIBLE_TRACK)
        {
            return Err(ActionResult::error_with_message(
                Status::Disallowed,
                title,
                StringId::NotAllowedToModifyStation,
            ));
        }

        if let Some(existing) = self.existing(ride) {
            let mut removal = self.removal_of(existing);
            query_nested(self.flags(), &mut removal, world).into_outcome()?;
        }

        let z = Self::station_z(ride, self.station);
        let owned = world.sandbox_mode() || world.is_location_owned(self.location, z);
        if !world.is_location_valid(self.location) || !owned {
            return Err(ActionResult::error(Status::NotOwned, title));
        }

        let check = check_site(world, self.location, z, self.is_exit, self.flags())?;
        Ok(construction_result(self.location, z, check.cost))
    }

    fn apply(&self, world: &mut dyn WorldWrite) -> Result<ActionResult, ActionResult> {
        let title = placement_title(self.is_exit);
        let flags = self.flags();
        let ghost = flags.is_ghost();

        if !world.check_capacity_and_reorganise(self.location) {
            return Err(ActionResult::error(Status::NoFreeElements, title));
        }

        let existing = self.existing(self.resolve_ride(world.ride(self.ride))?);

        if !ghost {
            world.clear_ride_for_construction(self.ride);
            world.evict_ride_agents(self.ride);
        }

        // Not undone if anything below fails.
        if let Some(existing) = existing {
            let mut removal = self.removal_of(existing);
            execute_nested(flags, &mut removal, world).into_outcome()?;
        }

        let z = world
            .ride(self.ride)
            .map_or(0, |ride| Self::station_z(ride, self.station));

        if !flags.contains(CommandFlags::ALLOW_DURING_PAUSED) && !ghost {
            world.remove_litter(self.location, z);
            world.remove_walls_at_z(self.location, z);
        }

        let request = clearance_request(
            self.location,
            z,
            self.is_exit,
            flags | CommandFlags::APPLY,
        );
        let check = world
            .clear_for_construction(&request)
            .map_err(|failure| no_clearance(title, failure))?;

        let element = TileElement {
            base_z: z,
            clearance_z: request.volume.clearance_z,
            direction: self.direction,
            quadrants: FULL_TILE_QUADRANTS,
            ghost,
            kind: ElementKind::Entrance(EntranceElement {
                entrance_type: self.entrance_type(),
                ride: self.ride,
                station: self.station,
            }),
        };
        let index = world.insert_element(self.location, element).map_err(|error| {
            tracing::error!(%error, tile = %self.location, "Element insertion failed after clearance passed");
            ActionResult::error(Status::NoFreeElements, title)
        })?;

        let placed = TileCoordsXYZD::new(self.location, z, self.direction);
        if let Some(ride) = world.ride_mut(self.ride) {
            if self.is_exit {
                ride.set_exit_location(self.station, Some(placed));
            } else {
                ride.set_entrance_location(self.station, Some(placed));
                if !ghost && let Some(station) = ride.station_mut(self.station) {
                    station.last_agent_in_queue = None;
                    station.queue_length = 0;
                }
            }
        }
        if !self.is_exit
            && !ghost
            && let Some(position) = self.location.centre_at(z)
        {
            world.create_animation(AnimationKind::RideEntrance, position);
        }

        world.reset_queue_chains();
        if !ghost {
            world.remove_maze_hedges(self.location, index);
        }
        world.connect_footpath_edges(self.location, index, flags);
        world.update_queue_chains();
        world.invalidate_tile(self.location);

        tracing::debug!(
            ride = %self.ride,
            station = %self.station,
            tile = %self.location,
            z,
            exit = self.is_exit,
            ghost,
            "Ride entrance/exit placed"
        );
        Ok(construction_result(self.location, z, check.cost))
    }
}

impl GameCommand for RideEntranceExitPlaceAction {
    fn command_type(&self) -> CommandType {
        CommandType::RideEntranceExitPlace
    }

    fn base(&self) -> &CommandBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CommandBase {
        &mut self.base
    }

    fn accept_parameters(&self, visitor: &mut dyn ParameterVisitor) {
        visitor.visit("location", ParamValue::Location(self.location));
        visitor.visit("direction", ParamValue::Direction(self.direction));
        visitor.visit("ride", ParamValue::Ride(self.ride));
        visitor.visit("station", ParamValue::Station(self.station));
        visitor.visit("isExit", ParamValue::Bool(self.is_exit));
    }

    fn serialise_fields(&mut self, stream: &mut DataSerialiser<'_>) -> Result<(), StreamError> {
        stream.serialise(&mut self.location)?;
        stream.serialise(&mut self.direction)?;
        stream.serialise(&mut self.ride)?;
        stream.serialise(&mut self.station)?;
        stream.serialise(&mut self.is_exit)
    }

    fn query(&self, world: &dyn WorldRead) -> ActionResult {
        self.validate(world).unwrap_or_else(|failure| failure)
    }

    fn execute(&self, world: &mut dyn WorldWrite) -> ActionResult {
        self.apply(world).unwrap_or_else(|failure| failure)
    }
}

/// Check whether an entrance or exit could stand at `tile`/`z`, without a
/// ride or station.
///
/// Used by track construction previews. Only capacity, ownership, clearance,
/// water and height are checked, with no permission flags. The reported
/// position is at the tile's surface height.
pub fn track_place_query(world: &dyn WorldRead, tile: TileCoords, z: i32, is_exit: bool) -> ActionResult {
    let title = placement_title(is_exit);
    if !world.has_free_elements(tile) {
        return ActionResult::error(Status::NoFreeElements, title);
    }
    if !world.sandbox_mode() && !world.is_location_owned(tile, z) {
        return ActionResult::error(Status::NotOwned, title);
    }
    match check_site(world, tile, z, is_exit, CommandFlags::NONE) {
        Ok(check) => {
            let surface = world.surface_height(tile).unwrap_or(z);
            construction_result(tile, surface, check.cost)
        }
        Err(failure) => failure,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parkway_types::{AgentId, ExpenditureType, FormatArg, Money, RideKind, RideStatus};
    use parkway_world::{
        Agent, AgentState, MapSettings, Ownership, ParkWorld, RideLifecycle, Station,
    };
    use rust_decimal_macros::dec;

    use super::*;
    use crate::params::FieldRecorder;

    const RIDE: RideId = RideId::new(0);
    const STATION: StationIndex = StationIndex::new(0);
    const STATION_Z: i32 = 112;

    fn park() -> ParkWorld {
        let mut world = ParkWorld::new(&MapSettings {
            size: 32,
            max_elements: 256,
            max_elements_per_tile: 8,
            base_height: 96,
            water_height: 0,
        });
        world
            .add_ride(Ride::new(
                RIDE,
                "Wooden Coaster",
                RideKind::Tracked,
                vec![Station::new(STATION_Z), Station::new(STATION_Z)],
            ))
            .unwrap();
        world
    }

    fn place(x: i32, y: i32, direction: u8) -> RideEntranceExitPlaceAction {
        RideEntranceExitPlaceAction::new(
            TileCoords::new(x, y),
            Direction::from_masked(direction),
            RIDE,
            STATION,
            false,
        )
    }

    fn run(world: &mut ParkWorld, command: &RideEntranceExitPlaceAction) -> ActionResult {
        let query = command.query(&*world);
        if !query.is_ok() {
            return query;
        }
        command.execute(world)
    }

    #[test]
    fn query_and_execute_agree() {
        let mut world = park();
        let command = place(10, 20, 1);
        let query = command.query(&world);
        let execute = command.execute(&mut world);
        assert_eq!(query.status, Status::Ok);
        assert_eq!(execute.status, query.status);
        assert_eq!(execute.position, query.position);
        assert_eq!(execute.expenditure, ExpenditureType::RideConstruction);
        assert_eq!(
            execute.position,
            Some(parkway_types::CoordsXYZ {
                x: 336,
                y: 656,
                z: STATION_Z
            })
        );
    }

    #[test]
    fn query_leaves_the_world_alone() {
        let world = park();
        let before = world.checksum();
        let command = place(10, 20, 1);
        assert_eq!(command.query(&world), command.query(&world));
        assert_eq!(world.checksum(), before);
        assert_eq!(world.map().live_elements(), 0);
    }

    #[test]
    fn station_bound_is_the_rides_own() {
        let world = park();
        let command = RideEntranceExitPlaceAction::new(
            TileCoords::new(10, 20),
            Direction::from_masked(0),
            RIDE,
            StationIndex::new(2),
            false,
        );
        assert_eq!(command.query(&world).status, Status::InvalidParameters);
    }

    #[test]
    fn unknown_ride_is_invalid() {
        let world = park();
        let command = RideEntranceExitPlaceAction::new(
            TileCoords::new(10, 20),
            Direction::from_masked(0),
            RideId::new(9),
            STATION,
            true,
        );
        let result = command.query(&world);
        assert_eq!(result.status, Status::InvalidParameters);
        assert_eq!(
            result.error_title,
            Some(StringId::CantBuildMoveExitForThisRideAttraction)
        );
    }

    #[test]
    fn operating_ride_must_close_first() {
        let mut world = park();
        world.ride_mut(RIDE).unwrap().status = RideStatus::Operating;
        let result = place(10, 20, 1).query(&world);
        assert_eq!(result.status, Status::NotClosed);
        assert_eq!(result.error_message, Some(StringId::MustBeClosedFirst));
    }

    #[test]
    fn simulating_ride_may_change() {
        let mut world = park();
        world.ride_mut(RIDE).unwrap().status = RideStatus::Simulating;
        assert!(place(10, 20, 1).query(&world).is_ok());
    }

    #[test]
    fn indestructible_track_is_disallowed() {
        let mut world = park();
        world
            .ride_mut(RIDE)
            .unwrap()
            .lifecycle
            .insert(RideLifecycle::INDESTRUCTIBLE_TRACK);
        let result = place(10, 20, 1).query(&world);
        assert_eq!(result.status, Status::Disallowed);
        assert_eq!(result.error_message, Some(StringId::NotAllowedToModifyStation));
    }

    #[test]
    fn unowned_land_needs_sandbox() {
        let mut world = park();
        world
            .set_ownership(TileCoords::new(10, 20), Ownership::Unowned)
            .unwrap();
        assert_eq!(place(10, 20, 1).query(&world).status, Status::NotOwned);
        world.set_sandbox_mode(true);
        assert!(place(10, 20, 1).query(&world).is_ok());
    }

    #[test]
    fn off_map_location_is_not_owned() {
        let mut world = park();
        world.set_sandbox_mode(true);
        assert_eq!(place(-1, 20, 1).query(&world).status, Status::NotOwned);
    }

    #[test]
    fn blocked_site_reports_the_obstacle() {
        let mut world = park();
        world.add_wall(TileCoords::new(10, 20), STATION_Z).unwrap();
        let result = place(10, 20, 1).query(&world);
        assert_eq!(result.status, Status::NoClearance);
        assert_eq!(result.error_message, Some(StringId::ObjectInTheWay));
        assert_eq!(
            result.error_message_args,
            vec![FormatArg::String(StringId::ElementWall)]
        );
    }

    #[test]
    fn underwater_is_disallowed_after_clearance() {
        let mut world = park();
        world.set_water_height(TileCoords::new(10, 20), 240).unwrap();
        let result = place(10, 20, 1).query(&world);
        assert_eq!(result.status, Status::Disallowed);
        assert_eq!(result.error_message, Some(StringId::RideCantBuildThisUnderwater));
    }

    #[test]
    fn too_high_is_checked_last() {
        let mut world = park();
        world
            .ride_mut(RIDE)
            .and_then(|r| r.station_mut(STATION))
            .unwrap()
            .base_z = 1960;
        let result = place(10, 20, 1).query(&world);
        assert_eq!(result.status, Status::Disallowed);
        assert_eq!(result.error_message, Some(StringId::TooHigh));
    }

    #[test]
    fn scenery_cost_is_reported() {
        let mut world = park();
        world
            .add_scenery(TileCoords::new(10, 20), STATION_Z, dec!(4.25))
            .unwrap();
        assert_eq!(place(10, 20, 1).query(&world).cost, Some(dec!(4.25)));
        let result = place(10, 20, 1).execute(&mut world);
        assert_eq!(result.cost, Some(dec!(4.25)));
        assert_eq!(world.elements_at(TileCoords::new(10, 20)).len(), 1);
    }

    #[test]
    fn new_entrance_is_recorded_on_its_station() {
        let mut world = park();
        {
            let station = world.ride_mut(RIDE).unwrap().station_mut(STATION).unwrap();
            station.queue_length = 7;
            station.last_agent_in_queue = Some(AgentId::new(3));
        }
        assert!(run(&mut world, &place(10, 20, 1)).is_ok());

        let ride = world.ride(RIDE).unwrap();
        assert_eq!(
            ride.entrance_location(STATION),
            Some(TileCoordsXYZD::new(
                TileCoords::new(10, 20),
                STATION_Z,
                Direction::from_masked(1)
            ))
        );
        let station = ride.station(STATION).unwrap();
        assert_eq!(station.queue_length, 0);
        assert_eq!(station.last_agent_in_queue, None);
        assert_eq!(world.animations().len(), 1);
        assert!(world.invalidated().contains(&TileCoords::new(10, 20)));
    }

    #[test]
    fn exit_records_location_only() {
        let mut world = park();
        let command = RideEntranceExitPlaceAction::new(
            TileCoords::new(4, 4),
            Direction::from_masked(3),
            RIDE,
            StationIndex::new(1),
            true,
        );
        assert!(run(&mut world, &command).is_ok());
        let ride = world.ride(RIDE).unwrap();
        assert!(ride.exit_location(StationIndex::new(1)).is_some());
        assert!(ride.entrance_location(StationIndex::new(1)).is_none());
        assert!(world.animations().is_empty());
        let element = world.elements_at(TileCoords::new(4, 4)).first().unwrap();
        assert_eq!(element.clearance_z, STATION_Z + super::super::RIDE_EXIT_HEIGHT);
    }

    #[test]
    fn placing_again_moves_the_entrance() {
        let mut world = park();
        assert!(run(&mut world, &place(10, 20, 1)).is_ok());
        assert!(run(&mut world, &place(15, 20, 2)).is_ok());

        assert!(world.elements_at(TileCoords::new(10, 20)).is_empty());
        assert_eq!(world.elements_at(TileCoords::new(15, 20)).len(), 1);
        assert_eq!(
            world.count_entrance_elements(RIDE, STATION, EntranceType::RideEntrance),
            1
        );
        assert_eq!(
            world.ride(RIDE).and_then(|r| r.entrance_location(STATION)),
            Some(TileCoordsXYZD::new(
                TileCoords::new(15, 20),
                STATION_Z,
                Direction::from_masked(2)
            ))
        );
    }

    #[test]
    fn full_storage_touches_nothing() {
        let mut world = ParkWorld::new(&MapSettings {
            size: 32,
            max_elements: 1,
            max_elements_per_tile: 8,
            base_height: 96,
            water_height: 0,
        });
        world
            .add_ride(Ride::new(RIDE, "Carousel", RideKind::Flat, vec![Station::new(STATION_Z)]))
            .unwrap();
        assert!(run(&mut world, &place(10, 20, 1)).is_ok());
        let before = world.checksum();

        let result = run(&mut world, &place(15, 20, 2));
        assert_eq!(result.status, Status::NoFreeElements);
        assert_eq!(world.elements_at(TileCoords::new(10, 20)).len(), 1);
        assert_eq!(world.checksum(), before);
    }

    #[test]
    fn ghost_placement_has_no_side_effects() {
        let mut world = park();
        let tile = TileCoords::new(10, 20);
        world
            .add_agent(Agent::on(AgentId::new(1), RIDE, AgentState::OnRide))
            .unwrap();
        world.add_litter(tile, STATION_Z);
        world.ride_mut(RIDE).unwrap().station_mut(STATION).unwrap().queue_length = 7;

        let result = place(10, 20, 1)
            .with_flags(CommandFlags::GHOST)
            .execute(&mut world);
        assert!(result.is_ok());

        let placed = world.elements_at(tile).iter().find(|e| e.as_entrance().is_some());
        assert!(placed.is_some_and(|e| e.ghost));
        assert_eq!(world.agent(AgentId::new(1)).map(|a| a.state), Some(AgentState::OnRide));
        assert_eq!(world.litter().len(), 1);
        assert!(world.animations().is_empty());
        assert_eq!(
            world.ride(RIDE).and_then(|r| r.station(STATION)).map(|s| s.queue_length),
            Some(7)
        );
    }

    #[test]
    fn ghost_placement_leaves_walls_standing() {
        let mut world = park();
        let tile = TileCoords::new(10, 20);
        world.add_wall(tile, STATION_Z).unwrap();

        let result = place(10, 20, 1)
            .with_flags(CommandFlags::GHOST)
            .execute(&mut world);
        assert_eq!(result.status, Status::NoClearance);
        assert!(matches!(
            world.elements_at(tile).first().map(|e| &e.kind),
            Some(ElementKind::Wall)
        ));

        assert!(place(10, 20, 1).execute(&mut world).is_ok());
        assert!(!world.elements_at(tile).iter().any(|e| matches!(e.kind, ElementKind::Wall)));
    }

    #[test]
    fn ghost_moves_an_earlier_ghost() {
        let mut world = park();
        let ghost = |x| place(x, 20, 1).with_flags(CommandFlags::GHOST);
        assert!(run(&mut world, &ghost(10)).is_ok());
        assert!(run(&mut world, &ghost(15)).is_ok());

        assert!(world.elements_at(TileCoords::new(10, 20)).is_empty());
        let moved = world.elements_at(TileCoords::new(15, 20)).first();
        assert!(moved.is_some_and(|e| e.ghost));
        assert_eq!(
            world.ride(RIDE).and_then(|r| r.entrance_location(STATION)).map(|l| l.tile()),
            Some(TileCoords::new(15, 20))
        );
    }

    #[test]
    fn ghost_cannot_displace_a_real_entrance() {
        let mut world = park();
        assert!(run(&mut world, &place(10, 20, 1)).is_ok());
        let before = world.checksum();

        let ghost = place(15, 20, 1).with_flags(CommandFlags::GHOST);
        let result = run(&mut world, &ghost);
        assert_eq!(result.status, Status::InvalidParameters);
        assert_eq!(result.error_title, Some(StringId::CantRemoveThis));
        assert_eq!(world.elements_at(TileCoords::new(10, 20)).len(), 1);
        assert_eq!(world.checksum(), before);
    }

    #[test]
    fn real_placement_evicts_and_sweeps() {
        let mut world = park();
        let tile = TileCoords::new(10, 20);
        world
            .add_agent(Agent::on(AgentId::new(1), RIDE, AgentState::Queuing))
            .unwrap();
        world.add_litter(tile, STATION_Z);

        assert!(place(10, 20, 1).execute(&mut world).is_ok());
        assert_eq!(world.agent(AgentId::new(1)).map(|a| a.state), Some(AgentState::Walking));
        assert!(world.litter().is_empty());
    }

    #[test]
    fn late_clearance_failure_keeps_old_entrance_removed() {
        let mut world = park();
        assert!(run(&mut world, &place(10, 20, 1)).is_ok());
        // A wall above the litter/wall sweep height still blocks the entrance.
        world.add_wall(TileCoords::new(15, 20), STATION_Z + 48).unwrap();

        let result = place(15, 20, 2).execute(&mut world);
        assert_eq!(result.status, Status::NoClearance);
        assert!(world.elements_at(TileCoords::new(10, 20)).is_empty());
        assert_eq!(world.ride(RIDE).and_then(|r| r.entrance_location(STATION)), None);
    }

    #[test]
    fn nested_removal_failure_propagates_verbatim() {
        let mut world = park();
        assert!(run(&mut world, &place(10, 20, 1)).is_ok());
        // Point the station at a tile with no entrance element.
        let stray = TileCoordsXYZD::new(TileCoords::new(2, 2), STATION_Z, Direction::from_masked(0));
        world
            .ride_mut(RIDE)
            .unwrap()
            .set_entrance_location(STATION, Some(stray));

        let result = place(15, 20, 2).query(&world);
        assert_eq!(result.status, Status::InvalidParameters);
        assert_eq!(result.error_title, Some(StringId::CantRemoveThis));
    }

    #[test]
    fn maze_entrance_cuts_the_hedge_behind_it() {
        let mut world = park();
        let maze = RideId::new(1);
        world
            .add_ride(Ride::new(maze, "Hedge Maze", RideKind::Maze, vec![Station::new(STATION_Z)]))
            .unwrap();
        world.add_track(TileCoords::new(5, 4), STATION_Z, maze).unwrap();

        let command = RideEntranceExitPlaceAction::new(
            TileCoords::new(5, 5),
            Direction::from_masked(1),
            maze,
            STATION,
            false,
        );
        assert!(command.execute(&mut world).is_ok());
        let hedges = world
            .elements_at(TileCoords::new(5, 4))
            .first()
            .map(|e| e.kind.clone());
        assert!(matches!(hedges, Some(ElementKind::Track(t)) if t.hedges == 0b1101));
    }

    #[test]
    fn ghost_maze_entrance_keeps_every_hedge() {
        let mut world = park();
        let maze = RideId::new(1);
        world
            .add_ride(Ride::new(maze, "Hedge Maze", RideKind::Maze, vec![Station::new(STATION_Z)]))
            .unwrap();
        world.add_track(TileCoords::new(5, 4), STATION_Z, maze).unwrap();

        let command = RideEntranceExitPlaceAction::new(
            TileCoords::new(5, 5),
            Direction::from_masked(1),
            maze,
            STATION,
            false,
        )
        .with_flags(CommandFlags::GHOST);
        assert!(command.execute(&mut world).is_ok());
        let hedges = world
            .elements_at(TileCoords::new(5, 4))
            .first()
            .map(|e| e.kind.clone());
        assert!(matches!(hedges, Some(ElementKind::Track(t)) if t.hedges == 0b1111));

        assert_eq!(world.remove_ghosts(), 1);
        let hedges = world
            .elements_at(TileCoords::new(5, 4))
            .first()
            .map(|e| e.kind.clone());
        assert!(matches!(hedges, Some(ElementKind::Track(t)) if t.hedges == 0b1111));
    }

    #[test]
    fn entrance_chains_the_queue_it_faces() {
        let mut world = park();
        let queue_tile = TileCoords::new(10, 21);
        world.add_path(queue_tile, STATION_Z, true, 0).unwrap();
        assert!(place(10, 20, 1).execute(&mut world).is_ok());
        let path = world
            .elements_at(queue_tile)
            .first()
            .and_then(|e| e.as_path().copied())
            .unwrap();
        assert_eq!(path.queue_for, Some((RIDE, STATION)));
        assert_eq!(path.edges, Direction::from_masked(3).edge_bit());
    }

    #[test]
    fn parameters_are_enumerated_in_wire_order() {
        let mut recorder = FieldRecorder::new();
        place(10, 20, 1).accept_parameters(&mut recorder);
        assert_eq!(
            recorder.names(),
            vec!["location", "direction", "ride", "station", "isExit"]
        );
        assert_eq!(
            recorder.get("location"),
            Some(ParamValue::Location(TileCoords::new(10, 20)))
        );
    }

    #[test]
    fn serialisation_is_symmetric() {
        let mut original = place(10, 20, 1).with_flags(CommandFlags::GHOST);
        original.base_mut().network_id = 77;
        let bytes = crate::command::encode_command(&mut original).unwrap();
        // Base: u32 id, u32 flags, u8 player; fields: 2 x i32, u8, u16, u8, bool.
        assert_eq!(bytes.len(), 9 + 8 + 1 + 2 + 1 + 1);

        let mut decoded = RideEntranceExitPlaceAction::default();
        crate::command::decode_into(&mut decoded, &bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn preview_checks_only_the_site() {
        let mut world = park();
        let tile = TileCoords::new(3, 3);
        let result = track_place_query(&world, tile, STATION_Z, false);
        assert!(result.is_ok());
        assert_eq!(result.position.map(|p| p.z), Some(96));
        assert_eq!(result.cost, Some(Money::ZERO));

        world.set_ownership(tile, Ownership::Unowned).unwrap();
        assert_eq!(
            track_place_query(&world, tile, STATION_Z, false).status,
            Status::NotOwned
        );
        assert_eq!(
            track_place_query(&world, TileCoords::new(4, 4), 1960, true).error_message,
            Some(StringId::TooHigh)
        );
    }

    proptest::proptest! {
        #[test]
        fn any_station_past_the_end_is_invalid(
            station in 2_u8..,
            x in -4_i32..40,
            y in -4_i32..40,
            direction in 0_u8..4,
            is_exit: bool,
        ) {
            let world = park();
            let command = RideEntranceExitPlaceAction::new(
                TileCoords::new(x, y),
                Direction::from_masked(direction),
                RIDE,
                StationIndex::new(station),
                is_exit,
            );
            proptest::prop_assert_eq!(command.query(&world).status, Status::InvalidParameters);
        }

        #[test]
        fn query_is_repeatable_and_pure(x in 0_i32..32, y in 0_i32..32, direction in 0_u8..4) {
            let world = park();
            let before = world.checksum();
            let command = place(x, y, direction);
            let first = command.query(&world);
            proptest::prop_assert_eq!(&first, &command.query(&world));
            proptest::prop_assert_eq!(world.checksum(), before);
        }
    }
}
