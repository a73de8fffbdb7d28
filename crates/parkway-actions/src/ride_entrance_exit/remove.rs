use parkway_types::{
    ActionResult, EntranceType, ExpenditureType, RideId, Status, StationIndex, StringId,
    TileCoords,
};
use parkway_world::{ElementIndex, Ride, RideLifecycle, WorldRead, WorldWrite};

use crate::command::{CommandBase, CommandType, GameCommand};
use crate::error::StreamError;
use crate::params::{ParamValue, ParameterVisitor};
use crate::stream::DataSerialiser;

const TITLE: StringId = StringId::CantRemoveThis;

/// Demolish the entrance or exit of one ride station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideEntranceExitRemoveAction {
    base: CommandBase,
    location: TileCoords,
    ride: RideId,
    station: StationIndex,
    is_exit: bool,
}

impl Default for RideEntranceExitRemoveAction {
    fn default() -> Self {
        Self::new(TileCoords::new(0, 0), RideId::new(0), StationIndex::new(0), false)
    }
}

impl RideEntranceExitRemoveAction {
    /// A removal with no permission flags.
    pub fn new(location: TileCoords, ride: RideId, station: StationIndex, is_exit: bool) -> Self {
        Self {
            base: CommandBase::default(),
            location,
            ride,
            station,
            is_exit,
        }
    }

    /// Set the permission flags.
    #[must_use]
    pub fn with_flags(mut self, flags: parkway_types::CommandFlags) -> Self {
        self.base.flags = flags;
        self
    }

    const fn entrance_type(&self) -> EntranceType {
        EntranceType::from_exit_flag(self.is_exit)
    }

    fn check_ride(&self, ride: Option<&Ride>) -> Result<(), ActionResult> {
        let Some(ride) = ride else {
            tracing::warn!(ride = %self.ride, "Invalid ride id for entrance/exit removal");
            return Err(ActionResult::error(Status::InvalidParameters, TITLE));
        };
        if ride.station(self.station).is_none() {
            tracing::warn!(ride = %self.ride, station = %self.station, "Invalid station for entrance/exit removal");
            return Err(ActionResult::error(Status::InvalidParameters, TITLE));
        }
        if !ride.status.allows_station_changes() {
            return Err(ActionResult::error_with_message(
                Status::NotClosed,
                TITLE,
                StringId::MustBeClosedFirst,
            ));
        }
        if ride.lifecycle.contains(RideLifecycle::INDESTRUCTIBLE_TRACK) {
            return Err(ActionResult::error_with_message(
                Status::NoClearance,
                TITLE,
                StringId::NotAllowedToModifyStation,
            ));
        }
        Ok(())
    }

    /// Every check Query and Execute share; yields the element to remove.
    fn locate<W: WorldRead + ?Sized>(&self, world: &W) -> Result<ElementIndex, ActionResult> {
        self.check_ride(world.ride(self.ride))?;

        if !world.is_location_valid(self.location) {
            return Err(ActionResult::error_with_message(
                Status::InvalidParameters,
                TITLE,
                StringId::LandNotOwnedByPark,
            ));
        }

        let flags = self.flags();
        let Some(index) = world.find_entrance_element(
            self.location,
            self.ride,
            self.station,
            self.entrance_type(),
            flags,
        ) else {
            tracing::warn!(
                tile = %self.location,
                ride = %self.ride,
                station = %self.station,
                exit = self.is_exit,
                "Entrance/exit element not found"
            );
            return Err(ActionResult::error(Status::InvalidParameters, TITLE));
        };

        let is_ghost = world.element(self.location, index).is_some_and(|e| e.ghost);
        if flags.is_ghost() && !is_ghost {
            return Err(ActionResult::error(Status::InvalidParameters, TITLE));
        }
        Ok(index)
    }

    fn result<W: WorldRead + ?Sized>(&self, world: &W) -> ActionResult {
        let z = world.surface_height(self.location).unwrap_or(0);
        ActionResult::ok()
            .at(self.location.centre_at(z))
            .with_expenditure(ExpenditureType::RideConstruction)
    }

    fn apply(&self, world: &mut dyn WorldWrite) -> Result<ActionResult, ActionResult> {
        let index = self.locate(&*world)?;
        let ghost = self.flags().is_ghost();

        if !ghost {
            world.clear_ride_for_construction(self.ride);
            world.evict_ride_agents(self.ride);
            world.invalidate_ride_test_results(self.ride);
        }

        world.reset_queue_chains();
        // A ghost never cut a hedge or joined a path, so there is nothing to undo.
        if !ghost {
            world.replace_maze_hedges(self.location, index);
            world.remove_footpath_edges(self.location, index);
        }
        world.remove_element(self.location, index).map_err(|error| {
            tracing::error!(%error, tile = %self.location, "Entrance/exit element vanished before removal");
            ActionResult::error(Status::InvalidParameters, TITLE)
        })?;

        if let Some(ride) = world.ride_mut(self.ride) {
            if self.is_exit {
                ride.set_exit_location(self.station, None);
            } else {
                ride.set_entrance_location(self.station, None);
            }
        }

        world.update_queue_chains();
        world.invalidate_tile(self.location);

        tracing::debug!(
            ride = %self.ride,
            station = %self.station,
            tile = %self.location,
            exit = self.is_exit,
            "Ride entrance/exit removed"
        );
        Ok(self.result(&*world))
    }
}

impl GameCommand for RideEntranceExitRemoveAction {
    fn command_type(&self) -> CommandType {
        CommandType::RideEntranceExitRemove
    }

    fn base(&self) -> &CommandBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CommandBase {
        &mut self.base
    }

    fn accept_parameters(&self, visitor: &mut dyn ParameterVisitor) {
        visitor.visit("location", ParamValue::Location(self.location));
        visitor.visit("ride", ParamValue::Ride(self.ride));
        visitor.visit("station", ParamValue::Station(self.station));
        visitor.visit("isExit", ParamValue::Bool(self.is_exit));
    }

    fn serialise_fields(&mut self, stream: &mut DataSerialiser<'_>) -> Result<(), StreamError> {
        stream.serialise(&mut self.location)?;
        stream.serialise(&mut self.ride)?;
        stream.serialise(&mut self.station)?;
        stream.serialise(&mut self.is_exit)
    }

    fn query(&self, world: &dyn WorldRead) -> ActionResult {
        match self.locate(world) {
            Ok(_) => self.result(world),
            Err(failure) => failure,
        }
    }

    fn execute(&self, world: &mut dyn WorldWrite) -> ActionResult {
        self.apply(world).unwrap_or_else(|failure| failure)
    }
}
