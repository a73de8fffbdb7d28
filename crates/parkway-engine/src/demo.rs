//! The demo park and the construction session scripted against it.
//!
//! Layout, in tiles (x, y):
//!
//! ```text
//! coaster track   (10..=13, 10)   two stations
//! queue path      (10, 12)        faces the first entrance site
//! scenery         (14, 11)        cleared when the entrance moves onto it
//! maze track      (20, 10)
//! lake            (25, 5)
//! unowned land    (30, 30)
//! ```

use parkway_actions::{GameCommand, RideEntranceExitPlaceAction, RideEntranceExitRemoveAction};
use parkway_core::ParkConfig;
use parkway_types::{
    AgentId, CommandFlags, Direction, RideId, RideKind, StationIndex, TileCoords,
};
use parkway_world::{Agent, AgentState, Ownership, ParkWorld, Ride, Station, WorldError};
use rust_decimal::Decimal;

/// The roller coaster.
pub const COASTER: RideId = RideId::new(0);

/// The hedge maze.
pub const MAZE: RideId = RideId::new(1);

/// One scripted command and what it is meant to show.
#[derive(Debug)]
pub struct Step {
    /// Human-readable description for the log.
    pub label: &'static str,
    /// The command to dispatch.
    pub command: Box<dyn GameCommand>,
}

impl Step {
    fn new(label: &'static str, command: impl GameCommand + 'static) -> Self {
        Self {
            label,
            command: Box::new(command),
        }
    }
}

/// Build the demo park on a map generated from `config`.
pub fn build_park(config: &ParkConfig) -> Result<ParkWorld, WorldError> {
    let mut world = config.build_world();
    let z = config.map.base_height;

    world.add_ride(Ride::new(
        COASTER,
        "Wooden Roller Coaster",
        RideKind::Tracked,
        vec![Station::new(z), Station::new(z)],
    ))?;
    world.add_ride(Ride::new(MAZE, "Hedge Maze", RideKind::Maze, vec![Station::new(z)]))?;

    for x in 10..=13 {
        world.add_track(TileCoords::new(x, 10), z, COASTER)?;
    }
    world.add_track(TileCoords::new(20, 10), z, MAZE)?;
    world.add_path(TileCoords::new(10, 12), z, true, 0)?;
    world.add_scenery(TileCoords::new(14, 11), z, Decimal::new(500, 2))?;
    world.add_litter(TileCoords::new(10, 11), z);

    world.set_water_height(TileCoords::new(25, 5), z.saturating_add(64))?;
    world.set_ownership(TileCoords::new(30, 30), Ownership::Unowned)?;

    for id in 0..4 {
        world.add_agent(Agent::on(AgentId::new(id), COASTER, AgentState::Queuing))?;
    }
    Ok(world)
}

fn place(
    x: i32,
    y: i32,
    direction: u8,
    ride: RideId,
    station: u8,
    is_exit: bool,
) -> RideEntranceExitPlaceAction {
    RideEntranceExitPlaceAction::new(
        TileCoords::new(x, y),
        Direction::from_masked(direction),
        ride,
        StationIndex::new(station),
        is_exit,
    )
}

/// The committed part of the session, in order. Some steps are expected to
/// fail; they show the rejection paths.
pub fn session() -> Vec<Step> {
    vec![
        Step::new("coaster entrance", place(10, 11, 1, COASTER, 0, false)),
        Step::new("coaster exit", place(13, 11, 1, COASTER, 0, true)),
        Step::new("entrance on unowned land", place(30, 30, 0, COASTER, 1, false)),
        Step::new("entrance in the lake", place(25, 5, 0, COASTER, 1, false)),
        Step::new("move coaster entrance onto scenery", place(14, 11, 1, COASTER, 0, false)),
        Step::new("entrance for a missing station", place(16, 11, 1, COASTER, 7, false)),
        Step::new("maze entrance", place(20, 11, 1, MAZE, 0, false)),
        Step::new(
            "remove coaster exit",
            RideEntranceExitRemoveAction::new(TileCoords::new(13, 11), COASTER, StationIndex::new(0), true),
        ),
        Step::new(
            "remove coaster exit again",
            RideEntranceExitRemoveAction::new(TileCoords::new(13, 11), COASTER, StationIndex::new(0), true),
        ),
    ]
}

/// A ghost preview, as a construction tool would show under the cursor.
pub fn preview() -> Step {
    Step::new(
        "preview second station entrance",
        place(16, 12, 0, COASTER, 1, false).with_flags(CommandFlags::GHOST),
    )
}
