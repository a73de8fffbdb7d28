//! Ride entrance and exit construction.
//!
//! Placing onto a station that already has an entrance (or exit) first runs
//! [`RideEntranceExitRemoveAction`] as a nested command, so a station never
//! ends up with two.

mod place;
mod remove;

pub use place::{RideEntranceExitPlaceAction, track_place_query};
pub use remove::RideEntranceExitRemoveAction;

use parkway_types::{
    ActionResult, COORDS_Z_STEP, CommandFlags, ExpenditureType, Money, Status, StringId,
    TileCoords, TileVolume,
};
use parkway_world::{ClearanceCheck, ClearanceRequest, FULL_TILE_QUADRANTS, WorldRead};

/// Clearance an exit needs above its base.
pub const RIDE_EXIT_HEIGHT: i32 = 5 * COORDS_Z_STEP;

/// Clearance an entrance needs above its base.
pub const RIDE_ENTRANCE_HEIGHT: i32 = 7 * COORDS_Z_STEP;

/// Highest base an entrance or exit may be built at.
pub const MAX_RIDE_ENTRANCE_OR_EXIT_HEIGHT: i32 = 244 * COORDS_Z_STEP;

const fn placement_title(is_exit: bool) -> StringId {
    if is_exit {
        StringId::CantBuildMoveExitForThisRideAttraction
    } else {
        StringId::CantBuildMoveEntranceForThisRideAttraction
    }
}

fn clearance_request(tile: TileCoords, z: i32, is_exit: bool, flags: CommandFlags) -> ClearanceRequest {
    let height = if is_exit {
        RIDE_EXIT_HEIGHT
    } else {
        RIDE_ENTRANCE_HEIGHT
    };
    ClearanceRequest {
        volume: TileVolume {
            tile,
            base_z: z,
            clearance_z: z.saturating_add(height),
        },
        quadrants: FULL_TILE_QUADRANTS,
        flags,
    }
}

fn no_clearance(title: StringId, failure: parkway_world::ClearanceFailure) -> ActionResult {
    ActionResult::error_with_message(Status::NoClearance, title, failure.message)
        .with_args(failure.args)
}

/// The site checks shared by placement Query and the preview path: clearance,
/// then water, then height.
fn check_site(
    world: &dyn WorldRead,
    tile: TileCoords,
    z: i32,
    is_exit: bool,
    flags: CommandFlags,
) -> Result<ClearanceCheck, ActionResult> {
    let title = placement_title(is_exit);
    let check = world
        .check_clearance(&clearance_request(tile, z, is_exit, flags))
        .map_err(|failure| no_clearance(title, failure))?;

    if check.ground.underwater {
        return Err(ActionResult::error_with_message(
            Status::Disallowed,
            title,
            StringId::RideCantBuildThisUnderwater,
        ));
    }

    if z > MAX_RIDE_ENTRANCE_OR_EXIT_HEIGHT {
        return Err(ActionResult::error_with_message(
            Status::Disallowed,
            title,
            StringId::TooHigh,
        ));
    }

    Ok(check)
}

fn construction_result(tile: TileCoords, z: i32, cost: Money) -> ActionResult {
    ActionResult::ok()
        .at(tile.centre_at(z))
        .with_expenditure(ExpenditureType::RideConstruction)
        .with_cost(cost)
}
