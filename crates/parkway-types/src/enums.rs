//! Enumeration types shared by the world model and the command layer.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Command outcome status
// ---------------------------------------------------------------------------

/// Outcome status of a command's Query or Execute pass.
///
/// This is a closed vocabulary surfaced to UI and network layers. Every
/// non-`Ok` value is paired with a title and optional message from the
/// string catalog in the [`ActionResult`](crate::ActionResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The command passed (Query) or was applied (Execute).
    Ok,
    /// Unknown ride, out-of-range station, or a missing target element.
    InvalidParameters,
    /// The location is not owned by the park.
    NotOwned,
    /// The ride must be closed (or simulating) first.
    NotClosed,
    /// A policy check denied the command.
    Disallowed,
    /// Existing geometry blocks the target volume.
    NoClearance,
    /// World storage cannot accept another element at the tile.
    NoFreeElements,
}

impl Status {
    /// Whether this status represents success.
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

// ---------------------------------------------------------------------------
// Finance categories
// ---------------------------------------------------------------------------

/// Finance category a command's cost is booked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum ExpenditureType {
    /// Ride, entrance and exit construction.
    RideConstruction,
    /// Ride running costs.
    RideRunningCosts,
    /// Land purchase.
    LandPurchase,
    /// Landscaping and scenery.
    Landscaping,
    /// Anything not otherwise categorised.
    #[default]
    Unspecified,
}

// ---------------------------------------------------------------------------
// Ride lifecycle
// ---------------------------------------------------------------------------

/// Operating status of a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RideStatus {
    /// Closed to visitors; construction may modify it.
    Closed,
    /// Open and operating with visitors.
    Operating,
    /// Running test cycles without visitors.
    Testing,
    /// Running simulated cycles; construction may modify it.
    Simulating,
}

impl RideStatus {
    /// Whether entrances and exits may be changed in this status.
    pub const fn allows_station_changes(self) -> bool {
        matches!(self, Self::Closed | Self::Simulating)
    }
}

/// Broad ride category, as far as the world core cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RideKind {
    /// A tracked ride (coaster, train).
    Tracked,
    /// A single-tile or multi-tile flat ride.
    Flat,
    /// A hedge maze; entrances cut through adjacent hedges.
    Maze,
}

/// Which end of a station an entrance element serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntranceType {
    /// Where visitors queue and board.
    RideEntrance,
    /// Where visitors leave.
    RideExit,
}

impl EntranceType {
    /// Pick the entrance type from an exit flag.
    pub const fn from_exit_flag(is_exit: bool) -> Self {
        if is_exit { Self::RideExit } else { Self::RideEntrance }
    }

    /// Whether this is an exit.
    pub const fn is_exit(self) -> bool {
        matches!(self, Self::RideExit)
    }
}

/// Kind of periodic animation registered at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Ride entrance signage.
    RideEntrance,
    /// Queue banner.
    QueueBanner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_closed_and_simulating_allow_station_changes() {
        assert!(RideStatus::Closed.allows_station_changes());
        assert!(RideStatus::Simulating.allows_station_changes());
        assert!(!RideStatus::Operating.allows_station_changes());
        assert!(!RideStatus::Testing.allows_station_changes());
    }

    #[test]
    fn entrance_type_follows_exit_flag() {
        assert_eq!(EntranceType::from_exit_flag(true), EntranceType::RideExit);
        assert!(!EntranceType::from_exit_flag(false).is_exit());
    }

    #[test]
    fn status_serializes_by_name() {
        let json = serde_json::to_string(&Status::NoFreeElements).ok();
        assert_eq!(json.as_deref(), Some("\"NoFreeElements\""));
    }
}
