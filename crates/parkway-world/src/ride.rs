//! Rides and their stations.
//!
//! The world core only tracks the parts of a ride that entrance and exit
//! construction reads or writes: status, lifecycle flags, and per-station
//! entrance/exit locations with queue bookkeeping.

use parkway_types::{AgentId, RideId, RideKind, RideStatus, StationIndex, TileCoordsXYZD};
use serde::{Deserialize, Serialize};

/// Lifecycle flags on a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RideLifecycle(u32);

impl RideLifecycle {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The ride has completed a test run.
    pub const TESTED: Self = Self(1 << 1);
    /// A test run is in progress.
    pub const TEST_IN_PROGRESS: Self = Self(1 << 2);
    /// The ride is broken down.
    pub const BROKEN_DOWN: Self = Self(1 << 7);
    /// The ride has crashed.
    pub const CRASHED: Self = Self(1 << 10);
    /// Scenario rules forbid modifying this ride's track and stations.
    pub const INDESTRUCTIBLE_TRACK: Self = Self(1 << 14);

    /// Raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the flags in `other`.
    pub const fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the flags in `other`.
    pub const fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl core::ops::BitOr for RideLifecycle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A boarding/alighting point of a ride.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    /// Height of the station platform, in world units.
    pub base_z: i32,
    /// Where the entrance stands, if built.
    pub entrance: Option<TileCoordsXYZD>,
    /// Where the exit stands, if built.
    pub exit: Option<TileCoordsXYZD>,
    /// The visitor at the back of the queue.
    pub last_agent_in_queue: Option<AgentId>,
    /// Visitors queuing.
    pub queue_length: u16,
}

impl Station {
    /// A station at `base_z` with no entrance or exit.
    pub const fn new(base_z: i32) -> Self {
        Self {
            base_z,
            entrance: None,
            exit: None,
            last_agent_in_queue: None,
            queue_length: 0,
        }
    }
}

/// Results of the last completed test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestResults {
    /// Excitement rating, in hundredths.
    pub excitement: u16,
    /// Intensity rating, in hundredths.
    pub intensity: u16,
}

/// A ride, as seen by construction commands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ride {
    /// Registry index.
    pub id: RideId,
    /// Display name.
    pub name: String,
    /// Category.
    pub kind: RideKind,
    /// Operating status.
    pub status: RideStatus,
    /// Lifecycle flags.
    pub lifecycle: RideLifecycle,
    /// Stations, indexed by [`StationIndex`].
    pub stations: Vec<Station>,
    /// Last test results, cleared whenever construction touches the ride.
    pub test_results: Option<TestResults>,
}

impl Ride {
    /// A closed ride with the given stations.
    pub fn new(id: RideId, name: &str, kind: RideKind, stations: Vec<Station>) -> Self {
        Self {
            id,
            name: name.to_owned(),
            kind,
            status: RideStatus::Closed,
            lifecycle: RideLifecycle::NONE,
            stations,
            test_results: None,
        }
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Look up a station.
    pub fn station(&self, index: StationIndex) -> Option<&Station> {
        self.stations.get(index.as_usize())
    }

    /// Look up a station mutably.
    pub fn station_mut(&mut self, index: StationIndex) -> Option<&mut Station> {
        self.stations.get_mut(index.as_usize())
    }

    /// Entrance location of a station.
    pub fn entrance_location(&self, index: StationIndex) -> Option<TileCoordsXYZD> {
        self.station(index).and_then(|s| s.entrance)
    }

    /// Exit location of a station.
    pub fn exit_location(&self, index: StationIndex) -> Option<TileCoordsXYZD> {
        self.station(index).and_then(|s| s.exit)
    }

    /// Set or clear the entrance location of a station. Unknown stations are ignored.
    pub fn set_entrance_location(&mut self, index: StationIndex, location: Option<TileCoordsXYZD>) {
        if let Some(station) = self.station_mut(index) {
            station.entrance = location;
        }
    }

    /// Set or clear the exit location of a station. Unknown stations are ignored.
    pub fn set_exit_location(&mut self, index: StationIndex, location: Option<TileCoordsXYZD>) {
        if let Some(station) = self.station_mut(index) {
            station.exit = location;
        }
    }

    /// Reset breakdown and test state so construction can proceed.
    pub const fn clear_for_construction(&mut self) {
        self.lifecycle.remove(
            RideLifecycle(
                RideLifecycle::BROKEN_DOWN.0
                    | RideLifecycle::CRASHED.0
                    | RideLifecycle::TEST_IN_PROGRESS.0,
            ),
        );
    }

    /// Forget the last test run.
    pub const fn invalidate_test_results(&mut self) {
        self.lifecycle.remove(RideLifecycle::TESTED);
        self.test_results = None;
    }
}

#[cfg(test)]
mod tests {
    use parkway_types::{Direction, TileCoords};

    use super::*;

    fn two_station_ride() -> Ride {
        Ride::new(
            RideId::new(1),
            "Corkscrew",
            RideKind::Tracked,
            vec![Station::new(112), Station::new(128)],
        )
    }

    #[test]
    fn new_ride_is_closed_and_untested() {
        let ride = two_station_ride();
        assert_eq!(ride.status, RideStatus::Closed);
        assert_eq!(ride.station_count(), 2);
        assert!(ride.test_results.is_none());
    }

    #[test]
    fn station_locations_are_set_and_cleared() {
        let mut ride = two_station_ride();
        let loc = TileCoordsXYZD::new(TileCoords::new(3, 4), 112, Direction::from_masked(1));
        ride.set_exit_location(StationIndex::new(1), Some(loc));
        assert_eq!(ride.exit_location(StationIndex::new(1)), Some(loc));
        assert_eq!(ride.exit_location(StationIndex::new(0)), None);
        ride.set_exit_location(StationIndex::new(1), None);
        assert_eq!(ride.exit_location(StationIndex::new(1)), None);
        // Out of range is a no-op.
        ride.set_entrance_location(StationIndex::new(9), Some(loc));
        assert_eq!(ride.entrance_location(StationIndex::new(9)), None);
    }

    #[test]
    fn clearing_for_construction_keeps_indestructible_flag() {
        let mut ride = two_station_ride();
        ride.lifecycle.insert(RideLifecycle::BROKEN_DOWN | RideLifecycle::INDESTRUCTIBLE_TRACK);
        ride.clear_for_construction();
        assert!(!ride.lifecycle.contains(RideLifecycle::BROKEN_DOWN));
        assert!(ride.lifecycle.contains(RideLifecycle::INDESTRUCTIBLE_TRACK));
    }

    #[test]
    fn invalidating_tests_drops_results() {
        let mut ride = two_station_ride();
        ride.lifecycle.insert(RideLifecycle::TESTED);
        ride.test_results = Some(TestResults {
            excitement: 650,
            intensity: 420,
        });
        ride.invalidate_test_results();
        assert!(ride.test_results.is_none());
        assert!(!ride.lifecycle.contains(RideLifecycle::TESTED));
    }
}
