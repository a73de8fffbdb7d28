//! Re-running a recorded session against a fresh world.
//!
//! Every participant of a networked session runs the same command stream
//! through [`GameActions::execute`]; if their worlds started identical they
//! must end identical. [`replay`] is that check done locally: it refuses to
//! start from a world whose checksum differs from the log header, then
//! reports the checksum it finished on.

use parkway_world::ParkWorld;

use crate::command_log::{CommandLog, LogError};
use crate::dispatch::GameActions;
use crate::registry;

/// What a replay did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    /// Records whose command succeeded again.
    pub executed: usize,
    /// Records whose command failed on replay. Non-zero means the worlds
    /// have diverged.
    pub rejected: usize,
    /// World checksum after the last record.
    pub final_checksum: u64,
}

impl ReplayReport {
    /// Whether every record replayed successfully.
    pub const fn is_clean(&self) -> bool {
        self.rejected == 0
    }
}

/// Decode and execute every record of `log` against `world`, in order.
pub fn replay(world: &mut ParkWorld, log: &CommandLog) -> Result<ReplayReport, LogError> {
    let expected = log.header().initial_checksum;
    let actual = world.checksum();
    if actual != expected {
        return Err(LogError::InitialStateMismatch { expected, actual });
    }

    let mut actions = GameActions::new();
    let mut executed = 0usize;
    let mut rejected = 0usize;
    for record in log.records() {
        let mut command = registry::decode(record.command_type, &record.payload)?;
        let result = actions.execute(world, command.as_mut());
        if result.is_ok() {
            executed = executed.saturating_add(1);
        } else {
            tracing::warn!(
                sequence = record.sequence,
                command = ?record.command_type,
                status = ?result.status,
                "Recorded command failed on replay"
            );
            rejected = rejected.saturating_add(1);
        }
    }

    let report = ReplayReport {
        executed,
        rejected,
        final_checksum: world.checksum(),
    };
    tracing::info!(
        executed = report.executed,
        rejected = report.rejected,
        checksum = format_args!("{:#018x}", report.final_checksum),
        "Replay finished"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parkway_actions::{RideEntranceExitPlaceAction, RideEntranceExitRemoveAction};
    use parkway_types::{Direction, RideId, RideKind, StationIndex, TileCoords};
    use parkway_world::{MapSettings, Ride, Station};

    use super::*;

    const RIDE: RideId = RideId::new(1);
    const STATION: StationIndex = StationIndex::new(0);

    fn park() -> ParkWorld {
        let mut world = ParkWorld::new(&MapSettings {
            size: 12,
            max_elements: 64,
            max_elements_per_tile: 8,
            base_height: 112,
            water_height: 0,
        });
        world
            .add_ride(Ride::new(RIDE, "Ferris Wheel", RideKind::Flat, vec![Station::new(112)]))
            .unwrap();
        world
    }

    fn place(x: i32, is_exit: bool) -> RideEntranceExitPlaceAction {
        RideEntranceExitPlaceAction::new(
            TileCoords::new(x, 4),
            Direction::from_masked(1),
            RIDE,
            STATION,
            is_exit,
        )
    }

    fn record_session(world: &mut ParkWorld) -> CommandLog {
        let mut actions = GameActions::with_log(CommandLog::new(world.checksum()));
        assert!(actions.execute(world, &mut place(2, false)).is_ok());
        assert!(actions.execute(world, &mut place(3, true)).is_ok());
        assert!(actions.execute(world, &mut place(6, false)).is_ok());
        let mut remove = RideEntranceExitRemoveAction::new(TileCoords::new(3, 4), RIDE, STATION, true);
        assert!(actions.execute(world, &mut remove).is_ok());
        actions.take_log().unwrap()
    }

    #[test]
    fn replay_converges_on_the_recorded_state() {
        let mut live = park();
        let log = record_session(&mut live);
        assert_eq!(log.len(), 4);

        let bytes = log.to_bytes().unwrap();
        let decoded = CommandLog::decode(&mut bytes.as_slice()).unwrap();

        let mut fresh = park();
        let report = replay(&mut fresh, &decoded).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.executed, 4);
        assert_eq!(report.final_checksum, live.checksum());
    }

    #[test]
    fn replay_refuses_a_different_starting_world() {
        let mut live = park();
        let log = record_session(&mut live);

        let mut other = park();
        other.add_litter(TileCoords::new(0, 0), 112);
        let result = replay(&mut other, &log);
        assert!(matches!(result, Err(LogError::InitialStateMismatch { .. })));
    }

    #[test]
    fn divergent_world_reports_rejections() {
        let mut live = park();
        let mut log = CommandLog::new(live.checksum());
        let mut remove = RideEntranceExitRemoveAction::new(TileCoords::new(9, 9), RIDE, STATION, false);
        // Recorded directly: the command never succeeded here either.
        log.record(&mut remove).unwrap();

        let report = replay(&mut live, &log).unwrap();
        assert_eq!(report.rejected, 1);
        assert!(!report.is_clean());
    }
}
