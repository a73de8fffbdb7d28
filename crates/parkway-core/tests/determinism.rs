//! Replay convergence: a recorded session replayed on an identical fresh
//! world must end on the same checksum, whatever the command mix.

#![allow(clippy::unwrap_used)]

use parkway_actions::{GameCommand, RideEntranceExitPlaceAction, RideEntranceExitRemoveAction};
use parkway_core::{CommandLog, GameActions, replay};
use parkway_types::{CommandFlags, Direction, RideId, RideKind, StationIndex, TileCoords};
use parkway_world::{MapSettings, ParkWorld, Ride, Station};
use proptest::prelude::*;
use rust_decimal_macros::dec;

const RIDE: RideId = RideId::new(0);

#[derive(Debug, Clone)]
enum Op {
    Place {
        x: i32,
        y: i32,
        direction: u8,
        station: u8,
        is_exit: bool,
        ghost: bool,
    },
    Remove {
        x: i32,
        y: i32,
        station: u8,
        is_exit: bool,
    },
}

impl Op {
    const fn is_preview(&self) -> bool {
        matches!(self, Self::Place { ghost: true, .. })
    }

    fn command(&self) -> Box<dyn GameCommand> {
        match *self {
            Self::Place {
                x,
                y,
                direction,
                station,
                is_exit,
                ghost,
            } => {
                let flags = if ghost {
                    CommandFlags::GHOST
                } else {
                    CommandFlags::NONE
                };
                Box::new(
                    RideEntranceExitPlaceAction::new(
                        TileCoords::new(x, y),
                        Direction::from_masked(direction),
                        RIDE,
                        StationIndex::new(station),
                        is_exit,
                    )
                    .with_flags(flags),
                )
            }
            Self::Remove {
                x,
                y,
                station,
                is_exit,
            } => Box::new(RideEntranceExitRemoveAction::new(
                TileCoords::new(x, y),
                RIDE,
                StationIndex::new(station),
                is_exit,
            )),
        }
    }
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0_i32..8, 0_i32..8, 0_u8..4, 0_u8..3, any::<bool>(), any::<bool>()).prop_map(
            |(x, y, direction, station, is_exit, ghost)| Op::Place {
                x,
                y,
                direction,
                station,
                is_exit,
                ghost,
            }
        ),
        1 => (0_i32..8, 0_i32..8, 0_u8..3, any::<bool>()).prop_map(|(x, y, station, is_exit)| {
            Op::Remove {
                x,
                y,
                station,
                is_exit,
            }
        }),
    ]
}

fn park() -> ParkWorld {
    let mut world = ParkWorld::new(&MapSettings {
        size: 8,
        max_elements: 48,
        max_elements_per_tile: 4,
        base_height: 112,
        water_height: 0,
    });
    world
        .add_ride(Ride::new(
            RIDE,
            "Mine Train",
            RideKind::Tracked,
            vec![Station::new(112), Station::new(112)],
        ))
        .unwrap();
    world.add_scenery(TileCoords::new(3, 3), 112, dec!(5)).unwrap();
    world.add_path(TileCoords::new(5, 5), 112, true, 0).unwrap();
    world
}

proptest! {
    #[test]
    fn replay_reaches_the_recorded_checksum(ops in prop::collection::vec(op(), 1..24)) {
        let mut live = park();
        let mut actions = GameActions::with_log(CommandLog::new(live.checksum()));
        // Previews are shown and discarded before the next command, and never
        // reach the log.
        for op in &ops {
            let _ = actions.execute(&mut live, op.command().as_mut());
            if op.is_preview() {
                live.remove_ghosts();
            }
        }
        let log = actions.take_log().unwrap();

        let bytes = log.to_bytes().unwrap();
        let decoded = CommandLog::decode(&mut bytes.as_slice()).unwrap();
        let mut fresh = park();
        let report = replay(&mut fresh, &decoded).unwrap();

        prop_assert!(report.is_clean());
        prop_assert_eq!(report.executed, log.len());
        prop_assert_eq!(report.final_checksum, live.checksum());
    }

    #[test]
    fn identical_sessions_hash_identically(ops in prop::collection::vec(op(), 1..16)) {
        let mut first = park();
        let mut second = park();
        let mut actions = GameActions::new();
        for op in &ops {
            let a = actions.execute(&mut first, op.command().as_mut());
            let b = actions.execute(&mut second, op.command().as_mut());
            prop_assert_eq!(a, b);
        }
        prop_assert_eq!(first.checksum(), second.checksum());
    }
}
