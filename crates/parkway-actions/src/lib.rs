//! Command contract and construction commands for the Parkway world core.
//!
//! Every world mutation is a [`GameCommand`]: fixed parameters, a pure
//! Query pass over `&dyn WorldRead`, and an Execute pass over
//! `&mut dyn WorldWrite` that re-runs the same checks before mutating.
//! Commands compose through the [`nested`] dispatcher and travel as bytes
//! through the bidirectional [`DataSerialiser`].
//!
//! # Modules
//!
//! - [`command`] -- The command trait, base fields and type tags
//! - [`error`] -- Wire decoding errors
//! - [`flags`] -- Capability flags
//! - [`nested`] -- Running commands from inside commands
//! - [`params`] -- Named parameter enumeration
//! - [`ride_entrance_exit`] -- Entrance/exit placement and removal
//! - [`stream`] -- Binary encode/decode

pub mod command;
pub mod error;
pub mod flags;
pub mod nested;
pub mod params;
pub mod ride_entrance_exit;
pub mod stream;

pub use command::{CommandBase, CommandType, GameCommand, decode_into, encode_command};
pub use error::StreamError;
pub use flags::ActionCapabilities;
pub use nested::{execute_nested, query_nested};
pub use params::{FieldRecorder, ParamValue, ParameterVisitor};
pub use ride_entrance_exit::{
    MAX_RIDE_ENTRANCE_OR_EXIT_HEIGHT, RIDE_ENTRANCE_HEIGHT, RIDE_EXIT_HEIGHT,
    RideEntranceExitPlaceAction, RideEntranceExitRemoveAction, track_place_query,
};
pub use stream::{DataSerialiser, StreamValue};
