//! Shared type definitions for the Parkway world core.
//!
//! This crate is the single source of truth for the value types that cross
//! crate boundaries: identifiers, coordinates, status and category enums, the
//! string catalog, and the [`ActionResult`] every command returns.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for entity references
//! - [`coords`] -- Tile and world coordinates, directions, volumes
//! - [`enums`] -- Status vocabulary, ride status, entrance types
//! - [`flags`] -- Command permission flags
//! - [`strings`] -- The shared string catalog and argument formatting
//! - [`result`] -- The command outcome value type

pub mod coords;
pub mod enums;
pub mod flags;
pub mod ids;
pub mod result;
pub mod strings;

// Re-export all public types at crate root for convenience.
pub use coords::{
    COORDS_XY_STEP, COORDS_Z_STEP, CoordsXYZ, Direction, LAND_HEIGHT_STEP, TileCoords,
    TileCoordsXYZD, TileVolume,
};
pub use enums::{AnimationKind, EntranceType, ExpenditureType, RideKind, RideStatus, Status};
pub use flags::CommandFlags;
pub use ids::{AgentId, PlayerId, RideId, StationIndex};
pub use result::{ActionResult, Money};
pub use strings::{FormatArg, StringId, format_string};
