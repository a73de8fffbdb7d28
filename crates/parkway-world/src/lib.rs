//! World model and collaborator interfaces for the Parkway world core.
//!
//! Commands reach world state only through [`WorldRead`] (Query) and
//! [`WorldWrite`] (Execute). [`ParkWorld`] is the in-memory implementation
//! of both, owning tile storage, rides, visitors, litter, footpath queue
//! chains, animations and redraw bookkeeping.
//!
//! # Modules
//!
//! - [`access`] -- The read and write collaborator traits
//! - [`agent`] -- Visitors and litter
//! - [`clearance`] -- Land, water and element collision checks
//! - [`element`] -- Tile elements
//! - [`error`] -- World storage errors
//! - [`footpath`] -- Path edges, queue chains, maze hedges
//! - [`hash`] -- Deterministic state checksums
//! - [`park`] -- The in-memory park
//! - [`ride`] -- Rides and stations
//! - [`tile_map`] -- Tiles, surfaces and element capacity

pub mod access;
pub mod agent;
pub mod clearance;
pub mod element;
pub mod error;
pub mod footpath;
pub mod hash;
pub mod park;
pub mod ride;
pub mod tile_map;

pub use access::{
    ClearanceCheck, ClearanceFailure, ClearanceRequest, ElementIndex, GroundFlags, WorldRead,
    WorldWrite,
};
pub use agent::{Agent, AgentState, Litter};
pub use clearance::{ClearancePlan, plan_clearance};
pub use element::{
    ElementKind, EntranceElement, FULL_TILE_QUADRANTS, PathElement, SceneryElement, TileElement,
    TrackElement,
};
pub use error::WorldError;
pub use hash::{StateHasher, checksum_of};
pub use park::{Animation, ParkWorld};
pub use ride::{Ride, RideLifecycle, Station, TestResults};
pub use tile_map::{MapSettings, Ownership, Surface, Tile, TileMap};
