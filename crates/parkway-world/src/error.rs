//! Error types for the `parkway-world` crate.
//!
//! These are failures of the world model itself (storage exhausted, an
//! element index gone stale). Command outcomes are never reported through
//! [`WorldError`]; they are `ActionResult` values.

use parkway_types::{AgentId, RideId, TileCoords};

/// Errors that can occur during world storage operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The tile lies outside the map.
    #[error("tile {0} is outside the map")]
    TileOutOfBounds(TileCoords),

    /// No element slot is available, globally or on the tile.
    #[error("element limit reached at tile {tile} ({live} live elements, limit {limit})")]
    ElementLimitReached {
        /// The tile being written.
        tile: TileCoords,
        /// Live elements in the whole map.
        live: usize,
        /// The global element limit.
        limit: usize,
    },

    /// An element index does not exist on the tile.
    #[error("no element {index} on tile {tile}")]
    ElementNotFound {
        /// The tile.
        tile: TileCoords,
        /// The missing index.
        index: usize,
    },

    /// A ride with this index already exists.
    #[error("duplicate ride id: {0}")]
    DuplicateRide(RideId),

    /// An agent with this id already exists.
    #[error("duplicate agent id: {0}")]
    DuplicateAgent(AgentId),
}
