//! Park visitors, as far as ride construction is concerned.

use parkway_types::{AgentId, RideId};
use serde::{Deserialize, Serialize};

/// What a visitor is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    /// Wandering the park.
    Walking,
    /// Standing in a ride queue.
    Queuing,
    /// On a ride.
    OnRide,
}

/// A park visitor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent {
    /// Unique visitor id.
    pub id: AgentId,
    /// The ride the visitor is queuing for or riding, if any.
    pub current_ride: Option<RideId>,
    /// Current activity.
    pub state: AgentState,
}

impl Agent {
    /// A visitor wandering the park.
    pub const fn walking(id: AgentId) -> Self {
        Self {
            id,
            current_ride: None,
            state: AgentState::Walking,
        }
    }

    /// A visitor engaged with `ride` in `state`.
    pub const fn on(id: AgentId, ride: RideId, state: AgentState) -> Self {
        Self {
            id,
            current_ride: Some(ride),
            state,
        }
    }

    /// Send the visitor off the ride and back into the park.
    pub const fn evict(&mut self) {
        self.current_ride = None;
        self.state = AgentState::Walking;
    }
}

/// A piece of litter lying on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Litter {
    /// Tile the litter lies on.
    pub tile: parkway_types::TileCoords,
    /// Height, in world units.
    pub z: i32,
}
