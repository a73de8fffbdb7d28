//! Type-safe identifier wrappers around small integers.
//!
//! Every entity reference in the world core has a strongly-typed ID so that
//! a ride index can never be passed where a station index is expected. The
//! inner widths match the wire format used by command serialisation, which
//! is why these are plain integers rather than UUIDs: a command log must be
//! byte-identical on every peer.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an unsigned integer with standard derives.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl $name {
            /// Wrap a raw index value.
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Return the inner index value.
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_index! {
    /// Index of a ride in the park's ride registry.
    RideId(u16)
}

define_index! {
    /// Index of a station within a ride (0-based).
    StationIndex(u8)
}

define_index! {
    /// Identifier of a park visitor (agent).
    AgentId(u32)
}

define_index! {
    /// Identifier of the player who issued a command.
    PlayerId(u8)
}

impl StationIndex {
    /// Return the index as a `usize` for slice lookups.
    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_inner() {
        assert_eq!(RideId::new(7).to_string(), "7");
        assert_eq!(StationIndex::new(2).to_string(), "2");
    }

    #[test]
    fn conversions_roundtrip() {
        let ride = RideId::from(42);
        assert_eq!(u16::from(ride), 42);
        assert_eq!(ride.into_inner(), 42);
    }

    #[test]
    fn ids_serialize_transparently_as_numbers() {
        let json = serde_json::to_string(&AgentId::new(9)).ok();
        assert_eq!(json.as_deref(), Some("9"));
    }
}
