//! Named parameter enumeration for audit and replay logs.
//!
//! Each command walks its fields in wire order through a
//! [`ParameterVisitor`]. [`FieldRecorder`] is the stock visitor that just
//! collects them.

use parkway_types::{Direction, RideId, StationIndex, TileCoords};
use serde::{Deserialize, Serialize};

/// A single named command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamValue {
    /// A tile position.
    Location(TileCoords),
    /// A facing.
    Direction(Direction),
    /// A ride reference.
    Ride(RideId),
    /// A station index.
    Station(StationIndex),
    /// A boolean switch.
    Bool(bool),
}

impl core::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Location(tile) => write!(f, "{tile}"),
            Self::Direction(direction) => write!(f, "{direction}"),
            Self::Ride(ride) => write!(f, "{ride}"),
            Self::Station(station) => write!(f, "{station}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Receives a command's parameters, one call per field.
pub trait ParameterVisitor {
    /// Visit one named field.
    fn visit(&mut self, name: &'static str, value: ParamValue);
}

/// Collects visited parameters in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecorder {
    fields: Vec<(&'static str, ParamValue)>,
}

impl FieldRecorder {
    /// An empty recorder.
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// The recorded fields, in visit order.
    pub fn fields(&self) -> &[(&'static str, ParamValue)] {
        &self.fields
    }

    /// Field names only, in visit order.
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
    }
}

impl ParameterVisitor for FieldRecorder {
    fn visit(&mut self, name: &'static str, value: ParamValue) {
        self.fields.push((name, value));
    }
}

impl core::fmt::Display for FieldRecorder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
