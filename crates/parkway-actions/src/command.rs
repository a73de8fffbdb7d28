//! The contract every world-mutating command implements.
//!
//! A command is constructed with fixed parameters, validated by
//! [`GameCommand::query`] against a read-only world, and applied by
//! [`GameCommand::execute`] against a mutable one. Execute re-validates
//! rather than trusting an earlier Query, since the world may have changed
//! between the two calls.

use parkway_types::{ActionResult, CommandFlags, PlayerId};
use parkway_world::{WorldRead, WorldWrite};
use serde::{Deserialize, Serialize};

use crate::error::StreamError;
use crate::flags::ActionCapabilities;
use crate::params::ParameterVisitor;
use crate::stream::DataSerialiser;

/// Wire tag identifying a concrete command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CommandType {
    /// Place or move a ride entrance or exit.
    RideEntranceExitPlace,
    /// Remove a ride entrance or exit.
    RideEntranceExitRemove,
}

impl CommandType {
    /// Every registered command type.
    pub const ALL: [Self; 2] = [Self::RideEntranceExitPlace, Self::RideEntranceExitRemove];

    /// The tag written on the wire.
    pub const fn tag(self) -> u8 {
        match self {
            Self::RideEntranceExitPlace => 12,
            Self::RideEntranceExitRemove => 13,
        }
    }

    /// Resolve a wire tag.
    pub fn from_tag(tag: u8) -> Result<Self, StreamError> {
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or(StreamError::UnknownCommandType(tag))
    }
}

/// Fields every command carries, serialised before its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandBase {
    /// Id assigned by the server when the command is relayed.
    pub network_id: u32,
    /// Permission flags.
    pub flags: CommandFlags,
    /// Issuing player.
    pub player: PlayerId,
}

impl CommandBase {
    /// Encode or decode the base fields.
    pub fn serialise(&mut self, stream: &mut DataSerialiser<'_>) -> Result<(), StreamError> {
        stream.serialise(&mut self.network_id)?;
        stream.serialise(&mut self.flags)?;
        stream.serialise(&mut self.player)
    }
}

/// A validated world-mutation request with separate Query and Execute passes.
pub trait GameCommand: core::fmt::Debug {
    /// Wire tag for this command.
    fn command_type(&self) -> CommandType;

    /// Base fields.
    fn base(&self) -> &CommandBase;

    /// Base fields, mutably.
    fn base_mut(&mut self) -> &mut CommandBase;

    /// Permission flags.
    fn flags(&self) -> CommandFlags {
        self.base().flags
    }

    /// Replace the permission flags.
    fn set_flags(&mut self, flags: CommandFlags) {
        self.base_mut().flags = flags;
    }

    /// Walk every parameter by name, in serialisation order.
    fn accept_parameters(&self, visitor: &mut dyn ParameterVisitor);

    /// What the dispatcher may do with this command. Implementations may add
    /// to the base set but never remove from it.
    fn capabilities(&self) -> ActionCapabilities {
        ActionCapabilities::base(self.flags())
    }

    /// Encode or decode the command's own fields.
    fn serialise_fields(&mut self, stream: &mut DataSerialiser<'_>) -> Result<(), StreamError>;

    /// Encode or decode the whole command: base fields, then its own.
    fn serialise(&mut self, stream: &mut DataSerialiser<'_>) -> Result<(), StreamError> {
        self.base_mut().serialise(stream)?;
        self.serialise_fields(stream)
    }

    /// Validate without touching the world.
    fn query(&self, world: &dyn WorldRead) -> ActionResult;

    /// Re-validate and apply.
    fn execute(&self, world: &mut dyn WorldWrite) -> ActionResult;
}

/// Encode a command to bytes.
pub fn encode_command(command: &mut dyn GameCommand) -> Result<Vec<u8>, StreamError> {
    let mut stream = DataSerialiser::saving();
    command.serialise(&mut stream)?;
    Ok(stream.into_bytes())
}

/// Decode bytes into `command`, which must be of the matching type. Every
/// byte must be consumed.
pub fn decode_into(command: &mut dyn GameCommand, bytes: &[u8]) -> Result<(), StreamError> {
    let mut stream = DataSerialiser::loading(bytes);
    command.serialise(&mut stream)?;
    stream.finish()
}
