//! Command registry: turns a wire tag and payload back into a command.

use parkway_actions::{
    CommandType, GameCommand, RideEntranceExitPlaceAction, RideEntranceExitRemoveAction,
    StreamError, decode_into,
};

/// A default-constructed command of the given type, ready to be decoded into.
pub fn create(command_type: CommandType) -> Box<dyn GameCommand> {
    match command_type {
        CommandType::RideEntranceExitPlace => Box::new(RideEntranceExitPlaceAction::default()),
        CommandType::RideEntranceExitRemove => Box::new(RideEntranceExitRemoveAction::default()),
    }
}

/// Decode a payload produced by `encode_command`.
pub fn decode(command_type: CommandType, bytes: &[u8]) -> Result<Box<dyn GameCommand>, StreamError> {
    let mut command = create(command_type);
    decode_into(command.as_mut(), bytes)?;
    Ok(command)
}

/// Decode a payload identified by its raw wire tag.
pub fn decode_tagged(tag: u8, bytes: &[u8]) -> Result<Box<dyn GameCommand>, StreamError> {
    decode(CommandType::from_tag(tag)?, bytes)
}
