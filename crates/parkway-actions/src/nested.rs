//! Running one command from inside another.
//!
//! The sub-command inherits the parent's permission flags, so a ghost stays a
//! ghost at every depth. Its result comes back untouched; callers turn a
//! failure into an early return with [`ActionResult::into_outcome`] and `?`.

use parkway_types::{ActionResult, CommandFlags};
use parkway_world::{WorldRead, WorldWrite};

use crate::command::GameCommand;

/// Query `sub` with the parent's flags.
pub fn query_nested(
    parent_flags: CommandFlags,
    sub: &mut dyn GameCommand,
    world: &dyn WorldRead,
) -> ActionResult {
    sub.set_flags(parent_flags);
    let result = sub.query(world);
    tracing::debug!(command = ?sub.command_type(), status = ?result.status, "Nested query");
    result
}

/// Execute `sub` with the parent's flags.
pub fn execute_nested(
    parent_flags: CommandFlags,
    sub: &mut dyn GameCommand,
    world: &mut dyn WorldWrite,
) -> ActionResult {
    sub.set_flags(parent_flags);
    let result = sub.execute(world);
    tracing::debug!(command = ?sub.command_type(), status = ?result.status, "Nested execute");
    result
}
