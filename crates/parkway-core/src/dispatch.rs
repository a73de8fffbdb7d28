//! Top-level command entry point.
//!
//! [`GameActions::execute`] is the only path by which a session mutates the
//! world: it runs Query first and Execute only if Query succeeded. Commands
//! that succeed and are not client-only are appended to the attached
//! [`CommandLog`], which is what makes a session replayable.

use parkway_actions::{ActionCapabilities, FieldRecorder, GameCommand};
use parkway_types::ActionResult;
use parkway_world::{WorldRead, WorldWrite};

use crate::command_log::CommandLog;

/// Session-level dispatcher.
#[derive(Debug, Default)]
pub struct GameActions {
    log: Option<CommandLog>,
}

impl GameActions {
    /// A dispatcher that records nothing.
    pub const fn new() -> Self {
        Self { log: None }
    }

    /// A dispatcher that records successful commands into `log`.
    pub const fn with_log(log: CommandLog) -> Self {
        Self { log: Some(log) }
    }

    /// The attached log, if any.
    pub const fn log(&self) -> Option<&CommandLog> {
        self.log.as_ref()
    }

    /// Detach and return the log.
    pub const fn take_log(&mut self) -> Option<CommandLog> {
        self.log.take()
    }

    /// Validate `command` without touching the world.
    pub fn query(world: &dyn WorldRead, command: &dyn GameCommand) -> ActionResult {
        command.query(world)
    }

    /// Query, then Execute if Query succeeded. Returns the result of
    /// whichever phase ended the attempt.
    pub fn execute<W: WorldWrite>(
        &mut self,
        world: &mut W,
        command: &mut dyn GameCommand,
    ) -> ActionResult {
        let mut params = FieldRecorder::new();
        command.accept_parameters(&mut params);

        let query = command.query(&*world);
        if !query.is_ok() {
            tracing::info!(
                command = ?command.command_type(),
                status = ?query.status,
                %params,
                "Command rejected"
            );
            return query;
        }

        let result = command.execute(world);
        tracing::info!(
            command = ?command.command_type(),
            status = ?result.status,
            cost = ?result.cost,
            %params,
            "Command executed"
        );

        if result.is_ok() {
            self.record(command);
        }
        result
    }

    fn record(&mut self, command: &mut dyn GameCommand) {
        let capabilities = command.capabilities();
        if capabilities.contains(ActionCapabilities::CLIENT_ONLY)
            || capabilities.contains(ActionCapabilities::IGNORE_FOR_REPLAYS)
        {
            return;
        }
        let Some(log) = self.log.as_mut() else {
            return;
        };
        if let Err(error) = log.record(command) {
            tracing::error!(%error, command = ?command.command_type(), "Failed to record command");
        }
    }
}
