//! Session layer for the Parkway world core.
//!
//! Wraps the command contract from `parkway-actions` in what a running park
//! session needs: configuration, a single dispatch entry point, decoding
//! commands from the wire, and a log that can be replayed to prove two
//! worlds stayed in lockstep.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides
//! - [`dispatch`] -- Query-then-Execute entry point
//! - [`registry`] -- Wire tag to command decoding
//! - [`command_log`] -- Ordered record of executed commands
//! - [`replay`] -- Re-running a log against a fresh world

pub mod command_log;
pub mod config;
pub mod dispatch;
pub mod registry;
pub mod replay;

pub use command_log::{CommandLog, LogError, LogHeader, LogRecord};
pub use config::{ConfigError, ParkConfig};
pub use dispatch::GameActions;
pub use replay::{ReplayReport, replay};
