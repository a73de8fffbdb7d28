//! Error types for the `parkway-actions` crate.
//!
//! Command outcomes are `ActionResult` values, not errors. The only failures
//! reported as Rust errors are wire-format problems while decoding a command.

/// Errors that can occur while decoding a command from a byte stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The stream ended before a field was complete.
    #[error("stream ended early: needed {needed} bytes at offset {offset}, {remaining} remaining")]
    UnexpectedEnd {
        /// Read offset where the field starts.
        offset: usize,
        /// Bytes the field needs.
        needed: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },

    /// A field decoded to a value outside its domain.
    #[error("invalid value {value} for field {field}")]
    InvalidValue {
        /// Field kind.
        field: &'static str,
        /// The raw value read.
        value: u32,
    },

    /// Bytes were left over after the command was decoded.
    #[error("{0} trailing bytes after command")]
    TrailingBytes(usize),

    /// The command type tag is not registered.
    #[error("unknown command type tag {0}")]
    UnknownCommandType(u8),
}
