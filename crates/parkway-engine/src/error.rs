//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup, session and replay so
//! `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: parkway_core::ConfigError,
    },

    /// Building the demo park failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: parkway_world::WorldError,
    },

    /// Encoding, decoding or replaying the command log failed.
    #[error("command log error: {source}")]
    Log {
        /// The underlying log error.
        #[from]
        source: parkway_core::LogError,
    },

    /// The replayed world ended somewhere other than the live one.
    #[error("replay diverged: live={live:#018x}, replayed={replayed:#018x}, rejected={rejected}")]
    Diverged {
        /// Checksum of the live world when recording stopped.
        live: u64,
        /// Checksum the replay finished on.
        replayed: u64,
        /// Records that failed during replay.
        rejected: usize,
    },
}
