//! Command capability flags.
//!
//! Capabilities describe how the dispatcher may treat a command (run it while
//! paused, keep it local) as opposed to [`CommandFlags`], which describe what
//! a particular invocation is permitted to do.

use parkway_types::CommandFlags;
use serde::{Deserialize, Serialize};

/// A strongly typed set of command capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActionCapabilities(u16);

impl ActionCapabilities {
    /// No capabilities.
    pub const NONE: Self = Self(0);
    /// The command may run while the game is paused.
    pub const ALLOW_WHILE_PAUSED: Self = Self(1 << 0);
    /// The command affects only the local client and is never shared or logged.
    pub const CLIENT_ONLY: Self = Self(1 << 1);
    /// The command is only available in the scenario editor.
    pub const EDITOR_ONLY: Self = Self(1 << 2);
    /// The command is left out of replays.
    pub const IGNORE_FOR_REPLAYS: Self = Self(1 << 3);

    /// The capabilities every command has by virtue of its permission flags.
    ///
    /// Ghost and no-spend invocations are client-only; allow-during-paused
    /// invocations may run while paused.
    pub const fn base(flags: CommandFlags) -> Self {
        let mut bits = 0;
        if flags.contains(CommandFlags::GHOST) || flags.contains(CommandFlags::NO_SPEND) {
            bits |= Self::CLIENT_ONLY.0;
        }
        if flags.contains(CommandFlags::ALLOW_DURING_PAUSED) {
            bits |= Self::ALLOW_WHILE_PAUSED.0;
        }
        Self(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether every capability in `other` is present.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl core::ops::BitOr for ActionCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
