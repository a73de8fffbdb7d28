//! Permission flags carried by a command.
//!
//! The set travels with the command on the wire and is copied verbatim onto
//! nested sub-commands, so a ghost placement stays a ghost all the way down.

use serde::{Deserialize, Serialize};

/// A strongly typed set of command permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct CommandFlags(u32);

impl CommandFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The clearance check is running in apply mode. Added internally by
    /// Execute; never recorded on a command.
    pub const APPLY: Self = Self(1 << 0);
    /// The command may run while the game is paused.
    pub const ALLOW_DURING_PAUSED: Self = Self(1 << 3);
    /// The command is a non-authoritative preview placement.
    pub const GHOST: Self = Self(1 << 6);
    /// The command must not spend park money.
    pub const NO_SPEND: Self = Self(1 << 5);
    /// The command arrived from the network.
    pub const NETWORKED: Self = Self(1 << 31);
    /// The command places path scenery.
    pub const PATH_SCENERY: Self = Self(1 << 7);

    /// Every flag that may be recorded on a command.
    const RECORDABLE: u32 = Self::ALLOW_DURING_PAUSED.0
        | Self::GHOST.0
        | Self::NO_SPEND.0
        | Self::NETWORKED.0
        | Self::PATH_SCENERY.0;

    /// Raw bit value, for serialisation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Rebuild a set from raw bits, keeping only flags a command may carry.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::RECORDABLE)
    }

    /// Whether every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the ghost flag is set.
    pub const fn is_ghost(self) -> bool {
        self.contains(Self::GHOST)
    }

    /// The union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// This set without the flags in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl core::ops::BitOr for CommandFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl core::ops::BitOrAssign for CommandFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
