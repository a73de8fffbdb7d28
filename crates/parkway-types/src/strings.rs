//! The shared string catalog.
//!
//! Commands never build user-facing text themselves: they return a
//! [`StringId`] title, an optional message id, and a list of [`FormatArg`]s.
//! Clients render those through [`format_string`] (or their own localised
//! catalog keyed by the same ids).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StringId {
    /// Title for a failed entrance placement.
    CantBuildMoveEntranceForThisRideAttraction,
    /// Title for a failed exit placement.
    CantBuildMoveExitForThisRideAttraction,
    /// Title for a failed removal.
    CantRemoveThis,
    /// The ride is open or testing.
    MustBeClosedFirst,
    /// The ride's stations are locked by scenario rules.
    NotAllowedToModifyStation,
    /// The target volume is below the water line.
    RideCantBuildThisUnderwater,
    /// The target height exceeds the maximum.
    TooHigh,
    /// The park does not own the land.
    LandNotOwnedByPark,
    /// Something occupies the target volume; takes one `{STRINGID}` argument.
    ObjectInTheWay,
    /// The target volume crosses the water line.
    CannotBuildPartlyAboveAndPartlyBelowWater,
    /// The target volume cuts through the land surface.
    RaiseOrLowerLandFirst,
    /// Element storage is exhausted.
    TileElementLimitReached,
    /// Name of a footpath element.
    ElementFootpath,
    /// Name of a wall element.
    ElementWall,
    /// Name of a scenery element.
    ElementScenery,
    /// Name of a ride track element.
    ElementTrack,
    /// Name of a ride entrance or exit element.
    ElementEntrance,
}

impl StringId {
    /// English catalog text, with `{STRINGID}`, `{INT}` and `{MONEY}` placeholders.
    pub const fn template(self) -> &'static str {
        match self {
            Self::CantBuildMoveEntranceForThisRideAttraction => {
                "Can't build/move entrance for this ride/attraction..."
            }
            Self::CantBuildMoveExitForThisRideAttraction => {
                "Can't build/move exit for this ride/attraction..."
            }
            Self::CantRemoveThis => "Can't remove this...",
            Self::MustBeClosedFirst => "Ride must be closed first",
            Self::NotAllowedToModifyStation => "Not allowed to modify station for this ride",
            Self::RideCantBuildThisUnderwater => "Can't build this underwater!",
            Self::TooHigh => "Too high!",
            Self::LandNotOwnedByPark => "Land not owned by park!",
            Self::ObjectInTheWay => "{STRINGID} in the way",
            Self::CannotBuildPartlyAboveAndPartlyBelowWater => {
                "Can't build partly above and partly below water!"
            }
            Self::RaiseOrLowerLandFirst => "Raise or lower land first",
            Self::TileElementLimitReached => "Too many objects in game",
            Self::ElementFootpath => "Footpath",
            Self::ElementWall => "Wall",
            Self::ElementScenery => "Scenery",
            Self::ElementTrack => "Ride track",
            Self::ElementEntrance => "Ride entrance or exit",
        }
    }
}

/// An argument substituted into a catalog template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatArg {
    /// Another catalog string, for `{STRINGID}`.
    String(StringId),
    /// An integer, for `{INT}`.
    Int(i64),
    /// An amount of money, for `{MONEY}`.
    Money(Decimal),
}

/// Render a catalog string, consuming `args` in placeholder order.
///
/// Placeholders with no remaining argument, or whose argument has the
/// wrong kind, are left as-is.
pub fn format_string(id: StringId, args: &[FormatArg]) -> String {
    let mut out = String::new();
    let mut rest = id.template();
    let mut args = args.iter();

    while let Some(open) = rest.find('{') {
        let (before, tail) = rest.split_at(open);
        out.push_str(before);
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        let (token, after) = tail.split_at(close.saturating_add(1));
        match (token, args.next()) {
            ("{STRINGID}", Some(FormatArg::String(inner))) => out.push_str(inner.template()),
            ("{INT}", Some(FormatArg::Int(value))) => out.push_str(&value.to_string()),
            ("{MONEY}", Some(FormatArg::Money(value))) => out.push_str(&format!("${value}")),
            _ => out.push_str(token),
        }
        rest = after;
    }
    out.push_str(rest);
    out
}
