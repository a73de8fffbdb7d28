//! Clearance checking against land, water, and stacked elements.
//!
//! The check is a pure function of the map. It yields an explicit
//! [`ClearancePlan`]: the cost and ground flags on success plus the indices
//! of removable scenery, or the failure message and its arguments. Apply mode
//! acts on the plan; query mode just reports it.

use parkway_types::{FormatArg, Money, StringId};

use crate::access::{ClearanceCheck, ClearanceFailure, ClearanceRequest, ElementIndex, GroundFlags};
use crate::element::ElementKind;
use crate::tile_map::TileMap;

/// Outcome of a passed clearance check, with what apply mode would remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearancePlan {
    /// The cost and ground flags reported to the command.
    pub check: ClearanceCheck,
    /// Scenery in the volume that clearing would remove, in ascending order.
    pub removable: Vec<ElementIndex>,
}

/// Check whether the requested volume can be built in.
///
/// The surface is checked first (water line, then land), then every
/// non-ghost element that intersects the volume. Small scenery is
/// removable at its removal price; anything else blocks.
pub fn plan_clearance(map: &TileMap, request: &ClearanceRequest) -> Result<ClearancePlan, ClearanceFailure> {
    let volume = request.volume;
    let Some(tile) = map.tile(volume.tile) else {
        return Err(ClearanceFailure {
            message: StringId::LandNotOwnedByPark,
            args: Vec::new(),
        });
    };

    let mut ground = GroundFlags::default();
    let surface = tile.surface;

    if surface.water_z > 0 && surface.water_z > volume.base_z && surface.base_z < volume.clearance_z {
        if surface.water_z < volume.clearance_z {
            return Err(ClearanceFailure {
                message: StringId::CannotBuildPartlyAboveAndPartlyBelowWater,
                args: Vec::new(),
            });
        }
        ground.underwater = true;
    }

    if volume.base_z < surface.base_z && volume.clearance_z > surface.base_z {
        return Err(ClearanceFailure {
            message: StringId::RaiseOrLowerLandFirst,
            args: Vec::new(),
        });
    }

    let mut cost = Money::ZERO;
    let mut removable = Vec::new();
    for (index, element) in tile.elements.iter().enumerate() {
        if element.ghost
            || !element.intersects(volume.base_z, volume.clearance_z, request.quadrants)
        {
            continue;
        }
        if let ElementKind::SmallScenery(scenery) = &element.kind {
            cost = cost.saturating_add(scenery.removal_price);
            removable.push(index);
            continue;
        }
        return Err(ClearanceFailure {
            message: StringId::ObjectInTheWay,
            args: vec![FormatArg::String(element.kind.name())],
        });
    }

    Ok(ClearancePlan {
        check: ClearanceCheck { cost, ground },
        removable,
    })
}
