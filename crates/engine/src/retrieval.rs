//! Retrieval planning.
//!
//! A plan lists the items to set aside, nearest the open face first,
//! followed by the target extraction. The planner resolves only the
//! target's own corridor: it does not recurse into blockers of
//! blockers, higher layers iterate if they need multi-layer clearing.

use stowage_core::{Error, ItemId, OpenFace, Result, RetrievalPlan};

use crate::catalogue::Catalogue;
use crate::grid::OccupancyGrid;
use crate::visibility::{find_blocking_slots, is_item_visible};

/// Items currently blocking the target's extraction corridor, nearest
/// the open face first.
pub fn blocking_items(
    grid: &OccupancyGrid,
    catalogue: &Catalogue,
    face: OpenFace,
    id: &str,
) -> Result<Vec<ItemId>> {
    let item = catalogue
        .get(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    let slot = catalogue
        .slot_of(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    Ok(find_blocking_slots(grid, face, &item.region(), slot)
        .into_iter()
        .filter_map(|blocker| catalogue.id_of(blocker).cloned())
        .collect())
}

/// Builds the plan that frees the target item.
pub fn retrieval_plan(
    grid: &OccupancyGrid,
    catalogue: &Catalogue,
    face: OpenFace,
    id: &str,
) -> Result<RetrievalPlan> {
    let item = catalogue
        .get(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    let blockers = blocking_items(grid, catalogue, face, id)?;

    if blockers.is_empty() && is_item_visible(grid.dims(), face, &item.region()) {
        return Ok(RetrievalPlan::direct(id.to_string()));
    }
    Ok(RetrievalPlan::with_moves(blockers, id.to_string()))
}
