//! Feasible placement enumeration.
//!
//! Candidates are produced in a fixed order: the six orientations in
//! [`Orientation::ALL`] order, positions within each orientation in the
//! grid's row-major order. Rankers break score ties by this order, so it
//! is part of the engine contract.

use stowage_core::{Dims, Orientation, Placement};

use crate::grid::OccupancyGrid;

/// Lazily enumerates every feasible `(position, orientation)` pair for
/// an item of the given original dimensions.
pub fn find_valid_placements(
    grid: &OccupancyGrid,
    orig_dims: Dims,
) -> impl Iterator<Item = Placement> + '_ {
    Orientation::ALL.into_iter().flat_map(move |orientation| {
        let eff_dims = orientation.apply(orig_dims);
        grid.find_empty_positions(eff_dims)
            .map(move |position| Placement {
                position,
                orientation,
                eff_dims,
            })
    })
}

/// True iff at least one feasible placement exists for the dimensions.
pub fn check_space_availability(grid: &OccupancyGrid, orig_dims: Dims) -> bool {
    find_valid_placements(grid, orig_dims).next().is_some()
}
