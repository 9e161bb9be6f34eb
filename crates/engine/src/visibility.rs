//! Visibility, blocking and accessibility toward the open face.
//!
//! The open face induces an extraction axis; every query here is a
//! straight-line model along that axis. A cell is visible when nothing
//! foreign sits between it and the open face; an item blocks a target
//! when it occupies the target's extraction corridor, the prism between
//! the target's near face and the open face matching the target's
//! cross-section. Items sharing the same depth plane outside that
//! footprint do not block.

use stowage_core::{Axis, BoxRegion, Coord, Dims, OpenFace};

use crate::grid::{OccupancyGrid, SlotId};

/// Weight of the visibility component in the accessibility score.
const WEIGHT_VISIBILITY: f64 = 0.4;
/// Weight of the blocker component.
const WEIGHT_BLOCKERS: f64 = 0.4;
/// Weight of the depth-distance component.
const WEIGHT_DISTANCE: f64 = 0.2;
/// Points deducted from the 40-point blocker budget per blocking item.
const BLOCKER_PENALTY: f64 = 10.0;

fn assemble(axis: Axis, along: u32, cross_a: u32, cross_b: u32) -> Coord {
    match axis {
        Axis::X => Coord::new(along, cross_a, cross_b),
        Axis::Y => Coord::new(cross_a, along, cross_b),
        Axis::Z => Coord::new(cross_a, cross_b, along),
    }
}

/// True iff the item's extraction-side face lies on the open face.
///
/// For faces extracting toward the origin this is a minimum coordinate
/// of zero; for the far faces it is a maximum coordinate equal to the
/// container extent. (The far-face convention is deliberately the
/// item's extraction-side face, not its near side.)
pub fn is_item_visible(container: Dims, face: OpenFace, region: &BoxRegion) -> bool {
    let axis = face.axis();
    if face.toward_origin() {
        region.min_on(axis) == 0
    } else {
        region.max_on(axis) == container.on(axis)
    }
}

/// True iff every cell strictly between `cell` and the open face along
/// the extraction axis is empty or owned by `owner` itself. An item may
/// partially shadow itself.
pub fn is_cell_visible(grid: &OccupancyGrid, face: OpenFace, cell: Coord, owner: SlotId) -> bool {
    let axis = face.axis();
    let (cross_a, cross_b) = axis.cross();
    let a = cell.on(cross_a);
    let b = cell.on(cross_b);

    let range = if face.toward_origin() {
        0..cell.on(axis)
    } else {
        cell.on(axis) + 1..grid.dims().on(axis)
    };
    range.into_iter().all(|along| {
        match grid.cell_at(&assemble(axis, along, a, b)) {
            None => true,
            Some(slot) => slot == owner,
        }
    })
}

/// Percentage of the item's cells visible from the open face, in
/// `[0, 100]`.
pub fn visibility_score(
    grid: &OccupancyGrid,
    face: OpenFace,
    region: &BoxRegion,
    owner: SlotId,
) -> f64 {
    let total = region.volume();
    if total == 0 {
        return 0.0;
    }
    let visible = region
        .cells()
        .filter(|cell| is_cell_visible(grid, face, *cell, owner))
        .count();
    100.0 * visible as f64 / total as f64
}

/// Distinct foreign slots inside the item's extraction corridor, in
/// corridor order nearest the open face first.
///
/// For an item already sitting on the open face the corridor is empty
/// and nothing blocks it.
pub fn find_blocking_slots(
    grid: &OccupancyGrid,
    face: OpenFace,
    region: &BoxRegion,
    owner: SlotId,
) -> Vec<SlotId> {
    let axis = face.axis();
    let (cross_a, cross_b) = axis.cross();
    let a_range = region.min_on(cross_a)..region.max_on(cross_a);
    let b_range = region.min_on(cross_b)..region.max_on(cross_b);

    let mut blockers = Vec::new();
    let mut scan_layer = |along: u32| {
        for a in a_range.clone() {
            for b in b_range.clone() {
                if let Some(slot) = grid.cell_at(&assemble(axis, along, a, b)) {
                    if slot != owner && !blockers.contains(&slot) {
                        blockers.push(slot);
                    }
                }
            }
        }
    };

    if face.toward_origin() {
        for along in 0..region.min_on(axis) {
            scan_layer(along);
        }
    } else {
        for along in (region.max_on(axis)..grid.dims().on(axis)).rev() {
            scan_layer(along);
        }
    }
    blockers
}

/// Gap in cells between the item's extraction-side face and the open
/// face.
pub fn face_distance(container: Dims, face: OpenFace, region: &BoxRegion) -> u32 {
    let axis = face.axis();
    if face.toward_origin() {
        region.min_on(axis)
    } else {
        container.on(axis) - region.max_on(axis)
    }
}

/// Composite accessibility score in `[0, 100]`.
///
/// Weighted sum of three components: visibility (40%), a 40-point
/// blocker budget losing 10 points per blocker (40%), and nearness to
/// the open face (20%). An item touching the open face with an empty
/// corridor scores 100.
pub fn accessibility_score(
    grid: &OccupancyGrid,
    face: OpenFace,
    region: &BoxRegion,
    owner: SlotId,
) -> f64 {
    let visibility = visibility_score(grid, face, region, owner);

    let blocker_count = find_blocking_slots(grid, face, region, owner).len();
    let blocker_points = (40.0 - BLOCKER_PENALTY * blocker_count as f64).max(0.0);
    let blocker_component = blocker_points / 40.0 * 100.0;

    let axis_extent = grid.dims().on(face.axis());
    let distance = face_distance(grid.dims(), face, region);
    let distance_component = (1.0 - distance as f64 / axis_extent as f64).max(0.0) * 100.0;

    WEIGHT_VISIBILITY * visibility
        + WEIGHT_BLOCKERS * blocker_component
        + WEIGHT_DISTANCE * distance_component
}
