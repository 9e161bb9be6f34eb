//! Placement ranking.
//!
//! Every feasible candidate is scored by what the container would look
//! like after committing it: the accessibility the new item would have,
//! how much of the largest empty box survives, and how close the item
//! lands to others bound for the same zone. Priority and imminent
//! expiry scale the whole score, so urgent cargo wins the accessible
//! spots.

use std::cmp::Ordering;

use nalgebra::{Point3, Vector3};

use stowage_core::{
    BoxRegion, CancelToken, Coord, Day, Dims, Item, OpenFace, Placement, PlacementMode,
    PlacementOptions, Result,
};

use crate::catalogue::Catalogue;
use crate::grid::{OccupancyGrid, SlotId};
use crate::search::find_valid_placements;
use crate::visibility::accessibility_score;

/// Weight of the post-placement accessibility component.
const WEIGHT_ACCESSIBILITY: f64 = 0.5;
/// Weight of the fragmentation-preservation component.
const WEIGHT_FRAGMENTATION: f64 = 0.3;
/// Weight of the zone-affinity component.
const WEIGHT_ZONE: f64 = 0.2;
/// Neutral score for items with no zone preference or no zone peers.
const ZONE_NEUTRAL: f64 = 50.0;
/// Score bump applied when the item expires within this many days.
const EXPIRY_URGENCY_WINDOW: u32 = 30;

/// A scored placement candidate.
#[derive(Debug, Clone)]
pub struct RankedPlacement {
    /// The candidate position and rotation.
    pub placement: Placement,
    /// Weighted total, priority- and expiry-scaled.
    pub score: f64,
    /// Accessibility the item would have once placed, in `[0, 100]`.
    pub accessibility: f64,
    /// Largest-empty-box survival ratio, in `[0, 100]`.
    pub fragmentation: f64,
    /// Zone affinity, in `[0, 100]`.
    pub zone_affinity: f64,
}

fn to_point(coord: Coord) -> Point3<f64> {
    Point3::new(coord.x as f64, coord.y as f64, coord.z as f64)
}

fn diagonal(dims: Dims) -> f64 {
    Vector3::new(dims.w as f64, dims.d as f64, dims.h as f64).norm()
}

fn priority_multiplier(item: &Item, today: Day) -> f64 {
    let mut multiplier = item.priority().multiplier();
    if item
        .expiry()
        .is_some_and(|e| e <= today.plus(EXPIRY_URGENCY_WINDOW))
    {
        multiplier += 0.5;
    }
    multiplier
}

fn zone_affinity(
    catalogue: &Catalogue,
    container: Dims,
    item: &Item,
    position: Coord,
) -> f64 {
    let Some(zone) = item.preferred_zone() else {
        return ZONE_NEUTRAL;
    };
    let nearest = catalogue
        .iter()
        .filter(|stowed| stowed.preferred_zone.as_deref() == Some(zone))
        .map(|stowed| nalgebra::distance(&to_point(position), &to_point(stowed.position)))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    match nearest {
        Some(distance) => 100.0 - 100.0 * distance / diagonal(container),
        None => ZONE_NEUTRAL,
    }
}

/// Scores a single candidate against a scratch copy of the grid.
fn score_candidate(
    scratch: &mut OccupancyGrid,
    catalogue: &Catalogue,
    face: OpenFace,
    today: Day,
    item: &Item,
    candidate: Placement,
    largest_before: u64,
    cancel: &CancelToken,
) -> Result<RankedPlacement> {
    scratch.occupy(candidate.position, candidate.eff_dims, SlotId::MAX)?;

    let region = BoxRegion::new(candidate.position, candidate.eff_dims);
    let accessibility = accessibility_score(scratch, face, &region, SlotId::MAX);

    let largest_after = scratch
        .find_largest_empty_box(cancel)?
        .map(|b| b.volume())
        .unwrap_or(0);
    let fragmentation = if largest_before > 0 {
        (100.0 * largest_after as f64 / largest_before as f64).min(100.0)
    } else {
        100.0
    };

    scratch.release(SlotId::MAX)?;

    let zone = zone_affinity(catalogue, scratch.dims(), item, candidate.position);
    let score = priority_multiplier(item, today)
        * (WEIGHT_ACCESSIBILITY * accessibility
            + WEIGHT_FRAGMENTATION * fragmentation
            + WEIGHT_ZONE * zone);

    Ok(RankedPlacement {
        placement: candidate,
        score,
        accessibility,
        fragmentation,
        zone_affinity: zone,
    })
}

fn candidates<'a>(
    grid: &'a OccupancyGrid,
    item: &Item,
    options: &'a PlacementOptions,
) -> impl Iterator<Item = Placement> + 'a {
    find_valid_placements(grid, item.dims())
        .filter(move |p| options.preferred_pos.map_or(true, |pos| p.position == pos))
        .filter(move |p| {
            options
                .preferred_orient
                .map_or(true, |orient| p.orientation == orient)
        })
}

/// Scores every feasible candidate and returns them sorted by score
/// descending; equal scores keep enumeration order.
pub fn rank_placements(
    grid: &OccupancyGrid,
    catalogue: &Catalogue,
    face: OpenFace,
    today: Day,
    item: &Item,
    options: &PlacementOptions,
) -> Result<Vec<RankedPlacement>> {
    let cancel = CancelToken::new();
    let largest_before = grid
        .find_largest_empty_box(&cancel)?
        .map(|b| b.volume())
        .unwrap_or(0);

    let mut scratch = grid.clone();
    let mut ranked = Vec::new();
    for candidate in candidates(grid, item, options) {
        ranked.push(score_candidate(
            &mut scratch,
            catalogue,
            face,
            today,
            item,
            candidate,
            largest_before,
            &cancel,
        )?);
    }
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(ranked)
}

/// Picks the placement for an item under the requested mode, or `None`
/// when nothing fits the dimensions and hints.
pub fn choose_placement(
    grid: &OccupancyGrid,
    catalogue: &Catalogue,
    face: OpenFace,
    today: Day,
    item: &Item,
    options: &PlacementOptions,
) -> Result<Option<Placement>> {
    match options.mode {
        PlacementMode::FirstFit => Ok(candidates(grid, item, options).next()),
        PlacementMode::Accessibility => {
            let mut scratch = grid.clone();
            let mut best: Option<(Placement, f64)> = None;
            for candidate in candidates(grid, item, options) {
                scratch.occupy(candidate.position, candidate.eff_dims, SlotId::MAX)?;
                let region = BoxRegion::new(candidate.position, candidate.eff_dims);
                let accessibility = accessibility_score(&scratch, face, &region, SlotId::MAX);
                scratch.release(SlotId::MAX)?;

                if best.as_ref().map_or(true, |(_, a)| accessibility > *a) {
                    best = Some((candidate, accessibility));
                }
            }
            Ok(best.map(|(placement, _)| placement))
        }
        PlacementMode::Ranked => {
            let ranked = rank_placements(grid, catalogue, face, today, item, options)?;
            Ok(ranked.into_iter().next().map(|r| r.placement))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::{Orientation, Priority, StowedItem};

    fn setup_quarter_filled() -> (OccupancyGrid, Catalogue) {
        // 4x4x1 front-open sheet with the front-left quarter occupied.
        let mut grid = OccupancyGrid::new(Dims::new(4, 4, 1)).unwrap();
        let mut catalogue = Catalogue::new();
        let block = Item::new("BLOCK", "Block", Dims::new(2, 2, 1), 1.0);
        let stowed = StowedItem::new(&block, Coord::ORIGIN, Orientation::IDENTITY);
        let slot = catalogue.insert(stowed).unwrap();
        grid.occupy(Coord::ORIGIN, Dims::new(2, 2, 1), slot).unwrap();
        (grid, catalogue)
    }

    #[test]
    fn test_first_fit_takes_enumeration_head() {
        let (grid, catalogue) = setup_quarter_filled();
        let item = Item::new("NEW", "New", Dims::new(2, 2, 1), 1.0);

        let placement = choose_placement(
            &grid,
            &catalogue,
            OpenFace::Front,
            Day(0),
            &item,
            &PlacementOptions::new().with_mode(PlacementMode::FirstFit),
        )
        .unwrap()
        .unwrap();

        // First free position in row-major order is tucked behind BLOCK.
        assert_eq!(placement.position, Coord::new(0, 2, 0));
    }

    #[test]
    fn test_accessibility_mode_prefers_open_face() {
        let (grid, catalogue) = setup_quarter_filled();
        let item = Item::new("NEW", "New", Dims::new(2, 2, 1), 1.0);

        let placement = choose_placement(
            &grid,
            &catalogue,
            OpenFace::Front,
            Day(0),
            &item,
            &PlacementOptions::new().with_mode(PlacementMode::Accessibility),
        )
        .unwrap()
        .unwrap();

        assert_eq!(placement.position, Coord::new(2, 0, 0));
    }

    #[test]
    fn test_ranked_mode_beats_first_fit_on_accessibility() {
        let (grid, catalogue) = setup_quarter_filled();
        let item = Item::new("NEW", "New", Dims::new(2, 2, 1), 1.0).with_priority(Priority::High);

        let ranked = rank_placements(
            &grid,
            &catalogue,
            OpenFace::Front,
            Day(0),
            &item,
            &PlacementOptions::default(),
        )
        .unwrap();

        assert!(!ranked.is_empty());
        assert_eq!(ranked[0].placement.position, Coord::new(2, 0, 0));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_priority_and_expiry_scale_scores() {
        let (grid, catalogue) = setup_quarter_filled();
        let routine = Item::new("A", "A", Dims::new(1, 1, 1), 1.0);
        let urgent = Item::new("B", "B", Dims::new(1, 1, 1), 1.0)
            .with_priority(Priority::High)
            .with_expiry(Day(10));

        let options = PlacementOptions::default();
        let base = rank_placements(&grid, &catalogue, OpenFace::Front, Day(0), &routine, &options)
            .unwrap();
        let scaled =
            rank_placements(&grid, &catalogue, OpenFace::Front, Day(0), &urgent, &options).unwrap();

        // Same candidates, multiplier 2.0 (1.5 high + 0.5 expiring soon).
        assert!((scaled[0].score - base[0].score * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zone_affinity_neutral_without_peers() {
        let (grid, catalogue) = setup_quarter_filled();
        let item = Item::new("NEW", "New", Dims::new(1, 1, 1), 1.0).with_preferred_zone("Lab");

        let ranked = rank_placements(
            &grid,
            &catalogue,
            OpenFace::Front,
            Day(0),
            &item,
            &PlacementOptions::default(),
        )
        .unwrap();
        assert!(ranked.iter().all(|r| (r.zone_affinity - 50.0).abs() < 1e-9));
    }

    #[test]
    fn test_zone_affinity_rewards_proximity() {
        let mut grid = OccupancyGrid::new(Dims::new(6, 1, 1)).unwrap();
        let mut catalogue = Catalogue::new();
        let anchor = Item::new("ANCHOR", "Anchor", Dims::new(1, 1, 1), 1.0)
            .with_preferred_zone("Lab");
        let stowed = StowedItem::new(&anchor, Coord::ORIGIN, Orientation::IDENTITY);
        let slot = catalogue.insert(stowed).unwrap();
        grid.occupy(Coord::ORIGIN, Dims::new(1, 1, 1), slot).unwrap();

        let item = Item::new("NEW", "New", Dims::new(1, 1, 1), 1.0).with_preferred_zone("Lab");
        let near = zone_affinity(&catalogue, grid.dims(), &item, Coord::new(1, 0, 0));
        let far = zone_affinity(&catalogue, grid.dims(), &item, Coord::new(5, 0, 0));

        assert!(near > far);
    }

    #[test]
    fn test_preferred_hints_filter_candidates() {
        let (grid, catalogue) = setup_quarter_filled();
        let item = Item::new("NEW", "New", Dims::new(2, 2, 1), 1.0);

        let pinned = choose_placement(
            &grid,
            &catalogue,
            OpenFace::Front,
            Day(0),
            &item,
            &PlacementOptions::new()
                .with_mode(PlacementMode::FirstFit)
                .with_preferred_pos(Coord::new(2, 2, 0)),
        )
        .unwrap()
        .unwrap();
        assert_eq!(pinned.position, Coord::new(2, 2, 0));

        let impossible = choose_placement(
            &grid,
            &catalogue,
            OpenFace::Front,
            Day(0),
            &item,
            &PlacementOptions::new().with_preferred_pos(Coord::ORIGIN),
        )
        .unwrap();
        assert!(impossible.is_none());
    }
}
