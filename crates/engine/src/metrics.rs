//! Container metrics, fragmentation analysis and advisory
//! recommendations.

use stowage_core::{BoxRegion, CancelToken, Day, ItemId, OpenFace, Priority, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalogue::Catalogue;
use crate::grid::OccupancyGrid;
use crate::visibility::accessibility_score;

/// Accessibility below this threshold counts as "hard to reach".
pub const LOW_ACCESSIBILITY: f64 = 40.0;
/// Days ahead scanned for expiry-driven advice.
const EXPIRY_HORIZON_DAYS: u32 = 30;
/// Upper bound on the empty boxes collected by the fragmentation
/// analyser.
const MAX_FRAGMENT_BOXES: usize = 10;

/// Result of decomposing the free space into maximal empty boxes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FragmentationReport {
    /// Largest-box volume over total free volume, in `[0, 1]`. A full
    /// container reports `1.0` (nothing left to fragment).
    pub index: f64,
    /// The collected boxes, largest first, at most ten.
    pub boxes: Vec<BoxRegion>,
    /// Total free volume in cells.
    pub free_volume: u64,
    /// Free volume covered by the collected boxes.
    pub covered_volume: u64,
}

/// An item expiring inside the queried window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpiringItem {
    /// The item.
    pub id: ItemId,
    /// Its expiry day.
    pub expiry: Day,
    /// Its current accessibility score.
    pub accessibility: f64,
}

/// Advisory category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecommendationKind {
    /// A high-priority item is hard to reach.
    Accessibility,
    /// An item expiring soon is hard to reach.
    Expiry,
    /// Free space is split into small pockets.
    Fragmentation,
    /// The container is nearly full.
    Utilization,
}

/// Advisory severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// Needs attention.
    High,
    /// Worth scheduling.
    Medium,
}

/// An advisory produced by [`recommendations`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Recommendation {
    /// Category tag.
    pub kind: RecommendationKind,
    /// Severity tag.
    pub severity: Severity,
    /// Human-readable summary.
    pub message: String,
}

/// Fraction of the container volume occupied by stowed items, in
/// `[0, 1]`.
pub fn utilization(grid: &OccupancyGrid, catalogue: &Catalogue) -> f64 {
    catalogue.stowed_volume() as f64 / grid.volume() as f64
}

/// Items expiring on or before `today + days`, ascending by expiry day,
/// each annotated with its current accessibility.
pub fn expiring_within(
    grid: &OccupancyGrid,
    catalogue: &Catalogue,
    face: OpenFace,
    today: Day,
    days: u32,
) -> Vec<ExpiringItem> {
    catalogue
        .expiring_by(today.plus(days))
        .filter_map(|(expiry, id)| {
            let item = catalogue.get(id)?;
            let slot = catalogue.slot_of(id)?;
            Some(ExpiringItem {
                id: id.clone(),
                expiry,
                accessibility: accessibility_score(grid, face, &item.region(), slot),
            })
        })
        .collect()
}

/// Decomposes the free space into maximal empty boxes.
///
/// Repeatedly finds the largest empty box while masking out the boxes
/// already collected, until the free volume is covered or ten boxes
/// were taken. The grid itself is never touched: the mask lives in a
/// side overlay, so this is a pure query on every path including
/// cancellation.
pub fn fragmentation_analysis(
    grid: &OccupancyGrid,
    cancel: &CancelToken,
) -> Result<FragmentationReport> {
    let free_volume = grid.free_volume();
    let mut report = FragmentationReport {
        index: 1.0,
        boxes: Vec::new(),
        free_volume,
        covered_volume: 0,
    };
    if free_volume == 0 {
        return Ok(report);
    }

    let mut taken = vec![false; grid.volume() as usize];
    while report.covered_volume < free_volume && report.boxes.len() < MAX_FRAGMENT_BOXES {
        cancel.check()?;
        let Some(found) = grid.largest_empty_box_where(|idx| taken[idx], cancel)? else {
            break;
        };
        for cell in found.cells() {
            taken[grid.index(&cell)] = true;
        }
        report.covered_volume += found.volume();
        report.boxes.push(found);
    }

    if let Some(first) = report.boxes.first() {
        report.index = first.volume() as f64 / free_volume as f64;
    }
    Ok(report)
}

/// Produces advisory tags for the container state.
pub fn recommendations(
    grid: &OccupancyGrid,
    catalogue: &Catalogue,
    face: OpenFace,
    today: Day,
    cancel: &CancelToken,
) -> Result<Vec<Recommendation>> {
    let mut advice = Vec::new();

    let hard_to_reach_high = catalogue
        .ids_by_priority(Priority::High)
        .filter_map(|id| {
            let item = catalogue.get(id)?;
            let slot = catalogue.slot_of(id)?;
            Some((id, accessibility_score(grid, face, &item.region(), slot)))
        })
        .find(|(_, score)| *score < LOW_ACCESSIBILITY);
    if let Some((id, _)) = hard_to_reach_high {
        advice.push(Recommendation {
            kind: RecommendationKind::Accessibility,
            severity: Severity::High,
            message: format!("high-priority item '{id}' has low accessibility"),
        });
    }

    let buried_perishable = expiring_within(grid, catalogue, face, today, EXPIRY_HORIZON_DAYS)
        .into_iter()
        .find(|e| e.accessibility < LOW_ACCESSIBILITY);
    if let Some(expiring) = buried_perishable {
        advice.push(Recommendation {
            kind: RecommendationKind::Expiry,
            severity: Severity::High,
            message: format!(
                "item '{}' expires on day {} but has low accessibility",
                expiring.id, expiring.expiry.0
            ),
        });
    }

    let used = utilization(grid, catalogue);
    let fragmentation = fragmentation_analysis(grid, cancel)?;
    if fragmentation.index < 0.5 && used < 0.8 {
        advice.push(Recommendation {
            kind: RecommendationKind::Fragmentation,
            severity: Severity::Medium,
            message: "free space is fragmented; consider repacking".to_string(),
        });
    }
    if used > 0.9 {
        advice.push(Recommendation {
            kind: RecommendationKind::Utilization,
            severity: Severity::Medium,
            message: "container is nearly full".to_string(),
        });
    }

    Ok(advice)
}
