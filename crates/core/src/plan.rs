//! Placement decisions and retrieval plans.

use crate::geometry::{Coord, Dims};
use crate::item::ItemId;
use crate::orientation::Orientation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The accepted decision for a placed item: where it sits and how it is
/// rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Minimum corner inside the container.
    pub position: Coord,
    /// Chosen rotation.
    pub orientation: Orientation,
    /// Dimensions after the rotation.
    pub eff_dims: Dims,
}

/// One step of a retrieval plan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RetrievalStep {
    /// Set the item aside to clear the extraction corridor.
    Move(ItemId),
    /// Extract the target item.
    Retrieve(ItemId),
}

/// An ordered list of steps that frees a target item.
///
/// Blockers are listed in corridor order, nearest to the open face
/// first; the final step always retrieves the target. The plan does not
/// recurse into blockers of blockers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RetrievalPlan {
    /// The steps, in execution order.
    pub steps: Vec<RetrievalStep>,
}

impl RetrievalPlan {
    /// A plan that retrieves the target directly, nothing in the way.
    pub fn direct(target: ItemId) -> Self {
        Self {
            steps: vec![RetrievalStep::Retrieve(target)],
        }
    }

    /// A plan that moves each blocker aside, then retrieves the target.
    pub fn with_moves(blockers: Vec<ItemId>, target: ItemId) -> Self {
        let mut steps: Vec<RetrievalStep> =
            blockers.into_iter().map(RetrievalStep::Move).collect();
        steps.push(RetrievalStep::Retrieve(target));
        Self { steps }
    }

    /// True when nothing needs to move.
    pub fn is_direct(&self) -> bool {
        self.move_count() == 0
    }

    /// Number of items that must be moved aside.
    pub fn move_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, RetrievalStep::Move(_)))
            .count()
    }

    /// The ids that must be moved aside, in plan order.
    pub fn moves(&self) -> impl Iterator<Item = &ItemId> {
        self.steps.iter().filter_map(|s| match s {
            RetrievalStep::Move(id) => Some(id),
            RetrievalStep::Retrieve(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_plan() {
        let plan = RetrievalPlan::direct("ITEM001".to_string());
        assert!(plan.is_direct());
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(
            plan.steps[0],
            RetrievalStep::Retrieve("ITEM001".to_string())
        );
    }

    #[test]
    fn test_plan_with_moves() {
        let plan = RetrievalPlan::with_moves(
            vec!["A".to_string(), "B".to_string()],
            "T".to_string(),
        );
        assert!(!plan.is_direct());
        assert_eq!(plan.move_count(), 2);
        let moves: Vec<&str> = plan.moves().map(String::as_str).collect();
        assert_eq!(moves, vec!["A", "B"]);
        assert_eq!(plan.steps.last(), Some(&RetrievalStep::Retrieve("T".to_string())));
    }
}
