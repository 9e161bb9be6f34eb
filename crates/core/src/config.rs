//! Placement request configuration.

use crate::geometry::Coord;
use crate::orientation::Orientation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Strategy used to pick among feasible placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlacementMode {
    /// Weighted ranking over accessibility, fragmentation and zone
    /// affinity, scaled by priority and expiry urgency.
    #[default]
    Ranked,
    /// Maximise the accessibility the item would have once placed.
    Accessibility,
    /// Take the first feasible placement in enumeration order.
    FirstFit,
}

/// Options for a placement request.
///
/// This is a closed record: there is no open key/value bag, so an
/// unsupported option cannot be smuggled in and silently ignored.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementOptions {
    /// Selection strategy.
    pub mode: PlacementMode,
    /// Restrict the search to this position.
    pub preferred_pos: Option<Coord>,
    /// Restrict the search to this orientation.
    pub preferred_orient: Option<Orientation>,
}

impl PlacementOptions {
    /// Creates default options (ranked mode, no hints).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selection strategy.
    pub fn with_mode(mut self, mode: PlacementMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pins the placement position.
    pub fn with_preferred_pos(mut self, pos: Coord) -> Self {
        self.preferred_pos = Some(pos);
        self
    }

    /// Pins the placement orientation.
    pub fn with_preferred_orient(mut self, orient: Orientation) -> Self {
        self.preferred_orient = Some(orient);
        self
    }
}
