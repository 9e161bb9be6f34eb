//! Error types for stowage operations.

use thiserror::Error;

use crate::plan::RetrievalPlan;

/// Result type alias for stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during stowage operations.
///
/// Geometric predicates (free/occupied, overlap/disjoint) return plain
/// booleans and never surface here; these variants cover rejected inputs
/// and refused state transitions. Mutating operations that fail leave the
/// container unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input: bad orientation triple, non-positive dimension,
    /// out-of-range priority scale.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The id does not exist in this container.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Placement over occupied cells, an id that is already present, or
    /// no feasible placement under the given constraints.
    #[error("Placement conflict: {0}")]
    Conflict(String),

    /// Removal refused because other items occupy the extraction corridor.
    /// Carries the plan that would clear them.
    #[error("Item '{id}' is not accessible: {} item(s) must move first", plan.move_count())]
    NotAccessible {
        /// The blocked item.
        id: String,
        /// The moves that would clear the extraction corridor.
        plan: RetrievalPlan,
    },

    /// Usage budget reached; the item is waste and cannot be used again.
    #[error("Usage limit reached for item: {0}")]
    Exhausted(String),

    /// Long-running query aborted by the caller's cancellation signal.
    #[error("Computation cancelled")]
    Cancelled,
}
