//! # Stowage Engine
//!
//! 3D stowage engine for rectangular cargo containers.
//!
//! A [`Container`] owns a cell-level occupancy grid and a catalogue of
//! stowed items, and answers every question the stowage workflow needs:
//! where a new item should go, how accessible an item currently is, what
//! must move to pull it out, what has become waste, and how the free
//! space is fragmenting.
//!
//! ## Features
//!
//! - Six-orientation placement search with a row-major enumeration
//!   contract
//! - Straight-line visibility and direct-shadow blocking toward the
//!   container's single open face
//! - Three placement modes: weighted ranking, accessibility-first and
//!   first-fit
//! - Retrieval planning, waste identification and return-load packing
//! - Pure fragmentation analysis with caller-driven cancellation
//!
//! ## Quick Start
//!
//! ```rust
//! use stowage_core::{Day, Dims, Item, OpenFace, PlacementOptions, Priority};
//! use stowage_engine::Container;
//!
//! let mut container = Container::new(
//!     "CONT-A1",
//!     "Crew Quarters",
//!     Dims::new(10, 8, 5),
//!     OpenFace::Front,
//! )
//! .unwrap();
//!
//! let rations = Item::new("ITEM001", "Food Packet", Dims::new(3, 2, 2), 5.0)
//!     .with_priority(Priority::High)
//!     .with_expiry(Day(120));
//!
//! let placement = container
//!     .place_item(rations, &PlacementOptions::default())
//!     .unwrap();
//!
//! assert!(container.utilization() > 0.0);
//! assert!(container.retrieval_plan("ITEM001").unwrap().is_direct());
//! # let _ = placement;
//! ```

pub mod catalogue;
pub mod container;
pub mod grid;
pub mod metrics;
pub mod ranker;
pub mod retrieval;
pub mod search;
pub mod visibility;
pub mod waste;

// Re-exports
pub use catalogue::Catalogue;
pub use container::{Container, SearchHit};
pub use grid::{OccupancyGrid, SlotId};
pub use metrics::{
    ExpiringItem, FragmentationReport, Recommendation, RecommendationKind, Severity,
};
pub use ranker::RankedPlacement;
pub use waste::{ReturnPlan, WasteReason, WasteRecord};
pub use stowage_core::{
    CancelToken, Day, Dims, Error, Item, OpenFace, Placement, PlacementMode, PlacementOptions,
    Result, RetrievalPlan, RetrievalStep, StowedItem,
};
