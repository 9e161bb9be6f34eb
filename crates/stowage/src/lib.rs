//! # Stowage
//!
//! 3D cargo stowage engine for rectangular space-station containers.
//!
//! The engine decides where items go inside a container, scores how
//! accessible each stowed item is from the container's single open
//! face, plans the moves needed to pull an item out, tracks expiry and
//! usage budgets into waste, and packs return loads.
//!
//! ## Quick Start
//!
//! ```rust
//! use stowage::core::{Dims, Item, OpenFace, PlacementOptions};
//! use stowage::engine::Container;
//!
//! let mut container =
//!     Container::new("CONT-A1", "Airlock", Dims::new(10, 8, 5), OpenFace::Front).unwrap();
//!
//! let toolbox = Item::new("ITEM002", "Toolbox", Dims::new(2, 3, 1), 4.5);
//! container.place_item(toolbox, &PlacementOptions::default()).unwrap();
//!
//! println!(
//!     "utilization: {:.1}%, accessibility: {:.0}",
//!     container.utilization() * 100.0,
//!     container.accessibility_score("ITEM002").unwrap(),
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support for the public data types

/// Core types and abstractions.
pub use stowage_core as core;

/// The container engine.
pub use stowage_engine as engine;

// Re-export commonly used types at root level
pub use stowage_core::{
    CancelToken, Day, Dims, Error, Item, OpenFace, Placement, PlacementMode, PlacementOptions,
    Priority, Result, RetrievalPlan,
};
pub use stowage_engine::Container;
