//! # Stowage Core
//!
//! Core types and abstractions for the stowage 3D cargo engine.
//!
//! This crate provides the foundational types shared by the stowage
//! engine: integer cell geometry, the six-rotation orientation set,
//! open-face extraction semantics, item records, placement options and
//! retrieval plans.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Coord`], [`Dims`], [`BoxRegion`], half-open boxes
//!   over unit cells
//! - **Orientation**: the six axis permutations of a rectangular item
//! - **Open face**: [`OpenFace`] and the extraction axis it induces
//! - **Items**: [`Item`], [`StowedItem`], [`Priority`], expiry days and
//!   usage budgets
//! - **Cancellation**: [`CancelToken`] for long-running queries
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod cancel;
pub mod config;
pub mod error;
pub mod face;
pub mod geometry;
pub mod item;
pub mod orientation;
pub mod plan;

// Re-exports
pub use cancel::CancelToken;
pub use config::{PlacementMode, PlacementOptions};
pub use error::{Error, Result};
pub use face::OpenFace;
pub use geometry::{Axis, BoxRegion, Coord, Dims};
pub use item::{Day, Item, ItemId, Priority, StowedItem};
pub use orientation::Orientation;
pub use plan::{Placement, RetrievalPlan, RetrievalStep};
