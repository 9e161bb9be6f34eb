//! Integer cell geometry: coordinates, dimensions and half-open boxes.
//!
//! Containers are discretised into unit cells. A region is the half-open
//! box `[x, x+w) × [y, y+d) × [z, z+h)`; every predicate in this module
//! uses half-open interval arithmetic, so touching boxes never overlap.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A container axis. Width runs along x, depth along y, height along z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Width (x).
    X,
    /// Depth (y).
    Y,
    /// Height (z).
    Z,
}

impl Axis {
    /// Returns the two perpendicular axes, in canonical (X, Y, Z) order.
    pub fn cross(&self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// A unit-cell coordinate inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    /// Position along the width axis.
    pub x: u32,
    /// Position along the depth axis.
    pub y: u32,
    /// Position along the height axis.
    pub z: u32,
}

impl Coord {
    /// The origin cell `(0, 0, 0)`.
    pub const ORIGIN: Coord = Coord { x: 0, y: 0, z: 0 };

    /// Creates a new coordinate.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Returns the component along the given axis.
    pub fn on(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Manhattan distance to another coordinate.
    pub fn manhattan(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

/// Cell dimensions of an item or container: width, depth, height.
///
/// All three must be positive; [`Dims::validate`] rejects zeroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dims {
    /// Extent along the width axis (x).
    pub w: u32,
    /// Extent along the depth axis (y).
    pub d: u32,
    /// Extent along the height axis (z).
    pub h: u32,
}

impl Dims {
    /// Creates new dimensions.
    pub const fn new(w: u32, d: u32, h: u32) -> Self {
        Self { w, d, h }
    }

    /// Returns the extent along the given axis.
    pub fn on(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.d,
            Axis::Z => self.h,
        }
    }

    /// Volume in cells.
    pub fn volume(&self) -> u64 {
        self.w as u64 * self.d as u64 * self.h as u64
    }

    /// Checks that every extent is positive.
    pub fn validate(&self) -> Result<()> {
        if self.w == 0 || self.d == 0 || self.h == 0 {
            return Err(Error::InvalidArgument(format!(
                "dimensions must be positive, got {}x{}x{}",
                self.w, self.d, self.h
            )));
        }
        Ok(())
    }
}

/// A half-open axis-aligned box of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxRegion {
    /// Minimum corner.
    pub origin: Coord,
    /// Extents from the origin.
    pub dims: Dims,
}

impl BoxRegion {
    /// Creates a new box region.
    pub const fn new(origin: Coord, dims: Dims) -> Self {
        Self { origin, dims }
    }

    /// Minimum coordinate along the given axis (inclusive).
    pub fn min_on(&self, axis: Axis) -> u32 {
        self.origin.on(axis)
    }

    /// Maximum coordinate along the given axis (exclusive).
    pub fn max_on(&self, axis: Axis) -> u32 {
        self.origin.on(axis) + self.dims.on(axis)
    }

    /// Volume in cells.
    pub fn volume(&self) -> u64 {
        self.dims.volume()
    }

    /// True if the cell lies inside this box.
    pub fn contains_cell(&self, cell: &Coord) -> bool {
        cell.x >= self.origin.x
            && cell.x < self.origin.x + self.dims.w
            && cell.y >= self.origin.y
            && cell.y < self.origin.y + self.dims.d
            && cell.z >= self.origin.z
            && cell.z < self.origin.z + self.dims.h
    }

    /// True if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &BoxRegion) -> bool {
        other.origin.x >= self.origin.x
            && other.origin.x + other.dims.w <= self.origin.x + self.dims.w
            && other.origin.y >= self.origin.y
            && other.origin.y + other.dims.d <= self.origin.y + self.dims.d
            && other.origin.z >= self.origin.z
            && other.origin.z + other.dims.h <= self.origin.z + self.dims.h
    }

    /// Strict half-open overlap test. Boxes that merely share a face do
    /// not overlap.
    pub fn overlaps(&self, other: &BoxRegion) -> bool {
        self.origin.x < other.origin.x + other.dims.w
            && other.origin.x < self.origin.x + self.dims.w
            && self.origin.y < other.origin.y + other.dims.d
            && other.origin.y < self.origin.y + self.dims.d
            && self.origin.z < other.origin.z + other.dims.h
            && other.origin.z < self.origin.z + self.dims.h
    }

    /// Iterates every cell of the box in row-major `(x, y, z)` order,
    /// x slowest and z fastest.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let o = self.origin;
        let d = self.dims;
        (o.x..o.x + d.w).flat_map(move |x| {
            (o.y..o.y + d.d)
                .flat_map(move |y| (o.z..o.z + d.h).map(move |z| Coord::new(x, y, z)))
        })
    }
}
