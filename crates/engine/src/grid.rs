//! Container occupancy grid.
//!
//! The grid maps every unit cell of a container to the slot of the item
//! occupying it, or to empty. A slot is a compact per-container integer
//! key handed out by the catalogue; cells never store item id strings,
//! so a cell costs one `Option<NonZeroU32>` (four bytes via the niche).
//!
//! Cell layout is row-major over `(x, y, z)` with x slowest and z
//! fastest. The enumeration order of [`OccupancyGrid::find_empty_positions`]
//! follows this layout and is part of the placement tie-break contract.

use std::num::NonZeroU32;

use stowage_core::{BoxRegion, CancelToken, Coord, Dims, Error, Result};

/// Compact per-container key for a stowed item.
pub type SlotId = NonZeroU32;

/// A 3D occupancy grid sized to a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    dims: Dims,
    cells: Vec<Option<SlotId>>,
}

impl OccupancyGrid {
    /// Creates an empty grid for a container of the given dimensions.
    pub fn new(dims: Dims) -> Result<Self> {
        dims.validate()?;
        Ok(Self {
            dims,
            cells: vec![None; dims.volume() as usize],
        })
    }

    /// Container dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Container volume in cells.
    pub fn volume(&self) -> u64 {
        self.dims.volume()
    }

    /// The container as a box region anchored at the origin.
    pub fn bounds(&self) -> BoxRegion {
        BoxRegion::new(Coord::ORIGIN, self.dims)
    }

    /// Number of empty cells.
    pub fn free_volume(&self) -> u64 {
        self.cells.iter().filter(|c| c.is_none()).count() as u64
    }

    /// Number of occupied cells.
    pub fn occupied_volume(&self) -> u64 {
        self.volume() - self.free_volume()
    }

    /// Flat index of a cell in the row-major layout.
    pub(crate) fn index(&self, cell: &Coord) -> usize {
        ((cell.x * self.dims.d + cell.y) * self.dims.h + cell.z) as usize
    }

    /// True if the cell lies inside the container.
    pub fn in_bounds(&self, cell: &Coord) -> bool {
        cell.x < self.dims.w && cell.y < self.dims.d && cell.z < self.dims.h
    }

    /// The slot occupying a cell, or `None` for an empty or
    /// out-of-bounds cell.
    pub fn cell_at(&self, cell: &Coord) -> Option<SlotId> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.cells[self.index(cell)]
    }

    /// True iff a box of `dims` at `origin` lies inside the container
    /// and every cell of it is empty.
    pub fn is_free(&self, origin: Coord, dims: Dims) -> bool {
        let region = BoxRegion::new(origin, dims);
        if !self.bounds().contains_box(&region) {
            return false;
        }
        let all_free = region.cells().all(|c| self.cells[self.index(&c)].is_none());
        all_free
    }

    /// Fills a box with a slot. Fails with [`Error::InvalidArgument`] if
    /// the box sticks out of the container and [`Error::Conflict`] if any
    /// cell is already taken; on failure the grid is unchanged.
    pub fn occupy(&mut self, origin: Coord, dims: Dims, slot: SlotId) -> Result<()> {
        let region = BoxRegion::new(origin, dims);
        if !self.bounds().contains_box(&region) {
            return Err(Error::InvalidArgument(format!(
                "box {}x{}x{} at ({}, {}, {}) exceeds container bounds",
                dims.w, dims.d, dims.h, origin.x, origin.y, origin.z
            )));
        }
        if let Some(cell) = region
            .cells()
            .find(|c| self.cells[self.index(c)].is_some())
        {
            return Err(Error::Conflict(format!(
                "cell ({}, {}, {}) is already occupied",
                cell.x, cell.y, cell.z
            )));
        }
        for cell in region.cells() {
            let idx = self.index(&cell);
            self.cells[idx] = Some(slot);
        }
        Ok(())
    }

    /// Clears every cell holding the given slot. Returns the number of
    /// cells freed; an unknown slot is reported as [`Error::NotFound`]
    /// and changes nothing.
    pub fn release(&mut self, slot: SlotId) -> Result<u64> {
        let mut freed = 0u64;
        for cell in self.cells.iter_mut() {
            if *cell == Some(slot) {
                *cell = None;
                freed += 1;
            }
        }
        if freed == 0 {
            return Err(Error::NotFound(format!("slot {slot} holds no cells")));
        }
        Ok(freed)
    }

    /// Lazily enumerates every position where a box of `dims` would be
    /// free, in row-major `(x, y, z)` order.
    pub fn find_empty_positions(&self, dims: Dims) -> impl Iterator<Item = Coord> + '_ {
        let max_x = self.dims.w.saturating_sub(dims.w);
        let max_y = self.dims.d.saturating_sub(dims.d);
        let max_z = self.dims.h.saturating_sub(dims.h);
        (0..=max_x)
            .flat_map(move |x| {
                (0..=max_y).flat_map(move |y| (0..=max_z).map(move |z| Coord::new(x, y, z)))
            })
            .filter(move |origin| self.is_free(*origin, dims))
    }

    /// Finds a maximal empty box.
    ///
    /// The result depends only on the current grid contents, never on
    /// insertion history. Ties are broken by smallest `(x, y, z)` origin,
    /// then largest width, then depth, then height. Returns `None` when
    /// the grid is full.
    pub fn find_largest_empty_box(&self, cancel: &CancelToken) -> Result<Option<BoxRegion>> {
        self.largest_empty_box_where(|_| false, cancel)
    }

    /// Largest-empty-box search with extra cells treated as occupied.
    ///
    /// `blocked` is consulted per flat cell index; the fragmentation
    /// analyser uses it to mask out already-extracted boxes without
    /// mutating the grid.
    pub(crate) fn largest_empty_box_where<F>(
        &self,
        blocked: F,
        cancel: &CancelToken,
    ) -> Result<Option<BoxRegion>>
    where
        F: Fn(usize) -> bool,
    {
        let w = self.dims.w as usize;
        let d = self.dims.d as usize;
        let h = self.dims.h as usize;

        // runs[i]: consecutive free cells along +x starting at cell i.
        let mut runs = vec![0u32; self.cells.len()];
        for y in 0..d {
            for z in 0..h {
                let mut run = 0u32;
                for x in (0..w).rev() {
                    let idx = (x * d + y) * h + z;
                    if self.cells[idx].is_some() || blocked(idx) {
                        run = 0;
                    } else {
                        run += 1;
                    }
                    runs[idx] = run;
                }
            }
        }

        let mut best: Option<BoxRegion> = None;
        let mut best_volume = 0u64;
        // Per-anchor minimum free width per depth row, folded over layers.
        let mut row_min = vec![u32::MAX; d];

        for x in 0..w {
            for y in 0..d {
                cancel.check()?;
                for z in 0..h {
                    if runs[(x * d + y) * h + z] == 0 {
                        continue;
                    }
                    let anchor = Coord::new(x as u32, y as u32, z as u32);
                    let max_d = d - y;
                    let max_h = h - z;
                    row_min[..max_d].fill(u32::MAX);
                    let mut depth_cap = max_d;

                    for dh in 0..max_h {
                        let layer = z + dh;
                        let mut width_floor = u32::MAX;
                        let mut dd = 0;
                        while dd < depth_cap {
                            let run = runs[(x * d + y + dd) * h + layer];
                            if run == 0 {
                                depth_cap = dd;
                                break;
                            }
                            if run < row_min[dd] {
                                row_min[dd] = run;
                            }
                            if row_min[dd] < width_floor {
                                width_floor = row_min[dd];
                            }
                            let candidate = Dims::new(width_floor, dd as u32 + 1, dh as u32 + 1);
                            let volume = candidate.volume();
                            if volume > best_volume {
                                best = Some(BoxRegion::new(anchor, candidate));
                                best_volume = volume;
                            } else if volume == best_volume {
                                // Same anchor, same volume: prefer the
                                // wider, then deeper, then taller shape.
                                if let Some(current) = &best {
                                    if current.origin == anchor
                                        && (candidate.w, candidate.d, candidate.h)
                                            > (current.dims.w, current.dims.d, current.dims.h)
                                    {
                                        best = Some(BoxRegion::new(anchor, candidate));
                                    }
                                }
                            }
                            dd += 1;
                        }
                        if depth_cap == 0 {
                            break;
                        }
                    }
                }
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: u32) -> SlotId {
        SlotId::new(n).unwrap()
    }

    fn grid_10x8x5() -> OccupancyGrid {
        OccupancyGrid::new(Dims::new(10, 8, 5)).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_dims() {
        assert!(OccupancyGrid::new(Dims::new(0, 8, 5)).is_err());
    }

    #[test]
    fn test_occupy_and_cell_at() {
        let mut grid = grid_10x8x5();
        grid.occupy(Coord::ORIGIN, Dims::new(3, 2, 2), slot(1)).unwrap();

        assert_eq!(grid.cell_at(&Coord::new(2, 1, 1)), Some(slot(1)));
        assert_eq!(grid.cell_at(&Coord::new(3, 0, 0)), None);
        assert_eq!(grid.occupied_volume(), 12);
    }

    #[test]
    fn test_occupy_conflict_leaves_grid_unchanged() {
        let mut grid = grid_10x8x5();
        grid.occupy(Coord::ORIGIN, Dims::new(3, 2, 2), slot(1)).unwrap();

        let before = grid.clone();
        let err = grid.occupy(Coord::new(2, 1, 1), Dims::new(3, 3, 3), slot(2));
        assert!(matches!(err, Err(Error::Conflict(_))));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_occupy_out_of_bounds() {
        let mut grid = grid_10x8x5();
        let err = grid.occupy(Coord::new(8, 0, 0), Dims::new(3, 2, 2), slot(1));
        assert!(matches!(err, Err(Error::InvalidArgument(_))));
        assert_eq!(grid.occupied_volume(), 0);
    }

    #[test]
    fn test_release_round_trip() {
        let mut grid = grid_10x8x5();
        let empty = grid.clone();

        grid.occupy(Coord::new(1, 2, 0), Dims::new(2, 2, 3), slot(7)).unwrap();
        assert_eq!(grid.release(slot(7)).unwrap(), 12);
        assert_eq!(grid, empty);
    }

    #[test]
    fn test_release_unknown_slot() {
        let mut grid = grid_10x8x5();
        assert!(matches!(grid.release(slot(9)), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_find_empty_positions_order() {
        let mut grid = OccupancyGrid::new(Dims::new(2, 2, 1)).unwrap();
        grid.occupy(Coord::ORIGIN, Dims::new(1, 1, 1), slot(1)).unwrap();

        let positions: Vec<Coord> = grid.find_empty_positions(Dims::new(1, 1, 1)).collect();
        assert_eq!(
            positions,
            vec![Coord::new(0, 1, 0), Coord::new(1, 0, 0), Coord::new(1, 1, 0)]
        );
    }

    #[test]
    fn test_find_empty_positions_oversized_dims() {
        let grid = OccupancyGrid::new(Dims::new(2, 2, 2)).unwrap();
        assert_eq!(grid.find_empty_positions(Dims::new(3, 1, 1)).count(), 0);
    }

    #[test]
    fn test_largest_empty_box_in_empty_grid() {
        let grid = grid_10x8x5();
        let found = grid
            .find_largest_empty_box(&CancelToken::new())
            .unwrap()
            .unwrap();
        assert_eq!(found, BoxRegion::new(Coord::ORIGIN, Dims::new(10, 8, 5)));
    }

    #[test]
    fn test_largest_empty_box_half_filled_sheet() {
        // Left half of an 8x8x1 sheet filled by three items; the right
        // half must come back as a single box.
        let mut grid = OccupancyGrid::new(Dims::new(8, 8, 1)).unwrap();
        grid.occupy(Coord::new(0, 0, 0), Dims::new(4, 3, 1), slot(1)).unwrap();
        grid.occupy(Coord::new(0, 3, 0), Dims::new(4, 3, 1), slot(2)).unwrap();
        grid.occupy(Coord::new(0, 6, 0), Dims::new(4, 2, 1), slot(3)).unwrap();

        let found = grid
            .find_largest_empty_box(&CancelToken::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            found,
            BoxRegion::new(Coord::new(4, 0, 0), Dims::new(4, 8, 1))
        );
    }

    #[test]
    fn test_largest_empty_box_full_grid() {
        let mut grid = OccupancyGrid::new(Dims::new(2, 2, 2)).unwrap();
        grid.occupy(Coord::ORIGIN, Dims::new(2, 2, 2), slot(1)).unwrap();
        assert!(grid
            .find_largest_empty_box(&CancelToken::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_largest_empty_box_ignores_insertion_history() {
        let mut a = OccupancyGrid::new(Dims::new(4, 4, 1)).unwrap();
        a.occupy(Coord::new(0, 0, 0), Dims::new(2, 2, 1), slot(1)).unwrap();
        a.occupy(Coord::new(2, 2, 0), Dims::new(2, 2, 1), slot(2)).unwrap();

        let mut b = OccupancyGrid::new(Dims::new(4, 4, 1)).unwrap();
        b.occupy(Coord::new(2, 2, 0), Dims::new(2, 2, 1), slot(5)).unwrap();
        b.occupy(Coord::new(0, 0, 0), Dims::new(2, 2, 1), slot(6)).unwrap();

        let token = CancelToken::new();
        assert_eq!(
            a.find_largest_empty_box(&token).unwrap(),
            b.find_largest_empty_box(&token).unwrap()
        );
    }

    #[test]
    fn test_largest_empty_box_cancellation() {
        let grid = grid_10x8x5();
        let token = CancelToken::new();
        token.cancel();
        assert!(matches!(
            grid.find_largest_empty_box(&token),
            Err(Error::Cancelled)
        ));
    }
}
