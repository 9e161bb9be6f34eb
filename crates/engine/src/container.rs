//! The container aggregate.
//!
//! A [`Container`] owns an occupancy grid and an item catalogue and
//! keeps them in lockstep: painting the catalogued items back onto an
//! empty grid always reproduces the grid exactly. All operations are
//! synchronous and sequential; callers needing shared access serialise
//! externally.

use log::debug;

use stowage_core::{
    BoxRegion, CancelToken, Day, Dims, Error, Item, ItemId, OpenFace, Placement,
    PlacementOptions, Result, RetrievalPlan, StowedItem,
};

use crate::catalogue::Catalogue;
use crate::grid::{OccupancyGrid, SlotId};
use crate::metrics::{
    self, ExpiringItem, FragmentationReport, Recommendation,
};
use crate::ranker::{self, RankedPlacement};
use crate::retrieval;
use crate::search;
use crate::visibility;
use crate::waste::{self, ReturnPlan, WasteRecord};

/// Result of a by-name lookup: the instance cheapest to retrieve.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The chosen instance.
    pub id: ItemId,
    /// Items in its extraction corridor.
    pub blockers: Vec<ItemId>,
    /// The plan that frees it.
    pub plan: RetrievalPlan,
    /// Retrieval cost estimate; lower is better.
    pub score: f64,
}

/// A stowage container: dimensions, zone, a single open face, and the
/// items inside it.
#[derive(Debug, Clone)]
pub struct Container {
    id: String,
    zone: String,
    open_face: OpenFace,
    grid: OccupancyGrid,
    catalogue: Catalogue,
    today: Day,
}

impl Container {
    /// Creates an empty container.
    pub fn new(
        id: impl Into<String>,
        zone: impl Into<String>,
        dims: Dims,
        open_face: OpenFace,
    ) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            zone: zone.into(),
            open_face,
            grid: OccupancyGrid::new(dims)?,
            catalogue: Catalogue::new(),
            today: Day(0),
        })
    }

    /// Sets the current day at construction time.
    pub fn with_clock(mut self, today: Day) -> Self {
        self.today = today;
        self
    }

    /// Container id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The zone this container serves.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Container dimensions.
    pub fn dims(&self) -> Dims {
        self.grid.dims()
    }

    /// The open face.
    pub fn open_face(&self) -> OpenFace {
        self.open_face
    }

    /// The current day of the container's clock.
    pub fn today(&self) -> Day {
        self.today
    }

    /// The occupancy grid.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Number of stowed items.
    pub fn len(&self) -> usize {
        self.catalogue.len()
    }

    /// True when nothing is stowed.
    pub fn is_empty(&self) -> bool {
        self.catalogue.is_empty()
    }

    /// Looks up a stowed item.
    pub fn get(&self, id: &str) -> Option<&StowedItem> {
        self.catalogue.get(id)
    }

    /// Iterates stowed items in id order.
    pub fn items(&self) -> impl Iterator<Item = &StowedItem> {
        self.catalogue.iter()
    }

    fn stowed(&self, id: &str) -> Result<&StowedItem> {
        self.catalogue
            .get(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn slot(&self, id: &str) -> Result<SlotId> {
        self.catalogue
            .slot_of(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Places an item according to the requested mode and hints.
    ///
    /// On success the grid and catalogue are committed together and the
    /// chosen placement is returned. On failure nothing changes.
    pub fn place_item(&mut self, item: Item, options: &PlacementOptions) -> Result<Placement> {
        item.validate()?;
        if self.catalogue.contains(item.id()) {
            return Err(Error::Conflict(format!(
                "item '{}' is already stowed in container '{}'",
                item.id(),
                self.id
            )));
        }

        let chosen = ranker::choose_placement(
            &self.grid,
            &self.catalogue,
            self.open_face,
            self.today,
            &item,
            options,
        )?
        .ok_or_else(|| {
            Error::Conflict(format!(
                "no feasible placement for item '{}' in container '{}'",
                item.id(),
                self.id
            ))
        })?;

        let stowed = StowedItem::new(&item, chosen.position, chosen.orientation);
        let slot = self.catalogue.insert(stowed)?;
        if let Err(err) = self.grid.occupy(chosen.position, chosen.eff_dims, slot) {
            // Roll the catalogue back so the aggregate stays consistent.
            let _ = self.catalogue.remove(item.id());
            return Err(err);
        }

        debug!(
            "placed '{}' in '{}' at ({}, {}, {})",
            item.id(),
            self.id,
            chosen.position.x,
            chosen.position.y,
            chosen.position.z
        );
        Ok(chosen)
    }

    /// Removes an item whose extraction corridor is clear.
    ///
    /// When other items block the corridor the removal is refused with
    /// [`Error::NotAccessible`] carrying the plan that would clear it.
    pub fn remove_item(&mut self, id: &str) -> Result<StowedItem> {
        let blockers = retrieval::blocking_items(&self.grid, &self.catalogue, self.open_face, id)?;
        if !blockers.is_empty() {
            return Err(Error::NotAccessible {
                id: id.to_string(),
                plan: RetrievalPlan::with_moves(blockers, id.to_string()),
            });
        }

        let (item, slot) = self.catalogue.remove(id)?;
        self.grid.release(slot)?;
        debug!("removed '{}' from '{}'", id, self.id);
        Ok(item)
    }

    /// Records one use of an item. Returns `true` when this use depleted
    /// its budget and turned it into waste.
    pub fn use_item(&mut self, id: &str) -> Result<bool> {
        let item = self
            .catalogue
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        item.record_use()
    }

    /// Advances the clock. Items whose expiry has passed become waste;
    /// the newly wasted ids are returned. The clock never moves
    /// backwards.
    pub fn advance_to(&mut self, day: Day) -> Vec<ItemId> {
        if day > self.today {
            self.today = day;
        }
        let expired: Vec<ItemId> = self
            .catalogue
            .iter()
            .filter(|item| !item.is_waste && item.expired_by(self.today))
            .map(|item| item.id.clone())
            .collect();
        for id in &expired {
            if let Some(item) = self.catalogue.get_mut(id) {
                item.mark_waste();
            }
        }
        expired
    }

    /// Feasible `(position, orientation)` pairs for the dimensions, in
    /// enumeration order.
    pub fn find_valid_placements(&self, dims: Dims) -> impl Iterator<Item = Placement> + '_ {
        search::find_valid_placements(&self.grid, dims)
    }

    /// True iff the dimensions fit somewhere in some orientation.
    pub fn check_space_availability(&self, dims: Dims) -> bool {
        search::check_space_availability(&self.grid, dims)
    }

    /// Scores every feasible placement for an item, best first.
    pub fn rank_placements(
        &self,
        item: &Item,
        options: &PlacementOptions,
    ) -> Result<Vec<RankedPlacement>> {
        ranker::rank_placements(
            &self.grid,
            &self.catalogue,
            self.open_face,
            self.today,
            item,
            options,
        )
    }

    /// True iff the item's extraction-side face lies on the open face.
    pub fn is_item_visible(&self, id: &str) -> Result<bool> {
        let item = self.stowed(id)?;
        Ok(visibility::is_item_visible(
            self.grid.dims(),
            self.open_face,
            &item.region(),
        ))
    }

    /// Percentage of the item's cells visible from the open face.
    pub fn visibility_score(&self, id: &str) -> Result<f64> {
        let item = self.stowed(id)?;
        let slot = self.slot(id)?;
        Ok(visibility::visibility_score(
            &self.grid,
            self.open_face,
            &item.region(),
            slot,
        ))
    }

    /// Composite accessibility score of an item, in `[0, 100]`.
    pub fn accessibility_score(&self, id: &str) -> Result<f64> {
        let item = self.stowed(id)?;
        let slot = self.slot(id)?;
        Ok(visibility::accessibility_score(
            &self.grid,
            self.open_face,
            &item.region(),
            slot,
        ))
    }

    /// Items in the target's extraction corridor, nearest the open face
    /// first.
    pub fn blocking_items(&self, id: &str) -> Result<Vec<ItemId>> {
        retrieval::blocking_items(&self.grid, &self.catalogue, self.open_face, id)
    }

    /// The plan that frees the target item.
    pub fn retrieval_plan(&self, id: &str) -> Result<RetrievalPlan> {
        retrieval::retrieval_plan(&self.grid, &self.catalogue, self.open_face, id)
    }

    /// True iff the two stowed items overlap. Always false for a
    /// consistent container; exposed for auditing.
    pub fn items_collide(&self, a: &str, b: &str) -> Result<bool> {
        let first = self.stowed(a)?;
        let second = self.stowed(b)?;
        Ok(first.region().overlaps(&second.region()))
    }

    /// Fraction of the container volume in use, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        metrics::utilization(&self.grid, &self.catalogue)
    }

    /// A maximal empty box, if any free space remains.
    pub fn find_largest_empty_box(&self, cancel: &CancelToken) -> Result<Option<BoxRegion>> {
        self.grid.find_largest_empty_box(cancel)
    }

    /// Decomposes the free space into maximal empty boxes. Pure: the
    /// grid is identical before and after on every path.
    pub fn fragmentation_analysis(&self, cancel: &CancelToken) -> Result<FragmentationReport> {
        metrics::fragmentation_analysis(&self.grid, cancel)
    }

    /// Items expiring within `days` of the clock, soonest first, with
    /// their current accessibility.
    pub fn expiring_within(&self, days: u32) -> Vec<ExpiringItem> {
        metrics::expiring_within(
            &self.grid,
            &self.catalogue,
            self.open_face,
            self.today,
            days,
        )
    }

    /// Advisory tags for the current container state.
    pub fn recommendations(&self, cancel: &CancelToken) -> Result<Vec<Recommendation>> {
        metrics::recommendations(
            &self.grid,
            &self.catalogue,
            self.open_face,
            self.today,
            cancel,
        )
    }

    /// Every item that is waste as of the clock.
    pub fn identify_waste(&self) -> Vec<WasteRecord> {
        waste::identify_waste(&self.catalogue, self.today)
    }

    /// Plans a return load of this container's waste under a mass
    /// ceiling, lightest items first.
    pub fn plan_waste_return(&self, max_mass: f64) -> ReturnPlan {
        waste::plan_return(&self.identify_waste(), max_mass)
    }

    /// Finds the instance of a named item that is cheapest to retrieve:
    /// fewest corridor blockers, closest expiry as the tie-breaker.
    pub fn search_by_name(&self, name: &str) -> Option<SearchHit> {
        let mut best: Option<SearchHit> = None;
        for item in self.catalogue.iter().filter(|i| i.name == name) {
            let blockers = self
                .blocking_items(&item.id)
                .unwrap_or_default();
            let expiry_penalty = match item.expiry {
                Some(expiry) => (self.today.days_until(expiry).max(0) as f64) / 100.0,
                None => 0.0,
            };
            let score = blockers.len() as f64 + expiry_penalty;
            if best.as_ref().map_or(true, |hit| score < hit.score) {
                let plan = match self.retrieval_plan(&item.id) {
                    Ok(plan) => plan,
                    Err(_) => continue,
                };
                best = Some(SearchHit {
                    id: item.id.clone(),
                    blockers,
                    plan,
                    score,
                });
            }
        }
        best
    }
}
