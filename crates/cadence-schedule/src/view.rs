//! Read-only queries shared by mutable and frozen schedules

use crate::acceptance::Acceptance;
use crate::error::{ScheduleError, ScheduleResult};
use crate::frontier::{self, Frontier};
use crate::operation::Operation;
use crate::partition;
use crate::time_slot::TimeSlot;
use cadence_primitives::Resource;
use std::collections::BTreeSet;

/// Structural queries over an ordered sequence of time slots.
///
/// Implementors only provide the slot sequence and acceptance context;
/// every query is a provided method.
pub trait ScheduleView<O: Operation> {
    /// The slot sequence, in time order
    fn slots(&self) -> &[TimeSlot<O>];

    /// The placement acceptance predicate, if any
    fn acceptance(&self) -> Option<&Acceptance<O>>;

    /// Number of slots
    fn len(&self) -> usize {
        self.slots().len()
    }

    /// Check if there are no slots
    fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    /// Slot at `index`
    fn slot(&self, index: usize) -> Option<&TimeSlot<O>> {
        self.slots().get(index)
    }

    /// Slot at `index`, keeping only operations touching `resources`
    fn project(&self, index: usize, resources: &[Resource]) -> ScheduleResult<TimeSlot<O>> {
        self.slot(index)
            .map(|slot| slot.project(resources))
            .ok_or(ScheduleError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    /// Operation on `resource` at slot `index`. Indices past the end are
    /// allowed and yield `None`.
    fn operation_at(&self, resource: &Resource, index: usize) -> Option<&O> {
        self.slot(index)?.operation_at(resource)
    }

    /// Every resource some operation acts on
    fn all_resources(&self) -> BTreeSet<Resource> {
        self.slots()
            .iter()
            .flat_map(|slot| slot.resources().cloned())
            .collect()
    }

    /// Every operation, in slot then insertion order
    fn all_operations(&self) -> Box<dyn Iterator<Item = &O> + '_> {
        Box::new(self.slots().iter().flat_map(|slot| slot.iter()))
    }

    /// Every `(index, operation)` pair, in slot then insertion order
    fn indexed_operations(&self) -> Box<dyn Iterator<Item = (usize, &O)> + '_> {
        Box::new(
            self.slots()
                .iter()
                .enumerate()
                .flat_map(|(index, slot)| slot.iter().map(move |op| (index, op))),
        )
    }

    /// Earliest slot in `[start, start + max_distance)` touching any of
    /// `resources`. No distance means no limit.
    fn next_slot_operating_on(
        &self,
        resources: &[Resource],
        start: usize,
        max_distance: Option<isize>,
    ) -> ScheduleResult<Option<usize>> {
        frontier::next_slot_operating_on(self.slots(), resources, start, max_distance)
    }

    /// Next use of each resource at or after `start`; the length when unused
    fn next_slots_operating_on(&self, resources: &[Resource], start: usize) -> Frontier {
        frontier::next_slots_operating_on(self.slots(), resources, start)
    }

    /// Latest slot in `[end - max_distance, end)` touching any of
    /// `resources`. `end` defaults to the length and is clamped to it.
    fn prev_slot_operating_on(
        &self,
        resources: &[Resource],
        end: Option<usize>,
        max_distance: Option<isize>,
    ) -> ScheduleResult<Option<usize>> {
        frontier::prev_slot_operating_on(self.slots(), resources, end, max_distance)
    }

    /// How far each resource of `start` can advance before hitting a
    /// blocking operation.
    ///
    /// A location `(r, i)` is reachable when `start[r] <= i < end[r]` for the
    /// returned `end`. An operation blocks when `is_blocker` says so, when it
    /// touches a resource outside `start`, or when it sits before the start
    /// of one of its resources.
    fn reachable_frontier_from<F>(&self, start: &Frontier, is_blocker: F) -> Frontier
    where
        F: Fn(&O) -> bool,
    {
        frontier::reachable_frontier_from(self.slots(), start, is_blocker)
    }

    /// Operations between two frontiers, ordered by slot index.
    ///
    /// Resources missing from `start` begin at 0; those missing from `end`
    /// stop at the length. With `omit_crossing`, operations that also touch
    /// a resource outside both frontiers are dropped.
    fn operations_between(
        &self,
        start: &Frontier,
        end: &Frontier,
        omit_crossing: bool,
    ) -> Vec<(usize, &O)> {
        frontier::operations_between(self.slots(), start, end, omit_crossing)
    }

    /// Operations reachable from `start` before blocking operations cut
    /// every resource off
    fn operations_until_blocked<F>(&self, start: &Frontier, is_blocker: F) -> Vec<(usize, &O)>
    where
        F: Fn(&O) -> bool,
    {
        frontier::operations_until_blocked(self.slots(), start, is_blocker)
    }

    /// Every `(index, operation)` matching `predicate`
    fn find_operations<F>(&self, predicate: F) -> Vec<(usize, &O)>
    where
        F: Fn(&O) -> bool,
    {
        frontier::find_operations(self.slots(), &predicate)
    }

    /// Check that nothing follows any matching operation on its resources,
    /// nested schedules included
    fn are_all_matches_terminal<F>(&self, predicate: F) -> bool
    where
        F: Fn(&O) -> bool,
    {
        frontier::are_all_matches_terminal(self.slots(), &predicate)
    }

    /// Check that at least one matching operation is terminal, nested
    /// schedules included
    fn are_any_matches_terminal<F>(&self, predicate: F) -> bool
    where
        F: Fn(&O) -> bool,
    {
        frontier::are_any_matches_terminal(self.slots(), &predicate)
    }

    /// Resource partitions with no multi-resource operation between them,
    /// sorted by their smallest resource
    fn independent_resource_sets(&self) -> Vec<BTreeSet<Resource>> {
        partition::independent_resource_sets(self.slots())
    }
}
