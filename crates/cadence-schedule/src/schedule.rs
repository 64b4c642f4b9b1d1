//! The mutable schedule
//!
//! Structural edits (indexing, slicing, splicing, concatenation) live here;
//! operation placement lives in `mutation.rs`.

use crate::acceptance::Acceptance;
use crate::error::{ScheduleError, ScheduleResult};
use crate::frozen::{self, FrozenSchedule};
use crate::merge;
use crate::operation::{OpTree, Operation, RemapResources};
use crate::partition;
use crate::strategy::{Alignment, InsertStrategy};
use crate::time_slot::TimeSlot;
use crate::view::ScheduleView;
use cadence_primitives::Resource;
use std::ops::{Index, Range};

/// An ordered, mutable sequence of time slots.
///
/// Slot order is time order. Every slot keeps its operations on disjoint
/// resources, and every mutator either completes or leaves the schedule
/// untouched.
#[derive(Clone, Debug)]
pub struct Schedule<O> {
    pub(crate) slots: Vec<TimeSlot<O>>,
    pub(crate) acceptance: Option<Acceptance<O>>,
}

impl<O> Default for Schedule<O> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            acceptance: None,
        }
    }
}

impl<O: Operation> Schedule<O> {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schedule from existing slots, kept verbatim
    pub fn from_slots(slots: Vec<TimeSlot<O>>) -> Self {
        Self {
            slots,
            acceptance: None,
        }
    }

    /// Build a schedule by appending `tree` with `strategy`
    pub fn from_operations(
        tree: impl Into<OpTree<O>>,
        strategy: InsertStrategy,
    ) -> ScheduleResult<Self> {
        let mut schedule = Self::new();
        schedule.append(tree, strategy)?;
        Ok(schedule)
    }

    pub(crate) fn from_parts(slots: Vec<TimeSlot<O>>, acceptance: Option<Acceptance<O>>) -> Self {
        Self { slots, acceptance }
    }

    pub(crate) fn into_parts(self) -> (Vec<TimeSlot<O>>, Option<Acceptance<O>>) {
        (self.slots, self.acceptance)
    }

    /// Attach a placement acceptance predicate
    pub fn with_acceptance(mut self, acceptance: Acceptance<O>) -> Self {
        self.acceptance = Some(acceptance);
        self
    }

    /// Immutable copy of this schedule
    pub fn freeze(&self) -> FrozenSchedule<O> {
        FrozenSchedule::from_parts(self.slots.clone(), self.acceptance.clone())
    }

    /// Consume the schedule, returning its slots
    pub fn into_slots(self) -> Vec<TimeSlot<O>> {
        self.slots
    }

    /// Slots in `range`, clamped to the length
    pub fn slice(&self, range: Range<usize>) -> Schedule<O> {
        let (start, end) = self.clamp(range);
        Self::from_parts(self.slots[start..end].to_vec(), self.acceptance.clone())
    }

    /// Slots in `range` keeping only operations touching `resources`
    pub fn project_range(&self, range: Range<usize>, resources: &[Resource]) -> Schedule<O> {
        let (start, end) = self.clamp(range);
        let slots = self.slots[start..end]
            .iter()
            .map(|slot| slot.project(resources))
            .collect();
        Self::from_parts(slots, self.acceptance.clone())
    }

    fn clamp(&self, range: Range<usize>) -> (usize, usize) {
        let end = range.end.min(self.slots.len());
        (range.start.min(end), end)
    }

    fn check_index(&self, index: usize) -> ScheduleResult<()> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(ScheduleError::IndexOutOfBounds {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// Replace the slot at `index`
    pub fn set_slot(&mut self, index: usize, slot: TimeSlot<O>) -> ScheduleResult<()> {
        self.check_index(index)?;
        slot.iter().try_for_each(frozen::check_acyclic)?;
        self.slots[index] = slot;
        Ok(())
    }

    /// Replace the slots in `range` with `trees`, each of which must be a
    /// time slot
    pub fn splice<I>(&mut self, range: Range<usize>, trees: I) -> ScheduleResult<()>
    where
        I: IntoIterator<Item = OpTree<O>>,
    {
        if range.start > range.end || range.end > self.slots.len() {
            return Err(ScheduleError::InvalidRange {
                start: range.start,
                end: range.end,
                len: self.slots.len(),
            });
        }

        let slots = trees
            .into_iter()
            .map(TimeSlot::try_from)
            .collect::<ScheduleResult<Vec<_>>>()?;
        for slot in &slots {
            slot.iter().try_for_each(frozen::check_acyclic)?;
        }
        self.slots.splice(range, slots);
        Ok(())
    }

    /// Remove and return the slot at `index`
    pub fn remove_slot(&mut self, index: usize) -> ScheduleResult<TimeSlot<O>> {
        self.check_index(index)?;
        Ok(self.slots.remove(index))
    }

    /// Append every slot of `other` verbatim
    pub fn concat(&mut self, other: &impl ScheduleView<O>) {
        self.slots.extend_from_slice(other.slots());
    }

    /// The slot sequence repeated `times` times
    pub fn repeat(&self, times: usize) -> Schedule<O> {
        let slots = self
            .slots
            .iter()
            .cycle()
            .take(self.slots.len() * times)
            .cloned()
            .collect();
        Self::from_parts(slots, self.acceptance.clone())
    }

    /// Remove the operations touching `resources` from every in-range slot
    /// of `indices`
    pub fn clear_operations_touching<I>(&mut self, resources: &[Resource], indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        for index in indices {
            if let Some(slot) = self.slots.get(index) {
                self.slots[index] = slot.without_touching(resources);
            }
        }
    }

    /// Split into independent sub-schedules.
    ///
    /// One partition yields a copy of this schedule. Otherwise there is one
    /// schedule per partition with every slot projected onto it, so slot
    /// indices line up with the original. A schedule without resources has
    /// no factors.
    pub fn factorize(&self) -> Vec<Schedule<O>> {
        match partition::factor_slots(&self.slots) {
            None => vec![self.clone()],
            Some(factors) => factors
                .into_iter()
                .map(|slots| Self::from_parts(slots, self.acceptance.clone()))
                .collect(),
        }
    }

    /// Merge schedules slot by slot, see [`Alignment`] for how shorter ones
    /// are padded
    pub fn zip(schedules: &[&Schedule<O>], align: Alignment) -> ScheduleResult<Schedule<O>> {
        let slots: Vec<&[TimeSlot<O>]> = schedules.iter().map(|s| s.slots.as_slice()).collect();
        merge::zip(&slots, align).map(Self::from_slots)
    }

    /// Concatenate schedules, sliding each into the previous ones as far as
    /// their resources allow. Not associative.
    pub fn tetris_concat(
        schedules: &[&Schedule<O>],
        align: Alignment,
    ) -> ScheduleResult<Schedule<O>> {
        let slots: Vec<&[TimeSlot<O>]> = schedules.iter().map(|s| s.slots.as_slice()).collect();
        merge::tetris_concat(&slots, align).map(Self::from_slots)
    }
}

impl<O: RemapResources> Schedule<O> {
    /// The same schedule acting on `f(r)` instead of every resource `r`.
    ///
    /// Fails if the mapping makes two operations of one slot collide.
    pub fn transform_resources<F>(&self, mut f: F) -> ScheduleResult<Schedule<O>>
    where
        F: FnMut(&Resource) -> Resource,
    {
        let slots = self
            .slots
            .iter()
            .map(|slot| TimeSlot::from_operations(slot.iter().map(|op| op.remap_resources(&mut f))))
            .collect::<ScheduleResult<Vec<_>>>()?;
        Ok(Self::from_parts(slots, self.acceptance.clone()))
    }
}

impl<O: Operation> ScheduleView<O> for Schedule<O> {
    fn slots(&self) -> &[TimeSlot<O>] {
        &self.slots
    }

    fn acceptance(&self) -> Option<&Acceptance<O>> {
        self.acceptance.as_ref()
    }
}

impl<O: Operation> PartialEq for Schedule<O> {
    fn eq(&self, other: &Self) -> bool {
        self.acceptance == other.acceptance && self.slots == other.slots
    }
}

impl<O: Operation> PartialEq<FrozenSchedule<O>> for Schedule<O> {
    fn eq(&self, other: &FrozenSchedule<O>) -> bool {
        other == self
    }
}

impl<O: Operation> Index<usize> for Schedule<O> {
    type Output = TimeSlot<O>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.slots[index]
    }
}

impl<'a, O> IntoIterator for &'a Schedule<O> {
    type Item = &'a TimeSlot<O>;
    type IntoIter = std::slice::Iter<'a, TimeSlot<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl<O: Operation> From<FrozenSchedule<O>> for Schedule<O> {
    fn from(frozen: FrozenSchedule<O>) -> Self {
        frozen.unfreeze()
    }
}
