//! Immutable schedules and nesting checks

use crate::acceptance::Acceptance;
use crate::error::{ScheduleError, ScheduleResult};
use crate::operation::Operation;
use crate::partition;
use crate::schedule::Schedule;
use crate::time_slot::TimeSlot;
use crate::view::ScheduleView;
use std::ops::{Index, Range};
use std::sync::Arc;

/// A schedule that can no longer change.
///
/// Clones share the slot list, which makes frozen schedules cheap to nest
/// inside operations.
#[derive(Debug)]
pub struct FrozenSchedule<O> {
    slots: Arc<[TimeSlot<O>]>,
    acceptance: Option<Acceptance<O>>,
}

impl<O> Clone for FrozenSchedule<O> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            acceptance: self.acceptance.clone(),
        }
    }
}

impl<O: Operation> FrozenSchedule<O> {
    /// Freeze a slot sequence
    pub fn new(slots: Vec<TimeSlot<O>>) -> Self {
        Self {
            slots: slots.into(),
            acceptance: None,
        }
    }

    pub(crate) fn from_parts(slots: Vec<TimeSlot<O>>, acceptance: Option<Acceptance<O>>) -> Self {
        Self {
            slots: slots.into(),
            acceptance,
        }
    }

    /// Mutable copy of this schedule
    pub fn unfreeze(&self) -> Schedule<O> {
        Schedule::from_parts(self.slots.to_vec(), self.acceptance.clone())
    }

    /// Check if both schedules share one slot list
    pub fn shares_slots_with(&self, other: &FrozenSchedule<O>) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }

    /// Address of the shared slot list
    pub(crate) fn identity(&self) -> *const () {
        Arc::as_ptr(&self.slots) as *const ()
    }

    /// Slots in `range`, clamped to the length
    pub fn slice(&self, range: Range<usize>) -> FrozenSchedule<O> {
        let end = range.end.min(self.slots.len());
        let start = range.start.min(end);
        Self::from_parts(self.slots[start..end].to_vec(), self.acceptance.clone())
    }

    /// Split into independent sub-schedules, see [`Schedule::factorize`]
    pub fn factorize(&self) -> Vec<FrozenSchedule<O>> {
        match partition::factor_slots(&self.slots) {
            None => vec![self.clone()],
            Some(factors) => factors
                .into_iter()
                .map(|slots| Self::from_parts(slots, self.acceptance.clone()))
                .collect(),
        }
    }
}

impl<O: Operation> ScheduleView<O> for FrozenSchedule<O> {
    fn slots(&self) -> &[TimeSlot<O>] {
        &self.slots
    }

    fn acceptance(&self) -> Option<&Acceptance<O>> {
        self.acceptance.as_ref()
    }
}

impl<O: Operation> PartialEq for FrozenSchedule<O> {
    fn eq(&self, other: &Self) -> bool {
        self.acceptance == other.acceptance && self.slots[..] == other.slots[..]
    }
}

impl<O: Operation> PartialEq<Schedule<O>> for FrozenSchedule<O> {
    fn eq(&self, other: &Schedule<O>) -> bool {
        self.acceptance() == other.acceptance() && self.slots() == other.slots()
    }
}

impl<O: Operation> Index<usize> for FrozenSchedule<O> {
    type Output = TimeSlot<O>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.slots[index]
    }
}

impl<O: Operation> From<Schedule<O>> for FrozenSchedule<O> {
    fn from(schedule: Schedule<O>) -> Self {
        let (slots, acceptance) = schedule.into_parts();
        Self::from_parts(slots, acceptance)
    }
}

/// Reject operations whose nested schedules contain themselves
pub(crate) fn check_acyclic<O: Operation>(op: &O) -> ScheduleResult<()> {
    let mut ancestors = Vec::new();
    visit(op, &mut ancestors)
}

fn visit<O: Operation>(op: &O, ancestors: &mut Vec<*const ()>) -> ScheduleResult<()> {
    let Some(nested) = op.as_nested_schedule() else {
        return Ok(());
    };

    let id = nested.identity();
    if ancestors.contains(&id) {
        return Err(ScheduleError::CyclicNesting);
    }
    ancestors.push(id);
    for inner in nested.all_operations() {
        visit(inner, ancestors)?;
    }
    ancestors.pop();
    Ok(())
}
