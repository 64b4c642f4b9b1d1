//! Frontier, reachability and blocking queries
//!
//! All functions work over a plain slot slice so mutable and frozen
//! schedules share one implementation.

use crate::bucket_queue::BucketPriorityQueue;
use crate::error::{ScheduleError, ScheduleResult};
use crate::operation::Operation;
use crate::time_slot::TimeSlot;
use crate::view::ScheduleView;
use cadence_primitives::Resource;
use std::collections::{BTreeMap, BTreeSet};

/// Resource -> slot index boundary
pub type Frontier = BTreeMap<Resource, usize>;

/// First index in `indices` whose slot touches `resources`
fn first_touching<O, I>(slots: &[TimeSlot<O>], resources: &[Resource], indices: I) -> Option<usize>
where
    O: Operation,
    I: IntoIterator<Item = isize>,
{
    indices.into_iter().find_map(|i| {
        let i = usize::try_from(i).ok()?;
        slots
            .get(i)
            .filter(|slot| slot.touches(resources))
            .map(|_| i)
    })
}

/// Next use of `resources` at or after `start`, unbounded
pub(crate) fn next_use<O: Operation>(
    slots: &[TimeSlot<O>],
    resources: &[Resource],
    start: usize,
) -> Option<usize> {
    (start..slots.len()).find(|&i| slots[i].touches(resources))
}

pub(crate) fn next_slot_operating_on<O: Operation>(
    slots: &[TimeSlot<O>],
    resources: &[Resource],
    start: usize,
    max_distance: Option<isize>,
) -> ScheduleResult<Option<usize>> {
    let remaining = slots.len() as isize - start as isize;
    let distance = match max_distance {
        None => remaining,
        Some(d) if d < 0 => return Err(ScheduleError::NegativeDistance(d)),
        Some(d) => d.min(remaining),
    };

    let start = start as isize;
    Ok(first_touching(slots, resources, start..start + distance))
}

pub(crate) fn next_slots_operating_on<O: Operation>(
    slots: &[TimeSlot<O>],
    resources: &[Resource],
    start: usize,
) -> Frontier {
    resources
        .iter()
        .map(|r| {
            let next = next_use(slots, std::slice::from_ref(r), start).unwrap_or(slots.len());
            (r.clone(), next)
        })
        .collect()
}

pub(crate) fn prev_slot_operating_on<O: Operation>(
    slots: &[TimeSlot<O>],
    resources: &[Resource],
    end: Option<usize>,
    max_distance: Option<isize>,
) -> ScheduleResult<Option<usize>> {
    let len = slots.len() as isize;
    let mut end = end.map_or(len, |e| e as isize);
    let mut distance = match max_distance {
        None => len,
        Some(d) if d < 0 => return Err(ScheduleError::NegativeDistance(d)),
        Some(d) => d.min(end),
    };

    // Nothing to search past the last slot
    if end > len {
        let overshoot = end - len;
        end -= overshoot;
        distance -= overshoot;
    }
    if distance <= 0 {
        return Ok(None);
    }

    Ok(first_touching(
        slots,
        resources,
        (0..distance).map(|k| end - k - 1),
    ))
}

struct Reach<'s, 'f, O> {
    slots: &'s [TimeSlot<O>],
    start: &'f Frontier,
    active: BTreeSet<Resource>,
    end: Frontier,
    /// Values are positions within the slot named by the key
    queue: BucketPriorityQueue<usize>,
}

impl<O: Operation> Reach<'_, '_, O> {
    fn enqueue_next(&mut self, resource: &Resource, from: usize) {
        let next = next_use(self.slots, std::slice::from_ref(resource), from).and_then(|index| {
            self.slots[index]
                .position_of(resource)
                .map(|position| (index, position))
        });

        match next {
            Some((index, position)) => {
                self.queue.enqueue(index, position);
            }
            None => {
                let start = self.start.get(resource).copied().unwrap_or(0);
                self.end
                    .insert(resource.clone(), self.slots.len().max(start));
                self.active.remove(resource);
            }
        }
    }
}

pub(crate) fn reachable_frontier_from<O, F>(
    slots: &[TimeSlot<O>],
    start: &Frontier,
    is_blocker: F,
) -> Frontier
where
    O: Operation,
    F: Fn(&O) -> bool,
{
    let mut reach = Reach {
        slots,
        start,
        active: BTreeSet::new(),
        end: Frontier::new(),
        queue: BucketPriorityQueue::new(true),
    };

    for (resource, &index) in start {
        reach.enqueue_next(resource, index);
    }

    while let Some((index, position)) = reach.queue.dequeue() {
        let op = &slots[index].operations()[position];

        for r in op.resources() {
            let started = start.get(r).is_some_and(|&s| index >= s);
            if started && !reach.end.contains_key(r) {
                reach.active.insert(r.clone());
            }
        }

        let continue_past =
            op.resources().iter().all(|r| reach.active.contains(r)) && !is_blocker(op);
        if continue_past {
            for r in op.resources() {
                reach.enqueue_next(r, index + 1);
            }
        } else {
            for r in op.resources() {
                if reach.active.remove(r) {
                    reach.end.insert(r.clone(), index);
                }
            }
        }
    }

    reach.end
}

pub(crate) fn operations_between<'s, O: Operation>(
    slots: &'s [TimeSlot<O>],
    start: &Frontier,
    end: &Frontier,
    omit_crossing: bool,
) -> Vec<(usize, &'s O)> {
    let involved: BTreeSet<&Resource> = start.keys().chain(end.keys()).collect();
    let mut found = BucketPriorityQueue::new(true);

    for &resource in &involved {
        let from = start.get(resource).copied().unwrap_or(0);
        let to = end.get(resource).copied().unwrap_or(slots.len());
        for index in from..to.min(slots.len()) {
            let Some(position) = slots[index].position_of(resource) else {
                continue;
            };
            let op = &slots[index].operations()[position];
            if omit_crossing && !op.resources().iter().all(|r| involved.contains(r)) {
                continue;
            }
            found.enqueue(index, position);
        }
    }

    found
        .into_iter()
        .map(|(index, position)| (index, &slots[index].operations()[position]))
        .collect()
}

pub(crate) fn operations_until_blocked<'s, O, F>(
    slots: &'s [TimeSlot<O>],
    start: &Frontier,
    is_blocker: F,
) -> Vec<(usize, &'s O)>
where
    O: Operation,
    F: Fn(&O) -> bool,
{
    let mut found = Vec::new();
    let Some(&first) = start.values().min() else {
        return found;
    };

    let mut blocked: BTreeSet<&Resource> = BTreeSet::new();
    for (index, slot) in slots.iter().enumerate().skip(first) {
        let active: BTreeSet<&Resource> = start
            .iter()
            .filter(|(_, &s)| s <= index)
            .map(|(r, _)| r)
            .collect();

        for op in slot {
            let resources = op.resources();
            if is_blocker(op) || resources.iter().any(|r| blocked.contains(r)) {
                blocked.extend(resources.iter());
            } else if resources.iter().any(|r| active.contains(r)) {
                found.push((index, op));
            }
        }

        if start.keys().all(|r| blocked.contains(r)) {
            break;
        }
    }
    found
}

pub(crate) fn find_operations<'s, O: Operation>(
    slots: &'s [TimeSlot<O>],
    predicate: &dyn Fn(&O) -> bool,
) -> Vec<(usize, &'s O)> {
    slots
        .iter()
        .enumerate()
        .flat_map(|(index, slot)| slot.iter().map(move |op| (index, op)))
        .filter(|(_, op)| predicate(op))
        .collect()
}

fn is_terminal<O: Operation>(slots: &[TimeSlot<O>], op: &O, index: usize) -> bool {
    next_use(slots, op.resources(), index + 1).is_none()
}

pub(crate) fn are_all_matches_terminal<O: Operation>(
    slots: &[TimeSlot<O>],
    predicate: &dyn Fn(&O) -> bool,
) -> bool {
    let flat_terminal = find_operations(slots, predicate)
        .into_iter()
        .filter(|(_, op)| op.as_nested_schedule().is_none())
        .all(|(index, op)| is_terminal(slots, op, index));
    if !flat_terminal {
        return false;
    }

    for (index, slot) in slots.iter().enumerate() {
        for op in slot {
            let Some(nested) = op.as_nested_schedule() else {
                continue;
            };
            let inner = nested.slots();
            if !are_all_matches_terminal(inner, predicate) {
                return false;
            }
            if index + 1 < slots.len()
                && !find_operations(inner, predicate)
                    .into_iter()
                    .all(|(_, inner_op)| is_terminal(slots, inner_op, index))
            {
                return false;
            }
        }
    }
    true
}

pub(crate) fn are_any_matches_terminal<O: Operation>(
    slots: &[TimeSlot<O>],
    predicate: &dyn Fn(&O) -> bool,
) -> bool {
    let flat_terminal = find_operations(slots, predicate)
        .into_iter()
        .filter(|(_, op)| op.as_nested_schedule().is_none())
        .any(|(index, op)| is_terminal(slots, op, index));
    if flat_terminal {
        return true;
    }

    for (index, slot) in slots.iter().enumerate().rev() {
        for op in slot {
            let Some(nested) = op.as_nested_schedule() else {
                continue;
            };
            let inner = nested.slots();
            if !are_any_matches_terminal(inner, predicate) {
                continue;
            }
            if index + 1 == slots.len()
                || find_operations(inner, predicate)
                    .into_iter()
                    .any(|(_, inner_op)| is_terminal(slots, inner_op, index))
            {
                return true;
            }
        }
    }
    false
}
