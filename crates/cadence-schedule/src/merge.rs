//! Slot-wise merging of several schedules

use crate::error::ScheduleResult;
use crate::operation::Operation;
use crate::strategy::Alignment;
use crate::time_slot::TimeSlot;
use cadence_primitives::Resource;
use std::collections::HashMap;

/// Slot `k` of the result is the disjoint union of every input's slot `k`
pub(crate) fn zip<O: Operation>(
    schedules: &[&[TimeSlot<O>]],
    align: Alignment,
) -> ScheduleResult<Vec<TimeSlot<O>>> {
    let n = schedules.iter().map(|s| s.len()).max().unwrap_or(0);
    tracing::debug!("Zipping {} schedules into {} slots ({})", schedules.len(), n, align);

    let mut merged = Vec::with_capacity(n);
    for k in 0..n {
        let mut slot = TimeSlot::new();
        for schedule in schedules {
            let source = match align {
                Alignment::Left => schedule.get(k),
                // Tails line up; FIRST has nothing to stop early on here
                Alignment::Right | Alignment::First => {
                    (schedule.len() + k).checked_sub(n).map(|i| &schedule[i])
                }
            };
            if let Some(source) = source {
                slot = slot
                    .disjoint_union(source)
                    .map_err(|e| e.into_collision(k))?;
            }
        }
        merged.push(slot);
    }
    Ok(merged)
}

/// Which schedule first claimed a resource while scanning from the seam
#[derive(Clone, Copy)]
enum Claim {
    /// Distance back from the end of the accumulated schedule
    Accumulated(usize),
    /// Distance forward from the start of the incoming schedule
    Incoming(usize),
}

/// How far `incoming` can slide into `accumulated` before two operations on
/// one resource would share a slot
fn overlap_collision_time<O: Operation>(
    accumulated: &[TimeSlot<O>],
    incoming: &[TimeSlot<O>],
    align: Alignment,
) -> usize {
    let mut claims: HashMap<&Resource, Claim> = HashMap::new();
    let mut bound = match align {
        Alignment::Left => accumulated.len(),
        Alignment::Right => incoming.len(),
        Alignment::First => accumulated.len().min(incoming.len()),
    };

    let mut t = 0;
    while t < bound {
        if let Some(slot) = incoming.get(t) {
            for r in slot.iter().flat_map(|op| op.resources()) {
                if let Claim::Accumulated(k) = *claims.entry(r).or_insert(Claim::Incoming(t)) {
                    bound = bound.min(t + k);
                }
            }
        }
        if t < accumulated.len() {
            let slot = &accumulated[accumulated.len() - 1 - t];
            for r in slot.iter().flat_map(|op| op.resources()) {
                if let Claim::Incoming(k) = *claims.entry(r).or_insert(Claim::Accumulated(t)) {
                    bound = bound.min(t + k);
                }
            }
        }
        t += 1;
    }
    bound
}

/// Concatenate schedules left to right, sliding each one as far back into
/// the accumulated result as its resources allow.
///
/// Not associative: `f(f(a, b), c)` and `f(a, f(b, c))` can differ.
pub(crate) fn tetris_concat<O: Operation>(
    schedules: &[&[TimeSlot<O>]],
    align: Alignment,
) -> ScheduleResult<Vec<TimeSlot<O>>> {
    let Some((first, rest)) = schedules.split_first() else {
        return Ok(Vec::new());
    };

    let mut n_acc = first.len();
    let pad: usize = rest.iter().map(|s| s.len()).sum();
    let mut buffer: Vec<TimeSlot<O>> = (0..pad * 2 + n_acc).map(|_| TimeSlot::new()).collect();

    // The first schedule sits in the middle so later ones can land on
    // either side of it.
    let mut offset = pad;
    buffer[offset..offset + n_acc].clone_from_slice(first);

    for incoming in rest {
        let shift = overlap_collision_time(&buffer[offset..offset + n_acc], incoming, align);
        let incoming_offset = offset + n_acc - shift;
        let new_offset = offset.min(incoming_offset);
        tracing::trace!(
            "Sliding {} slots into {} by {} ({})",
            incoming.len(),
            n_acc,
            shift,
            align
        );

        for (k, slot) in incoming.iter().enumerate() {
            let at = incoming_offset + k;
            buffer[at] = buffer[at]
                .disjoint_union(slot)
                .map_err(|e| e.into_collision(at - new_offset))?;
        }

        n_acc = n_acc
            .max(incoming.len())
            .max(n_acc + incoming.len() - shift);
        offset = new_offset;
    }

    buffer.truncate(offset + n_acc);
    tracing::debug!("Tetris concat of {} schedules produced {} slots", schedules.len(), n_acc);
    Ok(buffer.split_off(offset))
}
