//! Operation placement: strategy-driven insertion, range and frontier
//! insertion, and all-or-nothing batch edits

use crate::error::{ScheduleError, ScheduleResult};
use crate::frontier::Frontier;
use crate::frozen;
use crate::operation::{OpTree, Operation, Placeable};
use crate::schedule::Schedule;
use crate::strategy::InsertStrategy;
use crate::time_slot::TimeSlot;
use crate::view::ScheduleView;
use cadence_primitives::Resource;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace};

/// Reject operations that could never sit in a slot
fn validate_op<O: Operation>(op: &O) -> ScheduleResult<()> {
    let mut seen = HashSet::new();
    if let Some(resource) = op.resources().iter().find(|r| !seen.insert(*r)) {
        return Err(ScheduleError::StructuralViolation {
            resource: resource.clone(),
        });
    }
    frozen::check_acyclic(op)
}

impl<O: Operation> Schedule<O> {
    /// Check whether `op` may join slot `index`. Indices past the end are
    /// always free.
    fn can_place_at(&self, index: usize, op: &O) -> bool {
        match self.slots.get(index) {
            None => true,
            Some(slot) => {
                !slot.touches(op.resources())
                    && self
                        .acceptance
                        .as_ref()
                        .map_or(true, |acceptance| acceptance.accepts(op, slot))
            }
        }
    }

    /// Earliest slot before `end` that `op` can move back to without
    /// crossing a slot on its resources or a classical dependency
    fn prev_slot_available(&self, op: &O, end: usize) -> usize {
        let footprint = op.footprint();
        let mut last = end;
        for k in (0..end).rev() {
            let slot = &self.slots[k];
            if slot.touches(op.resources()) || footprint.is_ordered_against(&slot.footprint()) {
                return last;
            }
            if self.can_place_at(k, op) {
                last = k;
            }
        }
        last
    }

    /// Pick the slot for `op` with the cursor at `k`, creating one if the
    /// strategy calls for it
    fn pick_or_create(&mut self, k: usize, op: &O, strategy: InsertStrategy) -> usize {
        match strategy {
            InsertStrategy::New | InsertStrategy::NewThenInline => {
                self.slots.insert(k, TimeSlot::new());
                k
            }
            InsertStrategy::Inline => {
                if k > 0 && k - 1 < self.slots.len() && self.can_place_at(k - 1, op) {
                    k - 1
                } else {
                    self.pick_or_create(k, op, InsertStrategy::New)
                }
            }
            InsertStrategy::Earliest => {
                if self.can_place_at(k, op) {
                    self.prev_slot_available(op, k)
                } else {
                    self.pick_or_create(k, op, InsertStrategy::Inline)
                }
            }
        }
    }

    /// Insert operations and time slots at `index`.
    ///
    /// `index` is clamped to the length. Time slots in the tree are inserted
    /// as-is at the cursor; each operation goes wherever `strategy` puts it.
    /// Returns the index just after the inserted content.
    pub fn insert(
        &mut self,
        index: usize,
        tree: impl Into<OpTree<O>>,
        strategy: InsertStrategy,
    ) -> ScheduleResult<usize> {
        let items = tree.into().flatten();
        for item in &items {
            match item {
                Placeable::Op(op) => validate_op(op)?,
                Placeable::Slot(slot) => slot.iter().try_for_each(frozen::check_acyclic)?,
            }
        }

        let requested = strategy;
        let mut strategy = strategy;
        let mut k = index.min(self.slots.len());
        for item in items {
            match item {
                Placeable::Slot(slot) => {
                    self.slots.insert(k, slot);
                    k += 1;
                }
                Placeable::Op(op) => {
                    let p = self.pick_or_create(k, &op, strategy);
                    while p >= self.slots.len() {
                        self.slots.push(TimeSlot::new());
                    }
                    self.slots[p] = self.slots[p].with_operation(op)?;
                    k = k.max(p + 1);
                    if strategy == InsertStrategy::NewThenInline {
                        strategy = InsertStrategy::Inline;
                    }
                }
            }
        }

        trace!("Inserted at {} with {}, cursor now {}", index, requested, k);
        Ok(k)
    }

    /// Insert at the end
    pub fn append(
        &mut self,
        tree: impl Into<OpTree<O>>,
        strategy: InsertStrategy,
    ) -> ScheduleResult<usize> {
        self.insert(self.slots.len(), tree, strategy)
    }

    /// Write operations into the free space of `[start, end)`.
    ///
    /// A cursor walks forward through the range and places each operation
    /// in the first slot that takes it. Operations left over once the cursor
    /// reaches `end` are inserted at `end` with [`InsertStrategy::Earliest`].
    /// Returns `end` when everything fit in the range.
    pub fn insert_into_range(
        &mut self,
        tree: impl Into<OpTree<O>>,
        start: usize,
        end: usize,
    ) -> ScheduleResult<usize> {
        if start > end || end > self.slots.len() {
            return Err(ScheduleError::InvalidRange {
                start,
                end,
                len: self.slots.len(),
            });
        }

        let mut ops = tree.into().into_operations();
        ops.iter().try_for_each(validate_op)?;

        let mut i = start;
        let mut placed = 0;
        for op in &ops {
            while i < end && !self.can_place_at(i, op) {
                i += 1;
            }
            if i >= end {
                break;
            }
            self.slots[i] = self.slots[i].with_operation(op.clone())?;
            placed += 1;
        }

        if placed == ops.len() {
            return Ok(end);
        }
        debug!("{} operations overflow range [{}, {})", ops.len() - placed, start, end);
        self.insert(end, ops.split_off(placed), InsertStrategy::Earliest)
    }

    /// Insert operations at `start` without moving anything already before
    /// the frontier.
    ///
    /// Each operation lands at the later of `start` and the frontier of its
    /// resources, then pushes those resources' frontier past itself. Empty
    /// slots are spliced in so later operations on the touched resources
    /// stay after the new ones. Resources of the frontier that the
    /// operations do not touch are shifted along with the splice. Returns the
    /// updated frontier.
    pub fn insert_at_frontier(
        &mut self,
        tree: impl Into<OpTree<O>>,
        start: usize,
        frontier: Option<Frontier>,
    ) -> ScheduleResult<Frontier> {
        let mut frontier = frontier.unwrap_or_default();
        let ops = tree.into().into_operations();
        if ops.is_empty() {
            return Ok(frontier);
        }
        ops.iter().try_for_each(validate_op)?;

        let touched: BTreeSet<&Resource> = ops.iter().flat_map(|op| op.resources()).collect();
        for &resource in &touched {
            let at = frontier.get(resource).copied().unwrap_or(0);
            if at > start {
                return Err(ScheduleError::FrontierViolation {
                    resource: resource.clone(),
                    frontier: at,
                    start,
                });
            }
        }
        let touched: Vec<Resource> = touched.into_iter().cloned().collect();
        let next = self.next_slots_operating_on(&touched, start);

        let mut indices = Vec::with_capacity(ops.len());
        for op in &ops {
            let at = op
                .resources()
                .iter()
                .map(|r| frontier.get(r).copied().unwrap_or(0))
                .fold(start, usize::max);
            indices.push(at);
            for resource in op.resources() {
                let entry = frontier.entry(resource.clone()).or_insert(0);
                *entry = (*entry).max(at + 1);
            }
        }

        self.commit("frontier insert", |scratch| {
            scratch.push_frontier(&mut frontier, &next);
            let needed = indices.iter().max().map_or(0, |&last| last + 1);
            while scratch.slots.len() < needed {
                scratch.slots.push(TimeSlot::new());
            }
            for (op, &at) in ops.into_iter().zip(&indices) {
                scratch.slots[at] = scratch.slots[at].with_operation(op)?;
            }
            Ok(())
        })?;
        Ok(frontier)
    }

    /// Splice in enough empty slots that every resource of `late` starts at
    /// or after its `early` value. Returns the number of slots added.
    fn push_frontier(&mut self, early: &mut Frontier, late: &Frontier) -> usize {
        let deficit = late
            .iter()
            .map(|(r, &l)| early.get(r).copied().unwrap_or(0) as isize - l as isize)
            .max()
            .unwrap_or(0);
        let Some(insert_at) = late.values().copied().min() else {
            return 0;
        };
        if deficit <= 0 {
            return 0;
        }

        let n = deficit as usize;
        self.slots
            .splice(insert_at..insert_at, (0..n).map(|_| TimeSlot::new()));
        for (resource, value) in early.iter_mut() {
            if !late.contains_key(resource) && *value > insert_at {
                *value += n;
            }
        }
        debug!("Pushed frontier by {} slots at {}", n, insert_at);
        n
    }

    /// Run `edit` on a copy and keep the result only if it succeeds
    fn commit<T, F>(&mut self, what: &str, edit: F) -> ScheduleResult<T>
    where
        F: FnOnce(&mut Schedule<O>) -> ScheduleResult<T>,
    {
        let mut scratch = self.clone();
        match edit(&mut scratch) {
            Ok(value) => {
                debug!("Committed {} ({} -> {} slots)", what, self.slots.len(), scratch.slots.len());
                self.slots = scratch.slots;
                Ok(value)
            }
            Err(e) => {
                debug!("Rolled back {}: {}", what, e);
                Err(e)
            }
        }
    }

    /// Apply several insertions, adjusting later indices for the slots
    /// earlier ones create.
    ///
    /// Every insertion uses [`InsertStrategy::Earliest`]. Insertions sharing
    /// an index behave like repeated inserts at that index: later ones end
    /// up before earlier ones.
    pub fn batch_insert<I, T>(&mut self, edits: I) -> ScheduleResult<()>
    where
        I: IntoIterator<Item = (usize, T)>,
        T: Into<OpTree<O>>,
    {
        let mut edits: Vec<(usize, OpTree<O>)> =
            edits.into_iter().map(|(i, tree)| (i, tree.into())).collect();
        edits.sort_by_key(|(i, _)| *i);

        self.commit("batch insert", |scratch| {
            let mut shift = 0;
            let mut edits = edits.into_iter().peekable();
            while let Some((index, tree)) = edits.next() {
                let mut group = vec![tree];
                while let Some((_, tree)) = edits.next_if(|(i, _)| *i == index) {
                    group.push(tree);
                }
                group.reverse();

                let at = index + shift;
                let next = scratch.insert(at, OpTree::Seq(group), InsertStrategy::Earliest)?;
                shift += next.saturating_sub(at);
            }
            Ok(())
        })
    }

    /// Remove several operations. Each must be present in its slot.
    pub fn batch_remove<I>(&mut self, edits: I) -> ScheduleResult<()>
    where
        I: IntoIterator<Item = (usize, O)>,
    {
        self.commit("batch remove", |scratch| {
            for (index, op) in edits {
                let slot = scratch.slot_holding(index, &op)?;
                scratch.slots[index] = slot.without_operation(&op);
            }
            Ok(())
        })
    }

    /// Replace several operations in place. Each old operation must be
    /// present in its slot.
    pub fn batch_replace<I>(&mut self, edits: I) -> ScheduleResult<()>
    where
        I: IntoIterator<Item = (usize, O, O)>,
    {
        self.commit("batch replace", |scratch| {
            for (index, old, new) in edits {
                validate_op(&new)?;
                let slot = scratch.slot_holding(index, &old)?;
                scratch.slots[index] = slot.replacing(&old, &new)?;
            }
            Ok(())
        })
    }

    /// Add operations into the free space of existing slots
    pub fn batch_insert_into<I, T>(&mut self, edits: I) -> ScheduleResult<()>
    where
        I: IntoIterator<Item = (usize, T)>,
        T: Into<OpTree<O>>,
    {
        self.commit("batch insert into", |scratch| {
            for (index, tree) in edits {
                let len = scratch.slots.len();
                if index >= len {
                    return Err(ScheduleError::IndexOutOfBounds { index, len });
                }
                for op in tree.into().into_operations() {
                    validate_op(&op)?;
                    let slot = &scratch.slots[index];
                    let merged = slot.with_operation(op.clone())?;
                    if let Some(acceptance) = &scratch.acceptance {
                        if !acceptance.accepts(&op, slot) {
                            return Err(ScheduleError::PlacementRejected { index });
                        }
                    }
                    scratch.slots[index] = merged;
                }
            }
            Ok(())
        })
    }

    fn slot_holding(&self, index: usize, op: &O) -> ScheduleResult<&TimeSlot<O>> {
        let slot = self.slots.get(index).ok_or(ScheduleError::IndexOutOfBounds {
            index,
            len: self.slots.len(),
        })?;
        if !slot.contains(op) {
            return Err(ScheduleError::OperationNotFound { index });
        }
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceptance::Acceptance;
    use crate::instruction::Instruction;
    use cadence_primitives::ClassicalKey;

    fn op(name: &str, resources: &[i64]) -> Instruction {
        Instruction::on_lines(name, resources)
    }

    fn q(i: i64) -> Resource {
        Resource::line(i)
    }

    fn key(name: &str) -> ClassicalKey {
        ClassicalKey::new(name).unwrap()
    }

    fn slot(ops: Vec<Instruction>) -> TimeSlot<Instruction> {
        TimeSlot::from_operations(ops).unwrap()
    }

    /// Sorted operation names per slot
    fn layout(s: &Schedule<Instruction>) -> Vec<Vec<String>> {
        s.slots()
            .iter()
            .map(|slot| {
                let mut names: Vec<String> = slot.iter().map(|o| o.name().to_string()).collect();
                names.sort();
                names
            })
            .collect()
    }

    // ==================== Insert strategies ====================

    #[test]
    fn test_earliest_skips_occupied_slot() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])]), TimeSlot::new()]);
        let next = s.append(op("cz", &[0, 1]), InsertStrategy::Earliest).unwrap();

        assert_eq!(next, 2);
        assert_eq!(s.len(), 2);
        assert!(s[0].operation_at(&q(1)).is_none());
        assert_eq!(s.operation_at(&q(1), 1).map(|o| o.name()), Some("cz"));
    }

    #[test]
    fn test_earliest_moves_back_to_first_free_slot() {
        let mut s = Schedule::new();
        s.append(op("a", &[0]), InsertStrategy::Earliest).unwrap();
        s.append(op("b", &[0]), InsertStrategy::Earliest).unwrap();
        s.append(op("c", &[1]), InsertStrategy::Earliest).unwrap();
        assert_eq!(layout(&s), vec![vec!["a", "c"], vec!["b"]]);
    }

    #[test]
    fn test_new_always_creates_slot() {
        let mut s = Schedule::new();
        let ops = vec![op("a", &[0]), op("b", &[1]), op("c", &[2])];
        let next = s.append(ops, InsertStrategy::New).unwrap();
        assert_eq!(next, 3);
        assert_eq!(layout(&s), vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn test_inline_uses_preceding_slot() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])])]);
        let next = s
            .insert(1, vec![op("b", &[1]), op("c", &[0])], InsertStrategy::Inline)
            .unwrap();
        assert_eq!(layout(&s), vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(next, 2);
    }

    #[test]
    fn test_new_then_inline() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])])]);
        s.append(vec![op("b", &[1]), op("c", &[2])], InsertStrategy::NewThenInline)
            .unwrap();
        assert_eq!(layout(&s), vec![vec!["a"], vec!["b", "c"]]);
    }

    #[test]
    fn test_insert_in_middle_shifts_cursor() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("a", &[0])]),
            slot(vec![op("b", &[0])]),
        ]);
        let next = s.insert(1, op("x", &[0]), InsertStrategy::Earliest).unwrap();
        assert_eq!(next, 2);
        assert_eq!(layout(&s), vec![vec!["a"], vec!["x"], vec!["b"]]);
    }

    #[test]
    fn test_insert_index_is_clamped() {
        let mut s = Schedule::new();
        let next = s.insert(10, op("a", &[0]), InsertStrategy::New).unwrap();
        assert_eq!(next, 1);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_verbatim_slot_is_kept() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])])]);
        let tree: OpTree<Instruction> = vec![
            OpTree::Slot(slot(vec![op("m", &[1])])),
            op("n", &[2]).into(),
        ]
        .into_iter()
        .collect();
        let next = s.insert(0, tree, InsertStrategy::Earliest).unwrap();

        // The slot lands at 0 and `n` slides back into it
        assert_eq!(layout(&s), vec![vec!["m", "n"], vec!["a"]]);
        assert_eq!(next, 1);
    }

    #[test]
    fn test_classical_dependency_blocks_earliest() {
        let measure = op("measure", &[0]).writing(key("m"));
        let conditioned = op("x", &[1]).reading(key("m"));

        let mut s = Schedule::from_slots(vec![slot(vec![measure]), TimeSlot::new()]);
        s.append(conditioned, InsertStrategy::Earliest).unwrap();
        assert_eq!(s.operation_at(&q(1), 1).map(|o| o.name()), Some("x"));
        assert!(s[0].operation_at(&q(1)).is_none());
    }

    #[test]
    fn test_write_after_read_blocks_earliest() {
        let reader = op("x", &[0]).reading(key("m"));
        let writer = op("measure", &[1]).writing(key("m"));

        let mut s = Schedule::from_slots(vec![slot(vec![reader])]);
        s.append(writer, InsertStrategy::Earliest).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.operation_at(&q(1), 1).map(|o| o.name()), Some("measure"));
    }

    #[test]
    fn test_acceptance_veto_forces_new_slot() {
        let one_per_slot: Acceptance<Instruction> = Acceptance::new(|_, slot| slot.is_empty());
        let mut s = Schedule::new().with_acceptance(one_per_slot);
        s.append(op("a", &[0]), InsertStrategy::Earliest).unwrap();
        s.append(op("b", &[1]), InsertStrategy::Earliest).unwrap();
        s.append(op("c", &[2]), InsertStrategy::Inline).unwrap();
        assert_eq!(layout(&s), vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn test_invalid_operation_leaves_schedule() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])])]);
        let before = s.clone();
        let err = s
            .append(vec![op("ok", &[1]), op("bad", &[2, 2])], InsertStrategy::Earliest)
            .unwrap_err();
        assert_eq!(err, ScheduleError::StructuralViolation { resource: q(2) });
        assert_eq!(s, before);
    }

    // ==================== Range insertion ====================

    #[test]
    fn test_insert_into_range_fills_gaps() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("a", &[0])]),
            slot(vec![op("b", &[1])]),
            slot(vec![op("c", &[0])]),
        ]);
        let next = s
            .insert_into_range(vec![op("x", &[1]), op("y", &[0])], 0, 3)
            .unwrap();
        assert_eq!(next, 3);
        assert_eq!(layout(&s), vec![vec!["a", "x"], vec!["b", "y"], vec!["c"]]);
    }

    #[test]
    fn test_insert_into_range_cursor_is_monotone() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("a", &[0])]),
            slot(vec![op("b", &[1])]),
        ]);
        // `x` lands in slot 1; `y` could fit slot 0 but the cursor has moved on
        s.insert_into_range(vec![op("x", &[0]), op("y", &[2])], 0, 2)
            .unwrap();
        assert_eq!(layout(&s), vec![vec!["a"], vec!["b", "x", "y"]]);
    }

    #[test]
    fn test_insert_into_range_overflow() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("a", &[0])]),
            slot(vec![op("b", &[0])]),
        ]);
        let next = s
            .insert_into_range(vec![op("x", &[1]), op("y", &[1])], 0, 1)
            .unwrap();
        assert_eq!(layout(&s), vec![vec!["a", "x"], vec!["b", "y"]]);
        assert_eq!(next, 2);
    }

    #[test]
    fn test_insert_into_range_rejects_bad_bounds() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])]), TimeSlot::new()]);
        let before = s.clone();

        let err = s.insert_into_range(op("x", &[1]), 2, 1).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidRange { start: 2, end: 1, len: 2 });
        assert_eq!(s, before);

        assert!(s.insert_into_range(op("x", &[1]), 0, 3).is_err());
        assert_eq!(s, before);
    }

    // ==================== Frontier insertion ====================

    #[test]
    fn test_insert_at_frontier_pushes_later_ops() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("a", &[0])]),
            slot(vec![op("b", &[1])]),
        ]);
        let frontier = s
            .insert_at_frontier(vec![op("x", &[0]), op("y", &[0, 1])], 1, None)
            .unwrap();

        assert_eq!(
            layout(&s),
            vec![vec!["a"], vec!["x"], vec!["y"], vec!["b"]]
        );
        assert_eq!(frontier, Frontier::from([(q(0), 3), (q(1), 3)]));
    }

    #[test]
    fn test_insert_at_frontier_shifts_untouched_resources() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("a", &[0])]),
            slot(vec![op("b", &[1])]),
        ]);
        let frontier = s
            .insert_at_frontier(
                vec![op("x", &[0]), op("y", &[0, 1])],
                1,
                Some(Frontier::from([(q(2), 2), (q(3), 1)])),
            )
            .unwrap();

        assert_eq!(frontier.get(&q(2)), Some(&4));
        assert_eq!(frontier.get(&q(3)), Some(&1));
    }

    #[test]
    fn test_insert_at_frontier_without_push() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])])]);
        let frontier = s.insert_at_frontier(op("x", &[1]), 0, None).unwrap();
        assert_eq!(layout(&s), vec![vec!["a", "x"]]);
        assert_eq!(frontier, Frontier::from([(q(1), 1)]));
    }

    #[test]
    fn test_insert_at_frontier_violation() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])])]);
        let before = s.clone();
        let err = s
            .insert_at_frontier(op("x", &[0]), 1, Some(Frontier::from([(q(0), 3)])))
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::FrontierViolation {
                resource: q(0),
                frontier: 3,
                start: 1
            }
        );
        assert_eq!(s, before);
    }

    #[test]
    fn test_insert_at_frontier_empty_tree() {
        let mut s: Schedule<Instruction> = Schedule::new();
        let start = Frontier::from([(q(0), 4)]);
        let frontier = s
            .insert_at_frontier(OpTree::empty(), 0, Some(start.clone()))
            .unwrap();
        assert_eq!(frontier, start);
        assert!(s.is_empty());
    }

    // ==================== Batch edits ====================

    #[test]
    fn test_batch_insert_tracks_shift() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("x", &[0])]),
            slot(vec![op("y", &[0])]),
        ]);
        s.batch_insert(vec![
            (2, op("v", &[0])),
            (1, op("z", &[0])),
            (1, op("w", &[1])),
        ])
        .unwrap();
        assert_eq!(
            layout(&s),
            vec![vec!["w", "x"], vec!["z"], vec!["y"], vec!["v"]]
        );
    }

    #[test]
    fn test_batch_insert_same_index_reverses() {
        let mut s: Schedule<Instruction> = Schedule::new();
        s.batch_insert(vec![(0, op("first", &[0])), (0, op("second", &[0]))])
            .unwrap();
        assert_eq!(layout(&s), vec![vec!["second"], vec!["first"]]);
    }

    #[test]
    fn test_batch_remove() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("a", &[0]), op("b", &[1])]),
            slot(vec![op("c", &[0])]),
        ]);
        s.batch_remove(vec![(0, op("b", &[1])), (1, op("c", &[0]))])
            .unwrap();
        assert_eq!(layout(&s), vec![vec!["a".to_string()], Vec::new()]);
    }

    #[test]
    fn test_batch_remove_is_atomic() {
        let mut s = Schedule::from_slots(vec![
            slot(vec![op("a", &[0])]),
            slot(vec![op("c", &[0])]),
        ]);
        let before = s.clone();

        let err = s
            .batch_remove(vec![(0, op("a", &[0])), (1, op("missing", &[0]))])
            .unwrap_err();
        assert_eq!(err, ScheduleError::OperationNotFound { index: 1 });
        assert_eq!(s, before);

        let err = s.batch_remove(vec![(5, op("a", &[0]))]).unwrap_err();
        assert_eq!(err, ScheduleError::IndexOutOfBounds { index: 5, len: 2 });
        assert_eq!(s, before);
    }

    #[test]
    fn test_batch_replace() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0]), op("b", &[1])])]);
        s.batch_replace(vec![(0, op("a", &[0]), op("z", &[0]))])
            .unwrap();
        assert_eq!(layout(&s), vec![vec!["b", "z"]]);

        let before = s.clone();
        let err = s
            .batch_replace(vec![(0, op("z", &[0]), op("wide", &[0, 1]))])
            .unwrap_err();
        assert_eq!(err, ScheduleError::StructuralViolation { resource: q(1) });
        assert_eq!(s, before);
    }

    #[test]
    fn test_batch_insert_into() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])]), TimeSlot::new()]);
        s.batch_insert_into(vec![(0, op("b", &[1])), (1, op("c", &[0]))])
            .unwrap();
        assert_eq!(layout(&s), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_batch_insert_into_failures_are_atomic() {
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])]), TimeSlot::new()]);
        let before = s.clone();

        let err = s
            .batch_insert_into(vec![(1, op("ok", &[0])), (0, op("clash", &[0]))])
            .unwrap_err();
        assert_eq!(err, ScheduleError::StructuralViolation { resource: q(0) });
        assert_eq!(s, before);

        let err = s.batch_insert_into(vec![(2, op("x", &[0]))]).unwrap_err();
        assert_eq!(err, ScheduleError::IndexOutOfBounds { index: 2, len: 2 });
        assert_eq!(s, before);
    }

    #[test]
    fn test_batch_insert_into_respects_acceptance() {
        let one_per_slot: Acceptance<Instruction> = Acceptance::new(|_, slot| slot.is_empty());
        let mut s = Schedule::from_slots(vec![slot(vec![op("a", &[0])]), TimeSlot::new()])
            .with_acceptance(one_per_slot);
        let before = s.clone();

        let err = s
            .batch_insert_into(vec![(1, op("ok", &[0])), (0, op("b", &[1]))])
            .unwrap_err();
        assert_eq!(err, ScheduleError::PlacementRejected { index: 0 });
        assert_eq!(s, before);
    }
}
