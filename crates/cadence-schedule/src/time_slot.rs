//! Time slots: sets of operations with pairwise disjoint resources

use crate::error::{ScheduleError, ScheduleResult};
use crate::footprint::KeyFootprint;
use crate::operation::Operation;
use cadence_primitives::{ClassicalKey, Resource};
use std::collections::{BTreeSet, HashMap};

/// An immutable set of operations that happen at the same time.
///
/// No two operations in a slot share a resource. Iteration yields the
/// operations in insertion order; equality ignores that order.
#[derive(Clone, Debug)]
pub struct TimeSlot<O> {
    operations: Vec<O>,
    /// Resource -> position in `operations`
    by_resource: HashMap<Resource, usize>,
}

impl<O> Default for TimeSlot<O> {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
            by_resource: HashMap::new(),
        }
    }
}

impl<O: Operation> TimeSlot<O> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a slot from operations, rejecting any shared resource
    pub fn from_operations<I>(ops: I) -> ScheduleResult<Self>
    where
        I: IntoIterator<Item = O>,
    {
        let mut slot = Self::new();
        for op in ops {
            slot.push(op)?;
        }
        Ok(slot)
    }

    fn push(&mut self, op: O) -> ScheduleResult<()> {
        let position = self.operations.len();
        for resource in op.resources() {
            if self.by_resource.contains_key(resource) {
                return Err(ScheduleError::StructuralViolation {
                    resource: resource.clone(),
                });
            }
            self.by_resource.insert(resource.clone(), position);
        }
        self.operations.push(op);
        Ok(())
    }

    /// Return a copy with one more operation
    pub fn with_operation(&self, op: O) -> ScheduleResult<Self> {
        let mut slot = self.clone();
        slot.push(op)?;
        Ok(slot)
    }

    /// Return a copy with several more operations
    pub fn with_operations<I>(&self, ops: I) -> ScheduleResult<Self>
    where
        I: IntoIterator<Item = O>,
    {
        let mut slot = self.clone();
        for op in ops {
            slot.push(op)?;
        }
        Ok(slot)
    }

    /// Union of two slots; fails if they share any resource
    pub fn disjoint_union(&self, other: &TimeSlot<O>) -> ScheduleResult<Self> {
        if let Some(resource) = other
            .by_resource
            .keys()
            .filter(|r| self.by_resource.contains_key(*r))
            .min()
        {
            return Err(ScheduleError::StructuralViolation {
                resource: resource.clone(),
            });
        }
        self.with_operations(other.operations.iter().cloned())
    }

    /// The operation acting on `resource`, if any
    pub fn operation_at(&self, resource: &Resource) -> Option<&O> {
        self.by_resource
            .get(resource)
            .map(|&position| &self.operations[position])
    }

    /// Position of the operation acting on `resource`
    pub(crate) fn position_of(&self, resource: &Resource) -> Option<usize> {
        self.by_resource.get(resource).copied()
    }

    /// Check if some operation acts on `resource`
    pub fn operates_on(&self, resource: &Resource) -> bool {
        self.by_resource.contains_key(resource)
    }

    /// Check if some operation acts on any of `resources`
    pub fn touches<'a, I>(&self, resources: I) -> bool
    where
        I: IntoIterator<Item = &'a Resource>,
    {
        resources
            .into_iter()
            .any(|r| self.by_resource.contains_key(r))
    }

    fn op_touches(op: &O, resources: &BTreeSet<&Resource>) -> bool {
        op.resources().iter().any(|r| resources.contains(r))
    }

    fn filtered(&self, mut keep: impl FnMut(&O) -> bool) -> Self {
        let mut slot = Self::new();
        for op in self.operations.iter().filter(|op| keep(op)) {
            let position = slot.operations.len();
            for resource in op.resources() {
                slot.by_resource.insert(resource.clone(), position);
            }
            slot.operations.push(op.clone());
        }
        slot
    }

    /// Drop every operation overlapping `resources`
    pub fn without_touching<'a, I>(&self, resources: I) -> Self
    where
        I: IntoIterator<Item = &'a Resource>,
    {
        let resources: BTreeSet<&Resource> = resources.into_iter().collect();
        self.filtered(|op| !Self::op_touches(op, &resources))
    }

    /// Keep only the operations overlapping `resources`
    pub fn project<'a, I>(&self, resources: I) -> Self
    where
        I: IntoIterator<Item = &'a Resource>,
    {
        let resources: BTreeSet<&Resource> = resources.into_iter().collect();
        self.filtered(|op| Self::op_touches(op, &resources))
    }

    /// Drop every operation equal to `op`
    pub fn without_operation(&self, op: &O) -> Self {
        self.filtered(|existing| existing != op)
    }

    /// Swap `old` for `new` in place, re-validating disjointness
    ///
    /// A slot not containing `old` comes back unchanged.
    pub fn replacing(&self, old: &O, new: &O) -> ScheduleResult<Self> {
        Self::from_operations(self.operations.iter().map(|existing| {
            if existing == old {
                new.clone()
            } else {
                existing.clone()
            }
        }))
    }

    /// Check if the slot holds `op`
    pub fn contains(&self, op: &O) -> bool {
        match op.resources().first() {
            Some(resource) => self.operation_at(resource) == Some(op),
            None => self.operations.contains(op),
        }
    }

    /// Operations in insertion order
    pub fn operations(&self) -> &[O] {
        &self.operations
    }

    /// Iterate over operations in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, O> {
        self.operations.iter()
    }

    /// Consume the slot, returning its operations
    pub fn into_operations(self) -> Vec<O> {
        self.operations
    }

    /// Resources used by the slot, in no particular order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.by_resource.keys()
    }

    /// Union of the operations' classical reads
    pub fn classical_reads(&self) -> BTreeSet<ClassicalKey> {
        self.operations
            .iter()
            .flat_map(|op| op.classical_reads())
            .collect()
    }

    /// Union of the operations' classical writes
    pub fn classical_writes(&self) -> BTreeSet<ClassicalKey> {
        self.operations
            .iter()
            .flat_map(|op| op.classical_writes())
            .collect()
    }

    /// Combined classical footprint
    pub fn footprint(&self) -> KeyFootprint {
        let mut footprint = KeyFootprint::new();
        for op in &self.operations {
            footprint.merge(&op.footprint());
        }
        footprint
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the slot holds no operations
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<O: Operation> PartialEq for TimeSlot<O> {
    fn eq(&self, other: &Self) -> bool {
        self.operations.len() == other.operations.len()
            && self.operations.iter().all(|op| other.contains(op))
    }
}

impl<'a, O> IntoIterator for &'a TimeSlot<O> {
    type Item = &'a O;
    type IntoIter = std::slice::Iter<'a, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl<O: Operation> TryFrom<crate::operation::OpTree<O>> for TimeSlot<O> {
    type Error = ScheduleError;

    fn try_from(tree: crate::operation::OpTree<O>) -> Result<Self, Self::Error> {
        match tree {
            crate::operation::OpTree::Slot(slot) => Ok(slot),
            other => Err(ScheduleError::TypeMismatch(other.kind())),
        }
    }
}
