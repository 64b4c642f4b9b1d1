//! Operation capability interface and insertion trees

use crate::footprint::KeyFootprint;
use crate::frozen::FrozenSchedule;
use crate::time_slot::TimeSlot;
use cadence_primitives::{ClassicalKey, Resource};
use std::collections::BTreeSet;
use std::fmt;

/// An atomic action bound to a fixed, non-empty set of resources.
///
/// The engine never looks past this footprint: what an operation *does* is
/// up to the implementor.
pub trait Operation: Clone + PartialEq + fmt::Debug {
    /// Resources the operation acts on, in order. Must be non-empty and free
    /// of duplicates.
    fn resources(&self) -> &[Resource];

    /// Classical keys the operation reads
    fn classical_reads(&self) -> BTreeSet<ClassicalKey> {
        BTreeSet::new()
    }

    /// Classical keys the operation writes
    fn classical_writes(&self) -> BTreeSet<ClassicalKey> {
        BTreeSet::new()
    }

    /// The sub-schedule this operation wraps, if any
    fn as_nested_schedule(&self) -> Option<&FrozenSchedule<Self>> {
        None
    }

    /// Check if the operation acts on a resource
    fn acts_on(&self, resource: &Resource) -> bool {
        self.resources().contains(resource)
    }

    /// Classical footprint of the operation
    fn footprint(&self) -> KeyFootprint {
        KeyFootprint::from_sets(self.classical_reads(), self.classical_writes())
    }
}

/// Operations whose resources can be renamed
pub trait RemapResources: Operation {
    /// Return a copy acting on `f(r)` for every resource `r`
    fn remap_resources(&self, f: &mut dyn FnMut(&Resource) -> Resource) -> Self;
}

/// Input to insertion: operations, verbatim time slots, or sequences of both
#[derive(Clone, Debug)]
pub enum OpTree<O> {
    /// A bare operation, placed according to the insert strategy
    Op(O),
    /// A time slot, inserted as-is
    Slot(TimeSlot<O>),
    /// A sequence of subtrees, flattened depth-first
    Seq(Vec<OpTree<O>>),
}

impl<O: Operation> PartialEq for OpTree<O> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OpTree::Op(a), OpTree::Op(b)) => a == b,
            (OpTree::Slot(a), OpTree::Slot(b)) => a == b,
            (OpTree::Seq(a), OpTree::Seq(b)) => a == b,
            _ => false,
        }
    }
}

/// A flattened insertion element
#[derive(Clone, Debug)]
pub(crate) enum Placeable<O> {
    Op(O),
    Slot(TimeSlot<O>),
}

impl<O: Operation> OpTree<O> {
    /// An empty tree
    pub fn empty() -> Self {
        OpTree::Seq(Vec::new())
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            OpTree::Op(_) => "operation",
            OpTree::Slot(_) => "time slot",
            OpTree::Seq(_) => "sequence",
        }
    }

    /// Flatten to operations and time slots, preserving order
    pub(crate) fn flatten(self) -> Vec<Placeable<O>> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Placeable<O>>) {
        match self {
            OpTree::Op(op) => out.push(Placeable::Op(op)),
            OpTree::Slot(slot) => out.push(Placeable::Slot(slot)),
            OpTree::Seq(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// Flatten to bare operations; time slots contribute their operations
    pub fn into_operations(self) -> Vec<O> {
        self.flatten()
            .into_iter()
            .flat_map(|item| match item {
                Placeable::Op(op) => vec![op],
                Placeable::Slot(slot) => slot.into_operations(),
            })
            .collect()
    }
}

impl<O: Operation> From<O> for OpTree<O> {
    fn from(op: O) -> Self {
        OpTree::Op(op)
    }
}

impl<O: Operation> From<TimeSlot<O>> for OpTree<O> {
    fn from(slot: TimeSlot<O>) -> Self {
        OpTree::Slot(slot)
    }
}

impl<O: Operation> From<Vec<O>> for OpTree<O> {
    fn from(ops: Vec<O>) -> Self {
        OpTree::Seq(ops.into_iter().map(OpTree::Op).collect())
    }
}

impl<O: Operation> FromIterator<OpTree<O>> for OpTree<O> {
    fn from_iter<I: IntoIterator<Item = OpTree<O>>>(iter: I) -> Self {
        OpTree::Seq(iter.into_iter().collect())
    }
}
