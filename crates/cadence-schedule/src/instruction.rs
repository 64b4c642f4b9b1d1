//! A concrete, named operation

use crate::frozen::FrozenSchedule;
use crate::operation::{Operation, RemapResources};
use crate::time_slot::TimeSlot;
use crate::view::ScheduleView;
use cadence_primitives::{ClassicalKey, Resource};
use std::collections::BTreeSet;
use std::fmt;

/// A named operation on a list of resources, optionally reading and writing
/// classical keys or wrapping a sub-schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    name: String,
    resources: Vec<Resource>,
    reads: BTreeSet<ClassicalKey>,
    writes: BTreeSet<ClassicalKey>,
    nested: Option<FrozenSchedule<Instruction>>,
}

impl Instruction {
    /// Create an instruction acting on `resources`
    pub fn new(name: impl Into<String>, resources: Vec<Resource>) -> Self {
        Self {
            name: name.into(),
            resources,
            reads: BTreeSet::new(),
            writes: BTreeSet::new(),
            nested: None,
        }
    }

    /// Create an instruction on line resources
    pub fn on_lines(name: impl Into<String>, lines: &[i64]) -> Self {
        Self::new(name, lines.iter().copied().map(Resource::line).collect())
    }

    /// Wrap a sub-schedule. The instruction acts on every resource and key
    /// the sub-schedule does.
    pub fn nested(name: impl Into<String>, schedule: FrozenSchedule<Instruction>) -> Self {
        let resources = schedule.all_resources().into_iter().collect();
        let mut reads = BTreeSet::new();
        let mut writes = BTreeSet::new();
        for slot in schedule.slots() {
            reads.extend(slot.classical_reads());
            writes.extend(slot.classical_writes());
        }
        Self {
            name: name.into(),
            resources,
            reads,
            writes,
            nested: Some(schedule),
        }
    }

    /// Add a classical key this instruction reads
    pub fn reading(mut self, key: ClassicalKey) -> Self {
        self.reads.insert(key);
        self
    }

    /// Add a classical key this instruction writes
    pub fn writing(mut self, key: ClassicalKey) -> Self {
        self.writes.insert(key);
        self
    }

    /// Instruction name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Operation for Instruction {
    fn resources(&self) -> &[Resource] {
        &self.resources
    }

    fn classical_reads(&self) -> BTreeSet<ClassicalKey> {
        self.reads.clone()
    }

    fn classical_writes(&self) -> BTreeSet<ClassicalKey> {
        self.writes.clone()
    }

    fn as_nested_schedule(&self) -> Option<&FrozenSchedule<Self>> {
        self.nested.as_ref()
    }
}

impl RemapResources for Instruction {
    fn remap_resources(&self, f: &mut dyn FnMut(&Resource) -> Resource) -> Self {
        let mut remapped = self.clone();
        remapped.resources = self.resources.iter().map(&mut *f).collect();

        if let Some(inner) = &self.nested {
            let slots: Result<Vec<_>, _> = inner
                .slots()
                .iter()
                .map(|slot| TimeSlot::from_operations(slot.iter().map(|op| op.remap_resources(f))))
                .collect();
            // On failure the outer list already holds a duplicate, which
            // any slot will reject.
            if let Ok(slots) = slots {
                remapped.nested = Some(FrozenSchedule::new(slots));
            }
        }
        remapped
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, resource) in self.resources.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", resource)?;
        }
        f.write_str(")")
    }
}
