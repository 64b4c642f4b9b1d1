//! Workload files: JSON lists of operations and verbatim slots

use crate::CliError;
use cadence_primitives::{ClassicalKey, Resource};
use cadence_schedule::{InsertStrategy, Instruction, OpTree, Schedule, TimeSlot};
use serde::Deserialize;
use std::path::Path;

/// One operation in a workload file
#[derive(Debug, Clone, Deserialize)]
pub struct OpSpec {
    /// Operation name
    pub name: String,
    /// Resources the operation acts on; ignored when `body` is set
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Classical keys read
    #[serde(default)]
    pub reads: Vec<ClassicalKey>,
    /// Classical keys written
    #[serde(default)]
    pub writes: Vec<ClassicalKey>,
    /// Sub-workload wrapped as a single operation
    #[serde(default)]
    pub body: Option<Vec<WorkloadItem>>,
}

/// A top-level workload entry
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WorkloadItem {
    /// Operations kept together in one slot
    Slot {
        /// The slot's operations
        slot: Vec<OpSpec>,
    },
    /// A bare operation
    Op(OpSpec),
}

impl OpSpec {
    fn to_instruction(&self, strategy: InsertStrategy) -> Result<Instruction, CliError> {
        let base = match &self.body {
            Some(items) => {
                let inner = build_schedule(items, strategy)?;
                Instruction::nested(self.name.clone(), inner.freeze())
            }
            None => {
                if self.resources.is_empty() {
                    return Err(CliError::Workload(format!(
                        "operation '{}' has no resources",
                        self.name
                    )));
                }
                Instruction::new(self.name.clone(), self.resources.clone())
            }
        };

        let with_reads = self.reads.iter().cloned().fold(base, Instruction::reading);
        Ok(self.writes.iter().cloned().fold(with_reads, Instruction::writing))
    }
}

/// Convert workload items into an insertion tree. Nested bodies are built
/// with `strategy`.
pub fn to_tree(items: &[WorkloadItem], strategy: InsertStrategy) -> Result<OpTree<Instruction>, CliError> {
    items
        .iter()
        .map(|item| match item {
            WorkloadItem::Op(spec) => spec.to_instruction(strategy).map(OpTree::Op),
            WorkloadItem::Slot { slot } => {
                let ops = slot
                    .iter()
                    .map(|spec| spec.to_instruction(strategy))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(OpTree::Slot(TimeSlot::from_operations(ops)?))
            }
        })
        .collect()
}

/// Build a schedule by appending every item with `strategy`
pub fn build_schedule(
    items: &[WorkloadItem],
    strategy: InsertStrategy,
) -> Result<Schedule<Instruction>, CliError> {
    let tree = to_tree(items, strategy)?;
    Ok(Schedule::from_operations(tree, strategy)?)
}

/// Parse workload JSON
pub fn parse(content: &str) -> Result<Vec<WorkloadItem>, CliError> {
    let items: Vec<WorkloadItem> = serde_json::from_str(content)?;
    tracing::debug!("Parsed workload with {} items", items.len());
    Ok(items)
}

/// Read and parse a workload file
pub fn load(path: &Path) -> Result<Vec<WorkloadItem>, CliError> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
