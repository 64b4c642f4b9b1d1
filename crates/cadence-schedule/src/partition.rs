//! Independent resource partitioning
//!
//! Resources connected by a multi-resource operation anywhere in the
//! schedule end up in the same partition.

use crate::operation::Operation;
use crate::time_slot::TimeSlot;
use cadence_primitives::Resource;
use std::collections::{BTreeMap, BTreeSet};

/// Disjoint-set forest over resource indices
#[derive(Debug, Default)]
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn with_len(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Path halving
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return;
        }
        match self.rank[a].cmp(&self.rank[b]) {
            std::cmp::Ordering::Less => self.parent[a] = b,
            std::cmp::Ordering::Greater => self.parent[b] = a,
            std::cmp::Ordering::Equal => {
                self.parent[b] = a;
                self.rank[a] += 1;
            }
        }
    }
}

pub(crate) fn independent_resource_sets<O: Operation>(
    slots: &[TimeSlot<O>],
) -> Vec<BTreeSet<Resource>> {
    let resources: BTreeSet<&Resource> = slots.iter().flat_map(|s| s.resources()).collect();
    let index: BTreeMap<&Resource, usize> = resources
        .iter()
        .enumerate()
        .map(|(i, &r)| (r, i))
        .collect();

    let mut forest = UnionFind::with_len(index.len());
    for op in slots.iter().flat_map(|s| s.iter()) {
        let mut ids = op.resources().iter().filter_map(|r| index.get(r).copied());
        if let Some(first) = ids.next() {
            for other in ids {
                forest.union(first, other);
            }
        }
    }

    // Indices follow resource order, so the first member seen for each root
    // is that partition's minimum.
    let mut partitions: Vec<BTreeSet<Resource>> = Vec::new();
    let mut slot_of_root: BTreeMap<usize, usize> = BTreeMap::new();
    for (i, resource) in resources.into_iter().enumerate() {
        let root = forest.find(i);
        let at = *slot_of_root.entry(root).or_insert_with(|| {
            partitions.push(BTreeSet::new());
            partitions.len() - 1
        });
        partitions[at].insert(resource.clone());
    }
    partitions
}

/// Slots projected onto each partition, or `None` when the schedule does not
/// split.
pub(crate) fn factor_slots<O: Operation>(slots: &[TimeSlot<O>]) -> Option<Vec<Vec<TimeSlot<O>>>> {
    let partitions = independent_resource_sets(slots);
    if partitions.len() == 1 {
        return None;
    }
    tracing::debug!("Factorizing {} slots into {} partitions", slots.len(), partitions.len());

    Some(
        partitions
            .iter()
            .map(|partition| slots.iter().map(|slot| slot.project(partition)).collect())
            .collect(),
    )
}
