//! Classical read/write footprint tracking
//!
//! Resource contention is not the only thing that orders operations: an
//! operation reading a classical key must stay after the operation that
//! writes it.

use cadence_primitives::ClassicalKey;
use std::collections::BTreeSet;

/// Classical read/write set of an operation or a whole time slot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyFootprint {
    /// Keys that are read (control keys)
    pub reads: BTreeSet<ClassicalKey>,
    /// Keys that are written (measurement keys)
    pub writes: BTreeSet<ClassicalKey>,
}

impl KeyFootprint {
    /// Create a new empty footprint
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a footprint from read and write sets
    pub fn from_sets(reads: BTreeSet<ClassicalKey>, writes: BTreeSet<ClassicalKey>) -> Self {
        Self { reads, writes }
    }

    /// Record a read access
    pub fn record_read(&mut self, key: ClassicalKey) {
        self.reads.insert(key);
    }

    /// Record a write access
    pub fn record_write(&mut self, key: ClassicalKey) {
        self.writes.insert(key);
    }

    /// Check for read-after-write dependency
    ///
    /// Returns true if `self` reads a key that `other` writes.
    pub fn has_raw_dependency(&self, other: &KeyFootprint) -> bool {
        self.reads.iter().any(|key| other.writes.contains(key))
    }

    /// Check for write-after-read conflict
    ///
    /// Returns true if `self` writes a key that `other` reads.
    pub fn has_war_conflict(&self, other: &KeyFootprint) -> bool {
        self.writes.iter().any(|key| other.reads.contains(key))
    }

    /// Check whether `self` must stay on the same side of `other`
    ///
    /// True when either footprint reads what the other writes. Write-write
    /// overlap alone does not order operations.
    pub fn is_ordered_against(&self, other: &KeyFootprint) -> bool {
        self.has_raw_dependency(other) || self.has_war_conflict(other)
    }

    /// Check if the footprint is empty
    pub fn is_empty(&self) -> bool {
        self.reads.is_empty() && self.writes.is_empty()
    }

    /// Merge another footprint into this one
    pub fn merge(&mut self, other: &KeyFootprint) {
        self.reads.extend(other.reads.iter().cloned());
        self.writes.extend(other.writes.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> ClassicalKey {
        ClassicalKey::new(name).unwrap()
    }

    #[test]
    fn test_footprint_basic() {
        let mut fp = KeyFootprint::new();
        assert!(fp.is_empty());

        fp.record_read(key("a"));
        fp.record_write(key("b"));

        assert!(fp.reads.contains(&key("a")));
        assert!(fp.writes.contains(&key("b")));
        assert!(!fp.is_empty());
    }

    #[test]
    fn test_raw_dependency() {
        let mut measure = KeyFootprint::new();
        measure.record_write(key("m"));

        let mut control = KeyFootprint::new();
        control.record_read(key("m"));

        assert!(control.has_raw_dependency(&measure));
        assert!(!measure.has_raw_dependency(&control));
        assert!(control.is_ordered_against(&measure));
    }

    #[test]
    fn test_war_conflict() {
        let mut measure = KeyFootprint::new();
        measure.record_write(key("m"));

        let mut control = KeyFootprint::new();
        control.record_read(key("m"));

        assert!(measure.has_war_conflict(&control));
        assert!(measure.is_ordered_against(&control));
    }

    #[test]
    fn test_write_write_is_unordered() {
        let mut a = KeyFootprint::new();
        a.record_write(key("m"));
        let b = a.clone();

        assert!(!a.is_ordered_against(&b));
    }

    #[test]
    fn test_disjoint_keys() {
        let mut a = KeyFootprint::new();
        a.record_write(key("m0"));
        let mut b = KeyFootprint::new();
        b.record_read(key("m1"));

        assert!(!a.is_ordered_against(&b));
        assert!(!b.is_ordered_against(&a));
    }

    #[test]
    fn test_merge() {
        let mut a = KeyFootprint::new();
        a.record_read(key("x"));
        let mut b = KeyFootprint::new();
        b.record_write(key("y"));

        a.merge(&b);
        assert_eq!(a.reads.len(), 1);
        assert_eq!(a.writes.len(), 1);
    }
}
