//! Placement acceptance predicates

use crate::time_slot::TimeSlot;
use std::fmt;
use std::sync::Arc;

type Predicate<O> = dyn Fn(&O, &TimeSlot<O>) -> bool + Send + Sync;

/// An external veto on placing an operation into a candidate slot.
///
/// Consulted on top of the resource disjointness check, never instead of
/// it. Two acceptances are equal only if they share the same predicate
/// instance.
pub struct Acceptance<O> {
    predicate: Arc<Predicate<O>>,
}

impl<O> Acceptance<O> {
    /// Wrap a predicate
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&O, &TimeSlot<O>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Ask whether `op` may join `slot`
    pub fn accepts(&self, op: &O, slot: &TimeSlot<O>) -> bool {
        (self.predicate)(op, slot)
    }
}

impl<O> Clone for Acceptance<O> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<O> PartialEq for Acceptance<O> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl<O> fmt::Debug for Acceptance<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Acceptance({:p})", Arc::as_ptr(&self.predicate) as *const ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn test_accepts() {
        // At most one operation per slot
        let single: Acceptance<Instruction> = Acceptance::new(|_, slot| slot.is_empty());
        let op = Instruction::on_lines("x", &[0]);

        assert!(single.accepts(&op, &TimeSlot::new()));
        let full = TimeSlot::from_operations(vec![Instruction::on_lines("y", &[1])]).unwrap();
        assert!(!single.accepts(&op, &full));
    }

    #[test]
    fn test_equality_is_identity() {
        let a: Acceptance<Instruction> = Acceptance::new(|_, _| true);
        let b: Acceptance<Instruction> = Acceptance::new(|_, _| true);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
