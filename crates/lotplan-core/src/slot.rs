//! Time slots and planning horizons.
//!
//! Production plans are indexed by [`Slot`], a 1-based position in the
//! planning horizon. [`Horizon`] owns the slot range and answers the
//! positional queries the formulations need (first slot, predecessor,
//! iteration order).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based time slot within a planning horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(usize);

impl Slot {
    #[inline]
    pub fn new(value: usize) -> Self {
        Slot(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }

    /// The slot immediately before this one, if any.
    #[inline]
    pub fn pred(&self) -> Option<Slot> {
        if self.0 > 1 {
            Some(Slot(self.0 - 1))
        } else {
            None
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number of consecutive slots in a planning problem.
///
/// Slots run from `1` to `len()` inclusive. An instance with horizon 10
/// plans slots 1 through 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Horizon(usize);

impl Horizon {
    #[inline]
    pub fn new(len: usize) -> Self {
        Horizon(len)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The first slot of the horizon.
    #[inline]
    pub fn first(&self) -> Slot {
        Slot(1)
    }

    /// The last slot of the horizon.
    #[inline]
    pub fn last(&self) -> Slot {
        Slot(self.0)
    }

    /// Whether `slot` is the first slot, i.e. the one seeded with initial stock.
    #[inline]
    pub fn is_first(&self, slot: Slot) -> bool {
        slot.0 == 1
    }

    #[inline]
    pub fn contains(&self, slot: Slot) -> bool {
        slot.0 >= 1 && slot.0 <= self.0
    }

    /// Zero-based offset of `slot` for indexing per-slot series.
    #[inline]
    pub fn index_of(&self, slot: Slot) -> usize {
        slot.0 - 1
    }

    /// All slots in ascending order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        (1..=self.0).map(Slot)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_pred() {
        assert_eq!(Slot::new(3).pred(), Some(Slot::new(2)));
        assert_eq!(Slot::new(1).pred(), None);
    }

    #[test]
    fn test_horizon_bounds() {
        let h = Horizon::new(5);
        assert_eq!(h.first(), Slot::new(1));
        assert_eq!(h.last(), Slot::new(5));
        assert!(h.is_first(Slot::new(1)));
        assert!(!h.is_first(Slot::new(2)));
    }

    #[test]
    fn test_horizon_contains() {
        let h = Horizon::new(3);
        assert!(h.contains(Slot::new(1)));
        assert!(h.contains(Slot::new(3)));
        assert!(!h.contains(Slot::new(0)));
        assert!(!h.contains(Slot::new(4)));
    }

    #[test]
    fn test_slots_iteration() {
        let h = Horizon::new(4);
        let collected: Vec<usize> = h.slots().map(|s| s.value()).collect();
        assert_eq!(collected, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_index_of() {
        let h = Horizon::new(10);
        assert_eq!(h.index_of(Slot::new(1)), 0);
        assert_eq!(h.index_of(Slot::new(10)), 9);
    }
}
