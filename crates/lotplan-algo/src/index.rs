//! Source/destination pair indexing for the disaggregate formulations.
//!
//! Pairwise models index production and stock by `(source, destination)`:
//! goods made in the source slot to serve demand due in the destination
//! slot. Production cannot serve demand that is already past, so only pairs
//! with `source <= destination` carry meaning.

use lotplan_core::{Horizon, Slot};

/// Whether production in `source` may serve demand due in `destination`.
#[inline]
pub fn is_admissible(source: Slot, destination: Slot) -> bool {
    source <= destination
}

/// Every source/destination pair of the horizon, source-major.
pub fn all_pairs(horizon: Horizon) -> impl Iterator<Item = (Slot, Slot)> {
    horizon
        .slots()
        .flat_map(move |source| horizon.slots().map(move |destination| (source, destination)))
}

/// The admissible pairs only, in the same source-major order.
///
/// A horizon of n slots has n * (n + 1) / 2 admissible pairs.
pub fn admissible_pairs(horizon: Horizon) -> impl Iterator<Item = (Slot, Slot)> {
    all_pairs(horizon).filter(|(source, destination)| is_admissible(*source, *destination))
}
