//! Parameter sources for planning instances.
//!
//! A [`ParameterSource`] supplies cost and demand figures one field at a
//! time. Instance assembly consults the source once per slot per field, so
//! stateful sources (random generators) advance on every call and two
//! consecutive drains yield different instances.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::slot::Slot;

/// Supplies the parameters of one planning instance, field by field.
pub trait ParameterSource {
    /// The horizon to use for the next instance.
    fn next_horizon(&mut self) -> usize;
    /// Unit production cost for `slot`.
    fn production_cost(&mut self, slot: Slot) -> f64;
    /// Fixed cost charged when `slot` runs a setup.
    fn setup_cost(&mut self, slot: Slot) -> f64;
    /// Unit holding cost charged on stock carried out of `slot`.
    fn holding_cost(&mut self, slot: Slot) -> f64;
    /// Demand due in `slot`.
    fn demand(&mut self, slot: Slot) -> f64;
    /// Stock on hand before the first slot.
    fn initial_stock(&mut self) -> f64;
}

/// Horizon lengths handed out by [`UniformSource::next_horizon`], in order.
pub const HORIZON_LADDER: [usize; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Draws every parameter from a fixed uniform range.
///
/// Ranges: production cost 1..=5, setup cost 10..=20, holding cost 1..=5,
/// demand 100..=400, initial stock 0..=100. Horizons walk [`HORIZON_LADDER`]
/// and wrap around at the end.
#[derive(Debug)]
pub struct UniformSource {
    rng: StdRng,
    next_rung: usize,
}

impl UniformSource {
    /// A source with a fixed seed. Same seed, same instance stream.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_rung: 0,
        }
    }

    /// A source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            next_rung: 0,
        }
    }
}

impl ParameterSource for UniformSource {
    fn next_horizon(&mut self) -> usize {
        let rung = HORIZON_LADDER[self.next_rung % HORIZON_LADDER.len()];
        self.next_rung += 1;
        rung
    }

    fn production_cost(&mut self, _slot: Slot) -> f64 {
        self.rng.gen_range(1.0..=5.0)
    }

    fn setup_cost(&mut self, _slot: Slot) -> f64 {
        self.rng.gen_range(10.0..=20.0)
    }

    fn holding_cost(&mut self, _slot: Slot) -> f64 {
        self.rng.gen_range(1.0..=5.0)
    }

    fn demand(&mut self, _slot: Slot) -> f64 {
        self.rng.gen_range(100.0..=400.0)
    }

    fn initial_stock(&mut self) -> f64 {
        self.rng.gen_range(0.0..=100.0)
    }
}

/// Returns the same value for every slot.
///
/// Useful for tests and worked examples where a hand-checkable objective
/// matters more than variety.
#[derive(Debug, Clone)]
pub struct FixedSource {
    pub horizon: usize,
    pub production_cost: f64,
    pub setup_cost: f64,
    pub holding_cost: f64,
    pub demand: f64,
    pub initial_stock: f64,
}

impl Default for FixedSource {
    fn default() -> Self {
        Self {
            horizon: 10,
            production_cost: 1.0,
            setup_cost: 2.0,
            holding_cost: 0.5,
            demand: 200.0,
            initial_stock: 50.0,
        }
    }
}

impl ParameterSource for FixedSource {
    fn next_horizon(&mut self) -> usize {
        self.horizon
    }

    fn production_cost(&mut self, _slot: Slot) -> f64 {
        self.production_cost
    }

    fn setup_cost(&mut self, _slot: Slot) -> f64 {
        self.setup_cost
    }

    fn holding_cost(&mut self, _slot: Slot) -> f64 {
        self.holding_cost
    }

    fn demand(&mut self, _slot: Slot) -> f64 {
        self.demand
    }

    fn initial_stock(&mut self) -> f64 {
        self.initial_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_source_defaults() {
        let mut src = FixedSource::default();
        assert_eq!(src.next_horizon(), 10);
        assert_eq!(src.production_cost(Slot::new(1)), 1.0);
        assert_eq!(src.setup_cost(Slot::new(4)), 2.0);
        assert_eq!(src.holding_cost(Slot::new(7)), 0.5);
        assert_eq!(src.demand(Slot::new(2)), 200.0);
        assert_eq!(src.initial_stock(), 50.0);
    }

    #[test]
    fn test_uniform_draws_stay_in_range() {
        let mut src = UniformSource::new(7);
        for t in 1..=100 {
            let slot = Slot::new(t);
            let pc = src.production_cost(slot);
            assert!((1.0..=5.0).contains(&pc));
            let sc = src.setup_cost(slot);
            assert!((10.0..=20.0).contains(&sc));
            let hc = src.holding_cost(slot);
            assert!((1.0..=5.0).contains(&hc));
            let d = src.demand(slot);
            assert!((100.0..=400.0).contains(&d));
        }
        let s0 = src.initial_stock();
        assert!((0.0..=100.0).contains(&s0));
    }

    #[test]
    fn test_horizon_ladder_wraps() {
        let mut src = UniformSource::new(0);
        let first_pass: Vec<usize> = (0..10).map(|_| src.next_horizon()).collect();
        assert_eq!(first_pass, HORIZON_LADDER.to_vec());
        assert_eq!(src.next_horizon(), 10);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = UniformSource::new(42);
        let mut b = UniformSource::new(42);
        for t in 1..=20 {
            let slot = Slot::new(t);
            assert_eq!(a.demand(slot), b.demand(slot));
            assert_eq!(a.production_cost(slot), b.production_cost(slot));
        }
    }
}
