//! Planning instance data.
//!
//! A [`ProblemInstance`] holds the validated inputs of one lot-sizing
//! problem: per-slot costs and demands plus the stock on hand before the
//! first slot. Construction validates everything once, so formulations and
//! checkers can assume well-formed data and index by [`Slot`] without
//! further guards.

use serde::{Deserialize, Serialize};

use crate::error::{LotError, LotResult};
use crate::params::ParameterSource;
use crate::slot::{Horizon, Slot};

/// Raw instance fields as they appear in JSON files.
///
/// Series shorter than the horizon are padded with zeros during
/// conversion; series longer than the horizon are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceData {
    pub horizon: usize,
    #[serde(default)]
    pub production_cost: Vec<f64>,
    #[serde(default)]
    pub setup_cost: Vec<f64>,
    #[serde(default)]
    pub holding_cost: Vec<f64>,
    #[serde(default)]
    pub demand: Vec<f64>,
    #[serde(default)]
    pub initial_stock: f64,
}

/// A validated lot-sizing instance.
///
/// All series cover exactly the horizon, every value is finite and
/// non-negative, and the horizon has at least one slot. Accessors take
/// slots drawn from [`ProblemInstance::horizon`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    horizon: Horizon,
    production_cost: Vec<f64>,
    setup_cost: Vec<f64>,
    holding_cost: Vec<f64>,
    demand: Vec<f64>,
    initial_stock: f64,
}

fn check_series(name: &str, horizon: Horizon, mut series: Vec<f64>) -> LotResult<Vec<f64>> {
    if series.len() > horizon.len() {
        return Err(LotError::Config(format!(
            "{} has {} entries but the horizon is {}",
            name,
            series.len(),
            horizon.len()
        )));
    }
    // Missing trailing entries default to zero
    series.resize(horizon.len(), 0.0);
    for (i, v) in series.iter().enumerate() {
        if !v.is_finite() {
            return Err(LotError::Validation(format!(
                "{} for slot {} is not finite",
                name,
                i + 1
            )));
        }
        if *v < 0.0 {
            return Err(LotError::Validation(format!(
                "{} for slot {} is negative: {}",
                name,
                i + 1,
                v
            )));
        }
    }
    Ok(series)
}

impl ProblemInstance {
    /// Validate raw series into an instance.
    ///
    /// Series shorter than the horizon are padded with zeros; longer ones
    /// are a configuration error. Negative or non-finite values anywhere
    /// are validation errors.
    pub fn new(
        horizon: usize,
        production_cost: Vec<f64>,
        setup_cost: Vec<f64>,
        holding_cost: Vec<f64>,
        demand: Vec<f64>,
        initial_stock: f64,
    ) -> LotResult<Self> {
        if horizon == 0 {
            return Err(LotError::Validation(
                "horizon must cover at least one slot".into(),
            ));
        }
        let horizon = Horizon::new(horizon);
        if !initial_stock.is_finite() {
            return Err(LotError::Validation("initial stock is not finite".into()));
        }
        if initial_stock < 0.0 {
            return Err(LotError::Validation(format!(
                "initial stock is negative: {}",
                initial_stock
            )));
        }
        Ok(Self {
            horizon,
            production_cost: check_series("production cost", horizon, production_cost)?,
            setup_cost: check_series("setup cost", horizon, setup_cost)?,
            holding_cost: check_series("holding cost", horizon, holding_cost)?,
            demand: check_series("demand", horizon, demand)?,
            initial_stock,
        })
    }

    /// Build an instance from raw JSON fields.
    pub fn from_data(data: InstanceData) -> LotResult<Self> {
        Self::new(
            data.horizon,
            data.production_cost,
            data.setup_cost,
            data.holding_cost,
            data.demand,
            data.initial_stock,
        )
    }

    /// Drain a parameter source into an instance.
    ///
    /// The source is consulted field by field: the horizon first, then each
    /// series slot by slot (production cost, setup cost, holding cost,
    /// demand), then the initial stock. Stateful sources advance on every
    /// call, so draining the same source twice yields two different
    /// instances.
    pub fn from_source<S: ParameterSource>(source: &mut S) -> LotResult<Self> {
        let horizon = source.next_horizon();
        Self::from_source_with_horizon(source, horizon)
    }

    /// Like [`from_source`](Self::from_source) but with the horizon fixed
    /// by the caller instead of drawn from the source. Timing runs use this
    /// to draw many instances at the same horizon.
    pub fn from_source_with_horizon<S: ParameterSource>(
        source: &mut S,
        horizon: usize,
    ) -> LotResult<Self> {
        let slots = Horizon::new(horizon);
        let production_cost: Vec<f64> = slots.slots().map(|t| source.production_cost(t)).collect();
        let setup_cost: Vec<f64> = slots.slots().map(|t| source.setup_cost(t)).collect();
        let holding_cost: Vec<f64> = slots.slots().map(|t| source.holding_cost(t)).collect();
        let demand: Vec<f64> = slots.slots().map(|t| source.demand(t)).collect();
        let initial_stock = source.initial_stock();
        Self::new(
            horizon,
            production_cost,
            setup_cost,
            holding_cost,
            demand,
            initial_stock,
        )
    }

    #[inline]
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    #[inline]
    pub fn production_cost(&self, slot: Slot) -> f64 {
        self.production_cost[self.horizon.index_of(slot)]
    }

    #[inline]
    pub fn setup_cost(&self, slot: Slot) -> f64 {
        self.setup_cost[self.horizon.index_of(slot)]
    }

    #[inline]
    pub fn holding_cost(&self, slot: Slot) -> f64 {
        self.holding_cost[self.horizon.index_of(slot)]
    }

    #[inline]
    pub fn demand(&self, slot: Slot) -> f64 {
        self.demand[self.horizon.index_of(slot)]
    }

    #[inline]
    pub fn initial_stock(&self) -> f64 {
        self.initial_stock
    }

    /// Total demand over the whole horizon.
    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    /// Demand due in `slot` and every later slot.
    ///
    /// No admissible plan produces more in `slot` than this, which makes it
    /// the tightest safe coefficient for linking production to setups.
    pub fn tail_demand(&self, slot: Slot) -> f64 {
        self.demand[self.horizon.index_of(slot)..].iter().sum()
    }

    /// Raw fields, e.g. for writing an instance back out as JSON.
    pub fn to_data(&self) -> InstanceData {
        InstanceData {
            horizon: self.horizon.len(),
            production_cost: self.production_cost.clone(),
            setup_cost: self.setup_cost.clone(),
            holding_cost: self.holding_cost.clone(),
            demand: self.demand.clone(),
            initial_stock: self.initial_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FixedSource;

    fn three_slot_instance() -> ProblemInstance {
        ProblemInstance::new(
            3,
            vec![0.1, 1.5, 0.75],
            vec![0.0, 2.5, 2.0],
            vec![0.0, 0.0, 0.0],
            vec![100.0, 200.0, 50.0],
            50.0,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let err = ProblemInstance::new(0, vec![], vec![], vec![], vec![], 0.0).unwrap_err();
        assert!(matches!(err, LotError::Validation(_)));
    }

    #[test]
    fn test_short_series_padded_with_zero() {
        let instance =
            ProblemInstance::new(3, vec![1.0], vec![], vec![2.0, 2.0], vec![5.0, 5.0, 5.0], 0.0)
                .unwrap();
        assert_eq!(instance.production_cost(Slot::new(2)), 0.0);
        assert_eq!(instance.setup_cost(Slot::new(1)), 0.0);
        assert_eq!(instance.holding_cost(Slot::new(3)), 0.0);
        assert_eq!(instance.demand(Slot::new(3)), 5.0);
    }

    #[test]
    fn test_long_series_rejected() {
        let err = ProblemInstance::new(2, vec![1.0, 1.0, 1.0], vec![], vec![], vec![], 0.0)
            .unwrap_err();
        assert!(matches!(err, LotError::Config(_)));
        assert!(err.to_string().contains("production cost"));
    }

    #[test]
    fn test_negative_values_rejected() {
        let err =
            ProblemInstance::new(2, vec![], vec![], vec![], vec![10.0, -1.0], 0.0).unwrap_err();
        assert!(err.to_string().contains("demand"));
        assert!(err.to_string().contains("slot 2"));

        let err = ProblemInstance::new(2, vec![], vec![], vec![], vec![], -3.0).unwrap_err();
        assert!(err.to_string().contains("initial stock"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = ProblemInstance::new(2, vec![1.0, f64::NAN], vec![], vec![], vec![], 0.0)
            .unwrap_err();
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_tail_demand() {
        let instance = three_slot_instance();
        assert_eq!(instance.tail_demand(Slot::new(1)), 350.0);
        assert_eq!(instance.tail_demand(Slot::new(2)), 250.0);
        assert_eq!(instance.tail_demand(Slot::new(3)), 50.0);
        assert_eq!(instance.total_demand(), 350.0);
    }

    #[test]
    fn test_from_fixed_source() {
        let mut src = FixedSource::default();
        let instance = ProblemInstance::from_source(&mut src).unwrap();
        assert_eq!(instance.horizon().len(), 10);
        for t in instance.horizon().slots() {
            assert_eq!(instance.demand(t), 200.0);
            assert_eq!(instance.setup_cost(t), 2.0);
        }
        assert_eq!(instance.initial_stock(), 50.0);
    }

    #[test]
    fn test_fixed_horizon_overrides_source() {
        let mut src = FixedSource::default();
        let instance = ProblemInstance::from_source_with_horizon(&mut src, 4).unwrap();
        assert_eq!(instance.horizon().len(), 4);
        assert_eq!(instance.demand(Slot::new(4)), 200.0);
    }

    #[test]
    fn test_source_drained_field_by_field() {
        #[derive(Default)]
        struct Recorder {
            calls: Vec<String>,
        }

        impl ParameterSource for Recorder {
            fn next_horizon(&mut self) -> usize {
                self.calls.push("horizon".into());
                2
            }
            fn production_cost(&mut self, slot: Slot) -> f64 {
                self.calls.push(format!("pcost {}", slot));
                1.0
            }
            fn setup_cost(&mut self, slot: Slot) -> f64 {
                self.calls.push(format!("setup {}", slot));
                1.0
            }
            fn holding_cost(&mut self, slot: Slot) -> f64 {
                self.calls.push(format!("holding {}", slot));
                1.0
            }
            fn demand(&mut self, slot: Slot) -> f64 {
                self.calls.push(format!("demand {}", slot));
                1.0
            }
            fn initial_stock(&mut self) -> f64 {
                self.calls.push("initial".into());
                0.0
            }
        }

        let mut src = Recorder::default();
        ProblemInstance::from_source(&mut src).unwrap();
        assert_eq!(
            src.calls,
            vec![
                "horizon", "pcost 1", "pcost 2", "setup 1", "setup 2", "holding 1", "holding 2",
                "demand 1", "demand 2", "initial",
            ]
        );
    }

    #[test]
    fn test_data_roundtrip() {
        let instance = three_slot_instance();
        let json = serde_json::to_string(&instance.to_data()).unwrap();
        let data: InstanceData = serde_json::from_str(&json).unwrap();
        let back = ProblemInstance::from_data(data).unwrap();
        assert_eq!(back, instance);
    }

    #[test]
    fn test_sparse_json_defaults() {
        let data: InstanceData =
            serde_json::from_str(r#"{"horizon": 2, "demand": [100.0, 100.0]}"#).unwrap();
        let instance = ProblemInstance::from_data(data).unwrap();
        assert_eq!(instance.initial_stock(), 0.0);
        assert_eq!(instance.production_cost(Slot::new(1)), 0.0);
        assert_eq!(instance.demand(Slot::new(2)), 100.0);
    }
}
