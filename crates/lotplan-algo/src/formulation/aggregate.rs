//! Aggregate formulation with one variable set per slot.

use good_lp::{constraint, variable, variables, Expression};
use std::collections::BTreeMap;

use lotplan_core::{LotResult, ProblemInstance};

use super::{Formulation, FormulationKind};
use crate::model::{LotModel, VarKey};

/// The O(n) model: production, stock, and setup per slot.
///
/// Stock balances chain each slot to its predecessor, with the instance's
/// initial stock feeding the first slot. Production is tied to the slot's
/// setup using the demand still due from that slot onward as the big-M
/// coefficient, the tightest bound no admissible plan can exceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateFormulation;

impl Formulation for AggregateFormulation {
    fn kind(&self) -> FormulationKind {
        FormulationKind::Aggregate
    }

    fn build(&self, instance: &ProblemInstance) -> LotResult<LotModel> {
        let horizon = instance.horizon();
        let mut vars = variables!();
        let mut keys = BTreeMap::new();

        for t in horizon.slots() {
            keys.insert(VarKey::Production(t), vars.add(variable().min(0.0)));
            keys.insert(VarKey::Stock(t), vars.add(variable().min(0.0)));
            keys.insert(VarKey::Setup(t), vars.add(variable().binary()));
        }

        let mut objective = Expression::from(0.0);
        for t in horizon.slots() {
            objective += instance.setup_cost(t) * keys[&VarKey::Setup(t)];
            objective += instance.production_cost(t) * keys[&VarKey::Production(t)];
            objective += instance.holding_cost(t) * keys[&VarKey::Stock(t)];
        }

        let mut constraints = Vec::new();
        for t in horizon.slots() {
            let production = keys[&VarKey::Production(t)];
            let stock = keys[&VarKey::Stock(t)];
            let setup = keys[&VarKey::Setup(t)];

            // stock[t] = carry-in - demand[t] + production[t]
            let carry_in = match t.pred() {
                Some(prev) => Expression::from(keys[&VarKey::Stock(prev)]),
                None => Expression::from(instance.initial_stock()),
            };
            let balance = carry_in - instance.demand(t) + production;
            constraints.push(constraint!(stock == balance));

            // no setup, no production
            let cap = instance.tail_demand(t) * setup;
            constraints.push(constraint!(production <= cap));
        }

        Ok(LotModel {
            kind: self.kind(),
            horizon,
            vars,
            objective,
            constraints,
            keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotplan_core::Slot;

    fn scenario_instance() -> ProblemInstance {
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
    fn test_model_shape() {
        let model = AggregateFormulation.build(&scenario_instance()).unwrap();
        assert_eq!(model.kind, FormulationKind::Aggregate);
        // three variables per slot
        assert_eq!(model.num_vars(), 9);
        // balance and linkage per slot
        assert_eq!(model.num_constraints(), 6);
    }

    #[test]
    fn test_keys_cover_every_slot() {
        let model = AggregateFormulation.build(&scenario_instance()).unwrap();
        for t in 1..=3 {
            let slot = Slot::new(t);
            assert!(model.variable(&VarKey::Production(slot)).is_some());
            assert!(model.variable(&VarKey::Stock(slot)).is_some());
            assert!(model.variable(&VarKey::Setup(slot)).is_some());
        }
        assert!(model
            .variable(&VarKey::PairProduction(Slot::new(1), Slot::new(1)))
            .is_none());
    }
}
