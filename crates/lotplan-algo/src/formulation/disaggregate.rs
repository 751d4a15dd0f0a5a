//! Shared builder for the pairwise (multi-commodity) formulations.
//!
//! Both disaggregate variants see each slot's demand as its own commodity:
//! production and stock are indexed by `(source, destination)`, goods made
//! in the source slot for the demand due in the destination slot. Demand is
//! drawn at the self pair, initial stock is earmarked for the first slot's
//! demand, and each pair's production is capped by the destination demand
//! times the source's setup.

use good_lp::{constraint, variable, variables, Expression};
use std::collections::BTreeMap;

use lotplan_core::{LotResult, ProblemInstance};

use super::FormulationKind;
use crate::index::{all_pairs, is_admissible};
use crate::model::{LotModel, VarKey};

/// Options shared by the disaggregate formulations.
#[derive(Debug, Clone)]
pub struct DisaggregateConfig {
    /// Pin the self-pair stock to zero.
    ///
    /// Each slot's demand must then be served exactly by its due slot, and
    /// initial stock beyond the first slot's demand leaves no admissible
    /// plan at all.
    pub zero_self_stock: bool,
}

impl Default for DisaggregateConfig {
    fn default() -> Self {
        Self {
            zero_self_stock: true,
        }
    }
}

pub(super) fn build_pairwise(
    instance: &ProblemInstance,
    kind: FormulationKind,
    config: &DisaggregateConfig,
    include_inadmissible: bool,
) -> LotResult<LotModel> {
    let horizon = instance.horizon();
    let mut vars = variables!();
    let mut keys = BTreeMap::new();

    for t in horizon.slots() {
        keys.insert(VarKey::Setup(t), vars.add(variable().binary()));
    }
    for (source, destination) in all_pairs(horizon) {
        if include_inadmissible || is_admissible(source, destination) {
            keys.insert(
                VarKey::PairProduction(source, destination),
                vars.add(variable().min(0.0)),
            );
            keys.insert(
                VarKey::PairStock(source, destination),
                vars.add(variable().min(0.0)),
            );
        }
    }

    // Production and holding are priced at the source slot
    let mut objective = Expression::from(0.0);
    for t in horizon.slots() {
        objective += instance.setup_cost(t) * keys[&VarKey::Setup(t)];
    }
    for (key, var) in &keys {
        match key {
            VarKey::PairProduction(source, _) => {
                objective += instance.production_cost(*source) * *var;
            }
            VarKey::PairStock(source, _) => {
                objective += instance.holding_cost(*source) * *var;
            }
            _ => {}
        }
    }

    let mut constraints = Vec::new();
    for (source, destination) in all_pairs(horizon) {
        if !is_admissible(source, destination) {
            if include_inadmissible {
                let production = keys[&VarKey::PairProduction(source, destination)];
                let stock = keys[&VarKey::PairStock(source, destination)];
                constraints.push(constraint!(production == 0.0));
                constraints.push(constraint!(stock == 0.0));
            }
            continue;
        }

        let production = keys[&VarKey::PairProduction(source, destination)];
        let stock = keys[&VarKey::PairStock(source, destination)];
        let setup = keys[&VarKey::Setup(source)];

        // stock[s,d] = carry-in - demand draw + production[s,d]
        let carry_in = match source.pred() {
            Some(prev) => Expression::from(keys[&VarKey::PairStock(prev, destination)]),
            None if destination == source => Expression::from(instance.initial_stock()),
            None => Expression::from(0.0),
        };
        let demand_draw = if source == destination {
            instance.demand(source)
        } else {
            0.0
        };
        let balance = carry_in - demand_draw + production;
        constraints.push(constraint!(stock == balance));

        // no setup at the source, no production for any destination
        let cap = instance.demand(destination) * setup;
        constraints.push(constraint!(production <= cap));

        if config.zero_self_stock && source == destination {
            constraints.push(constraint!(stock == 0.0));
        }
    }

    Ok(LotModel {
        kind,
        horizon,
        vars,
        objective,
        constraints,
        keys,
    })
}
