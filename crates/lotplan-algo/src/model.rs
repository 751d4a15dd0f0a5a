//! Built models awaiting a solver session.

use good_lp::{Constraint, Expression, ProblemVariables, Variable};
use lotplan_core::{Horizon, Slot};
use std::collections::BTreeMap;
use std::fmt;

use crate::formulation::FormulationKind;

/// One decision variable of a lot-sizing model.
///
/// Aggregate models use the per-slot keys; disaggregate models use the
/// pairwise keys plus `Setup`. The derived ordering is deterministic, so
/// assignments iterate in a stable order regardless of how the model was
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VarKey {
    /// Units produced in a slot.
    Production(Slot),
    /// Stock carried out of a slot.
    Stock(Slot),
    /// Whether a slot runs a setup.
    Setup(Slot),
    /// Units produced in `source` for demand due in `destination`.
    PairProduction(Slot, Slot),
    /// Stock bound for `destination` carried out of `source`.
    PairStock(Slot, Slot),
}

impl fmt::Display for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarKey::Production(t) => write!(f, "production[{}]", t),
            VarKey::Stock(t) => write!(f, "stock[{}]", t),
            VarKey::Setup(t) => write!(f, "setup[{}]", t),
            VarKey::PairProduction(s, d) => write!(f, "production[{},{}]", s, d),
            VarKey::PairStock(s, d) => write!(f, "stock[{},{}]", s, d),
        }
    }
}

/// Solved variable values in deterministic key order.
pub type Assignment = BTreeMap<VarKey, f64>;

/// A lot-sizing model ready to hand to a solver session.
///
/// Carries the variable pool, the minimization objective, and the
/// constraint rows a formulation built, plus the key map sessions use to
/// read values back out of a solver solution.
pub struct LotModel {
    pub kind: FormulationKind,
    pub horizon: Horizon,
    pub vars: ProblemVariables,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
    pub keys: BTreeMap<VarKey, Variable>,
}

impl LotModel {
    pub fn num_vars(&self) -> usize {
        self.keys.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The solver variable behind a key, if the formulation created one.
    pub fn variable(&self, key: &VarKey) -> Option<Variable> {
        self.keys.get(key).copied()
    }
}
