//! Solved plans with formulation-independent accessors.

use std::time::Duration;

use lotplan_core::{Horizon, LotResult, ProblemInstance, Slot};

use crate::backend::{LotSolver, SolveReport};
use crate::formulation::{Formulation, FormulationKind};
use crate::model::{Assignment, VarKey};

/// Build and solve `instance` with `formulation` on `solver`.
///
/// Convenience wrapper for the common path; anything other than an optimal
/// solve comes back as an error.
pub fn solve_with<F, S>(
    formulation: &F,
    instance: &ProblemInstance,
    solver: &mut S,
) -> LotResult<LotSolution>
where
    F: Formulation + ?Sized,
    S: LotSolver + ?Sized,
{
    let model = formulation.build(instance)?;
    let report = solver.solve(model)?;
    LotSolution::from_report(report, instance)
}

/// A solved production plan.
///
/// Wraps the raw assignment of whichever formulation produced it and
/// answers per-slot questions uniformly: for pairwise plans, production
/// and stock in a slot are summed over destinations, so the same accessors
/// read the same way against every formulation.
#[derive(Debug, Clone)]
pub struct LotSolution {
    instance: ProblemInstance,
    formulation: FormulationKind,
    objective: f64,
    assignment: Assignment,
    solve_time: Duration,
}

impl LotSolution {
    /// Turn an optimal report into a solution over `instance`.
    pub fn from_report(report: SolveReport, instance: &ProblemInstance) -> LotResult<Self> {
        let formulation = report.formulation;
        let solve_time = report.solve_time;
        let (objective, assignment) = report.into_optimal()?;
        Ok(Self {
            instance: instance.clone(),
            formulation,
            objective,
            assignment,
            solve_time,
        })
    }

    pub fn formulation(&self) -> FormulationKind {
        self.formulation
    }

    pub fn horizon(&self) -> Horizon {
        self.instance.horizon()
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn solve_time(&self) -> Duration {
        self.solve_time
    }

    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Units produced in `slot`, summed over destinations for pairwise plans.
    pub fn production(&self, slot: Slot) -> f64 {
        match self.assignment.get(&VarKey::Production(slot)) {
            Some(value) => *value,
            None => self
                .horizon()
                .slots()
                .filter_map(|d| self.assignment.get(&VarKey::PairProduction(slot, d)))
                .sum(),
        }
    }

    /// Stock carried out of `slot`, summed over destinations for pairwise plans.
    pub fn stock(&self, slot: Slot) -> f64 {
        match self.assignment.get(&VarKey::Stock(slot)) {
            Some(value) => *value,
            None => self
                .horizon()
                .slots()
                .filter_map(|d| self.assignment.get(&VarKey::PairStock(slot, d)))
                .sum(),
        }
    }

    /// Whether `slot` runs a setup.
    pub fn setup(&self, slot: Slot) -> bool {
        self.assignment
            .get(&VarKey::Setup(slot))
            .map(|v| *v > 0.5)
            .unwrap_or(false)
    }

    /// Pairwise production, `None` for aggregate plans and absent pairs.
    pub fn pair_production(&self, source: Slot, destination: Slot) -> Option<f64> {
        self.assignment
            .get(&VarKey::PairProduction(source, destination))
            .copied()
    }

    /// Pairwise stock, `None` for aggregate plans and absent pairs.
    pub fn pair_stock(&self, source: Slot, destination: Slot) -> Option<f64> {
        self.assignment
            .get(&VarKey::PairStock(source, destination))
            .copied()
    }

    fn pair_matrix(&self, s: &mut String, label: &str, value: impl Fn(Slot, Slot) -> Option<f64>) {
        s.push_str(&format!(
            "{} (row = source slot, column = destination slot)\n",
            label
        ));
        for source in self.horizon().slots() {
            let row: Vec<String> = self
                .horizon()
                .slots()
                .map(|destination| match value(source, destination) {
                    Some(v) => format!("{}", v.round()),
                    None => "x".to_string(),
                })
                .collect();
            s.push_str(&row.join("\t"));
            s.push('\n');
        }
    }

    /// Format a human-readable summary of the plan.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "formulation = {} # horizon = {} # objective = {:.2}\n",
            self.formulation,
            self.horizon(),
            self.objective
        ));
        for t in self.horizon().slots() {
            s.push_str(&format!(
                "slot{} # prod = {} # stock = {} # setup = {}\n",
                t,
                self.production(t).round(),
                self.stock(t).round(),
                if self.setup(t) { 1 } else { 0 }
            ));
        }
        if self.formulation != FormulationKind::Aggregate {
            self.pair_matrix(&mut s, "production", |source, destination| {
                self.pair_production(source, destination)
            });
            self.pair_matrix(&mut s, "stock", |source, destination| {
                self.pair_stock(source, destination)
            });
        }
        s.push_str("parameters\n");
        s.push_str(&format!("A0 = {}\n", self.instance.initial_stock()));
        for t in self.horizon().slots() {
            s.push_str(&format!(
                "slot{} # demand = {} # P-cost = {} # S-cost = {}\n",
                t,
                self.instance.demand(t),
                self.instance.production_cost(t),
                self.instance.holding_cost(t)
            ));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SolveStatus;
    use std::collections::BTreeMap;

    fn pairwise_solution() -> LotSolution {
        let instance = ProblemInstance::new(
            2,
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![0.5, 0.5],
            vec![100.0, 100.0],
            0.0,
        )
        .unwrap();

        let mut assignment: Assignment = BTreeMap::new();
        assignment.insert(VarKey::Setup(Slot::new(1)), 1.0);
        assignment.insert(VarKey::Setup(Slot::new(2)), 0.0);
        assignment.insert(VarKey::PairProduction(Slot::new(1), Slot::new(1)), 100.0);
        assignment.insert(VarKey::PairProduction(Slot::new(1), Slot::new(2)), 100.0);
        assignment.insert(VarKey::PairProduction(Slot::new(2), Slot::new(2)), 0.0);
        assignment.insert(VarKey::PairStock(Slot::new(1), Slot::new(1)), 0.0);
        assignment.insert(VarKey::PairStock(Slot::new(1), Slot::new(2)), 100.0);
        assignment.insert(VarKey::PairStock(Slot::new(2), Slot::new(2)), 0.0);

        let report = SolveReport {
            formulation: FormulationKind::DisaggregateTriangular,
            horizon: instance.horizon(),
            status: SolveStatus::Optimal,
            objective: Some(254.0),
            assignment: Some(assignment),
            solve_time: Duration::ZERO,
            message: None,
        };
        LotSolution::from_report(report, &instance).unwrap()
    }

    #[test]
    fn test_pairwise_accessors_aggregate_rows() {
        let solution = pairwise_solution();
        assert_eq!(solution.production(Slot::new(1)), 200.0);
        assert_eq!(solution.production(Slot::new(2)), 0.0);
        assert_eq!(solution.stock(Slot::new(1)), 100.0);
        assert!(solution.setup(Slot::new(1)));
        assert!(!solution.setup(Slot::new(2)));
    }

    #[test]
    fn test_pair_lookups() {
        let solution = pairwise_solution();
        assert_eq!(
            solution.pair_production(Slot::new(1), Slot::new(2)),
            Some(100.0)
        );
        // absent inadmissible pair
        assert_eq!(solution.pair_production(Slot::new(2), Slot::new(1)), None);
    }

    #[test]
    fn test_summary_marks_absent_pairs() {
        let solution = pairwise_solution();
        let summary = solution.summary();
        assert!(summary.contains("formulation = triangular"));
        assert!(summary.contains("slot1 # prod = 200"));
        assert!(summary.contains("x"));
        assert!(summary.contains("A0 = 0"));
    }

    #[test]
    fn test_infeasible_report_does_not_build_solution() {
        let instance =
            ProblemInstance::new(1, vec![1.0], vec![1.0], vec![1.0], vec![10.0], 0.0).unwrap();
        let report = SolveReport {
            formulation: FormulationKind::Aggregate,
            horizon: instance.horizon(),
            status: SolveStatus::Infeasible,
            objective: None,
            assignment: None,
            solve_time: Duration::ZERO,
            message: None,
        };
        assert!(LotSolution::from_report(report, &instance).is_err());
    }
}
