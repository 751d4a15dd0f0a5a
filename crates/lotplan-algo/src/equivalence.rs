//! Cross-formulation equivalence checking.
//!
//! Every formulation of a well-formed instance has the same optimal cost.
//! The checker compares two solved plans: first that they actually cover
//! the same instance (same initial stock, same per-slot demand), then the
//! objectives, then the per-slot plans. Matching objectives with differing
//! plans is a benign alternate optimum; differing objectives mean one of
//! the models is wrong.

use serde::Serialize;

use lotplan_core::{LotError, LotResult, Slot};

use crate::index::{all_pairs, is_admissible};
use crate::solution::LotSolution;

/// Verdict of comparing two plans for the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Objectives match and the per-slot plans agree.
    Equivalent,
    /// Objectives match but the plans differ.
    AlternateOptimum,
    /// Objectives differ beyond tolerance.
    ObjectiveMismatch,
}

/// Slot-level comparison of two solved plans.
#[derive(Debug, Clone, Serialize)]
pub struct EquivalenceReport {
    pub verdict: Verdict,
    /// Absolute objective difference.
    pub objective_gap: f64,
    /// Largest per-slot production difference.
    pub max_production_gap: f64,
    /// Largest per-slot stock difference.
    pub max_stock_gap: f64,
    /// Slots whose production or stock differ beyond tolerance.
    pub mismatched_slots: Vec<Slot>,
}

impl EquivalenceReport {
    pub fn is_equivalent(&self) -> bool {
        matches!(self.verdict, Verdict::Equivalent)
    }

    /// True unless the objectives disagree.
    pub fn objectives_match(&self) -> bool {
        !matches!(self.verdict, Verdict::ObjectiveMismatch)
    }
}

/// Pair-level comparison of two pairwise plans.
#[derive(Debug, Clone, Serialize)]
pub struct PairwiseReport {
    /// Largest difference over the admissible pairs both plans carry.
    pub max_gap: f64,
    /// Admissible pairs whose production or stock differ beyond tolerance.
    pub mismatched_pairs: Vec<(Slot, Slot)>,
    /// Inadmissible pairs that are not at zero in either plan.
    pub nonzero_inadmissible: Vec<(Slot, Slot)>,
}

impl PairwiseReport {
    pub fn is_match(&self) -> bool {
        self.mismatched_pairs.is_empty() && self.nonzero_inadmissible.is_empty()
    }
}

/// Compares solved plans across formulations.
#[derive(Debug, Clone)]
pub struct EquivalenceChecker {
    /// Relative tolerance, scaled by value magnitude with a floor of 1.
    pub tolerance: f64,
}

impl Default for EquivalenceChecker {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

impl EquivalenceChecker {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.tolerance * a.abs().max(b.abs()).max(1.0)
    }

    /// Confirm the two solutions cover the same instance data.
    fn check_same_instance(&self, a: &LotSolution, b: &LotSolution) -> LotResult<()> {
        if a.horizon() != b.horizon() {
            return Err(LotError::Config(format!(
                "cannot compare plans over horizons {} and {}",
                a.horizon(),
                b.horizon()
            )));
        }
        if a.instance().initial_stock() != b.instance().initial_stock() {
            return Err(LotError::Config(format!(
                "plans disagree on initial stock: {} vs {}",
                a.instance().initial_stock(),
                b.instance().initial_stock()
            )));
        }
        for t in a.horizon().slots() {
            if a.instance().demand(t) != b.instance().demand(t) {
                return Err(LotError::Config(format!(
                    "plans disagree on demand in slot {}: {} vs {}",
                    t,
                    a.instance().demand(t),
                    b.instance().demand(t)
                )));
            }
        }
        Ok(())
    }

    /// Compare two solved plans slot by slot.
    ///
    /// Fails with a configuration error when the plans were not solved on
    /// the same instance data, which is what a parameter source drained
    /// twice looks like.
    pub fn check(&self, a: &LotSolution, b: &LotSolution) -> LotResult<EquivalenceReport> {
        self.check_same_instance(a, b)?;

        let objective_gap = (a.objective() - b.objective()).abs();
        let objectives_match = self.close(a.objective(), b.objective());

        let mut max_production_gap = 0.0_f64;
        let mut max_stock_gap = 0.0_f64;
        let mut mismatched_slots = Vec::new();
        for t in a.horizon().slots() {
            let production_gap = (a.production(t) - b.production(t)).abs();
            let stock_gap = (a.stock(t) - b.stock(t)).abs();
            max_production_gap = max_production_gap.max(production_gap);
            max_stock_gap = max_stock_gap.max(stock_gap);
            if !self.close(a.production(t), b.production(t))
                || !self.close(a.stock(t), b.stock(t))
            {
                mismatched_slots.push(t);
            }
        }

        let verdict = if !objectives_match {
            Verdict::ObjectiveMismatch
        } else if mismatched_slots.is_empty() {
            Verdict::Equivalent
        } else {
            Verdict::AlternateOptimum
        };

        Ok(EquivalenceReport {
            verdict,
            objective_gap,
            max_production_gap,
            max_stock_gap,
            mismatched_slots,
        })
    }

    /// Like [`check`](Self::check), but an objective mismatch is an error.
    pub fn ensure_equivalent(
        &self,
        a: &LotSolution,
        b: &LotSolution,
    ) -> LotResult<EquivalenceReport> {
        let report = self.check(a, b)?;
        if !report.objectives_match() {
            return Err(LotError::Equivalence(format!(
                "{} and {} objectives differ by {} on the same instance ({} vs {})",
                a.formulation(),
                b.formulation(),
                report.objective_gap,
                a.objective(),
                b.objective()
            )));
        }
        Ok(report)
    }

    /// Compare two pairwise plans variable by variable.
    ///
    /// Admissible pairs present in both plans must agree; inadmissible
    /// pairs, where a plan carries them at all, must sit at zero. Only
    /// meaningful at unique optima.
    pub fn check_pairwise(&self, a: &LotSolution, b: &LotSolution) -> LotResult<PairwiseReport> {
        self.check_same_instance(a, b)?;

        let mut max_gap = 0.0_f64;
        let mut mismatched_pairs = Vec::new();
        let mut nonzero_inadmissible = Vec::new();

        for (source, destination) in all_pairs(a.horizon()) {
            let productions = (
                a.pair_production(source, destination),
                b.pair_production(source, destination),
            );
            let stocks = (
                a.pair_stock(source, destination),
                b.pair_stock(source, destination),
            );

            if is_admissible(source, destination) {
                if let (Some(pa), Some(pb)) = productions {
                    max_gap = max_gap.max((pa - pb).abs());
                    if !self.close(pa, pb) {
                        mismatched_pairs.push((source, destination));
                        continue;
                    }
                }
                if let (Some(sa), Some(sb)) = stocks {
                    max_gap = max_gap.max((sa - sb).abs());
                    if !self.close(sa, sb) {
                        mismatched_pairs.push((source, destination));
                    }
                }
            } else {
                let residue = [productions.0, productions.1, stocks.0, stocks.1]
                    .into_iter()
                    .flatten()
                    .fold(0.0_f64, |acc, v| acc.max(v.abs()));
                if residue > self.tolerance {
                    nonzero_inadmissible.push((source, destination));
                }
            }
        }

        Ok(PairwiseReport {
            max_gap,
            mismatched_pairs,
            nonzero_inadmissible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{SolveReport, SolveStatus};
    use crate::formulation::FormulationKind;
    use crate::model::{Assignment, VarKey};
    use lotplan_core::ProblemInstance;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn instance(demand: Vec<f64>, initial: f64) -> ProblemInstance {
        let h = demand.len();
        ProblemInstance::new(h, vec![1.0; h], vec![2.0; h], vec![0.5; h], demand, initial)
            .unwrap()
    }

    fn aggregate_solution(
        instance: &ProblemInstance,
        objective: f64,
        production: &[f64],
        stock: &[f64],
    ) -> LotSolution {
        let mut assignment: Assignment = BTreeMap::new();
        for t in instance.horizon().slots() {
            let i = instance.horizon().index_of(t);
            assignment.insert(VarKey::Production(t), production[i]);
            assignment.insert(VarKey::Stock(t), stock[i]);
            assignment.insert(VarKey::Setup(t), if production[i] > 0.0 { 1.0 } else { 0.0 });
        }
        let report = SolveReport {
            formulation: FormulationKind::Aggregate,
            horizon: instance.horizon(),
            status: SolveStatus::Optimal,
            objective: Some(objective),
            assignment: Some(assignment),
            solve_time: Duration::ZERO,
            message: None,
        };
        LotSolution::from_report(report, instance).unwrap()
    }

    #[test]
    fn test_identical_plans_are_equivalent() {
        let inst = instance(vec![100.0, 100.0], 0.0);
        let a = aggregate_solution(&inst, 210.0, &[100.0, 100.0], &[0.0, 0.0]);
        let b = aggregate_solution(&inst, 210.0, &[100.0, 100.0], &[0.0, 0.0]);

        let report = EquivalenceChecker::default().check(&a, &b).unwrap();
        assert_eq!(report.verdict, Verdict::Equivalent);
        assert!(report.is_equivalent());
        assert_eq!(report.objective_gap, 0.0);
    }

    #[test]
    fn test_same_objective_different_plan_is_alternate_optimum() {
        let inst = instance(vec![100.0, 100.0], 0.0);
        let a = aggregate_solution(&inst, 210.0, &[100.0, 100.0], &[0.0, 0.0]);
        let b = aggregate_solution(&inst, 210.0, &[200.0, 0.0], &[100.0, 0.0]);

        let report = EquivalenceChecker::default().check(&a, &b).unwrap();
        assert_eq!(report.verdict, Verdict::AlternateOptimum);
        assert!(report.objectives_match());
        assert!(!report.mismatched_slots.is_empty());
        assert_eq!(report.max_production_gap, 100.0);
    }

    #[test]
    fn test_objective_mismatch_detected() {
        let inst = instance(vec![100.0, 100.0], 0.0);
        let a = aggregate_solution(&inst, 210.0, &[100.0, 100.0], &[0.0, 0.0]);
        let b = aggregate_solution(&inst, 260.0, &[100.0, 100.0], &[0.0, 0.0]);

        let checker = EquivalenceChecker::default();
        let report = checker.check(&a, &b).unwrap();
        assert_eq!(report.verdict, Verdict::ObjectiveMismatch);

        let err = checker.ensure_equivalent(&a, &b).unwrap_err();
        assert!(matches!(err, LotError::Equivalence(_)));
        assert!(err.to_string().contains("aggregate"));
    }

    #[test]
    fn test_different_instances_rejected() {
        let a_inst = instance(vec![100.0, 100.0], 0.0);
        let b_inst = instance(vec![100.0, 150.0], 0.0);
        let a = aggregate_solution(&a_inst, 210.0, &[100.0, 100.0], &[0.0, 0.0]);
        let b = aggregate_solution(&b_inst, 265.0, &[100.0, 150.0], &[0.0, 0.0]);

        let err = EquivalenceChecker::default().check(&a, &b).unwrap_err();
        assert!(matches!(err, LotError::Config(_)));
        assert!(err.to_string().contains("slot 2"));
    }

    #[test]
    fn test_tolerance_scales_with_magnitude() {
        let checker = EquivalenceChecker::new(1e-6);
        assert!(checker.close(1970.0, 1970.0 + 1e-4));
        assert!(!checker.close(1970.0, 1971.0));
        assert!(checker.close(0.0, 5e-7));
    }
}
