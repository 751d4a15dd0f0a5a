//! Session over the pure-Rust microlp simplex solver.
//!
//! good_lp drives microlp's branch-and-bound for the binary setup
//! variables, so models solve exactly rather than as LP relaxations.

use good_lp::solvers::microlp::microlp;
use good_lp::{ResolutionError, Solution, SolverModel};
use std::time::Instant;
use tracing::{debug, info};

use lotplan_core::LotResult;

use super::{LotSolver, SolveReport, SolveStatus};
use crate::model::{Assignment, LotModel};

/// A microlp-backed solver session.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSession;

impl MicroLpSession {
    pub fn new() -> Self {
        Self
    }
}

fn classify(err: &ResolutionError) -> (SolveStatus, String) {
    match err {
        ResolutionError::Infeasible => (SolveStatus::Infeasible, "infeasible".into()),
        ResolutionError::Unbounded => (SolveStatus::Unbounded, "unbounded".into()),
        other => (SolveStatus::Error, format!("{:?}", other)),
    }
}

impl LotSolver for MicroLpSession {
    fn id(&self) -> &str {
        "microlp"
    }

    fn solve(&mut self, model: LotModel) -> LotResult<SolveReport> {
        let LotModel {
            kind,
            horizon,
            vars,
            objective,
            constraints,
            keys,
        } = model;

        debug!(
            formulation = %kind,
            horizon = %horizon,
            vars = keys.len(),
            constraints = constraints.len(),
            "solving lot-sizing model"
        );

        let start = Instant::now();
        let mut problem = vars.minimise(objective.clone()).using(microlp);
        for row in constraints {
            problem = problem.with(row);
        }

        match problem.solve() {
            Ok(solution) => {
                let solve_time = start.elapsed();
                let objective_value = objective.eval_with(&solution);
                let assignment: Assignment = keys
                    .iter()
                    .map(|(key, var)| (*key, solution.value(*var)))
                    .collect();
                info!(
                    formulation = %kind,
                    horizon = %horizon,
                    objective = objective_value,
                    solve_ms = solve_time.as_secs_f64() * 1e3,
                    "solved to optimality"
                );
                Ok(SolveReport {
                    formulation: kind,
                    horizon,
                    status: SolveStatus::Optimal,
                    objective: Some(objective_value),
                    assignment: Some(assignment),
                    solve_time,
                    message: None,
                })
            }
            Err(err) => {
                let (status, message) = classify(&err);
                debug!(formulation = %kind, horizon = %horizon, status = %status, "solve failed");
                Ok(SolveReport {
                    formulation: kind,
                    horizon,
                    status,
                    objective: None,
                    assignment: None,
                    solve_time: start.elapsed(),
                    message: Some(message),
                })
            }
        }
    }
}
