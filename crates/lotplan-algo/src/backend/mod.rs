//! Solver sessions (how to solve).
//!
//! A [`LotSolver`] consumes a built [`LotModel`] and reports what happened.
//! Every terminal outcome of the backend maps onto a [`SolveStatus`];
//! callers that only want the happy path use [`SolveReport::into_optimal`]
//! and get failures as errors with the formulation and horizon named.

pub mod microlp;

pub use microlp::MicroLpSession;

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use lotplan_core::{Horizon, LotError, LotResult};

use crate::formulation::FormulationKind;
use crate::model::{Assignment, LotModel};

/// Status of a finished solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Backend failed for any other reason.
    Error,
}

impl SolveStatus {
    /// Check if this status represents a successful solve.
    pub fn is_success(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
            SolveStatus::Error => write!(f, "error"),
        }
    }
}

/// What a session hands back after a solve.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// Which formulation built the model.
    pub formulation: FormulationKind,
    /// Horizon of the solved instance.
    pub horizon: Horizon,
    /// Terminal status.
    pub status: SolveStatus,
    /// Objective value, present on optimal solves.
    pub objective: Option<f64>,
    /// Variable values, present on optimal solves.
    #[serde(skip)]
    pub assignment: Option<Assignment>,
    /// Wall-clock time spent inside the backend.
    pub solve_time: Duration,
    /// Backend diagnostic for failed solves.
    pub message: Option<String>,
}

impl SolveReport {
    pub fn is_optimal(&self) -> bool {
        self.status.is_success()
    }

    /// Unwrap an optimal report into objective and assignment.
    pub fn into_optimal(self) -> LotResult<(f64, Assignment)> {
        let context = format!("{} model over horizon {}", self.formulation, self.horizon);
        match self.status {
            SolveStatus::Optimal => match (self.objective, self.assignment) {
                (Some(objective), Some(assignment)) => Ok((objective, assignment)),
                _ => Err(LotError::Solver(format!(
                    "{} reported optimal without a solution",
                    context
                ))),
            },
            SolveStatus::Infeasible => {
                Err(LotError::Infeasible(format!("{} admits no plan", context)))
            }
            SolveStatus::Unbounded => Err(LotError::Solver(format!("{} is unbounded", context))),
            SolveStatus::Error => {
                let detail = self.message.unwrap_or_else(|| "unknown backend error".into());
                Err(LotError::Solver(format!("{} failed: {}", context, detail)))
            }
        }
    }
}

/// Implements the actual solving.
///
/// Sessions take `&mut self`: one solve at a time, scratch state allowed
/// between calls.
pub trait LotSolver {
    /// Unique identifier (e.g., "microlp").
    fn id(&self) -> &str;

    /// Solve a built model.
    fn solve(&mut self, model: LotModel) -> LotResult<SolveReport>;
}
