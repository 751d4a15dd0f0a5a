//! # lotplan-algo: Lot-Sizing Formulations and Solvers
//!
//! This crate turns validated [`ProblemInstance`]s into mixed-integer
//! models and solves them. Three formulations of the same problem are
//! provided, all minimizing setup + production + holding cost:
//!
//! | Formulation | Variables | Description |
//! |-------------|-----------|-------------|
//! | [`AggregateFormulation`] | O(n) | One production/stock/setup per slot |
//! | [`DenseFormulation`] | O(n^2) | Every source/destination pair, inadmissible half pinned to zero |
//! | [`TriangularFormulation`] | n(n+1)/2 pairs | Admissible pairs only |
//!
//! ### Architecture
//!
//! - **[`formulation::Formulation`]**: builds the model (what to solve)
//! - **[`backend::LotSolver`]**: runs the solver session (how to solve it)
//! - **[`solution::LotSolution`]**: uniform per-slot view of any solved plan
//! - **[`equivalence::EquivalenceChecker`]**: cross-checks two plans
//!
//! All formulations agree on the optimal objective for well-formed
//! instances, which the equivalence checker turns into a testable
//! property.
//!
//! ## Example
//!
//! ```ignore
//! use lotplan_algo::{solve_with, AggregateFormulation, MicroLpSession};
//! use lotplan_core::{FixedSource, ProblemInstance};
//!
//! let mut source = FixedSource::default();
//! let instance = ProblemInstance::from_source(&mut source)?;
//!
//! let mut session = MicroLpSession::new();
//! let plan = solve_with(&AggregateFormulation, &instance, &mut session)?;
//! println!("{}", plan.summary());
//! ```

pub mod backend;
pub mod equivalence;
pub mod formulation;
pub mod index;
pub mod model;
pub mod solution;

pub use backend::{LotSolver, MicroLpSession, SolveReport, SolveStatus};
pub use equivalence::{EquivalenceChecker, EquivalenceReport, PairwiseReport, Verdict};
pub use formulation::{
    formulation_for, AggregateFormulation, DenseFormulation, DisaggregateConfig, Formulation,
    FormulationKind, TriangularFormulation,
};
pub use index::{admissible_pairs, all_pairs, is_admissible};
pub use model::{Assignment, LotModel, VarKey};
pub use solution::{solve_with, LotSolution};

pub use lotplan_core::ProblemInstance;
