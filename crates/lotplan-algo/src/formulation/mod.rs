//! Model formulations (what to solve).
//!
//! Each formulation renders the same planning problem as a different
//! mixed-integer model. All of them minimize total cost and agree on the
//! optimal objective for well-formed instances; they differ in how many
//! variables they spend doing it.

mod aggregate;
mod disaggregate;
mod dense;
mod triangular;

pub use aggregate::AggregateFormulation;
pub use dense::DenseFormulation;
pub use disaggregate::DisaggregateConfig;
pub use triangular::TriangularFormulation;

use serde::Serialize;
use std::fmt;

use lotplan_core::{LotResult, ProblemInstance};

use crate::model::LotModel;

/// Which rendering of the planning problem to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FormulationKind {
    /// O(n) variables: one production, stock, and setup per slot.
    #[default]
    Aggregate,
    /// O(n^2) variables over every source/destination pair, with the
    /// inadmissible half pinned to zero by explicit rows.
    DisaggregateDense,
    /// Variables over the admissible pairs only, n(n+1)/2 of them.
    DisaggregateTriangular,
}

impl fmt::Display for FormulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulationKind::Aggregate => write!(f, "aggregate"),
            FormulationKind::DisaggregateDense => write!(f, "dense"),
            FormulationKind::DisaggregateTriangular => write!(f, "triangular"),
        }
    }
}

impl std::str::FromStr for FormulationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aggregate" | "base" => Ok(FormulationKind::Aggregate),
            "dense" => Ok(FormulationKind::DisaggregateDense),
            "triangular" | "disaggregate" => Ok(FormulationKind::DisaggregateTriangular),
            _ => Err(format!("Unknown formulation: {}", s)),
        }
    }
}

/// Builds a solvable model from a validated instance.
pub trait Formulation {
    /// Which model family this builder produces.
    fn kind(&self) -> FormulationKind;

    /// Build the objective and constraint rows for `instance`.
    fn build(&self, instance: &ProblemInstance) -> LotResult<LotModel>;
}

/// Construct the formulation a kind names, with default options.
pub fn formulation_for(kind: FormulationKind) -> Box<dyn Formulation> {
    match kind {
        FormulationKind::Aggregate => Box::new(AggregateFormulation),
        FormulationKind::DisaggregateDense => Box::new(DenseFormulation::default()),
        FormulationKind::DisaggregateTriangular => Box::new(TriangularFormulation::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_display_roundtrip() {
        for kind in [
            FormulationKind::Aggregate,
            FormulationKind::DisaggregateDense,
            FormulationKind::DisaggregateTriangular,
        ] {
            let parsed = FormulationKind::from_str(&kind.to_string()).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!(
            FormulationKind::from_str("BASE").unwrap(),
            FormulationKind::Aggregate
        );
        assert_eq!(
            FormulationKind::from_str("disaggregate").unwrap(),
            FormulationKind::DisaggregateTriangular
        );
        assert!(FormulationKind::from_str("simplex").is_err());
    }

    #[test]
    fn test_formulation_for_matches_kind() {
        for kind in [
            FormulationKind::Aggregate,
            FormulationKind::DisaggregateDense,
            FormulationKind::DisaggregateTriangular,
        ] {
            assert_eq!(formulation_for(kind).kind(), kind);
        }
    }
}
