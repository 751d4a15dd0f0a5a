//! Triangular disaggregate formulation over admissible pairs only.

use lotplan_core::{LotResult, ProblemInstance};

use super::disaggregate::{build_pairwise, DisaggregateConfig};
use super::{Formulation, FormulationKind};
use crate::model::LotModel;

/// Keeps only the admissible half of the pair matrix, n(n+1)/2 pairs.
///
/// Same constraint rows as the dense variant on the pairs both share;
/// the inadmissible pairs simply never exist.
#[derive(Debug, Clone, Default)]
pub struct TriangularFormulation {
    pub config: DisaggregateConfig,
}

impl TriangularFormulation {
    pub fn new(config: DisaggregateConfig) -> Self {
        Self { config }
    }
}

impl Formulation for TriangularFormulation {
    fn kind(&self) -> FormulationKind {
        FormulationKind::DisaggregateTriangular
    }

    fn build(&self, instance: &ProblemInstance) -> LotResult<LotModel> {
        build_pairwise(instance, self.kind(), &self.config, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VarKey;
    use lotplan_core::Slot;

    #[test]
    fn test_inadmissible_pairs_have_no_variables() {
        let instance =
            ProblemInstance::new(2, vec![1.0; 2], vec![2.0; 2], vec![0.5; 2], vec![100.0; 2], 0.0)
                .unwrap();
        let model = TriangularFormulation::default().build(&instance).unwrap();
        assert!(model
            .variable(&VarKey::PairProduction(Slot::new(1), Slot::new(2)))
            .is_some());
        assert!(model
            .variable(&VarKey::PairProduction(Slot::new(2), Slot::new(1)))
            .is_none());
        assert!(model
            .variable(&VarKey::PairStock(Slot::new(2), Slot::new(1)))
            .is_none());
    }
}
