//! Dense disaggregate formulation over every source/destination pair.

use lotplan_core::{LotResult, ProblemInstance};

use super::disaggregate::{build_pairwise, DisaggregateConfig};
use super::{Formulation, FormulationKind};
use crate::model::LotModel;

/// Materializes all n^2 pairs, pinning the inadmissible half to zero with
/// explicit constraint rows.
#[derive(Debug, Clone, Default)]
pub struct DenseFormulation {
    pub config: DisaggregateConfig,
}

impl DenseFormulation {
    pub fn new(config: DisaggregateConfig) -> Self {
        Self { config }
    }
}

impl Formulation for DenseFormulation {
    fn kind(&self) -> FormulationKind {
        FormulationKind::DisaggregateDense
    }

    fn build(&self, instance: &ProblemInstance) -> LotResult<LotModel> {
        build_pairwise(instance, self.kind(), &self.config, true)
    }
}
