//! Solution sequence dispatch and per-run configuration.
//!
//! A run reads the solution sequence code from the model, checks it against
//! the closed dispatch table before touching any subcase, then solves every
//! subcase except the global-defaults subcase 0 in ascending ID order.

use dsm_model::{StructuralModel, Subcase, GLOBAL_SUBCASE};
use serde::{Deserialize, Serialize};

use crate::backend::{default_backend, SolverBackend};
use crate::diagnostics::Diagnostic;
use crate::error::{Result, SolverError};
use crate::modal_solver::{self, ModalSolution};
use crate::static_solver::{self, StaticSolution};

/// Solution sequences with a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolutionSequence {
    /// Linear statics (SOL 101)
    Static,
    /// Normal modes (SOL 103)
    Modal,
}

impl SolutionSequence {
    /// Map a SOL code to its handler
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            101 => Ok(SolutionSequence::Static),
            103 => Ok(SolutionSequence::Modal),
            other => Err(SolverError::UnimplementedSolution(other)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            SolutionSequence::Static => 101,
            SolutionSequence::Modal => 103,
        }
    }
}

/// Analysis configuration and control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Skip elements without a stiffness routine instead of failing
    pub skip_unsupported_elements: bool,
    /// Kbb asymmetry tolerance, relative to max |Kbb|
    pub symmetry_tolerance: f64,
    /// Compute element blocks in parallel
    pub parallel_assembly: bool,
    /// Keep at most this many modes (all when `None`)
    pub num_modes: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            skip_unsupported_elements: false,
            symmetry_tolerance: 1e-8,
            parallel_assembly: true,
            num_modes: None,
        }
    }
}

impl AnalysisConfig {
    /// Sequential assembly, for reproducing runs step by step
    pub fn serial() -> Self {
        Self {
            parallel_assembly: false,
            ..Default::default()
        }
    }

    /// Tolerate models carrying element cards the solver does not handle
    pub fn permissive() -> Self {
        Self {
            skip_unsupported_elements: true,
            ..Default::default()
        }
    }

    pub fn with_num_modes(mut self, num_modes: usize) -> Self {
        self.num_modes = Some(num_modes);
        self
    }
}

/// Result of one solved subcase
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "sequence")]
pub enum SubcaseSolution {
    Static(StaticSolution),
    Modal(ModalSolution),
}

impl SubcaseSolution {
    pub fn subcase_id(&self) -> i32 {
        match self {
            SubcaseSolution::Static(s) => s.subcase_id,
            SubcaseSolution::Modal(m) => m.subcase_id,
        }
    }

    pub fn sequence(&self) -> SolutionSequence {
        match self {
            SubcaseSolution::Static(_) => SolutionSequence::Static,
            SubcaseSolution::Modal(_) => SolutionSequence::Modal,
        }
    }

    /// Recoverable conditions recorded while solving
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            SubcaseSolution::Static(s) => &s.diagnostics,
            SubcaseSolution::Modal(m) => &m.diagnostics,
        }
    }

    pub fn as_static(&self) -> Option<&StaticSolution> {
        match self {
            SubcaseSolution::Static(s) => Some(s),
            SubcaseSolution::Modal(_) => None,
        }
    }

    pub fn as_modal(&self) -> Option<&ModalSolution> {
        match self {
            SubcaseSolution::Modal(m) => Some(m),
            SubcaseSolution::Static(_) => None,
        }
    }
}

/// Main solve orchestrator
pub struct Solver<'a> {
    model: &'a StructuralModel,
    config: AnalysisConfig,
    backend: Box<dyn SolverBackend>,
}

impl<'a> Solver<'a> {
    /// Solver with the default configuration and backend
    pub fn new(model: &'a StructuralModel) -> Self {
        Self::with_config(model, AnalysisConfig::default())
    }

    pub fn with_config(model: &'a StructuralModel, config: AnalysisConfig) -> Self {
        Self {
            model,
            config,
            backend: default_backend(),
        }
    }

    /// Replace the numerical backend
    pub fn with_backend(mut self, backend: Box<dyn SolverBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The model's solution sequence, if it has a handler
    pub fn sequence(&self) -> Result<SolutionSequence> {
        let code = self.model.sol.ok_or_else(|| {
            SolverError::Configuration("model has no solution sequence (SOL)".to_string())
        })?;
        SolutionSequence::from_code(code)
    }

    /// Solve every subcase except subcase 0, in ascending ID order.
    ///
    /// The first fatal error aborts the run; no results are returned for
    /// subcases solved before it.
    pub fn run(&self) -> Result<Vec<SubcaseSolution>> {
        let sequence = self.sequence()?;
        log::info!(
            "SOL {} ({:?}) with backend {}",
            sequence.code(),
            sequence,
            self.backend.name()
        );
        for (card, count) in self.model.card_counts() {
            log::info!("  {:<8} {}", card, count);
        }

        let subcase_ids: Vec<i32> = self
            .model
            .subcases
            .keys()
            .copied()
            .filter(|&id| id != GLOBAL_SUBCASE)
            .collect();
        if subcase_ids.is_empty() {
            log::warn!("model has no subcases to solve");
        }

        let mut solutions = Vec::with_capacity(subcase_ids.len());
        for id in subcase_ids {
            let Some(subcase) = self.model.effective_subcase(id) else {
                continue;
            };
            solutions.push(self.run_subcase(sequence, &subcase)?);
        }
        Ok(solutions)
    }

    /// Solve a single subcase with the given sequence
    pub fn run_subcase(
        &self,
        sequence: SolutionSequence,
        subcase: &Subcase,
    ) -> Result<SubcaseSolution> {
        log::debug!("subcase {}: {:?}", subcase.id, subcase.entries.keys());
        match sequence {
            SolutionSequence::Static => static_solver::solve(
                self.model,
                &self.config,
                subcase,
                self.backend.as_ref(),
            )
            .map(SubcaseSolution::Static),
            SolutionSequence::Modal => modal_solver::solve(
                self.model,
                &self.config,
                subcase,
                self.backend.as_ref(),
            )
            .map(SubcaseSolution::Modal),
        }
    }
}
