//! Normal modes (SOL 103).
//!
//! Shares assembly, constraint resolution and rank filtering with the static
//! procedure, then decomposes the reduced stiffness:
//! ```text
//! Kaa_reduced * phi = lambda * phi
//! f = sqrt(lambda) / (2*pi)
//! ```
//!
//! # Known limitation
//! No mass matrix is assembled. The eigenproblem is solved against a unit
//! (identity) mass, so eigenvalues carry stiffness units and the reported
//! frequencies are only meaningful for unit-mass models. There is no SPC
//! force recovery for modes.

use std::f64::consts::PI;

use dsm_model::{StructuralModel, Subcase};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::analysis::AnalysisConfig;
use crate::backend::{EigenSolver, SolveInfo};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::dof_map::DofMap;
use crate::error::Result;
use crate::partition::gather_matrix;
use crate::reduction::ReducedSystem;

/// Results of one modal subcase
#[derive(Debug, Clone, Serialize)]
pub struct ModalSolution {
    pub subcase_id: i32,
    pub dof_map: DofMap,
    pub aset: Vec<usize>,
    pub sset: Vec<usize>,
    pub retained: Vec<usize>,
    /// Eigenvalues, ascending
    pub eigenvalues: Vec<f64>,
    /// Frequencies under the unit-mass placeholder, in Hz
    pub frequencies_hz: Vec<f64>,
    /// Mode shapes over the retained a-set positions (one column per mode)
    pub eigenvectors_reduced: DMatrix<f64>,
    /// Mode shapes over the g-set (num_dofs × num_modes)
    pub eigenvectors: DMatrix<f64>,
    pub solve_info: Option<SolveInfo>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ModalSolution {
    pub fn num_modes(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Get the i-th mode shape over the g-set
    pub fn mode_shape(&self, mode_index: usize) -> Option<DVector<f64>> {
        if mode_index >= self.num_modes() {
            return None;
        }
        Some(self.eigenvectors.column(mode_index).into_owned())
    }

    /// Component of one mode at a (grid, component)
    pub fn mode_component(&self, mode_index: usize, node: i32, component: u8) -> Option<f64> {
        let i = self.dof_map.get(node, component)?;
        (mode_index < self.num_modes()).then(|| self.eigenvectors[(i, mode_index)])
    }
}

/// Unit mass standing in for Mgg, reduced to the retained a-set positions
/// the same way as the stiffness
pub fn placeholder_mass(system: &ReducedSystem) -> DMatrix<f64> {
    let mgg = DMatrix::identity(system.ndof(), system.ndof());
    let retained: Vec<usize> = system.retained.iter().map(|&p| system.aset[p]).collect();
    gather_matrix(&mgg, &retained, &retained)
}

/// sqrt(lambda) / 2pi, zero for non-positive eigenvalues
pub fn frequency_hz(lambda: f64) -> f64 {
    if lambda > 0.0 {
        lambda.sqrt() / (2.0 * PI)
    } else {
        0.0
    }
}

/// Run the modal procedure for one subcase
pub fn solve<B: EigenSolver + ?Sized>(
    model: &StructuralModel,
    config: &AnalysisConfig,
    subcase: &Subcase,
    backend: &B,
) -> Result<ModalSolution> {
    let mut diags = Diagnostics::new(subcase.id);
    let system = ReducedSystem::build(model, config, subcase, &mut diags)?;
    let maa_reduced = placeholder_mass(&system);
    diags.info(format!(
        "mass matrix not assembled; modes use a unit mass placeholder of order {}",
        maa_reduced.nrows()
    ));
    let dense_materials: Vec<i32> = model
        .materials
        .values()
        .filter(|m| m.rho.is_some_and(|rho| rho != 0.0))
        .map(|m| m.id)
        .collect();
    if !dense_materials.is_empty() {
        diags.warn(format!(
            "density on materials {:?} is ignored by the unit mass placeholder",
            dense_materials
        ));
    }

    let (mut eigenvalues, mut phi, solve_info) = if system.retained.is_empty() {
        diags.warn("analysis set is empty after rank filtering; no modes");
        (Vec::new(), DMatrix::zeros(0, 0), None)
    } else {
        // TODO: solve the generalized problem (Kaa_reduced, Maa_reduced) once
        // element mass matrices exist; with Maa_reduced = I this is the same
        let (result, info) = backend.solve_symmetric_eigen(&system.kaa_reduced)?;
        (result.eigenvalues, result.eigenvectors, Some(info))
    };

    if let Some(limit) = config.num_modes {
        if limit < eigenvalues.len() {
            eigenvalues.truncate(limit);
            phi = phi.columns(0, limit).into_owned();
        }
    }

    let num_modes = eigenvalues.len();
    let mut eigenvectors = DMatrix::zeros(system.ndof(), num_modes);
    for mode in 0..num_modes {
        for (row, &position) in system.retained.iter().enumerate() {
            eigenvectors[(system.aset[position], mode)] = phi[(row, mode)];
        }
    }

    let frequencies_hz: Vec<f64> = eigenvalues.iter().map(|&l| frequency_hz(l)).collect();
    log::info!(
        "subcase {}: {} modes from {} retained DOFs",
        subcase.id,
        num_modes,
        system.retained.len()
    );
    log::debug!("eigenvalues = {:?}", eigenvalues);

    Ok(ModalSolution {
        subcase_id: subcase.id,
        aset: system.aset.clone(),
        sset: system.sset.clone(),
        retained: system.retained.clone(),
        dof_map: system.dof_map,
        eigenvalues,
        frequencies_hz,
        eigenvectors_reduced: phi,
        eigenvectors,
        solve_info,
        diagnostics: diags.into_vec(),
    })
}
