//! Linear static solution (SOL 101).
//!
//! ```text
//! Kaa_reduced * xa_reduced = (Fa - Kas * xs)[retained]
//! xa[retained] = xa_reduced        (dropped positions stay zero)
//! Fs = Ksa * xa + Kss * xs         (SPC forces)
//! xg = merge(xa, xs);  Fg = merge(Fa, Fs)
//! ```
//! The primary result is `xa_reduced`; the g-set vectors are provided for
//! inspection and recovery by (grid, component).

use dsm_model::{StructuralModel, Subcase};
use nalgebra::DVector;
use serde::Serialize;

use crate::analysis::AnalysisConfig;
use crate::backend::{LinearSolver, SolveInfo};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::dof_map::DofMap;
use crate::error::Result;
use crate::loads::build_fb;
use crate::partition::{gather_vector, merge_vector, partition_vector};
use crate::reduction::ReducedSystem;

/// Results of one static subcase
#[derive(Debug, Clone, Serialize)]
pub struct StaticSolution {
    pub subcase_id: i32,
    pub dof_map: DofMap,
    /// Analysis global indices
    pub aset: Vec<usize>,
    /// Constrained global indices
    pub sset: Vec<usize>,
    /// A-set positions kept by the rank filter
    pub retained: Vec<usize>,
    /// Displacements on the retained a-set positions
    pub xa_reduced: DVector<f64>,
    /// Displacements on the full a-set
    pub xa: DVector<f64>,
    /// Displacements on the g-set
    pub xg: DVector<f64>,
    /// Applied loads on the a-set and SPC forces on the s-set
    pub fg: DVector<f64>,
    /// SPC forces, in s-set order
    pub spc_forces: DVector<f64>,
    /// Backend report; `None` when nothing was left to solve
    pub solve_info: Option<SolveInfo>,
    pub diagnostics: Vec<Diagnostic>,
}

impl StaticSolution {
    /// Displacement of one (grid, component), if the grid is in the model
    pub fn displacement(&self, node: i32, component: u8) -> Option<f64> {
        self.dof_map.get(node, component).map(|i| self.xg[i])
    }

    /// Force (applied or SPC) at one (grid, component)
    pub fn force(&self, node: i32, component: u8) -> Option<f64> {
        self.dof_map.get(node, component).map(|i| self.fg[i])
    }

    /// Sum of the SPC forces per component (1..=6)
    pub fn spc_resultant(&self) -> [f64; 6] {
        let mut total = [0.0; 6];
        for (&i, force) in self.sset.iter().zip(self.spc_forces.iter()) {
            if let Some(dof) = self.dof_map.dof(i) {
                total[(dof.component - 1) as usize] += force;
            }
        }
        total
    }
}

/// Run the static procedure for one subcase
pub fn solve<B: LinearSolver + ?Sized>(
    model: &StructuralModel,
    config: &AnalysisConfig,
    subcase: &Subcase,
    backend: &B,
) -> Result<StaticSolution> {
    let mut diags = Diagnostics::new(subcase.id);
    let system = ReducedSystem::build(model, config, subcase, &mut diags)?;
    let ndof = system.ndof();
    let sets = ReducedSystem::sets(&system.aset, &system.sset);

    // basic frame only, so Fg = Fb
    let fb = build_fb(model, &system.dof_map, subcase, &mut diags)?;
    let mut parts = partition_vector(&fb, &sets);
    let fs_applied = parts.remove(1);
    let fa = parts.remove(0);
    let xs = system.xs();

    let rhs = &fa - &system.kas * &xs;
    for position in system.dropped() {
        if rhs[position] != 0.0 {
            if let Some(dof) = system.dof_map.dof(system.aset[position]) {
                diags.warn(format!(
                    "load {:.6e} on grid {} component {} has no stiffness and is ignored",
                    rhs[position], dof.node, dof.component
                ));
            }
        }
    }
    if fs_applied.amax() > 0.0 {
        diags.info("loads applied on constrained DOFs are reacted directly");
    }

    let fa_reduced = gather_vector(&rhs, &system.retained);
    let (xa_reduced, solve_info) = if system.retained.is_empty() {
        diags.warn("analysis set is empty after rank filtering; nothing to solve");
        (DVector::zeros(0), None)
    } else {
        let (u, info) = backend.solve_linear(&system.kaa_reduced, &fa_reduced)?;
        log::debug!(
            "{}: order {} residual {:?}",
            info.solver_name,
            info.order,
            info.residual_norm
        );
        (u, Some(info))
    };

    let xa = system.expand_reduced(&xa_reduced);
    let spc_forces = &system.ksa * &xa + &system.kss * &xs;
    let xg = merge_vector(ndof, &sets, &[xa.clone(), xs]);
    let fg = merge_vector(ndof, &sets, &[fa, spc_forces.clone()]);

    log::debug!("xa_reduced = {:?}", xa_reduced.as_slice());
    log::info!(
        "subcase {}: static solve of {} DOFs ({} retained), max |x| = {:.6e}",
        subcase.id,
        ndof,
        system.retained.len(),
        xg.amax()
    );

    Ok(StaticSolution {
        subcase_id: subcase.id,
        aset: system.aset.clone(),
        sset: system.sset.clone(),
        retained: system.retained.clone(),
        dof_map: system.dof_map,
        xa_reduced,
        xa,
        xg,
        fg,
        spc_forces,
        solve_info,
        diagnostics: diags.into_vec(),
    })
}
