//! Single-point constraint resolution.
//!
//! Flattens the subcase's SPC selection into the constrained index set
//! (s-set) and the prescribed-displacement vector {xg}. Every entry of {xg}
//! is either [`Displacement::Unconstrained`] or a prescribed value; only zero
//! prescriptions are supported.

use dsm_model::{StructuralModel, Subcase};
use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::dof_map::DofMap;
use crate::error::{Result, SolverError};

/// State of one entry of the prescribed-displacement vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum Displacement {
    /// Free: solved for (or left unresolved)
    #[default]
    Unconstrained,
    /// Fixed to a value by an SPC
    Prescribed(f64),
}

impl Displacement {
    /// The prescribed value, if any
    pub fn value(self) -> Option<f64> {
        match self {
            Displacement::Unconstrained => None,
            Displacement::Prescribed(v) => Some(v),
        }
    }

    pub fn is_prescribed(self) -> bool {
        matches!(self, Displacement::Prescribed(_))
    }
}

/// Result of resolving a subcase's constraints
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintResolution {
    /// Sorted, de-duplicated constrained global indices
    pub sset: Vec<usize>,
    /// Prescribed-displacement vector, length ndof
    pub xg: Vec<Displacement>,
}

impl ConstraintResolution {
    /// Nothing constrained
    pub fn unconstrained(ndof: usize) -> Self {
        Self {
            sset: Vec::new(),
            xg: vec![Displacement::Unconstrained; ndof],
        }
    }

    /// Analysis set: every index of `0..ndof` not in the s-set
    pub fn aset(&self) -> Vec<usize> {
        (0..self.xg.len())
            .filter(|i| self.sset.binary_search(i).is_err())
            .collect()
    }
}

/// Resolve the SPC selection of `subcase` against the DOF map.
///
/// A subcase without SPC is not an error: a warning is recorded and nothing
/// is constrained.
pub fn build_xg(
    model: &StructuralModel,
    dof_map: &DofMap,
    subcase: &Subcase,
    diags: &mut Diagnostics,
) -> Result<ConstraintResolution> {
    let ndof = dof_map.ndof();
    let Some((spc_id, _options)) = subcase.get("SPC") else {
        diags.warn("no SPC selected; all degrees of freedom are unconstrained");
        return Ok(ConstraintResolution::unconstrained(ndof));
    };

    let mut resolution = ConstraintResolution::unconstrained(ndof);
    for spc in model.resolve_constraints(spc_id)? {
        for (node, component, value) in spc.dofs() {
            if value != 0.0 {
                return Err(SolverError::UnsupportedConstraint { node, value });
            }
            let idof = dof_map.index_of(node, component)?;
            resolution.sset.push(idof);
            resolution.xg[idof] = Displacement::Prescribed(0.0);
        }
    }

    resolution.sset.sort_unstable();
    resolution.sset.dedup();
    log::debug!(
        "SPC {} constrains {} of {} DOFs",
        spc_id,
        resolution.sset.len(),
        ndof
    );
    Ok(resolution)
}
