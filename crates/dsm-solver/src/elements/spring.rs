//! Scalar spring elements (CELAS1, CELAS2).
//!
//! A spring of rate k joins one component of each of its two grids:
//! ```text
//! k_local = k * [ 1  -1]
//!               [-1   1]
//! ```
//! No geometry is involved, so the block is already global.

use dsm_model::{Element, StructuralModel};
use nalgebra::DMatrix;

use crate::dof_map::DofId;
use crate::elements::ElementStiffness;
use crate::error::{Result, SolverError};

/// Local 2×2 spring block
pub fn local_stiffness(k: f64) -> DMatrix<f64> {
    DMatrix::from_row_slice(2, 2, &[k, -k, -k, k])
}

/// Stiffness routine for the spring family
pub fn stiffness(model: &StructuralModel, element: &Element) -> Result<Option<ElementStiffness>> {
    let (k, [c1, c2]) =
        model
            .spring_rate(element)?
            .ok_or_else(|| SolverError::UnsupportedElement {
                eid: element.id,
                card: element.card().to_string(),
            })?;
    let (n1, n2) = element.end_nodes()?;

    if k == 0.0 {
        return Ok(None);
    }

    Ok(Some(ElementStiffness {
        eid: element.id,
        matrix: local_stiffness(k),
        dofs: vec![DofId::new(n1, c1), DofId::new(n2, c2)],
    }))
}
