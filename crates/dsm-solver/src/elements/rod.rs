//! Rod-like elements (CROD, CONROD, CTUBE): axial and torsional stiffness.
//!
//! Both actions use the same one-axis, two-node local model:
//! ```text
//! k_axial   = A*E/L
//! k_torsion = G*J/L
//! k_local   = [ 1  -1]
//!             [-1   1]
//! ```
//! and the same transformation onto three global components per grid:
//! ```text
//! T = [l  m  n  0  0  0]
//!     [0  0  0  l  m  n]
//! ```
//! where (l, m, n) are the direction cosines of the element axis. The axial
//! block lands on T1-T3 of both grids, the torsion block on R1-R3. The two
//! actions are uncoupled.

use dsm_model::{Element, StructuralModel};
use nalgebra::DMatrix;

use crate::dof_map::DofId;
use crate::elements::ElementStiffness;
use crate::error::{Result, SolverError};

const TRANSLATIONS: [u8; 3] = [1, 2, 3];
const ROTATIONS: [u8; 3] = [4, 5, 6];

/// Direction cosines of the axis vector. Zero length is fatal.
pub fn direction_cosines(eid: i32, axis: [f64; 3]) -> Result<[f64; 3]> {
    let length = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
    if length == 0.0 || !length.is_finite() {
        return Err(SolverError::SingularGeometry { eid });
    }
    Ok(axis.map(|d| d / length))
}

/// 2×6 transformation from the local axis to three global components per grid
pub fn transformation_matrix([l, m, n]: [f64; 3]) -> DMatrix<f64> {
    let mut t = DMatrix::zeros(2, 6);
    t[(0, 0)] = l;
    t[(0, 1)] = m;
    t[(0, 2)] = n;
    t[(1, 3)] = l;
    t[(1, 4)] = m;
    t[(1, 5)] = n;
    t
}

/// Unit-stiffness 6×6 block: T^T * [[1, -1], [-1, 1]] * T
pub fn unit_global_stiffness(cosines: [f64; 3]) -> DMatrix<f64> {
    let k_local = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
    let t = transformation_matrix(cosines);
    t.transpose() * k_local * t
}

fn dofs_for(n1: i32, n2: i32, components: [u8; 3]) -> impl Iterator<Item = DofId> {
    components
        .into_iter()
        .map(move |c| DofId::new(n1, c))
        .chain(components.into_iter().map(move |c| DofId::new(n2, c)))
}

/// Stiffness routine for the rod family
pub fn stiffness(model: &StructuralModel, element: &Element) -> Result<Option<ElementStiffness>> {
    let section =
        model
            .rod_section(element)?
            .ok_or_else(|| SolverError::UnsupportedElement {
                eid: element.id,
                card: element.card().to_string(),
            })?;
    let (n1, n2) = element.end_nodes()?;

    let axis = model.element_axis(element)?;
    let cosines = direction_cosines(element.id, axis)?;
    let length = model.element_length(element)?;

    let k_axial = section.area * section.youngs_modulus / length;
    let k_torsion = section.shear_modulus * section.torsion_constant / length;
    let unit = unit_global_stiffness(cosines);

    let (matrix, dofs): (DMatrix<f64>, Vec<DofId>) = match (k_axial != 0.0, k_torsion != 0.0) {
        (false, false) => return Ok(None),
        (true, false) => (unit * k_axial, dofs_for(n1, n2, TRANSLATIONS).collect()),
        (false, true) => (unit * k_torsion, dofs_for(n1, n2, ROTATIONS).collect()),
        (true, true) => {
            let mut k = DMatrix::zeros(12, 12);
            k.view_mut((0, 0), (6, 6)).copy_from(&(&unit * k_axial));
            k.view_mut((6, 6), (6, 6)).copy_from(&(&unit * k_torsion));
            let dofs = dofs_for(n1, n2, TRANSLATIONS)
                .chain(dofs_for(n1, n2, ROTATIONS))
                .collect();
            (k, dofs)
        }
    };

    Ok(Some(ElementStiffness {
        eid: element.id,
        matrix,
        dofs,
    }))
}
