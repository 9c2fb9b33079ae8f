//! Element stiffness library.
//!
//! Each supported element family has one pure routine mapping an element
//! (plus the model for cross-references) to a local stiffness block and the
//! (grid, component) pairs its rows/columns belong to. Scattering into the
//! global matrix is left to [`crate::assembly`].

use dsm_model::{Element, ElementKind, StructuralModel};
use nalgebra::DMatrix;

use crate::dof_map::DofId;
use crate::error::Result;

pub mod rod;
pub mod spring;

/// Local stiffness block of one element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStiffness {
    /// Element ID
    pub eid: i32,
    /// Square block, one row/column per entry of `dofs`
    pub matrix: DMatrix<f64>,
    /// Target (grid, component) of each row/column
    pub dofs: Vec<DofId>,
}

impl ElementStiffness {
    /// Largest |k_ij - k_ji| in the block
    pub fn max_asymmetry(&self) -> f64 {
        (&self.matrix - self.matrix.transpose()).amax()
    }
}

/// Element families with a stiffness routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementFamily {
    /// CELAS1, CELAS2
    Spring,
    /// CROD, CONROD, CTUBE
    Rod,
}

/// Signature shared by every element stiffness routine. `Ok(None)` means the
/// element contributes nothing (e.g. zero axial and torsional stiffness).
pub type StiffnessFn = fn(&StructuralModel, &Element) -> Result<Option<ElementStiffness>>;

/// Stiffness routine per family
pub const ELEMENT_LIBRARY: [(ElementFamily, StiffnessFn); 2] = [
    (ElementFamily::Spring, spring::stiffness),
    (ElementFamily::Rod, rod::stiffness),
];

impl ElementFamily {
    /// Family of an element kind, `None` when unsupported
    pub fn of(kind: &ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Celas1 { .. } | ElementKind::Celas2 { .. } => Some(Self::Spring),
            ElementKind::Crod { .. } | ElementKind::Conrod { .. } | ElementKind::Ctube { .. } => {
                Some(Self::Rod)
            }
            ElementKind::Unsupported { .. } => None,
        }
    }
}

/// Stiffness routine for an element, `None` when its kind is unsupported
pub fn routine_for(element: &Element) -> Option<StiffnessFn> {
    let family = ElementFamily::of(&element.kind)?;
    ELEMENT_LIBRARY
        .iter()
        .find(|(registered, _)| *registered == family)
        .map(|(_, routine)| *routine)
}
