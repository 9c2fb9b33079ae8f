//! Bulk data: grid points, materials, properties and elements.
//!
//! Only the cards the solver core knows how to consume carry typed data.
//! Anything else is kept as [`ElementKind::Unsupported`] so the solver can
//! decide whether to reject or skip it.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A grid point in the basic coordinate frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Grid ID
    pub id: i32,
    /// Position in the basic frame
    pub xyz: [f64; 3],
}

impl Grid {
    /// Create a new grid point
    pub fn new(id: i32, x: f64, y: f64, z: f64) -> Self {
        Self { id, xyz: [x, y, z] }
    }

    /// Get the position
    pub fn position(&self) -> [f64; 3] {
        self.xyz
    }
}

/// Isotropic material (MAT1)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    /// Material ID
    pub id: i32,
    /// Young's modulus
    #[serde(default)]
    pub e: Option<f64>,
    /// Shear modulus
    #[serde(default)]
    pub g: Option<f64>,
    /// Poisson's ratio
    #[serde(default)]
    pub nu: Option<f64>,
    /// Mass density; modal runs report it as ignored (no mass assembly)
    #[serde(default)]
    pub rho: Option<f64>,
}

impl Material {
    /// Create a material from Young's modulus and Poisson's ratio
    pub fn new(id: i32, e: f64, nu: f64) -> Self {
        Self {
            id,
            e: Some(e),
            g: None,
            nu: Some(nu),
            rho: None,
        }
    }

    /// Young's modulus, derived from G and ν when not given
    pub fn youngs_modulus(&self) -> f64 {
        match (self.e, self.g, self.nu) {
            (Some(e), _, _) => e,
            (None, Some(g), Some(nu)) => 2.0 * (1.0 + nu) * g,
            _ => 0.0,
        }
    }

    /// Shear modulus, derived from E and ν when not given
    pub fn shear_modulus(&self) -> f64 {
        match (self.e, self.g, self.nu) {
            (_, Some(g), _) => g,
            (Some(e), None, Some(nu)) => e / (2.0 * (1.0 + nu)),
            _ => 0.0,
        }
    }
}

/// Element property cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Property {
    /// Rod property: area and torsion constant
    Prod { id: i32, mid: i32, a: f64, j: f64 },
    /// Tube property: outer diameter and wall thickness (0 = solid)
    Ptube { id: i32, mid: i32, od: f64, t: f64 },
    /// Scalar spring property
    Pelas { id: i32, k: f64 },
}

impl Property {
    /// Property ID
    pub fn id(&self) -> i32 {
        match self {
            Property::Prod { id, .. } | Property::Ptube { id, .. } | Property::Pelas { id, .. } => {
                *id
            }
        }
    }

    /// Card name
    pub fn card(&self) -> &'static str {
        match self {
            Property::Prod { .. } => "PROD",
            Property::Ptube { .. } => "PTUBE",
            Property::Pelas { .. } => "PELAS",
        }
    }
}

/// Tube cross-section area and polar moment from outer diameter and wall
/// thickness. A thickness of zero (or one reaching the centre) is a solid bar.
pub fn tube_section(od: f64, t: f64) -> (f64, f64) {
    let id = if t <= 0.0 { 0.0 } else { (od - 2.0 * t).max(0.0) };
    let area = std::f64::consts::PI * (od * od - id * id) / 4.0;
    let j = std::f64::consts::PI * (od.powi(4) - id.powi(4)) / 32.0;
    (area, j)
}

/// Element kind tag with kind-specific data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ElementKind {
    /// Scalar spring with a PELAS property
    Celas1 { pid: i32, components: [u8; 2] },
    /// Scalar spring with inline stiffness
    Celas2 { k: f64, components: [u8; 2] },
    /// Axial/torsion rod with a PROD property
    Crod { pid: i32 },
    /// Rod with inline section properties
    Conrod { mid: i32, a: f64, j: f64 },
    /// Tube with a PTUBE property
    Ctube { pid: i32 },
    /// Any card without a stiffness routine in the solver
    Unsupported { card: String },
}

/// An element of the structural model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element ID
    pub id: i32,
    /// Connected grid IDs, in card order
    pub nodes: Vec<i32>,
    /// Kind tag and kind-specific data
    pub kind: ElementKind,
}

impl Element {
    /// Create a new element
    pub fn new(id: i32, kind: ElementKind, nodes: Vec<i32>) -> Self {
        Self { id, nodes, kind }
    }

    /// Card name of this element (e.g. `CROD`)
    pub fn card(&self) -> &str {
        match &self.kind {
            ElementKind::Celas1 { .. } => "CELAS1",
            ElementKind::Celas2 { .. } => "CELAS2",
            ElementKind::Crod { .. } => "CROD",
            ElementKind::Conrod { .. } => "CONROD",
            ElementKind::Ctube { .. } => "CTUBE",
            ElementKind::Unsupported { card } => card.as_str(),
        }
    }

    /// Expected number of nodes, if the kind fixes it
    pub fn expected_nodes(&self) -> Option<usize> {
        match self.kind {
            ElementKind::Unsupported { .. } => None,
            _ => Some(2),
        }
    }

    /// Validate that the element has the correct number of nodes
    pub fn validate(&self) -> Result<()> {
        if let Some(expected) = self.expected_nodes() {
            if self.nodes.len() != expected {
                return Err(ModelError::NodeCount {
                    eid: self.id,
                    expected,
                    actual: self.nodes.len(),
                });
            }
        }
        Ok(())
    }

    /// The two end grids of a two-node element
    pub fn end_nodes(&self) -> Result<(i32, i32)> {
        match self.nodes.as_slice() {
            [n1, n2] => Ok((*n1, *n2)),
            other => Err(ModelError::NodeCount {
                eid: self.id,
                expected: 2,
                actual: other.len(),
            }),
        }
    }
}

/// Cross-referenced rod section: everything a rod stiffness needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodSection {
    /// Cross-sectional area
    pub area: f64,
    /// Torsion constant
    pub torsion_constant: f64,
    /// Young's modulus
    pub youngs_modulus: f64,
    /// Shear modulus
    pub shear_modulus: f64,
}
