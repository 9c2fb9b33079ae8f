//! Single-point constraint sets (SPC, SPC1, SPCADD).

use serde::{Deserialize, Serialize};

/// An atomic single-point constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Constraint {
    /// Fix the listed components of every listed grid to zero
    Spc1 { components: Vec<u8>, nodes: Vec<i32> },
    /// Fix the listed components of one grid to an enforced value
    Spc {
        node: i32,
        components: Vec<u8>,
        #[serde(default)]
        enforced: f64,
    },
}

impl Constraint {
    /// Zero-valued SPC1 over several grids
    pub fn spc1(components: &[u8], nodes: &[i32]) -> Self {
        Constraint::Spc1 {
            components: components.to_vec(),
            nodes: nodes.to_vec(),
        }
    }

    /// Card name
    pub fn card(&self) -> &'static str {
        match self {
            Constraint::Spc1 { .. } => "SPC1",
            Constraint::Spc { .. } => "SPC",
        }
    }

    /// All (grid, component, prescribed value) triples named by this card
    pub fn dofs(&self) -> Vec<(i32, u8, f64)> {
        match self {
            Constraint::Spc1 { components, nodes } => nodes
                .iter()
                .flat_map(|&nid| components.iter().map(move |&c| (nid, c, 0.0)))
                .collect(),
            Constraint::Spc {
                node,
                components,
                enforced,
            } => components.iter().map(|&c| (*node, c, *enforced)).collect(),
        }
    }
}

/// A constraint set: either a list of atomic constraints or a combination
/// of other sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ConstraintSet {
    /// Atomic constraints sharing one set ID
    Atomic { constraints: Vec<Constraint> },
    /// SPCADD: union of other sets
    SpcAdd { sets: Vec<i32> },
}
