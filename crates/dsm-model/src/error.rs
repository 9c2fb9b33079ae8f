//! Error types for dsm-model

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Grid {0} not found")]
    MissingGrid(i32),

    #[error("Property {pid} referenced by element {eid} not found")]
    MissingProperty { eid: i32, pid: i32 },

    #[error("Property {pid} is a {found}, expected {expected}")]
    WrongPropertyType {
        pid: i32,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Material {0} not found")]
    MissingMaterial(i32),

    #[error("Constraint set {0} not found")]
    MissingConstraintSet(i32),

    #[error("Load set {0} not found")]
    MissingLoadSet(i32),

    #[error("Cyclic reference through {kind} set {id}")]
    CyclicSet { kind: &'static str, id: i32 },

    #[error("Element {eid} has {actual} nodes but expected {expected}")]
    NodeCount {
        eid: i32,
        expected: usize,
        actual: usize,
    },
}
