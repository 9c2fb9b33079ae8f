//! Error types for dsm-solver

use dsm_model::ModelError;
use thiserror::Error;

use crate::backend::BackendError;

pub type Result<T> = std::result::Result<T, SolverError>;

/// Fatal solver errors. Each one aborts the subcase being solved; the only
/// recoverable condition (a subcase without SPC) is reported as a
/// [`Diagnostic`](crate::diagnostics::Diagnostic) instead.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported element type {card} (element {eid})")]
    UnsupportedElement { eid: i32, card: String },

    #[error("Unimplemented load type: {card}")]
    UnimplementedLoadKind { card: String },

    #[error("Enforced displacement {value} on grid {node} is not supported (only zero-valued SPCs)")]
    UnsupportedConstraint { node: i32, value: f64 },

    #[error("Element {eid} has zero length (coincident end grids)")]
    SingularGeometry { eid: i32 },

    #[error("No degree of freedom for grid {node} component {component}")]
    ModelInconsistency { node: i32, component: u8 },

    #[error("Unimplemented solution sequence: SOL {0}")]
    UnimplementedSolution(i32),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}
