//! Backend trait definitions for the dense numerical core.
//!
//! The procedures only need two operations on the reduced analysis-set
//! system: a direct linear solve and a symmetric eigendecomposition. Element
//! blocks and partitioning stay in nalgebra regardless of the backend.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use thiserror::Error;

/// Error type for backend operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl From<&str> for BackendError {
    fn from(s: &str) -> Self {
        BackendError(s.to_string())
    }
}

/// Eigenpairs of a symmetric matrix.
#[derive(Debug, Clone)]
pub struct EigenResult {
    /// Eigenvalues, sorted ascending
    pub eigenvalues: Vec<f64>,
    /// Eigenvectors as columns, in the order of `eigenvalues`
    pub eigenvectors: DMatrix<f64>,
}

/// Solver diagnostic info.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveInfo {
    /// Human-readable solver name (e.g., "nalgebra-LU")
    pub solver_name: String,
    /// Order of the system that was solved
    pub order: usize,
    /// ||K u - F|| for linear solves
    pub residual_norm: Option<f64>,
}

/// Trait for a linear solver backend.
pub trait LinearSolver: Send + Sync {
    /// Solve K * u = F
    fn solve_linear(
        &self,
        k: &DMatrix<f64>,
        f: &DVector<f64>,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError>;
}

/// Trait for a symmetric eigenvalue backend.
pub trait EigenSolver: Send + Sync {
    /// All eigenpairs of the symmetric matrix K, ascending
    fn solve_symmetric_eigen(
        &self,
        k: &DMatrix<f64>,
    ) -> Result<(EigenResult, SolveInfo), BackendError>;
}

/// Combined backend providing both solvers.
pub trait SolverBackend: LinearSolver + EigenSolver {
    /// Human-readable name of this backend.
    fn name(&self) -> &str;
}
