//! Dense backend on nalgebra.
//!
//! - LU with partial pivoting for the static solve
//! - `SymmetricEigen` for the modal solve, pairs re-sorted ascending

use nalgebra::{DMatrix, DVector, SymmetricEigen};

use super::traits::*;

/// Smallest accepted min|Uii| / max|Uii| of the LU factor. Rank-deficient
/// stiffness (e.g. a lone inclined rod) leaves rounding-level pivots.
pub const PIVOT_RATIO_TOLERANCE: f64 = 1e-12;

/// Largest accepted ||K u - F|| / ||F||
pub const RESIDUAL_TOLERANCE: f64 = 1e-8;

/// Pure-Rust dense backend. Suitable for the small systems a dense
/// direct-stiffness model produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseBackend;

impl LinearSolver for DenseBackend {
    fn solve_linear(
        &self,
        k: &DMatrix<f64>,
        f: &DVector<f64>,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError> {
        if !k.is_square() || k.nrows() != f.len() {
            return Err(BackendError(format!(
                "dimension mismatch: K is {}x{}, F has {} rows",
                k.nrows(),
                k.ncols(),
                f.len()
            )));
        }

        let lu = k.clone().lu();
        let pivots = lu.u().diagonal();
        let (smallest, largest) = (pivots.amin(), pivots.amax());
        if largest == 0.0 || smallest / largest < PIVOT_RATIO_TOLERANCE {
            return Err(BackendError(format!(
                "Singular matrix in LU decomposition: pivot ratio {:.3e}",
                if largest == 0.0 { 0.0 } else { smallest / largest }
            )));
        }

        let u = lu
            .solve(f)
            .ok_or(BackendError::from("Singular matrix in LU decomposition"))?;

        if u.iter().any(|v| !v.is_finite()) {
            return Err("LU solve produced non-finite displacements".into());
        }

        let residual = (k * &u - f).norm();
        let scale = f.norm();
        if scale > 0.0 && residual / scale > RESIDUAL_TOLERANCE {
            return Err(BackendError(format!(
                "Singular matrix in LU decomposition: relative residual {:.3e}",
                residual / scale
            )));
        }

        Ok((
            u,
            SolveInfo {
                solver_name: "nalgebra-LU".to_string(),
                order: k.nrows(),
                residual_norm: Some(residual),
            },
        ))
    }
}

impl EigenSolver for DenseBackend {
    fn solve_symmetric_eigen(
        &self,
        k: &DMatrix<f64>,
    ) -> Result<(EigenResult, SolveInfo), BackendError> {
        if !k.is_square() {
            return Err(BackendError(format!(
                "eigenproblem needs a square matrix, got {}x{}",
                k.nrows(),
                k.ncols()
            )));
        }
        let n = k.nrows();

        let eigen = SymmetricEigen::try_new(k.clone(), f64::EPSILON, 0)
            .ok_or(BackendError::from("Symmetric eigendecomposition did not converge"))?;

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let eigenvalues = order.iter().map(|&i| eigen.eigenvalues[i]).collect();
        let mut eigenvectors = DMatrix::zeros(n, n);
        for (mode, &i) in order.iter().enumerate() {
            eigenvectors.set_column(mode, &eigen.eigenvectors.column(i));
        }

        Ok((
            EigenResult {
                eigenvalues,
                eigenvectors,
            },
            SolveInfo {
                solver_name: "nalgebra-SymmetricEigen".to_string(),
                order: n,
                residual_norm: None,
            },
        ))
    }
}

impl SolverBackend for DenseBackend {
    fn name(&self) -> &str {
        "dense (nalgebra)"
    }
}
