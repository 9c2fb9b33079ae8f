//! Numerical backend abstraction layer.
//!
//! ```text
//! Element library (nalgebra DMatrix, small and dense)
//!         │
//!         ▼
//! Assembly + partition + rank filter (dense Kaa_reduced, Fa_reduced)
//!         │
//!         ▼
//! Backend traits (LinearSolver, EigenSolver)
//!         │
//!         ▼
//!   DenseBackend
//! ```

pub mod dense;
pub mod traits;

pub use dense::DenseBackend;
pub use traits::*;

/// Returns the default solver backend.
pub fn default_backend() -> Box<dyn SolverBackend> {
    Box::new(DenseBackend)
}
