//! Direct stiffness solver core.
//!
//! Assembles a dense global stiffness matrix from scalar springs and
//! rod-like elements, applies single-point constraints and concentrated
//! loads, and solves either linear statics (SOL 101) or normal modes
//! (SOL 103) for every subcase of a [`StructuralModel`].
//!
//! ```no_run
//! use dsm_model::StructuralModel;
//!
//! # fn example(model: StructuralModel) -> dsm_solver::Result<()> {
//! for solution in dsm_solver::run(&model)? {
//!     if let Some(s) = solution.as_static() {
//!         println!("subcase {}: u(2,T1) = {:?}", s.subcase_id, s.displacement(2, 1));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use dsm_model::StructuralModel;

pub mod analysis;
pub mod assembly;
pub mod backend;
pub mod boundary_conditions;
pub mod diagnostics;
pub mod dof_map;
pub mod elements;
pub mod error;
pub mod loads;
pub mod modal_solver;
pub mod partition;
pub mod rank_filter;
pub mod reduction;
pub mod static_solver;

pub use analysis::{AnalysisConfig, SolutionSequence, Solver, SubcaseSolution};
pub use assembly::GlobalStiffness;
pub use backend::{
    default_backend, BackendError, DenseBackend, EigenResult, EigenSolver, LinearSolver,
    SolveInfo, SolverBackend,
};
pub use boundary_conditions::{build_xg, ConstraintResolution, Displacement};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use dof_map::{DofId, DofMap, DOFS_PER_GRID};
pub use elements::{ElementFamily, ElementStiffness};
pub use error::{Result, SolverError};
pub use loads::build_fb;
pub use modal_solver::ModalSolution;
pub use partition::{partition_matrix, partition_vector};
pub use rank_filter::remove_rows;
pub use reduction::ReducedSystem;
pub use static_solver::StaticSolution;

/// Solve every subcase of `model` with the default configuration
pub fn run(model: &StructuralModel) -> Result<Vec<SubcaseSolution>> {
    Solver::new(model).run()
}
