//! Steps shared by every solution sequence.
//!
//! ```text
//! 1. Kbb = assemble(model);  Kgg = Kbb (basic frame only)
//! 2. (sset, xg) = constraints(subcase);  aset = gset - sset
//! 3. [Kgg] -> Kaa, Kas, Ksa, Kss
//! 4. Kaa_reduced, retained = remove_rows(Kaa)
//! ```
//! Every call builds a fresh system; nothing is shared between subcases.

use dsm_model::{StructuralModel, Subcase};
use nalgebra::{DMatrix, DVector};

use crate::analysis::AnalysisConfig;
use crate::assembly::GlobalStiffness;
use crate::boundary_conditions::{build_xg, Displacement};
use crate::diagnostics::Diagnostics;
use crate::dof_map::DofMap;
use crate::error::Result;
use crate::partition::{partition_matrix, IndexSet};
use crate::rank_filter::remove_rows;

const A: &str = "a";
const S: &str = "s";

/// The g-set system split into analysis and constrained parts
#[derive(Debug, Clone)]
pub struct ReducedSystem {
    pub dof_map: DofMap,
    /// Constrained global indices, ascending
    pub sset: Vec<usize>,
    /// Analysis global indices, ascending
    pub aset: Vec<usize>,
    /// Prescribed-displacement state for every g-set index
    pub xg: Vec<Displacement>,
    pub kaa: DMatrix<f64>,
    pub kas: DMatrix<f64>,
    pub ksa: DMatrix<f64>,
    pub kss: DMatrix<f64>,
    /// Kaa restricted to `retained`
    pub kaa_reduced: DMatrix<f64>,
    /// Positions within the a-set that carry stiffness
    pub retained: Vec<usize>,
}

impl ReducedSystem {
    /// Assemble, constrain, partition and rank-filter for one subcase
    pub fn build(
        model: &StructuralModel,
        config: &AnalysisConfig,
        subcase: &Subcase,
        diags: &mut Diagnostics,
    ) -> Result<Self> {
        let kbb = GlobalStiffness::assemble(model, config, diags)?;
        let dof_map = kbb.dof_map.clone();
        let kgg = kbb.basic_to_global();

        let constraints = build_xg(model, &dof_map, subcase, diags)?;
        let aset = constraints.aset();
        let sset = constraints.sset;

        let mut blocks = partition_matrix(&kgg, &Self::sets(&aset, &sset));
        let mut take = |row: &str, col: &str| {
            blocks
                .remove(&(row.to_string(), col.to_string()))
                .unwrap_or_else(|| DMatrix::zeros(0, 0))
        };
        let kaa = take(A, A);
        let kas = take(A, S);
        let ksa = take(S, A);
        let kss = take(S, S);

        let (kaa_reduced, retained) = remove_rows(&kaa);
        log::debug!(
            "ndof={} aset={} sset={} retained={}",
            dof_map.ndof(),
            aset.len(),
            sset.len(),
            retained.len()
        );

        Ok(Self {
            dof_map,
            sset,
            aset,
            xg: constraints.xg,
            kaa,
            kas,
            ksa,
            kss,
            kaa_reduced,
            retained,
        })
    }

    /// The {a, s} split in the order used for every partition
    pub fn sets<'a>(aset: &'a [usize], sset: &'a [usize]) -> [IndexSet<'a>; 2] {
        [(A, aset), (S, sset)]
    }

    /// Number of g-set degrees of freedom
    pub fn ndof(&self) -> usize {
        self.dof_map.ndof()
    }

    /// Prescribed values on the s-set
    pub fn xs(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.sset.len(),
            self.sset
                .iter()
                .map(|&i| self.xg[i].value().unwrap_or(0.0)),
        )
    }

    /// A-set positions removed by the rank filter
    pub fn dropped(&self) -> Vec<usize> {
        (0..self.aset.len())
            .filter(|i| self.retained.binary_search(i).is_err())
            .collect()
    }

    /// Scatter a vector over `retained` back to a full a-set vector;
    /// dropped positions stay zero
    pub fn expand_reduced(&self, reduced: &DVector<f64>) -> DVector<f64> {
        let mut xa = DVector::zeros(self.aset.len());
        crate::partition::scatter_vector(&mut xa, &self.retained, reduced);
        xa
    }
}
