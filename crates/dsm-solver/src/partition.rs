//! Index-set partitioning of vectors and matrices.
//!
//! Pure gather/scatter helpers with no structural meaning; the procedures
//! use them with the {a, s} split of the g-set:
//! ```text
//! {Fg} -> {Fa, Fs}
//! [Kgg] -> [Kaa Kas]
//!          [Ksa Kss]
//! ```
//! Sets passed together must be pairwise disjoint. Sources are never
//! mutated.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};

/// A named list of indices
pub type IndexSet<'a> = (&'a str, &'a [usize]);

/// Blocks of a partitioned matrix keyed by (row set, column set)
pub type MatrixBlocks = BTreeMap<(String, String), DMatrix<f64>>;

/// Gather `v[indices]`
pub fn gather_vector(v: &DVector<f64>, indices: &[usize]) -> DVector<f64> {
    DVector::from_iterator(indices.len(), indices.iter().map(|&i| v[i]))
}

/// Gather `m[rows, cols]`
pub fn gather_matrix(m: &DMatrix<f64>, rows: &[usize], cols: &[usize]) -> DMatrix<f64> {
    DMatrix::from_fn(rows.len(), cols.len(), |i, j| m[(rows[i], cols[j])])
}

/// One sub-vector per set, in the order given
pub fn partition_vector(v: &DVector<f64>, sets: &[IndexSet<'_>]) -> Vec<DVector<f64>> {
    debug_assert!(are_disjoint(sets), "partition sets overlap");
    sets.iter()
        .map(|(_, indices)| gather_vector(v, indices))
        .collect()
}

/// Every ordered pair of sets, off-diagonal blocks included
pub fn partition_matrix(m: &DMatrix<f64>, sets: &[IndexSet<'_>]) -> MatrixBlocks {
    debug_assert!(are_disjoint(sets), "partition sets overlap");
    let mut blocks = BTreeMap::new();
    for (row_name, rows) in sets {
        for (col_name, cols) in sets {
            blocks.insert(
                (row_name.to_string(), col_name.to_string()),
                gather_matrix(m, rows, cols),
            );
        }
    }
    blocks
}

/// Write `part` into `target` at `indices`
pub fn scatter_vector(target: &mut DVector<f64>, indices: &[usize], part: &DVector<f64>) {
    debug_assert_eq!(indices.len(), part.len());
    for (&i, value) in indices.iter().zip(part.iter()) {
        target[i] = *value;
    }
}

/// Reassemble a length-`n` vector from partitioned pieces
pub fn merge_vector(n: usize, sets: &[IndexSet<'_>], parts: &[DVector<f64>]) -> DVector<f64> {
    debug_assert_eq!(sets.len(), parts.len());
    let mut merged = DVector::zeros(n);
    for ((_, indices), part) in sets.iter().zip(parts) {
        scatter_vector(&mut merged, indices, part);
    }
    merged
}

fn are_disjoint(sets: &[IndexSet<'_>]) -> bool {
    let mut seen = std::collections::HashSet::new();
    sets.iter()
        .flat_map(|(_, indices)| indices.iter())
        .all(|i| seen.insert(*i))
}
