//! Structural-zero filter for the analysis-set stiffness.
//!
//! An index is kept when its row or its column holds at least one nonzero
//! entry. This only removes DOFs that no element touches (for example the
//! rotations of an axial-only rod); it is not a numerical rank test.

use nalgebra::DMatrix;

use crate::partition::gather_matrix;

/// Retained indices of a square matrix, ascending
pub fn retained_indices(k: &DMatrix<f64>) -> Vec<usize> {
    (0..k.nrows())
        .filter(|&i| k.row(i).amax() > 0.0 || k.column(i).amax() > 0.0)
        .collect()
}

/// Restrict `k` to the rows and columns that carry stiffness
pub fn remove_rows(k: &DMatrix<f64>) -> (DMatrix<f64>, Vec<usize>) {
    debug_assert!(k.is_square());
    let retained = retained_indices(k);
    (gather_matrix(k, &retained, &retained), retained)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_gaps() -> DMatrix<f64> {
        // indices 1 and 3 are disconnected
        let mut k = DMatrix::zeros(5, 5);
        k[(0, 0)] = 2.0;
        k[(0, 2)] = -1.0;
        k[(2, 0)] = -1.0;
        k[(2, 2)] = 3.0;
        k[(4, 4)] = 1.0;
        k
    }

    #[test]
    fn removes_empty_rows_and_columns() {
        let (reduced, retained) = remove_rows(&with_gaps());
        assert_eq!(retained, vec![0, 2, 4]);
        assert_eq!(reduced.shape(), (3, 3));
        assert_eq!(reduced[(0, 1)], -1.0);
        assert_eq!(reduced[(2, 2)], 1.0);
    }

    #[test]
    fn one_sided_entry_is_enough_to_keep() {
        let mut k = DMatrix::zeros(2, 2);
        k[(0, 1)] = 1.0;
        let (_, retained) = remove_rows(&k);
        assert_eq!(retained, vec![0, 1]);
    }

    #[test]
    fn negative_entries_count() {
        let mut k = DMatrix::zeros(2, 2);
        k[(1, 1)] = -4.0;
        assert_eq!(retained_indices(&k), vec![1]);
    }

    #[test]
    fn is_idempotent() {
        let (once, first) = remove_rows(&with_gaps());
        let (twice, second) = remove_rows(&once);
        assert_eq!(second, (0..first.len()).collect::<Vec<_>>());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_matrix() {
        let (reduced, retained) = remove_rows(&DMatrix::zeros(0, 0));
        assert!(retained.is_empty());
        assert!(reduced.is_empty());
    }
}
