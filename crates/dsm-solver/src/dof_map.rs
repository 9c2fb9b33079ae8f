//! Degree-of-freedom bookkeeping.
//!
//! Every grid connected to at least one assembled element gets six
//! consecutive global indices (T1, T2, T3, R1, R2, R3). Grids are numbered in
//! ascending ID order, so the map is identical for every subcase of a run and
//! the indices are exactly `0..ndof` with no gaps.
//!
//! Components no element touches (the rotations of an axial-only rod, the
//! unused components of a spring grid) still get a slot here; the rank
//! filter removes them before the solve and they report zero displacement.

use std::collections::{BTreeSet, HashMap};

use dsm_model::{Element, StructuralModel};
use serde::Serialize;

use crate::error::{Result, SolverError};

/// Components per grid point
pub const DOFS_PER_GRID: usize = 6;

/// A (grid, component) pair, component in 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DofId {
    /// Grid ID
    pub node: i32,
    /// Component (1-3 translation, 4-6 rotation)
    pub component: u8,
}

impl DofId {
    pub fn new(node: i32, component: u8) -> Self {
        Self { node, component }
    }
}

/// Bijection between (grid, component) and global index
#[derive(Debug, Clone, Default, Serialize)]
pub struct DofMap {
    keys: Vec<DofId>,
    #[serde(skip)]
    index: HashMap<DofId, usize>,
}

impl DofMap {
    /// Build the map from the grids referenced by `elements`. Every
    /// referenced grid must exist in the model.
    pub fn build<'a>(
        model: &StructuralModel,
        elements: impl IntoIterator<Item = &'a Element>,
    ) -> Result<Self> {
        let mut grids = BTreeSet::new();
        for element in elements {
            for &nid in &element.nodes {
                model.grid(nid)?;
                grids.insert(nid);
            }
        }
        Ok(Self::from_grids(grids))
    }

    /// Build the map for an ordered set of grid IDs
    pub fn from_grids(grids: impl IntoIterator<Item = i32>) -> Self {
        let grids: BTreeSet<i32> = grids.into_iter().collect();
        let mut keys = Vec::with_capacity(grids.len() * DOFS_PER_GRID);
        for nid in grids {
            for component in 1..=DOFS_PER_GRID as u8 {
                keys.push(DofId::new(nid, component));
            }
        }
        let index = keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();
        Self { keys, index }
    }

    /// Number of degrees of freedom
    pub fn ndof(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Global index of a (grid, component) pair
    pub fn get(&self, node: i32, component: u8) -> Option<usize> {
        self.index.get(&DofId::new(node, component)).copied()
    }

    /// Global index, or a fatal inconsistency when the pair is not mapped
    pub fn index_of(&self, node: i32, component: u8) -> Result<usize> {
        self.get(node, component)
            .ok_or(SolverError::ModelInconsistency { node, component })
    }

    /// The (grid, component) pair at a global index
    pub fn dof(&self, index: usize) -> Option<DofId> {
        self.keys.get(index).copied()
    }

    /// All pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, DofId)> + '_ {
        self.keys.iter().copied().enumerate()
    }
}
