//! Global stiffness assembly.
//!
//! ## Assembly Process
//!
//! 1. Split the model's elements into supported ones (a routine exists in
//!    [`ELEMENT_LIBRARY`](crate::elements::ELEMENT_LIBRARY)) and unsupported
//!    ones (rejected, or skipped with a warning when configured)
//! 2. Build the DOF map from the grids of the supported elements
//! 3. Compute every element block (in parallel when configured)
//! 4. Scatter-add the blocks into a dense Kbb in ascending element ID order
//!
//! Blocks are always added (`+=`), so elements sharing a grid superpose.

use dsm_model::{Element, StructuralModel};
use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::analysis::AnalysisConfig;
use crate::diagnostics::Diagnostics;
use crate::dof_map::DofMap;
use crate::elements::{routine_for, ElementStiffness, StiffnessFn};
use crate::error::{Result, SolverError};

/// Assembled stiffness in the basic frame
#[derive(Debug, Clone)]
pub struct GlobalStiffness {
    /// Dense ndof × ndof stiffness matrix (Kbb)
    pub stiffness: DMatrix<f64>,
    /// DOF map used to index `stiffness`
    pub dof_map: DofMap,
    /// Number of elements processed by a stiffness routine
    pub num_elements: usize,
    /// Elements skipped because their card has no stiffness routine
    pub skipped: Vec<i32>,
}

impl GlobalStiffness {
    /// Assemble Kbb for every supported element of the model
    pub fn assemble(
        model: &StructuralModel,
        config: &AnalysisConfig,
        diags: &mut Diagnostics,
    ) -> Result<Self> {
        let mut supported: Vec<(&Element, StiffnessFn)> = Vec::new();
        let mut skipped = Vec::new();

        for element in model.elements.values() {
            match routine_for(element) {
                Some(routine) => supported.push((element, routine)),
                None if config.skip_unsupported_elements => {
                    diags.warn(format!(
                        "skipping element {} of unsupported type {}",
                        element.id,
                        element.card()
                    ));
                    skipped.push(element.id);
                }
                None => {
                    return Err(SolverError::UnsupportedElement {
                        eid: element.id,
                        card: element.card().to_string(),
                    });
                }
            }
        }

        if supported.is_empty() {
            return Err(SolverError::Configuration(
                "model has no elements with a stiffness routine".to_string(),
            ));
        }

        let dof_map = DofMap::build(model, supported.iter().map(|(e, _)| *e))?;
        let blocks = compute_blocks(model, &supported, config.parallel_assembly)?;

        let mut stiffness = DMatrix::zeros(dof_map.ndof(), dof_map.ndof());
        for block in blocks.iter().flatten() {
            scatter_add(&mut stiffness, block, &dof_map)?;
        }

        log::debug!(
            "assembled {} elements into Kbb with ndof={}",
            supported.len(),
            dof_map.ndof()
        );

        let system = Self {
            stiffness,
            dof_map,
            num_elements: supported.len(),
            skipped,
        };

        let asymmetry = system.max_asymmetry();
        let scale = system.stiffness.amax();
        if scale > 0.0 && asymmetry > config.symmetry_tolerance * scale {
            diags.warn(format!(
                "Kbb is not symmetric: max |K - K^T| = {:.3e} (max |K| = {:.3e})",
                asymmetry, scale
            ));
        }

        Ok(system)
    }

    /// Number of degrees of freedom
    pub fn ndof(&self) -> usize {
        self.dof_map.ndof()
    }

    /// Largest |K_ij - K_ji|
    pub fn max_asymmetry(&self) -> f64 {
        if self.stiffness.is_empty() {
            return 0.0;
        }
        (&self.stiffness - self.stiffness.transpose()).amax()
    }

    /// Transform Kbb (basic frame) to Kgg (global frame). Only the basic
    /// frame is supported, so this is the identity.
    pub fn basic_to_global(self) -> DMatrix<f64> {
        self.stiffness
    }
}

fn compute_blocks(
    model: &StructuralModel,
    supported: &[(&Element, StiffnessFn)],
    parallel: bool,
) -> Result<Vec<Option<ElementStiffness>>> {
    if parallel {
        supported
            .par_iter()
            .map(|(element, routine)| routine(model, element))
            .collect()
    } else {
        supported
            .iter()
            .map(|(element, routine)| routine(model, element))
            .collect()
    }
}

/// Add an element block into the global matrix at the indices of its DOFs
pub fn scatter_add(
    global: &mut DMatrix<f64>,
    block: &ElementStiffness,
    dof_map: &DofMap,
) -> Result<()> {
    let indices = block
        .dofs
        .iter()
        .map(|d| dof_map.index_of(d.node, d.component))
        .collect::<Result<Vec<_>>>()?;

    for (i_local, &i_global) in indices.iter().enumerate() {
        for (j_local, &j_global) in indices.iter().enumerate() {
            global[(i_global, j_global)] += block.matrix[(i_local, j_local)];
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dof_map::DofId;
    use dsm_model::{ElementKind, Grid, Material};

    fn make_rod_chain() -> StructuralModel {
        let mut model = StructuralModel::new();
        model.add_grid(Grid::new(1, 0.0, 0.0, 0.0));
        model.add_grid(Grid::new(2, 1.0, 0.0, 0.0));
        model.add_grid(Grid::new(3, 1.0, 1.0, 0.0));
        model.add_material(Material::new(1, 100.0, 0.3));
        model
            .add_element(Element::new(
                1,
                ElementKind::Conrod {
                    mid: 1,
                    a: 1.0,
                    j: 0.0,
                },
                vec![1, 2],
            ))
            .unwrap();
        model
            .add_element(Element::new(
                2,
                ElementKind::Conrod {
                    mid: 1,
                    a: 1.0,
                    j: 0.2,
                },
                vec![2, 3],
            ))
            .unwrap();
        model
            .add_element(Element::new(
                3,
                ElementKind::Celas2 {
                    k: 5.0,
                    components: [1, 2],
                },
                vec![1, 3],
            ))
            .unwrap();
        model
    }

    fn assemble(model: &StructuralModel, config: &AnalysisConfig) -> Result<GlobalStiffness> {
        GlobalStiffness::assemble(model, config, &mut Diagnostics::new(1))
    }

    #[test]
    fn assembles_mixed_elements_symmetrically() {
        let model = make_rod_chain();
        let system = assemble(&model, &AnalysisConfig::default()).unwrap();

        assert_eq!(system.ndof(), 18);
        assert_eq!(system.num_elements, 3);
        assert!(system.max_asymmetry() < 1e-12);
    }

    #[test]
    fn shared_grid_contributions_superpose() {
        let model = make_rod_chain();
        let system = assemble(&model, &AnalysisConfig::default()).unwrap();
        let map = &system.dof_map;

        // grid 2: element 1 adds AE/L = 100 on T1, element 2 (along y) on T2
        let t1 = map.get(2, 1).unwrap();
        let t2 = map.get(2, 2).unwrap();
        assert!((system.stiffness[(t1, t1)] - 100.0).abs() < 1e-12);
        assert!((system.stiffness[(t2, t2)] - 100.0).abs() < 1e-12);

        // spring between grid 1 T1 and grid 3 T2 adds onto the rod terms
        let g1 = map.get(1, 1).unwrap();
        let g3 = map.get(3, 2).unwrap();
        assert!((system.stiffness[(g1, g1)] - 105.0).abs() < 1e-12);
        assert!((system.stiffness[(g3, g3)] - 105.0).abs() < 1e-12);
        assert!((system.stiffness[(g1, g3)] + 5.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_and_serial_assembly_agree() {
        let model = make_rod_chain();
        let serial = AnalysisConfig {
            parallel_assembly: false,
            ..Default::default()
        };
        let a = assemble(&model, &AnalysisConfig::default()).unwrap();
        let b = assemble(&model, &serial).unwrap();
        assert_eq!(a.stiffness, b.stiffness);
    }

    #[test]
    fn rejects_unsupported_element() {
        let mut model = make_rod_chain();
        model
            .add_element(Element::new(
                9,
                ElementKind::Unsupported {
                    card: "CBAR".into(),
                },
                vec![1, 2],
            ))
            .unwrap();

        let err = assemble(&model, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::UnsupportedElement { eid: 9, .. }));
    }

    #[test]
    fn skips_unsupported_element_when_configured() {
        let mut model = make_rod_chain();
        model
            .add_element(Element::new(
                9,
                ElementKind::Unsupported {
                    card: "CQUAD4".into(),
                },
                vec![1, 2, 3, 4],
            ))
            .unwrap();
        let config = AnalysisConfig {
            skip_unsupported_elements: true,
            ..Default::default()
        };

        let mut diags = Diagnostics::new(1);
        let system = GlobalStiffness::assemble(&model, &config, &mut diags).unwrap();
        assert_eq!(system.skipped, vec![9]);
        // grid 4 only belongs to the skipped element
        assert!(system.dof_map.get(4, 1).is_none());
        assert!(diags.has_warnings());
    }

    #[test]
    fn rejects_model_without_supported_elements() {
        let mut model = StructuralModel::new();
        model.add_grid(Grid::new(1, 0.0, 0.0, 0.0));
        let err = assemble(&model, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::Configuration(_)));
    }

    #[test]
    fn scatter_rejects_unmapped_component() {
        let map = DofMap::from_grids([1, 2]);
        let block = ElementStiffness {
            eid: 1,
            matrix: DMatrix::identity(2, 2),
            dofs: vec![DofId::new(1, 1), DofId::new(2, 7)],
        };
        let mut k = DMatrix::zeros(12, 12);
        assert!(matches!(
            scatter_add(&mut k, &block, &map),
            Err(SolverError::ModelInconsistency {
                node: 2,
                component: 7
            })
        ));
    }
}
