//! Static load vector assembly.
//!
//! Flattens the subcase's LOAD selection into atomic loads with their
//! combination scale factors and accumulates them into {Fb}. Loads landing
//! on the same DOF are summed.

use dsm_model::{Load, StructuralModel, Subcase};
use nalgebra::DVector;

use crate::diagnostics::Diagnostics;
use crate::dof_map::DofMap;
use crate::error::{Result, SolverError};

const TRANSLATIONS: [u8; 3] = [1, 2, 3];
const ROTATIONS: [u8; 3] = [4, 5, 6];

/// Build {Fb} for the LOAD selection of `subcase` (zero when absent)
pub fn build_fb(
    model: &StructuralModel,
    dof_map: &DofMap,
    subcase: &Subcase,
    diags: &mut Diagnostics,
) -> Result<DVector<f64>> {
    let mut fb = DVector::zeros(dof_map.ndof());
    let Some((load_id, _options)) = subcase.get("LOAD") else {
        diags.info("no LOAD selected; load vector is zero");
        return Ok(fb);
    };

    let (loads, scales, is_grav) = model.resolve_loads(load_id, 1.0)?;
    if is_grav {
        return Err(SolverError::UnimplementedLoadKind {
            card: "GRAV".to_string(),
        });
    }

    for (load, scale) in loads.iter().zip(&scales) {
        apply_load(&mut fb, dof_map, load, *scale)?;
    }

    log::debug!(
        "LOAD {} resolved to {} atomic loads, |Fb| = {:.6e}",
        load_id,
        loads.len(),
        fb.norm()
    );
    Ok(fb)
}

/// Accumulate one scaled atomic load into `fb`
pub fn apply_load(fb: &mut DVector<f64>, dof_map: &DofMap, load: &Load, scale: f64) -> Result<()> {
    match load {
        Load::Force { node, .. } | Load::Moment { node, .. } => {
            let components = if matches!(load, Load::Force { .. }) {
                TRANSLATIONS
            } else {
                ROTATIONS
            };
            let vector = load
                .to_global()
                .ok_or_else(|| SolverError::UnimplementedLoadKind {
                    card: load.card().to_string(),
                })?;
            log::trace!("{} on grid {}: {:?} x {}", load.card(), node, vector, scale);
            for (component, value) in components.into_iter().zip(vector) {
                fb[dof_map.index_of(*node, component)?] += value * scale;
            }
        }
        Load::Sload {
            node,
            component,
            magnitude,
        } => {
            fb[dof_map.index_of(*node, *component)?] += magnitude * scale;
        }
        Load::Grav { .. } => {
            return Err(SolverError::UnimplementedLoadKind {
                card: load.card().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsm_model::Grid;

    fn make_model() -> (StructuralModel, DofMap) {
        let mut model = StructuralModel::new();
        model.add_grid(Grid::new(1, 0.0, 0.0, 0.0));
        model.add_grid(Grid::new(2, 1.0, 0.0, 0.0));
        (model, DofMap::from_grids([1, 2]))
    }

    fn fb_for(model: &StructuralModel, map: &DofMap, load_id: i32) -> Result<DVector<f64>> {
        let subcase = Subcase::new(1).with("LOAD", load_id);
        build_fb(model, map, &subcase, &mut Diagnostics::new(1))
    }

    #[test]
    fn force_fills_translations() {
        let (mut model, map) = make_model();
        model.add_load(1, Load::force(2, 10.0, [1.0, -2.0, 0.5]));

        let fb = fb_for(&model, &map, 1).unwrap();
        assert_eq!(fb[6], 10.0);
        assert_eq!(fb[7], -20.0);
        assert_eq!(fb[8], 5.0);
        assert_eq!(fb.rows(0, 6).amax(), 0.0);
    }

    #[test]
    fn moment_fills_rotations() {
        let (mut model, map) = make_model();
        model.add_load(
            1,
            Load::Moment {
                node: 1,
                magnitude: 3.0,
                direction: [0.0, 0.0, 1.0],
            },
        );

        let fb = fb_for(&model, &map, 1).unwrap();
        assert_eq!(fb[5], 3.0);
        assert_eq!(fb.sum(), 3.0);
    }

    #[test]
    fn loads_on_same_dof_are_summed() {
        let (mut model, map) = make_model();
        model.add_load(1, Load::force(2, 100.0, [1.0, 0.0, 0.0]));
        model.add_load(
            1,
            Load::Sload {
                node: 2,
                component: 1,
                magnitude: 50.0,
            },
        );

        let fb = fb_for(&model, &map, 1).unwrap();
        assert_eq!(fb[6], 150.0);
    }

    #[test]
    fn combination_scales_are_applied() {
        let (mut model, map) = make_model();
        model.add_load(1, Load::force(2, 10.0, [1.0, 0.0, 0.0]));
        model.add_load(2, Load::force(2, 4.0, [1.0, 0.0, 0.0]));
        model.add_load_combination(10, 2.0, vec![(1.0, 1), (-0.5, 2)]);

        let fb = fb_for(&model, &map, 10).unwrap();
        // 2 * (1 * 10 - 0.5 * 4) = 16
        assert!((fb[6] - 16.0).abs() < 1e-12);
    }

    #[test]
    fn missing_load_gives_zero_vector() {
        let (model, map) = make_model();
        let mut diags = Diagnostics::new(1);
        let fb = build_fb(&model, &map, &Subcase::new(1), &mut diags).unwrap();
        assert_eq!(fb.len(), 12);
        assert_eq!(fb.amax(), 0.0);
        assert!(!diags.has_warnings());
    }

    #[test]
    fn gravity_is_unimplemented() {
        let (mut model, map) = make_model();
        model.add_load(
            1,
            Load::Grav {
                magnitude: 9.81,
                direction: [0.0, 0.0, -1.0],
            },
        );
        let err = fb_for(&model, &map, 1).unwrap_err();
        assert!(matches!(err, SolverError::UnimplementedLoadKind { ref card } if card == "GRAV"));
    }

    #[test]
    fn load_on_unmapped_grid_is_inconsistency() {
        let (mut model, map) = make_model();
        model.add_load(1, Load::force(3, 1.0, [1.0, 0.0, 0.0]));
        let err = fb_for(&model, &map, 1).unwrap_err();
        assert!(matches!(err, SolverError::ModelInconsistency { node: 3, .. }));
    }
}
