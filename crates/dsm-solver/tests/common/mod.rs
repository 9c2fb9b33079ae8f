//! Shared model fixtures for the integration tests.
#![allow(dead_code)]

use dsm_model::{Constraint, Element, ElementKind, Grid, Load, Material, StructuralModel, Subcase};

pub const E: f64 = 210_000.0;
pub const NU: f64 = 0.3;

/// Route test logging through the harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One CONROD from grid 1 at the origin to grid 2 at `end`.
///
/// SPC 1 fixes all six components of grid 1; LOAD 1 is `force` along the
/// rod axis at grid 2.
pub fn single_rod(sol: i32, end: [f64; 3], area: f64, j: f64, force: f64) -> StructuralModel {
    let mut model = StructuralModel::new();
    model.set_sol(sol);
    model.add_grid(Grid::new(1, 0.0, 0.0, 0.0));
    model.add_grid(Grid::new(2, end[0], end[1], end[2]));
    model.add_material(Material::new(1, E, NU));
    model
        .add_element(Element::new(
            1,
            ElementKind::Conrod { mid: 1, a: area, j },
            vec![1, 2],
        ))
        .expect("valid CONROD");
    model.add_constraint(1, Constraint::spc1(&[1, 2, 3, 4, 5, 6], &[1]));
    let length = end.iter().map(|d| d * d).sum::<f64>().sqrt();
    model.add_load(1, Load::force(2, force, end.map(|d| d / length)));
    model.add_subcase(Subcase::new(1).with("SPC", 1).with("LOAD", 1));
    model
}

/// Planar two-bar truss (CROD on a PROD) meeting at grid 3:
///
/// ```text
///   1 (0,0) ----- 3 (1,1) ----- 2 (2,0)
/// ```
/// Grids 1 and 2 are pinned, grid 3 is held out of plane and loaded by
/// `-p` in y. The bars carry no torsion.
pub fn two_bar_truss(p: f64) -> StructuralModel {
    let mut model = StructuralModel::new();
    model.set_sol(101);
    model.add_grid(Grid::new(1, 0.0, 0.0, 0.0));
    model.add_grid(Grid::new(2, 2.0, 0.0, 0.0));
    model.add_grid(Grid::new(3, 1.0, 1.0, 0.0));
    model.add_material(Material::new(1, E, NU));
    model.add_property(dsm_model::Property::Prod {
        id: 10,
        mid: 1,
        a: 1.0,
        j: 0.0,
    });
    for (eid, nodes) in [(1, vec![1, 3]), (2, vec![2, 3])] {
        model
            .add_element(Element::new(eid, ElementKind::Crod { pid: 10 }, nodes))
            .expect("valid CROD");
    }
    model.add_constraint(1, Constraint::spc1(&[1, 2, 3], &[1, 2]));
    model.add_constraint(1, Constraint::spc1(&[3], &[3]));
    model.add_load(1, Load::force(3, p, [0.0, -1.0, 0.0]));
    model.add_subcase(Subcase::new(1).with("SPC", 1).with("LOAD", 1));
    model
}

/// Three CELAS2 springs in series on T1, grid 1 grounded
pub fn spring_chain(sol: i32, rates: &[f64]) -> StructuralModel {
    let mut model = StructuralModel::new();
    model.set_sol(sol);
    for nid in 1..=(rates.len() as i32 + 1) {
        model.add_grid(Grid::new(nid, nid as f64, 0.0, 0.0));
    }
    for (i, &k) in rates.iter().enumerate() {
        let eid = i as i32 + 1;
        model
            .add_element(Element::new(
                eid,
                ElementKind::Celas2 {
                    k,
                    components: [1, 1],
                },
                vec![eid, eid + 1],
            ))
            .expect("valid CELAS2");
    }
    model.add_constraint(1, Constraint::spc1(&[1], &[1]));
    model.add_subcase(Subcase::new(1).with("SPC", 1));
    model
}
