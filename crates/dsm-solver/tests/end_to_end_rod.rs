//! End-to-end static solutions of rod and truss models through `run`.

mod common;

use approx::assert_relative_eq;
use common::*;
use dsm_model::{Load, Subcase};
use dsm_solver::{run, AnalysisConfig, Diagnostics, GlobalStiffness, Solver, SubcaseSolution};

#[test]
fn axial_rod_tip_displacement() {
    init_logging();
    // F*L / (A*E) with L = 2
    let (area, force) = (0.5, 1000.0);
    let model = single_rod(101, [2.0, 0.0, 0.0], area, 0.0, force);

    let results = run(&model).expect("static solve");
    assert_eq!(results.len(), 1);
    let sol = results[0].as_static().expect("static result");

    let expected = force * 2.0 / (area * E);
    assert_relative_eq!(sol.displacement(2, 1).unwrap(), expected, epsilon = 1e-15);

    // grid 1 is fixed, grid 2 has no transverse or rotational response
    for component in 1..=6 {
        assert_eq!(sol.displacement(1, component), Some(0.0));
    }
    for component in 2..=6 {
        assert_eq!(sol.displacement(2, component), Some(0.0));
    }

    // only the axial DOF survives the rank filter
    assert_eq!(sol.xa_reduced.len(), 1);
    assert_relative_eq!(sol.xa_reduced[0], expected, epsilon = 1e-15);

    // reaction balances the load
    assert_relative_eq!(sol.force(1, 1).unwrap(), -force, epsilon = 1e-9);
}

#[test]
fn inclined_rod_stiffness_is_symmetric() {
    let model = single_rod(101, [1.0, 2.0, 2.0], 1.0, 0.5, 300.0);
    let kbb = GlobalStiffness::assemble(
        &model,
        &AnalysisConfig::default(),
        &mut Diagnostics::new(1),
    )
    .unwrap();

    assert_eq!(kbb.ndof(), 12);
    assert!(kbb.max_asymmetry() < 1e-9);
    // rigid translation along the axis produces no force
    let mut u = nalgebra::DVector::zeros(12);
    for (c, d) in [1.0, 2.0, 2.0].iter().enumerate() {
        u[c] = *d;
        u[6 + c] = *d;
    }
    assert!((&kbb.stiffness * u).amax() < 1e-6);
}

#[test]
fn rod_torsion_twists_about_its_axis() {
    // J = 2, G = E / (2 (1 + nu)), L = 4, moment 50 about x at grid 2
    let mut model = single_rod(101, [4.0, 0.0, 0.0], 1.0, 2.0, 0.0);
    model.add_load(
        1,
        Load::Moment {
            node: 2,
            magnitude: 50.0,
            direction: [1.0, 0.0, 0.0],
        },
    );

    let sol = run(&model).unwrap()[0].as_static().cloned().unwrap();
    let g = E / (2.0 * (1.0 + NU));
    assert_relative_eq!(
        sol.displacement(2, 4).unwrap(),
        50.0 * 4.0 / (g * 2.0),
        epsilon = 1e-12
    );
    assert_eq!(sol.displacement(2, 1), Some(0.0));
}

#[test]
fn two_bar_truss_apex_deflection() {
    // each bar at 45 degrees, L = sqrt 2: v = P L / (2 A E sin^2 45) = P sqrt2 / (A E)
    let p = 1000.0;
    let model = two_bar_truss(p);
    let config = AnalysisConfig::serial();
    let results = Solver::with_config(&model, config).run().unwrap();
    let sol = results[0].as_static().unwrap();

    let expected = -p * 2.0_f64.sqrt() / E;
    assert_relative_eq!(sol.displacement(3, 2).unwrap(), expected, epsilon = 1e-12);
    assert_relative_eq!(sol.displacement(3, 1).unwrap(), 0.0, epsilon = 1e-15);

    // vertical reactions share the load; horizontal ones cancel
    let resultant = sol.spc_resultant();
    assert_relative_eq!(resultant[1], p, epsilon = 1e-8);
    assert_relative_eq!(resultant[0], 0.0, epsilon = 1e-8);
    assert_relative_eq!(sol.force(1, 2).unwrap(), p / 2.0, epsilon = 1e-8);
}

#[test]
fn parallel_and_serial_runs_match() {
    let model = two_bar_truss(10.0);
    let a = Solver::new(&model).run().unwrap();
    let b = Solver::with_config(&model, AnalysisConfig::serial())
        .run()
        .unwrap();
    assert_eq!(
        a[0].as_static().unwrap().xg,
        b[0].as_static().unwrap().xg
    );
}

#[test]
fn subcases_are_solved_in_ascending_order_and_inherit_defaults() {
    let mut model = single_rod(101, [1.0, 0.0, 0.0], 1.0, 0.0, 100.0);
    model.add_load(2, Load::force(2, 200.0, [1.0, 0.0, 0.0]));
    // SPC comes from the global subcase, LOAD from each subcase
    model.subcases.clear();
    model.add_subcase(Subcase::new(0).with("SPC", 1).with("LOAD", 1));
    model.add_subcase(Subcase::new(20).with("LOAD", 2));
    model.add_subcase(Subcase::new(10));

    let results = run(&model).unwrap();
    let ids: Vec<i32> = results.iter().map(SubcaseSolution::subcase_id).collect();
    assert_eq!(ids, vec![10, 20]);

    let u10 = results[0].as_static().unwrap().displacement(2, 1).unwrap();
    let u20 = results[1].as_static().unwrap().displacement(2, 1).unwrap();
    assert_relative_eq!(u10, 100.0 / E, epsilon = 1e-15);
    assert_relative_eq!(u20, 200.0 / E, epsilon = 1e-15);
}
