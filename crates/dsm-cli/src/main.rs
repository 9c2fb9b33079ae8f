use std::process::ExitCode;

use dsm_model::StructuralModel;
use dsm_solver::{AnalysisConfig, ModalSolution, Solver, StaticSolution, SubcaseSolution};

const COMPONENTS: [&str; 6] = ["T1", "T2", "T3", "R1", "R2", "R3"];

fn usage() {
    eprintln!("usage: dsm-cli <model.json> [--config <config.json>] [--json]");
}

struct Args {
    model: String,
    config: Option<String>,
    json: bool,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut model = None;
    let mut config = None;
    let mut json = false;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => config = Some(iter.next()?.clone()),
            other if other.starts_with("--") => return None,
            other if model.is_none() => model = Some(other.to_string()),
            _ => return None,
        }
    }
    Some(Args {
        model: model?,
        config,
        json,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("{path}: {e}"))
}

fn print_static(sol: &StaticSolution) {
    println!("SUBCASE {} (SOL 101)", sol.subcase_id);
    println!(
        "{:>8} {:>4} {:>14} {:>14}",
        "GRID", "COMP", "DISPLACEMENT", "FORCE"
    );
    for (i, dof) in sol.dof_map.iter() {
        let (u, f) = (sol.xg[i], sol.fg[i]);
        if u == 0.0 && f == 0.0 {
            continue;
        }
        println!(
            "{:>8} {:>4} {:>14.6e} {:>14.6e}",
            dof.node,
            COMPONENTS[(dof.component - 1) as usize],
            u,
            f
        );
    }
    let r = sol.spc_resultant();
    println!(
        "SPC resultant: {:.6e} {:.6e} {:.6e} {:.6e} {:.6e} {:.6e}",
        r[0], r[1], r[2], r[3], r[4], r[5]
    );
}

fn print_modal(sol: &ModalSolution) {
    println!("SUBCASE {} (SOL 103, unit mass)", sol.subcase_id);
    println!("{:>6} {:>16} {:>16}", "MODE", "EIGENVALUE", "FREQ (HZ)");
    for (i, (lambda, f)) in sol.eigenvalues.iter().zip(&sol.frequencies_hz).enumerate() {
        println!("{:>6} {:>16.6e} {:>16.6e}", i + 1, lambda, f);
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&args) else {
        usage();
        return ExitCode::from(2);
    };

    let model: StructuralModel = match read_json(&args.model) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("model error: {err}");
            return ExitCode::from(1);
        }
    };
    let config: AnalysisConfig = match args.config.as_deref().map(read_json::<AnalysisConfig>).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::from(1);
        }
    };

    let results = match Solver::with_config(&model, config).run() {
        Ok(results) => results,
        Err(err) => {
            eprintln!("solve error: {err}");
            return ExitCode::from(1);
        }
    };
    log::info!("solved {} subcases", results.len());

    if args.json {
        match serde_json::to_string_pretty(&results) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("output error: {err}");
                return ExitCode::from(1);
            }
        }
        return ExitCode::SUCCESS;
    }

    for result in &results {
        match result {
            SubcaseSolution::Static(sol) => print_static(sol),
            SubcaseSolution::Modal(sol) => print_modal(sol),
        }
        for diag in result.diagnostics() {
            println!("  {:?}: {}", diag.severity, diag.message);
        }
        println!();
    }
    ExitCode::SUCCESS
}
