use std::fs;
use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tabwriter::TabWriter;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use lotplan_algo::{
    formulation_for, solve_with, EquivalenceChecker, Formulation, FormulationKind, LotSolution,
    LotSolver, MicroLpSession, Verdict,
};
use lotplan_core::{FixedSource, InstanceData, ProblemInstance, Slot, UniformSource, HORIZON_LADDER};

use lotplan_cli::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let outcome = match &cli.command {
        Some(Commands::Solve {
            formulation,
            instance,
            seed,
            stub,
            json,
        }) => run_solve(formulation, instance.as_deref(), *seed, *stub, *json),
        Some(Commands::Compare {
            left,
            right,
            instance,
            seed,
            stub,
            tolerance,
            json,
        }) => run_compare(
            left,
            right,
            instance.as_deref(),
            *seed,
            *stub,
            *tolerance,
            *json,
        ),
        Some(Commands::Bench {
            formulations,
            reps,
            rungs,
            seed,
            json,
        }) => run_bench(formulations, *reps, *rungs, *seed, *json),
        None => {
            info!("No subcommand provided. Use `lotplan-cli --help` for more information.");
            Ok(())
        }
    };

    if let Err(err) = outcome {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn parse_kind(name: &str) -> anyhow::Result<FormulationKind> {
    name.parse::<FormulationKind>()
        .map_err(|err| anyhow::anyhow!(err))
}

fn load_instance(
    path: Option<&str>,
    seed: Option<u64>,
    stub: bool,
) -> anyhow::Result<ProblemInstance> {
    if let Some(path) = path {
        let raw = fs::read_to_string(path)?;
        let data: InstanceData = serde_json::from_str(&raw)
            .map_err(|err| anyhow::anyhow!("parsing instance file {path}: {err}"))?;
        return Ok(ProblemInstance::from_data(data)?);
    }
    if stub {
        return Ok(ProblemInstance::from_source(&mut FixedSource::default())?);
    }
    let mut source = match seed {
        Some(seed) => UniformSource::new(seed),
        None => UniformSource::from_entropy(),
    };
    Ok(ProblemInstance::from_source(&mut source)?)
}

fn run_solve(
    formulation: &str,
    instance_path: Option<&str>,
    seed: Option<u64>,
    stub: bool,
    json: bool,
) -> anyhow::Result<()> {
    let kind = parse_kind(formulation)?;
    let instance = load_instance(instance_path, seed, stub)?;
    info!("Solving {} model over horizon {}", kind, instance.horizon());

    let mut session = MicroLpSession::new();
    let solution = solve_with(formulation_for(kind).as_ref(), &instance, &mut session)?;

    if json {
        print_solution_json(&solution)?;
    } else {
        print_instance_table(&instance)?;
        print_solution_table(&solution)?;
        if kind != FormulationKind::Aggregate {
            print_pair_tables(&solution)?;
        }
    }
    Ok(())
}

fn run_compare(
    left: &str,
    right: &str,
    instance_path: Option<&str>,
    seed: Option<u64>,
    stub: bool,
    tolerance: f64,
    json: bool,
) -> anyhow::Result<()> {
    let left_kind = parse_kind(left)?;
    let right_kind = parse_kind(right)?;
    let instance = load_instance(instance_path, seed, stub)?;
    info!(
        "Comparing {} against {} over horizon {}",
        left_kind,
        right_kind,
        instance.horizon()
    );

    let mut session = MicroLpSession::new();
    let left_solution = solve_with(formulation_for(left_kind).as_ref(), &instance, &mut session)?;
    let right_solution = solve_with(formulation_for(right_kind).as_ref(), &instance, &mut session)?;

    let checker = EquivalenceChecker::new(tolerance);
    let report = checker.check(&left_solution, &right_solution)?;
    let pairwise = if left_kind != FormulationKind::Aggregate
        && right_kind != FormulationKind::Aggregate
    {
        Some(checker.check_pairwise(&left_solution, &right_solution)?)
    } else {
        None
    };

    if json {
        let payload = json!({
            "left": { "formulation": left_kind, "objective": left_solution.objective() },
            "right": { "formulation": right_kind, "objective": right_solution.objective() },
            "report": report,
            "pairwise": pairwise,
        });
        serde_json::to_writer_pretty(io::stdout(), &payload)
            .map_err(|err| anyhow::anyhow!("serializing comparison to JSON: {err}"))?;
        println!();
    } else {
        print_solution_table(&left_solution)?;
        print_solution_table(&right_solution)?;
        println!(
            "Verdict: {:?} (objective gap {:.3e}, production gap {:.3e}, stock gap {:.3e})",
            report.verdict, report.objective_gap, report.max_production_gap, report.max_stock_gap
        );
        if let Some(pairwise) = &pairwise {
            if pairwise.is_match() {
                println!("Pair variables match (max gap {:.3e})", pairwise.max_gap);
            } else {
                println!(
                    "Pair variables differ at {:?} (max gap {:.3e})",
                    pairwise.mismatched_pairs, pairwise.max_gap
                );
            }
        }
    }

    if report.verdict == Verdict::ObjectiveMismatch {
        anyhow::bail!(
            "{} and {} disagree on the optimal objective: {} vs {}",
            left_kind,
            right_kind,
            left_solution.objective(),
            right_solution.objective()
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct BenchRecord {
    formulation: FormulationKind,
    horizon: usize,
    reps: usize,
    vars: usize,
    constraints: usize,
    avg_solve_ms: f64,
}

fn run_bench(
    formulations: &str,
    reps: usize,
    rungs: usize,
    seed: u64,
    json: bool,
) -> anyhow::Result<()> {
    if reps == 0 {
        anyhow::bail!("--reps must be at least 1");
    }
    let kinds = formulations
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(parse_kind)
        .collect::<anyhow::Result<Vec<_>>>()?;
    if kinds.is_empty() {
        anyhow::bail!("no formulations to time");
    }
    let ladder: Vec<usize> = HORIZON_LADDER.iter().copied().take(rungs.max(1)).collect();

    let mut source = UniformSource::new(seed);
    let mut session = MicroLpSession::new();
    let mut records = Vec::new();

    for &horizon in &ladder {
        for &kind in &kinds {
            let builder = formulation_for(kind);
            let mut total = Duration::ZERO;
            let mut vars = 0;
            let mut constraints = 0;
            // fresh random parameters per rep, horizon fixed by the rung;
            // only the solve is timed
            for _ in 0..reps {
                let instance = ProblemInstance::from_source_with_horizon(&mut source, horizon)?;
                let model = builder.build(&instance)?;
                vars = model.num_vars();
                constraints = model.num_constraints();
                let report = session.solve(model)?;
                if !report.status.is_success() {
                    anyhow::bail!(
                        "{} solve at horizon {} came back {}",
                        kind,
                        horizon,
                        report.status
                    );
                }
                total += report.solve_time;
            }
            let avg_solve_ms = total.as_secs_f64() * 1e3 / reps as f64;
            info!(
                "{} horizon {}: {:.3} ms avg over {} reps",
                kind, horizon, avg_solve_ms, reps
            );
            records.push(BenchRecord {
                formulation: kind,
                horizon,
                reps,
                vars,
                constraints,
                avg_solve_ms,
            });
        }
    }

    if json {
        serde_json::to_writer_pretty(io::stdout(), &records)
            .map_err(|err| anyhow::anyhow!("serializing timing records to JSON: {err}"))?;
        println!();
    } else {
        let mut writer = TabWriter::new(io::stdout());
        writeln!(writer, "HORIZON\tFORMULATION\tVARS\tCONSTRAINTS\tAVG SOLVE (ms)")?;
        for record in &records {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{:.3}",
                record.horizon,
                record.formulation,
                record.vars,
                record.constraints,
                record.avg_solve_ms
            )?;
        }
        writer.flush()?;
    }
    Ok(())
}

fn print_instance_table(instance: &ProblemInstance) -> anyhow::Result<()> {
    println!(
        "Instance: horizon {}, initial stock {:.2}",
        instance.horizon(),
        instance.initial_stock()
    );
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "SLOT\tDEMAND\tPROD COST\tSETUP COST\tHOLDING COST")?;
    for t in instance.horizon().slots() {
        writeln!(
            writer,
            "{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            t,
            instance.demand(t),
            instance.production_cost(t),
            instance.setup_cost(t),
            instance.holding_cost(t)
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn print_solution_table(solution: &LotSolution) -> anyhow::Result<()> {
    println!(
        "{} optimum: objective {:.2} ({:.2} ms)",
        solution.formulation(),
        solution.objective(),
        solution.solve_time().as_secs_f64() * 1e3
    );
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "SLOT\tPRODUCTION\tSTOCK\tSETUP")?;
    for t in solution.horizon().slots() {
        writeln!(
            writer,
            "{}\t{:.1}\t{:.1}\t{}",
            t,
            solution.production(t),
            solution.stock(t),
            if solution.setup(t) { 1 } else { 0 }
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn print_pair_tables(solution: &LotSolution) -> anyhow::Result<()> {
    print_pair_matrix(solution, "Pair production", |s, d| {
        solution.pair_production(s, d)
    })?;
    print_pair_matrix(solution, "Pair stock", |s, d| solution.pair_stock(s, d))
}

fn print_pair_matrix<F>(solution: &LotSolution, label: &str, cell: F) -> anyhow::Result<()>
where
    F: Fn(Slot, Slot) -> Option<f64>,
{
    let horizon = solution.horizon();
    println!("{} (rows = source slot, columns = destination slot):", label);
    let mut writer = TabWriter::new(io::stdout());
    let mut header = String::from("SRC");
    for d in horizon.slots() {
        header.push_str(&format!("\t{}", d));
    }
    writeln!(writer, "{}", header)?;
    for s in horizon.slots() {
        let mut row = format!("{}", s);
        for d in horizon.slots() {
            match cell(s, d) {
                Some(v) => row.push_str(&format!("\t{:.0}", v)),
                None => row.push_str("\t."),
            }
        }
        writeln!(writer, "{}", row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_solution_json(solution: &LotSolution) -> anyhow::Result<()> {
    let horizon = solution.horizon();
    let schedule: Vec<_> = horizon
        .slots()
        .map(|t| {
            json!({
                "slot": t.value(),
                "production": solution.production(t),
                "stock": solution.stock(t),
                "setup": solution.setup(t),
            })
        })
        .collect();
    let payload = json!({
        "formulation": solution.formulation(),
        "horizon": horizon.len(),
        "objective": solution.objective(),
        "solve_time_ms": solution.solve_time().as_secs_f64() * 1e3,
        "schedule": schedule,
    });
    serde_json::to_writer_pretty(io::stdout(), &payload)
        .map_err(|err| anyhow::anyhow!("serializing solution to JSON: {err}"))?;
    println!();
    Ok(())
}
