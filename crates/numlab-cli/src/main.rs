use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::{error, info};
use numlab_calculus::{relative_error, simpsons, step_sweep, trapezoidal};
use numlab_io::{SolveReport, load_system, write_report};
use numlab_solver::{
    GaussianBackend, LinearSolver, LinearSystemData, NativeBackend, PivotPolicy, SolveInfo,
};

fn usage() {
    eprintln!("usage:");
    eprintln!("  numlab solve <system.json> [--policy none|partial|auto] [--report <out.json>]");
    eprintln!("  numlab compare <system.json>");
    eprintln!("  numlab integrate <trapezoidal|simpsons> <a> <b> <slices>");
    eprintln!("  numlab differentiate <x> <decades> [--json]");
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Solve {
        path: PathBuf,
        policy: Option<PivotPolicy>,
        report: Option<PathBuf>,
    },
    Compare {
        path: PathBuf,
    },
    Integrate {
        rule: Rule,
        a: f64,
        b: f64,
        slices: usize,
    },
    Differentiate {
        x: f64,
        decades: u16,
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Trapezoidal,
    Simpsons,
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, String> {
    raw.parse().map_err(|_| format!("invalid {name}: '{raw}'"))
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(command) = args.first() else {
        return Err("missing command".to_string());
    };
    let rest = &args[1..];

    match command.as_str() {
        "solve" => {
            let Some(path) = rest.first() else {
                return Err("solve needs a system file".to_string());
            };
            let mut policy = None;
            let mut report = None;
            let mut i = 1;
            while i < rest.len() {
                let value = rest
                    .get(i + 1)
                    .ok_or_else(|| format!("{} needs a value", rest[i]))?;
                match rest[i].as_str() {
                    "--policy" => {
                        policy = Some(value.parse::<PivotPolicy>().map_err(|e| e.to_string())?)
                    }
                    "--report" => report = Some(PathBuf::from(value)),
                    other => return Err(format!("unknown option '{other}'")),
                }
                i += 2;
            }
            Ok(Command::Solve {
                path: PathBuf::from(path),
                policy,
                report,
            })
        }
        "compare" => match rest {
            [path] => Ok(Command::Compare {
                path: PathBuf::from(path),
            }),
            _ => Err("compare needs exactly one system file".to_string()),
        },
        "integrate" => match rest {
            [rule, a, b, slices] => {
                let rule = match rule.as_str() {
                    "trapezoidal" => Rule::Trapezoidal,
                    "simpsons" => Rule::Simpsons,
                    other => return Err(format!("unknown rule '{other}'")),
                };
                Ok(Command::Integrate {
                    rule,
                    a: parse_number("lower bound", a)?,
                    b: parse_number("upper bound", b)?,
                    slices: parse_number("slice count", slices)?,
                })
            }
            _ => Err("integrate needs a rule, two bounds and a slice count".to_string()),
        },
        "differentiate" => {
            let json = rest.last().is_some_and(|arg| arg == "--json");
            let positional = if json { &rest[..rest.len() - 1] } else { rest };
            match positional {
                [x, decades] => Ok(Command::Differentiate {
                    x: parse_number("point", x)?,
                    decades: parse_number("decade count", decades)?,
                    json,
                }),
                _ => Err("differentiate needs a point and a decade count".to_string()),
            }
        }
        other => Err(format!("unknown command '{other}'")),
    }
}

fn load(path: &Path) -> Result<(LinearSystemData, Option<PivotPolicy>), String> {
    let file = load_system(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let system = file
        .to_system()
        .map_err(|err| format!("{}: {err}", path.display()))?;
    Ok((system, file.policy))
}

fn print_solution(x: &[f64], info: &SolveInfo) {
    println!("solver: {}", info.solver_name);
    if let Some(swaps) = info.row_swaps {
        println!("row_swaps: {swaps}");
    }
    for (i, value) in x.iter().enumerate() {
        println!("x[{i}] = {value:.12e}");
    }
    println!("residual_norm: {:.3e}", info.residual_norm);
}

fn run_solve(
    path: &Path,
    policy: Option<PivotPolicy>,
    report: Option<&Path>,
) -> Result<(), String> {
    let (system, file_policy) = load(path)?;
    let policy = policy.or(file_policy).unwrap_or_default();
    let backend = GaussianBackend::new(policy);
    let (x, info) = backend
        .solve_linear(&system)
        .map_err(|err| format!("{}: {err}", backend.name()))?;
    print_solution(x.as_slice(), &info);

    if let Some(report_path) = report {
        let report = SolveReport::new(x.as_slice(), &info)
            .with_timestamp(chrono::Utc::now().to_rfc3339());
        write_report(report_path, &report)
            .map_err(|err| format!("{}: {err}", report_path.display()))?;
        info!("report written to {}", report_path.display());
    }
    Ok(())
}

fn run_compare(path: &Path) -> Result<(), String> {
    let (system, _) = load(path)?;
    let mut backends: Vec<Box<dyn LinearSolver>> = PivotPolicy::ALL
        .iter()
        .map(|&policy| Box::new(GaussianBackend::new(policy)) as Box<dyn LinearSolver>)
        .collect();
    backends.push(Box::new(NativeBackend));

    for backend in &backends {
        match backend.solve_linear(&system) {
            Ok((x, info)) => {
                let values: Vec<String> = x.iter().map(|v| format!("{v:.9e}")).collect();
                println!(
                    "{}: [{}] residual_norm={:.3e}",
                    backend.name(),
                    values.join(", "),
                    info.residual_norm
                );
            }
            Err(err) => println!("{}: error: {err}", backend.name()),
        }
    }
    Ok(())
}

fn arctan_kernel(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

fn run_integrate(rule: Rule, a: f64, b: f64, slices: usize) -> Result<(), String> {
    let value = match rule {
        Rule::Trapezoidal => trapezoidal(arctan_kernel, a, b, slices),
        Rule::Simpsons => simpsons(arctan_kernel, a, b, slices),
    }
    .map_err(|err| err.to_string())?;

    println!("integral: {value:.15}");
    // 4/(1+x^2) integrates to 4*atan(x)
    let exact = 4.0 * (b.atan() - a.atan());
    if exact != 0.0 {
        println!("relative_error: {:.3e}", relative_error(exact, value));
    }
    Ok(())
}

fn run_differentiate(x: f64, decades: u16, json: bool) -> Result<(), String> {
    let f = |t: f64| (-t * t).exp();
    let exact = -2.0 * x * (-x * x).exp();
    let sweep = step_sweep(f, x, exact, decades);

    for point in &sweep {
        if json {
            let line = serde_json::to_string(point).map_err(|err| err.to_string())?;
            println!("{line}");
        } else {
            println!(
                "h={:.0e} forward_error={:.3e} central_error={:.3e}",
                point.step, point.forward_error, point.central_error
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            usage();
            return ExitCode::from(2);
        }
    };

    let result = match command {
        Command::Solve {
            path,
            policy,
            report,
        } => run_solve(&path, policy, report.as_deref()),
        Command::Compare { path } => run_compare(&path),
        Command::Integrate { rule, a, b, slices } => run_integrate(rule, a, b, slices),
        Command::Differentiate { x, decades, json } => run_differentiate(x, decades, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn solve_accepts_policy_and_report() {
        let command = parse_args(&args(&[
            "solve",
            "sys.json",
            "--policy",
            "auto",
            "--report",
            "out.json",
        ]))
        .unwrap();
        assert_eq!(
            command,
            Command::Solve {
                path: PathBuf::from("sys.json"),
                policy: Some(PivotPolicy::AutoPivot),
                report: Some(PathBuf::from("out.json")),
            }
        );
    }

    #[test]
    fn solve_rejects_unknown_policy() {
        let err = parse_args(&args(&["solve", "sys.json", "--policy", "full"])).unwrap_err();
        assert!(err.contains("unknown pivot policy"));
    }

    #[test]
    fn integrate_parses_rule_and_bounds() {
        let command = parse_args(&args(&["integrate", "simpsons", "0", "1", "1000"])).unwrap();
        assert_eq!(
            command,
            Command::Integrate {
                rule: Rule::Simpsons,
                a: 0.0,
                b: 1.0,
                slices: 1000,
            }
        );
        assert!(parse_args(&args(&["integrate", "midpoint", "0", "1", "10"])).is_err());
    }

    #[test]
    fn differentiate_takes_optional_json_flag() {
        assert_eq!(
            parse_args(&args(&["differentiate", "0.5", "17", "--json"])).unwrap(),
            Command::Differentiate {
                x: 0.5,
                decades: 17,
                json: true,
            }
        );
        assert!(parse_args(&args(&["differentiate", "0.5"])).is_err());
        assert!(parse_args(&args(&["differentiate", "0.5", "70000"])).is_err());
    }

    #[test]
    fn missing_or_unknown_command_is_a_usage_error() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["benchmark"])).is_err());
    }
}
