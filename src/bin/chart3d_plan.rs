use chart3d::api::{ChartConfig, ChartGenerator};
use chart3d::core::classifier::{assign_roles, classify_table};
use chart3d::core::loader::{CsvTable, DEFAULT_PREVIEW_ROWS};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Plan,
    Preview,
    Classify,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    csv: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    rows: usize,
}

#[derive(Debug, Serialize)]
struct ClassifyReport {
    columns: Vec<ClassifiedColumn>,
    label: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClassifiedColumn {
    name: String,
    role: chart3d::core::ColumnRole,
}

fn main() {
    let _ = chart3d::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    match args.command {
        CommandKind::Plan => {
            let config_path = args
                .config
                .as_deref()
                .ok_or_else(|| "plan requires --config <path>".to_owned())?;
            let raw = fs::read_to_string(config_path)
                .map_err(|err| format!("failed to read `{}`: {err}", config_path.display()))?;
            let config = ChartConfig::from_json_str(&raw).map_err(|err| err.to_string())?;
            let generator = ChartGenerator::new(config).map_err(|err| err.to_string())?;
            let plan = generator
                .plan_from_path(&args.csv)
                .map_err(|err| err.to_string())?;
            for warning in &plan.warnings {
                eprintln!("warning: {warning}");
            }
            let json = plan
                .to_json_pretty()
                .map_err(|err| err.to_string())?;
            emit(args.output.as_deref(), &json)
        }
        CommandKind::Preview => {
            let table = CsvTable::from_path(&args.csv).map_err(|err| err.to_string())?;
            emit_json(args.output.as_deref(), &table.preview(args.rows))
        }
        CommandKind::Classify => {
            let table = CsvTable::from_path(&args.csv).map_err(|err| err.to_string())?;
            let classification = classify_table(&table);
            let roles = assign_roles(&classification);
            let report = ClassifyReport {
                columns: classification
                    .into_iter()
                    .map(|(name, role)| ClassifiedColumn { name, role })
                    .collect(),
                label: roles.label,
                value: roles.value,
            };
            emit_json(args.output.as_deref(), &report)
        }
    }
}

fn emit_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    emit(output, &json)
}

fn emit(output: Option<&Path>, json: &str) -> Result<(), String> {
    match output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    const USAGE: &str = "usage: chart3d_plan <plan|preview|classify> --csv <path> [--config <path>] [--rows <n>] [--output <path>]";

    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("plan") => CommandKind::Plan,
        Some("preview") => CommandKind::Preview,
        Some("classify") => CommandKind::Classify,
        _ => return Err(USAGE.to_owned()),
    };

    let mut csv = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut rows = DEFAULT_PREVIEW_ROWS;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--csv" => csv = Some(PathBuf::from(value()?)),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--rows" => {
                let raw = value()?;
                rows = raw
                    .parse()
                    .map_err(|_| format!("invalid --rows value `{raw}`"))?;
            }
            _ => return Err(format!("unknown flag `{flag}`\n{USAGE}")),
        }
    }

    let csv = csv.ok_or_else(|| format!("missing --csv\n{USAGE}"))?;
    Ok(CliArgs {
        command,
        csv,
        config,
        output,
        rows,
    })
}
