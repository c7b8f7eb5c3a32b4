//! Reads a calculation request as JSON, runs the selected method and prints the result with its
//! step trace. Logs go to stderr; stdout carries only the result.

use std::{
    fs,
    io::{stdin, Read as _},
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use mcdm::{export, Config, DecisionInput, Method, Step};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "mcdm")]
#[command(about = "Rank alternatives with SAW, WP, TOPSIS or AHP")]
#[command(version)]
struct Cli {
    /// Method to run (saw, wp, topsis, ahp)
    #[arg(short, long)]
    method: Method,

    /// Request file, read from stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Also write the step trace into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Format of the step trace written to --out-dir
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// AHP consistency ratio at or above which judgments are reported as inconsistent
    /// [default: MCDM_CONSISTENCY_THRESHOLD or 0.1]
    #[arg(long)]
    consistency_threshold: Option<f64>,

    /// Fail instead of warning when the AHP criteria judgments are inconsistent
    /// [default: MCDM_STRICT_CONSISTENCY or false]
    #[arg(long)]
    strict_consistency: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the environment settings.
    fn config(&self, mut config: Config) -> Result<Config, mcdm::Error> {
        if let Some(threshold) = self.consistency_threshold {
            config.consistency_threshold = threshold;
        }
        config.strict_consistency |= self.strict_consistency;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Calculation(#[from] mcdm::Error),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AhpRequest {
    #[serde(default)]
    alternatives: Vec<String>,
    #[serde(default)]
    criteria: Vec<String>,
    pairwise_comparisons: Option<serde_json::Value>,
}

struct Output {
    steps: Vec<Step>,
    result: serde_json::Value,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.config(Config::from_env()?)?;

    let request = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let output = calculate(cli.method, &config, &request)?;
    println!("{}", serde_json::to_string_pretty(&output.result)?);

    if let Some(dir) = &cli.out_dir {
        write_trace(dir, cli.format, &output.steps)?;
    }
    Ok(())
}

fn calculate(method: Method, config: &Config, request: &str) -> Result<Output, CliError> {
    match method {
        Method::Ahp => {
            let request: AhpRequest = serde_json::from_str(request)?;
            let comparisons =
                mcdm::PairwiseComparisons::from_json(request.pairwise_comparisons.as_ref())?;
            let calculation = mcdm::calculate_ahp_with(
                config,
                &request.alternatives,
                &request.criteria,
                Some(&comparisons),
            )?;
            let best = &calculation.result.ranking[0];
            tracing::info!(
                %method,
                best = best.index,
                score = best.value,
                criteria_cr = calculation.consistency_results.criteria_cr,
                "calculation complete"
            );
            Ok(Output {
                steps: calculation.steps.clone(),
                result: serde_json::to_value(&calculation)?,
            })
        }
        _ => {
            let input: DecisionInput = serde_json::from_str(request)?;
            let calculation = mcdm::calculate(method, &input)?;
            let best = &calculation.result[0];
            tracing::info!(
                %method,
                best = best.index,
                score = best.value,
                "calculation complete"
            );
            Ok(Output {
                steps: calculation.steps.clone(),
                result: serde_json::to_value(&calculation)?,
            })
        }
    }
}

fn write_trace(dir: &Path, format: Format, steps: &[Step]) -> Result<(), CliError> {
    fs::create_dir_all(dir)?;
    match format {
        Format::Json => {
            let path = dir.join("calculation_results.json");
            fs::write(&path, export::to_json(steps)?)?;
            tracing::info!(path = %path.display(), "wrote step trace");
        }
        Format::Csv => {
            for (i, sheet) in export::to_sheets(steps).iter().enumerate() {
                let path = dir.join(format!("{:02}_{}.csv", i + 1, sheet.file_stem()));
                fs::write(&path, sheet.to_csv())?;
            }
            tracing::info!(dir = %dir.display(), steps = steps.len(), "wrote step sheets");
        }
    }
    Ok(())
}
