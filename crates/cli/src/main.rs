//! Footprint predictor CLI.
//!
//! This binary drives the predictor from the command line. It performs:
//! 1. **Workload run:** Replay one of the canonical synthetic workloads with its built-in configuration.
//! 2. **Trace replay:** Replay an address trace file under a JSON configuration.
//!
//! Results are printed as a sectioned statistics report, or as JSON with `--json`.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::BufReader;
use std::process;

use footprint_predictor::FootprintPredictor;
use footprint_predictor::common::constants::DEFAULT_SEED;
use footprint_predictor::config::PredictorConfig;
use footprint_predictor::sim::TraceReport;
use footprint_predictor::sim::trace::replay_trace;
use footprint_predictor::sim::workloads::{Workload, run_workload};
use footprint_predictor::stats::STATS_SECTIONS;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fpsim",
    author,
    version,
    about = "Footprint-based huge-page migration predictor",
    long_about = "Replay address streams through a two-tier memory migration predictor.\n\nExamples:\n  fpsim workload sequential-stride\n  fpsim workload hotcold-random --seed 7 --json\n  fpsim trace addrs.txt --config predictor.json --sections summary"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a built-in synthetic workload.
    Workload {
        /// Workload to run.
        #[arg(value_enum)]
        name: WorkloadArg,

        /// Seed for the predictor and for random address streams.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Replay an address trace (one address per line, decimal or 0x-hex).
    Trace {
        /// Trace file.
        path: String,

        /// JSON predictor configuration.
        #[arg(short, long)]
        config: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Stats sections to print (summary, footprint, residency); all if omitted.
    #[arg(long, value_delimiter = ',')]
    sections: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum WorkloadArg {
    SequentialStride,
    FootprintConflict,
    ResidencyFill,
    UniformRandom,
    HotcoldRandom,
}

impl From<WorkloadArg> for Workload {
    fn from(arg: WorkloadArg) -> Self {
        match arg {
            WorkloadArg::SequentialStride => Self::SequentialStride,
            WorkloadArg::FootprintConflict => Self::FootprintConflict,
            WorkloadArg::ResidencyFill => Self::ResidencyFill,
            WorkloadArg::UniformRandom => Self::UniformRandom,
            WorkloadArg::HotcoldRandom => Self::HotColdRandom,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Workload { name, seed, output } => cmd_workload(name.into(), seed, &output),
        Commands::Trace {
            path,
            config,
            output,
        } => cmd_trace(&path, &config, &output),
    };

    if let Err(msg) = result {
        eprintln!("Error: {msg}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs a canonical workload and prints its report.
fn cmd_workload(workload: Workload, seed: u64, output: &OutputArgs) -> Result<(), String> {
    let report = run_workload(workload, seed).map_err(|e| e.to_string())?;
    if !output.json {
        println!("[*] Workload: {workload} (seed {seed})");
    }
    print_report(&report, output)
}

/// Replays a trace file under a JSON configuration and prints its report.
fn cmd_trace(path: &str, config_path: &str, output: &OutputArgs) -> Result<(), String> {
    let json = fs::read_to_string(config_path)
        .map_err(|e| format!("reading config {config_path}: {e}"))?;
    let config = PredictorConfig::from_json(&json).map_err(|e| e.to_string())?;
    let mut predictor = FootprintPredictor::new(&config).map_err(|e| e.to_string())?;

    let file = File::open(path).map_err(|e| format!("opening trace {path}: {e}"))?;
    let report =
        replay_trace(&mut predictor, BufReader::new(file)).map_err(|e| e.to_string())?;
    if !output.json {
        println!("[*] Trace: {path} (policy {})", config.policy);
    }
    print_report(&report, output)
}

fn print_report(report: &TraceReport, output: &OutputArgs) -> Result<(), String> {
    if output.json {
        let text = serde_json::to_string_pretty(report).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if let Some(unknown) = output
        .sections
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        return Err(format!(
            "unknown stats section {unknown:?} (expected one of {STATS_SECTIONS:?})"
        ));
    }

    println!(
        "    {} queries, {} hits, first hits at {:?}",
        report.queries,
        report.hits,
        report.hit_transitions.iter().take(8).collect::<Vec<_>>()
    );
    println!();
    report.stats.print_sections(&output.sections);
    Ok(())
}
