//! Command-line front end: read a descriptor file, simulate, and write
//! the framed execution report next to the input.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use schedsim::{
    AdmissionGate, AdmitAll, ExternalPriority, FixedPartitions, PriorityRoundRobin, Scenario,
    SimulationResult, Simulator, DEFAULT_MAX_TICKS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Non-preemptive external-priority dispatch.
    Ep,
    /// External-priority dispatch with preemption and a 100 ms
    /// Round-Robin quantum.
    EpRr,
}

#[derive(Debug, Parser)]
#[command(version, about = "Deterministic single-CPU scheduling simulator")]
struct Cli {
    /// Process descriptor file: one `pid, size, arrival_time,
    /// processing_time, io_freq, io_duration` line per process.
    input: PathBuf,

    /// Dispatch policy.
    #[arg(short, long, value_enum, default_value_t = Policy::Ep)]
    policy: Policy,

    /// Report path. Defaults to `executionN.txt` for a `testN.txt` input,
    /// `execution_<stem>.txt` otherwise.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gate arrivals through the fixed memory partitions instead of
    /// admitting everything.
    #[arg(long)]
    partitions: bool,

    /// Re-offer arrivals the memory gate rejects on the next tick instead
    /// of dropping them.
    #[arg(long)]
    retry_rejected: bool,

    /// Tick limit before the run is aborted. 0 disables the limit.
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,

    /// Pretty-print the trace to stderr as well.
    #[arg(long)]
    dump_trace: bool,
}

fn derive_output_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match stem.strip_prefix("test") {
        Some(suffix) if !suffix.is_empty() => format!("execution{}.txt", suffix),
        _ => format!("execution_{}.txt", stem),
    };
    input.with_file_name(name)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let mut scenario = Scenario::from_descriptor_lines(&input)
        .with_context(|| format!("invalid descriptor file {}", cli.input.display()))?;
    scenario.retry_rejected_arrivals = cli.retry_rejected;
    scenario.max_ticks = (cli.max_ticks > 0).then_some(cli.max_ticks);

    let gate: Box<dyn AdmissionGate> = if cli.partitions {
        Box::new(FixedPartitions::new())
    } else {
        Box::new(AdmitAll)
    };

    let result: SimulationResult = match cli.policy {
        Policy::Ep => Simulator::with_gate(ExternalPriority, gate).run(&scenario),
        Policy::EpRr => Simulator::with_gate(PriorityRoundRobin::default(), gate).run(&scenario),
    };

    if cli.dump_trace {
        result.trace.dump();
    }

    let out_path = cli.output.unwrap_or_else(|| derive_output_name(&cli.input));
    fs::write(&out_path, result.trace.render_report())
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    println!(
        "{:?} after {} ms, {} process(es), report written to {}",
        result.exit,
        result.end_time,
        result.processes.len(),
        out_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_name() {
        assert_eq!(
            derive_output_name(Path::new("test3.txt")),
            PathBuf::from("execution3.txt")
        );
        assert_eq!(
            derive_output_name(Path::new("inputs/test12.txt")),
            PathBuf::from("inputs/execution12.txt")
        );
        assert_eq!(
            derive_output_name(Path::new("workload.txt")),
            PathBuf::from("execution_workload.txt")
        );
        assert_eq!(
            derive_output_name(Path::new("test.txt")),
            PathBuf::from("execution_test.txt")
        );
    }
}
