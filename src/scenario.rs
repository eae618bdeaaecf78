//! Scenario construction: programmatic builder and descriptor-file parsing.

use anyhow::{bail, Context, Result};

use crate::process::ProcessSpec;
use crate::types::{Pid, TimeMs};

/// Default watchdog limit, generous enough for any sane workload.
pub const DEFAULT_MAX_TICKS: TimeMs = 1_000_000;

/// A complete simulation input: the process set plus driver knobs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub processes: Vec<ProcessSpec>,
    /// When true, an arrival rejected by the admission gate is re-offered
    /// on the next tick instead of being dropped.
    pub retry_rejected_arrivals: bool,
    /// Tick limit after which the driver gives up; `None` disables it.
    pub max_ticks: Option<TimeMs>,
}

impl Scenario {
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::default()
    }

    /// Parse a descriptor file: one process per line, six comma-separated
    /// fields `pid, size, arrival_time, processing_time, io_freq,
    /// io_duration`. Blank lines are skipped.
    pub fn from_descriptor_lines(input: &str) -> Result<Scenario> {
        let mut processes = Vec::new();
        for (lineno, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let spec = parse_descriptor_line(line)
                .with_context(|| format!("line {}: {:?}", lineno + 1, line))?;
            processes.push(spec);
        }
        Ok(Scenario {
            processes,
            retry_rejected_arrivals: false,
            max_ticks: Some(DEFAULT_MAX_TICKS),
        })
    }
}

/// Parse one descriptor line into a [`ProcessSpec`]. Priority defaults to
/// the PID, matching the descriptor format which carries no priority
/// column.
pub fn parse_descriptor_line(line: &str) -> Result<ProcessSpec> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 6 {
        bail!("expected 6 comma-separated fields, got {}", fields.len());
    }

    let parse = |idx: usize, name: &str| -> Result<u64> {
        fields[idx]
            .parse::<u64>()
            .with_context(|| format!("bad {} {:?}", name, fields[idx]))
    };

    let pid_raw = parse(0, "pid")?;
    let pid = u32::try_from(pid_raw).with_context(|| format!("pid {} out of range", pid_raw))?;
    let mem_size = parse(1, "size")?;
    let arrival_time = parse(2, "arrival_time")?;
    let burst_time = parse(3, "processing_time")?;
    let io_freq = parse(4, "io_freq")?;
    let io_duration = parse(5, "io_duration")?;

    if burst_time == 0 {
        bail!("processing_time must be positive");
    }

    Ok(ProcessSpec {
        pid: Pid(pid),
        priority: pid,
        mem_size,
        arrival_time,
        burst_time,
        io_freq,
        io_duration,
    })
}

/// Builder for programmatic scenarios, used heavily by the test suite.
#[derive(Debug, Clone, Default)]
pub struct ScenarioBuilder {
    processes: Vec<ProcessSpec>,
    retry_rejected_arrivals: bool,
    max_ticks: Option<TimeMs>,
}

impl ScenarioBuilder {
    /// Add a fully specified process.
    pub fn process(mut self, spec: ProcessSpec) -> Self {
        assert!(spec.burst_time > 0, "processing_time must be positive");
        self.processes.push(spec);
        self
    }

    /// Add a CPU-bound process with priority equal to its PID.
    pub fn add_process(self, pid: u32, arrival_time: TimeMs, burst_time: TimeMs) -> Self {
        self.process(ProcessSpec::cpu_bound(pid, arrival_time, burst_time))
    }

    pub fn retry_rejected_arrivals(mut self, retry: bool) -> Self {
        self.retry_rejected_arrivals = retry;
        self
    }

    pub fn max_ticks(mut self, max_ticks: TimeMs) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn no_watchdog(mut self) -> Self {
        self.max_ticks = None;
        self
    }

    /// Finish the scenario. An empty process list is allowed; the driver
    /// reports it as a run with no work.
    pub fn build(self) -> Scenario {
        Scenario {
            processes: self.processes,
            retry_rejected_arrivals: self.retry_rejected_arrivals,
            max_ticks: self.max_ticks.or(Some(DEFAULT_MAX_TICKS)),
        }
    }
}
