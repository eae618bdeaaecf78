//! Trace event recording for the simulator.
//!
//! Every state transition is recorded as a `TraceEvent` with a simulated
//! timestamp. The sequence is bit-exact for a given input and policy:
//! admissions, preemptions, and quantum expiries carry the tick at which
//! they were decided, while terminations, I/O entries, and I/O
//! completions carry the tick boundary after the millisecond that caused
//! them.

use crate::types::{Pid, ProcState, TimeMs};

/// A single state-transition event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Simulated time in milliseconds when the transition is reported.
    pub time: TimeMs,
    pub pid: Pid,
    pub from: ProcState,
    pub to: ProcState,
}

/// A complete simulation trace, in emission order.
///
/// Emission order is the causal order of the run: an event recorded with
/// a `+1` boundary timestamp still precedes everything decided in later
/// ticks.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, time: TimeMs, pid: Pid, from: ProcState, to: ProcState) {
        self.events.push(TraceEvent {
            time,
            pid,
            from,
            to,
        });
    }

    /// All events in emission order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Events involving one process, in emission order.
    pub fn transitions(&self, pid: Pid) -> Vec<&TraceEvent> {
        self.events.iter().filter(|e| e.pid == pid).collect()
    }

    /// Number of READY→RUNNING dispatches for a process.
    pub fn dispatch_count(&self, pid: Pid) -> usize {
        self.count(pid, ProcState::Ready, ProcState::Running)
    }

    /// Number of RUNNING→READY demotions (priority preemption or quantum
    /// expiry) for a process.
    pub fn demotion_count(&self, pid: Pid) -> usize {
        self.count(pid, ProcState::Running, ProcState::Ready)
    }

    /// Timestamps of every READY→RUNNING dispatch for a process.
    pub fn dispatch_times(&self, pid: Pid) -> Vec<TimeMs> {
        self.times(pid, ProcState::Ready, ProcState::Running)
    }

    /// Timestamps of every RUNNING→READY demotion for a process.
    pub fn demotion_times(&self, pid: Pid) -> Vec<TimeMs> {
        self.times(pid, ProcState::Running, ProcState::Ready)
    }

    /// Timestamp of the first dispatch, if the process ever ran.
    pub fn first_dispatch(&self, pid: Pid) -> Option<TimeMs> {
        self.dispatch_times(pid).first().copied()
    }

    /// Timestamp of the RUNNING→TERMINATED event, if the process finished.
    pub fn completion_time(&self, pid: Pid) -> Option<TimeMs> {
        self.times(pid, ProcState::Running, ProcState::Terminated)
            .first()
            .copied()
    }

    fn count(&self, pid: Pid, from: ProcState, to: ProcState) -> usize {
        self.events
            .iter()
            .filter(|e| e.pid == pid && e.from == from && e.to == to)
            .count()
    }

    fn times(&self, pid: Pid, from: ProcState, to: ProcState) -> Vec<TimeMs> {
        self.events
            .iter()
            .filter(|e| e.pid == pid && e.from == from && e.to == to)
            .map(|e| e.time)
            .collect()
    }

    /// Render the framed execution report: a begin marker, one row per
    /// transition, and an end marker.
    pub fn render_report(&self) -> String {
        // Frame width matches the 9/10/10/10 column layout below.
        let frame = format!("+{}+", "-".repeat(50));
        let mut out = String::new();
        out.push_str(&frame);
        out.push('\n');
        out.push_str(&format!(
            "| {:>9} | {:>10} | {:<10} | {:<10} |\n",
            "Time (ms)", "PID", "Old State", "New State"
        ));
        out.push_str(&frame);
        out.push('\n');
        for e in &self.events {
            out.push_str(&format!(
                "| {:>9} | {:>10} | {:<10} | {:<10} |\n",
                e.time,
                e.pid.0,
                e.from.as_str(),
                e.to.as_str()
            ));
        }
        out.push_str(&frame);
        out.push('\n');
        out
    }

    /// Pretty-print the trace to stderr for debugging.
    pub fn dump(&self) {
        for e in &self.events {
            eprintln!(
                "[{:>9}] pid={:<6} {} -> {}",
                e.time, e.pid.0, e.from, e.to
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        let mut trace = Trace::new();
        trace.record(0, Pid(1), ProcState::New, ProcState::Ready);
        trace.record(0, Pid(1), ProcState::Ready, ProcState::Running);
        trace.record(20, Pid(1), ProcState::Running, ProcState::Waiting);
        trace.record(25, Pid(1), ProcState::Waiting, ProcState::Ready);
        trace.record(25, Pid(1), ProcState::Ready, ProcState::Running);
        trace.record(45, Pid(1), ProcState::Running, ProcState::Terminated);
        trace
    }

    #[test]
    fn test_query_helpers() {
        let trace = sample();
        assert_eq!(trace.dispatch_count(Pid(1)), 2);
        assert_eq!(trace.dispatch_times(Pid(1)), vec![0, 25]);
        assert_eq!(trace.demotion_count(Pid(1)), 0);
        assert_eq!(trace.first_dispatch(Pid(1)), Some(0));
        assert_eq!(trace.completion_time(Pid(1)), Some(45));
        assert_eq!(trace.transitions(Pid(2)).len(), 0);
    }

    #[test]
    fn test_report_framing_and_rows() {
        let report = sample().render_report();
        let lines: Vec<&str> = report.lines().collect();
        // Begin marker, column header, separator, 6 rows, end marker.
        assert_eq!(lines.len(), 3 + 6 + 1);
        assert!(lines[0].starts_with("+--"));
        assert!(lines[1].contains("Time (ms)"));
        assert!(lines[3].contains("| NEW        | READY      |"));
        assert!(lines
            .iter()
            .any(|l| l.contains("RUNNING") && l.contains("TERMINATED")));
        assert_eq!(lines.last(), Some(&lines[0]));
        // All rows share the frame width.
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }
}
