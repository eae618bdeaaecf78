//! Process model: input descriptors and runtime control blocks.

use crate::types::{Pid, Priority, ProcState, TimeMs};

/// Definition of a process as read from the input descriptor file.
///
/// This is the immutable input-side record; the scheduler core works on
/// [`Pcb`]s built from it at admission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: Pid,
    /// External priority; lower value wins dispatch. Defaults to the PID.
    pub priority: Priority,
    /// Memory footprint in MB, consumed only by the admission gate.
    pub mem_size: u64,
    /// Simulated millisecond at which the process becomes known.
    pub arrival_time: TimeMs,
    /// Total CPU time the process needs to complete.
    pub burst_time: TimeMs,
    /// Consecutive running milliseconds before an I/O burst is due.
    /// Zero means the process never performs I/O.
    pub io_freq: TimeMs,
    /// Length of each I/O burst in milliseconds.
    pub io_duration: TimeMs,
}

impl ProcessSpec {
    /// Convenience: a pure CPU-bound process with no I/O, priority equal
    /// to its PID, and a nominal 1 MB footprint.
    pub fn cpu_bound(pid: u32, arrival_time: TimeMs, burst_time: TimeMs) -> Self {
        ProcessSpec {
            pid: Pid(pid),
            priority: pid,
            mem_size: 1,
            arrival_time,
            burst_time,
            io_freq: 0,
            io_duration: 0,
        }
    }
}

/// Process control block: the canonical per-process runtime record.
///
/// Created on admission, mutated throughout the process's life, and
/// retained in the roster (in its final state) until simulation end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcb {
    pub pid: Pid,
    pub priority: Priority,
    pub mem_size: u64,
    pub arrival_time: TimeMs,
    /// First millisecond the process was dispatched; set at most once.
    pub start_time: Option<TimeMs>,
    /// CPU milliseconds left; the process terminates when this hits zero.
    pub remaining_time: TimeMs,
    pub io_freq: TimeMs,
    pub io_duration: TimeMs,
    /// Running milliseconds accumulated since the last I/O completion.
    pub time_since_last_io: TimeMs,
    /// Countdown of the current I/O burst; meaningful only while WAITING.
    pub io_remaining: TimeMs,
    /// Earliest millisecond at which the process may be dispatched.
    pub available_time: TimeMs,
    pub state: ProcState,
}

impl Pcb {
    /// Build the READY-state record for a freshly admitted process.
    pub(crate) fn admit(spec: &ProcessSpec) -> Self {
        Pcb {
            pid: spec.pid,
            priority: spec.priority,
            mem_size: spec.mem_size,
            arrival_time: spec.arrival_time,
            start_time: None,
            remaining_time: spec.burst_time,
            io_freq: spec.io_freq,
            io_duration: spec.io_duration,
            time_since_last_io: 0,
            io_remaining: 0,
            available_time: 0,
            state: ProcState::Ready,
        }
    }

    /// Whether this process ever blocks on I/O.
    pub fn performs_io(&self) -> bool {
        self.io_freq > 0
    }
}
