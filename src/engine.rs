//! The tick driver: one deterministic millisecond loop shared by every
//! dispatch policy.
//!
//! Each tick runs four phases in a fixed order: arrivals, I/O countdown,
//! dispatch (with preemption for policies that ask for it), then one
//! millisecond of execution for the running process. Phase order is what
//! makes traces reproducible, so it never varies by policy.

use tracing::{debug, info, warn};

use crate::gate::{AdmissionGate, AdmitAll};
use crate::policy::DispatchPolicy;
use crate::process::{Pcb, ProcessSpec};
use crate::queues::RunQueues;
use crate::scenario::Scenario;
use crate::trace::Trace;
use crate::types::{ProcState, TimeMs};

/// How a simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    /// Every admitted process terminated.
    Completed,
    /// Nothing left anywhere and no future arrivals. This is the exit for
    /// an empty input or a run whose every arrival was rejected.
    NoWork,
    /// The tick limit fired before the workload drained.
    Watchdog,
}

/// Everything a finished run produces.
#[derive(Debug)]
pub struct SimulationResult {
    pub trace: Trace,
    /// Final roster, one entry per admitted process, in admission order.
    pub processes: Vec<Pcb>,
    /// Tick at which the driver stopped.
    pub end_time: TimeMs,
    pub exit: ExitKind,
}

/// A single-CPU simulator parameterized by its dispatch policy.
pub struct Simulator<P: DispatchPolicy> {
    policy: P,
    gate: Box<dyn AdmissionGate>,
}

impl<P: DispatchPolicy> Simulator<P> {
    /// Simulator with the given policy and no memory constraints.
    pub fn new(policy: P) -> Self {
        Simulator {
            policy,
            gate: Box::new(AdmitAll),
        }
    }

    /// Simulator whose arrivals must pass an admission gate.
    pub fn with_gate(policy: P, gate: Box<dyn AdmissionGate>) -> Self {
        Simulator { policy, gate }
    }

    /// Run the scenario to completion and return the trace, final roster,
    /// and exit reason.
    pub fn run(&mut self, scenario: &Scenario) -> SimulationResult {
        let mut incoming: Vec<ProcessSpec> = scenario.processes.clone();
        let mut queues = RunQueues::new();
        let mut trace = Trace::new();
        let mut time_slice: TimeMs = 0;
        let mut now: TimeMs = 0;

        info!(
            policy = self.policy.name(),
            processes = incoming.len(),
            "simulation start"
        );

        let exit = loop {
            // Done only when every admitted process terminated and no
            // arrival is still pending; an idle gap before a late arrival
            // must keep the clock ticking.
            if !queues.roster.is_empty() && queues.all_terminated() && incoming.is_empty() {
                break ExitKind::Completed;
            }
            if let Some(max_ticks) = scenario.max_ticks {
                if now >= max_ticks {
                    warn!(now, "tick limit reached, aborting run");
                    break ExitKind::Watchdog;
                }
            }

            // Phase 1: arrivals due this tick, offered in input order.
            let mut idx = 0;
            while idx < incoming.len() {
                if incoming[idx].arrival_time != now {
                    idx += 1;
                    continue;
                }
                if self.gate.assign(&incoming[idx]) {
                    let spec = incoming.remove(idx);
                    debug!(pid = spec.pid.0, now, "admitted");
                    let pcb = Pcb::admit(&spec);
                    trace.record(now, pcb.pid, ProcState::New, ProcState::Ready);
                    queues.admit(pcb);
                } else if scenario.retry_rejected_arrivals {
                    warn!(pid = incoming[idx].pid.0, now, "no memory, retrying next tick");
                    incoming[idx].arrival_time = now + 1;
                    idx += 1;
                } else {
                    let spec = incoming.remove(idx);
                    warn!(pid = spec.pid.0, now, "no memory, arrival dropped");
                }
            }

            // Phase 2: I/O countdown. A completed burst reports at the
            // next tick boundary and the process stays invisible to the
            // dispatcher until then.
            let waiting = std::mem::take(&mut queues.waiting);
            for mut pcb in waiting {
                pcb.io_remaining = pcb.io_remaining.saturating_sub(1);
                if pcb.io_remaining == 0 {
                    pcb.state = ProcState::Ready;
                    pcb.time_since_last_io = 0;
                    pcb.available_time = now + 1;
                    queues.sync_roster(&pcb);
                    trace.record(now + 1, pcb.pid, ProcState::Waiting, ProcState::Ready);
                    queues.ready.push_back(pcb);
                } else {
                    queues.waiting.push(pcb);
                }
            }

            // Phase 3: fill the CPU slot, preempting if the policy says so.
            match queues.running.take() {
                None => self.dispatch(&mut queues, now, &mut trace, &mut time_slice),
                Some(running) => {
                    let takeover = self
                        .policy
                        .select_next(&queues.ready, now)
                        .is_some_and(|i| self.policy.should_preempt(&running, &queues.ready[i]));
                    if takeover {
                        let mut demoted = running;
                        demoted.state = ProcState::Ready;
                        queues.sync_roster(&demoted);
                        trace.record(now, demoted.pid, ProcState::Running, ProcState::Ready);
                        info!(pid = demoted.pid.0, now, "preempted");
                        queues.ready.push_back(demoted);
                        time_slice = 0;
                        self.dispatch(&mut queues, now, &mut trace, &mut time_slice);
                    } else {
                        queues.running = Some(running);
                    }
                }
            }

            // Phase 4: run the occupant for one millisecond.
            if let Some(mut pcb) = queues.running.take() {
                pcb.remaining_time -= 1;
                if pcb.performs_io() {
                    pcb.time_since_last_io += 1;
                }

                if pcb.remaining_time == 0 {
                    pcb.state = ProcState::Terminated;
                    queues.sync_roster(&pcb);
                    self.gate.release(&pcb);
                    trace.record(now + 1, pcb.pid, ProcState::Running, ProcState::Terminated);
                    info!(pid = pcb.pid.0, end = now + 1, "terminated");
                    time_slice = 0;
                } else if pcb.performs_io() && pcb.time_since_last_io >= pcb.io_freq {
                    pcb.state = ProcState::Waiting;
                    pcb.io_remaining = pcb.io_duration;
                    pcb.time_since_last_io = 0;
                    queues.sync_roster(&pcb);
                    trace.record(now + 1, pcb.pid, ProcState::Running, ProcState::Waiting);
                    debug!(pid = pcb.pid.0, now, "blocked on io");
                    queues.waiting.push(pcb);
                    time_slice = 0;
                } else {
                    time_slice += 1;
                    queues.sync_roster(&pcb);
                    if self.policy.quantum_expired(time_slice) {
                        pcb.state = ProcState::Ready;
                        queues.sync_roster(&pcb);
                        trace.record(now, pcb.pid, ProcState::Running, ProcState::Ready);
                        debug!(pid = pcb.pid.0, now, "quantum expired");
                        queues.ready.push_back(pcb);
                        time_slice = 0;
                    } else {
                        queues.running = Some(pcb);
                    }
                }
            }

            // Nothing in the system and nothing still to arrive: stop
            // instead of ticking forever.
            if queues.is_empty() && !incoming.iter().any(|s| s.arrival_time > now) {
                break ExitKind::NoWork;
            }

            now += 1;
        };

        info!(end = now, ?exit, "simulation done");

        SimulationResult {
            trace,
            processes: queues.roster,
            end_time: now,
            exit,
        }
    }

    fn dispatch(
        &self,
        queues: &mut RunQueues,
        now: TimeMs,
        trace: &mut Trace,
        time_slice: &mut TimeMs,
    ) {
        let idx = match self.policy.select_next(&queues.ready, now) {
            Some(idx) => idx,
            None => return,
        };
        let mut pcb = queues
            .ready
            .remove(idx)
            .expect("select_next returned a valid index");
        if pcb.start_time.is_none() {
            pcb.start_time = Some(now);
        }
        pcb.state = ProcState::Running;
        queues.sync_roster(&pcb);
        trace.record(now, pcb.pid, ProcState::Ready, ProcState::Running);
        debug!(pid = pcb.pid.0, now, "dispatched");
        *time_slice = 0;
        queues.running = Some(pcb);
    }
}
