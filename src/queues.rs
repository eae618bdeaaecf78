//! Scheduling collections and the roster synchronization rule.

use std::collections::VecDeque;

use crate::process::Pcb;
use crate::types::ProcState;

/// The driver-owned set of scheduling collections.
///
/// A non-terminal process lives in exactly one of `ready`, `waiting`, or
/// the running slot. The roster keeps the authoritative copy of every
/// admitted process and must be refreshed whenever a queue copy changes
/// state, so no stale duplicate is ever observable.
#[derive(Debug, Default)]
pub struct RunQueues {
    /// Ready queue. Insertion order is the FIFO tiebreak among equal
    /// priorities.
    pub ready: VecDeque<Pcb>,
    /// Processes blocked on an I/O burst, each counting down independently.
    pub waiting: Vec<Pcb>,
    /// Single-CPU running slot; `None` means the CPU is idle.
    pub running: Option<Pcb>,
    /// Append-only list of every admitted process, used for the
    /// termination check and final bookkeeping.
    pub roster: Vec<Pcb>,
}

impl RunQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the roster's copy of `updated`, matched by pid.
    ///
    /// A missing roster entry is an implementation bug: every process is
    /// appended on admission and never removed.
    pub fn sync_roster(&mut self, updated: &Pcb) {
        let slot = self
            .roster
            .iter_mut()
            .find(|p| p.pid == updated.pid)
            .unwrap_or_else(|| panic!("roster has no entry for pid {}", updated.pid));
        *slot = updated.clone();
    }

    /// Place a freshly admitted process in the ready queue and roster.
    /// The admission gate has already accepted it.
    pub fn admit(&mut self, pcb: Pcb) {
        self.roster.push(pcb.clone());
        self.ready.push_back(pcb);
    }

    /// True iff every roster entry has terminated. An empty roster also
    /// reports true; the driver interprets that as "not yet started".
    pub fn all_terminated(&self) -> bool {
        self.roster.iter().all(|p| p.state == ProcState::Terminated)
    }

    /// True when no process is anywhere in the system.
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
            && self.ready.is_empty()
            && self.waiting.is_empty()
            && self.running.is_none()
    }
}
