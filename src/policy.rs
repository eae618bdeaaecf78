//! Dispatch policies: which ready process runs next, and when the
//! running one must yield.
//!
//! Both shipped policies share the selection rule in
//! [`DispatchPolicy::select_next`]; they differ only in preemption and
//! quantum bookkeeping, so the tick driver is written once and
//! parameterized by this trait.

use std::collections::VecDeque;

use crate::process::Pcb;
use crate::types::TimeMs;

/// Round-Robin time slice used by [`PriorityRoundRobin::default`].
pub const DEFAULT_QUANTUM: TimeMs = 100;

/// A dispatch/preemption policy plugged into the tick driver.
pub trait DispatchPolicy {
    /// Short policy name for logs and trace headers.
    fn name(&self) -> &'static str;

    /// Index of the ready process to dispatch: among entries whose
    /// `available_time` has passed, the minimum priority value, with ties
    /// broken by queue position (first admitted wins). `None` when nothing
    /// is eligible at `now`, even if the queue is non-empty.
    fn select_next(&self, ready: &VecDeque<Pcb>, now: TimeMs) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, p) in ready.iter().enumerate() {
            if p.available_time > now {
                continue;
            }
            match best {
                Some(b) if ready[b].priority <= p.priority => {}
                _ => best = Some(idx),
            }
        }
        best
    }

    /// Whether `candidate` should take the CPU from `running` right now.
    fn should_preempt(&self, running: &Pcb, candidate: &Pcb) -> bool;

    /// Whether a process that has run `consecutive` milliseconds without
    /// blocking or terminating must rotate back to the ready queue.
    fn quantum_expired(&self, consecutive: TimeMs) -> bool;
}

/// Non-preemptive external-priority dispatch.
///
/// Dispatches only into an idle CPU slot; once running, a process keeps
/// the CPU until it terminates or blocks on I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalPriority;

impl DispatchPolicy for ExternalPriority {
    fn name(&self) -> &'static str {
        "ep"
    }

    fn should_preempt(&self, _running: &Pcb, _candidate: &Pcb) -> bool {
        false
    }

    fn quantum_expired(&self, _consecutive: TimeMs) -> bool {
        false
    }
}

/// External-priority dispatch with priority preemption and Round-Robin
/// quantum rotation.
///
/// A strictly better (lower) priority in the ready set takes the CPU in
/// the same tick; a process that runs a full quantum without blocking is
/// rotated to the back of the ready queue.
#[derive(Debug, Clone, Copy)]
pub struct PriorityRoundRobin {
    pub quantum: TimeMs,
}

impl Default for PriorityRoundRobin {
    fn default() -> Self {
        PriorityRoundRobin {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl PriorityRoundRobin {
    pub fn with_quantum(quantum: TimeMs) -> Self {
        assert!(quantum > 0, "quantum must be positive");
        PriorityRoundRobin { quantum }
    }
}

impl DispatchPolicy for PriorityRoundRobin {
    fn name(&self) -> &'static str {
        "ep-rr"
    }

    fn should_preempt(&self, running: &Pcb, candidate: &Pcb) -> bool {
        candidate.priority < running.priority
    }

    fn quantum_expired(&self, consecutive: TimeMs) -> bool {
        consecutive >= self.quantum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessSpec;

    fn ready_with(entries: &[(u32, u32, TimeMs)]) -> VecDeque<Pcb> {
        entries
            .iter()
            .map(|&(pid, priority, available_time)| {
                let mut spec = ProcessSpec::cpu_bound(pid, 0, 10);
                spec.priority = priority;
                let mut pcb = Pcb::admit(&spec);
                pcb.available_time = available_time;
                pcb
            })
            .collect()
    }

    #[test]
    fn test_select_next_picks_minimum_priority() {
        let ready = ready_with(&[(1, 5, 0), (2, 2, 0), (3, 9, 0)]);
        assert_eq!(ExternalPriority.select_next(&ready, 0), Some(1));
    }

    #[test]
    fn test_select_next_fifo_among_ties() {
        let ready = ready_with(&[(7, 3, 0), (8, 3, 0), (9, 3, 0)]);
        assert_eq!(ExternalPriority.select_next(&ready, 0), Some(0));
    }

    #[test]
    fn test_select_next_skips_unavailable_entries() {
        // Best priority is not yet visible; the worse one must win.
        let ready = ready_with(&[(1, 1, 10), (2, 4, 0)]);
        assert_eq!(ExternalPriority.select_next(&ready, 5), Some(1));
        // Once time catches up, the better entry wins again.
        assert_eq!(ExternalPriority.select_next(&ready, 10), Some(0));
    }

    #[test]
    fn test_select_next_none_when_nothing_eligible() {
        let ready = ready_with(&[(1, 1, 10)]);
        assert_eq!(ExternalPriority.select_next(&ready, 9), None);
        assert_eq!(ExternalPriority.select_next(&VecDeque::new(), 0), None);
    }

    #[test]
    fn test_external_priority_never_preempts() {
        let ready = ready_with(&[(1, 1, 0), (2, 9, 0)]);
        assert!(!ExternalPriority.should_preempt(&ready[1], &ready[0]));
        assert!(!ExternalPriority.quantum_expired(TimeMs::MAX));
    }

    #[test]
    fn test_round_robin_preempts_strictly_better_only() {
        let ready = ready_with(&[(1, 1, 0), (2, 2, 0), (3, 2, 0)]);
        let policy = PriorityRoundRobin::default();
        assert!(policy.should_preempt(&ready[1], &ready[0]));
        assert!(!policy.should_preempt(&ready[1], &ready[2]));
        assert!(!policy.should_preempt(&ready[0], &ready[1]));
    }

    #[test]
    fn test_round_robin_quantum_boundary() {
        let policy = PriorityRoundRobin::default();
        assert!(!policy.quantum_expired(99));
        assert!(policy.quantum_expired(100));

        let short = PriorityRoundRobin::with_quantum(10);
        assert!(!short.quantum_expired(9));
        assert!(short.quantum_expired(10));
    }
}
