//! Newtype wrappers and type aliases for domain concepts.
//!
//! A newtype for process identifiers prevents silent confusion with the
//! other integer quantities floating through the scheduler. Plain type
//! aliases cover quantities that need arithmetic (timestamps, priorities).

use std::fmt;

/// Process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulated time in milliseconds. One tick advances the clock by 1.
pub type TimeMs = u64;

/// External scheduling priority. Lower value = higher priority. Assigned
/// before admission and never recomputed by the scheduler.
pub type Priority = u32;

/// Life-cycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcState {
    /// Known from the input but not yet admitted.
    New,
    /// Admitted and eligible for dispatch (subject to its available time).
    Ready,
    /// Occupying the single CPU slot.
    Running,
    /// Blocked on an I/O burst.
    Waiting,
    /// Finished; retained in the roster for final bookkeeping.
    Terminated,
}

impl ProcState {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcState::New => "NEW",
            ProcState::Ready => "READY",
            ProcState::Running => "RUNNING",
            ProcState::Waiting => "WAITING",
            ProcState::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ProcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
