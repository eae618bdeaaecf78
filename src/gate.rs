//! Admission gates: the memory-placement decision the driver consults
//! before a NEW process becomes READY.

use tracing::debug;

use crate::process::{Pcb, ProcessSpec};
use crate::types::Pid;

/// Decides whether an arriving process can be loaded into memory.
///
/// The driver consults the gate exactly once per arrival offer; a `false`
/// answer skips admission for that tick.
pub trait AdmissionGate {
    fn assign(&mut self, spec: &ProcessSpec) -> bool;

    /// Invoked when an admitted process terminates, so gates that track
    /// occupancy can reclaim its memory.
    fn release(&mut self, _pcb: &Pcb) {}
}

/// Gate that admits everything. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmitAll;

impl AdmissionGate for AdmitAll {
    fn assign(&mut self, _spec: &ProcessSpec) -> bool {
        true
    }
}

/// Partition sizes (MB) of the classic fixed memory layout.
pub const PARTITION_SIZES: [u64; 6] = [40, 25, 15, 10, 8, 2];

/// Best-fit placement over a fixed set of memory partitions.
///
/// Each partition holds at most one process; the smallest free partition
/// that fits wins. Partitions are reclaimed when their occupant
/// terminates.
#[derive(Debug, Clone)]
pub struct FixedPartitions {
    sizes: Vec<u64>,
    /// `Some(pid)` when the partition at the same index is occupied.
    occupants: Vec<Option<Pid>>,
}

impl FixedPartitions {
    pub fn new() -> Self {
        Self::with_sizes(&PARTITION_SIZES)
    }

    pub fn with_sizes(sizes: &[u64]) -> Self {
        FixedPartitions {
            sizes: sizes.to_vec(),
            occupants: vec![None; sizes.len()],
        }
    }

    pub fn free_partitions(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_none()).count()
    }
}

impl Default for FixedPartitions {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmissionGate for FixedPartitions {
    fn assign(&mut self, spec: &ProcessSpec) -> bool {
        let mut best: Option<usize> = None;
        for (idx, &size) in self.sizes.iter().enumerate() {
            if self.occupants[idx].is_some() || size < spec.mem_size {
                continue;
            }
            match best {
                Some(b) if self.sizes[b] <= size => {}
                _ => best = Some(idx),
            }
        }
        match best {
            Some(idx) => {
                self.occupants[idx] = Some(spec.pid);
                debug!(
                    pid = spec.pid.0,
                    partition = idx,
                    size = self.sizes[idx],
                    "memory assigned"
                );
                true
            }
            None => false,
        }
    }

    fn release(&mut self, pcb: &Pcb) {
        for slot in &mut self.occupants {
            if *slot == Some(pcb.pid) {
                *slot = None;
                debug!(pid = pcb.pid.0, "memory released");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(pid: u32, mem_size: u64) -> ProcessSpec {
        let mut spec = ProcessSpec::cpu_bound(pid, 0, 10);
        spec.mem_size = mem_size;
        spec
    }

    #[test]
    fn test_best_fit_picks_smallest_sufficient_partition() {
        let mut gate = FixedPartitions::new();
        assert!(gate.assign(&spec(1, 9)));
        // 9 MB lands in the 10 MB partition, leaving 8 and 2 free.
        assert!(gate.assign(&spec(2, 9)));
        // Next 9 MB must climb to the 15 MB partition.
        assert_eq!(gate.free_partitions(), 4);
    }

    #[test]
    fn test_oversized_process_rejected() {
        let mut gate = FixedPartitions::new();
        assert!(!gate.assign(&spec(1, 41)));
        assert_eq!(gate.free_partitions(), PARTITION_SIZES.len());
    }

    #[test]
    fn test_release_reclaims_partition() {
        let mut gate = FixedPartitions::with_sizes(&[10]);
        assert!(gate.assign(&spec(1, 10)));
        assert!(!gate.assign(&spec(2, 10)));

        let pcb = Pcb::admit(&spec(1, 10));
        gate.release(&pcb);
        assert!(gate.assign(&spec(2, 10)));
    }

    #[test]
    fn test_admit_all_always_accepts() {
        let mut gate = AdmitAll;
        assert!(gate.assign(&spec(1, u64::MAX)));
    }
}
