#![allow(dead_code)]

use schedsim::{ProcState, Trace};
use tracing_subscriber::EnvFilter;

/// Install a tracing subscriber driven by RUST_LOG. Safe to call from
/// every test; later calls are no-ops.
pub fn setup_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Replay the trace and assert the single-CPU invariant: at most one
/// process is RUNNING at any point in emission order.
pub fn assert_single_runner(trace: &Trace) {
    let mut occupant = None;
    for e in trace.events() {
        match (e.from, e.to) {
            (_, ProcState::Running) => {
                assert_eq!(
                    occupant, None,
                    "pid {} dispatched at {} while the CPU is busy",
                    e.pid, e.time
                );
                occupant = Some(e.pid);
            }
            (ProcState::Running, _) => {
                assert_eq!(
                    occupant,
                    Some(e.pid),
                    "pid {} left the CPU at {} without holding it",
                    e.pid,
                    e.time
                );
                occupant = None;
            }
            _ => {}
        }
    }
}
