//! schedsim - Deterministic discrete-time CPU scheduling simulator.
//!
//! The simulator advances in 1 ms ticks over a single CPU and records
//! every process state transition in a trace. Two dispatch policies ship:
//! non-preemptive external-priority, and external-priority with priority
//! preemption plus a Round-Robin quantum.
//!
//! Architecture:
//! - [`scenario`]: input construction, from a builder or a descriptor file
//! - [`gate`]: memory admission gates consulted before a process enters
//! - [`policy`]: the [`DispatchPolicy`] trait and the shipped policies
//! - [`engine`]: the tick driver, written once for all policies
//! - [`trace`]: the recorded transition stream and its query helpers
//!
//! # Usage
//!
//! ```
//! use schedsim::{ExternalPriority, ProcessSpec, Scenario, Simulator};
//!
//! let scenario = Scenario::builder()
//!     .process(ProcessSpec::cpu_bound(1, 0, 50))
//!     .process(ProcessSpec::cpu_bound(2, 0, 50))
//!     .build();
//!
//! let result = Simulator::new(ExternalPriority).run(&scenario);
//! assert_eq!(result.trace.completion_time(schedsim::Pid(2)), Some(100));
//! result.trace.dump();
//! ```

pub mod engine;
pub mod gate;
pub mod policy;
pub mod process;
pub mod queues;
pub mod scenario;
pub mod trace;
pub mod types;

pub use engine::{ExitKind, SimulationResult, Simulator};
pub use gate::{AdmissionGate, AdmitAll, FixedPartitions, PARTITION_SIZES};
pub use policy::{DispatchPolicy, ExternalPriority, PriorityRoundRobin, DEFAULT_QUANTUM};
pub use process::{Pcb, ProcessSpec};
pub use queues::RunQueues;
pub use scenario::{parse_descriptor_line, Scenario, ScenarioBuilder, DEFAULT_MAX_TICKS};
pub use trace::{Trace, TraceEvent};
pub use types::{Pid, Priority, ProcState, TimeMs};
