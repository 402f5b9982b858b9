//! Decision core of a discrete-event multi-core CPU scheduling simulator.
//!
//! [`scheduler::Scheduler`] decides which job occupies which core on every
//! arrival, completion and quantum expiry, under one of six [`Policy`] values,
//! and accumulates waiting, response and turnaround times. [`Simulation`]
//! drives it from a job trace.

pub mod models;
pub mod utils;

pub use models::scheduler;
pub use models::{
    read_trace_file, CoreId, Job, JobSpec, Policy, Priority, Simulation, SimulationReport, TimeStep,
    WaitQueue, ID,
};
pub use utils::{config, constants, errors};
