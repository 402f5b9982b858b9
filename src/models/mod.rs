mod job;
pub mod policy;
pub mod wait_queue;
pub mod scheduler;
pub mod trace;
pub mod simulation;

pub use job::Job;
pub use policy::Policy;
pub use wait_queue::WaitQueue;
pub use simulation::{Simulation, SimulationReport};
pub use trace::{read_trace_file, JobSpec};

pub type TimeStep = u64;

pub type ID = u32;

pub type CoreId = usize;

pub type Priority = i32;
