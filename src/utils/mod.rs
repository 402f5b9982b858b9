pub mod config;
pub mod constants;
pub mod errors;

pub use config::SimulationConfig;
pub use constants::ExitCode;
pub use errors::{ConfigError, SchedulerError, TraceError};
