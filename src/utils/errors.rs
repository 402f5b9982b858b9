use thiserror::Error;

use crate::models::{CoreId, TimeStep};

/// Boundary violations detected by the scheduler core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Scheduler needs at least one core")]
    NoCores,

    #[error("Core {core} out of range ({cores} cores)")]
    CoreOutOfRange { core: CoreId, cores: usize },

    #[error("Core {core} is idle")]
    CoreIdle { core: CoreId },

    #[error("Event at time {time} is earlier than current time {now}")]
    TimeWentBackwards { time: TimeStep, now: TimeStep },
}

/// Failures while loading a job trace.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Unable to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed trace: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: invalid {field} '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: arrival time {arrival} does not come after {previous}")]
    UnorderedArrival {
        line: usize,
        arrival: TimeStep,
        previous: TimeStep,
    },

    #[error("Line {line}: too many jobs, ids would overflow")]
    TooManyJobs { line: usize },
}

/// Invalid simulation settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown scheduling scheme '{0}' (expected fcfs, sjf, psjf, pri, ppri or rr)")]
    UnknownPolicy(String),

    #[error("Invalid {name} '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Number of cores must be positive")]
    ZeroCores,

    #[error("Quantum must be positive")]
    ZeroQuantum,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_error_messages() {
        let error = SchedulerError::CoreOutOfRange { core: 4, cores: 2 };
        assert_eq!(error.to_string(), "Core 4 out of range (2 cores)");

        let error = SchedulerError::TimeWentBackwards { time: 3, now: 5 };
        assert_eq!(error.to_string(), "Event at time 3 is earlier than current time 5");
    }

    #[test]
    fn test_trace_error_messages() {
        let error = TraceError::InvalidField {
            line: 2,
            field: "running time",
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Line 2: invalid running time 'abc'");
        assert_eq!(
            TraceError::TooManyJobs { line: 7 }.to_string(),
            "Line 7: too many jobs, ids would overflow"
        );
    }

    #[test]
    fn test_config_error_messages() {
        let error = ConfigError::UnknownPolicy("edf".to_string());
        assert!(error.to_string().contains("'edf'"));
        assert_eq!(ConfigError::ZeroCores.to_string(), "Number of cores must be positive");
    }
}
