use crate::errors::ConfigError;
use crate::{Policy, TimeStep};

/// Settings for one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    cores: usize,
    policy: Policy,
    quantum: TimeStep, // Only used by round robin
}

impl SimulationConfig {
    pub fn new(cores: usize, policy: Policy, quantum: TimeStep) -> Result<Self, ConfigError> {
        if cores == 0 {
            return Err(ConfigError::ZeroCores);
        }
        if quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(Self {
            cores,
            policy,
            quantum,
        })
    }

    /// Builds a config from the raw command-line strings.
    pub fn parse(cores: &str, scheme: &str, quantum: &str) -> Result<Self, ConfigError> {
        let cores = cores
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidNumber {
                name: "cores",
                value: cores.to_string(),
            })?;
        let quantum = quantum
            .trim()
            .parse::<TimeStep>()
            .map_err(|_| ConfigError::InvalidNumber {
                name: "quantum",
                value: quantum.to_string(),
            })?;
        Self::new(cores, scheme.parse()?, quantum)
    }

    pub fn cores(&self) -> usize {
        self.cores
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn quantum(&self) -> TimeStep {
        self.quantum
    }
}
