/// Command-line default for `--cores`.
pub const DEFAULT_CORES: &str = "1";

/// Command-line default for `--quantum`, the round robin time slice.
pub const DEFAULT_QUANTUM: &str = "2";

/// Process exit status of the simulator binary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExitCode {
    Success = 0,
    InvalidArguments = 2,
    TraceUnreadable = 5,
    SchedulerFault = 6,
}
