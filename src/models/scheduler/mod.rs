pub mod core;
pub mod scheduler;
pub mod stats;

pub use self::core::Core;
pub use scheduler::Scheduler;
pub use stats::Statistics;
