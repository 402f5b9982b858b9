use crate::{CoreId, Job, TimeStep};

/// Represents a single core of the simulated machine.
#[derive(Debug)]
pub struct Core {
    id: CoreId,        // Index of the core in the core table
    job: Option<Job>,  // Job currently running on the core, if any
}

impl Core {
    /// Creates an idle core.
    pub fn new(id: CoreId) -> Self {
        Self { id, job: None }
    }

    pub fn id(&self) -> CoreId {
        self.id
    }

    pub fn is_idle(&self) -> bool {
        self.job.is_none()
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    /// Puts `job` on the core and returns whatever was running before.
    pub fn assign(&mut self, job: Job) -> Option<Job> {
        self.job.replace(job)
    }

    /// Takes the running job off the core, leaving it idle.
    pub fn release(&mut self) -> Option<Job> {
        self.job.take()
    }

    /// Charges `elapsed` units of work to the running job.
    pub fn advance(&mut self, elapsed: TimeStep) {
        if let Some(job) = self.job.as_mut() {
            job.schedule(elapsed);
        }
    }
}
