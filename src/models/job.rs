use super::{Priority, TimeStep, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    id: ID,                         // Caller-supplied unique identifier
    arrival_time: TimeStep,         // Time the job became known to the scheduler
    start_time: Option<TimeStep>,   // First time the job occupied a core, if any
    running_time: TimeStep,         // Total CPU time required
    remaining_time: TimeStep,       // CPU time still required
    priority: Priority,             // Lower value = higher priority
}

impl Job {
    pub fn new(id: ID, arrival_time: TimeStep, running_time: TimeStep, priority: Priority) -> Self {
        Self {
            id,
            arrival_time,
            start_time: None,
            running_time,
            remaining_time: running_time,
            priority,
        }
    }

    pub fn id(&self) -> ID {
        self.id
    }

    pub fn arrival_time(&self) -> TimeStep {
        self.arrival_time
    }

    pub fn start_time(&self) -> Option<TimeStep> {
        self.start_time
    }

    pub fn running_time(&self) -> TimeStep {
        self.running_time
    }

    pub fn remaining_time(&self) -> TimeStep {
        self.remaining_time
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Records `t` as the start time unless the job already ran.
    pub fn start_if_new(&mut self, t: TimeStep) {
        if self.start_time.is_none() {
            self.start_time = Some(t);
        }
    }

    pub fn set_start(&mut self, t: TimeStep) {
        self.start_time = Some(t);
    }

    /// Forgets a start that happened at `t`; used when a job is evicted in the
    /// same tick it was placed, so it is not credited with having run.
    pub fn unstart_if_started_at(&mut self, t: TimeStep) {
        if self.start_time == Some(t) {
            self.start_time = None;
        }
    }

    pub fn schedule(&mut self, n_steps: TimeStep) {
        self.remaining_time = self.remaining_time.saturating_sub(n_steps);
    }
}
