use crate::{Job, TimeStep};

/// Running sums of the per-job timing metrics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Statistics {
    total_jobs: usize,
    waiting_time: TimeStep,
    response_time: TimeStep,
    turnaround_time: TimeStep,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a job as soon as it arrives; averages divide by this.
    pub fn record_arrival(&mut self) {
        self.total_jobs += 1;
    }

    /// Adds the metrics of `job`, which finished at `time`.
    pub fn record_completion(&mut self, job: &Job, time: TimeStep) {
        let turnaround = time.saturating_sub(job.arrival_time());
        self.turnaround_time += turnaround;
        self.waiting_time += turnaround.saturating_sub(job.running_time());
        // Every job on a core has a start time; fall back to `time` if not.
        let start = job.start_time().unwrap_or(time);
        self.response_time += start.saturating_sub(job.arrival_time());
    }

    pub fn total_jobs(&self) -> usize {
        self.total_jobs
    }

    pub fn waiting_time_sum(&self) -> TimeStep {
        self.waiting_time
    }

    pub fn response_time_sum(&self) -> TimeStep {
        self.response_time
    }

    pub fn turnaround_time_sum(&self) -> TimeStep {
        self.turnaround_time
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.average(self.waiting_time)
    }

    pub fn average_turnaround_time(&self) -> f64 {
        self.average(self.turnaround_time)
    }

    pub fn average_response_time(&self) -> f64 {
        self.average(self.response_time)
    }

    fn average(&self, sum: TimeStep) -> f64 {
        if self.total_jobs == 0 {
            return 0.0;
        }
        sum as f64 / self.total_jobs as f64
    }
}
