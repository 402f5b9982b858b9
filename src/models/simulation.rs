use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::errors::SchedulerError;
use crate::scheduler::Scheduler;
use crate::{JobSpec, Policy, TimeStep, ID};

/// Averages produced by a finished simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub jobs: usize,
    pub end_time: TimeStep,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
}

// Driver-side view of a busy core.
#[derive(Debug, Clone, Copy)]
struct Slot {
    job: ID,
    slice_used: TimeStep,
}

impl Slot {
    fn new(job: ID) -> Self {
        Self { job, slice_used: 0 }
    }
}

/// Discrete-event driver feeding a [`Scheduler`].
///
/// At every event time it reports, in order, finished jobs, expired quanta
/// (round robin only) and arrivals, then runs every busy core up to the next
/// finish, quantum boundary or arrival.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    jobs: Vec<JobSpec>,
}

impl Simulation {
    pub fn new(config: SimulationConfig, mut jobs: Vec<JobSpec>) -> Self {
        jobs.sort_by(|a, b| a.arrival_time.cmp(&b.arrival_time).then_with(|| a.id.cmp(&b.id)));
        Self { config, jobs }
    }

    /// Runs every job to completion.
    pub fn run(&self) -> Result<SimulationReport, SchedulerError> {
        let round_robin = self.config.policy() == Policy::RoundRobin;
        let quantum = self.config.quantum();

        let mut scheduler = Scheduler::start_up(self.config.cores(), self.config.policy())?;
        let num_cores = scheduler.num_cores();
        let mut slots: Vec<Option<Slot>> = vec![None; num_cores];
        let mut remaining: HashMap<ID, TimeStep> = HashMap::new();
        let mut next_arrival = 0;
        let mut time: TimeStep = 0;

        info!(
            jobs = self.jobs.len(),
            cores = num_cores,
            policy = %self.config.policy(),
            "simulation started"
        );

        loop {
            for core in 0..num_cores {
                let Some(slot) = slots[core] else { continue };
                if remaining.get(&slot.job).copied().unwrap_or(0) > 0 {
                    continue;
                }
                remaining.remove(&slot.job);
                slots[core] = scheduler.on_finish(core, slot.job, time)?.map(Slot::new);
            }

            if round_robin {
                for core in 0..num_cores {
                    let Some(slot) = slots[core] else { continue };
                    if slot.slice_used >= quantum {
                        let next = scheduler.on_quantum_expired(core, time)?;
                        slots[core] = Some(Slot::new(next));
                    }
                }
            }

            while let Some(spec) = self.jobs.get(next_arrival) {
                if spec.arrival_time > time {
                    break;
                }
                remaining.insert(spec.id, spec.running_time);
                if let Some(core) = scheduler.on_arrival(spec.id, time, spec.running_time, spec.priority)? {
                    slots[core] = Some(Slot::new(spec.id));
                }
                next_arrival += 1;
            }

            scheduler.show_queue();
            debug_assert_eq!(scheduler.current_time(), time, "driver clock out of sync");
            for (core, slot) in slots.iter().enumerate() {
                debug_assert_eq!(
                    slot.map(|s| s.job),
                    scheduler.running_job(core).map(|job| job.id()),
                    "driver and scheduler disagree on core {core}"
                );
            }

            if scheduler.is_drained() && next_arrival == self.jobs.len() {
                break;
            }

            let step = self.time_to_next_event(time, next_arrival, &slots, &remaining);
            for slot in slots.iter_mut().flatten() {
                if let Some(left) = remaining.get_mut(&slot.job) {
                    *left = left.saturating_sub(step);
                }
                slot.slice_used += step;
            }
            debug!(from = time, to = time + step, "advancing");
            time += step;
        }

        let report = SimulationReport {
            jobs: scheduler.statistics().total_jobs(),
            end_time: time,
            average_waiting_time: scheduler.average_waiting_time(),
            average_turnaround_time: scheduler.average_turnaround_time(),
            average_response_time: scheduler.average_response_time(),
        };
        scheduler.cleanup();

        info!(end_time = time, "simulation finished");
        Ok(report)
    }

    /// Time until the next finish, quantum boundary or arrival; at least 1.
    fn time_to_next_event(
        &self,
        time: TimeStep,
        next_arrival: usize,
        slots: &[Option<Slot>],
        remaining: &HashMap<ID, TimeStep>,
    ) -> TimeStep {
        let mut step = self
            .jobs
            .get(next_arrival)
            .map(|spec| spec.arrival_time.saturating_sub(time))
            .unwrap_or(TimeStep::MAX);

        for slot in slots.iter().flatten() {
            step = step.min(remaining.get(&slot.job).copied().unwrap_or(0));
            if self.config.policy() == Policy::RoundRobin {
                step = step.min(self.config.quantum().saturating_sub(slot.slice_used));
            }
        }

        step.max(1)
    }
}
