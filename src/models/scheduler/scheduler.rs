use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use crate::errors::SchedulerError;
use crate::{CoreId, Job, Policy, Priority, TimeStep, WaitQueue, ID};

use super::{Core, Statistics};

/// Decision core of the simulator.
///
/// The event driver calls [`Scheduler::on_arrival`], [`Scheduler::on_finish`]
/// and [`Scheduler::on_quantum_expired`] in non-decreasing time order; each call
/// returns what should run next. A job is always in exactly one place: the
/// wait queue, one core, or gone once it finished.
#[derive(Debug)]
pub struct Scheduler {
    policy: Policy,          // Ordering rule of the wait queue
    preemptive: bool,        // Whether arrivals may evict running jobs
    cores: Vec<Core>,        // Core table, index = core id
    queue: WaitQueue,        // Jobs waiting for a core
    current_time: TimeStep,  // Time of the last event seen
    stats: Statistics,       // Waiting/response/turnaround sums
}

impl Scheduler {
    /// Creates a scheduler with `num_cores` idle cores running `policy`.
    pub fn start_up(num_cores: usize, policy: Policy) -> Result<Self, SchedulerError> {
        if num_cores == 0 {
            return Err(SchedulerError::NoCores);
        }

        debug!(cores = num_cores, %policy, preemptive = policy.is_preemptive(), "scheduler started");

        Ok(Self {
            policy,
            preemptive: policy.is_preemptive(),
            cores: (0..num_cores).map(Core::new).collect(),
            queue: WaitQueue::new(policy),
            current_time: 0,
            stats: Statistics::new(),
        })
    }

    /// Handles a new job.
    ///
    /// # Returns
    /// The core the job should run on from now, or `None` if nothing changes
    /// (the job went to the wait queue). A returned core that was busy has had
    /// its previous job preempted back into the queue.
    pub fn on_arrival(
        &mut self,
        id: ID,
        time: TimeStep,
        running_time: TimeStep,
        priority: Priority,
    ) -> Result<Option<CoreId>, SchedulerError> {
        self.check_time(time)?;
        self.sync(time);

        let mut job = Job::new(id, time, running_time, priority);
        self.stats.record_arrival();

        // Lowest idle core first
        if let Some(core) = self.cores.iter().position(Core::is_idle) {
            job.set_start(time);
            self.cores[core].assign(job);
            debug!(job = id, core, time, "arrival placed on idle core");
            return Ok(Some(core));
        }

        if self.preemptive {
            if let Some(core) = self.preemption_victim(&job) {
                job.set_start(time);
                if let Some(mut evicted) = self.cores[core].assign(job) {
                    // Placed and evicted in the same tick: it never ran.
                    evicted.unstart_if_started_at(time);
                    debug!(
                        job = id,
                        evicted = evicted.id(),
                        remaining = evicted.remaining_time(),
                        core,
                        time,
                        "arrival preempted running job"
                    );
                    self.queue.insert(evicted);
                }
                return Ok(Some(core));
            }
        }

        let index = self.queue.insert(job);
        debug!(job = id, index, time, "arrival queued");
        Ok(None)
    }

    /// Handles the completion of the job running on `core`.
    ///
    /// # Returns
    /// The id of the job that now runs on `core`, or `None` if it stays idle.
    pub fn on_finish(&mut self, core: CoreId, id: ID, time: TimeStep) -> Result<Option<ID>, SchedulerError> {
        self.check_time(time)?;
        self.check_busy(core)?;
        self.sync(time);

        let finished = self.cores[core]
            .release()
            .ok_or(SchedulerError::CoreIdle { core })?;
        if finished.id() != id {
            warn!(expected = id, running = finished.id(), core, "finish reported for a job not on this core");
        }

        self.stats.record_completion(&finished, time);
        debug!(job = finished.id(), core, time, "job finished");

        Ok(self.dispatch(core, time))
    }

    /// Handles the end of a time slice on `core`.
    ///
    /// The expiring job goes back into the queue and the head of the queue
    /// takes the core; with an empty queue the same job keeps running.
    ///
    /// # Returns
    /// The id of the job that runs on `core` after the expiry.
    pub fn on_quantum_expired(&mut self, core: CoreId, time: TimeStep) -> Result<ID, SchedulerError> {
        self.check_time(time)?;
        self.check_busy(core)?;
        self.sync(time);

        if self.queue.is_empty() {
            return self.cores[core]
                .job()
                .map(Job::id)
                .ok_or(SchedulerError::CoreIdle { core });
        }

        let expiring = self.cores[core]
            .release()
            .ok_or(SchedulerError::CoreIdle { core })?;
        let expiring_id = expiring.id();
        self.queue.insert(expiring);

        let next = self.dispatch(core, time).ok_or(SchedulerError::CoreIdle { core })?;
        debug!(from = expiring_id, to = next, core, time, "quantum expired");
        Ok(next)
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.stats.average_waiting_time()
    }

    pub fn average_turnaround_time(&self) -> f64 {
        self.stats.average_turnaround_time()
    }

    pub fn average_response_time(&self) -> f64 {
        self.stats.average_response_time()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn num_cores(&self) -> usize {
        self.cores.len()
    }

    pub fn current_time(&self) -> TimeStep {
        self.current_time
    }

    pub fn queue(&self) -> &WaitQueue {
        &self.queue
    }

    /// Job running on `core`, if the core exists and is busy.
    pub fn running_job(&self, core: CoreId) -> Option<&Job> {
        self.cores.get(core).and_then(Core::job)
    }

    /// True once nothing is running and nothing is waiting.
    pub fn is_drained(&self) -> bool {
        self.queue.is_empty() && self.cores.iter().all(Core::is_idle)
    }

    /// Logs the wait queue and the core table at debug level.
    pub fn show_queue(&self) {
        let running: Vec<Option<ID>> = self.cores.iter().map(|core| core.job().map(Job::id)).collect();
        debug!(time = self.current_time, queue = %self.queue, ?running, "scheduler state");
    }

    /// Tears the scheduler down, returning how many unfinished jobs were dropped.
    pub fn cleanup(mut self) -> usize {
        let mut released = self.queue.drain().len();
        released += self.cores.iter_mut().filter_map(Core::release).count();
        if released > 0 {
            warn!(released, "cleanup released unfinished jobs");
        }
        released
    }

    /// Least preferable job among the arrival and every running job; `None`
    /// when that is the arrival itself. Ties keep the first one found.
    fn preemption_victim(&self, arriving: &Job) -> Option<CoreId> {
        let mut worst = arriving;
        let mut victim = None;

        for core in &self.cores {
            if let Some(running) = core.job() {
                if self.policy.compare(worst, running) == Ordering::Less {
                    worst = running;
                    victim = Some(core.id());
                }
            }
        }

        victim
    }

    /// Moves the head of the queue onto `core`.
    fn dispatch(&mut self, core: CoreId, time: TimeStep) -> Option<ID> {
        let mut next = self.queue.poll_front()?;
        next.start_if_new(time);
        let id = next.id();
        self.cores[core].assign(next);
        debug!(job = id, core, time, "dispatched from queue");
        Some(id)
    }

    /// Charges the time since the last event to every running job.
    fn sync(&mut self, time: TimeStep) {
        let elapsed = time - self.current_time;
        if elapsed > 0 {
            for core in self.cores.iter_mut() {
                core.advance(elapsed);
            }
        }
        trace!(from = self.current_time, to = time, "clock synced");
        self.current_time = time;
    }

    fn check_time(&self, time: TimeStep) -> Result<(), SchedulerError> {
        if time < self.current_time {
            return Err(SchedulerError::TimeWentBackwards {
                time,
                now: self.current_time,
            });
        }
        Ok(())
    }

    fn check_busy(&self, core: CoreId) -> Result<(), SchedulerError> {
        match self.cores.get(core) {
            None => Err(SchedulerError::CoreOutOfRange {
                core,
                cores: self.cores.len(),
            }),
            Some(slot) if slot.is_idle() => Err(SchedulerError::CoreIdle { core }),
            Some(_) => Ok(()),
        }
    }
}
