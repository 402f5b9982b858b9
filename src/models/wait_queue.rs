use std::cmp::Ordering;
use std::collections::{vec_deque, VecDeque};
use std::fmt;

use super::policy::{Comparator, Policy};
use super::Job;

/// Jobs waiting for a core, kept sorted by the active policy.
///
/// Insertion is a linear scan from the front: a new job lands right before the
/// first queued job it strictly precedes, so jobs that compare equal keep their
/// insertion order. Under round robin nothing ever strictly precedes anything,
/// which makes every insertion an append.
#[derive(Clone)]
pub struct WaitQueue {
    jobs: VecDeque<Job>,
    comparator: Comparator,
}

impl WaitQueue {
    pub fn new(policy: Policy) -> Self {
        Self::with_comparator(policy.comparator())
    }

    pub fn with_comparator(comparator: Comparator) -> Self {
        Self {
            jobs: VecDeque::new(),
            comparator,
        }
    }

    /// Inserts `job` at its ordered position and returns that zero-based index.
    pub fn insert(&mut self, job: Job) -> usize {
        let index = self
            .jobs
            .iter()
            .position(|queued| (self.comparator)(&job, queued) == Ordering::Less)
            .unwrap_or(self.jobs.len());
        self.jobs.insert(index, job);
        index
    }

    pub fn peek_front(&self) -> Option<&Job> {
        self.jobs.front()
    }

    pub fn poll_front(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    pub fn at(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    /// Removes every queued entry with the same id as `job` (identity, not
    /// ordering equality). Returns how many were removed.
    pub fn remove_all_equal(&mut self, job: &Job) -> usize {
        let before = self.jobs.len();
        self.jobs.retain(|queued| queued.id() != job.id());
        before - self.jobs.len()
    }

    /// Removes the entry at `index`, shifting later entries forward.
    pub fn remove_at(&mut self, index: usize) -> Option<Job> {
        self.jobs.remove(index)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Job> {
        self.jobs.iter()
    }

    /// Empties the queue, handing back whatever was still waiting.
    pub fn drain(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs).into()
    }
}

impl fmt::Debug for WaitQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitQueue").field("jobs", &self.jobs).finish_non_exhaustive()
    }
}

impl fmt::Display for WaitQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, job) in self.jobs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match job.start_time() {
                Some(start) => write!(f, "{}({})", job.id(), start)?,
                None => write!(f, "{}(-1)", job.id())?,
            }
        }
        Ok(())
    }
}
