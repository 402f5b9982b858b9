use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

use super::Job;

/// Scheduling policy, chosen once when the scheduler starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    Sjf,
    Psjf,
    Pri,
    Ppri,
    RoundRobin,
}

/// Ordering rule for the wait queue. `Less` means the first job runs first.
pub type Comparator = fn(&Job, &Job) -> Ordering;

impl Policy {
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Psjf,
        Policy::Pri,
        Policy::Ppri,
        Policy::RoundRobin,
    ];

    pub fn comparator(self) -> Comparator {
        match self {
            Policy::Fcfs => fcfs,
            Policy::Sjf => sjf,
            Policy::Psjf => psjf,
            Policy::Pri => pri,
            Policy::Ppri => ppri,
            Policy::RoundRobin => round_robin,
        }
    }

    pub fn compare(self, a: &Job, b: &Job) -> Ordering {
        (self.comparator())(a, b)
    }

    /// Whether an arrival may evict a running job.
    pub fn is_preemptive(self) -> bool {
        matches!(self, Policy::Psjf | Policy::Ppri)
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::Psjf => "psjf",
            Policy::Pri => "pri",
            Policy::Ppri => "ppri",
            Policy::RoundRobin => "rr",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Policy::ALL
            .into_iter()
            .find(|policy| policy.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownPolicy(s.to_string()))
    }
}

fn fcfs(a: &Job, b: &Job) -> Ordering {
    if a.id() == b.id() {
        return Ordering::Equal;
    }
    a.arrival_time().cmp(&b.arrival_time())
}

fn sjf(a: &Job, b: &Job) -> Ordering {
    if a.id() == b.id() {
        return Ordering::Equal;
    }
    a.running_time()
        .cmp(&b.running_time())
        .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
}

fn psjf(a: &Job, b: &Job) -> Ordering {
    if a.id() == b.id() {
        return Ordering::Equal;
    }
    a.remaining_time()
        .cmp(&b.remaining_time())
        .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
}

fn pri(a: &Job, b: &Job) -> Ordering {
    if a.id() == b.id() {
        return Ordering::Equal;
    }
    a.priority()
        .cmp(&b.priority())
        .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
}

// Same key as PRI; preemption is what tells them apart.
fn ppri(a: &Job, b: &Job) -> Ordering {
    pri(a, b)
}

// Every distinct job sorts after every other one, which turns the ordered
// queue into a FIFO.
fn round_robin(a: &Job, b: &Job) -> Ordering {
    if a.id() == b.id() {
        return Ordering::Equal;
    }
    Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_always_equal() {
        let job = Job::new(1, 0, 5, 3);
        let same_id = Job::new(1, 9, 1, 0);
        for policy in Policy::ALL {
            assert_eq!(policy.compare(&job, &job), Ordering::Equal, "{policy}");
            assert_eq!(policy.compare(&job, &same_id), Ordering::Equal, "{policy}");
        }
    }

    #[test]
    fn test_fcfs_orders_by_arrival() {
        let early = Job::new(1, 2, 50, 0);
        let late = Job::new(2, 5, 1, 0);
        assert_eq!(Policy::Fcfs.compare(&early, &late), Ordering::Less);
        assert_eq!(Policy::Fcfs.compare(&late, &early), Ordering::Greater);
    }

    #[test]
    fn test_sjf_uses_running_time_then_arrival() {
        let short = Job::new(1, 5, 2, 0);
        let long = Job::new(2, 0, 8, 0);
        let short_later = Job::new(3, 7, 2, 0);
        assert_eq!(Policy::Sjf.compare(&short, &long), Ordering::Less);
        assert_eq!(Policy::Sjf.compare(&short, &short_later), Ordering::Less);
        assert_eq!(Policy::Sjf.compare(&short_later, &short), Ordering::Greater);
    }

    #[test]
    fn test_psjf_uses_remaining_time() {
        let mut ran = Job::new(1, 0, 10, 0);
        let fresh = Job::new(2, 1, 4, 0);
        assert_eq!(Policy::Psjf.compare(&fresh, &ran), Ordering::Less);
        ran.schedule(7);
        assert_eq!(Policy::Psjf.compare(&ran, &fresh), Ordering::Less);
        // Running time alone would have said otherwise.
        assert_eq!(Policy::Sjf.compare(&ran, &fresh), Ordering::Greater);
    }

    #[test]
    fn test_priority_policies_share_ordering() {
        let urgent = Job::new(1, 3, 9, 0);
        let relaxed = Job::new(2, 1, 1, 4);
        let urgent_later = Job::new(3, 6, 1, 0);
        for policy in [Policy::Pri, Policy::Ppri] {
            assert_eq!(policy.compare(&urgent, &relaxed), Ordering::Less);
            assert_eq!(policy.compare(&urgent, &urgent_later), Ordering::Less);
        }
    }

    #[test]
    fn test_round_robin_always_after() {
        let a = Job::new(1, 0, 1, 0);
        let b = Job::new(2, 1, 1, 0);
        assert_eq!(Policy::RoundRobin.compare(&a, &b), Ordering::Greater);
        assert_eq!(Policy::RoundRobin.compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_preemptive_flags() {
        let preemptive: Vec<Policy> = Policy::ALL.into_iter().filter(|p| p.is_preemptive()).collect();
        assert_eq!(preemptive, vec![Policy::Psjf, Policy::Ppri]);
    }

    #[test]
    fn test_parse_policy_names() {
        assert_eq!("fcfs".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!(" PPRI ".parse::<Policy>().unwrap(), Policy::Ppri);
        assert_eq!("rr".parse::<Policy>().unwrap(), Policy::RoundRobin);
        for policy in Policy::ALL {
            assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
        }
        assert!("lottery".parse::<Policy>().is_err());
    }
}
