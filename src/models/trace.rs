use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::TraceError;

use super::{Priority, TimeStep, ID};

/// One job as described by a trace line.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    pub id: ID,
    pub arrival_time: TimeStep,
    pub running_time: TimeStep,
    pub priority: Priority,
}

/// Reads a trace file of `arrival_time, running_time, priority` lines.
///
/// Job ids follow line order, starting at 0.
pub fn read_trace_file<P: AsRef<Path>>(file_path: P) -> Result<Vec<JobSpec>, TraceError> {
    let file = std::fs::File::open(file_path)?;
    read_trace(file)
}

/// Same as [`read_trace_file`] for any reader.
pub fn read_trace<R: Read>(reader: R) -> Result<Vec<JobSpec>, TraceError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let mut jobs: Vec<JobSpec> = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let line = index + 1;
        let id = job_id(jobs.len(), line)?;

        let arrival_time: TimeStep = parse_field(&record, 0, line, "arrival time")?;
        let running_time: TimeStep = parse_field(&record, 1, line, "running time")?;
        let priority: Priority = parse_field(&record, 2, line, "priority")?;

        if running_time == 0 {
            return Err(TraceError::InvalidField {
                line,
                field: "running time",
                value: "0".to_string(),
            });
        }

        if let Some(previous) = jobs.last() {
            if arrival_time <= previous.arrival_time {
                return Err(TraceError::UnorderedArrival {
                    line,
                    arrival: arrival_time,
                    previous: previous.arrival_time,
                });
            }
        }

        jobs.push(JobSpec {
            id,
            arrival_time,
            running_time,
            priority,
        });
    }

    Ok(jobs)
}

/// Id for the job after `count` accepted ones.
fn job_id(count: usize, line: usize) -> Result<ID, TraceError> {
    ID::try_from(count).map_err(|_| TraceError::TooManyJobs { line })
}

fn parse_field<T: std::str::FromStr>(
    record: &StringRecord,
    index: usize,
    line: usize,
    field: &'static str,
) -> Result<T, TraceError> {
    let raw = record.get(index).unwrap_or("");
    raw.parse().map_err(|_| TraceError::InvalidField {
        line,
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_trace_file_valid() {
        let trace_content = "\
            0, 8, 1\n\
            1, 3, 0\n\
            4, 2, -1";
        let file_path = std::env::temp_dir().join("multicore_sched_valid_trace.csv");

        std::fs::write(&file_path, trace_content).expect("Unable to write test file");

        let jobs = read_trace_file(&file_path).expect("Failed to read trace");

        assert_eq!(jobs.len(), 3);
        assert_eq!(
            jobs[2],
            JobSpec {
                id: 2,
                arrival_time: 4,
                running_time: 2,
                priority: -1
            }
        );
        assert_eq!(jobs[0].id, 0);
        assert_eq!(jobs[1].running_time, 3);

        std::fs::remove_file(&file_path).expect("Failed to clean up test file");
    }

    #[test]
    fn test_read_trace_skips_comments() {
        let jobs = read_trace("# arrival, run, priority\n0,1,0\n".as_bytes()).unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn test_read_trace_invalid_format() {
        let result = read_trace("Invalid, Data, Here".as_bytes());
        assert!(matches!(
            result,
            Err(TraceError::InvalidField { line: 1, field: "arrival time", .. })
        ));
    }

    #[test]
    fn test_read_trace_missing_column() {
        let result = read_trace("0, 5".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_read_trace_rejects_zero_running_time() {
        let result = read_trace("0, 0, 1".as_bytes());
        assert!(matches!(result, Err(TraceError::InvalidField { field: "running time", .. })));
    }

    #[test]
    fn test_read_trace_rejects_unordered_arrivals() {
        let result = read_trace("3, 1, 0\n3, 1, 0".as_bytes());
        assert!(matches!(
            result,
            Err(TraceError::UnorderedArrival { line: 2, arrival: 3, previous: 3 })
        ));
    }

    #[test]
    fn test_job_id_follows_count() {
        assert_eq!(job_id(0, 1).unwrap(), 0);
        assert_eq!(job_id(ID::MAX as usize, 9).unwrap(), ID::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_job_id_overflow_is_an_error() {
        let result = job_id(ID::MAX as usize + 1, 12);
        assert!(matches!(result, Err(TraceError::TooManyJobs { line: 12 })));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_trace_file("does/not/exist.csv");
        assert!(matches!(result, Err(TraceError::Io(_))));
    }
}
