use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use multicore_sched::config::SimulationConfig;
use multicore_sched::constants::{ExitCode, DEFAULT_CORES, DEFAULT_QUANTUM};
use multicore_sched::{read_trace_file, Simulation};

pub fn build_cli_command() -> Command {
    Command::new("Multicore Scheduler")
    .version(env!("CARGO_PKG_VERSION"))
    .about("Simulates CPU scheduling policies on a multi-core machine")

    .arg(Arg::new("trace_file")
        .required(true)
        .help("Path to the job trace (arrival_time, running_time, priority per line)"))

    .arg(Arg::new("cores")
        .short('c')
        .long("cores")
        .help("Number of cores")
        .default_value(DEFAULT_CORES))

    .arg(Arg::new("scheme")
        .short('s')
        .long("scheme")
        .required(true)
        .help("Scheduling scheme")
        .value_parser(["fcfs", "sjf", "psjf", "pri", "ppri", "rr"])
        .ignore_case(true))

    .arg(Arg::new("quantum")
        .short('q')
        .long("quantum")
        .help("Time slice for round robin")
        .default_value(DEFAULT_QUANTUM))

    .arg(Arg::new("verbose")
        .long("verbose")
        .action(ArgAction::Count)
        .help("Increase log verbosity (repeatable)"))
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn config_from_matches(matches: &ArgMatches) -> SimulationConfig {
    let arg = |name: &str| matches.get_one::<String>(name).map(String::as_str).unwrap_or_default();

    match SimulationConfig::parse(arg("cores"), arg("scheme"), arg("quantum")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid arguments: {}", e);
            process::exit(ExitCode::InvalidArguments as i32);
        }
    }
}

fn main() {
    // cargo run -- <trace_file> -s fcfs|sjf|psjf|pri|ppri|rr [-c <cores>] [-q <quantum>] [--verbose]
    // example : cargo run -- jobs.csv -c 2 -s rr -q 3
    let matches: ArgMatches = build_cli_command().get_matches();
    init_tracing(matches.get_count("verbose"));

    let config = config_from_matches(&matches);

    let trace_file = matches.get_one::<String>("trace_file").map(String::as_str).unwrap_or_default();
    let jobs = match read_trace_file(trace_file) {
        Ok(jobs) => jobs,
        Err(e) => {
            eprintln!("Error reading trace file: {}", e);
            process::exit(ExitCode::TraceUnreadable as i32);
        }
    };

    let simulation = Simulation::new(config, jobs);
    let report = match simulation.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Scheduler error: {}", e);
            process::exit(ExitCode::SchedulerFault as i32);
        }
    };

    println!("Average waiting time    : {:.2}", report.average_waiting_time);
    println!("Average turnaround time : {:.2}", report.average_turnaround_time);
    println!("Average response time   : {:.2}", report.average_response_time);

    process::exit(ExitCode::Success as i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_arguments() {
        let matches = build_cli_command().try_get_matches_from(vec![
            "multicore_sched",
            "jobs.csv",
            "-c",
            "4",
            "-s",
            "ppri",
            "--verbose",
            "--verbose",
        ]);

        assert!(matches.is_ok());
        let matches = matches.unwrap();

        assert_eq!(matches.get_one::<String>("trace_file").unwrap(), "jobs.csv");
        assert_eq!(matches.get_one::<String>("cores").unwrap(), "4");
        assert_eq!(matches.get_one::<String>("scheme").unwrap(), "ppri");
        assert_eq!(matches.get_one::<String>("quantum").unwrap(), "2");
        assert_eq!(matches.get_count("verbose"), 2);

        let config = config_from_matches(&matches);
        assert_eq!(config.cores(), 4);
        assert_eq!(config.quantum(), 2);
    }

    #[test]
    fn test_scheme_is_required() {
        let matches = build_cli_command().try_get_matches_from(vec!["multicore_sched", "jobs.csv"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let matches = build_cli_command()
            .try_get_matches_from(vec!["multicore_sched", "jobs.csv", "-s", "FCFS"])
            .expect("Uppercase scheme should be accepted");

        let config = config_from_matches(&matches);
        assert_eq!(config.policy(), multicore_sched::Policy::Fcfs);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let matches = build_cli_command().try_get_matches_from(vec!["multicore_sched", "jobs.csv", "-s", "edf"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_trace_file_end_to_end() {
        let file_path = std::env::temp_dir().join("multicore_sched_cli_trace.csv");
        std::fs::write(&file_path, "0, 5, 0\n1, 3, 0\n").expect("Unable to write test file");

        let jobs = read_trace_file(&file_path).expect("Failed to read trace");
        let config = SimulationConfig::parse("1", "fcfs", "2").unwrap();
        let report = Simulation::new(config, jobs).run().unwrap();
        assert_eq!(report.average_response_time, 2.0);

        std::fs::remove_file(&file_path).expect("Failed to clean up test file");
    }
}
