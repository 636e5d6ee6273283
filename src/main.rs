use bandit_solver::config::AppConfig;
use bandit_solver::errors::AppError;
use bandit_solver::report::{write_json, ExperimentReport};
use bandit_solver::{Experiment, PolicyType};

use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn run(mut config: AppConfig) -> Result<(), AppError> {
    // a single policy name on the command line replaces the configured list
    if let Some(policy) = std::env::args().nth(1) {
        config.experiment.policies = vec![policy.parse::<PolicyType>()?];
    }

    let solvers = Experiment::from_config(&config.experiment)?.run()?;
    let reports = solvers
        .iter()
        .map(ExperimentReport::from)
        .collect::<Vec<_>>();

    for report in &reports {
        println!("{}", report.summary());
    }

    if let Some(path) = &config.report.output {
        write_json(&reports, path)?;
        info!(path = %path.display(), "Wrote report");
    }

    Ok(())
}

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Cannot read config: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Experiment failed");
            ExitCode::FAILURE
        }
    }
}
