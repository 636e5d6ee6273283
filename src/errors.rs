use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BanditError {
    #[error("Invalid bandit configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Arm {index} out of range for a bandit with {arm_count} arms")]
    IndexOutOfRange { index: usize, arm_count: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("Invalid policy configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Arm {index} out of range for a policy with {arm_count} arms")]
    IndexOutOfRange { index: usize, arm_count: usize },
    #[error("No arms to select from")]
    NoArmsAvailable,
    #[error("Reward {0} is not a Bernoulli outcome")]
    InvalidReward(f64),
    #[error("Sampling error: {0}")]
    SamplingError(String),
    #[error("Unknown policy {0}")]
    UnknownPolicy(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    #[error(transparent)]
    Bandit(#[from] BanditError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("Policy built for {policy} arms cannot play a bandit with {bandit} arms")]
    ArmCountMismatch { bandit: usize, policy: usize },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize report to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot read config: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
