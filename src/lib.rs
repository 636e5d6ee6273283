pub mod bandit;
pub mod config;
pub mod errors;
pub mod experiment;
pub mod policies;
pub mod report;
pub mod solver;

pub use bandit::BernoulliBandit;
pub use experiment::Experiment;
pub use policies::{Policy, PolicyType};
pub use solver::{Solver, SolverState};
