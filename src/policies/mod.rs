pub mod arm;
pub mod decaying_epsilon_greedy;
pub mod epsilon_greedy;
mod policy;
pub mod rng;
pub mod thompson_sampling;
pub mod ucb;

pub use arm::ArmStats;
pub use policy::{first_argmax, Policy, PolicyStats, PolicyType, DEFAULT_EPSILON};
pub use rng::MaybeSeededRng;
