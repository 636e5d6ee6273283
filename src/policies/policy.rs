use super::arm::ArmStats;
use super::decaying_epsilon_greedy::DecayingEpsilonGreedy;
use super::epsilon_greedy::EpsilonGreedy;
use super::thompson_sampling::ThompsonSampling;
use super::ucb::Ucb;

use crate::errors::PolicyError;
use crate::solver::SolverState;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_EPSILON: f64 = 0.01;

#[derive(Clone, Debug, Serialize)]
pub struct PolicyStats {
    pub arms: Vec<ArmStats>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum PolicyType {
    EpsilonGreedy { epsilon: f64 },
    DecayingEpsilonGreedy,
    Ucb,
    ThompsonSampling,
}

impl PolicyType {
    pub fn into_inner(self, arm_count: usize) -> Result<Box<dyn Policy>, PolicyError> {
        Ok(match self {
            PolicyType::EpsilonGreedy { epsilon } => {
                Box::new(EpsilonGreedy::new(arm_count, epsilon)?)
            }
            PolicyType::DecayingEpsilonGreedy => Box::new(DecayingEpsilonGreedy::new(arm_count)?),
            PolicyType::Ucb => Box::new(Ucb::new(arm_count)?),
            PolicyType::ThompsonSampling => Box::new(ThompsonSampling::new(arm_count)?),
        })
    }

    pub fn label(&self) -> String {
        match self {
            PolicyType::EpsilonGreedy { epsilon } => format!("EpsilonGreedy-{}", epsilon),
            PolicyType::DecayingEpsilonGreedy => "DecayingEpsilonGreedy".to_string(),
            PolicyType::Ucb => "UCB".to_string(),
            PolicyType::ThompsonSampling => "ThompsonSampling".to_string(),
        }
    }
}

impl FromStr for PolicyType {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "epsilon-greedy" | "egreedy" => Ok(PolicyType::EpsilonGreedy {
                epsilon: DEFAULT_EPSILON,
            }),
            "decaying-epsilon-greedy" | "decaying" => Ok(PolicyType::DecayingEpsilonGreedy),
            "ucb" => Ok(PolicyType::Ucb),
            "thompson" | "thompson-sampling" => Ok(PolicyType::ThompsonSampling),
            _ => Err(PolicyError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Index of the first maximum, skipping NaN. `None` on an empty sequence.
pub fn first_argmax<I: IntoIterator<Item = f64>>(values: I) -> Option<usize> {
    values
        .into_iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (k, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((k, v)),
        })
        .map(|(k, _)| k)
}

pub(super) fn check_arm_count(arm_count: usize) -> Result<(), PolicyError> {
    if arm_count == 0 {
        Err(PolicyError::InvalidConfiguration(
            "arm count must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

pub(super) fn check_bernoulli(reward: f64) -> Result<(), PolicyError> {
    if (0.0..=1.0).contains(&reward) {
        Ok(())
    } else {
        Err(PolicyError::InvalidReward(reward))
    }
}

/// Action-selection strategy played by the solver run-loop.
///
/// `select_arm` reads the policy's own estimates and, where needed, the shared pull counts;
/// `update` is called once per step with the reward observed for the selected arm.
#[typetag::serde(tag = "type")]
pub trait Policy: Send {
    fn policy_type(&self) -> PolicyType;
    fn arm_count(&self) -> usize;
    fn select_arm(
        &mut self,
        state: &SolverState,
        rng: &mut dyn RngCore,
    ) -> Result<usize, PolicyError>;
    fn update(&mut self, arm_index: usize, reward: f64) -> Result<(), PolicyError>;
    fn stats(&self) -> PolicyStats;
}
