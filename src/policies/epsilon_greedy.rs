use super::arm::MeanArm;
use super::policy::{
    check_arm_count, check_bernoulli, first_argmax, Policy, PolicyStats, PolicyType,
};

use crate::errors::PolicyError;
use crate::solver::SolverState;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    arms: Vec<MeanArm>,
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(arm_count: usize, epsilon: f64) -> Result<Self, PolicyError> {
        check_arm_count(arm_count)?;
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(PolicyError::InvalidConfiguration(format!(
                "epsilon {} is outside [0, 1]",
                epsilon
            )));
        }

        Ok(Self {
            arms: vec![MeanArm::default(); arm_count],
            epsilon,
        })
    }
}

/// Shared by the fixed and decaying variants: explore uniformly when the draw falls below
/// `epsilon`, otherwise exploit the best running estimate.
pub(super) fn explore_or_exploit(
    arms: &[MeanArm],
    epsilon: f64,
    rng: &mut dyn RngCore,
) -> Result<usize, PolicyError> {
    if arms.is_empty() {
        return Err(PolicyError::NoArmsAvailable);
    }

    if rng.random::<f64>() < epsilon {
        Ok(rng.random_range(0..arms.len()))
    } else {
        first_argmax(arms.iter().map(|arm| arm.estimate)).ok_or(PolicyError::NoArmsAvailable)
    }
}

pub(super) fn update_mean(
    arms: &mut [MeanArm],
    arm_index: usize,
    reward: f64,
) -> Result<(), PolicyError> {
    check_bernoulli(reward)?;

    let arm_count = arms.len();
    arms.get_mut(arm_index)
        .ok_or(PolicyError::IndexOutOfRange {
            index: arm_index,
            arm_count,
        })?
        .update(reward);

    Ok(())
}

#[typetag::serde]
impl Policy for EpsilonGreedy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::EpsilonGreedy {
            epsilon: self.epsilon,
        }
    }

    fn arm_count(&self) -> usize {
        self.arms.len()
    }

    fn select_arm(
        &mut self,
        _: &SolverState,
        rng: &mut dyn RngCore,
    ) -> Result<usize, PolicyError> {
        explore_or_exploit(&self.arms, self.epsilon, rng)
    }

    fn update(&mut self, arm_index: usize, reward: f64) -> Result<(), PolicyError> {
        update_mean(&mut self.arms, arm_index, reward)
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self.arms.iter().map(MeanArm::stats).collect(),
        }
    }
}
