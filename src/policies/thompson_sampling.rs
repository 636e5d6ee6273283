use super::arm::ArmStats;
use super::policy::{
    check_arm_count, check_bernoulli, first_argmax, Policy, PolicyStats, PolicyType,
};

use crate::errors::PolicyError;
use crate::solver::SolverState;

use rand::{Rng, RngCore};
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

/// Beta posterior over one arm's success probability, starting from the uniform prior.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct ThompsonSamplingArm {
    successes: f64,
    failures: f64,
    count: u64,
}

impl Default for ThompsonSamplingArm {
    fn default() -> Self {
        Self {
            successes: 1.0,
            failures: 1.0,
            count: 0,
        }
    }
}

impl ThompsonSamplingArm {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, PolicyError> {
        let s = Beta::new(self.successes, self.failures)
            .map_err(|e| PolicyError::SamplingError(e.to_string()))?
            .sample(rng);

        Ok(s)
    }

    fn update(&mut self, reward: f64) {
        self.successes += reward;
        self.failures += 1.0 - reward;
        self.count += 1;
    }

    fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.count,
            mean_reward: self.successes / (self.successes + self.failures),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThompsonSampling {
    arms: Vec<ThompsonSamplingArm>,
}

impl ThompsonSampling {
    pub fn new(arm_count: usize) -> Result<Self, PolicyError> {
        check_arm_count(arm_count)?;

        Ok(Self {
            arms: vec![ThompsonSamplingArm::default(); arm_count],
        })
    }
}

#[typetag::serde]
impl Policy for ThompsonSampling {
    fn policy_type(&self) -> PolicyType {
        PolicyType::ThompsonSampling
    }

    fn arm_count(&self) -> usize {
        self.arms.len()
    }

    fn select_arm(
        &mut self,
        _: &SolverState,
        rng: &mut dyn RngCore,
    ) -> Result<usize, PolicyError> {
        // one posterior sample per arm, in index order, then act greedily on the samples
        let samples = self
            .arms
            .iter()
            .map(|arm| arm.sample(&mut *rng))
            .collect::<Result<Vec<f64>, PolicyError>>()?;

        first_argmax(samples).ok_or(PolicyError::NoArmsAvailable)
    }

    fn update(&mut self, arm_index: usize, reward: f64) -> Result<(), PolicyError> {
        check_bernoulli(reward)?;

        let arm_count = self.arms.len();
        self.arms
            .get_mut(arm_index)
            .ok_or(PolicyError::IndexOutOfRange {
                index: arm_index,
                arm_count,
            })?
            .update(reward);

        Ok(())
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self.arms.iter().map(ThompsonSamplingArm::stats).collect(),
        }
    }
}
