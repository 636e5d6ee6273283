use super::arm::MeanArm;
use super::epsilon_greedy::update_mean;
use super::policy::{check_arm_count, first_argmax, Policy, PolicyStats, PolicyType};

use crate::errors::PolicyError;
use crate::solver::SolverState;

use rand::RngCore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ucb {
    arms: Vec<MeanArm>,
    step: u64,
}

impl Ucb {
    pub fn new(arm_count: usize) -> Result<Self, PolicyError> {
        check_arm_count(arm_count)?;

        Ok(Self {
            arms: vec![MeanArm::default(); arm_count],
            step: 0,
        })
    }

    // estimate + sqrt(ln t / (2 n + 1))
    fn score(&self, estimate: f64, pulls: u64) -> f64 {
        let bonus = (self.step as f64).ln() / (2.0 * pulls as f64 + 1.0);
        estimate + bonus.sqrt()
    }
}

#[typetag::serde]
impl Policy for Ucb {
    fn policy_type(&self) -> PolicyType {
        PolicyType::Ucb
    }

    fn arm_count(&self) -> usize {
        self.arms.len()
    }

    fn select_arm(
        &mut self,
        state: &SolverState,
        _: &mut dyn RngCore,
    ) -> Result<usize, PolicyError> {
        if state.pull_counts().len() != self.arms.len() {
            return Err(PolicyError::InvalidConfiguration(format!(
                "solver tracks {} arms, policy has {}",
                state.pull_counts().len(),
                self.arms.len()
            )));
        }

        self.step += 1;

        // the confidence bonus is driven by the solver's pull counts
        first_argmax(
            self.arms
                .iter()
                .zip(state.pull_counts())
                .map(|(arm, &pulls)| self.score(arm.estimate, pulls)),
        )
        .ok_or(PolicyError::NoArmsAvailable)
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
