use super::arm::MeanArm;
use super::epsilon_greedy::{explore_or_exploit, update_mean};
use super::policy::{check_arm_count, Policy, PolicyStats, PolicyType};

use crate::errors::PolicyError;
use crate::solver::SolverState;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy whose exploration rate at selection `t` (1-indexed) is `1 / t`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecayingEpsilonGreedy {
    arms: Vec<MeanArm>,
    step: u64,
}

impl DecayingEpsilonGreedy {
    pub fn new(arm_count: usize) -> Result<Self, PolicyError> {
        check_arm_count(arm_count)?;

        Ok(Self {
            arms: vec![MeanArm::default(); arm_count],
            step: 0,
        })
    }

    pub fn epsilon(&self) -> f64 {
        if self.step == 0 {
            1.0
        } else {
            1.0 / self.step as f64
        }
    }
}

#[typetag::serde]
impl Policy for DecayingEpsilonGreedy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::DecayingEpsilonGreedy
    }

    fn arm_count(&self) -> usize {
        self.arms.len()
    }

    fn select_arm(
        &mut self,
        _: &SolverState,
        rng: &mut dyn RngCore,
    ) -> Result<usize, PolicyError> {
        self.step += 1;
        explore_or_exploit(&self.arms, self.epsilon(), rng)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::rng::ScriptedRng;

    #[test]
    fn create() {
        let policy = DecayingEpsilonGreedy::new(3).unwrap();
        assert_eq!(policy.arms.len(), 3);
        assert_eq!(policy.step, 0);
        assert!(DecayingEpsilonGreedy::new(0).is_err());
    }

    #[test]
    fn epsilon_decays() {
        let mut policy = DecayingEpsilonGreedy::new(2).unwrap();
        let state = SolverState::new(2);
        let mut rng = ScriptedRng::new(&[0.99]);

        for t in 1..=20u64 {
            let _ = policy.select_arm(&state, &mut rng).unwrap();
            assert_eq!(policy.step, t);
            assert_eq!(policy.epsilon(), 1.0 / t as f64);
        }
    }

    #[test]
    fn explores_only_below_threshold() {
        // arm 0 is the best estimate, so picking arm 3 can only come from exploration
        let arm_count = 4;
        let state = SolverState::new(arm_count);

        for t in 1..=10u64 {
            let threshold = 1.0 / t as f64;
            let draws = [threshold * 0.9, threshold * 1.1]
                .into_iter()
                .filter(|draw| *draw < 1.0);
            for draw in draws {
                let mut policy = DecayingEpsilonGreedy::new(arm_count).unwrap();
                policy.arms[0].estimate = 1.0;
                policy.step = t - 1;

                let mut rng = ScriptedRng::new(&[draw, 0.99]);
                let arm_index = policy.select_arm(&state, &mut rng).unwrap();
                if draw < threshold {
                    assert_eq!(arm_index, 3, "t={} draw={} should explore", t, draw);
                } else {
                    assert_eq!(arm_index, 0, "t={} draw={} should exploit", t, draw);
                }
            }
        }
    }

    #[test]
    fn first_selection_always_explores() {
        let mut policy = DecayingEpsilonGreedy::new(3).unwrap();
        policy.arms[0].estimate = 1.0;
        let state = SolverState::new(3);
        let mut rng = ScriptedRng::new(&[0.999, 0.7]);

        assert_eq!(policy.select_arm(&state, &mut rng), Ok(2));
    }

    #[test]
    fn update() {
        let mut policy = DecayingEpsilonGreedy::new(2).unwrap();

        assert!(policy.update(1, 1.0).is_ok());
        assert_eq!(policy.arms[1].estimate, 1.0);
        assert!(policy.update(5, 1.0).is_err());
        assert_eq!(policy.update(0, 2.0), Err(PolicyError::InvalidReward(2.0)));
        // updates do not advance the exploration schedule
        assert_eq!(policy.step, 0);
    }
}
