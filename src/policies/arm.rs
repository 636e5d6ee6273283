use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub mean_reward: f64,
}

/// Running mean reward of one arm.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(super) struct MeanArm {
    pub(super) estimate: f64,
    pub(super) count: u64,
}

impl MeanArm {
    pub(super) fn update(&mut self, reward: f64) {
        self.count += 1;
        self.estimate += (reward - self.estimate) / (self.count as f64);
    }

    pub(super) fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.count,
            mean_reward: self.estimate,
        }
    }
}
