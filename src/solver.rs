use crate::bandit::BernoulliBandit;
use crate::errors::SolverError;
use crate::policies::{MaybeSeededRng, Policy};

use serde::Serialize;
use tracing::{info, trace};
use uuid::Uuid;

// keeps the policy stream independent from the environment stream for a given seed
const POLICY_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Bookkeeping shared between the run-loop and the policies. Only the run-loop mutates it.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SolverState {
    pub(crate) pull_counts: Vec<u64>,
    pub(crate) action_history: Vec<usize>,
    pub(crate) regret_history: Vec<(usize, f64)>,
    pub(crate) cumulative_regret: f64,
}

impl SolverState {
    pub fn new(arm_count: usize) -> Self {
        Self {
            pull_counts: vec![0; arm_count],
            ..Default::default()
        }
    }

    pub fn pull_counts(&self) -> &[u64] {
        &self.pull_counts
    }

    pub fn action_history(&self) -> &[usize] {
        &self.action_history
    }

    pub fn regret_history(&self) -> &[(usize, f64)] {
        &self.regret_history
    }

    pub fn cumulative_regret(&self) -> f64 {
        self.cumulative_regret
    }

    pub fn steps(&self) -> usize {
        self.action_history.len()
    }

    fn record(&mut self, arm_index: usize, regret: f64) {
        self.pull_counts[arm_index] += 1;
        self.action_history.push(arm_index);
        self.cumulative_regret += regret;
        self.regret_history.push((arm_index, self.cumulative_regret));
    }
}

/// Plays one policy against one bandit and accounts for cumulative regret.
pub struct Solver {
    id: Uuid,
    bandit: BernoulliBandit,
    policy: Box<dyn Policy>,
    state: SolverState,
    env_rng: MaybeSeededRng,
    policy_rng: MaybeSeededRng,
}

impl Solver {
    pub fn new(
        bandit: BernoulliBandit,
        policy: Box<dyn Policy>,
        seed: Option<u64>,
    ) -> Result<Self, SolverError> {
        if policy.arm_count() != bandit.arm_count() {
            return Err(SolverError::ArmCountMismatch {
                bandit: bandit.arm_count(),
                policy: policy.arm_count(),
            });
        }

        let state = SolverState::new(bandit.arm_count());
        Ok(Self {
            id: Uuid::new_v4(),
            bandit,
            policy,
            state,
            env_rng: MaybeSeededRng::new(seed),
            policy_rng: MaybeSeededRng::new(seed.map(|s| s ^ POLICY_STREAM)),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn seed(&self) -> Option<u64> {
        self.env_rng.seed()
    }

    pub fn bandit(&self) -> &BernoulliBandit {
        &self.bandit
    }

    pub fn policy(&self) -> &dyn Policy {
        self.policy.as_ref()
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    pub fn action_history(&self) -> &[usize] {
        self.state.action_history()
    }

    pub fn regret_history(&self) -> &[(usize, f64)] {
        self.state.regret_history()
    }

    pub fn cumulative_regret(&self) -> f64 {
        self.state.cumulative_regret()
    }

    /// Plays a single round. On error the solver state is left as it was.
    pub fn step(&mut self) -> Result<(), SolverError> {
        let arm_index = self
            .policy
            .select_arm(&self.state, self.policy_rng.get_rng())?;
        let reward = self.bandit.pull(arm_index, self.env_rng.get_rng())?;
        let regret =
            self.bandit.best_arm_probability() - self.bandit.success_probability(arm_index)?;

        self.policy.update(arm_index, reward)?;
        self.state.record(arm_index, regret);

        trace!(
            id = %self.id,
            step = self.state.steps(),
            arm_index,
            reward,
            cumulative_regret = self.state.cumulative_regret,
            "Step"
        );
        Ok(())
    }

    pub fn run(&mut self, num_steps: usize) -> Result<(), SolverError> {
        let policy = self.policy.policy_type().label();
        info!(id = %self.id, %policy, num_steps, "Running solver");

        for _ in 0..num_steps {
            self.step()?;
        }

        info!(
            id = %self.id,
            %policy,
            steps = self.state.steps(),
            cumulative_regret = self.state.cumulative_regret,
            "Solver finished"
        );
        Ok(())
    }
}
