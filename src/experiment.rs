use crate::bandit::BernoulliBandit;
use crate::config::ExperimentConfig;
use crate::errors::SolverError;
use crate::policies::MaybeSeededRng;
use crate::solver::Solver;

use tracing::{debug, info};

// arm probabilities must not share draws with the solvers' environment streams
const BANDIT_STREAM: u64 = 0xD1B5_4A32_D192_ED03;

/// One bandit instance, one solver per configured policy.
pub struct Experiment {
    num_steps: usize,
    solvers: Vec<Solver>,
}

impl Experiment {
    pub fn from_config(config: &ExperimentConfig) -> Result<Self, SolverError> {
        let mut rng = MaybeSeededRng::new(config.seed.map(|s| s ^ BANDIT_STREAM));
        let bandit = BernoulliBandit::new(config.arm_count, rng.get_rng())?;
        debug!(
            arm_count = bandit.arm_count(),
            best_arm_index = bandit.best_arm_index(),
            best_arm_probability = bandit.best_arm_probability(),
            "Created bandit"
        );

        let solvers = config
            .policies
            .iter()
            .map(|policy_type| {
                let policy = policy_type.clone().into_inner(bandit.arm_count())?;
                Solver::new(bandit.clone(), policy, config.seed)
            })
            .collect::<Result<Vec<Solver>, SolverError>>()?;

        Ok(Self {
            num_steps: config.num_steps,
            solvers,
        })
    }

    pub fn run(mut self) -> Result<Vec<Solver>, SolverError> {
        info!(
            num_solvers = self.solvers.len(),
            num_steps = self.num_steps,
            "Running experiment"
        );
        for solver in self.solvers.iter_mut() {
            solver.run(self.num_steps)?;
        }

        Ok(self.solvers)
    }
}
