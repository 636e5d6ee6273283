use crate::errors::ReportError;
use crate::policies::{Policy, PolicyStats};
use crate::solver::Solver;

use serde::Serialize;
use std::{fs::File, io::BufWriter, path::Path};
use uuid::Uuid;

/// Read-only view over a finished solver, for printing and charting.
#[derive(Serialize)]
pub struct ExperimentReport<'a> {
    pub id: Uuid,
    pub label: String,
    pub seed: Option<u64>,
    pub arm_count: usize,
    pub steps: usize,
    pub best_arm_index: usize,
    pub best_arm_probability: f64,
    pub cumulative_regret: f64,
    pub stats: PolicyStats,
    pub policy: &'a dyn Policy,
    pub regret_history: &'a [(usize, f64)],
}

impl<'a> From<&'a Solver> for ExperimentReport<'a> {
    fn from(solver: &'a Solver) -> Self {
        let bandit = solver.bandit();
        Self {
            id: solver.id(),
            label: solver.policy().policy_type().label(),
            seed: solver.seed(),
            arm_count: bandit.arm_count(),
            steps: solver.state().steps(),
            best_arm_index: bandit.best_arm_index(),
            best_arm_probability: bandit.best_arm_probability(),
            cumulative_regret: solver.cumulative_regret(),
            stats: solver.policy().stats(),
            policy: solver.policy(),
            regret_history: solver.regret_history(),
        }
    }
}

impl ExperimentReport<'_> {
    pub fn summary(&self) -> String {
        format!(
            "{} ({}-armed bandit, {} steps) cumulative regret: {:.4}",
            self.label, self.arm_count, self.steps, self.cumulative_regret
        )
    }

    /// Cumulative regret sampled every `every` steps, last step always included.
    pub fn regret_curve(&self, every: usize) -> Vec<(usize, f64)> {
        let every = every.max(1);
        let last = self.regret_history.len().saturating_sub(1);
        self.regret_history
            .iter()
            .enumerate()
            .filter(|(t, _)| t % every == 0 || *t == last)
            .map(|(t, &(_, regret))| (t, regret))
            .collect()
    }
}

pub fn write_json<P: AsRef<Path>>(
    reports: &[ExperimentReport],
    path: P,
) -> Result<(), ReportError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, reports)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bandit::BernoulliBandit;
    use crate::policies::PolicyType;

    fn make_solver(num_steps: usize) -> Solver {
        let bandit = BernoulliBandit::from_probabilities(vec![0.2, 0.6]).unwrap();
        let policy = PolicyType::EpsilonGreedy { epsilon: 0.1 }
            .into_inner(2)
            .unwrap();
        let mut solver = Solver::new(bandit, policy, Some(1234)).unwrap();
        solver.run(num_steps).unwrap();
        solver
    }

    #[test]
    fn from_solver() {
        let solver = make_solver(50);
        let report = ExperimentReport::from(&solver);

        assert_eq!(report.label, "EpsilonGreedy-0.1");
        assert_eq!(report.steps, 50);
        assert_eq!(report.best_arm_index, 1);
        assert_eq!(report.cumulative_regret, solver.cumulative_regret());
        assert_eq!(report.regret_history.len(), 50);
        assert_eq!(
            report.stats.arms.iter().map(|arm| arm.pulls).sum::<u64>(),
            50
        );
        assert!(report
            .summary()
            .starts_with("EpsilonGreedy-0.1 (2-armed bandit, 50 steps)"));
    }

    #[test]
    fn regret_curve() {
        let solver = make_solver(10);
        let report = ExperimentReport::from(&solver);

        let curve = report.regret_curve(4);
        let steps: Vec<usize> = curve.iter().map(|(t, _)| *t).collect();
        assert_eq!(steps, vec![0, 4, 8, 9]);
        assert_eq!(curve[3].1, solver.cumulative_regret());
        assert!(ExperimentReport::from(&make_solver(0))
            .regret_curve(4)
            .is_empty());
    }

    #[test]
    fn serialize() {
        let solver = make_solver(5);
        let value = serde_json::to_value(ExperimentReport::from(&solver)).unwrap();

        assert_eq!(value["steps"], 5);
        assert_eq!(value["policy"]["type"], "EpsilonGreedy");
        assert_eq!(value["policy"]["epsilon"], 0.1);
        assert_eq!(value["regret_history"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn write() {
        let solver = make_solver(5);
        let path = std::env::temp_dir().join(format!("report-{}.json", solver.id()));

        assert!(write_json(&[ExperimentReport::from(&solver)], &path).is_ok());
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.as_array().map(Vec::len), Some(1));
        let _ = std::fs::remove_file(path);
    }
}
