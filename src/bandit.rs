use crate::errors::BanditError;
use crate::policies::first_argmax;

use rand::Rng;
use serde::Serialize;

/// K independent arms, each paying 1 with a fixed probability and 0 otherwise.
#[derive(Clone, Debug, Serialize)]
pub struct BernoulliBandit {
    success_probabilities: Vec<f64>,
    best_arm_index: usize,
    best_arm_probability: f64,
}

impl BernoulliBandit {
    /// Draws `arm_count` success probabilities uniformly from [0, 1).
    pub fn new<R: Rng + ?Sized>(arm_count: usize, rng: &mut R) -> Result<Self, BanditError> {
        if arm_count == 0 {
            return Err(BanditError::InvalidConfiguration(
                "arm count must be positive".to_string(),
            ));
        }

        let success_probabilities = (0..arm_count).map(|_| rng.random::<f64>()).collect();
        Self::from_probabilities(success_probabilities)
    }

    pub fn from_probabilities(success_probabilities: Vec<f64>) -> Result<Self, BanditError> {
        if let Some(p) = success_probabilities
            .iter()
            .find(|p| !(0.0..=1.0).contains(*p))
        {
            return Err(BanditError::InvalidConfiguration(format!(
                "success probability {} is outside [0, 1]",
                p
            )));
        }

        let best_arm_index = first_argmax(success_probabilities.iter().copied()).ok_or(
            BanditError::InvalidConfiguration("arm count must be positive".to_string()),
        )?;
        let best_arm_probability = success_probabilities[best_arm_index];

        Ok(Self {
            success_probabilities,
            best_arm_index,
            best_arm_probability,
        })
    }

    pub fn arm_count(&self) -> usize {
        self.success_probabilities.len()
    }

    pub fn success_probabilities(&self) -> &[f64] {
        &self.success_probabilities
    }

    pub fn success_probability(&self, arm_index: usize) -> Result<f64, BanditError> {
        self.success_probabilities
            .get(arm_index)
            .copied()
            .ok_or(BanditError::IndexOutOfRange {
                index: arm_index,
                arm_count: self.arm_count(),
            })
    }

    pub fn best_arm_index(&self) -> usize {
        self.best_arm_index
    }

    pub fn best_arm_probability(&self) -> f64 {
        self.best_arm_probability
    }

    /// Samples a Bernoulli reward for `arm_index`. Consumes exactly one uniform draw.
    pub fn pull<R: Rng + ?Sized>(
        &self,
        arm_index: usize,
        rng: &mut R,
    ) -> Result<f64, BanditError> {
        let p = self.success_probability(arm_index)?;
        Ok(if rng.random::<f64>() < p { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    const SEED: u64 = 1234;

    #[test]
    fn create() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let bandit = BernoulliBandit::new(10, &mut rng).unwrap();

        assert_eq!(bandit.arm_count(), 10);
        assert!(bandit
            .success_probabilities()
            .iter()
            .all(|p| (0.0..1.0).contains(p)));
    }

    #[test]
    fn create_empty() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        assert!(matches!(
            BernoulliBandit::new(0, &mut rng),
            Err(BanditError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            BernoulliBandit::from_probabilities(vec![]),
            Err(BanditError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn create_malformed() {
        assert!(BernoulliBandit::from_probabilities(vec![0.2, 1.5]).is_err());
        assert!(BernoulliBandit::from_probabilities(vec![-0.1]).is_err());
        assert!(BernoulliBandit::from_probabilities(vec![f64::NAN]).is_err());
    }

    #[test]
    fn best_arm() {
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let bandit = BernoulliBandit::new(1 + (seed as usize % 7), &mut rng).unwrap();
            let max = bandit
                .success_probabilities()
                .iter()
                .cloned()
                .fold(f64::MIN, f64::max);

            assert_eq!(bandit.best_arm_probability(), max);
            assert_eq!(
                bandit.success_probabilities()[bandit.best_arm_index()],
                max
            );
        }
    }

    #[test]
    fn best_arm_tie() {
        let bandit = BernoulliBandit::from_probabilities(vec![0.3, 0.7, 0.7]).unwrap();
        assert_eq!(bandit.best_arm_index(), 1);
        assert_eq!(bandit.best_arm_probability(), 0.7);
    }

    #[test]
    fn pull() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let bandit = BernoulliBandit::from_probabilities(vec![0.0, 1.0]).unwrap();

        for _ in 0..100 {
            assert_eq!(bandit.pull(0, &mut rng), Ok(0.0));
            assert_eq!(bandit.pull(1, &mut rng), Ok(1.0));
        }
    }

    #[test]
    fn pull_out_of_range() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let bandit = BernoulliBandit::from_probabilities(vec![0.5]).unwrap();

        assert_eq!(
            bandit.pull(1, &mut rng),
            Err(BanditError::IndexOutOfRange {
                index: 1,
                arm_count: 1
            })
        );
    }

    #[test]
    fn pull_estimate() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let bandit = BernoulliBandit::from_probabilities(vec![0.3]).unwrap();

        let samples = 10_000;
        let positive: f64 = (0..samples)
            .map(|_| bandit.pull(0, &mut rng).unwrap())
            .sum();
        assert!((positive / samples as f64 - 0.3).abs() < 0.03);
    }
}
