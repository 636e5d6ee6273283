use rand::{rngs::SmallRng, SeedableRng};

#[derive(Debug)]
pub struct MaybeSeededRng {
    seed: Option<u64>,
    rng: SmallRng,
}

impl MaybeSeededRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_os_rng()
        };

        Self { seed, rng }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

/// Replays a fixed list of uniform draws in [0, 1), cycling when exhausted.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    draws: Vec<u64>,
    position: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(uniforms: &[f64]) -> Self {
        // `random::<f64>()` keeps the 53 high bits of `next_u64`
        let draws = uniforms
            .iter()
            .map(|u| ((u * (1u64 << 53) as f64) as u64) << 11)
            .collect();
        Self { draws, position: 0 }
    }
}

#[cfg(test)]
impl rand::RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.iter_mut().for_each(|b| *b = self.next_u32() as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn seeded_is_reproducible() {
        let mut a = MaybeSeededRng::new(Some(42));
        let mut b = MaybeSeededRng::new(Some(42));

        let xs: Vec<f64> = (0..5).map(|_| a.get_rng().random()).collect();
        let ys: Vec<f64> = (0..5).map(|_| b.get_rng().random()).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.seed(), Some(42));
    }

    #[test]
    fn scripted_replays_draws() {
        let mut rng = ScriptedRng::new(&[0.25, 0.5, 0.75]);
        let xs: Vec<f64> = (0..4).map(|_| rng.random()).collect();
        assert_eq!(xs, vec![0.25, 0.5, 0.75, 0.25]);
    }
}
