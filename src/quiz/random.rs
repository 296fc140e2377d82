use rand::{Rng, rngs::ThreadRng};

/// Source of uniform draws in `[0, 1)`.
///
/// Everything random in quiz generation goes through this, so tests can
/// script the draws.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `lo..=hi`, as `floor(draw * (hi - lo + 1)) + lo`
    fn pick_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi);
        let span = f64::from(hi - lo + 1);
        let offset = (self.next_unit() * span).floor() as u32;
        (lo + offset).min(hi)
    }

    /// Uniform index in `0..len`; `len` must be non-zero
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let index = (self.next_unit() * len as f64).floor() as usize;
        index.min(len - 1)
    }
}

/// Adapts any `rand` generator
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[cfg(test)]
pub(crate) struct ScriptedRandom {
    draws: Vec<f64>,
    position: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty());
        Self { draws, position: 0 }
    }

    pub(crate) fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }
}
