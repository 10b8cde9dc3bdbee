//! Random algorithm selectors

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::password::AlgorithmSelector;

/// Draws from the thread-local, OS-seeded generator
#[derive(Debug, Clone, Default)]
pub struct ThreadRngSelector;

impl ThreadRngSelector {
    pub fn new() -> Self {
        Self
    }
}

impl AlgorithmSelector for ThreadRngSelector {
    fn next_code(&self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Reproducible selector driven by a fixed seed
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl AlgorithmSelector for SeededSelector {
    fn next_code(&self, bound: usize) -> usize {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..bound)
    }
}
