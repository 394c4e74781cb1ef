//! In-process turbine: a seeded generator behind the service trait.
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::ServiceError;
use crate::params::QueryParams;
use crate::service::{QueryOutcome, RandomnessService};

/// Upper bound on sampling rounds per query, whatever the configured bounds.
pub const MAX_ROUNDS: i64 = 10_000;

/// Ready once `warmup` has elapsed since construction. Each query runs
/// `certainty` sampling rounds of `delay` milliseconds and answers with the
/// median sample.
pub struct LocalTurbine {
    rng: Mutex<StdRng>,
    ready_at: Instant,
}

impl LocalTurbine {
    pub fn new(warmup: Duration) -> Self {
        Self::with_rng(StdRng::from_entropy(), warmup)
    }

    /// Deterministic generator, for tests and reproducible runs.
    pub fn with_seed(seed: u64, warmup: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), warmup)
    }

    fn with_rng(rng: StdRng, warmup: Duration) -> Self {
        Self { rng: Mutex::new(rng), ready_at: Instant::now() + warmup }
    }
}

impl RandomnessService for LocalTurbine {
    fn wait_for_ready(&self) -> Result<(), ServiceError> {
        let remaining = self.ready_at.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        Ok(())
    }

    fn query(&self, params: QueryParams) -> QueryOutcome {
        let QueryParams { low, high, certainty, delay } = params;
        if low > high {
            return QueryOutcome::Failure(format!("empty range {low}..={high}"));
        }
        if certainty < 1 {
            return QueryOutcome::Failure(format!("certainty {certainty} is below 1"));
        }
        if certainty > MAX_ROUNDS {
            return QueryOutcome::Failure(format!("certainty {certainty} exceeds {MAX_ROUNDS} rounds"));
        }
        let round_delay = Duration::from_millis(delay.max(0) as u64);

        let mut samples = Vec::with_capacity(certainty as usize);
        for _ in 0..certainty {
            if !round_delay.is_zero() {
                thread::sleep(round_delay);
            }
            let sample = match self.rng.lock() {
                Ok(mut rng) => rng.gen_range(low..=high),
                Err(_) => return QueryOutcome::Failure("generator poisoned".to_string()),
            };
            samples.push(sample);
        }
        samples.sort_unstable();
        let value = samples[samples.len() / 2];
        debug!(?params, value, "local turbine answered");
        QueryOutcome::Success(value)
    }
}
