//! Generate-and-validate loop, run inline or raced across worker threads.
//!
//! Racing workers share nothing but a stop flag and the result channel. The
//! first worker to find a solvable layout wins; the others notice the stop
//! flag between attempts and exit. A worker already inside an attempt finishes
//! it first, so cancellation is best-effort and that last attempt is wasted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::grid::Dimensions;

use super::generator::MapGenerator;
use super::model::GeneratedLevel;
use super::random::RandomSource;
use super::seed::worker_seed;
use super::validator::inspect;

/// Upper bound on generate-and-validate attempts. Unbounded by default,
/// in which case an unlucky size can keep a worker busy indefinitely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenerationBudget {
    #[default]
    Unbounded,
    Attempts(u32),
}

impl GenerationBudget {
    fn allows(self, attempts_made: u32) -> bool {
        match self {
            GenerationBudget::Unbounded => true,
            GenerationBudget::Attempts(limit) => attempts_made < limit,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no solvable layout found in {attempts} attempt(s)")]
    BudgetExhausted { attempts: u32 },
    #[error("a generation race needs at least one worker")]
    NoWorkers,
    #[error("generation stopped because another worker finished first")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    pub level: GeneratedLevel,
    /// Attempts made by the worker that produced `level`.
    pub attempts: u32,
    pub worker: usize,
}

fn run_attempts(
    generator: &MapGenerator,
    rng: &mut impl RandomSource,
    budget: GenerationBudget,
    stop: &AtomicBool,
    worker: usize,
) -> Result<Generation, GenerationError> {
    let mut attempts = 0;
    loop {
        if stop.load(Ordering::Relaxed) {
            return Err(GenerationError::Cancelled);
        }
        if !budget.allows(attempts) {
            return Err(GenerationError::BudgetExhausted { attempts });
        }
        attempts += 1;

        let level = generator.generate(rng);
        let report = inspect(level.original());
        if report.solvable {
            info!(worker, attempts, explored = report.explored, "accepted dungeon layout");
            return Ok(Generation { level, attempts, worker });
        }
        debug!(worker, attempt = attempts, explored = report.explored, "rejected dungeon layout");
    }
}

/// Generates layouts on the calling thread until one validates.
pub fn generate_level(
    dimensions: Dimensions,
    rng: &mut impl RandomSource,
    budget: GenerationBudget,
) -> Result<Generation, GenerationError> {
    let generator = MapGenerator::new(dimensions);
    let never_stop = AtomicBool::new(false);
    run_attempts(&generator, rng, budget, &never_stop, 0)
}

/// Deterministic single-worker generation from a seed.
pub fn generate_seeded(
    dimensions: Dimensions,
    seed: u64,
    budget: GenerationBudget,
) -> Result<Generation, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_level(dimensions, &mut rng, budget)
}

/// Races `workers` independent generators and returns the first solvable
/// layout. The budget applies to each worker separately.
pub fn race_generation(
    dimensions: Dimensions,
    workers: usize,
    seed: u64,
    budget: GenerationBudget,
) -> Result<Generation, GenerationError> {
    if workers == 0 {
        return Err(GenerationError::NoWorkers);
    }

    let generator = MapGenerator::new(dimensions);
    let stop = AtomicBool::new(false);
    let (sender, receiver) = crossbeam_channel::bounded(workers);

    thread::scope(|scope| {
        for worker in 0..workers {
            let sender = sender.clone();
            let generator = &generator;
            let stop = &stop;
            scope.spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(worker_seed(seed, worker));
                let outcome = run_attempts(generator, &mut rng, budget, stop, worker);
                // Capacity covers one message per worker and the receiver outlives the scope.
                let _ = sender.send(outcome);
            });
        }
        drop(sender);

        let mut exhausted_attempts = 0_u32;
        for outcome in receiver.iter() {
            match outcome {
                Ok(generation) => {
                    stop.store(true, Ordering::Relaxed);
                    return Ok(generation);
                }
                Err(GenerationError::BudgetExhausted { attempts }) => {
                    exhausted_attempts = exhausted_attempts.saturating_add(attempts);
                }
                Err(_) => {}
            }
        }
        Err(GenerationError::BudgetExhausted { attempts: exhausted_attempts })
    })
}
