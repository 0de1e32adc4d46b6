//! Problem Synthesis
//!
//! Maps (category, difficulty) to a concrete exercise:
//! - Operands are drawn from a fixed per-level band; time budgets shrink as
//!   levels rise.
//! - Per-category shaping keeps results well-formed: differences stay
//!   non-negative, products stay tractable, quotients are exact integers by
//!   construction.
//! - Low-difficulty problems carry four multiple-choice options seeded from
//!   typical mistakes.
//!
//! Randomness comes from an owned seedable ChaCha8 RNG, so generated
//! problems and option sets are reproducible in tests.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::types::{OperationType, Problem, MAX_DIFFICULTY, MIN_DIFFICULTY};

// ==================== Constants ====================

/// Options on a multiple-choice problem (correct answer included)
const CHOICE_COUNT: usize = 4;

/// Highest difficulty that still gets multiple-choice options
const CHOICE_MAX_DIFFICULTY: u8 = 2;

/// Filler distractor offsets are drawn from [-10, 9]
const FILL_OFFSET_MIN: i64 = -10;
const FILL_OFFSET_MAX: i64 = 9;

/// Operand range and time budget for one difficulty level
struct DifficultyBand {
    min: i64,
    max: i64,
    time_limit_seconds: u32,
}

/// Fixed band table, difficulty 1..=5
const BANDS: [DifficultyBand; 5] = [
    DifficultyBand {
        min: 1,
        max: 10,
        time_limit_seconds: 45,
    },
    DifficultyBand {
        min: 5,
        max: 25,
        time_limit_seconds: 40,
    },
    DifficultyBand {
        min: 10,
        max: 50,
        time_limit_seconds: 35,
    },
    DifficultyBand {
        min: 25,
        max: 100,
        time_limit_seconds: 30,
    },
    DifficultyBand {
        min: 50,
        max: 200,
        time_limit_seconds: 25,
    },
];

/// Fraction of the time budget a learner is expected to need. Division is
/// modeled as the slowest to solve.
fn expected_solve_factor(op: OperationType) -> f64 {
    match op {
        OperationType::Addition => 0.6,
        OperationType::Subtraction => 0.7,
        OperationType::Multiplication => 0.8,
        OperationType::Division => 1.0,
    }
}

// ==================== Generator ====================

/// Synthesizes exercises for a given category and difficulty level.
pub struct ProblemGenerator {
    rng: ChaCha8Rng,
    next_id: u64,
}

impl ProblemGenerator {
    /// Create a generator seeded from the system clock.
    pub fn new() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Create a generator with a fixed seed (reproducible output).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Reseed the RNG stream (for testing).
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Build one problem. Out-of-range difficulty levels are clamped.
    pub fn generate(&mut self, op: OperationType, difficulty: u8) -> Problem {
        let id = self.next_id;
        self.next_id += 1;
        generate_with(&mut self.rng, id, op, difficulty)
    }

    /// Build a batch of problems in parallel.
    ///
    /// Each slot draws from its own RNG stream derived from a single draw of
    /// the generator RNG, so output is deterministic for a seeded generator
    /// regardless of thread scheduling.
    pub fn generate_batch(&mut self, requests: &[(OperationType, u8)]) -> Vec<Problem> {
        let base: u64 = self.rng.gen();
        let first_id = self.next_id;
        self.next_id += requests.len() as u64;

        requests
            .par_iter()
            .enumerate()
            .map(|(i, &(op, difficulty))| {
                let mut rng = ChaCha8Rng::seed_from_u64(base.wrapping_add(i as u64));
                generate_with(&mut rng, first_id + i as u64, op, difficulty)
            })
            .collect()
    }
}

impl Default for ProblemGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Static Helper Functions ====================

/// Core synthesis (static so the parallel batch path can share it)
fn generate_with(rng: &mut ChaCha8Rng, id: u64, op: OperationType, difficulty: u8) -> Problem {
    let level = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    let band = &BANDS[(level - 1) as usize];

    let a = rng.gen_range(band.min..=band.max);
    let b = rng.gen_range(band.min..=band.max);

    let (left, right, answer) = match op {
        OperationType::Addition => (a, b, a + b),
        OperationType::Subtraction => {
            // Larger operand first so the difference stays non-negative.
            let (hi, lo) = if a < b { (b, a) } else { (a, b) };
            (hi, lo, hi - lo)
        }
        OperationType::Multiplication => {
            // Scale operands down so products stay tractable at high levels.
            let scale = level as i64 + 1;
            let x = (a / scale).max(1);
            let y = (b / scale).max(1);
            (x, y, x * y)
        }
        OperationType::Division => {
            // Build the dividend from the answer, guaranteeing an exact
            // integer quotient.
            let divisor = (b / level as i64).max(1);
            (a * divisor, divisor, a)
        }
    };

    let choices = if level <= CHOICE_MAX_DIFFICULTY {
        Some(build_choices(rng, op, answer))
    } else {
        None
    };

    Problem {
        id,
        op,
        difficulty: level,
        question: format!("{} {} {}", left, op.symbol(), right),
        answer,
        choices,
        time_limit_seconds: band.time_limit_seconds,
        expected_solve_seconds: band.time_limit_seconds as f64 * expected_solve_factor(op),
    }
}

/// Four shuffled options: the correct answer plus plausible mistakes.
///
/// Candidates seeded from category-typical errors come first; non-positive
/// and duplicate values are discarded, remaining slots are filled with
/// nearby values, and the final set is shuffled so the correct answer's
/// position is unpredictable.
fn build_choices(rng: &mut ChaCha8Rng, op: OperationType, answer: i64) -> Vec<i64> {
    let mut options = vec![answer];

    let seeds = match op {
        OperationType::Addition | OperationType::Subtraction => vec![answer - 1, answer + 1],
        OperationType::Multiplication => vec![answer - 10, answer + 10],
        OperationType::Division => vec![answer * 2, answer / 2],
    };
    for candidate in seeds {
        if options.len() == CHOICE_COUNT {
            break;
        }
        if candidate > 0 && !options.contains(&candidate) {
            options.push(candidate);
        }
    }

    while options.len() < CHOICE_COUNT {
        let offset = rng.gen_range(FILL_OFFSET_MIN..=FILL_OFFSET_MAX);
        let candidate = (answer + offset).max(1);
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }

    options.shuffle(rng);
    options
}

// ==================== Tests ====================
