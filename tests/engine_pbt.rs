//! Property-Based Tests for the Practice Engine
//!
//! Tests the following invariants:
//! - Difficulty stays in [1, 5] and accuracy in [0, 100] for all outcome
//!   sequences
//! - History is a FIFO window of at most 50 attempts
//! - The selector never repeats the previous category once past warm-up
//! - Division problems always have positive divisors and exact quotients
//! - Multiple-choice sets are well formed
//! - Snapshot JSON round-trips losslessly

use kousuan_algo::types::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use kousuan_algo::{EngineSnapshot, OperationType, PracticeEngine, ProblemGenerator};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_outcome() -> impl Strategy<Value = (bool, i64)> {
    (any::<bool>(), 0i64..60_000)
}

fn arb_operation() -> impl Strategy<Value = OperationType> {
    prop_oneof![
        Just(OperationType::Addition),
        Just(OperationType::Subtraction),
        Just(OperationType::Multiplication),
        Just(OperationType::Division),
    ]
}

proptest! {
    #[test]
    fn prop_bounds_hold_for_all_outcome_sequences(
        seed in any::<u64>(),
        outcomes in proptest::collection::vec(arb_outcome(), 1..120),
    ) {
        let mut engine = PracticeEngine::with_seed(seed);
        for (is_correct, elapsed_ms) in outcomes {
            let _ = engine.next_problem();
            engine.record_outcome(is_correct, elapsed_ms).unwrap();

            let state = engine.state();
            prop_assert!(state.current_difficulty >= MIN_DIFFICULTY);
            prop_assert!(state.current_difficulty <= MAX_DIFFICULTY);
            prop_assert!(state.accuracy >= 0.0 && state.accuracy <= 100.0);
            prop_assert!(state.history.len() <= 50);
            prop_assert!(
                state.consecutive_correct == 0 || state.consecutive_wrong == 0,
                "streak counters must be mutually exclusive"
            );
        }
    }

    #[test]
    fn prop_history_is_fifo_capped(
        seed in any::<u64>(),
        extra in 0usize..30,
    ) {
        let mut engine = PracticeEngine::with_seed(seed);
        let total = 50 + extra;
        for i in 0..total {
            let _ = engine.next_problem();
            engine.record_outcome(i % 3 != 0, 2_000).unwrap();
        }

        let state = engine.state();
        prop_assert_eq!(state.history.len(), 50);
        prop_assert_eq!(state.total_problems as usize, total);

        // Oldest-first ordering survives eviction.
        let mut previous = i64::MIN;
        for attempt in &state.history {
            prop_assert!(attempt.timestamp >= previous);
            previous = attempt.timestamp;
        }
    }

    #[test]
    fn prop_selector_never_repeats_after_warmup(
        seed in any::<u64>(),
        outcomes in proptest::collection::vec(arb_outcome(), 10..60),
    ) {
        let mut engine = PracticeEngine::with_seed(seed);
        let mut previous = None;
        for (i, (is_correct, elapsed_ms)) in outcomes.into_iter().enumerate() {
            let problem = engine.next_problem();
            if i >= 1 {
                prop_assert_ne!(Some(problem.op), previous);
            }
            previous = Some(problem.op);
            engine.record_outcome(is_correct, elapsed_ms).unwrap();
        }
    }

    #[test]
    fn prop_division_quotients_exact(
        seed in any::<u64>(),
        difficulty in 1u8..=5,
    ) {
        let mut generator = ProblemGenerator::with_seed(seed);
        let problem = generator.generate(OperationType::Division, difficulty);

        let parts: Vec<&str> = problem.question.split_whitespace().collect();
        let dividend: i64 = parts[0].parse().unwrap();
        let divisor: i64 = parts[2].parse().unwrap();

        prop_assert!(divisor >= 1);
        prop_assert_eq!(dividend % divisor, 0);
        prop_assert_eq!(problem.answer, dividend / divisor);
        prop_assert!(problem.answer >= 0);
    }

    #[test]
    fn prop_choices_well_formed(
        seed in any::<u64>(),
        op in arb_operation(),
        difficulty in 1u8..=2,
    ) {
        let mut generator = ProblemGenerator::with_seed(seed);
        let problem = generator.generate(op, difficulty);
        let choices = problem.choices.expect("low difficulty carries choices");

        prop_assert_eq!(choices.len(), 4);
        prop_assert_eq!(
            choices.iter().filter(|&&c| c == problem.answer).count(),
            1,
            "answer must appear exactly once"
        );
        prop_assert!(choices.iter().all(|&c| c >= 1));
    }

    #[test]
    fn prop_snapshot_json_roundtrip(
        seed in any::<u64>(),
        outcomes in proptest::collection::vec(arb_outcome(), 0..40),
    ) {
        let mut engine = PracticeEngine::with_seed(seed);
        for (is_correct, elapsed_ms) in outcomes {
            let _ = engine.next_problem();
            engine.record_outcome(is_correct, elapsed_ms).unwrap();
        }

        let snapshot = engine.snapshot();
        let json = snapshot.to_json();
        let restored = EngineSnapshot::from_json(&json).unwrap();

        prop_assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            serde_json::to_value(&restored).unwrap()
        );
    }
}
