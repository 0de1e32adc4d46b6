//! Rolling performance statistics.
//!
//! Ingests exactly one outcome at a time. The overall accuracy is a weighted
//! average whose effective window is capped, so the figure stays responsive
//! for the first attempts and bounded in how much very old data can pull it
//! afterwards. Per-category accuracy uses the same formula weighted by the
//! category's own count, uncapped.

use crate::config::TrackerParams;
use crate::error::EngineError;
use crate::types::{Attempt, OperationType, PerformanceState, MAX_DIFFICULTY, MIN_DIFFICULTY};

#[derive(Debug, Clone)]
pub struct PerformanceTracker {
    params: TrackerParams,
    state: PerformanceState,
}

impl PerformanceTracker {
    pub fn new(params: TrackerParams) -> Self {
        Self {
            params,
            state: PerformanceState::default(),
        }
    }

    pub fn state(&self) -> &PerformanceState {
        &self.state
    }

    /// Record one outcome.
    ///
    /// Fails with [`EngineError::InvalidAttempt`] for negative elapsed times
    /// before touching any state. Elapsed time is integral milliseconds, so
    /// NaN and non-finite inputs are unrepresentable.
    pub fn record(
        &mut self,
        op: OperationType,
        difficulty: u8,
        is_correct: bool,
        elapsed_ms: i64,
    ) -> Result<(), EngineError> {
        if elapsed_ms < 0 {
            return Err(EngineError::InvalidAttempt(elapsed_ms));
        }

        self.state.history.push_back(Attempt {
            op,
            difficulty,
            elapsed_ms,
            is_correct,
            timestamp: chrono::Utc::now().timestamp_millis(),
        });
        if self.state.history.len() > self.params.history_cap {
            self.state.history.pop_front();
        }

        self.state.total_problems += 1;

        if is_correct {
            self.state.consecutive_correct += 1;
            self.state.consecutive_wrong = 0;
        } else {
            self.state.consecutive_wrong += 1;
            self.state.consecutive_correct = 0;
        }

        let outcome = if is_correct { 100.0 } else { 0.0 };
        let elapsed_seconds = elapsed_ms as f64 / 1000.0;

        let weight = self.state.total_problems.min(self.params.accuracy_window) as f64;
        self.state.accuracy =
            ((self.state.accuracy * (weight - 1.0) + outcome) / weight).clamp(0.0, 100.0);

        let n = self.state.total_problems as f64;
        self.state.avg_time_seconds =
            (self.state.avg_time_seconds * (n - 1.0) + elapsed_seconds) / n;

        let stat = self.state.type_stat_mut(op);
        stat.count += 1;
        let type_weight = stat.count as f64;
        stat.accuracy =
            ((stat.accuracy * (type_weight - 1.0) + outcome) / type_weight).clamp(0.0, 100.0);
        stat.avg_time_seconds =
            (stat.avg_time_seconds * (type_weight - 1.0) + elapsed_seconds) / type_weight;

        tracing::trace!(
            op = op.as_str(),
            difficulty,
            is_correct,
            elapsed_ms,
            accuracy = self.state.accuracy,
            "attempt recorded"
        );

        Ok(())
    }

    /// Explicit apply step for the difficulty ladder's output.
    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.state.current_difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    }

    /// Restore a previously snapshotted state. Out-of-range fields are
    /// clamped and oversized histories truncated rather than rejected.
    pub fn restore(&mut self, mut state: PerformanceState) {
        state.current_difficulty = state.current_difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        state.accuracy = state.accuracy.clamp(0.0, 100.0);
        for stat in state.type_stats.iter_mut() {
            stat.accuracy = stat.accuracy.clamp(0.0, 100.0);
        }
        while state.history.len() > self.params.history_cap {
            state.history.pop_front();
        }
        self.state = state;
    }

    pub fn reset(&mut self) {
        self.state = PerformanceState::default();
    }
}
