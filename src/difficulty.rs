use serde::{Deserialize, Serialize};

use crate::config::DifficultyParams;
use crate::types::{PerformanceState, MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Which rung of the ladder produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LadderRule {
    Promote,
    Demote,
    SlowHold,
    StreakNudge,
    Hold,
}

impl LadderRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            LadderRule::Promote => "promote",
            LadderRule::Demote => "demote",
            LadderRule::SlowHold => "slow_hold",
            LadderRule::StreakNudge => "streak_nudge",
            LadderRule::Hold => "hold",
        }
    }
}

pub struct DifficultyController {
    params: DifficultyParams,
}

impl DifficultyController {
    pub fn new(params: DifficultyParams) -> Self {
        Self { params }
    }

    /// Compute the next difficulty level from the current state.
    ///
    /// Pure; the caller applies the result. Rungs are evaluated in fixed
    /// order and the first match wins. The slow-responder hold is checked
    /// before the streak nudge: a learner who is both slow and streaking
    /// holds.
    pub fn next_difficulty(&self, state: &PerformanceState) -> (u8, LadderRule) {
        let current = state.current_difficulty;

        if state.accuracy > self.params.promote_accuracy
            && state.consecutive_correct >= self.params.promote_streak
        {
            return ((current + 1).min(MAX_DIFFICULTY), LadderRule::Promote);
        }

        if state.accuracy < self.params.demote_accuracy
            || state.consecutive_wrong >= self.params.demote_streak
        {
            return (
                current.saturating_sub(1).max(MIN_DIFFICULTY),
                LadderRule::Demote,
            );
        }

        if self.recent_mean_seconds(state) > self.params.slow_ratio * state.avg_time_seconds {
            return (current, LadderRule::SlowHold);
        }

        if state.consecutive_correct >= self.params.nudge_streak {
            // Half-step nudge, rounded up to the next whole level.
            let nudged = (current as f64 + 0.5).ceil() as u8;
            return (nudged.min(MAX_DIFFICULTY), LadderRule::StreakNudge);
        }

        (current, LadderRule::Hold)
    }

    fn recent_mean_seconds(&self, state: &PerformanceState) -> f64 {
        if state.history.is_empty() {
            return 0.0;
        }
        let window = state.history.len().min(self.params.slow_window);
        let sum: f64 = state
            .history
            .iter()
            .rev()
            .take(window)
            .map(|a| a.elapsed_ms as f64 / 1000.0)
            .sum();
        sum / window as f64
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(DifficultyParams::default())
    }
}
