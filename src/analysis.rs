use crate::config::AnalysisParams;
use crate::types::{OperationType, PerformanceState, PracticeAnalysis, TrendState};

/// Derives strongest/weakest categories and an overall trend from the
/// tracked history.
pub struct AnalysisReporter {
    params: AnalysisParams,
}

impl AnalysisReporter {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    pub fn analyze(&self, state: &PerformanceState) -> PracticeAnalysis {
        let practiced: Vec<OperationType> = OperationType::ALL
            .iter()
            .copied()
            .filter(|op| state.type_stat(*op).count > 0)
            .collect();

        let mut strongest = OperationType::Addition;
        let mut weakest = OperationType::Addition;
        let mut best_accuracy = f64::NEG_INFINITY;
        let mut worst_accuracy = f64::INFINITY;
        for &op in &practiced {
            let accuracy = state.type_stat(op).accuracy;
            if accuracy > best_accuracy {
                best_accuracy = accuracy;
                strongest = op;
            }
            if accuracy < worst_accuracy {
                worst_accuracy = accuracy;
                weakest = op;
            }
        }

        // Lowest-accuracy category below the focus threshold, falling back
        // to the weakest practiced category.
        let mut recommended_focus = weakest;
        let mut focus_accuracy = f64::INFINITY;
        for &op in &practiced {
            let accuracy = state.type_stat(op).accuracy;
            if accuracy < self.params.focus_accuracy && accuracy < focus_accuracy {
                focus_accuracy = accuracy;
                recommended_focus = op;
            }
        }

        PracticeAnalysis {
            strongest,
            weakest,
            recommended_focus,
            trend: self.trend(state),
        }
    }

    fn trend(&self, state: &PerformanceState) -> TrendState {
        if state.history.is_empty() {
            return TrendState::Stable;
        }

        let window = state.history.len().min(self.params.recent_window);
        let correct = state
            .history
            .iter()
            .rev()
            .take(window)
            .filter(|a| a.is_correct)
            .count();
        let recent_accuracy = correct as f64 / window as f64 * 100.0;

        if recent_accuracy > state.accuracy + self.params.trend_margin {
            TrendState::Improving
        } else if recent_accuracy < state.accuracy - self.params.trend_margin {
            TrendState::Declining
        } else {
            TrendState::Stable
        }
    }
}

impl Default for AnalysisReporter {
    fn default() -> Self {
        Self::new(AnalysisParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attempt;

    fn reporter() -> AnalysisReporter {
        AnalysisReporter::default()
    }

    fn practiced_state() -> PerformanceState {
        let mut state = PerformanceState::default();
        state.total_problems = 12;
        for stat in state.type_stats.iter_mut() {
            stat.count = 3;
            stat.accuracy = 80.0;
        }
        state
    }

    fn push_outcomes(state: &mut PerformanceState, outcomes: &[bool]) {
        for &is_correct in outcomes {
            state.history.push_back(Attempt {
                op: OperationType::Addition,
                difficulty: 2,
                elapsed_ms: 3000,
                is_correct,
                timestamp: 0,
            });
        }
    }

    #[test]
    fn test_defaults_to_addition_when_nothing_practiced() {
        let analysis = reporter().analyze(&PerformanceState::default());
        assert_eq!(analysis.strongest, OperationType::Addition);
        assert_eq!(analysis.weakest, OperationType::Addition);
        assert_eq!(analysis.recommended_focus, OperationType::Addition);
        assert_eq!(analysis.trend, TrendState::Stable);
    }

    #[test]
    fn test_strongest_and_weakest_by_accuracy() {
        let mut state = practiced_state();
        state.type_stats[OperationType::Multiplication.to_index()].accuracy = 95.0;
        state.type_stats[OperationType::Division.to_index()].accuracy = 72.0;

        let analysis = reporter().analyze(&state);
        assert_eq!(analysis.strongest, OperationType::Multiplication);
        assert_eq!(analysis.weakest, OperationType::Division);
    }

    #[test]
    fn test_unpracticed_categories_ignored() {
        let mut state = practiced_state();
        // Division never attempted; its default 100.0 accuracy must not win
        // strongest.
        state.type_stats[OperationType::Division.to_index()] = Default::default();
        state.type_stats[OperationType::Subtraction.to_index()].accuracy = 90.0;

        let analysis = reporter().analyze(&state);
        assert_eq!(analysis.strongest, OperationType::Subtraction);
    }

    #[test]
    fn test_focus_picks_weakest_below_threshold() {
        let mut state = practiced_state();
        state.type_stats[OperationType::Subtraction.to_index()].accuracy = 65.0;
        state.type_stats[OperationType::Division.to_index()].accuracy = 55.0;

        let analysis = reporter().analyze(&state);
        assert_eq!(analysis.recommended_focus, OperationType::Division);
    }

    #[test]
    fn test_focus_falls_back_to_weakest_when_all_above_threshold() {
        let mut state = practiced_state();
        state.type_stats[OperationType::Multiplication.to_index()].accuracy = 74.0;

        let analysis = reporter().analyze(&state);
        assert_eq!(analysis.recommended_focus, OperationType::Multiplication);
    }

    #[test]
    fn test_trend_improving() {
        let mut state = practiced_state();
        state.accuracy = 60.0;
        push_outcomes(&mut state, &[true; 10]);

        assert_eq!(reporter().analyze(&state).trend, TrendState::Improving);
    }

    #[test]
    fn test_trend_declining() {
        let mut state = practiced_state();
        state.accuracy = 80.0;
        push_outcomes(&mut state, &[false; 10]);

        assert_eq!(reporter().analyze(&state).trend, TrendState::Declining);
    }

    #[test]
    fn test_trend_stable_within_margin() {
        let mut state = practiced_state();
        state.accuracy = 78.0;
        // 8/10 recent = 80%, within the ±5 band around 78.
        push_outcomes(&mut state, &[true, true, true, true, false, true, true, true, false, true]);

        assert_eq!(reporter().analyze(&state).trend, TrendState::Stable);
    }

    #[test]
    fn test_trend_uses_last_ten_only() {
        let mut state = practiced_state();
        state.accuracy = 50.0;
        // Twenty misses followed by ten hits: only the recent window counts.
        push_outcomes(&mut state, &[false; 20]);
        push_outcomes(&mut state, &[true; 10]);

        assert_eq!(reporter().analyze(&state).trend, TrendState::Improving);
    }

    #[test]
    fn test_trend_with_short_history() {
        let mut state = practiced_state();
        state.accuracy = 40.0;
        push_outcomes(&mut state, &[true, true, true]);

        // 3/3 recent = 100% > 45.
        assert_eq!(reporter().analyze(&state).trend, TrendState::Improving);
    }
}
