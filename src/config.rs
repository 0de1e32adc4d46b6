use serde::{Deserialize, Serialize};

use crate::types::OperationType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerParams {
    pub history_cap: usize,
    pub accuracy_window: u32,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            history_cap: 50,
            accuracy_window: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub promote_accuracy: f64,
    pub promote_streak: u32,
    pub demote_accuracy: f64,
    pub demote_streak: u32,
    pub slow_ratio: f64,
    pub slow_window: usize,
    pub nudge_streak: u32,
}

impl Default for DifficultyParams {
    fn default() -> Self {
        Self {
            promote_accuracy: 80.0,
            promote_streak: 2,
            demote_accuracy: 60.0,
            demote_streak: 2,
            slow_ratio: 1.3,
            slow_window: 5,
            nudge_streak: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorParams {
    pub warmup_attempts: u32,
    pub weak_accuracy: f64,
    pub categories: Vec<OperationType>,
}

impl Default for SelectorParams {
    fn default() -> Self {
        Self {
            warmup_attempts: 4,
            weak_accuracy: 70.0,
            categories: OperationType::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub recent_window: usize,
    pub trend_margin: f64,
    pub focus_accuracy: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            recent_window: 10,
            trend_margin: 5.0,
            focus_accuracy: 70.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub tracker: TrackerParams,
    pub difficulty: DifficultyParams,
    pub selector: SelectorParams,
    pub analysis: AnalysisParams,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("KOUSUAN_HISTORY_CAP") {
            config.tracker.history_cap = val.parse().unwrap_or(config.tracker.history_cap);
        }
        if let Ok(val) = std::env::var("KOUSUAN_WARMUP_ATTEMPTS") {
            config.selector.warmup_attempts =
                val.parse().unwrap_or(config.selector.warmup_attempts);
        }
        if let Ok(val) = std::env::var("KOUSUAN_WEAK_ACCURACY") {
            config.selector.weak_accuracy = val.parse().unwrap_or(config.selector.weak_accuracy);
        }
        if let Ok(val) = std::env::var("KOUSUAN_RECENT_WINDOW") {
            config.analysis.recent_window = val.parse().unwrap_or(config.analysis.recent_window);
        }

        config
    }
}
