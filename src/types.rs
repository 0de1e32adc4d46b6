//! Common Types and Constants
//!
//! Shared data structures used across all engine modules.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Number of operation categories
pub const TYPE_COUNT: usize = 4;

/// Lowest difficulty level
pub const MIN_DIFFICULTY: u8 = 1;

/// Highest difficulty level
pub const MAX_DIFFICULTY: u8 = 5;

/// Starting difficulty for a fresh session
pub const INITIAL_DIFFICULTY: u8 = 2;

// ==================== Operation Categories ====================

/// Arithmetic operation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl OperationType {
    /// All categories in declaration order. Round-robin rotation and
    /// tie-breaks both follow this order.
    pub const ALL: [OperationType; TYPE_COUNT] = [
        OperationType::Addition,
        OperationType::Subtraction,
        OperationType::Multiplication,
        OperationType::Division,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "addition" => Some(OperationType::Addition),
            "subtraction" => Some(OperationType::Subtraction),
            "multiplication" => Some(OperationType::Multiplication),
            "division" => Some(OperationType::Division),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Addition => "addition",
            OperationType::Subtraction => "subtraction",
            OperationType::Multiplication => "multiplication",
            OperationType::Division => "division",
        }
    }

    pub fn to_index(&self) -> usize {
        match self {
            OperationType::Addition => 0,
            OperationType::Subtraction => 1,
            OperationType::Multiplication => 2,
            OperationType::Division => 3,
        }
    }

    /// Symbol used in question text
    pub fn symbol(&self) -> char {
        match self {
            OperationType::Addition => '+',
            OperationType::Subtraction => '-',
            OperationType::Multiplication => '×',
            OperationType::Division => '÷',
        }
    }
}

// ==================== Performance State ====================

/// One recorded outcome contributing to rolling statistics. Immutable once
/// recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    /// Category practiced
    pub op: OperationType,
    /// Difficulty level the problem was issued at
    pub difficulty: u8,
    /// Response time in milliseconds
    pub elapsed_ms: i64,
    /// Whether the answer was correct
    pub is_correct: bool,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

/// Rolling statistics for one operation category
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStat {
    /// Accuracy [0, 100], weighted by this category's own attempt count
    pub accuracy: f64,
    /// Running mean response time in seconds
    pub avg_time_seconds: f64,
    /// Attempts recorded for this category
    pub count: u32,
}

impl Default for TypeStat {
    fn default() -> Self {
        Self {
            accuracy: 100.0,
            avg_time_seconds: 0.0,
            count: 0,
        }
    }
}

/// Rolling performance record for one learner session.
///
/// Created with neutral defaults at session start and mutated only by the
/// outcome-recording path. The first recorded outcome fully replaces the
/// starting accuracy (the weight begins at 1), so the 100.0 default never
/// influences decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceState {
    /// Overall accuracy [0, 100], exponentially weighted toward recent
    /// outcomes (effective window capped at 20 attempts)
    pub accuracy: f64,
    /// Running mean response time in seconds over all attempts ever seen
    pub avg_time_seconds: f64,
    /// Current difficulty level [1, 5]
    pub current_difficulty: u8,
    /// Length of the current correct streak
    pub consecutive_correct: u32,
    /// Length of the current wrong streak
    pub consecutive_wrong: u32,
    /// Total attempts ever recorded
    pub total_problems: u32,
    /// Most recent attempts, oldest first, capped at the history window
    pub history: VecDeque<Attempt>,
    /// Per-category statistics, indexed by `OperationType::to_index()`.
    /// All four categories are always present.
    pub type_stats: [TypeStat; TYPE_COUNT],
}

impl Default for PerformanceState {
    fn default() -> Self {
        Self {
            accuracy: 100.0,
            avg_time_seconds: 0.0,
            current_difficulty: INITIAL_DIFFICULTY,
            consecutive_correct: 0,
            consecutive_wrong: 0,
            total_problems: 0,
            history: VecDeque::new(),
            type_stats: [TypeStat::default(); TYPE_COUNT],
        }
    }
}

impl PerformanceState {
    /// Statistics for one category
    pub fn type_stat(&self, op: OperationType) -> &TypeStat {
        &self.type_stats[op.to_index()]
    }

    pub(crate) fn type_stat_mut(&mut self, op: OperationType) -> &mut TypeStat {
        &mut self.type_stats[op.to_index()]
    }
}

// ==================== Problems ====================

/// A generated exercise. Value object, not retained by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: u64,
    pub op: OperationType,
    pub difficulty: u8,
    /// Question text, e.g. `"7 × 8"`
    pub question: String,
    pub answer: i64,
    /// Four options (correct answer included) at low difficulty, `None`
    /// for free entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<i64>>,
    /// Advisory time budget; returned to the caller, never enforced here
    pub time_limit_seconds: u32,
    pub expected_solve_seconds: f64,
}

// ==================== Analysis ====================

/// Direction of recent accuracy relative to the all-time figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrendState {
    Improving,
    #[default]
    Stable,
    Declining,
}

impl TrendState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendState::Improving => "improving",
            TrendState::Stable => "stable",
            TrendState::Declining => "declining",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "improving" => TrendState::Improving,
            "declining" => TrendState::Declining,
            _ => TrendState::Stable,
        }
    }
}

/// Summary derived from the tracked history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeAnalysis {
    pub strongest: OperationType,
    pub weakest: OperationType,
    pub recommended_focus: OperationType,
    pub trend: TrendState,
}

// ==================== Tests ====================
