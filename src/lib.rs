//! # kousuan-algo - adaptive arithmetic practice engine
//!
//! Rule-based, single-learner recommendation core for a mental-arithmetic
//! practice app. Given a rolling record of correctness and response times it
//! decides what difficulty level and operation category to present next, and
//! synthesizes a concrete exercise with plausible wrong-answer options and a
//! time budget.
//!
//! Design goals:
//! - **Pure Rust** - no host bindings, usable from any Rust project
//! - **Explicit instances** - one engine per learner, no global state
//! - **Reproducible** - seedable RNG so generated problems are stable in
//!   tests
//! - **Auditable** - every difficulty move names the ladder rung that fired
//!
//! Module map:
//! - [`types`] - shared value types (categories, attempts, problems, state)
//! - [`config`] - tunable parameters with sensible defaults
//! - [`error`] - the error taxonomy
//! - [`tracker`] - rolling performance statistics
//! - [`difficulty`] - the ordered difficulty rule ladder
//! - [`selector`] - operation category choice
//! - [`generator`] - problem and distractor synthesis
//! - [`analysis`] - strongest/weakest/trend reporting
//! - [`engine`] - the [`PracticeEngine`] facade
//!
//! ## Usage
//!
//! ```rust
//! use kousuan_algo::PracticeEngine;
//!
//! let mut engine = PracticeEngine::with_seed(42);
//!
//! let problem = engine.next_problem();
//! // ... learner answers ...
//! engine.record_outcome(true, 2_300).unwrap();
//!
//! let analysis = engine.analysis();
//! assert!(engine.state().total_problems == 1);
//! # let _ = (problem, analysis);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

pub mod analysis;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod generator;
pub mod selector;
pub mod tracker;
pub mod types;

// Re-export the main types and entry points
pub use analysis::AnalysisReporter;
pub use config::{AnalysisParams, DifficultyParams, EngineConfig, SelectorParams, TrackerParams};
pub use difficulty::{DifficultyController, LadderRule};
pub use engine::{EngineSnapshot, PracticeEngine};
pub use error::EngineError;
pub use generator::ProblemGenerator;
pub use selector::TypeSelector;
pub use tracker::PerformanceTracker;
pub use types::{
    Attempt, OperationType, PerformanceState, PracticeAnalysis, Problem, TrendState, TypeStat,
};
