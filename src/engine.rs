//! Engine Facade
//!
//! One `PracticeEngine` instance per learner; no process-wide state. The
//! caller loop is: [`PracticeEngine::next_problem`] -> learner answers ->
//! [`PracticeEngine::record_outcome`], with [`PracticeEngine::analysis`] and
//! [`PracticeEngine::state`] available at any point.
//!
//! The engine is synchronous and single-threaded: it holds no locks,
//! performs no I/O, and assumes one outcome report completes before the
//! next begins. Hosts that allow concurrent submissions must serialize
//! calls into the engine.
//!
//! Durable storage is the caller's job: [`PracticeEngine::snapshot`]
//! returns a serializable [`EngineSnapshot`] and
//! [`PracticeEngine::restore`] resumes from one.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReporter;
use crate::config::EngineConfig;
use crate::difficulty::{DifficultyController, LadderRule};
use crate::error::EngineError;
use crate::generator::ProblemGenerator;
use crate::selector::TypeSelector;
use crate::tracker::PerformanceTracker;
use crate::types::{OperationType, PerformanceState, PracticeAnalysis, Problem};

/// Identity of the most recently issued problem, so an outcome report can be
/// tied back to it.
#[derive(Debug, Clone, Copy)]
struct PendingProblem {
    id: u64,
    op: OperationType,
    difficulty: u8,
}

/// Serializable engine state for the caller's persistence layer.
///
/// The pending problem is transient and intentionally not included: after a
/// restore the caller requests a fresh problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub performance: PerformanceState,
    pub last_type: Option<OperationType>,
    pub round_robin: usize,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Adaptive problem-recommendation engine.
pub struct PracticeEngine {
    tracker: PerformanceTracker,
    controller: DifficultyController,
    selector: TypeSelector,
    generator: ProblemGenerator,
    analyzer: AnalysisReporter,
    last_type: Option<OperationType>,
    pending: Option<PendingProblem>,
    last_rule: Option<LadderRule>,
}

impl PracticeEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::build(config, ProblemGenerator::new())
    }

    /// Fixed-seed engine for reproducible problem streams.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(EngineConfig::default(), ProblemGenerator::with_seed(seed))
    }

    pub fn with_config_and_seed(config: EngineConfig, seed: u64) -> Self {
        Self::build(config, ProblemGenerator::with_seed(seed))
    }

    fn build(config: EngineConfig, generator: ProblemGenerator) -> Self {
        Self {
            tracker: PerformanceTracker::new(config.tracker),
            controller: DifficultyController::new(config.difficulty),
            selector: TypeSelector::new(config.selector),
            generator,
            analyzer: AnalysisReporter::new(config.analysis),
            last_type: None,
            pending: None,
            last_rule: None,
        }
    }

    /// Synthesize the next exercise for the learner.
    ///
    /// The selector and difficulty controller consult the tracked state;
    /// the problem is built at the current difficulty level.
    pub fn next_problem(&mut self) -> Problem {
        let op = self.selector.next_type(self.tracker.state(), self.last_type);
        let difficulty = self.tracker.state().current_difficulty;
        let problem = self.generator.generate(op, difficulty);

        self.last_type = Some(op);
        self.pending = Some(PendingProblem {
            id: problem.id,
            op,
            difficulty,
        });

        tracing::debug!(
            id = problem.id,
            op = op.as_str(),
            difficulty,
            "problem issued"
        );
        problem
    }

    /// Report the outcome of the most recently issued problem.
    ///
    /// Feeds the tracker, then re-evaluates the difficulty ladder and
    /// applies the result (the explicit apply step for the pure
    /// [`DifficultyController::next_difficulty`]).
    ///
    /// Fails with [`EngineError::NoActiveProblem`] when no problem is
    /// outstanding, and with [`EngineError::InvalidAttempt`] for negative
    /// elapsed times; the pending problem stays claimable in the latter
    /// case so the report can be retried.
    pub fn record_outcome(&mut self, is_correct: bool, elapsed_ms: i64) -> Result<(), EngineError> {
        let pending = self.pending.ok_or(EngineError::NoActiveProblem)?;

        self.tracker
            .record(pending.op, pending.difficulty, is_correct, elapsed_ms)?;
        self.pending = None;

        tracing::debug!(id = pending.id, is_correct, elapsed_ms, "outcome recorded");

        let previous = self.tracker.state().current_difficulty;
        let (next, rule) = self.controller.next_difficulty(self.tracker.state());
        self.tracker.set_difficulty(next);
        self.last_rule = Some(rule);

        if next != previous {
            tracing::debug!(
                from = previous,
                to = next,
                rule = rule.as_str(),
                "difficulty adjusted"
            );
        }
        Ok(())
    }

    /// Read-only view of the tracked performance state.
    pub fn state(&self) -> &PerformanceState {
        self.tracker.state()
    }

    /// Strongest/weakest categories, recommended focus, and overall trend.
    pub fn analysis(&self) -> PracticeAnalysis {
        self.analyzer.analyze(self.tracker.state())
    }

    /// Which ladder rung produced the current difficulty, if any outcome
    /// has been processed yet.
    pub fn last_rule(&self) -> Option<LadderRule> {
        self.last_rule
    }

    /// Batch-generate problems without issuing them (the pending-problem
    /// slot is untouched), e.g. to pre-build a worksheet.
    pub fn generate_batch(&mut self, requests: &[(OperationType, u8)]) -> Vec<Problem> {
        self.generator.generate_batch(requests)
    }

    /// Snapshot for the caller's persistence layer.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            performance: self.tracker.state().clone(),
            last_type: self.last_type,
            round_robin: self.selector.cursor(),
        }
    }

    /// Restore a snapshot. Out-of-range fields are clamped rather than
    /// rejected.
    pub fn restore(&mut self, snapshot: EngineSnapshot) {
        self.tracker.restore(snapshot.performance);
        self.selector.set_cursor(snapshot.round_robin);
        self.last_type = snapshot.last_type;
        self.pending = None;
        self.last_rule = None;
    }

    /// Return to the neutral baseline. Idempotent. The RNG stream and
    /// problem id counter are not part of learner state and keep running.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.selector.reset();
        self.last_type = None;
        self.pending = None;
        self.last_rule = None;
        tracing::info!("engine reset");
    }
}

impl Default for PracticeEngine {
    fn default() -> Self {
        Self::new()
    }
}
