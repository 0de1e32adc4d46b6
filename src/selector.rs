use crate::config::SelectorParams;
use crate::types::{OperationType, PerformanceState};

/// Chooses the next operation category, balancing remediation of weak
/// categories against variety.
pub struct TypeSelector {
    params: SelectorParams,
    round_robin: usize,
}

impl TypeSelector {
    pub fn new(params: SelectorParams) -> Self {
        Self {
            params,
            round_robin: 0,
        }
    }

    /// Pick the next category. Once enough outcomes exist the previous
    /// category is never repeated, unless only one category is configured.
    pub fn next_type(
        &mut self,
        state: &PerformanceState,
        last: Option<OperationType>,
    ) -> OperationType {
        if self.params.categories.is_empty() {
            return OperationType::Addition;
        }

        // Warm-up: fixed rotation until enough outcomes exist to personalize.
        if state.total_problems < self.params.warmup_attempts {
            let op = self.advance();
            tracing::debug!(op = op.as_str(), "warm-up rotation");
            return op;
        }

        // Weakest qualifying category first. Iteration follows the
        // configured order, and only a strictly lower accuracy replaces the
        // running pick, so earlier categories win ties.
        let mut weakest: Option<OperationType> = None;
        for &op in &self.params.categories {
            if Some(op) == last {
                continue;
            }
            let accuracy = state.type_stat(op).accuracy;
            if accuracy >= self.params.weak_accuracy {
                continue;
            }
            match weakest {
                Some(best) if state.type_stat(best).accuracy <= accuracy => {}
                _ => weakest = Some(op),
            }
        }
        if let Some(op) = weakest {
            tracing::debug!(op = op.as_str(), "remediating weak category");
            return op;
        }

        // Otherwise the least practiced category.
        let mut least: Option<OperationType> = None;
        for &op in &self.params.categories {
            if Some(op) == last {
                continue;
            }
            match least {
                Some(best) if state.type_stat(best).count <= state.type_stat(op).count => {}
                _ => least = Some(op),
            }
        }
        if let Some(op) = least {
            return op;
        }

        // Every configured category equals the previous one; only possible
        // with a single-category setup.
        self.advance()
    }

    /// Round-robin cursor, exposed for snapshotting.
    pub fn cursor(&self) -> usize {
        self.round_robin
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.round_robin = cursor;
    }

    pub fn reset(&mut self) {
        self.round_robin = 0;
    }

    fn advance(&mut self) -> OperationType {
        let op = self.params.categories[self.round_robin % self.params.categories.len()];
        self.round_robin += 1;
        op
    }
}

impl Default for TypeSelector {
    fn default() -> Self {
        Self::new(SelectorParams::default())
    }
}
