//! Row-count bookkeeping for each cleaning and filtering step.

use serde::{Deserialize, Serialize};

/// Row counts before and after one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCount {
    pub table: String,
    pub step: String,
    pub before: usize,
    pub after: usize,
}

impl StageCount {
    pub fn removed(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

/// Ordered record of the steps applied to one or more tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageLog {
    pub stages: Vec<StageCount>,
}

impl StageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step and logs it.
    pub fn record(&mut self, table: &str, step: &str, before: usize, after: usize) {
        log::info!(
            "[{}] {}: {} -> {} rows ({} removed)",
            table,
            step,
            before,
            after,
            before.saturating_sub(after)
        );
        self.stages.push(StageCount {
            table: table.to_string(),
            step: step.to_string(),
            before,
            after,
        });
    }

    pub fn extend(&mut self, other: StageLog) {
        self.stages.extend(other.stages);
    }

    /// First recorded step with the given table and step name.
    pub fn find(&self, table: &str, step: &str) -> Option<&StageCount> {
        self.stages
            .iter()
            .find(|s| s.table == table && s.step == step)
    }
}
