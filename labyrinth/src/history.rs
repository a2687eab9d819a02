use serde::{Deserialize, Serialize};

use crate::maze::Position;
use crate::solver::{StepAction, StepEvent, Strategy};
use crate::time;

/// How many trailing entries a detailed history view shows.
pub const DETAIL_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub step: usize,
    pub cell: Position,
    pub is_backtrack: bool,
    pub action: StepAction,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

impl HistoryEvent {
    pub fn from_step(event: &StepEvent) -> Self {
        HistoryEvent {
            step: event.step,
            cell: event.cell,
            is_backtrack: event.is_backtrack,
            action: event.action,
            timestamp_ms: time::timestamp_ms(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total: usize,
    pub forward: usize,
    pub backtrack: usize,
}

/// Append-only step logs, one per strategy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    recursive: Vec<HistoryEvent>,
    iterative: Vec<HistoryEvent>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, strategy: Strategy) -> &Vec<HistoryEvent> {
        match strategy {
            Strategy::Recursive => &self.recursive,
            Strategy::Iterative => &self.iterative,
        }
    }

    fn log_mut(&mut self, strategy: Strategy) -> &mut Vec<HistoryEvent> {
        match strategy {
            Strategy::Recursive => &mut self.recursive,
            Strategy::Iterative => &mut self.iterative,
        }
    }

    /// Starts a fresh log for `strategy`, leaving the other one alone.
    pub fn begin(&mut self, strategy: Strategy) {
        self.log_mut(strategy).clear();
    }

    pub fn record(&mut self, strategy: Strategy, event: HistoryEvent) {
        let log = self.log_mut(strategy);
        debug_assert!(
            log.last().is_none_or(|last| last.step < event.step),
            "history steps must be strictly increasing"
        );
        log.push(event);
    }

    pub fn events(&self, strategy: Strategy) -> &[HistoryEvent] {
        self.log(strategy)
    }

    /// The last `limit` entries, oldest first.
    pub fn recent(&self, strategy: Strategy, limit: usize) -> &[HistoryEvent] {
        let log = self.log(strategy);
        &log[log.len().saturating_sub(limit)..]
    }

    /// The start entry counts as a forward move.
    pub fn summary(&self, strategy: Strategy) -> HistorySummary {
        let log = self.log(strategy);
        let backtrack = log.iter().filter(|event| event.is_backtrack).count();

        HistorySummary {
            total: log.len(),
            forward: log.len() - backtrack,
            backtrack,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recursive.is_empty() && self.iterative.is_empty()
    }

    pub fn clear(&mut self) {
        self.recursive.clear();
        self.iterative.clear();
    }
}
