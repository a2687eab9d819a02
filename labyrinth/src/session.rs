use std::time::Instant;

use rand::Rng;
use tracing::debug;

use crate::error::MazeError;
use crate::history::{History, HistoryEvent};
use crate::maze::{Grid, Position};
use crate::metrics::{Comparison, Results, RunMetrics};
use crate::solver::{self, StepAction, StepEvent, StepSink, Strategy};
use crate::time;

/// Forwards solver events to the caller while logging them into the history.
struct Recording<'a> {
    history: &'a mut History,
    strategy: Strategy,
    inner: &'a mut dyn StepSink,
}

impl StepSink for Recording<'_> {
    fn on_step(&mut self, event: &StepEvent) {
        if event.action != StepAction::Found {
            self.history
                .record(self.strategy, HistoryEvent::from_step(event));
        }
        self.inner.on_step(event);
    }
}

/// The current maze together with everything recorded about solving it.
///
/// Every mutating operation takes `&mut self`, so at most one solve can be
/// in flight per session.
pub struct Session<R: Rng> {
    grid: Grid,
    rng: R,
    history: History,
    results: Results,
    last_path: Vec<Position>,
}

impl<R: Rng> Session<R> {
    pub fn new(width: usize, height: usize, mut rng: R) -> Result<Self, MazeError> {
        let grid = Grid::generate(width, height, &mut rng)?;

        Ok(Session {
            grid,
            rng,
            history: History::new(),
            results: Results::new(),
            last_path: Vec::new(),
        })
    }

    /// Replaces the maze; recorded history and results belong to the old one
    /// and are dropped.
    pub fn rebuild(&mut self, width: usize, height: usize) -> Result<(), MazeError> {
        self.grid = Grid::generate(width, height, &mut self.rng)?;
        self.history.clear();
        self.results.clear();
        self.last_path.clear();

        debug!(width, height, "session maze rebuilt");
        Ok(())
    }

    /// Solves from the top-left to the bottom-right corner and stores the
    /// run's metrics. The timing covers the sink's work as well.
    pub fn solve(
        &mut self,
        strategy: Strategy,
        sink: &mut dyn StepSink,
    ) -> Result<RunMetrics, MazeError> {
        self.grid.reset_flags();
        self.last_path.clear();
        self.history.begin(strategy);

        let (start, end) = (self.grid.start(), self.grid.end());
        let mut recording = Recording {
            history: &mut self.history,
            strategy,
            inner: sink,
        };

        let started = Instant::now();
        let solution = solver::solve(&mut self.grid, strategy, start, end, &mut recording)?;
        let time_ms = time::elapsed_ms(started);

        self.grid.mark_path(&solution.path);
        let metrics = RunMetrics::from_solution(&solution, time_ms);
        self.results.store(metrics);
        self.last_path = solution.path;

        Ok(metrics)
    }

    /// Wipes solve-time marks from the maze, keeping results and history.
    pub fn clear_path(&mut self) {
        self.grid.reset_flags();
        self.last_path.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    pub fn comparison(&self) -> Option<Comparison> {
        self.results.comparison()
    }

    pub fn last_path(&self) -> &[Position] {
        &self.last_path
    }
}
