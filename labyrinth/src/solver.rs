pub mod iterative;
pub mod recursive;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, trace};

use crate::error::MazeError;
use crate::maze::{Grid, Position};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Recursive,
    Iterative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Start,
    Visit,
    Backtrack,
    Found,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub step: usize,
    pub cell: Position,
    pub action: StepAction,
    pub is_backtrack: bool,
    pub stack_size: usize,
    pub max_depth: usize,
}

/// Receives every solver event synchronously, in order. Pacing, drawing and
/// logging all happen on the caller's side of this trait.
pub trait StepSink {
    fn on_step(&mut self, event: &StepEvent);
}

impl<F> StepSink for F
where
    F: FnMut(&StepEvent),
{
    fn on_step(&mut self, event: &StepEvent) {
        self(event)
    }
}

/// Step counter, stack gauge and event log for a single solver run.
pub struct RunContext<'s> {
    strategy: Strategy,
    step: usize,
    stack_size: usize,
    max_depth: usize,
    steps: Vec<StepEvent>,
    sink: &'s mut dyn StepSink,
}

impl<'s> RunContext<'s> {
    pub fn new(strategy: Strategy, sink: &'s mut dyn StepSink) -> Self {
        RunContext {
            strategy,
            step: 0,
            stack_size: 0,
            max_depth: 0,
            steps: Vec::new(),
            sink,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn steps_count(&self) -> usize {
        self.step
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn steps(&self) -> &[StepEvent] {
        &self.steps
    }

    pub fn sample_depth(&mut self, size: usize) {
        self.stack_size = size;
        self.max_depth = self.max_depth.max(size);
    }

    pub fn start(&mut self, cell: Position) {
        self.emit(0, cell, StepAction::Start);
    }

    pub fn visit(&mut self, cell: Position) {
        self.advance(cell, StepAction::Visit);
    }

    pub fn backtrack(&mut self, cell: Position) {
        self.advance(cell, StepAction::Backtrack);
    }

    /// Announced one past the last counted step; does not advance the counter.
    pub fn found(&mut self, cell: Position) {
        self.emit(self.step + 1, cell, StepAction::Found);
    }

    fn advance(&mut self, cell: Position, action: StepAction) {
        self.step += 1;
        let event = self.emit(self.step, cell, action);
        self.steps.push(event);
    }

    fn emit(&mut self, step: usize, cell: Position, action: StepAction) -> StepEvent {
        let event = StepEvent {
            step,
            cell,
            action,
            is_backtrack: action == StepAction::Backtrack,
            stack_size: self.stack_size,
            max_depth: self.max_depth,
        };

        trace!(strategy = %self.strategy, step, %cell, %action, "solver step");
        self.sink.on_step(&event);
        event
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub strategy: Strategy,
    /// Start to end inclusive; empty when the end was unreachable.
    pub path: Vec<Position>,
    pub visited_count: usize,
    /// Counted visit and backtrack events, numbered from 1.
    pub steps: Vec<StepEvent>,
    pub max_stack_depth: usize,
}

impl Solution {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn steps_count(&self) -> usize {
        self.steps.len()
    }

    pub fn backtrack_count(&self) -> usize {
        self.steps.iter().filter(|event| event.is_backtrack).count()
    }
}

/// Runs one strategy from `start` to `end`. The grid's flags must already be
/// cleared; the solver leaves its visited marks behind for inspection.
///
/// [`Strategy::Recursive`] recurses once per cell on the current branch, so
/// very large grids (well past 100 on a side) can overflow the thread's stack.
pub fn solve(
    grid: &mut Grid,
    strategy: Strategy,
    start: Position,
    end: Position,
    sink: &mut dyn StepSink,
) -> Result<Solution, MazeError> {
    grid.check(start)?;
    grid.check(end)?;

    let visited = grid.visited_count();
    if visited != 0 {
        return Err(MazeError::StaleFlags { visited });
    }

    let mut ctx = RunContext::new(strategy, sink);
    ctx.start(start);

    let path = match strategy {
        Strategy::Recursive => recursive::solve(grid, start, end, &mut ctx),
        Strategy::Iterative => iterative::solve(grid, start, end, &mut ctx),
    };

    let path = match path {
        Some(path) => {
            ctx.found(end);
            path
        }
        None => Vec::new(),
    };

    let solution = Solution {
        strategy,
        visited_count: grid.visited_count(),
        max_stack_depth: ctx.max_depth(),
        steps: ctx.steps,
        path,
    };

    debug!(
        %strategy,
        found = solution.is_found(),
        steps = solution.steps_count(),
        visited = solution.visited_count,
        path_length = solution.path.len(),
        max_stack_depth = solution.max_stack_depth,
        "solve finished"
    );

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::test_helpers::{corridor, grid_with_passages};

    fn solve_quietly(grid: &mut Grid, strategy: Strategy) -> Solution {
        let (start, end) = (grid.start(), grid.end());
        solve(grid, strategy, start, end, &mut |_: &StepEvent| {}).expect("solve should run")
    }

    #[test]
    fn strategy_names_round_trip_through_strings() {
        assert_eq!(Strategy::Recursive.to_string(), "recursive");
        assert_eq!(Strategy::Iterative.to_string(), "iterative");
        assert_eq!(Strategy::from_str("iterative"), Ok(Strategy::Iterative));
        assert!(Strategy::from_str("bfs").is_err());
    }

    #[test]
    fn sink_sees_start_counted_steps_and_found_in_order() {
        let mut grid = corridor(1, 4);
        let mut seen = Vec::new();
        let (start, end) = (grid.start(), grid.end());

        let solution = solve(
            &mut grid,
            Strategy::Recursive,
            start,
            end,
            &mut |event: &StepEvent| seen.push(*event),
        )
        .unwrap();

        let actions: Vec<_> = seen.iter().map(|event| event.action).collect();
        assert_eq!(
            actions,
            vec![
                StepAction::Start,
                StepAction::Visit,
                StepAction::Visit,
                StepAction::Visit,
                StepAction::Visit,
                StepAction::Found,
            ]
        );
        let numbers: Vec<_> = seen.iter().map(|event| event.step).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(seen.last().unwrap().cell, end);
        assert_eq!(solution.steps, seen[1..5].to_vec());
    }

    #[test]
    fn unreachable_end_gives_an_empty_path_and_no_found_event() {
        let mut grid = grid_with_passages(3, 1, &[((0, 0), (1, 0))]);
        let mut found_events = 0;
        let (start, end) = (grid.start(), grid.end());

        for strategy in [Strategy::Recursive, Strategy::Iterative] {
            grid.reset_flags();
            let solution = solve(&mut grid, strategy, start, end, &mut |event: &StepEvent| {
                if event.action == StepAction::Found {
                    found_events += 1;
                }
            })
            .unwrap();

            assert!(!solution.is_found(), "{strategy} should not reach the end");
            assert_eq!(solution.visited_count, 2);
        }
        assert_eq!(found_events, 0);
    }

    #[test]
    fn solving_a_grid_with_stale_flags_fails_fast() {
        let mut grid = corridor(3, 1);
        solve_quietly(&mut grid, Strategy::Iterative);

        let (start, end) = (grid.start(), grid.end());
        let result = solve(&mut grid, Strategy::Recursive, start, end, &mut |_: &StepEvent| {});

        assert_eq!(result, Err(MazeError::StaleFlags { visited: 3 }));
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let mut grid = corridor(3, 1);
        let result = solve(
            &mut grid,
            Strategy::Iterative,
            Position::new(0, 0),
            Position::new(3, 0),
            &mut |_: &StepEvent| {},
        );

        assert!(matches!(result, Err(MazeError::OutOfBounds { .. })));
        assert_eq!(grid.visited_count(), 0);
    }

    #[test]
    fn both_strategies_reach_the_corner_of_generated_mazes() {
        let mut rng = StdRng::seed_from_u64(2024);

        for size in [5, 10, 25, 50] {
            let grid = Grid::generate(size, size, &mut rng).unwrap();

            for strategy in [Strategy::Recursive, Strategy::Iterative] {
                let mut grid = grid.clone();
                let solution = solve_quietly(&mut grid, strategy);

                assert_eq!(solution.path.first(), Some(&grid.start()));
                assert_eq!(solution.path.last(), Some(&grid.end()));
                assert!(solution.visited_count >= solution.path.len());
            }
        }
    }

    #[test]
    fn single_cell_maze_is_solved_immediately() {
        let mut grid = Grid::new(1, 1).unwrap();

        for strategy in [Strategy::Recursive, Strategy::Iterative] {
            grid.reset_flags();
            let solution = solve_quietly(&mut grid, strategy);

            assert_eq!(solution.path, vec![Position::new(0, 0)]);
            assert_eq!(solution.steps_count(), 1);
            assert_eq!(solution.max_stack_depth, 1);
        }
    }
}
