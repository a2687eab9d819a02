use serde::{Deserialize, Serialize};

use crate::solver::{Solution, Strategy};

/// Summary of one finished solver run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub strategy: Strategy,
    pub time_ms: f64,
    pub steps_count: usize,
    pub visited_count: usize,
    pub path_length: usize,
    pub max_stack_depth: usize,
}

impl RunMetrics {
    pub fn from_solution(solution: &Solution, time_ms: f64) -> Self {
        RunMetrics {
            strategy: solution.strategy,
            time_ms,
            steps_count: solution.steps_count(),
            visited_count: solution.visited_count,
            path_length: solution.path.len(),
            max_stack_depth: solution.max_stack_depth,
        }
    }
}

/// Latest metrics per strategy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    recursive: Option<RunMetrics>,
    iterative: Option<RunMetrics>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, strategy: Strategy) -> Option<&RunMetrics> {
        match strategy {
            Strategy::Recursive => self.recursive.as_ref(),
            Strategy::Iterative => self.iterative.as_ref(),
        }
    }

    pub fn store(&mut self, metrics: RunMetrics) {
        match metrics.strategy {
            Strategy::Recursive => self.recursive = Some(metrics),
            Strategy::Iterative => self.iterative = Some(metrics),
        }
    }

    pub fn clear(&mut self) {
        self.recursive = None;
        self.iterative = None;
    }

    /// Available once both strategies have run.
    pub fn comparison(&self) -> Option<Comparison> {
        Some(Comparison::between(self.recursive?, self.iterative?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub recursive: RunMetrics,
    pub iterative: RunMetrics,
    pub time_difference_ms: f64,
    pub steps_difference: usize,
    pub visited_difference: usize,
    pub depth_difference: usize,
    /// Ties go to the iterative run.
    pub faster: Strategy,
    pub same_path_length: bool,
    pub same_visited_count: bool,
}

impl Comparison {
    pub fn between(recursive: RunMetrics, iterative: RunMetrics) -> Self {
        let faster = if recursive.time_ms < iterative.time_ms {
            Strategy::Recursive
        } else {
            Strategy::Iterative
        };

        Comparison {
            time_difference_ms: (recursive.time_ms - iterative.time_ms).abs(),
            steps_difference: recursive.steps_count.abs_diff(iterative.steps_count),
            visited_difference: recursive.visited_count.abs_diff(iterative.visited_count),
            depth_difference: recursive.max_stack_depth.abs_diff(iterative.max_stack_depth),
            faster,
            same_path_length: recursive.path_length == iterative.path_length,
            same_visited_count: recursive.visited_count == iterative.visited_count,
            recursive,
            iterative,
        }
    }
}
