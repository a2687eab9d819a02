use std::thread;
use std::time::Duration;

use serde::Serialize;
use strum::IntoEnumIterator;

use labyrinth::bench::BenchSample;
use labyrinth::history::{DETAIL_LIMIT, History, HistorySummary};
use labyrinth::{
    Comparison, Grid, Position, RunMetrics, StepAction, StepEvent, StepSink, Strategy,
};

/// Prints each solver event and then waits, so a run can be followed live.
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Pacer { delay }
    }
}

impl StepSink for Pacer {
    fn on_step(&mut self, event: &StepEvent) {
        println!(
            "  #{:<5} {} [stack {}, max {}]",
            event.step,
            describe(event),
            event.stack_size,
            event.max_depth
        );
        thread::sleep(self.delay);
    }
}

fn describe(event: &StepEvent) -> String {
    match event.action {
        StepAction::Start => format!("starting search at {}", event.cell),
        StepAction::Visit => format!("exploring {}", event.cell),
        StepAction::Backtrack => format!("backtracking at {}", event.cell),
        StepAction::Found => format!("path found at {}", event.cell),
    }
}

pub fn print_maze(title: &str, grid: &Grid) {
    println!("{title} ({}x{})", grid.width(), grid.height());
    println!("{}", grid.log());
    println!();
}

pub fn print_metrics(metrics: &RunMetrics) {
    println!("{} search:", metrics.strategy);
    println!("  time:            {:.3} ms", metrics.time_ms);
    println!("  steps:           {}", metrics.steps_count);
    println!("  visited cells:   {}", metrics.visited_count);
    println!("  path length:     {}", metrics.path_length);
    println!("  max stack depth: {}", metrics.max_stack_depth);
    println!();
}

pub fn print_comparison(comparison: &Comparison) {
    let Comparison {
        recursive: r,
        iterative: i,
        ..
    } = comparison;

    println!("Comparison:");
    println!(
        "  time:        {:.3} ms vs {:.3} ms (difference {:.3} ms, {} was faster)",
        r.time_ms, i.time_ms, comparison.time_difference_ms, comparison.faster
    );
    println!(
        "  steps:       {} vs {} (difference {})",
        r.steps_count, i.steps_count, comparison.steps_difference
    );
    println!(
        "  visited:     {} vs {} (difference {})",
        r.visited_count, i.visited_count, comparison.visited_difference
    );
    println!(
        "  stack depth: {} vs {} (difference {})",
        r.max_stack_depth, i.max_stack_depth, comparison.depth_difference
    );
    println!(
        "  path length: {} vs {}{}",
        r.path_length,
        i.path_length,
        if comparison.same_path_length {
            ""
        } else {
            " (different routes)"
        }
    );
    println!();
}

pub fn print_history(history: &History, detailed: bool) {
    if history.is_empty() {
        println!("History: nothing recorded yet.");
        return;
    }

    println!("History:");
    for strategy in Strategy::iter() {
        let HistorySummary {
            total,
            forward,
            backtrack,
        } = history.summary(strategy);
        if total == 0 {
            continue;
        }

        println!("  {strategy}: {total} entries, {forward} forward, {backtrack} backtrack");

        if detailed {
            for event in history.recent(strategy, DETAIL_LIMIT) {
                let direction = if event.is_backtrack { "back" } else { "forward" };
                println!("    #{:<5} {} {}", event.step, event.cell, direction);
            }
            if total > DETAIL_LIMIT {
                println!("    ... and {} earlier entries", total - DETAIL_LIMIT);
            }
        }
    }
    println!();
}

pub fn print_benchmark(samples: &[BenchSample]) {
    println!("Benchmark:");
    println!("  {:>9} | {:>14} | {:>14}", "size", "recursive (ms)", "iterative (ms)");
    for sample in samples {
        println!(
            "  {:>9} | {:>14.4} | {:>14.4}",
            format!("{0}x{0}", sample.size),
            sample.recursive_ms,
            sample.iterative_ms
        );
    }
}

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub width: usize,
    pub height: usize,
    pub results: Vec<RunMetrics>,
    pub comparison: Option<Comparison>,
    pub history: Vec<(Strategy, HistorySummary)>,
    pub path: &'a [Position],
    pub benchmark: &'a [BenchSample],
}
