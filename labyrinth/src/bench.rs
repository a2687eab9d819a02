use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::MazeError;
use crate::maze::{Grid, Position};
use crate::time;

pub const DEFAULT_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchSample {
    pub size: usize,
    pub recursive_ms: f64,
    pub iterative_ms: f64,
}

/// Times both pure solvers on one square maze per size, in input order.
///
/// The recursive solver uses one stack frame per cell on its current branch,
/// so sizes much beyond 100 can overflow the thread's stack.
pub fn run<R: Rng + ?Sized>(sizes: &[usize], rng: &mut R) -> Result<Vec<BenchSample>, MazeError> {
    sizes.iter().map(|&size| sample(size, &mut *rng)).collect()
}

fn sample<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<BenchSample, MazeError> {
    let mut recursive_grid = Grid::generate(size, size, rng)?;
    let mut iterative_grid = recursive_grid.clone();
    let start = recursive_grid.start();

    let started = Instant::now();
    let recursive_reached = solve_recursive(&mut recursive_grid, start);
    let recursive_ms = time::elapsed_ms(started);

    let started = Instant::now();
    let iterative_reached = solve_iterative(&mut iterative_grid);
    let iterative_ms = time::elapsed_ms(started);

    if !recursive_reached || !iterative_reached {
        warn!(
            size,
            recursive_reached, iterative_reached, "benchmark solver missed the corner"
        );
    }
    debug!(size, recursive_ms, iterative_ms, "benchmark sample");

    Ok(BenchSample {
        size,
        recursive_ms,
        iterative_ms,
    })
}

/// Recursive search with no events and no path bookkeeping.
pub fn solve_recursive(grid: &mut Grid, cell: Position) -> bool {
    if cell == grid.end() {
        return true;
    }
    grid.visit(cell);

    grid.open_neighbors(cell)
        .into_iter()
        .any(|neighbor| !grid.is_visited(neighbor) && solve_recursive(grid, neighbor))
}

/// Stack-based search that peeks the top and pushes its first open, unvisited
/// neighbor, popping only once none is left.
pub fn solve_iterative(grid: &mut Grid) -> bool {
    let (start, end) = (grid.start(), grid.end());
    let mut stack = vec![start];
    grid.visit(start);

    while let Some(&curr) = stack.last() {
        if curr == end {
            return true;
        }

        let next = grid
            .open_neighbors(curr)
            .into_iter()
            .find(|&neighbor| !grid.is_visited(neighbor));

        match next {
            Some(next) => {
                grid.visit(next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    false
}
