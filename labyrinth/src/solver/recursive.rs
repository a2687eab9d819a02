use std::ops::{Deref, DerefMut};

use super::RunContext;
use crate::maze::{Grid, Position};

/// One entry of the shared path buffer, owned by one call. The cell is pushed
/// on entry and popped when the frame goes out of scope, on every exit path.
struct PathFrame<'p> {
    path: &'p mut Vec<Position>,
}

impl<'p> PathFrame<'p> {
    fn enter(path: &'p mut Vec<Position>, cell: Position) -> Self {
        path.push(cell);
        PathFrame { path }
    }
}

impl Deref for PathFrame<'_> {
    type Target = Vec<Position>;

    fn deref(&self) -> &Self::Target {
        self.path
    }
}

impl DerefMut for PathFrame<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.path
    }
}

impl Drop for PathFrame<'_> {
    fn drop(&mut self) {
        self.path.pop();
    }
}

/// Depth-first search on the call stack. Returns a copy of the path buffer
/// at the moment `end` is entered.
pub fn solve(
    grid: &mut Grid,
    start: Position,
    end: Position,
    ctx: &mut RunContext<'_>,
) -> Option<Vec<Position>> {
    let mut path = Vec::new();
    let found = explore(grid, start, start, end, 1, &mut path, ctx);
    debug_assert!(path.is_empty(), "every frame pops its own cell");
    found
}

fn explore(
    grid: &mut Grid,
    cell: Position,
    start: Position,
    end: Position,
    depth: usize,
    path: &mut Vec<Position>,
    ctx: &mut RunContext<'_>,
) -> Option<Vec<Position>> {
    let mut frame = PathFrame::enter(path, cell);

    grid.visit(cell);
    ctx.sample_depth(depth);
    ctx.visit(cell);

    if cell == end {
        return Some(frame.to_vec());
    }

    for neighbor in grid.open_neighbors(cell) {
        if grid.is_visited(neighbor) {
            continue;
        }

        if let Some(found) = explore(grid, neighbor, start, end, depth + 1, &mut frame, ctx) {
            return Some(found);
        }
    }

    if cell != start {
        grid.mark_backtracking(cell);
        ctx.backtrack(cell);
    }
    ctx.sample_depth(depth - 1);

    None
}
