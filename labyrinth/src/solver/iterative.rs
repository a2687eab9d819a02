use super::RunContext;
use crate::maze::{Grid, Position};

/// An explicit stack entry: a cell and the full path that reached it.
#[derive(Clone, Debug)]
struct Frame {
    cell: Position,
    path: Vec<Position>,
}

/// Depth-first search on an explicit stack of frames.
///
/// Neighbors are marked visited when pushed, so no cell is ever stacked twice.
/// A popped cell that is not adjacent to the previously processed one is
/// reported as a backtrack. That test also flags forward moves onto a sibling
/// branch pushed earlier; the event stream keeps that signal as it is.
pub fn solve(
    grid: &mut Grid,
    start: Position,
    end: Position,
    ctx: &mut RunContext<'_>,
) -> Option<Vec<Position>> {
    let mut stack = vec![Frame {
        cell: start,
        path: vec![start],
    }];
    grid.visit(start);
    let mut previous: Option<Position> = None;

    while let Some(Frame { cell, path }) = stack.pop() {
        ctx.sample_depth(stack.len() + 1);

        let is_backtrack = previous.is_some_and(|previous| !previous.is_adjacent(&cell));
        if is_backtrack {
            ctx.backtrack(cell);
        } else {
            ctx.visit(cell);
        }

        if cell == end {
            return Some(path);
        }

        for neighbor in grid.open_neighbors(cell) {
            if grid.is_visited(neighbor) {
                continue;
            }

            grid.visit(neighbor);
            let mut next = Vec::with_capacity(path.len() + 1);
            next.extend_from_slice(&path);
            next.push(neighbor);
            stack.push(Frame {
                cell: neighbor,
                path: next,
            });
        }

        previous = Some(cell);
        ctx.sample_depth(stack.len());
    }

    None
}
