use thiserror::Error;

use crate::maze::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    DegenerateSize { width: usize, height: usize },
    #[error("cells {a} and {b} are not adjacent")]
    NotAdjacent { a: Position, b: Position },
    #[error("cell {cell} is outside a {width}x{height} grid")]
    OutOfBounds {
        cell: Position,
        width: usize,
        height: usize,
    },
    #[error("grid still has {visited} visited cells; reset its flags before solving")]
    StaleFlags { visited: usize },
}
