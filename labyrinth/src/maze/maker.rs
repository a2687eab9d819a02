pub mod backtrack;

use rand::Rng;
use rand::prelude::IndexedRandom;
use tracing::debug;

use backtrack::Backtrack;

use super::{Grid, Position};
use crate::error::MazeError;

/// Carves passages into a fully walled grid using a borrowed random source,
/// so callers can inject a seeded generator.
pub struct MazeMaker<'a, R: Rng + ?Sized> {
    grid: Grid,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> MazeMaker<'a, R> {
    pub fn new(width: usize, height: usize, rng: &'a mut R) -> Result<Self, MazeError> {
        let grid = Grid::new(width, height)?;
        Ok(MazeMaker { grid, rng })
    }

    /// Runs the generator and hands back a maze with every solve flag cleared.
    pub fn build(mut self) -> Result<Grid, MazeError> {
        self.backtrack()?;
        self.grid.reset_flags();

        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            passages = self.grid.passage_count(),
            "maze generated"
        );

        Ok(self.grid)
    }

    // Visited state, not wall state: every wall is still standing around
    // unvisited cells while carving.
    fn unvisited_neighbors(&self, cell: Position) -> Vec<Position> {
        self.grid
            .neighbors_in_bounds(cell)
            .into_iter()
            .filter(|&neighbor| !self.grid.is_visited(neighbor))
            .collect()
    }

    fn pick_neighbor(&mut self, cell: Position) -> Option<Position> {
        let neighbors = self.unvisited_neighbors(cell);
        neighbors.choose(&mut *self.rng).copied()
    }

    fn pick_cell(&mut self) -> Position {
        let x = self.rng.random_range(0..self.grid.width());
        let y = self.rng.random_range(0..self.grid.height());
        Position { x, y }
    }

    fn visit_cell(&mut self, cell: Position) {
        self.grid.visit(cell);
    }

    fn remove_wall_between(&mut self, a: Position, b: Position) -> Result<(), MazeError> {
        self.grid.remove_wall_between(a, b)
    }
}
