use rand::Rng;

use super::MazeMaker;
use crate::error::MazeError;

pub trait Backtrack {
    fn backtrack(&mut self) -> Result<(), MazeError>;
}

impl<R: Rng + ?Sized> Backtrack for MazeMaker<'_, R> {
    fn backtrack(&mut self) -> Result<(), MazeError> {
        let initial_cell = self.pick_cell();
        self.visit_cell(initial_cell);
        let mut stack = vec![initial_cell];

        while let Some(&curr) = stack.last() {
            match self.pick_neighbor(curr) {
                Some(next) => {
                    self.remove_wall_between(curr, next)?;
                    self.visit_cell(next);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        Ok(())
    }
}
