pub mod maker;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::MazeError;

pub use maker::MazeMaker;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// True when `other` is exactly one step away horizontally or vertically.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    fn step(&self, direction: Direction, width: usize, height: usize) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;

        if x < width && y < height {
            Some(Position { x, y })
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// Declaration order is the neighbor order used everywhere: it decides which
// solution the solvers find and in what order they visit cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Direction pointing from `from` to `to`, if they are adjacent.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let dx = to.x as isize - from.x as isize;
        let dy = to.y as isize - from.y as isize;

        match (dx, dy) {
            (0, -1) => Some(Direction::Top),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Bottom),
            (-1, 0) => Some(Direction::Left),
            _ => None,
        }
    }
}

/// `true` means the wall is present and blocks movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const ALL: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    fn clear(&mut self, direction: Direction) {
        match direction {
            Direction::Top => self.top = false,
            Direction::Right => self.right = false,
            Direction::Bottom => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::ALL
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    pub walls: Walls,
    pub visited: bool,
    pub in_path: bool,
    pub backtracking: bool,
}

impl Cell {
    fn new(x: usize, y: usize) -> Cell {
        Cell {
            position: Position { x, y },
            walls: Walls::ALL,
            visited: false,
            in_path: false,
            backtracking: false,
        }
    }
}

/// A rectangular lattice of cells, stored row by row (`cells[y][x]`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// A grid of fully walled, unvisited cells.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::DegenerateSize { width, height });
        }

        let cells = (0..height)
            .map(|y| (0..width).map(|x| Cell::new(x, y)).collect())
            .collect();

        Ok(Grid {
            cells,
            width,
            height,
        })
    }

    /// Carves a perfect maze with the randomized depth-first backtracker.
    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        MazeMaker::new(width, height, rng)?.build()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Position {
        Position { x: 0, y: 0 }
    }

    pub fn end(&self) -> Position {
        Position {
            x: self.width - 1,
            y: self.height - 1,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    pub fn check(&self, position: Position) -> Result<(), MazeError> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                cell: position,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn cell(&self, position: Position) -> Result<&Cell, MazeError> {
        self.check(position)?;
        Ok(self.at(position))
    }

    fn at(&self, position: Position) -> &Cell {
        &self.cells[position.y][position.x]
    }

    fn cell_mut(&mut self, position: Position) -> &mut Cell {
        &mut self.cells[position.y][position.x]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Adjacent cells that exist, in top/right/bottom/left order.
    pub fn neighbors_in_bounds(&self, position: Position) -> Vec<Position> {
        Direction::iter()
            .filter_map(|direction| position.step(direction, self.width, self.height))
            .collect()
    }

    /// Adjacent cells reachable through a removed wall, in top/right/bottom/left order.
    /// Empty for a position outside the grid.
    pub fn open_neighbors(&self, position: Position) -> Vec<Position> {
        let Ok(cell) = self.cell(position) else {
            return Vec::new();
        };
        let walls = cell.walls;

        Direction::iter()
            .filter(|&direction| !walls.has(direction))
            .filter_map(|direction| position.step(direction, self.width, self.height))
            .collect()
    }

    /// Clears the wall pair between two grid-adjacent cells.
    pub fn remove_wall_between(&mut self, a: Position, b: Position) -> Result<(), MazeError> {
        self.check(a)?;
        self.check(b)?;
        let direction = Direction::between(a, b).ok_or(MazeError::NotAdjacent { a, b })?;

        self.cell_mut(a).walls.clear(direction);
        self.cell_mut(b).walls.clear(direction.opposite());

        Ok(())
    }

    /// False for cells that are not adjacent.
    pub fn is_open_between(&self, a: Position, b: Position) -> bool {
        match Direction::between(a, b) {
            Some(direction) if self.contains(a) && self.contains(b) => {
                !self.at(a).walls.has(direction)
            }
            _ => false,
        }
    }

    // Solver-internal flag setters; callers have already bounds-checked.
    pub(crate) fn visit(&mut self, position: Position) {
        self.cell_mut(position).visited = true;
    }

    pub(crate) fn is_visited(&self, position: Position) -> bool {
        self.at(position).visited
    }

    pub fn visited_count(&self) -> usize {
        self.cells().filter(|cell| cell.visited).count()
    }

    pub(crate) fn mark_backtracking(&mut self, position: Position) {
        self.cell_mut(position).backtracking = true;
    }

    pub(crate) fn mark_path(&mut self, path: &[Position]) {
        for &position in path {
            self.cell_mut(position).in_path = true;
        }
    }

    /// Clears every solve-time flag so the grid can be handed to a solver.
    pub fn reset_flags(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.visited = false;
            cell.in_path = false;
            cell.backtracking = false;
        }
    }

    /// Number of removed walls, each pair counted once.
    pub fn passage_count(&self) -> usize {
        self.cells()
            .map(|cell| {
                let right = cell.position.x + 1 < self.width && !cell.walls.right;
                let bottom = cell.position.y + 1 < self.height && !cell.walls.bottom;
                right as usize + bottom as usize
            })
            .sum()
    }

    pub fn log(&self) -> String {
        let mut lines = Vec::with_capacity(2 * self.height + 1);

        let mut top = String::from("+");
        for cell in &self.cells[0] {
            top.push_str(if cell.walls.top { "--+" } else { "  +" });
        }
        lines.push(top);

        for row in &self.cells {
            let mut middle = String::from(if row[0].walls.left { "|" } else { " " });
            let mut bottom = String::from("+");

            for cell in row {
                middle.push_str(if cell.in_path { "()" } else { "  " });
                middle.push(if cell.walls.right { '|' } else { ' ' });
                bottom.push_str(if cell.walls.bottom { "--+" } else { "  +" });
            }

            lines.push(middle);
            lines.push(bottom);
        }

        lines.join("\n")
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
