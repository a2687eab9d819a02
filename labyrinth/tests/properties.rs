use disjoint::DisjointSetVec;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use labyrinth::solver::{self, StepEvent, Strategy};
use labyrinth::{Direction, Grid, Position};

fn positions(grid: &Grid) -> Vec<Position> {
    grid.cells().map(|cell| cell.position).collect()
}

fn index(grid: &Grid, position: Position) -> usize {
    position.y * grid.width() + position.x
}

/// Returns the number of passages, failing if any passage closes a loop or
/// some cell is left unreachable.
fn check_spanning_tree(grid: &Grid) -> Result<usize, TestCaseError> {
    let mut sets = DisjointSetVec::from(positions(grid));
    let mut edges = 0;

    for position in positions(grid) {
        for neighbor in grid.open_neighbors(position) {
            if index(grid, neighbor) < index(grid, position) {
                continue;
            }

            let (i, j) = (index(grid, position), index(grid, neighbor));
            prop_assert_ne!(
                sets.root_of(i),
                sets.root_of(j),
                "passage {} - {} closes a loop:\n{}",
                position,
                neighbor,
                grid.log()
            );
            sets.join(i, j);
            edges += 1;
        }
    }

    let root = sets.root_of(0);
    for i in 0..grid.width() * grid.height() {
        prop_assert_eq!(sets.root_of(i), root, "maze is disconnected:\n{}", grid.log());
    }

    Ok(edges)
}

fn check_wall_symmetry(grid: &Grid) -> Result<(), TestCaseError> {
    for cell in grid.cells() {
        for direction in [
            Direction::Top,
            Direction::Right,
            Direction::Bottom,
            Direction::Left,
        ] {
            let (dx, dy) = direction.delta();
            let neighbor = cell
                .position
                .x
                .checked_add_signed(dx)
                .zip(cell.position.y.checked_add_signed(dy))
                .map(|(x, y)| Position::new(x, y))
                .filter(|&position| grid.contains(position));

            match neighbor {
                Some(neighbor) => prop_assert_eq!(
                    cell.walls.has(direction),
                    grid.cell(neighbor).unwrap().walls.has(direction.opposite()),
                    "asymmetric wall between {} and {}",
                    cell.position,
                    neighbor
                ),
                None => prop_assert!(
                    cell.walls.has(direction),
                    "boundary wall {} of {} was removed",
                    direction,
                    cell.position
                ),
            }
        }
    }

    Ok(())
}

fn check_path(grid: &Grid, path: &[Position]) -> Result<(), TestCaseError> {
    prop_assert_eq!(path.first(), Some(&grid.start()));
    prop_assert_eq!(path.last(), Some(&grid.end()));

    for pair in path.windows(2) {
        prop_assert!(pair[0].is_adjacent(&pair[1]));
        prop_assert!(grid.is_open_between(pair[0], pair[1]));
    }

    let mut unique = path.to_vec();
    unique.sort();
    unique.dedup();
    prop_assert_eq!(unique.len(), path.len(), "path repeats a cell");

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_mazes_are_spanning_trees(
        width in 1usize..=40,
        height in 1usize..=40,
        seed in any::<u64>(),
    ) {
        let grid = Grid::generate(width, height, &mut StdRng::seed_from_u64(seed)).unwrap();

        let edges = check_spanning_tree(&grid)?;
        prop_assert_eq!(edges, width * height - 1);
        prop_assert_eq!(grid.passage_count(), width * height - 1);
        check_wall_symmetry(&grid)?;
        prop_assert_eq!(grid.visited_count(), 0);
    }

    #[test]
    fn both_solvers_find_valid_paths(
        width in 1usize..=40,
        height in 1usize..=40,
        seed in any::<u64>(),
    ) {
        let maze = Grid::generate(width, height, &mut StdRng::seed_from_u64(seed)).unwrap();

        for strategy in [Strategy::Recursive, Strategy::Iterative] {
            let mut grid = maze.clone();
            let (start, end) = (grid.start(), grid.end());
            let solution = solver::solve(&mut grid, strategy, start, end, &mut |_: &StepEvent| {})
                .unwrap();

            prop_assert!(solution.is_found());
            check_path(&grid, &solution.path)?;
            check_wall_symmetry(&grid)?;

            prop_assert_eq!(solution.visited_count, grid.visited_count());
            prop_assert!(solution.visited_count >= solution.path.len());

            for (i, event) in solution.steps.iter().enumerate() {
                prop_assert_eq!(event.step, i + 1);
            }
        }
    }

    #[test]
    fn recursive_solver_is_deterministic(
        width in 2usize..=25,
        height in 2usize..=25,
        seed in any::<u64>(),
    ) {
        let maze = Grid::generate(width, height, &mut StdRng::seed_from_u64(seed)).unwrap();
        let (start, end) = (maze.start(), maze.end());

        let mut first = maze.clone();
        let mut second = maze.clone();
        let a = solver::solve(&mut first, Strategy::Recursive, start, end, &mut |_: &StepEvent| {})
            .unwrap();
        let b = solver::solve(&mut second, Strategy::Recursive, start, end, &mut |_: &StepEvent| {})
            .unwrap();

        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }
}
