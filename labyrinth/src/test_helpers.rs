use crate::maze::{Grid, Position};

/// A grid with only the listed walls removed.
pub fn grid_with_passages(
    width: usize,
    height: usize,
    passages: &[((usize, usize), (usize, usize))],
) -> Grid {
    let mut grid = Grid::new(width, height).expect("test grids have positive dimensions");

    for &((ax, ay), (bx, by)) in passages {
        grid.remove_wall_between(Position::new(ax, ay), Position::new(bx, by))
            .expect("test passages join adjacent cells");
    }

    grid
}

/// A straight, single-file passage. One of the dimensions must be 1.
pub fn corridor(width: usize, height: usize) -> Grid {
    assert!(width == 1 || height == 1, "a corridor is one cell wide");

    let mut grid = Grid::new(width, height).expect("test grids have positive dimensions");
    let cells: Vec<Position> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
        .collect();

    for pair in cells.windows(2) {
        grid.remove_wall_between(pair[0], pair[1])
            .expect("corridor cells are adjacent");
    }

    grid
}

/// Checks that `path` walks from start to end through open walls without revisiting.
pub fn assert_valid_path(grid: &Grid, path: &[Position]) {
    assert_eq!(path.first(), Some(&grid.start()), "path should begin at the start");
    assert_eq!(path.last(), Some(&grid.end()), "path should finish at the end");

    for pair in path.windows(2) {
        assert!(
            grid.is_open_between(pair[0], pair[1]),
            "no passage between {} and {}:\n{}",
            pair[0],
            pair[1],
            grid.log()
        );
    }

    let mut seen = path.to_vec();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), path.len(), "path should not repeat cells");
}
