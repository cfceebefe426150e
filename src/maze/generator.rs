//! Random maze generation with a guaranteed-solvable layout

use rand::rngs::StdRng;

use crate::{
    error::{Error, Result},
    maze::grid::{Cell, Grid, Position},
};

/// Generate a square maze of the given size and wall density
///
/// `complexity` is the fraction of cells marked as walls, in `[0, 1)`.
/// Walls are sampled uniformly without replacement; afterwards a monotone
/// staircase path from (0, 0) to (size-1, size-1) is forced open, so the
/// returned maze is always solvable regardless of density. Carving the path
/// takes precedence over the requested wall count.
///
/// # Errors
///
/// Returns `InvalidConfiguration` when `size < 2`, when `complexity` falls
/// outside `[0, 1)`, or when the implied wall count reaches the total cell
/// count.
pub fn generate(size: usize, complexity: f64, rng: &mut StdRng) -> Result<Grid> {
    if size < 2 {
        return Err(Error::InvalidConfiguration {
            message: format!("maze size must be at least 2, got {size}"),
        });
    }
    if !(0.0..1.0).contains(&complexity) {
        return Err(Error::InvalidConfiguration {
            message: format!("complexity must be in [0, 1), got {complexity}"),
        });
    }

    let total_cells = size * size;
    let num_walls = (total_cells as f64 * complexity) as usize;
    if num_walls >= total_cells {
        return Err(Error::InvalidConfiguration {
            message: format!(
                "complexity {complexity} yields {num_walls} walls for {total_cells} cells"
            ),
        });
    }

    let mut grid = Grid::open(size);
    for index in rand::seq::index::sample(rng, total_cells, num_walls) {
        grid.set(Position::new(index / size, index % size), Cell::Wall);
    }

    // Corners are fixed regardless of the wall sample
    grid.set(grid.start(), Cell::Open);
    grid.set(grid.goal(), Cell::Goal);

    for position in staircase_path(size) {
        grid.set(position, Cell::Open);
    }
    // The staircase ends on the goal cell and marked it Open
    grid.set(grid.goal(), Cell::Goal);

    // Unreachable by construction; a failure here is a defect, not bad input
    if !grid.has_path() {
        return Err(Error::UnsolvableMaze { size });
    }

    Ok(grid)
}

/// The forced path from start to goal: down until the goal row, then right
fn staircase_path(size: usize) -> Vec<Position> {
    let goal = Position::new(size - 1, size - 1);
    let mut current = Position::new(0, 0);
    let mut path = vec![current];

    while current != goal {
        if current.row < goal.row {
            current = Position::new(current.row + 1, current.col);
        } else if current.col < goal.col {
            current = Position::new(current.row, current.col + 1);
        }
        path.push(current);
    }

    path
}
