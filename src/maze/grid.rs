//! Grid representation and basic operations

use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};

/// A cell in the maze grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Open,
    Wall,
    Goal,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Wall => '#',
            Cell::Goal => 'G',
        }
    }
}

/// A location on the grid as a (row, col) pair
///
/// The start cell is (0, 0); rows grow downward and columns grow rightward,
/// so the goal cell sits at (size-1, size-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Square maze grid stored as a flat cell vector
///
/// Cells are indexed by `row * size + col`. The generator guarantees that a
/// finished grid has exactly one Goal cell at (size-1, size-1), an Open start
/// at (0, 0), and a 4-directional path between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell Open
    pub fn open(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Open; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Start position (always the top-left corner)
    pub fn start(&self) -> Position {
        Position::new(0, 0)
    }

    /// Goal position (always the bottom-right corner)
    pub fn goal(&self) -> Position {
        Position::new(self.size - 1, self.size - 1)
    }

    fn index(&self, position: Position) -> usize {
        debug_assert!(position.row < self.size && position.col < self.size);
        position.row * self.size + position.col
    }

    pub fn get(&self, position: Position) -> Cell {
        self.cells[self.index(position)]
    }

    pub fn set(&mut self, position: Position, cell: Cell) {
        let index = self.index(position);
        self.cells[index] = cell;
    }

    /// Whether a 4-directional path of non-Wall cells connects start to goal
    ///
    /// Breadth-first search over the grid. The generator asserts this on every
    /// maze it returns; tests use it to verify the solvability guarantee.
    pub fn has_path(&self) -> bool {
        let start = self.start();
        let goal = self.goal();
        if self.get(start) == Cell::Wall {
            return false;
        }

        let mut visited = vec![false; self.size * self.size];
        let mut queue = VecDeque::new();
        visited[self.index(start)] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                return true;
            }
            for neighbor in self.neighbors(current) {
                let index = self.index(neighbor);
                if !visited[index] && self.get(neighbor) != Cell::Wall {
                    visited[index] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        false
    }

    fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> {
        const DELTAS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
        let size = self.size;
        DELTAS.into_iter().filter_map(move |(dr, dc)| {
            let row = position.row.checked_add_signed(dr)?;
            let col = position.col.checked_add_signed(dc)?;
            (row < size && col < size).then_some(Position::new(row, col))
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", self.get(Position::new(row, col)).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_grid_has_path() {
        let mut grid = Grid::open(4);
        grid.set(grid.goal(), Cell::Goal);
        assert!(grid.has_path());
    }

    #[test]
    fn test_wall_row_blocks_path() {
        let mut grid = Grid::open(4);
        grid.set(grid.goal(), Cell::Goal);
        for col in 0..4 {
            grid.set(Position::new(2, col), Cell::Wall);
        }
        assert!(!grid.has_path());
    }

    #[test]
    fn test_path_through_gap() {
        let mut grid = Grid::open(4);
        grid.set(grid.goal(), Cell::Goal);
        for col in 0..3 {
            grid.set(Position::new(2, col), Cell::Wall);
        }
        assert!(grid.has_path());
    }

    #[test]
    fn test_display_renders_cells() {
        let mut grid = Grid::open(2);
        grid.set(grid.goal(), Cell::Goal);
        grid.set(Position::new(0, 1), Cell::Wall);
        assert_eq!(grid.to_string(), ".#\n.G\n");
    }
}
