//! Bounded 2D grid and the generation step.

use life_core::{Coord, Error, Result, SeedPattern};
use tracing::{debug, trace, warn};

/// Conway's rule: survival on 2 or 3 live neighbors, birth on exactly 3
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// A fixed-size grid of on/off cells with hard edges.
///
/// Cells outside the grid never exist: they count as off when counting
/// neighbors and every accessor rejects them with [`Error::OutOfBounds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEngine {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl GridEngine {
    /// Create a grid with every seeded cell on. Seed cells outside the grid are ignored.
    pub fn new(num_rows: i32, num_columns: i32, seed: &SeedPattern) -> Result<Self> {
        if num_rows <= 0 || num_columns <= 0 {
            return Err(Error::InvalidDimension {
                rows: num_rows as i64,
                columns: num_columns as i64,
            });
        }

        let rows = num_rows as usize;
        let columns = num_columns as usize;
        let mut grid = Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        };
        grid.apply_seed(seed);

        debug!(
            rows,
            columns,
            population = grid.population(),
            "Created grid"
        );
        Ok(grid)
    }

    /// An all-off grid
    pub fn empty(num_rows: i32, num_columns: i32) -> Result<Self> {
        Self::new(num_rows, num_columns, &SeedPattern::new())
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns
    }

    pub fn get_state(&self, row: i32, col: i32) -> Result<bool> {
        let index = self.checked_index(row, col)?;
        Ok(self.cells[index])
    }

    /// Flip one cell and return its new state
    pub fn toggle(&mut self, row: i32, col: i32) -> Result<bool> {
        let index = self.checked_index(row, col)?;
        self.cells[index] = !self.cells[index];
        trace!(row, col, alive = self.cells[index], "Toggled cell");
        Ok(self.cells[index])
    }

    /// Live cells among the eight neighbors of `(row, col)`
    pub fn count_live_neighbors(&self, row: i32, col: i32) -> Result<u8> {
        self.checked_index(row, col)?;
        Ok(self.live_neighbors(row as usize, col as usize))
    }

    /// Advance one generation and return the cells that flipped, in row-major order.
    ///
    /// Every cell is judged against the grid as it was before the call; flips
    /// are only written once the whole grid has been evaluated.
    pub fn step(&mut self) -> Vec<Coord> {
        let mut to_toggle = Vec::new();

        for row in 0..self.rows {
            for col in 0..self.columns {
                let alive = self.cells[row * self.columns + col];
                let neighbors = self.live_neighbors(row, col);
                if next_state(alive, neighbors) != alive {
                    to_toggle.push(Coord::new(row as i32, col as i32));
                }
            }
        }

        for coord in &to_toggle {
            let index = coord.row as usize * self.columns + coord.col as usize;
            self.cells[index] = !self.cells[index];
        }

        trace!(changed = to_toggle.len(), "Stepped grid");
        to_toggle
    }

    /// Number of cells currently on
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterator over live coordinates in row-major order
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(i, _)| self.index_to_coord(i))
    }

    /// All cell states, row-major
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Row slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.columns)
    }

    /// Turn every cell off
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Clear, then apply a new seed with the same rules as construction
    pub fn reseed(&mut self, seed: &SeedPattern) {
        self.clear();
        self.apply_seed(seed);
    }

    fn apply_seed(&mut self, seed: &SeedPattern) {
        let mut ignored = 0usize;
        for coord in seed.cells() {
            match self.checked_index(coord.row, coord.col) {
                Ok(index) => self.cells[index] = true,
                Err(_) => ignored += 1,
            }
        }

        if ignored > 0 {
            warn!(
                ignored,
                rows = self.rows,
                columns = self.columns,
                "Seed cells outside the grid were ignored"
            );
        }
    }

    fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let center = Coord::new(row as i32, col as i32);
        center
            .neighbors()
            .filter(|n| self.in_bounds(n.row, n.col) && self.cells[self.coord_to_index(*n)])
            .count() as u8
    }

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.columns
    }

    fn checked_index(&self, row: i32, col: i32) -> Result<usize> {
        if !self.in_bounds(row, col) {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(self.coord_to_index(Coord::new(row, col)))
    }

    fn coord_to_index(&self, coord: Coord) -> usize {
        coord.row as usize * self.columns + coord.col as usize
    }

    fn index_to_coord(&self, index: usize) -> Coord {
        Coord::new((index / self.columns) as i32, (index % self.columns) as i32)
    }
}
