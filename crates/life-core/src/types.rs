//! Core type definitions for the grid.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A `(row, col)` cell coordinate.
///
/// Signed so that callers can hand over coordinates such as `(-1, 0)` and get
/// an explicit bounds failure instead of a silent wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Shift by `(dr, dc)`; `None` if either component leaves the `i32` range
    pub fn offset(&self, dr: i32, dc: i32) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(dr)?,
            col: self.col.checked_add(dc)?,
        })
    }

    /// The surrounding coordinates, row-major, without grid bounds checks.
    /// Yields eight items except at the edges of the `i32` range.
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> + '_ {
        const OFFSETS: [(i32, i32); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(dr, dc))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// Initial "on" cells, keyed by row.
///
/// Sparse: rows that are absent start fully off. Serializes as a JSON object
/// of row index to column list, e.g. `{"1": [3], "2": [1, 3]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedPattern {
    rows: BTreeMap<i32, Vec<i32>>,
}

impl SeedPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `(row, col)` as on. Duplicates are kept once; column order follows insertion.
    pub fn insert(&mut self, row: i32, col: i32) {
        let cols = self.rows.entry(row).or_default();
        if !cols.contains(&col) {
            cols.push(col);
        }
    }

    pub fn from_cells<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coord>,
    {
        let mut seed = Self::new();
        for cell in cells {
            let coord = cell.into();
            seed.insert(coord.row, coord.col);
        }
        seed
    }

    /// Build from `(row, [cols])` pairs, the layout the seed format is written in.
    pub fn from_rows<I, C>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i32, C)>,
        C: AsRef<[i32]>,
    {
        let mut seed = Self::new();
        for (row, cols) in rows {
            for &col in cols.as_ref() {
                seed.insert(row, col);
            }
        }
        seed
    }

    /// Random soup: each cell of a `rows x columns` area is on with probability `density`.
    /// The same `rng_seed` always yields the same pattern.
    pub fn random(rows: i32, columns: i32, density: f32, rng_seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
        let mut seed = Self::new();

        for row in 0..rows.max(0) {
            for col in 0..columns.max(0) {
                if rng.gen::<f32>() < density {
                    seed.insert(row, col);
                }
            }
        }

        seed
    }

    /// Union with another seed
    pub fn merge(&mut self, other: &SeedPattern) {
        for cell in other.cells() {
            self.insert(cell.row, cell.col);
        }
    }

    /// Iterator over all seeded coordinates, ordered by row
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |&col| Coord::new(row, col)))
    }

    pub fn columns(&self, row: i32) -> &[i32] {
        self.rows.get(&row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.columns(row).contains(&col)
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
