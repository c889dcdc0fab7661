//! Named seed patterns.

use life_core::{Coord, SeedPattern};

/// A named set of live cells, relative to the pattern's top-left corner
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

impl Pattern {
    /// The pattern shifted so its origin lands on `(row, col)`.
    /// Cells that would fall outside the `i32` range are dropped.
    pub fn seed_at(&self, row: i32, col: i32) -> SeedPattern {
        SeedPattern::from_cells(
            self.cells
                .iter()
                .filter_map(|&(r, c)| Coord::new(row, col).offset(r, c)),
        )
    }

    /// Rows and columns the pattern occupies
    pub fn extent(&self) -> (i32, i32) {
        let rows = self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
        (rows, cols)
    }

    /// Whether the whole pattern lands inside a `rows x columns` grid when placed at `at`
    pub fn fits(&self, rows: usize, columns: usize, at: Coord) -> bool {
        let (height, width) = self.extent();
        let end_row = i64::from(at.row) + i64::from(height);
        let end_col = i64::from(at.col) + i64::from(width);
        at.row >= 0 && at.col >= 0 && end_row <= rows as i64 && end_col <= columns as i64
    }
}

pub const BLOCK: Pattern = Pattern {
    name: "block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    name: "beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
};

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)],
};

pub const PULSAR: Pattern = Pattern {
    name: "pulsar",
    cells: &[
        (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
        (2, 0), (2, 5), (2, 7), (2, 12),
        (3, 0), (3, 5), (3, 7), (3, 12),
        (4, 0), (4, 5), (4, 7), (4, 12),
        (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
        (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
        (8, 0), (8, 5), (8, 7), (8, 12),
        (9, 0), (9, 5), (9, 7), (9, 12),
        (10, 0), (10, 5), (10, 7), (10, 12),
        (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
    ],
};

pub const PATTERNS: &[Pattern] = &[BLOCK, BLINKER, TOAD, BEACON, GLIDER, PULSAR];

/// Case-insensitive lookup by name
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Glider in the top-left corner plus a pulsar to its right.
///
/// Needs at least 15 rows and 53 columns to show in full.
pub fn default_seed() -> SeedPattern {
    SeedPattern::from_rows([
        (1, vec![3]),
        (2, vec![1, 3, 42, 43, 44, 48, 49, 50]),
        (3, vec![2, 3]),
        (4, vec![40, 45, 47, 52]),
        (5, vec![40, 45, 47, 52]),
        (6, vec![40, 45, 47, 52]),
        (7, vec![42, 43, 44, 48, 49, 50]),
        (9, vec![42, 43, 44, 48, 49, 50]),
        (10, vec![40, 45, 47, 52]),
        (11, vec![40, 45, 47, 52]),
        (12, vec![40, 45, 47, 52]),
        (14, vec![42, 43, 44, 48, 49, 50]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("Glider").map(|p| p.name), Some("glider"));
        assert_eq!(find("PULSAR").map(|p| p.cells.len()), Some(48));
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn test_seed_at_offsets_cells() {
        let seed = BLINKER.seed_at(2, 1);
        assert!(seed.contains(2, 1));
        assert!(seed.contains(2, 2));
        assert!(seed.contains(2, 3));
        assert_eq!(seed.len(), 3);
    }

    #[test]
    fn test_seed_at_far_coordinates_drops_cells() {
        assert!(GLIDER.seed_at(i32::MAX, i32::MAX).is_empty());
        assert_eq!(BLOCK.seed_at(i32::MIN, i32::MIN).len(), 4);

        // Only the cells at offset zero survive next to the limit
        let seed = BLINKER.seed_at(0, i32::MAX);
        assert_eq!(seed.cells().collect::<Vec<_>>(), vec![Coord::new(0, i32::MAX)]);
    }

    #[test]
    fn test_fits() {
        assert!(BLOCK.fits(4, 4, Coord::new(2, 2)));
        assert!(!BLOCK.fits(4, 4, Coord::new(3, 2)));
        assert!(!BLOCK.fits(4, 4, Coord::new(-1, 0)));
        assert!(!GLIDER.fits(30, 60, Coord::new(i32::MAX, 0)));
        assert!(!PULSAR.fits(12, 60, Coord::new(0, 0)));
    }

    #[test]
    fn test_extent() {
        assert_eq!(BLOCK.extent(), (2, 2));
        assert_eq!(PULSAR.extent(), (13, 13));
        assert_eq!(GLIDER.extent(), (3, 3));
    }

    #[test]
    fn test_default_seed_is_glider_plus_pulsar() {
        let mut expected = GLIDER.seed_at(1, 1);
        expected.merge(&PULSAR.seed_at(2, 40));

        let seed = default_seed();
        assert_eq!(seed.len(), expected.len());
        assert!(expected.cells().all(|c| seed.contains(c.row, c.col)));
    }
}
