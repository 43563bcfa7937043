//! Grid model for the simulation.
//!
//! A `Grid` is a fixed-size rectangle of cells stored row-major. All coordinates
//! are `(row, col)`. Edges wrap in both directions, so every cell has exactly
//! eight neighbours.
use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Neighbour offsets as `(row, col)` deltas shifted by one so they stay unsigned.
/// Order: right, left, top, bottom, top-left, top-right, bottom-right, bottom-left.
const NEIGHBOR_OFFSETS: [(usize, usize); 8] = [
    (1, 2),
    (1, 0),
    (0, 1),
    (2, 1),
    (0, 0),
    (0, 2),
    (2, 2),
    (2, 0),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Width or height is zero, or literal rows are empty or ragged.
    #[error("invalid grid dimensions: {0}")]
    InvalidDimensions(String),
    #[error("cell ({row}, {col}) is outside a {width}x{height} grid")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    #[error("unexpected character {found:?} at ({row}, {col}); expected '0' or '1'")]
    InvalidCell { row: usize, col: usize, found: char },
    #[error("fill rate must be within [0, 1], got {0}")]
    InvalidFillRate(f64),
}

/// A single grid position and its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

/// Index into a row-major buffer of the given width.
pub fn get_index(row: usize, col: usize, width: usize) -> usize {
    row * width + col
}

/// Total number of cells, rejecting empty and overflowing dimensions.
fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimensions(format!("{width}x{height} has no cells")));
    }
    width.checked_mul(height).ok_or_else(|| {
        GridError::InvalidDimensions(format!("{width}x{height} overflows the cell count"))
    })
}

impl Grid {
    /// Creates a grid with every cell dead.
    pub fn empty(width: usize, height: usize) -> Result<Self, GridError> {
        let len = cell_count(width, height)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| {
            GridError::InvalidDimensions(format!("{width}x{height} is too large to allocate"))
        })?;
        cells.resize(len, false);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid from literal rows; `rows[i][j]` becomes cell `(i, j)`.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let len = cell_count(width, height)?;

        let mut cells = Vec::with_capacity(len);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::InvalidDimensions(format!(
                    "row {i} has {} cells, expected {width}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Fills a grid at random, each cell alive with probability `fill_rate`.
    /// The same seed always yields the same grid; `None` seeds from entropy.
    pub fn random(
        width: usize,
        height: usize,
        seed: Option<u64>,
        fill_rate: f64,
    ) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&fill_rate) {
            return Err(GridError::InvalidFillRate(fill_rate));
        }
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut grid = Self::empty(width, height)?;
        for alive in grid.cells.iter_mut() {
            *alive = rng.gen_bool(fill_rate);
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `false` for coordinates outside the grid.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|cell| cell.alive)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cell_unchecked(row, col))
    }

    fn cell_unchecked(&self, row: usize, col: usize) -> Cell {
        Cell {
            row,
            col,
            alive: self.cells[get_index(row, col, self.width)],
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().map(|(i, &alive)| Cell {
            row: i / self.width,
            col: i % self.width,
            alive,
        })
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.height || col >= self.width {
            return Err(GridError::IndexOutOfRange {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// The eight neighbours of `(row, col)` in the order right, left, top,
    /// bottom, top-left, top-right, bottom-right, bottom-left.
    ///
    /// Rows and columns wrap independently, so a corner cell's diagonal
    /// neighbour may sit in the opposite corner.
    pub fn neighbors(&self, row: usize, col: usize) -> Result<[Cell; 8], GridError> {
        self.check_bounds(row, col)?;
        Ok(self.neighbors_unchecked(row, col))
    }

    fn neighbors_unchecked(&self, row: usize, col: usize) -> [Cell; 8] {
        NEIGHBOR_OFFSETS.map(|(dr, dc)| {
            let nr = (row + self.height + dr - 1) % self.height;
            let nc = (col + self.width + dc - 1) % self.width;
            self.cell_unchecked(nr, nc)
        })
    }

    /// Number of live cells among the eight neighbours of `(row, col)`.
    pub fn live_neighbors(&self, row: usize, col: usize) -> Result<usize, GridError> {
        self.check_bounds(row, col)?;
        Ok(self.live_neighbor_count(row, col))
    }

    /// Live neighbour count for a position already known to be in range.
    pub(crate) fn live_neighbor_count(&self, row: usize, col: usize) -> usize {
        self.neighbors_unchecked(row, col)
            .iter()
            .filter(|cell| cell.alive)
            .count()
    }

    /// Returns the grid with one cell set; every other cell is unchanged.
    pub fn set_cell_alive(
        mut self,
        row: usize,
        col: usize,
        alive: bool,
    ) -> Result<Self, GridError> {
        self.check_bounds(row, col)?;
        let idx = get_index(row, col, self.width);
        self.cells[idx] = alive;
        Ok(self)
    }

    /// Returns the grid with one cell flipped.
    pub fn toggle_cell(self, row: usize, col: usize) -> Result<Self, GridError> {
        let alive = self.is_alive(row, col);
        self.set_cell_alive(row, col, !alive)
    }

    /// `'1'` for alive and `'0'` for dead, each row followed by a newline.
    pub fn format(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            text.extend(row.iter().map(|&alive| if alive { '1' } else { '0' }));
            text.push('\n');
        }
        text
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses the output of [`Grid::format`]. Blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, c)| match c {
                        '1' => Ok(true),
                        '0' => Ok(false),
                        found => Err(GridError::InvalidCell { row, col, found }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_formats_as_zeros() {
        let grid = Grid::empty(2, 2).unwrap();
        assert_eq!(grid.format(), "00\n00\n");
        assert_eq!(grid.to_string(), "00\n00\n");
    }

    #[test]
    fn empty_rejects_zero_dimensions() {
        assert!(matches!(
            Grid::empty(0, 3),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::empty(3, 0),
            Err(GridError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn empty_rejects_overflowing_dimensions() {
        assert!(matches!(
            Grid::empty(usize::MAX, 2),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::empty(2, usize::MAX),
            Err(GridError::InvalidDimensions(_))
        ));
        // Fits in usize but not in an allocation.
        assert!(matches!(
            Grid::empty(usize::MAX, 1),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::random(usize::MAX, 2, Some(0), 0.5),
            Err(GridError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn live_neighbor_count_matches_neighbor_list() {
        let grid = Grid::random(9, 6, Some(11), 0.5).unwrap();
        for cell in grid.cells() {
            let listed = grid
                .neighbors(cell.row, cell.col)
                .unwrap()
                .iter()
                .filter(|n| n.alive)
                .count();
            assert_eq!(grid.live_neighbor_count(cell.row, cell.col), listed);
            assert_eq!(grid.live_neighbors(cell.row, cell.col), Ok(listed));
        }
        assert!(grid.live_neighbors(6, 0).is_err());
    }

    #[test]
    fn from_rows_is_row_major() {
        let grid = Grid::from_rows(&[[true, false, false], [false, false, true]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(1, 2));
        assert!(!grid.is_alive(0, 2));
        assert_eq!(
            grid.cell(1, 2),
            Some(Cell {
                row: 1,
                col: 2,
                alive: true
            })
        );
        assert_eq!(grid.cell(2, 0), None);
    }

    #[test]
    fn from_rows_rejects_ragged_and_empty_input() {
        let ragged = vec![vec![true, false], vec![true]];
        assert!(matches!(
            Grid::from_rows(&ragged),
            Err(GridError::InvalidDimensions(_))
        ));

        let no_rows: Vec<Vec<bool>> = Vec::new();
        assert!(Grid::from_rows(&no_rows).is_err());

        let empty_row: Vec<Vec<bool>> = vec![vec![]];
        assert!(Grid::from_rows(&empty_row).is_err());
    }

    #[test]
    fn neighbors_follow_fixed_order() {
        let grid = Grid::empty(5, 5).unwrap();
        let coords: Vec<_> = grid
            .neighbors(2, 2)
            .unwrap()
            .iter()
            .map(|cell| (cell.row, cell.col))
            .collect();
        assert_eq!(
            coords,
            vec![(2, 3), (2, 1), (1, 2), (3, 2), (1, 1), (1, 3), (3, 3), (3, 1)]
        );
    }

    #[test]
    fn neighbors_wrap_at_corners() {
        let grid = Grid::empty(3, 3).unwrap();
        let coords: Vec<_> = grid
            .neighbors(0, 0)
            .unwrap()
            .iter()
            .map(|cell| (cell.row, cell.col))
            .collect();
        assert_eq!(
            coords,
            vec![(0, 1), (0, 2), (2, 0), (1, 0), (2, 2), (2, 1), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn neighbors_out_of_range() {
        let grid = Grid::empty(3, 2).unwrap();
        assert_eq!(
            grid.neighbors(2, 0),
            Err(GridError::IndexOutOfRange {
                row: 2,
                col: 0,
                width: 3,
                height: 2
            })
        );
    }

    #[test]
    fn single_row_grid_counts_wrapped_cells() {
        // With height 1, top and bottom are the cell's own row.
        let grid = Grid::from_rows(&[[true, true, false]]).unwrap();
        assert_eq!(grid.live_neighbors(0, 2).unwrap(), 6);
    }

    #[test]
    fn set_cell_alive_changes_one_cell() {
        let grid = Grid::empty(3, 2).unwrap().set_cell_alive(1, 2, true).unwrap();
        assert_eq!(grid.format(), "000\n001\n");
        assert_eq!(grid.population(), 1);

        let grid = grid.toggle_cell(1, 2).unwrap().toggle_cell(0, 0).unwrap();
        assert_eq!(grid.format(), "100\n000\n");

        assert!(Grid::empty(3, 2)
            .unwrap()
            .set_cell_alive(0, 3, true)
            .is_err());
    }

    #[test]
    fn parse_accepts_formatted_text() {
        let grid: Grid = "010\n\n001\n".parse().unwrap();
        assert_eq!(grid.format(), "010\n001\n");

        let err = "01\n0x\n".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCell {
                row: 1,
                col: 1,
                found: 'x'
            }
        );
    }

    #[test]
    fn random_is_reproducible() {
        let a = Grid::random(16, 8, Some(7), 0.4).unwrap();
        let b = Grid::random(16, 8, Some(7), 0.4).unwrap();
        assert_eq!(a, b);

        assert_eq!(Grid::random(4, 4, Some(1), 0.0).unwrap().population(), 0);
        assert_eq!(Grid::random(4, 4, Some(1), 1.0).unwrap().population(), 16);
        assert!(matches!(
            Grid::random(4, 4, Some(1), 1.5),
            Err(GridError::InvalidFillRate(_))
        ));
    }

    #[test]
    fn cells_iterate_row_major() {
        let grid = Grid::from_rows(&[[false, true], [true, false]]).unwrap();
        let live: Vec<_> = grid
            .cells()
            .filter(|cell| cell.alive)
            .map(|cell| (cell.row, cell.col))
            .collect();
        assert_eq!(live, vec![(0, 1), (1, 0)]);
    }
}
