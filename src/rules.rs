//! Birth/survival thresholds and the generation step.
use crate::grid::{get_index, Grid};

/// Neighbour-count thresholds applied by [`next_state`].
///
/// A live cell stays alive when its live-neighbour count lies in
/// `survival_min..=survival_max`; a dead cell comes alive when the count equals
/// `birth_count`. Counts range over `0..=8`, so a threshold above 8 never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub survival_min: usize,
    pub survival_max: usize,
    pub birth_count: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            survival_min: 2,
            survival_max: 3,
            birth_count: 3,
        }
    }
}

impl GameRules {
    pub fn new(survival_min: usize, survival_max: usize, birth_count: usize) -> Self {
        Self {
            survival_min,
            survival_max,
            birth_count,
        }
    }

    /// Conway's classic B3/S23.
    pub fn conway() -> Self {
        Self::default()
    }
}

/// State of one cell in the next generation.
pub fn next_state(alive: bool, live_neighbors: usize, rules: &GameRules) -> bool {
    if alive {
        (rules.survival_min..=rules.survival_max).contains(&live_neighbors)
    } else {
        live_neighbors == rules.birth_count
    }
}

/// Advances `grid` one generation under Conway's rules.
pub fn step(grid: &Grid) -> Grid {
    step_with(grid, &GameRules::conway())
}

/// Advances `grid` one generation under `rules`.
///
/// Every cell is evaluated against the same input snapshot; the result is a
/// new grid of identical dimensions.
pub fn step_with(grid: &Grid, rules: &GameRules) -> Grid {
    let (width, height) = (grid.width(), grid.height());
    let mut output = vec![false; width * height];

    for cell in grid.cells() {
        let neighbors = grid.live_neighbor_count(cell.row, cell.col);
        output[get_index(cell.row, cell.col, width)] = next_state(cell.alive, neighbors, rules);
    }

    log::trace!(
        "stepped {}x{} grid, population {} -> {}",
        width,
        height,
        grid.population(),
        output.iter().filter(|&&alive| alive).count()
    );

    Grid::from_cells(width, height, output)
}
