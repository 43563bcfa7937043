use crate::config::Config;
use crate::grid::{Grid, GridError};
use crate::rules::{step_with, GameRules};

/// Driver state: the current generation plus the start/stop flag.
///
/// The grid is replaced wholesale on every step; nothing mutates a generation
/// while the next one is being computed.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    rules: GameRules,
    running: bool,
    generation: u64,
}

impl Simulation {
    /// Builds the initial grid from `config`: a random fill (empty when the
    /// fill rate is zero) followed by the explicitly listed live cells.
    pub fn new(config: &Config) -> Result<Self, GridError> {
        let mut grid = Grid::random(config.width, config.height, config.seed, config.fill_rate)?;
        for &(row, col) in &config.alive {
            grid = grid.set_cell_alive(row, col, true)?;
        }

        log::info!(
            "Created {}x{} grid with {} live cells",
            grid.width(),
            grid.height(),
            grid.population()
        );

        Ok(Self::with_grid(grid, GameRules::conway()))
    }

    pub fn with_grid(grid: Grid, rules: GameRules) -> Self {
        Self {
            grid,
            rules,
            running: false,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn change_rules(&mut self, rules: GameRules) {
        self.rules = rules;
        log::info!(
            "Game rules changed to: S{}-{}/B{}",
            rules.survival_min,
            rules.survival_max,
            rules.birth_count
        );
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            log::info!("Simulation started at generation {}", self.generation);
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Simulation stopped at generation {}", self.generation);
        }
    }

    /// Flips between running and stopped; returns the new state.
    pub fn toggle_running(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    /// Timer tick: advances one generation if running. Returns whether it did.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.advance();
        true
    }

    /// Advances one generation regardless of the running flag.
    pub fn advance(&mut self) {
        self.grid = step_with(&self.grid, &self.rules);
        self.generation += 1;
        log::debug!(
            "Generation {}: {} live cells",
            self.generation,
            self.grid.population()
        );
    }

    /// Replaces the grid with an empty one of the same size and resets the
    /// generation counter. The running flag is left as is.
    pub fn clear(&mut self) {
        self.grid = Grid::from_cells(
            self.grid.width(),
            self.grid.height(),
            vec![false; self.grid.width() * self.grid.height()],
        );
        self.generation = 0;
        log::info!("Grid cleared");
    }

    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        self.grid = self.grid.clone().set_cell_alive(row, col, alive)?;
        Ok(())
    }

    /// Flips one cell and returns its new state.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        self.grid = self.grid.clone().toggle_cell(row, col)?;
        Ok(self.grid.is_alive(row, col))
    }

    /// Neighbour weight of a cell, as used for shading in a front end.
    pub fn live_neighbors(&self, row: usize, col: usize) -> Result<usize, GridError> {
        self.grid.live_neighbors(row, col)
    }
}
