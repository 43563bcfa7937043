//! Conway's Game of Life on a fixed-size wraparound grid.
//!
//! The grid model and step function are pure; `state::Simulation` and `input`
//! form the driver that owns the current generation.
pub mod config;
pub mod grid;
pub mod input;
pub mod rules;
pub mod state;

pub use config::Config;
pub use grid::{Cell, Grid, GridError};
pub use rules::{step, step_with, GameRules};
pub use state::Simulation;
