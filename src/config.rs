use std::time::Duration;

use clap::Parser;

pub const DEFAULT_WIDTH: usize = 20;
pub const DEFAULT_HEIGHT: usize = 20;
/// Delay between generations while the simulation is running.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

fn parse_interval(value: &str) -> Result<Duration, String> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| format!("invalid interval {value:?}: {e}"))
}

fn parse_coord(value: &str) -> Result<(usize, usize), String> {
    let invalid = || format!("expected ROW,COL, got {value:?}");
    let (row, col) = value.split_once(',').ok_or_else(invalid)?;
    Ok((
        row.trim().parse().map_err(|_| invalid())?,
        col.trim().parse().map_err(|_| invalid())?,
    ))
}

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "grid_life", about = "Conway's Game of Life on a wraparound grid")]
pub struct Config {
    /// Number of columns.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,
    /// Number of rows.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,
    /// Milliseconds between generations.
    #[arg(
        long = "interval-ms",
        value_name = "MS",
        default_value = "100",
        value_parser = parse_interval
    )]
    pub interval: Duration,
    /// Run headless for this many generations; without it, read commands from stdin.
    #[arg(long)]
    pub generations: Option<u64>,
    /// Seed for the random initial fill.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Random fill probability for the initial grid. Zero starts empty.
    #[arg(long = "fill", value_name = "RATE", default_value_t = 0.0)]
    pub fill_rate: f64,
    /// Cell set alive before the first generation (repeatable).
    #[arg(long, value_name = "ROW,COL", value_parser = parse_coord)]
    pub alive: Vec<(usize, usize)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            interval: DEFAULT_INTERVAL,
            generations: None,
            seed: None,
            fill_rate: 0.0,
            alive: Vec::new(),
        }
    }
}
