//! Text commands for driving a `Simulation` from a terminal.
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::grid::GridError;
use crate::state::Simulation;

pub const HELP: &str = "commands:
  start | stop          start or stop the timer
  run N                 tick N times at the configured interval
  step [N]              advance N generations (default 1) even when stopped
  toggle ROW COL        flip one cell
  set ROW COL 0|1       set one cell
  clear                 kill every cell
  show                  print the grid
  help                  print this message
  quit | exit           leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Run(u64),
    Step(u64),
    Toggle { row: usize, col: usize },
    Set { row: usize, col: usize, alive: bool },
    Clear,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{0} is missing an argument")]
    MissingArgument(&'static str),
    #[error("{command}: invalid argument {value:?}")]
    InvalidArgument { command: &'static str, value: String },
    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),
}

/// What the driver loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Print(String),
    Quit,
}

fn arg<'a, T: FromStr>(
    command: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<T, CommandError> {
    let value = words.next().ok_or(CommandError::MissingArgument(command))?;
    parse_arg(command, value)
}

fn parse_arg<T: FromStr>(command: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "stop" => Command::Stop,
            "run" => Command::Run(arg("run", &mut words)?),
            "step" => match words.next() {
                Some(n) => Command::Step(parse_arg("step", n)?),
                None => Command::Step(1),
            },
            "toggle" => Command::Toggle {
                row: arg("toggle", &mut words)?,
                col: arg("toggle", &mut words)?,
            },
            "set" => {
                let row = arg("set", &mut words)?;
                let col = arg("set", &mut words)?;
                let alive = match words.next() {
                    Some("1") => true,
                    Some("0") => false,
                    Some(other) => {
                        return Err(CommandError::InvalidArgument {
                            command: "set",
                            value: other.to_string(),
                        })
                    }
                    None => return Err(CommandError::MissingArgument("set")),
                };
                Command::Set { row, col, alive }
            }
            "clear" => Command::Clear,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        if words.next().is_some() {
            return Err(CommandError::TooManyArguments(command.name()));
        }
        Ok(command)
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Run(_) => "run",
            Command::Step(_) => "step",
            Command::Toggle { .. } => "toggle",
            Command::Set { .. } => "set",
            Command::Clear => "clear",
            Command::Show => "show",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

/// Executes `command` against `sim`. `run` sleeps `interval` between ticks.
pub fn apply(
    sim: &mut Simulation,
    command: Command,
    interval: Duration,
) -> Result<Outcome, GridError> {
    let outcome = match command {
        Command::Start => {
            sim.start();
            Outcome::Continue
        }
        Command::Stop => {
            sim.stop();
            Outcome::Continue
        }
        Command::Run(n) => {
            if !sim.is_running() {
                log::warn!("Simulation is stopped; `start` it before `run`");
                return Ok(Outcome::Continue);
            }
            for i in 0..n {
                if i > 0 && !interval.is_zero() {
                    std::thread::sleep(interval);
                }
                sim.tick();
            }
            Outcome::Print(render(sim))
        }
        Command::Step(n) => {
            for _ in 0..n {
                sim.advance();
            }
            Outcome::Print(render(sim))
        }
        Command::Toggle { row, col } => {
            sim.toggle_cell(row, col)?;
            Outcome::Continue
        }
        Command::Set { row, col, alive } => {
            sim.set_cell(row, col, alive)?;
            Outcome::Continue
        }
        Command::Clear => {
            sim.clear();
            Outcome::Continue
        }
        Command::Show => Outcome::Print(render(sim)),
        Command::Help => Outcome::Print(HELP.to_string()),
        Command::Quit => Outcome::Quit,
    };
    Ok(outcome)
}

/// Generation header followed by the grid dump.
pub fn render(sim: &Simulation) -> String {
    format!(
        "generation {} ({} alive)\n{}",
        sim.generation(),
        sim.grid().population(),
        sim.grid()
    )
}
