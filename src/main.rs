use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use grid_life::config::Config;
use grid_life::input::{self, Command, Outcome, HELP};
use grid_life::Simulation;

/// Headless mode: start the timer and print every generation.
fn run_generations(sim: &mut Simulation, config: &Config, generations: u64) {
    sim.start();
    println!("{}", input::render(sim));
    for _ in 0..generations {
        if !config.interval.is_zero() {
            std::thread::sleep(config.interval);
        }
        sim.tick();
        println!("{}", input::render(sim));
    }
    sim.stop();
}

/// Interactive mode: one command per line until `quit` or end of input.
fn run_commands(sim: &mut Simulation, config: &Config) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{HELP}");

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(e) => {
                log::warn!("Rejected command {:?}: {}", line.trim(), e);
                eprintln!("{e}");
                continue;
            }
        };

        match input::apply(sim, command, config.interval) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Print(text)) => println!("{text}"),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                log::warn!("Command {:?} failed: {}", line.trim(), e);
                eprintln!("{e}");
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let config = Config::parse();
    log::debug!("Config: {:?}", config);

    let mut sim = match Simulation::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Failed to build initial grid: {}", e);
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match config.generations {
        Some(generations) => run_generations(&mut sim, &config, generations),
        None => {
            if let Err(e) = run_commands(&mut sim, &config) {
                log::error!("Input error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    log::info!("Exiting after {} generations", sim.generation());
    ExitCode::SUCCESS
}
