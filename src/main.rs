mod game;
mod logging;
mod snake;
mod term;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::term::{TermInput, TermRenderer};

/// Integer type for board coordinates and dimensions.
pub type BoardInt = i16;

#[derive(Parser)]
#[command(about = "Steer the snake, collect fruit, stay off the walls")]
struct Cli {
    /// Difficulty preset, 1 (slowest) to 5 (fastest); prompts when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    difficulty: Option<u8>,

    /// Log debug information
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup(cli.debug)?;

    let tick = match cli.difficulty {
        Some(choice) => tick_interval(choice).context("difficulty out of range")?,
        None => prompt_difficulty()?,
    };
    log::info!("starting game, tick interval {:?}", tick);

    let mut renderer = TermRenderer::new();
    let mut input = TermInput;

    term::setup()?;
    let outcome = game::run(&mut renderer, &mut input, tick);
    term::restore()?;

    let score = outcome?;
    log::info!("game over, {} fruit collected", score);
    Ok(())
}

/// Maps a difficulty choice to the fixed delay between ticks.
fn tick_interval(choice: u8) -> Option<Duration> {
    let millis = match choice {
        1 => 1000,
        2 => 500,
        3 => 150,
        4 => 90,
        5 => 35,
        _ => return None,
    };
    Some(Duration::from_millis(millis))
}

/// Re-prompts until a valid choice is read. Runs before raw mode is enabled.
fn prompt_difficulty() -> Result<Duration> {
    loop {
        print!("Select a difficulty from 1 to 5: ");
        io::stdout().flush().context("flushing prompt")?;

        let mut answer = String::new();
        if io::stdin()
            .read_line(&mut answer)
            .context("reading difficulty")?
            == 0
        {
            bail!("stdin closed before a difficulty was chosen");
        }

        match answer.trim().parse::<u8>().ok().and_then(tick_interval) {
            Some(tick) => return Ok(tick),
            None => println!("Pick a difficulty from 1 to 5!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_presets() {
        assert_eq!(tick_interval(1), Some(Duration::from_millis(1000)));
        assert_eq!(tick_interval(2), Some(Duration::from_millis(500)));
        assert_eq!(tick_interval(3), Some(Duration::from_millis(150)));
        assert_eq!(tick_interval(4), Some(Duration::from_millis(90)));
        assert_eq!(tick_interval(5), Some(Duration::from_millis(35)));
    }

    #[test]
    fn rejects_out_of_range_choices() {
        assert_eq!(tick_interval(0), None);
        assert_eq!(tick_interval(6), None);
    }
}
