use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use lights_out_core::{FlipOutcome, PlayEngine, format_coords};

use crate::command::{Command, HELP};

/// Reads commands from `input` until `quit` or end of input, drawing the board to `output` after every move.
pub fn run(
    mut engine: PlayEngine,
    mut new_game: impl FnMut() -> Result<PlayEngine>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    draw(&mut output, &engine)?;

    for line in input.lines() {
        let line = line.context("could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                log::debug!("rejected input {line:?}: {err}");
                writeln!(output, "{err}, type help for commands")?;
                continue;
            }
        };

        match command {
            Command::Flip(coords) => match engine.flip(coords) {
                Ok(FlipOutcome::Won) => {
                    draw(&mut output, &engine)?;
                    writeln!(output, "You Won! Type new for another board or quit.")?;
                }
                Ok(FlipOutcome::Flipped) => draw(&mut output, &engine)?,
                Err(err) => writeln!(output, "{err}")?,
            },
            Command::Hint => match engine.hint() {
                Some(coords) => writeln!(output, "Try {}", format_coords(coords))?,
                None if engine.is_finished() => writeln!(output, "Nothing left to do")?,
                None => writeln!(output, "This board cannot be cleared")?,
            },
            Command::Solvable => {
                let verdict = if engine.is_solvable() { "can" } else { "cannot" };
                writeln!(output, "This board {verdict} be cleared")?;
            }
            Command::New => {
                engine = new_game()?;
                draw(&mut output, &engine)?;
            }
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
        }
    }

    output.flush()?;
    Ok(())
}

fn draw(output: &mut impl Write, engine: &PlayEngine) -> Result<()> {
    write!(output, "\n{}", engine.grid())?;
    writeln!(
        output,
        "{} of {} lit, {} moves",
        engine.lit_count(),
        engine.grid().total_cells(),
        engine.moves()
    )?;
    if engine.is_finished() && engine.moves() == 0 {
        writeln!(output, "Already dark, You Won!")?;
    }
    Ok(())
}
