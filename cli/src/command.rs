use std::str::FromStr;

use lights_out_core::{Coord2, GameError, parse_coords};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Flip(Coord2),
    Hint,
    Solvable,
    New,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        use Command::*;

        match input.trim().to_ascii_lowercase().as_str() {
            "hint" | "h" => Ok(Hint),
            "solvable" | "s" => Ok(Solvable),
            "new" | "n" => Ok(New),
            "help" | "?" => Ok(Help),
            "quit" | "q" | "exit" => Ok(Quit),
            other => parse_coords(other).map(Flip),
        }
    }
}

pub const HELP: &str = "\
Commands:
  <row>-<col>  flip a cell, e.g. 2-3 (zero-based)
  hint         suggest a press
  solvable     check whether this board can be cleared
  new          start a fresh board
  quit         leave the game";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_words_case_insensitively() {
        assert_eq!("HINT".parse(), Ok(Command::Hint));
        assert_eq!(" new ".parse(), Ok(Command::New));
        assert_eq!("q".parse(), Ok(Command::Quit));
        assert_eq!("?".parse(), Ok(Command::Help));
        assert_eq!("solvable".parse(), Ok(Command::Solvable));
    }

    #[test]
    fn parses_cell_keys_as_flips() {
        assert_eq!("2-3".parse(), Ok(Command::Flip((2, 3))));
        assert_eq!("0 4".parse(), Ok(Command::Flip((0, 4))));
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!("jump".parse::<Command>(), Err(GameError::MalformedCoords));
        assert_eq!("".parse::<Command>(), Err(GameError::MalformedCoords));
    }
}
