use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }

    fn from_grid(grid: &Grid) -> Self {
        if grid.has_won() {
            Self::Won
        } else {
            Self::Playing
        }
    }
}

/// One game of Lights Out: the current grid plus the configuration it was generated from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlayEngineData")]
pub struct PlayEngine {
    config: GameConfig,
    grid: Grid,
    moves: Saturating<u32>,
    state: EngineState,
}

impl PlayEngine {
    /// Starts a session on an existing grid, which must match `config.size`.
    pub fn new(config: GameConfig, grid: Grid) -> Result<Self> {
        config.validate()?;
        if grid.size() != config.size {
            return Err(GameError::InvalidBoardShape);
        }

        let state = EngineState::from_grid(&grid);
        Ok(Self {
            config,
            grid,
            moves: Saturating(0),
            state,
        })
    }

    pub fn generate(config: GameConfig, generator: impl GridGenerator) -> Result<Self> {
        let grid = generator.generate(config)?;
        Self::new(config, grid)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn lit_count(&self) -> CellCount {
        self.grid.lit_count()
    }

    pub fn moves(&self) -> u32 {
        self.moves.0
    }

    pub fn is_lit(&self, coords: Coord2) -> Result<bool> {
        self.grid.is_lit(coords)
    }

    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        self.grid = self.grid.flip(coords)?;
        self.moves += 1;

        if self.grid.has_won() {
            self.state = EngineState::Won;
            log::debug!("Board cleared after {} moves", self.moves.0);
            Ok(FlipOutcome::Won)
        } else {
            Ok(FlipOutcome::Flipped)
        }
    }

    /// A press that is part of a solution from the current position.
    ///
    /// `None` once the game is won or when no sequence of presses can clear the board.
    pub fn hint(&self) -> Option<Coord2> {
        if self.state.is_finished() {
            return None;
        }
        solve(&self.grid)?.iter_presses().next()
    }

    pub fn is_solvable(&self) -> bool {
        is_solvable(&self.grid)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyWon)
        } else {
            Ok(())
        }
    }
}

/// Serialized session fields; the state is derived from the grid on load.
#[derive(Deserialize)]
struct PlayEngineData {
    config: GameConfig,
    grid: Grid,
    moves: Saturating<u32>,
}

impl TryFrom<PlayEngineData> for PlayEngine {
    type Error = GameError;

    fn try_from(PlayEngineData { config, grid, moves }: PlayEngineData) -> Result<Self> {
        let mut engine = Self::new(config, grid)?;
        engine.moves = moves;
        Ok(engine)
    }
}
