#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod analysis;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    /// Probability that any given cell starts lit.
    pub chance_lit: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, chance_lit: f64) -> Self {
        Self { size, chance_lit }
    }

    pub fn new(size: Coord2, chance_lit: f64) -> Result<Self> {
        let config = Self::new_unchecked(size, chance_lit);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidDimension);
        }
        // also rejects NaN
        if !(0.0..=1.0).contains(&self.chance_lit) {
            return Err(GameError::InvalidProbability);
        }
        Ok(())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((5, 5), 0.5)
    }
}

/// Rectangular board of lights, `true` meaning lit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct Grid {
    cells: Array2<bool>,
}

impl Grid {
    /// A grid with every cell unlit.
    pub fn unlit(size: Coord2) -> Result<Self> {
        Self::from_elem(size, false)
    }

    /// A grid with every cell lit.
    pub fn lit(size: Coord2) -> Result<Self> {
        Self::from_elem(size, true)
    }

    fn from_elem(size: Coord2, value: bool) -> Result<Self> {
        check_dimensions(size)?;
        Ok(Self {
            cells: Array2::from_elem(size.to_nd_index(), value),
        })
    }

    pub fn from_fn(size: Coord2, mut f: impl FnMut(Coord2) -> bool) -> Result<Self> {
        check_dimensions(size)?;
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            // both indices are below a `Coord` bound
            f((row as Coord, col as Coord))
        });
        Ok(Self { cells })
    }

    /// Builds a grid from nested rows, rejecting ragged input.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let row_count = Coord::try_from(rows.len()).map_err(|_| GameError::InvalidDimension)?;
        let col_count = rows.first().map_or(0, |row| row.as_ref().len());
        let col_count = Coord::try_from(col_count).map_err(|_| GameError::InvalidDimension)?;

        if rows.iter().any(|row| row.as_ref().len() != usize::from(col_count)) {
            return Err(GameError::InvalidBoardShape);
        }

        Self::from_fn((row_count, col_count), |(row, col)| {
            rows[usize::from(row)].as_ref()[usize::from(col)]
        })
    }

    pub fn from_cells(cells: Array2<bool>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        let size = (
            Coord::try_from(rows).map_err(|_| GameError::InvalidDimension)?,
            Coord::try_from(cols).map_err(|_| GameError::InvalidDimension)?,
        );
        check_dimensions(size)?;
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // constructors only accept dimensions that fit in `Coord`
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn lit_count(&self) -> CellCount {
        // bounded by `total_cells`
        self.cells.iter().filter(|&&lit| lit).count() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn is_lit(&self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// True once every light is off.
    pub fn has_won(&self) -> bool {
        self.cells.iter().all(|&lit| !lit)
    }

    /// Cells toggled by a flip at `coords`, clipped to the grid.
    pub fn iter_flip_targets(&self, coords: Coord2) -> FlipIter {
        FlipIter::new(coords, self.size())
    }

    /// Returns a new grid with `coords` and its orthogonal neighbors toggled, leaving `self` untouched.
    pub fn flip(&self, coords: Coord2) -> Result<Grid> {
        let coords = self.validate_coords(coords)?;
        let mut next = self.clone();
        next.toggle_around(coords);
        Ok(next)
    }

    pub(crate) fn toggle_around(&mut self, coords: Coord2) {
        for pos in self.iter_flip_targets(coords) {
            let cell = &mut self.cells[pos.to_nd_index()];
            *cell = !*cell;
        }
    }

    /// Coordinates of every lit cell in row-major order.
    pub fn lit_coords(&self) -> Vec<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|&(_, &lit)| lit)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }
}

impl TryFrom<Array2<bool>> for Grid {
    type Error = GameError;

    fn try_from(cells: Array2<bool>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Grid> for Array2<bool> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

fn check_dimensions((rows, cols): Coord2) -> Result<()> {
    if rows == 0 || cols == 0 {
        Err(GameError::InvalidDimension)
    } else {
        Ok(())
    }
}

impl Index<Coord2> for Grid {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let mut first = true;
            for &lit in row {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(if lit { "O" } else { "." })?;
                first = false;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    Flipped,
    Won,
}

/// Builds a randomly lit grid for `config`, drawing every cell from `rng`.
pub fn initialize<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Grid> {
    generator::fill_random(config, rng)
}

/// Flips `coords` and its in-bounds orthogonal neighbors on a copy of `grid`.
pub fn flip(grid: &Grid, coords: Coord2) -> Result<Grid> {
    grid.flip(coords)
}

pub fn has_won(grid: &Grid) -> bool {
    grid.has_won()
}
