use alloc::vec;
use alloc::vec::Vec;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Above this many free first-row presses only one solution is built instead of searching for the shortest.
const MAX_ENUMERATED_FREE_VARIABLES: usize = 12;

/// A set of presses that turns every light off.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    presses: Array2<bool>,
}

impl Solution {
    pub fn presses(&self) -> &Array2<bool> {
        &self.presses
    }

    pub fn press_count(&self) -> CellCount {
        // bounded by the grid's total cells
        self.presses.iter().filter(|&&pressed| pressed).count() as CellCount
    }

    pub fn is_pressed(&self, (row, col): Coord2) -> bool {
        self.presses
            .get((row as usize, col as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Press coordinates in row-major order.
    pub fn iter_presses(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.presses
            .indexed_iter()
            .filter(|&(_, &pressed)| pressed)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Plays every press on a copy of `grid`.
    pub fn apply(&self, grid: &Grid) -> Result<Grid> {
        if grid.cells().dim() != self.presses.dim() {
            return Err(GameError::InvalidBoardShape);
        }
        let mut next = grid.clone();
        for coords in self.iter_presses() {
            next.toggle_around(coords);
        }
        Ok(next)
    }
}

pub fn is_solvable(grid: &Grid) -> bool {
    solve(grid).is_some()
}

/// Finds the shortest set of presses that clears `grid`, or `None` when no set exists.
///
/// Lights are chased downwards: once the first row of presses is chosen, every later press is forced
/// by the light directly above it. Each cell is tracked as an affine form over the first-row presses,
/// and the lights left on the bottom row give a linear system that decides which first rows work.
pub fn solve(grid: &Grid) -> Option<Solution> {
    let (rows, cols) = grid.size();
    let (rows, cols) = (usize::from(rows), usize::from(cols));
    let index = |(row, col): Coord2| usize::from(row) * cols + usize::from(col);

    let mut lights: Vec<AffineForm> = grid
        .cells()
        .iter()
        .map(|&lit| {
            let mut form = AffineForm::zero(cols);
            if lit {
                form.toggle(cols);
            }
            form
        })
        .collect();
    let mut presses = vec![AffineForm::zero(cols); rows * cols];

    for row in 0..rows {
        for col in 0..cols {
            presses[row * cols + col] = if row == 0 {
                let mut form = AffineForm::zero(cols);
                form.toggle(col);
                form
            } else {
                lights[(row - 1) * cols + col].clone()
            };
        }
        for col in 0..cols {
            let center = (row as Coord, col as Coord);
            for target in grid.iter_flip_targets(center) {
                lights[index(target)].xor_assign(&presses[row * cols + col]);
            }
        }
    }

    let residue = lights.split_off((rows - 1) * cols);
    let system = LinearSystem::reduce(residue, cols)?;

    let free_count = system.free.len();
    let candidates = if free_count > MAX_ENUMERATED_FREE_VARIABLES {
        log::warn!(
            "{free_count} free presses on a {rows}x{cols} grid, returning a solution that may not be shortest"
        );
        1
    } else {
        1u32 << free_count
    };

    let mut best: Option<Solution> = None;
    for choice in 0..candidates {
        let assignment = system.assignment(choice);
        let mask = Array2::from_shape_fn((rows, cols), |(row, col)| {
            presses[row * cols + col].evaluate(&assignment)
        });
        let candidate = Solution { presses: mask };
        if best
            .as_ref()
            .is_none_or(|best| candidate.press_count() < best.press_count())
        {
            best = Some(candidate);
        }
    }
    best
}

/// Bits `0..vars` are coefficients of the first-row presses, bit `vars` is the constant term.
#[derive(Clone, Debug, PartialEq, Eq)]
struct AffineForm {
    words: Vec<u64>,
}

impl AffineForm {
    fn zero(vars: usize) -> Self {
        Self {
            words: vec![0; (vars + 1).div_ceil(64)],
        }
    }

    fn get(&self, bit: usize) -> bool {
        self.words[bit / 64] & (1u64 << (bit % 64)) != 0
    }

    fn toggle(&mut self, bit: usize) {
        self.words[bit / 64] ^= 1u64 << (bit % 64);
    }

    fn xor_assign(&mut self, other: &Self) {
        for (word, other) in self.words.iter_mut().zip(&other.words) {
            *word ^= other;
        }
    }

    /// Value of the form under `assignment`, which must have its constant bit set.
    fn evaluate(&self, assignment: &AffineForm) -> bool {
        let ones: u32 = self
            .words
            .iter()
            .zip(&assignment.words)
            .map(|(a, b)| (a & b).count_ones())
            .sum();
        ones % 2 == 1
    }
}

/// Reduced row echelon form of `form == 0` over GF(2).
#[derive(Debug)]
struct LinearSystem {
    vars: usize,
    /// `(pivot variable, equation)` pairs
    pivots: Vec<(usize, AffineForm)>,
    free: Vec<usize>,
}

impl LinearSystem {
    /// Returns `None` when the equations are inconsistent.
    fn reduce(mut equations: Vec<AffineForm>, vars: usize) -> Option<Self> {
        let mut pivots = Vec::new();
        let mut free = Vec::new();
        let mut rank = 0;

        for var in 0..vars {
            let Some(found) = (rank..equations.len()).find(|&i| equations[i].get(var)) else {
                free.push(var);
                continue;
            };
            equations.swap(rank, found);
            let pivot = equations[rank].clone();
            for (i, equation) in equations.iter_mut().enumerate() {
                if i != rank && equation.get(var) {
                    equation.xor_assign(&pivot);
                }
            }
            pivots.push(var);
            rank += 1;
        }

        // leftover equations have no coefficients, so a constant term means 0 == 1
        if equations[rank..].iter().any(|equation| equation.get(vars)) {
            return None;
        }

        let pivots = pivots.into_iter().zip(equations).collect();
        Some(Self { vars, pivots, free })
    }

    /// Assignment for the `choice`-th combination of free variables, with the constant bit set.
    fn assignment(&self, choice: u32) -> AffineForm {
        let mut assignment = AffineForm::zero(self.vars);
        assignment.toggle(self.vars);

        for (i, &var) in self.free.iter().enumerate() {
            if i < 32 && choice & (1u32 << i) != 0 {
                assignment.toggle(var);
            }
        }
        for (var, equation) in &self.pivots {
            // pivot = constant + sum of free terms; other pivots are eliminated
            let mut value = equation.get(self.vars);
            for &free in &self.free {
                if equation.get(free) && assignment.get(free) {
                    value = !value;
                }
            }
            if value {
                assignment.toggle(*var);
            }
        }
        assignment
    }
}
