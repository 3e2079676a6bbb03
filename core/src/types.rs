use alloc::format;
use alloc::string::String;

use crate::{GameError, Result};

/// Single coordinate axis used for grid height, width, and positions.
pub type Coord = u8;

/// Count type used for lit-cell counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Parses a cell key such as `"1-2"` into `(row, col)`.
///
/// A comma or whitespace also works as the separator, and spaces around `-` or `,` are ignored.
pub fn parse_coords(text: &str) -> Result<Coord2> {
    let text = text.trim();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .ok_or(GameError::MalformedCoords)?;
    let (row, rest) = text.split_at(split);
    let trimmed = rest.trim_start();
    let col = match trimmed.strip_prefix(['-', ',']) {
        Some(col) => col.trim_start(),
        None if trimmed.len() < rest.len() => trimmed,
        None => return Err(GameError::MalformedCoords),
    };

    let row = row.parse().map_err(|_| GameError::MalformedCoords)?;
    let col = col.parse().map_err(|_| GameError::MalformedCoords)?;
    Ok((row, col))
}

/// Canonical `row-col` key for a cell.
pub fn format_coords((row, col): Coord2) -> String {
    format!("{row}-{col}")
}

/// The origin first, then the orthogonal neighbors.
const FLIP_PATTERN: [(isize, isize); 5] = [(0, 0), (0, 1), (0, -1), (1, 0), (-1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates over every in-bounds cell toggled by a flip at `center`.
#[derive(Debug)]
pub struct FlipIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl FlipIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for FlipIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= FLIP_PATTERN.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, FLIP_PATTERN[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn flip_iter_clips_at_corner() {
        let targets: Vec<_> = FlipIter::new((0, 0), (3, 3)).collect();

        assert_eq!(targets, [(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn flip_iter_on_single_cell_grid_yields_origin_only() {
        let targets: Vec<_> = FlipIter::new((0, 0), (1, 1)).collect();

        assert_eq!(targets, [(0, 0)]);
    }

    #[test]
    fn flip_iter_stops_at_max_coord() {
        let targets: Vec<_> = FlipIter::new((254, 254), (255, 255)).collect();

        assert_eq!(targets, [(254, 254), (254, 253), (253, 254)]);
    }

    #[test]
    fn parse_coords_accepts_cell_keys() {
        assert_eq!(parse_coords("1-2"), Ok((1, 2)));
        assert_eq!(parse_coords(" 3,4\n"), Ok((3, 4)));
        assert_eq!(parse_coords("0 7"), Ok((0, 7)));
    }

    #[test]
    fn parse_coords_ignores_spacing_around_separator() {
        for text in ["1 ,2", "1 -2", "1, 2", "1 - 2", "1\t,\t2"] {
            assert_eq!(parse_coords(text), Ok((1, 2)), "{text:?}");
        }
    }

    #[test]
    fn parse_coords_rejects_garbage() {
        assert_eq!(parse_coords("12"), Err(GameError::MalformedCoords));
        assert_eq!(parse_coords("-1-2"), Err(GameError::MalformedCoords));
        assert_eq!(parse_coords("a-b"), Err(GameError::MalformedCoords));
        assert_eq!(parse_coords("1-300"), Err(GameError::MalformedCoords));
        assert_eq!(parse_coords("1-2-3"), Err(GameError::MalformedCoords));
        assert_eq!(parse_coords("1--2"), Err(GameError::MalformedCoords));
        assert_eq!(parse_coords("1x2"), Err(GameError::MalformedCoords));
        assert_eq!(parse_coords("1-"), Err(GameError::MalformedCoords));
    }

    #[test]
    fn format_coords_round_trips_through_parse() {
        assert_eq!(format_coords((4, 9)), "4-9");
        assert_eq!(parse_coords(&format_coords((4, 9))), Ok((4, 9)));
    }
}
