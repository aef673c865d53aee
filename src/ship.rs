//! Ship instances and the geometry rules for laying them out.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, Coord};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Opaque ship identifier, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a ship kind in the match catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct KindId(pub usize);

/// A ship placed on a board. Never moves after placement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    kind: KindId,
    cells: Vec<Coord>,
}

impl Ship {
    /// `cells` are expected in line order; see [`straight_line`].
    pub fn new(id: ShipId, kind: KindId, cells: Vec<Coord>) -> Self {
        Self { id, kind, cells }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn kind(&self) -> KindId {
        self.kind
    }

    /// Occupied cells, ordered along the ship's axis.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// `None` for single-cell ships.
    pub fn orientation(&self) -> Option<Orientation> {
        match self.cells.as_slice() {
            [a, b, ..] if a.row == b.row => Some(Orientation::Horizontal),
            [_, _, ..] => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

/// Checks that `cells` share a row or a column and, sorted along the varying
/// axis, step by exactly one. Returns the sorted cells on success.
///
/// A single cell is always a valid line; an empty slice never is.
pub fn straight_line(cells: &[Coord]) -> Option<Vec<Coord>> {
    let first = *cells.first()?;
    let mut sorted = cells.to_vec();
    if cells.len() == 1 {
        return Some(sorted);
    }
    let horizontal = cells.iter().all(|c| c.row == first.row);
    let vertical = cells.iter().all(|c| c.col == first.col);
    let axis: fn(&Coord) -> usize = if horizontal {
        |c: &Coord| c.col
    } else if vertical {
        |c: &Coord| c.row
    } else {
        return None;
    };
    sorted.sort_by_key(axis);
    let contiguous = sorted.windows(2).all(|w| axis(&w[1]) == axis(&w[0]) + 1);
    contiguous.then_some(sorted)
}

/// Cells of a ship of `length` starting at `origin` and running right or down,
/// checked against an N×N board.
pub fn layout(
    origin: Coord,
    orientation: Orientation,
    length: usize,
    board_size: usize,
) -> Result<Vec<Coord>, BoardError> {
    let (fixed, start) = match orientation {
        Orientation::Horizontal => (origin.row, origin.col),
        Orientation::Vertical => (origin.col, origin.row),
    };
    let fits = fixed < board_size
        && start
            .checked_add(length)
            .is_some_and(|end| end <= board_size);
    if !fits {
        return Err(BoardError::OutOfBounds(origin));
    }
    Ok((0..length)
        .map(|i| match orientation {
            Orientation::Horizontal => Coord::new(origin.row, origin.col + i),
            Orientation::Vertical => Coord::new(origin.row + i, origin.col),
        })
        .collect())
}
