//! Board state: an N×N grid of cells plus the ships placed on it.
//!
//! The board is not turn-aware. `Match` validates commands and then calls
//! into the board; the board only re-checks what it needs to keep its own
//! cells consistent.

use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

use crate::common::{BoardError, Coord};
use crate::ship::{layout, KindId, Orientation, Ship, ShipId};

/// Attempts made by [`Board::random_placement`] before giving up.
const PLACEMENT_ATTEMPTS: usize = 100;

/// Contents of one grid cell.
///
/// Transitions are `Empty -> EmptyAttacked` and `Ship -> ShipAttacked`, each
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Empty,
    EmptyAttacked,
    Ship { id: ShipId, kind: KindId },
    ShipAttacked { id: ShipId, kind: KindId },
}

impl Cell {
    pub fn is_attacked(&self) -> bool {
        matches!(self, Cell::EmptyAttacked | Cell::ShipAttacked { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Ship occupying the cell, attacked or not.
    pub fn ship(&self) -> Option<(ShipId, KindId)> {
        match *self {
            Cell::Ship { id, kind } | Cell::ShipAttacked { id, kind } => Some((id, kind)),
            Cell::Empty | Cell::EmptyAttacked => None,
        }
    }

    fn attacked(self) -> Cell {
        match self {
            Cell::Empty | Cell::EmptyAttacked => Cell::EmptyAttacked,
            Cell::Ship { id, kind } | Cell::ShipAttacked { id, kind } => {
                Cell::ShipAttacked { id, kind }
            }
        }
    }
}

/// A cell of the opponent's board as the attacker is allowed to see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FogCell {
    /// Not attacked yet; may or may not hide a ship.
    Unknown,
    Miss,
    /// Hit on a ship that is still afloat.
    Hit,
    /// Part of a ship whose every cell has been hit.
    Sunk,
}

/// Read-only, row-major copy of a board's cells.
///
/// Always holds exactly `size * size` cells; deserialization goes through
/// [`GridView::new`] so a malformed view is rejected instead of indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "RawGridView<T>"))]
pub struct GridView<T> {
    size: usize,
    cells: Vec<T>,
}

#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawGridView<T> {
    size: usize,
    cells: Vec<T>,
}

#[cfg(feature = "std")]
impl<T> TryFrom<RawGridView<T>> for GridView<T> {
    type Error = BoardError;

    fn try_from(raw: RawGridView<T>) -> Result<Self, Self::Error> {
        GridView::new(raw.size, raw.cells)
    }
}

impl<T> GridView<T> {
    /// Wrap row-major `cells` of an N×N grid.
    pub fn new(size: usize, cells: Vec<T>) -> Result<Self, BoardError> {
        if size.checked_mul(size) != Some(cells.len()) {
            return Err(BoardError::GridShape {
                size,
                cells: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, coord: Coord) -> Option<&T> {
        if coord.row < self.size && coord.col < self.size {
            self.cells.get(coord.row * self.size + coord.col)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Every cell with its coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Coord::new(i / size, i % size), c))
    }
}

/// One side's grid and fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an N×N board of empty cells.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            ships: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    fn index(&self, coord: Coord) -> Result<usize, BoardError> {
        if self.in_bounds(coord) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(BoardError::OutOfBounds(coord))
        }
    }

    pub fn cell(&self, coord: Coord) -> Result<Cell, BoardError> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    /// Write a ship into `cells`.
    ///
    /// Callers validate shape and counts beforehand; this only refuses cells
    /// that are off the board or not `Empty`. Nothing is written on error.
    pub fn place_ship(
        &mut self,
        cells: &[Coord],
        id: ShipId,
        kind: KindId,
    ) -> Result<(), BoardError> {
        for &coord in cells {
            if !self.cell(coord)?.is_empty() {
                return Err(BoardError::OccupiedCell(coord));
            }
        }
        for &coord in cells {
            let i = self.index(coord)?;
            self.cells[i] = Cell::Ship { id, kind };
        }
        self.ships.push(Ship::new(id, kind, cells.to_vec()));
        Ok(())
    }

    /// Mark a cell attacked and return what it held before.
    pub fn attack_cell(&mut self, coord: Coord) -> Result<Cell, BoardError> {
        let i = self.index(coord)?;
        let before = self.cells[i];
        if before.is_attacked() {
            return Err(BoardError::AlreadyAttacked(coord));
        }
        self.cells[i] = before.attacked();
        Ok(before)
    }

    /// `true` once every cell of the ship has been attacked.
    pub fn is_ship_fully_sunk(&self, id: ShipId) -> Result<bool, BoardError> {
        let ship = self.ship(id).ok_or(BoardError::UnknownShip(id))?;
        Ok(ship
            .cells()
            .iter()
            .all(|&c| self.cell(c).map(|cell| cell.is_attacked()).unwrap_or(false)))
    }

    /// Ships with at least one intact cell.
    pub fn ships_afloat(&self) -> usize {
        self.ships
            .iter()
            .filter(|s| !self.is_ship_fully_sunk(s.id()).unwrap_or(true))
            .count()
    }

    /// Random straight, non-overlapping placement for a ship of `length`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<Vec<Coord>, BoardError> {
        if length == 0 || length > self.size {
            return Err(BoardError::UnableToPlaceShip);
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (self.size - 1, self.size - length),
                Orientation::Vertical => (self.size - length, self.size - 1),
            };
            let origin = Coord::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            let cells = layout(origin, orient, length, self.size)?;
            if cells
                .iter()
                .all(|&c| self.cell(c).map(|cell| cell.is_empty()).unwrap_or(false))
            {
                return Ok(cells);
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Full-detail view for the board's owner.
    pub fn own_view(&self) -> GridView<Cell> {
        GridView {
            size: self.size,
            cells: self.cells.clone(),
        }
    }

    /// What the opposing side may see. Unattacked cells are always
    /// `Unknown`, whether or not they hold a ship.
    pub fn fog_view(&self) -> GridView<FogCell> {
        let cells = self
            .cells
            .iter()
            .map(|cell| match *cell {
                Cell::Empty | Cell::Ship { .. } => FogCell::Unknown,
                Cell::EmptyAttacked => FogCell::Miss,
                Cell::ShipAttacked { id, .. } => {
                    if self.is_ship_fully_sunk(id).unwrap_or(false) {
                        FogCell::Sunk
                    } else {
                        FogCell::Hit
                    }
                }
            })
            .collect();
        GridView {
            size: self.size,
            cells,
        }
    }
}
