//! Common types for the naval battle engine: coordinates, sides, attack
//! outcomes and the error taxonomy shared by `Board` and `Match`.

use core::fmt;

/// A grid position, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    /// The side on the other end of the table.
    pub const fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Array index for per-side storage.
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// Side number as players see it (`1` or `2`).
    pub const fn number(self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = u8;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Side::One),
            2 => Ok(Side::Two),
            other => Err(other),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side {}", self.number())
    }
}

/// Result of a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// No ship occupied the cell.
    Miss,
    /// A ship segment was hit but the ship is still afloat.
    Hit,
    /// The attack hit the last intact segment of a ship.
    Sunk,
}

impl AttackOutcome {
    pub fn is_hit(self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }
}

/// Errors returned by `Board` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside `[0, size)` on either axis.
    OutOfBounds(Coord),
    /// Tried to place a ship on a cell that is not empty.
    OccupiedCell(Coord),
    /// The cell was already attacked.
    AlreadyAttacked(Coord),
    /// No ship with that id lives on this board.
    UnknownShip(crate::ShipId),
    /// Random placement gave up after too many attempts.
    UnableToPlaceShip,
    /// A grid of `size` needs `size * size` cells but got `cells`.
    GridShape { size: usize, cells: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds(c) => write!(f, "Position {} is outside the board", c),
            BoardError::OccupiedCell(c) => write!(f, "Position {} is already occupied", c),
            BoardError::AlreadyAttacked(c) => write!(f, "Position {} was already attacked", c),
            BoardError::UnknownShip(id) => write!(f, "No ship with id {} on this board", id),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::GridShape { size, cells } => {
                write!(f, "A {}x{} grid cannot hold {} cells", size, size, cells)
            }
        }
    }
}

/// Reasons a ship placement is rejected. State is unchanged on every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Ships can only be placed while the match is positioning.
    NotInPositioningPhase,
    /// The kind is not part of the catalog.
    UnknownShipKind,
    /// Every ship of this kind has already been placed.
    ShipKindExhausted,
    /// Number of cells does not match the kind's length.
    WrongShipSize { expected: usize, got: usize },
    /// A cell lies outside the board.
    OutOfBounds(Coord),
    /// A cell already holds a ship.
    CellOccupied(Coord),
    /// Cells are not on one row/column or leave a gap.
    NotStraightOrNotContiguous,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NotInPositioningPhase => {
                write!(f, "Ships can only be placed during positioning")
            }
            PlacementError::UnknownShipKind => write!(f, "Unknown ship kind"),
            PlacementError::ShipKindExhausted => {
                write!(f, "All ships of this kind have already been placed")
            }
            PlacementError::WrongShipSize { expected, got } => {
                write!(f, "Ship must occupy {} cell(s), got {}", expected, got)
            }
            PlacementError::OutOfBounds(c) => write!(f, "Position {} is outside the board", c),
            PlacementError::CellOccupied(c) => write!(f, "Position {} is already occupied", c),
            PlacementError::NotStraightOrNotContiguous => {
                write!(f, "Ship must lie on consecutive cells in a straight line")
            }
        }
    }
}

/// Reasons an attack is rejected. State is unchanged on every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackError {
    NotInCombatPhase,
    NotYourTurn,
    AlreadyAttacked(Coord),
    OutOfBounds(Coord),
}

impl fmt::Display for AttackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackError::NotInCombatPhase => write!(f, "Match is not in the combat phase"),
            AttackError::NotYourTurn => write!(f, "It is not your turn to attack"),
            AttackError::AlreadyAttacked(c) => write!(f, "Position {} was already attacked", c),
            AttackError::OutOfBounds(c) => write!(f, "Position {} is outside the board", c),
        }
    }
}

/// Reasons the positioning → combat transition is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// Combat already started or the match is finished.
    AlreadyStarted,
    /// At least one side still has ships to place.
    NotBothSidesReady,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::AlreadyStarted => write!(f, "Combat has already started"),
            StartError::NotBothSidesReady => write!(f, "Both sides must place every ship first"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for AttackError {}
#[cfg(feature = "std")]
impl std::error::Error for StartError {}
