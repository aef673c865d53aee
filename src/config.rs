//! Match configuration: board size and the ship catalog.
//!
//! The catalog is shared, immutable configuration. A `Match` copies the
//! per-kind counts out of it for each side and never mutates it.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::ship::KindId;

/// Board size used by the classroom game.
pub const DEFAULT_BOARD_SIZE: usize = 6;

/// Reference fleet as `(name, length, count)`.
pub const DEFAULT_FLEET: [(&str, usize, usize); 3] = [
    ("submarine", 1, 3),
    ("torpedo", 2, 2),
    ("carrier", 3, 1),
];

/// One catalog entry: a kind of ship, its length and how many each side places.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipClass {
    pub name: String,
    pub length: usize,
    pub count: usize,
}

impl ShipClass {
    pub fn new(name: impl Into<String>, length: usize, count: usize) -> Self {
        Self {
            name: name.into(),
            length,
            count,
        }
    }
}

/// Errors raised while building a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BoardTooSmall(usize),
    EmptyCatalog,
    DuplicateKind(String),
    InvalidLength(String),
    InvalidCount(String),
    /// A ship is longer than the board is wide.
    ShipTooLong { name: String, length: usize, board_size: usize },
    /// The whole fleet needs more cells than the board has.
    FleetTooLarge { cells: usize, board_size: usize },
    /// Catalog text could not be parsed.
    Malformed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooSmall(n) => write!(f, "Board size {} is too small", n),
            ConfigError::EmptyCatalog => write!(f, "Ship catalog is empty"),
            ConfigError::DuplicateKind(name) => write!(f, "Ship kind '{}' listed twice", name),
            ConfigError::InvalidLength(name) => write!(f, "Ship kind '{}' has zero length", name),
            ConfigError::InvalidCount(name) => write!(f, "Ship kind '{}' has zero count", name),
            ConfigError::ShipTooLong {
                name,
                length,
                board_size,
            } => write!(
                f,
                "Ship kind '{}' of length {} does not fit a {}x{} board",
                name, length, board_size, board_size
            ),
            ConfigError::FleetTooLarge { cells, board_size } => write!(
                f,
                "Fleet needs {} cells but a {}x{} board has only {}",
                cells,
                board_size,
                board_size,
                board_size * board_size
            ),
            ConfigError::Malformed(entry) => {
                write!(f, "Malformed catalog entry '{}', expected name:LENxCOUNT", entry)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated, cheaply clonable ship catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    classes: Arc<[ShipClass]>,
}

impl Catalog {
    pub fn new(classes: Vec<ShipClass>) -> Result<Self, ConfigError> {
        if classes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, class) in classes.iter().enumerate() {
            if class.name.is_empty() {
                return Err(ConfigError::Malformed(class.name.clone()));
            }
            if classes[..i].iter().any(|c| c.name == class.name) {
                return Err(ConfigError::DuplicateKind(class.name.clone()));
            }
            if class.length == 0 {
                return Err(ConfigError::InvalidLength(class.name.clone()));
            }
            if class.count == 0 {
                return Err(ConfigError::InvalidCount(class.name.clone()));
            }
        }
        Ok(Self {
            classes: classes.into(),
        })
    }

    /// Entries in catalog order; `KindId(i)` refers to `classes()[i]`.
    pub fn classes(&self) -> &[ShipClass] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class(&self, kind: KindId) -> Option<&ShipClass> {
        self.classes.get(kind.0)
    }

    /// Find a kind by name.
    pub fn lookup(&self, name: &str) -> Option<(KindId, &ShipClass)> {
        self.classes
            .iter()
            .enumerate()
            .find(|(_, c)| c.name == name)
            .map(|(i, c)| (KindId(i), c))
    }

    /// Number of ships each side places.
    pub fn total_ships(&self) -> usize {
        self.classes.iter().map(|c| c.count).sum()
    }

    /// Number of cells each side's fleet occupies.
    pub fn total_cells(&self) -> usize {
        self.classes
            .iter()
            .fold(0usize, |acc, c| acc.saturating_add(c.length.saturating_mul(c.count)))
    }

    /// Per-kind counts, as a side starts positioning with.
    pub fn counts(&self) -> Vec<usize> {
        self.classes.iter().map(|c| c.count).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let classes: Vec<ShipClass> = DEFAULT_FLEET
            .iter()
            .map(|&(name, length, count)| ShipClass::new(name, length, count))
            .collect();
        Self {
            classes: classes.into(),
        }
    }
}

/// Parses `name:LENxCOUNT[,name:LENxCOUNT...]`, e.g. `submarine:1x3,carrier:3x1`.
impl FromStr for Catalog {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut classes = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let malformed = || ConfigError::Malformed(entry.to_string());
            let (name, dims) = entry.split_once(':').ok_or_else(malformed)?;
            let (len, count) = dims.split_once(['x', 'X']).ok_or_else(malformed)?;
            let length = len.trim().parse().map_err(|_| malformed())?;
            let count = count.trim().parse().map_err(|_| malformed())?;
            classes.push(ShipClass::new(name.trim(), length, count));
        }
        Catalog::new(classes)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.classes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}x{}", c.name, c.length, c.count)?;
        }
        Ok(())
    }
}

/// Everything a `Match` needs to know before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    board_size: usize,
    catalog: Catalog,
}

impl MatchConfig {
    pub fn new(board_size: usize, catalog: Catalog) -> Result<Self, ConfigError> {
        if board_size == 0 {
            return Err(ConfigError::BoardTooSmall(board_size));
        }
        if let Some(c) = catalog.classes().iter().find(|c| c.length > board_size) {
            return Err(ConfigError::ShipTooLong {
                name: c.name.clone(),
                length: c.length,
                board_size,
            });
        }
        let cells = catalog.total_cells();
        if cells > board_size.saturating_mul(board_size) {
            return Err(ConfigError::FleetTooLarge { cells, board_size });
        }
        Ok(Self {
            board_size,
            catalog,
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            catalog: Catalog::default(),
        }
    }
}
