//! Commands a session layer feeds into a match and the events it gets back.
//!
//! These are plain values; turning them into socket messages, HTTP responses
//! or anything else is the job of whatever transport wraps the engine.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{AttackError, Coord, PlacementError, Side, StartError};
use crate::game::{AttackRecord, Phase};
use crate::ship::ShipId;

/// A request from one seat of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    PlaceShip {
        side: Side,
        kind: String,
        cells: Vec<Coord>,
    },
    /// Explicit positioning → combat transition.
    StartCombat,
    Attack { side: Side, target: Coord },
}

/// Something every participant of the match should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    ShipPlaced {
        side: Side,
        kind: String,
        ship: ShipId,
        remaining: usize,
    },
    /// `side` has placed its whole fleet.
    PositioningComplete { side: Side },
    CombatStarted { active: Side },
    AttackResolved {
        record: AttackRecord,
        /// Side to attack next, `None` once the match is over.
        next: Option<Side>,
        phase: Phase,
    },
    MatchFinished { winner: Side, name: String },
}

/// Any rejected command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Placement(PlacementError),
    Attack(AttackError),
    Start(StartError),
}

impl From<PlacementError> for CommandError {
    fn from(err: PlacementError) -> Self {
        CommandError::Placement(err)
    }
}

impl From<AttackError> for CommandError {
    fn from(err: AttackError) -> Self {
        CommandError::Attack(err)
    }
}

impl From<StartError> for CommandError {
    fn from(err: StartError) -> Self {
        CommandError::Start(err)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Placement(e) => write!(f, "placement rejected: {}", e),
            CommandError::Attack(e) => write!(f, "attack rejected: {}", e),
            CommandError::Start(e) => write!(f, "cannot start combat: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

/// Asynchronous entry point a transport adapter talks to.
#[cfg(feature = "std")]
#[async_trait::async_trait]
pub trait MatchApi: Send + Sync {
    /// Apply one command atomically and return the events it produced.
    async fn execute(&self, command: Command) -> Result<Vec<Event>, CommandError>;
    /// Current state as seen from `viewer`'s seat.
    async fn snapshot(&self, viewer: Side) -> crate::game::MatchSnapshot;
}
