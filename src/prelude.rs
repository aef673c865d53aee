//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackOutcome, AttackRecord, Catalog, Command, Coord, Event, Match, MatchConfig, MatchId,
    Phase, Player, RandomPlayer, Side,
};

#[cfg(feature = "std")]
pub use crate::{MatchApi, MatchHandle, MatchStore};
