//! Automated players.
//!
//! A `Player` never touches a `Match` directly: it produces commands for the
//! session layer and picks targets from the redacted opponent view, so it
//! sees exactly what a human at the same seat would.

use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{Board, FogCell, GridView};
use crate::common::{BoardError, Coord, Side};
use crate::config::MatchConfig;
use crate::game::AttackRecord;
use crate::protocol::Command;
use crate::ship::{KindId, ShipId};

/// Whole-fleet layouts tried before giving up.
const FLEET_ATTEMPTS: usize = 20;

/// Interface implemented by different player types.
pub trait Player: Send {
    /// Placement commands for the whole fleet of `side`.
    fn plan_fleet(
        &mut self,
        rng: &mut SmallRng,
        side: Side,
        config: &MatchConfig,
    ) -> Result<Vec<Command>, BoardError>;

    /// Next cell to attack, `None` when nothing is left to try.
    fn select_target(&mut self, rng: &mut SmallRng, view: &GridView<FogCell>) -> Option<Coord>;

    /// Inform the player of the result of its last attack.
    fn handle_attack_result(&mut self, _record: &AttackRecord) {}
}

/// Random fleet, hunt/target firing: finish off wounded ships first,
/// otherwise shoot at a random unknown cell.
#[derive(Debug, Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }

    fn try_layout(
        rng: &mut SmallRng,
        side: Side,
        config: &MatchConfig,
    ) -> Result<Vec<Command>, BoardError> {
        let mut scratch = Board::new(config.board_size());
        let mut commands = Vec::with_capacity(config.catalog().total_ships());
        let mut next = 0;
        for (i, class) in config.catalog().classes().iter().enumerate() {
            for _ in 0..class.count {
                let cells = scratch.random_placement(rng, class.length)?;
                scratch.place_ship(&cells, ShipId(next), KindId(i))?;
                next += 1;
                commands.push(Command::PlaceShip {
                    side,
                    kind: class.name.clone(),
                    cells,
                });
            }
        }
        Ok(commands)
    }
}

fn neighbours(coord: Coord, size: usize) -> impl Iterator<Item = Coord> {
    let Coord { row, col } = coord;
    [
        row.checked_sub(1).map(|r| Coord::new(r, col)),
        (row + 1 < size).then(|| Coord::new(row + 1, col)),
        col.checked_sub(1).map(|c| Coord::new(row, c)),
        (col + 1 < size).then(|| Coord::new(row, col + 1)),
    ]
    .into_iter()
    .flatten()
}

impl Player for RandomPlayer {
    fn plan_fleet(
        &mut self,
        rng: &mut SmallRng,
        side: Side,
        config: &MatchConfig,
    ) -> Result<Vec<Command>, BoardError> {
        let mut last = BoardError::UnableToPlaceShip;
        for _ in 0..FLEET_ATTEMPTS {
            match Self::try_layout(rng, side, config) {
                Ok(commands) => return Ok(commands),
                Err(e) => last = e,
            }
        }
        Err(last)
    }

    fn select_target(&mut self, rng: &mut SmallRng, view: &GridView<FogCell>) -> Option<Coord> {
        let unknown = |c: &Coord| view.get(*c) == Some(&FogCell::Unknown);
        let mut targets: Vec<Coord> = view
            .iter()
            .filter(|(_, cell)| **cell == FogCell::Hit)
            .flat_map(|(c, _)| neighbours(c, view.size()))
            .filter(unknown)
            .collect();
        if targets.is_empty() {
            targets = view
                .iter()
                .filter(|(_, cell)| **cell == FogCell::Unknown)
                .map(|(c, _)| c)
                .collect();
        }
        if targets.is_empty() {
            return None;
        }
        Some(targets[rng.random_range(0..targets.len())])
    }
}
