//! The match state machine: positioning, combat, finished.
//!
//! A `Match` owns one board per side, the per-side remaining ship counts and
//! the attack history. It is only mutated through [`Match::place_ship`],
//! [`Match::start_combat`] and [`Match::attack`]; a rejected command leaves
//! it untouched.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::board::{Board, Cell, FogCell, GridView};
use crate::common::{
    AttackError, AttackOutcome, BoardError, Coord, PlacementError, Side, StartError,
};
use crate::config::MatchConfig;
use crate::ship::{straight_line, ShipId};

/// Identifier the session layer assigns to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Match phase. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Positioning,
    Combat,
    Finished,
}

/// One resolved attack, as appended to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRecord {
    pub side: Side,
    pub target: Coord,
    pub outcome: AttackOutcome,
    /// 1-based index of this attack among all attacks of the match.
    pub turn: usize,
    /// Set on the attack that sank the defender's last ship.
    pub winner: Option<Side>,
}

/// Acknowledgement of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementAck {
    pub ship: ShipId,
    /// Ships of the same kind this side still has to place.
    pub remaining: usize,
    /// The side has placed its whole fleet.
    pub ready: bool,
}

#[derive(Debug, Clone)]
struct SideState {
    name: String,
    board: Board,
    remaining: Vec<usize>,
    afloat: usize,
    next_ship: u32,
}

impl SideState {
    fn new(name: String, config: &MatchConfig) -> Self {
        Self {
            name,
            board: Board::new(config.board_size()),
            remaining: config.catalog().counts(),
            afloat: 0,
            next_ship: 0,
        }
    }
}

/// Serializable picture of a match from one side's seat.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    pub id: MatchId,
    pub viewer: Side,
    pub names: [String; 2],
    pub phase: Phase,
    pub active: Option<Side>,
    pub winner: Option<Side>,
    pub own_board: GridView<Cell>,
    pub opponent_board: GridView<FogCell>,
    /// `(kind, still to place)` for the viewer, in catalog order.
    pub remaining: Vec<(String, usize)>,
    pub own_afloat: usize,
    pub opponent_afloat: usize,
    pub history: Vec<AttackRecord>,
}

/// Authoritative state of one two-sided match.
#[derive(Debug, Clone)]
pub struct Match {
    id: MatchId,
    config: MatchConfig,
    sides: [SideState; 2],
    phase: Phase,
    active: Side,
    winner: Option<Side>,
    history: Vec<AttackRecord>,
}

impl Match {
    /// Create a match in the positioning phase for two named sides.
    pub fn new(
        id: MatchId,
        side_one: impl Into<String>,
        side_two: impl Into<String>,
        config: MatchConfig,
    ) -> Self {
        let sides = [
            SideState::new(side_one.into(), &config),
            SideState::new(side_two.into(), &config),
        ];
        Self {
            id,
            config,
            sides,
            phase: Phase::Positioning,
            active: Side::One,
            winner: None,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side whose turn it is; `None` outside combat.
    pub fn active_side(&self) -> Option<Side> {
        (self.phase == Phase::Combat).then_some(self.active)
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn history(&self) -> &[AttackRecord] {
        &self.history
    }

    pub fn side_name(&self, side: Side) -> &str {
        &self.sides[side.index()].name
    }

    /// Ships of `kind` the side still has to place, `None` for unknown kinds.
    pub fn remaining_of(&self, side: Side, kind: &str) -> Option<usize> {
        let (kind, _) = self.config.catalog().lookup(kind)?;
        Some(self.sides[side.index()].remaining[kind.0])
    }

    /// Placed ships of `side` that are not yet sunk.
    pub fn ships_afloat(&self, side: Side) -> usize {
        self.sides[side.index()].afloat
    }

    /// Place one ship for `side`. Valid only during positioning.
    pub fn place_ship(
        &mut self,
        side: Side,
        kind: &str,
        cells: &[Coord],
    ) -> Result<PlacementAck, PlacementError> {
        if self.phase != Phase::Positioning {
            return Err(PlacementError::NotInPositioningPhase);
        }
        let (kind_id, class) = self
            .config
            .catalog()
            .lookup(kind)
            .ok_or(PlacementError::UnknownShipKind)?;
        let state = &mut self.sides[side.index()];

        if state.remaining[kind_id.0] == 0 {
            return Err(PlacementError::ShipKindExhausted);
        }
        if cells.len() != class.length {
            return Err(PlacementError::WrongShipSize {
                expected: class.length,
                got: cells.len(),
            });
        }
        if let Some(&c) = cells.iter().find(|&&c| !state.board.in_bounds(c)) {
            return Err(PlacementError::OutOfBounds(c));
        }
        if let Some(&c) = cells
            .iter()
            .find(|&&c| !state.board.cell(c).map(|cell| cell.is_empty()).unwrap_or(false))
        {
            return Err(PlacementError::CellOccupied(c));
        }
        // NOTE: ships may touch each other; only overlap is refused.
        let line = straight_line(cells).ok_or(PlacementError::NotStraightOrNotContiguous)?;

        let id = ShipId(state.next_ship);
        state.board.place_ship(&line, id, kind_id).map_err(|e| {
            log::error!("board refused a validated placement on {}: {}", side, e);
            match e {
                BoardError::OutOfBounds(c) => PlacementError::OutOfBounds(c),
                _ => PlacementError::CellOccupied(line[0]),
            }
        })?;
        state.next_ship += 1;
        state.afloat += 1;
        state.remaining[kind_id.0] -= 1;
        let remaining = state.remaining[kind_id.0];
        let ready = state.remaining.iter().all(|&n| n == 0);

        log::debug!(
            "match {}: {} placed {} {} at {:?}",
            self.id,
            side,
            kind,
            id,
            line
        );
        Ok(PlacementAck {
            ship: id,
            remaining,
            ready,
        })
    }

    /// `true` once `side` has placed every ship in the catalog.
    pub fn is_ready_for_combat(&self, side: Side) -> bool {
        self.sides[side.index()].remaining.iter().all(|&n| n == 0)
    }

    /// Move from positioning to combat. Side one always attacks first.
    pub fn start_combat(&mut self) -> Result<Side, StartError> {
        if self.phase != Phase::Positioning {
            return Err(StartError::AlreadyStarted);
        }
        if !Side::BOTH.iter().all(|&s| self.is_ready_for_combat(s)) {
            return Err(StartError::NotBothSidesReady);
        }
        self.phase = Phase::Combat;
        self.active = Side::One;
        log::info!("match {}: combat started, {} attacks first", self.id, self.active);
        Ok(self.active)
    }

    /// Attack the defending side's board at `target`.
    ///
    /// A miss passes the turn; a hit or sink keeps it. Sinking the defender's
    /// last ship finishes the match with the attacker as winner.
    pub fn attack(&mut self, side: Side, target: Coord) -> Result<AttackRecord, AttackError> {
        if self.phase != Phase::Combat {
            return Err(AttackError::NotInCombatPhase);
        }
        if side != self.active {
            return Err(AttackError::NotYourTurn);
        }
        let defender = side.opponent();
        let state = &mut self.sides[defender.index()];
        let before = state.board.attack_cell(target).map_err(|e| match e {
            BoardError::AlreadyAttacked(c) => AttackError::AlreadyAttacked(c),
            _ => AttackError::OutOfBounds(target),
        })?;

        let outcome = match before.ship() {
            None => AttackOutcome::Miss,
            Some((id, _)) => {
                if state.board.is_ship_fully_sunk(id).unwrap_or(false) {
                    state.afloat = state.afloat.saturating_sub(1);
                    AttackOutcome::Sunk
                } else {
                    AttackOutcome::Hit
                }
            }
        };

        let mut record = AttackRecord {
            side,
            target,
            outcome,
            turn: self.history.len() + 1,
            winner: None,
        };
        if state.afloat == 0 {
            self.phase = Phase::Finished;
            self.winner = Some(side);
            record.winner = Some(side);
            log::info!(
                "match {}: {} ({}) wins on turn {}",
                self.id,
                side,
                self.sides[side.index()].name,
                record.turn
            );
        } else if outcome == AttackOutcome::Miss {
            self.active = defender;
        }
        self.history.push(record);

        log::debug!("match {}: {} attacked {} -> {:?}", self.id, side, target, outcome);
        Ok(record)
    }

    /// Full view of `side`'s own board.
    pub fn own_board(&self, side: Side) -> GridView<Cell> {
        self.sides[side.index()].board.own_view()
    }

    /// The board `viewer` attacks, redacted to what `viewer` has learned.
    pub fn opponent_board(&self, viewer: Side) -> GridView<FogCell> {
        self.sides[viewer.opponent().index()].board.fog_view()
    }

    /// Everything `viewer` is allowed to know, in one serializable value.
    pub fn snapshot(&self, viewer: Side) -> MatchSnapshot {
        let own = &self.sides[viewer.index()];
        let remaining = self
            .config
            .catalog()
            .classes()
            .iter()
            .zip(&own.remaining)
            .map(|(c, &n)| (c.name.clone(), n))
            .collect();
        MatchSnapshot {
            id: self.id,
            viewer,
            names: [self.sides[0].name.clone(), self.sides[1].name.clone()],
            phase: self.phase,
            active: self.active_side(),
            winner: self.winner,
            own_board: self.own_board(viewer),
            opponent_board: self.opponent_board(viewer),
            remaining,
            own_afloat: own.afloat,
            opponent_afloat: self.ships_afloat(viewer.opponent()),
            history: self.history.clone(),
        }
    }
}
