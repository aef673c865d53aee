#![cfg(feature = "std")]

//! Session-side bookkeeping around the engine.
//!
//! A [`MatchStore`] is an explicit registry owned by whoever runs the
//! service. Each match sits behind its own lock inside a [`MatchHandle`], so
//! commands for one match are applied one at a time while different matches
//! proceed independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::common::Side;
use crate::config::MatchConfig;
use crate::game::{Match, MatchId, MatchSnapshot, Phase};
use crate::protocol::{Command, CommandError, Event, MatchApi};

/// Clonable handle to one match. All clones share the same state.
#[derive(Clone)]
pub struct MatchHandle {
    id: MatchId,
    inner: Arc<Mutex<Match>>,
}

impl MatchHandle {
    pub fn new(game: Match) -> Self {
        Self {
            id: game.id(),
            inner: Arc::new(Mutex::new(game)),
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Run a read-only closure against the current match state.
    pub async fn inspect<R>(&self, f: impl FnOnce(&Match) -> R) -> R {
        let game = self.inner.lock().await;
        f(&game)
    }

    pub async fn phase(&self) -> Phase {
        self.inner.lock().await.phase()
    }

    fn apply(game: &mut Match, command: Command) -> Result<Vec<Event>, CommandError> {
        let mut events = Vec::new();
        match command {
            Command::PlaceShip { side, kind, cells } => {
                let ack = game.place_ship(side, &kind, &cells)?;
                events.push(Event::ShipPlaced {
                    side,
                    kind,
                    ship: ack.ship,
                    remaining: ack.remaining,
                });
                if ack.ready {
                    events.push(Event::PositioningComplete { side });
                    // Combat begins only when both fleets are down.
                    if Side::BOTH.iter().all(|&s| game.is_ready_for_combat(s)) {
                        let active = game.start_combat()?;
                        events.push(Event::CombatStarted { active });
                    }
                }
            }
            Command::StartCombat => {
                let active = game.start_combat()?;
                events.push(Event::CombatStarted { active });
            }
            Command::Attack { side, target } => {
                let record = game.attack(side, target)?;
                events.push(Event::AttackResolved {
                    record,
                    next: game.active_side(),
                    phase: game.phase(),
                });
                if let Some(winner) = record.winner {
                    events.push(Event::MatchFinished {
                        winner,
                        name: game.side_name(winner).to_string(),
                    });
                }
            }
        }
        Ok(events)
    }
}

#[async_trait::async_trait]
impl MatchApi for MatchHandle {
    async fn execute(&self, command: Command) -> Result<Vec<Event>, CommandError> {
        let mut game = self.inner.lock().await;
        let result = Self::apply(&mut game, command);
        if let Err(e) = &result {
            log::warn!("match {}: {}", self.id, e);
        }
        result
    }

    async fn snapshot(&self, viewer: Side) -> MatchSnapshot {
        self.inner.lock().await.snapshot(viewer)
    }
}

/// Registry of live matches. Holds no global state; create as many as needed.
#[derive(Default)]
pub struct MatchStore {
    matches: Mutex<HashMap<MatchId, MatchHandle>>,
    next_id: AtomicU64,
}

impl MatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new match between two named sides.
    pub async fn create(
        &self,
        side_one: impl Into<String>,
        side_two: impl Into<String>,
        config: MatchConfig,
    ) -> MatchHandle {
        let id = MatchId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let handle = MatchHandle::new(Match::new(id, side_one, side_two, config));
        self.matches.lock().await.insert(id, handle.clone());
        log::info!("match {} created", id);
        handle
    }

    pub async fn get(&self, id: MatchId) -> Option<MatchHandle> {
        self.matches.lock().await.get(&id).cloned()
    }

    /// Drop a match from the registry. Outstanding handles keep working.
    pub async fn remove(&self, id: MatchId) -> bool {
        let removed = self.matches.lock().await.remove(&id).is_some();
        if removed {
            log::info!("match {} removed", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.matches.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.matches.lock().await.is_empty()
    }

    pub async fn ids(&self) -> Vec<MatchId> {
        let mut ids: Vec<_> = self.matches.lock().await.keys().copied().collect();
        ids.sort();
        ids
    }
}
