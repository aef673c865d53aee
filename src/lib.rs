#![cfg_attr(not(feature = "std"), no_std)]

//! Authoritative game-state engine for a two-side naval battle on a small
//! grid: ship placement, attack resolution, sinking, victory and turn order.
//!
//! The engine is pure and synchronous. With the `std` feature a session
//! layer ([`session::MatchStore`]) adds per-match locking and turns command
//! results into [`Event`]s for a transport to relay.

extern crate alloc;

mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
pub mod prelude;
pub mod protocol;
#[cfg(feature = "std")]
pub mod session;
mod ship;

pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
pub use player::*;
pub use protocol::*;
#[cfg(feature = "std")]
pub use session::{MatchHandle, MatchStore};
pub use ship::*;
