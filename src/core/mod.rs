//! Core engine types: geometry, sides, configuration, errors, RNG.
//!
//! Nothing in here knows about specific piece rules or the protocol.

pub mod config;
pub mod error;
pub mod geometry;
pub mod player;
pub mod rng;

pub use config::{MatchConfig, MISSILE_RANGE, RADAR_RANGE};
pub use error::{GameError, Result};
pub use geometry::{Direction, Position};
pub use player::{Player, PlayerMap};
pub use rng::GameRng;
