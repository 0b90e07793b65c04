//! Per-side board state, fog of war, journal and deferred effects.
//!
//! ## GameModel
//!
//! One instance per side. It holds that side's belief about the whole
//! battlefield: its own pieces for certain, enemy pieces only while they
//! are (or were last) revealed.
//!
//! ```
//! use ace_fighter::board::GameModel;
//! use ace_fighter::core::{Direction, Player, Position};
//! use ace_fighter::pieces::Piece;
//!
//! let mut game = GameModel::new(10, 10, Player::Player1);
//! let aew = Piece::aew(Player::Player1, Direction::Up);
//!
//! assert!(!game.deploy(aew, Position::new(5, 8))); // AEWs start on the back row
//! assert!(game.deploy(aew, Position::new(5, 9)));
//! assert!(!game.is_fow(Position::new(5, 5)).is_hidden());
//! assert!(game.is_fow(Position::new(0, 0)).is_hidden());
//! ```

mod effects;
mod fog;
mod journal;
mod model;

pub(crate) use effects::flight_path;
pub use effects::{Completion, EffectToken, PendingEffect, Visual};
pub use fog::{RevealReason, Visibility};
pub use journal::{LogEntry, LogKind, LogParams, LogValue};
pub use model::{GameModel, WinState};
