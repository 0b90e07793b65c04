//! # ace-fighter
//!
//! A fog-of-war tactical air combat engine for two sides.
//!
//! ## Design Principles
//!
//! 1. **One model per side**: Each side owns a `GameModel` holding only
//!    what it knows. Enemy pieces appear when revealed and disappear when
//!    destroyed; nothing is ever read from the other side's model.
//!
//! 2. **Mirrored protocol**: Sides talk through `GameRemote` with
//!    `WireEvent`s in the sender's own frame. The receiver rotates them
//!    by 180° into its frame, so both boards show their own side at the
//!    bottom.
//!
//! 3. **No back-references**: Pieces are small `Copy` values. Rules that
//!    need the surroundings take the board as an argument.
//!
//! ## Architecture
//!
//! - **Persistent grid**: O(1) board snapshots via `im-rs`.
//!
//! - **Deferred effects**: Animated consequences (a missile in flight) are
//!   queued as `PendingEffect`s and applied when the view completes them.
//!
//! ## Modules
//!
//! - `core`: Geometry, sides, configuration, errors, RNG
//! - `pieces`: Fighter and AEW rules
//! - `board`: Per-side model, fog of war, journal, deferred effects
//! - `protocol`: Wire events, frame translation, codec, hot-seat link
//! - `ai`: Heuristic computer opponent
//! - `session`: The `Duel` match controller
//!
//! ## Example
//!
//! ```
//! use ace_fighter::{Duel, MatchConfig, Phase, Player};
//!
//! let config = MatchConfig::default().with_ai_seed(7);
//! let mut duel = Duel::new(config);
//! let mut ai = duel.computer_players();
//!
//! duel.auto_deploy(&mut ai[Player::Player1]).unwrap();
//! duel.auto_deploy(&mut ai[Player::Player2]).unwrap();
//! assert_eq!(duel.phase(), Phase::BeforeTurn(Player::Player1));
//!
//! duel.run_ai_turn(&mut ai[Player::Player1]).unwrap();
//! assert!(!duel.log().is_empty());
//! ```

pub mod ai;
pub mod board;
pub mod core;
pub mod pieces;
pub mod protocol;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Direction, GameError, GameRng, MatchConfig, Player, PlayerMap, Position, Result,
    MISSILE_RANGE, RADAR_RANGE,
};

pub use crate::pieces::{ActionName, Battlefield, Destination, Move, Piece, PieceType};

pub use crate::board::{
    Completion, EffectToken, GameModel, LogEntry, LogKind, PendingEffect, RevealReason, Visibility,
    Visual, WinState,
};

pub use crate::protocol::{GameClient, GameRemote, HotSeat, WireEvent, WireResponse};

pub use crate::ai::Heuristic;

pub use crate::session::{Duel, Phase};
