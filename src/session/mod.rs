//! Match controller for two sides sharing one screen.
//!
//! ## Phases
//!
//! ```text
//! Deploy(P1) -> Deploy(P2) -> BeforeTurn(P1) -> Turn(P1) -> BeforeTurn(P2) -> Turn(P2) -> ...
//!                                                  \                             \
//!                                                   +-----------> GameOver <------+
//! ```
//!
//! `BeforeTurn` is the hand-over screen: the previous player looks away
//! before the next one's board is shown. A turn ends on `end_turn` or
//! when every own piece has moved and used up its actions.
//!
//! ## Deferred effects
//!
//! While any effect is pending, actions and phase changes are refused with
//! `GameError::EffectsPending`. A phase change that became due meanwhile
//! is held and re-evaluated once the last effect is completed.

mod duel;

pub use duel::Duel;

use serde::{Deserialize, Serialize};

use crate::core::Player;

/// Where the match stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Deploy(Player),
    BeforeTurn(Player),
    Turn(Player),
    GameOver,
}

impl Phase {
    /// Side the phase belongs to, if any.
    #[must_use]
    pub const fn player(self) -> Option<Player> {
        match self {
            Phase::Deploy(p) | Phase::BeforeTurn(p) | Phase::Turn(p) => Some(p),
            Phase::GameOver => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Deploy(p) => write!(f, "deploy-{}", p.as_str()),
            Phase::BeforeTurn(p) => write!(f, "before-turn-{}", p.as_str()),
            Phase::Turn(p) => write!(f, "turn-{}", p.as_str()),
            Phase::GameOver => f.write_str("game-over"),
        }
    }
}
