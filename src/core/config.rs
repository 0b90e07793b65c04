//! Match configuration.
//!
//! A `MatchConfig` is handed to `Duel::new` and fixes the board size, the
//! forces each side deploys and how the hot-seat link behaves. Gameplay
//! ranges are constants, not configuration.

use serde::{Deserialize, Serialize};

use crate::pieces::PieceType;

/// Cells a Fighter's missile travels along its facing.
pub const MISSILE_RANGE: i32 = 4;

/// Manhattan radius of an AEW's radar.
pub const RADAR_RANGE: i32 = 4;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Board width in cells.
    pub width: i32,

    /// Board height in cells. Each side's territory is its half.
    pub height: i32,

    /// Pieces each side deploys, in deployment order.
    pub roster: Vec<PieceType>,

    /// Root seed of `Duel::computer_players`. Same seed, same AI game.
    pub ai_seed: u64,

    /// Round-trip every hot-seat event and response through the binary
    /// wire codec, exactly as a networked link would.
    pub wire_codec: bool,

    /// Resolve deferred effects raised on the side that is not acting
    /// right away (nobody is watching that board).
    pub auto_resolve_hidden_effects: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            roster: vec![PieceType::Aew, PieceType::Fighter, PieceType::Fighter, PieceType::Fighter],
            ai_seed: 42,
            wire_codec: false,
            auto_resolve_hidden_effects: true,
        }
    }
}

impl MatchConfig {
    /// Set the board size.
    #[must_use]
    pub fn with_board(mut self, width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "Board must have at least one cell");
        self.width = width;
        self.height = height;
        self
    }

    /// Set the pieces each side deploys.
    #[must_use]
    pub fn with_roster(mut self, roster: Vec<PieceType>) -> Self {
        self.roster = roster;
        self
    }

    /// Set the AI seed.
    #[must_use]
    pub fn with_ai_seed(mut self, seed: u64) -> Self {
        self.ai_seed = seed;
        self
    }

    /// Enable or disable the wire codec round-trip.
    #[must_use]
    pub fn with_wire_codec(mut self, enabled: bool) -> Self {
        self.wire_codec = enabled;
        self
    }

    /// Enable or disable immediate resolution of off-screen effects.
    #[must_use]
    pub fn with_auto_resolve_hidden_effects(mut self, enabled: bool) -> Self {
        self.auto_resolve_hidden_effects = enabled;
        self
    }
}
