//! Fog of war.
//!
//! A cell is visible to a side when:
//!
//! 1. one of its own pieces covers it (Fighter: adjacent, AEW: radar), or
//! 2. it lies in the side's own half of the board, or
//! 3. it holds an enemy AEW whose radar covers one of the side's pieces.
//!
//! Rule 3 is mutual detection: being painted by a radar gives its
//! position away. Where a radar and a fighter both cover a cell, the
//! radar is reported.

use serde::{Deserialize, Serialize};

use super::GameModel;
use crate::core::{Player, Position};
use crate::pieces::PieceType;
use crate::protocol::{GameEvent, GameRemote, SimplePiece};

/// Why a cell is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealReason {
    /// Covered by one of our Fighters.
    Spotted(PieceType),
    /// Covered by our AEW, described so the opponent can place it if our
    /// radar is painting one of its pieces.
    Aew(SimplePiece),
    /// Our half of the board.
    Territory,
    /// Enemy AEW detected by its own emissions.
    EnemyAew,
}

/// Result of a fog query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Revealed(RevealReason),
}

impl Visibility {
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self, Visibility::Hidden)
    }

    #[must_use]
    pub const fn reason(&self) -> Option<RevealReason> {
        match self {
            Visibility::Hidden => None,
            Visibility::Revealed(reason) => Some(*reason),
        }
    }
}

impl GameModel {
    /// Is `p` in `player`'s half of this board?
    ///
    /// This board is drawn from `self.player()`'s end, so its own half is
    /// the lower one. Rows split at `height / 2` exactly: on odd heights the
    /// middle row counts as the opponent's half, from either side's board.
    #[must_use]
    pub fn is_in_territory(&self, p: Position, player: Player) -> bool {
        if player == self.player() {
            2 * p.y >= self.height()
        } else {
            2 * p.y < self.height()
        }
    }

    /// Fog query for one cell from this side's point of view.
    #[must_use]
    pub fn is_fow(&self, p: Position) -> Visibility {
        let me = self.player();
        let mut spotted = None;
        for piece in self.pieces().filter(|piece| piece.player == me && piece.reveals(p, self)) {
            // radar outranks fighter
            if piece.is_aew() {
                return Visibility::Revealed(RevealReason::Aew(piece.simple()));
            }
            if spotted.is_none() {
                spotted = Some(RevealReason::Spotted(piece.piece_type()));
            }
        }
        if let Some(reason) = spotted {
            return Visibility::Revealed(reason);
        }
        if self.is_in_territory(p, me) {
            return Visibility::Revealed(RevealReason::Territory);
        }
        if let Some(enemy) = self.get_piece(p).filter(|piece| piece.player != me && piece.is_aew()) {
            if self.pieces().any(|own| own.player == me && enemy.reveals(own.position, self)) {
                return Visibility::Revealed(RevealReason::EnemyAew);
            }
        }
        Visibility::Hidden
    }

    /// Is `p` covered by a visible enemy piece? Purely informational.
    #[must_use]
    pub fn is_exposed(&self, p: Position) -> bool {
        let me = self.player();
        self.pieces()
            .filter(|enemy| enemy.player != me)
            .any(|enemy| !self.is_fow(enemy.position).is_hidden() && enemy.reveals(p, self))
    }

    /// Every visible cell, row-major, with its reason.
    ///
    /// A cell under several of our radars is listed once per radar, so
    /// that every AEW painting an enemy piece reaches the opponent.
    #[must_use]
    pub fn revealed_cells(&self) -> Vec<(Position, RevealReason)> {
        let radars = self.find_all_own_piece(|piece| piece.is_aew());
        let mut cells = Vec::new();
        for y in 0..self.height() {
            for x in 0..self.width() {
                let p = Position::new(x, y);
                let before = cells.len();
                cells.extend(
                    radars
                        .iter()
                        .filter(|aew| aew.reveals(p, self))
                        .map(|aew| (p, RevealReason::Aew(aew.simple()))),
                );
                if cells.len() > before {
                    continue;
                }
                if let Visibility::Revealed(reason) = self.is_fow(p) {
                    cells.push((p, reason));
                }
            }
        }
        cells
    }

    /// Tell the opponent what we can see. No-op before the game starts.
    pub fn sync_revealed_cells(&mut self, remote: &mut dyn GameRemote) {
        if !self.game_started() {
            return;
        }
        let cells = self.revealed_cells();
        let client = *self.client();
        client.send_and_handle(self, remote, GameEvent::Reveal { cells });
    }
}
