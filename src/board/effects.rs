//! Deferred effects.
//!
//! Some outcomes are shown before they happen: a missile flies, then the
//! target disappears. The model applies what it can immediately and queues
//! a `PendingEffect` describing the visual and the model change to run
//! once the view reports the visual finished. Until every pending effect
//! is completed the board is knowingly inconsistent and the controller
//! must not accept new actions.

use crate::core::{Player, Position};

/// Handle for a queued effect, unique per match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectToken {
    /// Model that queued the effect and must complete it.
    pub side: Player,
    pub seq: u64,
}

/// What the view should play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visual {
    Missile {
        from: Position,
        to: Position,
        /// Cells crossed, ending at `to`.
        cells: Vec<Position>,
        /// Ends in an explosion.
        hit: bool,
        /// Full range, so the view can scale flight time by `cells.len()`.
        range: i32,
    },
}

/// Model change to apply when the visual ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Shoot down whatever is at the position (announced to the opponent).
    ShotDown(Position),
    /// Silently clear the cell, then resync fog and re-check the outcome.
    Clear(Position),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEffect {
    pub token: EffectToken,
    pub visual: Visual,
    pub completion: Completion,
}

/// The part of `cells` a missile crosses before stopping at `end`.
pub(crate) fn flight_path(cells: &[Position], end: Position) -> Vec<Position> {
    match cells.iter().position(|&p| p == end) {
        Some(i) => cells[..=i].to_vec(),
        None => cells.to_vec(),
    }
}
