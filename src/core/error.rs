//! Engine error type.
//!
//! Illegal placements and moves are not errors: the board primitives
//! answer them with `false`. `GameError` covers controller misuse and
//! broken protocol contracts.

use thiserror::Error;

use crate::board::EffectToken;
use crate::core::Position;
use crate::pieces::{ActionName, PieceType};
use crate::session::Phase;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("{piece} has no action named {action}")]
    UnsupportedAction { action: ActionName, piece: PieceType },

    #[error("no piece at {0}")]
    NoPiece(Position),

    #[error("piece at {0} belongs to the other side")]
    NotYourPiece(Position),

    #[error("not allowed during {0:?}")]
    WrongPhase(Phase),

    #[error("{0} deferred effect(s) still pending")]
    EffectsPending(usize),

    #[error("unknown effect token {0:?}")]
    UnknownEffect(EffectToken),

    #[error("wire codec error: {0}")]
    Codec(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
