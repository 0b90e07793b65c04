//! Symmetric event protocol between the two per-side models.
//!
//! Each side's `GameModel` only knows its own pieces for sure. Whenever a
//! model changes something the opponent could notice, it sends an event
//! through a [`GameRemote`]; the opponent's model applies what it is
//! entitled to see and answers with responses that the sender merges back.
//!
//! ## Frames
//!
//! Wire types ([`WireEvent`], [`WireResponse`]) carry plain coordinates in
//! the frame of whoever produced them. The receiving [`GameClient`] rotates
//! them into its own frame, producing the local [`GameEvent`] /
//! [`GameResponse`] types. Only `{x, y}` positions and
//! `{type, player, direction, position}` piece summaries cross the wire;
//! per-turn state such as `moved` or `fired` never does.
//!
//! ## Delivery
//!
//! A [`GameRemote`] decides how events reach the opponent:
//!
//! - [`HotSeat`] delivers to the other model held in the same process
//! - [`Detached`] has no peer at all and answers nothing
//!
//! A networked remote would serialize the same wire types (see [`codec`]).

mod client;
pub mod codec;
mod hotseat;

pub use client::GameClient;
pub use hotseat::{HotSeat, HotSeatRemote};

use serde::{Deserialize, Serialize};

use crate::board::RevealReason;
use crate::core::{Direction, Player, Position};
use crate::pieces::{Piece, PieceType};

/// `{x, y}` as it appears on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimplePosition {
    pub x: i32,
    pub y: i32,
}

impl From<Position> for SimplePosition {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<SimplePosition> for Position {
    fn from(p: SimplePosition) -> Self {
        Position::new(p.x, p.y)
    }
}

/// Opponent-visible piece summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimplePiece {
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub player: Player,
    pub direction: Direction,
    pub position: SimplePosition,
}

/// Event as sent across the boundary, in the sender's frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireEvent {
    /// Every cell the sender can currently see, with the reason.
    Reveal { cells: Vec<(SimplePosition, RevealReason)> },
    Move {
        piece: SimplePiece,
        from: SimplePosition,
        to: SimplePosition,
    },
    Destroy { position: SimplePosition },
    /// Missile flight path, in order.
    Missile {
        positions: Vec<SimplePosition>,
        #[serde(rename = "missileRange")]
        missile_range: i32,
        #[serde(rename = "hasHit")]
        has_hit: bool,
    },
    /// The sender has been eliminated.
    Lose,
}

/// Response as sent back, in the responder's frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireResponse {
    /// The sender may now see this piece.
    Reveal { piece: SimplePiece },
    /// The sender should remove whatever stands here.
    Destroy { position: SimplePosition },
}

/// Event in the local frame of the model handling or emitting it.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Reveal { cells: Vec<(Position, RevealReason)> },
    Move { piece: Piece, from: Position, to: Position },
    Destroy { position: Position },
    Missile {
        positions: Vec<Position>,
        missile_range: i32,
        has_hit: bool,
    },
    Lose,
}

/// Response in the local frame.
#[derive(Clone, Debug, PartialEq)]
pub enum GameResponse {
    Reveal { piece: Piece },
    Destroy { position: Position },
}

/// Delivery of events to the opposing side.
///
/// `send` is synchronous: when it returns, the opponent has applied the
/// event and the returned responses are final. Cancellation does not
/// exist; callers apply whatever comes back.
pub trait GameRemote {
    fn send(&mut self, event: WireEvent) -> Vec<WireResponse>;
}

/// A remote with nobody on the other end.
///
/// Used while a model is not connected yet (deployment), for look-ahead
/// on snapshots, and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct Detached;

impl GameRemote for Detached {
    fn send(&mut self, event: WireEvent) -> Vec<WireResponse> {
        log::trace!("detached remote dropped {event:?}");
        Vec::new()
    }
}

/// Remote that records what it was sent. Handy for tests and tooling.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub sent: Vec<WireEvent>,
}

impl GameRemote for Recorder {
    fn send(&mut self, event: WireEvent) -> Vec<WireResponse> {
        self.sent.push(event);
        Vec::new()
    }
}
