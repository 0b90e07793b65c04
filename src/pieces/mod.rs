//! Piece variants and their capability table.
//!
//! There are exactly two variants, `Fighter` and `AEW`. A `Piece` is a
//! small `Copy` value; it never points back at the board that holds it.
//! Every capability that depends on the surroundings takes the board
//! explicitly as a [`Battlefield`].
//!
//! ## Capabilities
//!
//! | capability      | Fighter                               | AEW                     |
//! |-----------------|---------------------------------------|-------------------------|
//! | `moves`         | 8 candidates (straight, diagonal, turn) | 4 candidates (forward, turn) |
//! | `actions`       | `fire` until fired this turn          | none                    |
//! | `reveals`       | adjacent cells                        | radar radius 4          |
//! | `kill_moves`    | crashes and missile shots             | none                    |
//! | `can_deploy`    | back two rows                         | back row                |

mod aew;
mod fighter;

pub use fighter::MissilePath;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, Player, Position};
use crate::protocol::{SimplePiece, SimplePosition};

/// Read access to a board, as needed by piece rules.
pub trait Battlefield {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// The piece at `p`, `None` when empty or out of bounds.
    fn get_piece(&self, p: Position) -> Option<&Piece>;
}

/// Opponent-visible piece tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Fighter,
    #[serde(rename = "AEW")]
    Aew,
}

impl PieceType {
    /// Name used in logs and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PieceType::Fighter => "Fighter",
            PieceType::Aew => "AEW",
        }
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant with its private per-turn state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Fighter { fired: bool },
    Aew,
}

/// Special action a piece may take after moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionName {
    Fire,
}

impl ActionName {
    /// Localisation key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionName::Fire => "fire",
        }
    }

    /// Menu icon for the view layer.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            ActionName::Fire => "big-red-button.jpg",
        }
    }
}

impl std::fmt::Display for ActionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a move ends and which way the piece faces afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Destination {
    pub position: Position,
    pub direction: Direction,
}

impl Destination {
    #[must_use]
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self { position, direction }
    }
}

/// Candidate list. No variant has more than eight.
pub type Destinations = SmallVec<[Destination; 8]>;

/// A unit on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
    pub direction: Direction,
    /// Mirrors the board slot while the piece is placed.
    pub position: Position,
    /// Has acted this turn.
    pub moved: bool,
}

impl Piece {
    /// Create an unplaced piece.
    #[must_use]
    pub const fn new(piece_type: PieceType, player: Player, direction: Direction) -> Self {
        let kind = match piece_type {
            PieceType::Fighter => PieceKind::Fighter { fired: false },
            PieceType::Aew => PieceKind::Aew,
        };
        Self {
            kind,
            player,
            direction,
            position: Position::UNPLACED,
            moved: false,
        }
    }

    #[must_use]
    pub const fn fighter(player: Player, direction: Direction) -> Self {
        Self::new(PieceType::Fighter, player, direction)
    }

    #[must_use]
    pub const fn aew(player: Player, direction: Direction) -> Self {
        Self::new(PieceType::Aew, player, direction)
    }

    /// Same piece, standing at `position`.
    #[must_use]
    pub const fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn piece_type(&self) -> PieceType {
        match self.kind {
            PieceKind::Fighter { .. } => PieceType::Fighter,
            PieceKind::Aew => PieceType::Aew,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.piece_type().as_str()
    }

    #[must_use]
    pub const fn is_aew(&self) -> bool {
        matches!(self.kind, PieceKind::Aew)
    }

    /// Whether a Fighter already fired this turn. Always false for AEWs.
    #[must_use]
    pub const fn fired(&self) -> bool {
        matches!(self.kind, PieceKind::Fighter { fired: true })
    }

    pub(crate) fn set_fired(&mut self, value: bool) {
        if let PieceKind::Fighter { fired } = &mut self.kind {
            *fired = value;
        }
    }

    /// Legal destinations from the current position and facing.
    ///
    /// A destination is legal when it is on the board and either empty,
    /// the piece's own cell, or held by an enemy (a crash).
    #[must_use]
    pub fn moves(&self, field: &impl Battlefield) -> Destinations {
        let candidates: Destinations = match self.kind {
            PieceKind::Fighter { .. } => fighter::candidates(self).into_iter().collect(),
            PieceKind::Aew => aew::candidates(self).into_iter().collect(),
        };
        candidates
            .into_iter()
            .filter(|d| self.can_enter(d.position, field))
            .collect()
    }

    /// `moves`, or nothing once the piece has acted this turn.
    #[must_use]
    pub fn possible_moves(&self, field: &impl Battlefield) -> Destinations {
        if self.moved {
            Destinations::new()
        } else {
            self.moves(field)
        }
    }

    fn can_enter(&self, p: Position, field: &impl Battlefield) -> bool {
        if p.is_out_of_bound(field.width(), field.height()) {
            return false;
        }
        match field.get_piece(p) {
            None => true,
            Some(other) => p == self.position || other.player != self.player,
        }
    }

    /// Post-move actions currently available, in menu order.
    #[must_use]
    pub fn actions(&self) -> SmallVec<[ActionName; 1]> {
        let mut actions = SmallVec::new();
        if let PieceKind::Fighter { fired: false } = self.kind {
            actions.push(ActionName::Fire);
        }
        actions
    }

    #[must_use]
    pub fn has_action(&self, action: ActionName) -> bool {
        self.actions().contains(&action)
    }

    /// Moved and nothing left to do this turn.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.moved && self.actions().is_empty()
    }

    /// Reset per-turn state. A piece with no legal move counts as having
    /// acted already.
    pub fn begin_turn(&mut self, field: &impl Battlefield) {
        self.moved = self.moves(field).is_empty();
        self.set_fired(false);
    }

    /// Does this piece's sensor footprint cover `p`?
    #[must_use]
    pub fn reveals(&self, p: Position, field: &impl Battlefield) -> bool {
        if p.is_out_of_bound(field.width(), field.height()) {
            return false;
        }
        let range = match self.kind {
            PieceKind::Fighter { .. } => 1,
            PieceKind::Aew => crate::core::RADAR_RANGE,
        };
        p.distance(self.position) <= range
    }

    /// Moves that destroy an enemy this turn, by crashing into it or by
    /// firing from the landing cell.
    #[must_use]
    pub fn kill_moves(&self, field: &impl Battlefield) -> Vec<Move> {
        match self.kind {
            PieceKind::Fighter { .. } => fighter::kill_moves(self, field),
            PieceKind::Aew => Vec::new(),
        }
    }

    /// May this piece be deployed at `p` (ignoring occupancy)?
    #[must_use]
    pub fn can_deploy(&self, p: Position, field: &impl Battlefield) -> bool {
        if p.is_out_of_bound(field.width(), field.height()) {
            return false;
        }
        let rows = match self.kind {
            PieceKind::Fighter { .. } => 2,
            PieceKind::Aew => 1,
        };
        p.y >= field.height() - rows
    }

    /// The legal move that brings this piece closest to `target`, facing
    /// it on ties. `None` once the piece has acted.
    #[must_use]
    pub fn move_towards(&self, target: Position, field: &impl Battlefield) -> Option<Destination> {
        self.possible_moves(field).into_iter().min_by(|a, b| {
            let da = a.position.heading_distance(target, a.direction);
            let db = b.position.heading_distance(target, b.direction);
            da.total_cmp(&db)
        })
    }

    /// Wire summary. Per-turn state stays private.
    #[must_use]
    pub fn simple(&self) -> SimplePiece {
        SimplePiece {
            piece_type: self.piece_type(),
            player: self.player,
            direction: self.direction,
            position: SimplePosition::from(self.position),
        }
    }

    /// Rebuild a piece from its wire summary, with fresh per-turn state.
    #[must_use]
    pub fn from_simple(simple: &SimplePiece) -> Self {
        Self::new(simple.piece_type, simple.player, simple.direction).at(simple.position.into())
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.direction, self.name(), self.position)
    }
}

/// A complete turn for one piece: where it goes and what it does there.
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    /// The piece as it stood when the move was planned.
    pub piece: Piece,
    pub destination: Destination,
    /// Actions performed after landing, in order.
    pub actions: SmallVec<[ActionName; 2]>,
    /// Enemy this move is expected to destroy.
    pub kill_target: Option<Piece>,
    /// AI tie-break weight; higher is preferred.
    pub priority: i32,
}

impl Move {
    #[must_use]
    pub fn new(piece: Piece, destination: Destination) -> Self {
        Self {
            piece,
            destination,
            actions: SmallVec::new(),
            kill_target: None,
            priority: 0,
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: &[ActionName]) -> Self {
        self.actions = SmallVec::from_slice(actions);
        self
    }

    #[must_use]
    pub fn with_kill(mut self, target: Piece) -> Self {
        self.kill_target = Some(target);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}
