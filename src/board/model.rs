//! One side's view of the battlefield.
//!
//! ## Ownership
//!
//! A `GameModel` is owned by a single controller and mutated in place.
//! Observers that need a frozen board take a [`GameModel::snapshot`]; the
//! grid is an `im::Vector`, so a snapshot shares structure with the live
//! board and costs O(1) until either side changes.
//!
//! Every mutation bumps [`GameModel::generation`], so holders of a
//! snapshot can tell whether it is stale.
//!
//! ## Protocol
//!
//! Mutators that the opponent could notice take the `GameRemote`
//! addressing the opponent and announce themselves through it. The
//! plain grid primitives (`add_piece`, `remove_piece`) never do.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::effects::{flight_path, Completion, EffectToken, PendingEffect, Visual};
use super::journal::{LogEntry, LogKind};
use crate::core::{Direction, GameError, Player, Position, Result, MISSILE_RANGE};
use crate::pieces::{ActionName, Battlefield, Move, Piece};
use crate::protocol::{GameClient, GameEvent, GameRemote, GameResponse};

/// Outcome from this side's point of view. Once set, never cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinState {
    Win,
    Lose,
}

/// Board state as believed by one side.
#[derive(Clone, Debug)]
pub struct GameModel {
    width: i32,
    height: i32,
    player: Player,

    /// Row-major, `y * width + x`.
    grid: Vector<Option<Piece>>,

    client: GameClient,
    win_state: Option<WinState>,
    game_started: bool,
    generation: u64,

    journal: Vec<LogEntry>,
    effects: Vec<PendingEffect>,
    next_effect: u64,
}

impl GameModel {
    /// Create an empty board seen from `player`'s end.
    #[must_use]
    pub fn new(width: i32, height: i32, player: Player) -> Self {
        assert!(width > 0 && height > 0, "Board must have at least one cell");
        let cells = (width * height) as usize;
        Self {
            width,
            height,
            player,
            grid: std::iter::repeat(None).take(cells).collect(),
            client: GameClient::new(width, height),
            win_state: None,
            game_started: false,
            generation: 0,
            journal: Vec::new(),
            effects: Vec::new(),
            next_effect: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whose view this is.
    #[must_use]
    pub fn player(&self) -> Player {
        self.player
    }

    #[must_use]
    pub fn client(&self) -> &GameClient {
        &self.client
    }

    #[must_use]
    pub fn win_state(&self) -> Option<WinState> {
        self.win_state
    }

    #[must_use]
    pub fn game_started(&self) -> bool {
        self.game_started
    }

    /// Mutation counter.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Frozen copy for look-ahead or rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameModel {
        self.clone()
    }

    // === Queries ===

    fn index(&self, p: Position) -> Option<usize> {
        if p.is_out_of_bound(self.width, self.height) {
            None
        } else {
            Some((p.y * self.width + p.x) as usize)
        }
    }

    /// The piece at `p`; `None` for empty or out-of-bounds cells.
    #[must_use]
    pub fn get_piece(&self, p: Position) -> Option<&Piece> {
        self.index(p).and_then(|i| self.grid.get(i)).and_then(Option::as_ref)
    }

    /// All pieces on this board, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten()
    }

    /// First own piece (row-major) matching `pred`.
    pub fn find_own_piece(&self, pred: impl Fn(&Piece) -> bool) -> Option<&Piece> {
        self.pieces().find(|p| p.player == self.player && pred(*p))
    }

    pub fn find_all_own_piece(&self, pred: impl Fn(&Piece) -> bool) -> Vec<Piece> {
        self.pieces()
            .filter(|p| p.player == self.player && pred(*p))
            .copied()
            .collect()
    }

    /// Known enemy pieces matching `pred`.
    pub fn find_all_enemy_piece(&self, pred: impl Fn(&Piece) -> bool) -> Vec<Piece> {
        self.pieces()
            .filter(|p| p.player != self.player && pred(*p))
            .copied()
            .collect()
    }

    /// Empty cell the piece's deployment rows allow.
    #[must_use]
    pub fn is_deployable(&self, piece: &Piece, p: Position) -> bool {
        self.get_piece(p).is_none() && piece.can_deploy(p, self)
    }

    /// Every own piece has moved and has no action left.
    #[must_use]
    pub fn is_turn_over(&self) -> bool {
        self.pieces().filter(|p| p.player == self.player).all(Piece::is_done)
    }

    fn own_piece(&self, at: Position) -> Result<Piece> {
        let piece = self.get_piece(at).copied().ok_or(GameError::NoPiece(at))?;
        if piece.player != self.player {
            return Err(GameError::NotYourPiece(at));
        }
        Ok(piece)
    }

    // === Grid primitives ===

    /// Place `piece` at `p`. Fails on out-of-bounds or occupied cells.
    pub fn add_piece(&mut self, mut piece: Piece, p: Position) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        if self.grid[i].is_some() {
            return false;
        }
        piece.position = p;
        self.grid.set(i, Some(piece));
        self.generation += 1;
        true
    }

    /// Clear `p`. Fails on out-of-bounds or empty cells.
    pub fn remove_piece(&mut self, p: Position) -> bool {
        self.take_piece(p).is_some()
    }

    fn take_piece(&mut self, p: Position) -> Option<Piece> {
        let i = self.index(p)?;
        let piece = self.grid[i]?;
        self.grid.set(i, None);
        self.generation += 1;
        Some(piece)
    }

    fn update_piece(&mut self, p: Position, f: impl FnOnce(&mut Piece)) {
        if let Some(i) = self.index(p) {
            if let Some(Some(piece)) = self.grid.get_mut(i) {
                f(piece);
                self.generation += 1;
            }
        }
    }

    // === Lifecycle ===

    /// Validated placement during deployment.
    pub fn deploy(&mut self, piece: Piece, p: Position) -> bool {
        if !self.is_deployable(&piece, p) || !self.add_piece(piece, p) {
            return false;
        }
        self.record(
            LogEntry::new(LogKind::Deploy)
                .with("piece", piece.piece_type())
                .with("player", piece.player)
                .with_position("x", "y", p),
        );
        true
    }

    pub fn start_game(&mut self) {
        self.game_started = true;
        self.generation += 1;
    }

    /// Reset every piece's turn state, then tell the opponent what we see.
    pub fn start_turn(&mut self, remote: &mut dyn GameRemote) {
        let positions: Vec<Position> = self.pieces().map(|p| p.position).collect();
        for p in positions {
            if let Some(mut piece) = self.get_piece(p).copied() {
                piece.begin_turn(&*self);
                self.update_piece(p, |slot| *slot = piece);
            }
        }
        self.sync_revealed_cells(remote);
    }

    /// Lose when no own non-AEW piece is left. Returns whether the game is
    /// over for this side; once it is, later calls change nothing.
    pub fn check_win_lose(&mut self, remote: &mut dyn GameRemote) -> bool {
        if self.win_state.is_some() {
            return true;
        }
        if self.pieces().any(|p| p.player == self.player && !p.is_aew()) {
            return false;
        }
        self.set_win_state(WinState::Lose);
        self.record(LogEntry::new(LogKind::Lose).with("player", self.player));
        let client = self.client;
        client.send_and_handle(self, remote, GameEvent::Lose);
        true
    }

    pub(crate) fn set_win_state(&mut self, state: WinState) {
        if self.win_state.is_none() {
            self.win_state = Some(state);
            self.generation += 1;
        }
    }

    // === Gameplay mutators ===

    /// Move the piece at `from` to `to`, facing `direction`, and announce
    /// it. Does not check the move against `Piece::moves`.
    ///
    /// Returns whether the piece was re-placed; it is not when `to` holds
    /// a known enemy, in which case the move is a crash and the opponent's
    /// answer settles both pieces. A move off the board or onto another
    /// own piece is refused before anything changes.
    pub fn move_piece(&mut self, remote: &mut dyn GameRemote, from: Position, to: Position, direction: Direction) -> bool {
        if to.is_out_of_bound(self.width, self.height) {
            return false;
        }
        if to != from && matches!(self.get_piece(to), Some(p) if p.player == self.player) {
            return false;
        }
        let Some(mut piece) = self.take_piece(from) else {
            return false;
        };
        piece.direction = direction;
        piece.moved = true;
        let placed = self.add_piece(piece, to);

        let client = self.client;
        client.send_and_handle(self, remote, GameEvent::Move {
            piece: piece.at(to),
            from,
            to,
        });
        self.sync_revealed_cells(remote);
        placed
    }

    /// Destroy the piece at `p` and announce it.
    pub fn shot_down(&mut self, remote: &mut dyn GameRemote, p: Position) -> bool {
        let Some(piece) = self.take_piece(p) else {
            return false;
        };
        self.record(
            LogEntry::new(LogKind::ShotDown)
                .with("piece", piece.piece_type())
                .with("player", piece.player)
                .with_position("x", "y", p),
        );
        let client = self.client;
        client.send_and_handle(self, remote, GameEvent::Destroy { position: p });
        self.sync_revealed_cells(remote);
        self.check_win_lose(remote);
        true
    }

    /// Move, then perform the move's actions from the landing cell.
    ///
    /// Actions are checked against the piece before anything changes.
    pub fn execute_move(&mut self, remote: &mut dyn GameRemote, mv: &Move) -> Result<()> {
        let from = mv.piece.position;
        let piece = self.own_piece(from)?;
        if let Some(&action) = mv.actions.iter().find(|&&a| !piece.has_action(a)) {
            return Err(GameError::UnsupportedAction {
                action,
                piece: piece.piece_type(),
            });
        }

        let to = mv.destination.position;
        self.record(
            LogEntry::new(LogKind::Move)
                .with("piece", piece.piece_type())
                .with_position("x", "y", from)
                .with_position("toX", "toY", to),
        );
        self.move_piece(remote, from, to, mv.destination.direction);
        if !matches!(self.get_piece(to), Some(p) if p.player == self.player) {
            log::debug!("[{}] {} crashed at {to}, actions dropped", self.player.as_str(), piece.name());
            return Ok(());
        }
        for &action in &mv.actions {
            self.perform_action(remote, to, action)?;
        }
        Ok(())
    }

    /// Run a named post-move action of the piece at `at`.
    pub fn perform_action(&mut self, remote: &mut dyn GameRemote, at: Position, action: ActionName) -> Result<()> {
        match action {
            ActionName::Fire => self.fire(remote, at),
        }
    }

    /// Fire the Fighter at `at` along its facing.
    ///
    /// The missile event goes out right away; removing the target waits
    /// for the queued effect to be completed.
    pub fn fire(&mut self, remote: &mut dyn GameRemote, at: Position) -> Result<()> {
        let piece = self.own_piece(at)?;
        if !piece.has_action(ActionName::Fire) {
            return Err(GameError::UnsupportedAction {
                action: ActionName::Fire,
                piece: piece.piece_type(),
            });
        }
        self.record(
            LogEntry::new(LogKind::Fire)
                .with("piece", piece.piece_type())
                .with_position("x", "y", at),
        );

        let path = piece.missile_path(&*self);
        let client = self.client;
        let responses = client.send(self, remote, GameEvent::Missile {
            positions: path.cells.to_vec(),
            missile_range: MISSILE_RANGE,
            has_hit: path.hit,
        });
        self.update_piece(at, |p| {
            p.moved = true;
            p.set_fired(true);
        });

        let confirmed = responses.iter().find_map(|r| match *r {
            GameResponse::Destroy { position } => Some(position),
            GameResponse::Reveal { .. } => None,
        });
        if let Some(to) = confirmed.or_else(|| path.cells.last().copied()) {
            self.push_effect(
                Visual::Missile {
                    from: at,
                    to,
                    cells: flight_path(&path.cells, to),
                    hit: path.hit || confirmed.is_some(),
                    range: MISSILE_RANGE,
                },
                Completion::ShotDown(to),
            );
        }
        Ok(())
    }

    /// Forfeit the piece's remaining move and actions this turn.
    pub fn stand_by(&mut self, at: Position) -> Result<()> {
        let piece = self.own_piece(at)?;
        self.update_piece(at, |p| {
            p.moved = true;
            p.set_fired(true);
        });
        self.record(
            LogEntry::new(LogKind::StandBy)
                .with("piece", piece.piece_type())
                .with_position("x", "y", at),
        );
        Ok(())
    }

    // === Journal and deferred effects ===

    fn record(&mut self, entry: LogEntry) {
        log::debug!("[{}] {entry}", self.player.as_str());
        self.journal.push(entry);
    }

    /// Drain journal entries recorded since the last call.
    pub fn take_journal(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.journal)
    }

    pub(crate) fn push_effect(&mut self, visual: Visual, completion: Completion) -> EffectToken {
        let token = EffectToken {
            side: self.player,
            seq: self.next_effect,
        };
        self.next_effect += 1;
        log::debug!("[{}] effect {token:?} queued: {visual:?} then {completion:?}", self.player.as_str());
        self.effects.push(PendingEffect {
            token,
            visual,
            completion,
        });
        token
    }

    /// Drain effects queued since the last call. The caller must complete
    /// each one exactly once.
    pub fn take_effects(&mut self) -> Vec<PendingEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Apply the model change a finished effect was holding back.
    pub fn complete_effect(&mut self, remote: &mut dyn GameRemote, completion: Completion) {
        match completion {
            Completion::ShotDown(p) => {
                self.shot_down(remote, p);
            }
            Completion::Clear(p) => {
                self.remove_piece(p);
                self.sync_revealed_cells(remote);
                self.check_win_lose(remote);
            }
        }
    }
}

impl Battlefield for GameModel {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn get_piece(&self, p: Position) -> Option<&Piece> {
        GameModel::get_piece(self, p)
    }
}
