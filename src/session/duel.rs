//! The `Duel` turn controller.

use super::Phase;
use crate::ai::Heuristic;
use crate::board::{EffectToken, GameModel, LogEntry, LogKind, PendingEffect, WinState};
use crate::core::{Direction, GameError, GameRng, MatchConfig, Player, PlayerMap, Position, Result};
use crate::pieces::{ActionName, Destination, Move, Piece, PieceType};
use crate::protocol::{GameRemote, HotSeat};

/// A complete match between two sides on one device.
///
/// Owns both `GameModel`s through a [`HotSeat`] link and composes their
/// primitives into deployment, turns and the end of the game.
#[derive(Clone, Debug)]
pub struct Duel {
    config: MatchConfig,
    link: HotSeat,
    phase: Phase,
    /// Phase change waiting for pending effects.
    held_phase: Option<Phase>,
    undeployed: PlayerMap<Vec<PieceType>>,
    effects: Vec<PendingEffect>,
    log: Vec<LogEntry>,
}

impl Duel {
    /// Start a match at Player1's deployment.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let link = HotSeat::new(config.width, config.height).with_wire_codec(config.wire_codec);
        let undeployed = PlayerMap::new(|_| config.roster.clone());
        let mut duel = Self {
            config,
            link,
            phase: Phase::Deploy(Player::Player1),
            held_phase: None,
            undeployed,
            effects: Vec::new(),
            log: Vec::new(),
        };
        duel.log.push(LogEntry::new(LogKind::State).with("state", duel.phase.to_string()));
        duel.advance_deploy();
        duel
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Phase change that will apply once pending effects are completed.
    #[must_use]
    pub fn held_phase(&self) -> Option<Phase> {
        self.held_phase
    }

    /// `player`'s board.
    #[must_use]
    pub fn model(&self, player: Player) -> &GameModel {
        self.link.model(player)
    }

    /// Both sides' journals, merged in the order they were collected.
    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Pieces `player` still has to place, in order.
    #[must_use]
    pub fn undeployed(&self, player: Player) -> &[PieceType] {
        &self.undeployed[player]
    }

    /// The piece the deploying side places next.
    #[must_use]
    pub fn next_to_deploy(&self) -> Option<Piece> {
        let Phase::Deploy(side) = self.phase else {
            return None;
        };
        self.undeployed[side]
            .first()
            .map(|&piece_type| Piece::new(piece_type, side, Direction::Up))
    }

    #[must_use]
    pub fn pending_effects(&self) -> &[PendingEffect] {
        &self.effects
    }

    /// The side that won, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        Player::ALL.into_iter().find_map(|p| match self.model(p).win_state() {
            Some(WinState::Win) => Some(p),
            Some(WinState::Lose) => Some(p.opponent()),
            None => None,
        })
    }

    // === Deployment ===

    /// Place the next piece of the deploying side at `at` (its own frame).
    /// Returns `false` when the cell is not a legal deployment cell.
    pub fn deploy(&mut self, at: Position) -> Result<bool> {
        let Phase::Deploy(side) = self.phase else {
            return Err(GameError::WrongPhase(self.phase));
        };
        let Some(piece) = self.next_to_deploy() else {
            return Err(GameError::WrongPhase(self.phase));
        };
        if !self.link.model_mut(side).deploy(piece, at) {
            log::debug!("{side}: cannot deploy {} at {at}", piece.name());
            return Ok(false);
        }
        self.undeployed[side].remove(0);
        self.collect(side);
        self.advance_deploy();
        Ok(true)
    }

    /// Let `ai` place the rest of the deploying side's pieces.
    pub fn auto_deploy(&mut self, ai: &mut Heuristic) -> Result<()> {
        let Phase::Deploy(side) = self.phase else {
            return Err(GameError::WrongPhase(self.phase));
        };
        while self.phase == Phase::Deploy(side) {
            let Some(piece) = self.next_to_deploy() else {
                break;
            };
            let Some(at) = ai.deploy(self.model(side), &piece) else {
                log::warn!("{side}: no room left to deploy {}", piece.name());
                break;
            };
            self.deploy(at)?;
        }
        Ok(())
    }

    fn advance_deploy(&mut self) {
        while let Phase::Deploy(side) = self.phase {
            if !self.undeployed[side].is_empty() {
                return;
            }
            match side {
                Player::Player1 => self.set_phase(Phase::Deploy(Player::Player2)),
                Player::Player2 => self.start_game(),
            }
        }
    }

    fn start_game(&mut self) {
        log::info!("both sides deployed, starting the game");
        self.log.push(LogEntry::new(LogKind::GameStart));
        for player in Player::ALL {
            self.link.model_mut(player).start_game();
        }
        self.link.act(Player::Player2, |m, r| m.sync_revealed_cells(r));
        self.collect(Player::Player2);
        self.set_phase(Phase::BeforeTurn(Player::Player1));
    }

    // === Turns ===

    /// Leave the hand-over screen and start the side's turn.
    pub fn begin_turn(&mut self) -> Result<()> {
        let Phase::BeforeTurn(side) = self.phase else {
            return Err(GameError::WrongPhase(self.phase));
        };
        self.ensure_no_effects()?;
        self.link.act(side, |m, r| m.start_turn(r));
        self.set_phase(Phase::Turn(side));
        self.settle(side);
        Ok(())
    }

    /// Move the piece at `from`. Returns `false` when the destination is
    /// not among the piece's possible moves.
    pub fn move_piece(&mut self, from: Position, to: Position, direction: Direction) -> Result<bool> {
        let side = self.acting_side()?;
        let piece = self.own_piece(side, from)?;
        self.execute_move(&Move::new(piece, Destination::new(to, direction)))
    }

    /// Move and act as described by `mv`. Returns `false` when the
    /// destination is not among the piece's possible moves.
    pub fn execute_move(&mut self, mv: &Move) -> Result<bool> {
        let side = self.acting_side()?;
        let piece = self.own_piece(side, mv.piece.position)?;
        if !piece.possible_moves(self.model(side)).contains(&mv.destination) {
            return Ok(false);
        }
        self.run(side, |m, r| m.execute_move(r, mv))?;
        Ok(true)
    }

    pub fn perform_action(&mut self, at: Position, action: ActionName) -> Result<()> {
        let side = self.acting_side()?;
        self.run(side, |m, r| m.perform_action(r, at, action))
    }

    /// The piece at `at` does nothing more this turn.
    pub fn stand_by(&mut self, at: Position) -> Result<()> {
        let side = self.acting_side()?;
        self.run(side, |m, _| m.stand_by(at))
    }

    /// Hand over to the opponent before every piece has acted.
    pub fn end_turn(&mut self) -> Result<()> {
        let side = self.acting_side()?;
        self.set_phase(Phase::BeforeTurn(side.opponent()));
        Ok(())
    }

    /// One computer player per side, each on its own stream forked from
    /// the configured `ai_seed`. Same seed, same AI game.
    #[must_use]
    pub fn computer_players(&self) -> PlayerMap<Heuristic> {
        let mut root = GameRng::new(self.config.ai_seed);
        PlayerMap::new(|_| Heuristic::with_rng(root.fork()))
    }

    /// Play `ai`'s whole turn for the side whose turn it is, completing
    /// every effect along the way.
    pub fn run_ai_turn(&mut self, ai: &mut Heuristic) -> Result<()> {
        let side = match self.phase {
            Phase::BeforeTurn(side) => {
                self.begin_turn()?;
                side
            }
            Phase::Turn(side) => side,
            other => return Err(GameError::WrongPhase(other)),
        };

        while self.phase == Phase::Turn(side) {
            self.resolve_effects()?;
            if self.phase != Phase::Turn(side) {
                break;
            }
            match ai.get_move(self.model(side)) {
                Some(mv) => {
                    if !self.execute_move(&mv)? {
                        self.stand_by(mv.piece.position)?;
                    }
                }
                None => self.end_turn()?,
            }
        }
        Ok(())
    }

    // === Effects ===

    /// The view finished showing the effect: apply its model change.
    pub fn complete_effect(&mut self, token: EffectToken) -> Result<()> {
        let index = self
            .effects
            .iter()
            .position(|e| e.token == token)
            .ok_or(GameError::UnknownEffect(token))?;
        let effect = self.effects.remove(index);
        let acting = self.phase.player().unwrap_or(token.side);

        self.link.act(token.side, |m, r| m.complete_effect(r, effect.completion));
        self.settle(acting);
        Ok(())
    }

    /// Complete every pending effect, oldest first.
    pub fn resolve_effects(&mut self) -> Result<()> {
        while let Some(token) = self.effects.first().map(|e| e.token) {
            self.complete_effect(token)?;
        }
        Ok(())
    }

    // === Internals ===

    fn ensure_no_effects(&self) -> Result<()> {
        if self.effects.is_empty() {
            Ok(())
        } else {
            Err(GameError::EffectsPending(self.effects.len()))
        }
    }

    fn acting_side(&self) -> Result<Player> {
        self.ensure_no_effects()?;
        match self.phase {
            Phase::Turn(side) => Ok(side),
            other => Err(GameError::WrongPhase(other)),
        }
    }

    fn own_piece(&self, side: Player, at: Position) -> Result<Piece> {
        let piece = self.model(side).get_piece(at).copied().ok_or(GameError::NoPiece(at))?;
        if piece.player != side {
            return Err(GameError::NotYourPiece(at));
        }
        Ok(piece)
    }

    /// Run an action for `side`, then settle the consequences.
    fn run<R>(&mut self, side: Player, f: impl FnOnce(&mut GameModel, &mut dyn GameRemote) -> Result<R>) -> Result<R> {
        let out = self.link.act(side, f);
        self.settle(side);
        out
    }

    /// Gather journals and effects, then decide whether the phase moves on.
    fn settle(&mut self, side: Player) {
        self.collect(side);
        if self.phase == Phase::GameOver {
            return;
        }

        let lost = self.link.act(side, |m, r| m.check_win_lose(r));
        self.collect(side);
        let over = lost || Player::ALL.into_iter().any(|p| self.model(p).win_state().is_some());

        let next = if over {
            Some(Phase::GameOver)
        } else if self.phase == Phase::Turn(side) && self.model(side).is_turn_over() {
            Some(Phase::BeforeTurn(side.opponent()))
        } else {
            None
        };

        if self.effects.is_empty() {
            self.held_phase = None;
            if let Some(next) = next {
                self.set_phase(next);
            }
        } else {
            self.held_phase = next;
        }
    }

    /// Move journal entries into the match log and effects into the
    /// pending list. Effects raised on the side that is not `acting`
    /// are completed on the spot when configured to.
    fn collect(&mut self, acting: Player) {
        loop {
            for player in Player::ALL {
                let entries = self.link.model_mut(player).take_journal();
                self.log.extend(entries);
            }

            let mut resolved = false;
            for player in Player::ALL {
                for effect in self.link.model_mut(player).take_effects() {
                    if self.config.auto_resolve_hidden_effects && player != acting {
                        log::debug!("completing off-screen effect {:?}", effect.token);
                        self.link.act(player, |m, r| m.complete_effect(r, effect.completion));
                        resolved = true;
                    } else {
                        self.effects.push(effect);
                    }
                }
            }
            if !resolved {
                break;
            }
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        log::info!("phase {} -> {phase}", self.phase);
        self.phase = phase;
        self.log.push(LogEntry::new(LogKind::State).with("state", phase.to_string()));
    }
}
