//! Protocol endpoint owned by each `GameModel`.

use crate::board::{flight_path, Completion, GameModel, RevealReason, Visual, WinState};
use crate::core::Position;
use crate::pieces::Piece;

use super::{GameEvent, GameRemote, GameResponse, SimplePiece, SimplePosition, WireEvent, WireResponse};

/// Frame conversion and event handling for one side.
///
/// Both players' boards are the same grid turned by 180 degrees, so
/// converting from the opponent's frame is a point reflection plus a
/// reversed facing. Converting towards the wire is the identity: the
/// receiver always does the rotating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameClient {
    width: i32,
    height: i32,
}

impl GameClient {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    // === Frame conversion ===

    /// Opponent-frame coordinate to local.
    #[must_use]
    pub fn translate_position(&self, p: SimplePosition) -> Position {
        Position::from(p).rotate(self.width, self.height)
    }

    /// Opponent-frame piece summary to a local piece with fresh turn state.
    #[must_use]
    pub fn translate_piece(&self, piece: &SimplePiece) -> Piece {
        let local = SimplePiece {
            direction: piece.direction.backward(),
            position: self.translate_position(piece.position).into(),
            ..*piece
        };
        Piece::from_simple(&local)
    }

    #[must_use]
    pub fn translate_event(&self, event: WireEvent) -> GameEvent {
        match event {
            WireEvent::Reveal { cells } => GameEvent::Reveal {
                cells: cells
                    .into_iter()
                    .map(|(p, reason)| {
                        let reason = match reason {
                            RevealReason::Aew(aew) => RevealReason::Aew(self.translate_piece(&aew).simple()),
                            other => other,
                        };
                        (self.translate_position(p), reason)
                    })
                    .collect(),
            },
            WireEvent::Move { piece, from, to } => GameEvent::Move {
                piece: self.translate_piece(&piece),
                from: self.translate_position(from),
                to: self.translate_position(to),
            },
            WireEvent::Destroy { position } => GameEvent::Destroy {
                position: self.translate_position(position),
            },
            WireEvent::Missile {
                positions,
                missile_range,
                has_hit,
            } => GameEvent::Missile {
                positions: positions.into_iter().map(|p| self.translate_position(p)).collect(),
                missile_range,
                has_hit,
            },
            WireEvent::Lose => GameEvent::Lose,
        }
    }

    #[must_use]
    pub fn simplify_event(&self, event: GameEvent) -> WireEvent {
        match event {
            GameEvent::Reveal { cells } => WireEvent::Reveal {
                cells: cells.into_iter().map(|(p, reason)| (p.into(), reason)).collect(),
            },
            GameEvent::Move { piece, from, to } => WireEvent::Move {
                piece: piece.simple(),
                from: from.into(),
                to: to.into(),
            },
            GameEvent::Destroy { position } => WireEvent::Destroy {
                position: position.into(),
            },
            GameEvent::Missile {
                positions,
                missile_range,
                has_hit,
            } => WireEvent::Missile {
                positions: positions.into_iter().map(SimplePosition::from).collect(),
                missile_range,
                has_hit,
            },
            GameEvent::Lose => WireEvent::Lose,
        }
    }

    #[must_use]
    pub fn translate(&self, responses: Vec<WireResponse>) -> Vec<GameResponse> {
        responses
            .into_iter()
            .map(|response| match response {
                WireResponse::Reveal { piece } => GameResponse::Reveal {
                    piece: self.translate_piece(&piece),
                },
                WireResponse::Destroy { position } => GameResponse::Destroy {
                    position: self.translate_position(position),
                },
            })
            .collect()
    }

    #[must_use]
    pub fn simplify(&self, responses: Vec<GameResponse>) -> Vec<WireResponse> {
        responses
            .into_iter()
            .map(|response| match response {
                GameResponse::Reveal { piece } => WireResponse::Reveal { piece: piece.simple() },
                GameResponse::Destroy { position } => WireResponse::Destroy {
                    position: position.into(),
                },
            })
            .collect()
    }

    // === Receiving side ===

    /// Apply an inbound event to `game` and answer it.
    ///
    /// `remote` addresses the event's sender; anything `game` sends while
    /// handling goes there.
    pub fn handle(&self, game: &mut GameModel, remote: &mut dyn GameRemote, event: WireEvent) -> Vec<WireResponse> {
        let event = self.translate_event(event);
        log::trace!("{} handles {event:?}", game.player());
        let mut responses = Vec::new();

        match event {
            GameEvent::Reveal { cells } => {
                for (cell, reason) in cells {
                    let Some(&piece) = game.get_piece(cell) else {
                        continue;
                    };
                    if piece.player != game.player() {
                        continue;
                    }
                    let response = GameResponse::Reveal { piece };
                    if !responses.contains(&response) {
                        responses.push(response);
                    }
                    // the AEW that sees us is within radar range of us too
                    if let RevealReason::Aew(aew) = reason {
                        let aew = Piece::from_simple(&aew);
                        game.add_piece(aew, aew.position);
                    }
                }
            }
            GameEvent::Move { piece, from, to } => {
                game.remove_piece(from);
                if !game.is_fow(to).is_hidden() {
                    match game.get_piece(to).copied() {
                        None => {
                            game.add_piece(piece, to);
                            let board: &GameModel = game;
                            for aew in board.find_all_own_piece(|p| p.is_aew() && p.reveals(to, board)) {
                                responses.push(GameResponse::Reveal { piece: aew });
                            }
                        }
                        Some(own) if own.player == game.player() => {
                            log::debug!("{} crashed into {own}", piece);
                            game.shot_down(remote, to);
                            responses.push(GameResponse::Destroy { position: to });
                            responses.push(GameResponse::Destroy { position: from });
                        }
                        Some(_) => {}
                    }
                }
            }
            GameEvent::Destroy { position } => {
                game.shot_down(remote, position);
            }
            GameEvent::Missile {
                positions,
                missile_range,
                has_hit,
            } => {
                if let (Some(&first), Some(&last)) = (positions.first(), positions.last()) {
                    let impact = positions.iter().copied().find(|&p| game.get_piece(p).is_some());
                    if let Some(position) = impact {
                        responses.push(GameResponse::Destroy { position });
                    }
                    let end = impact.unwrap_or(last);
                    game.push_effect(
                        Visual::Missile {
                            from: first,
                            to: end,
                            cells: flight_path(&positions, end),
                            hit: has_hit || impact.is_some(),
                            range: missile_range,
                        },
                        Completion::Clear(end),
                    );
                }
            }
            GameEvent::Lose => {
                game.set_win_state(WinState::Win);
            }
        }

        self.simplify(responses)
    }

    // === Sending side ===

    /// Send an event and translate the answer, without applying it.
    pub fn send(&self, game: &GameModel, remote: &mut dyn GameRemote, event: GameEvent) -> Vec<GameResponse> {
        log::trace!("{} sends {event:?}", game.player());
        self.translate(remote.send(self.simplify_event(event)))
    }

    /// Send an event and apply the answer to `game`.
    pub fn send_and_handle(&self, game: &mut GameModel, remote: &mut dyn GameRemote, event: GameEvent) -> Vec<GameResponse> {
        let responses = self.send(game, remote, event);
        self.handle_responses(game, &responses);
        responses
    }

    /// `Reveal` places the piece, `Destroy` clears the cell.
    pub fn handle_responses(&self, game: &mut GameModel, responses: &[GameResponse]) {
        for response in responses {
            match *response {
                GameResponse::Reveal { piece } => {
                    game.add_piece(piece, piece.position);
                }
                GameResponse::Destroy { position } => {
                    game.remove_piece(position);
                }
            }
        }
    }
}
