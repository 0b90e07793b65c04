//! Greedy one-ply opponent.

use crate::board::GameModel;
use crate::core::{GameRng, Position};
use crate::pieces::{Move, Piece};

/// Rule-based move picker. All ties are broken by a seeded RNG, so a
/// given seed replays the same game.
#[derive(Clone, Debug)]
pub struct Heuristic {
    rng: GameRng,
}

impl Heuristic {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    #[must_use]
    pub fn with_rng(rng: GameRng) -> Self {
        Self { rng }
    }

    /// How urgent it is to destroy `piece`.
    #[must_use]
    pub fn threat(&self, piece: &Piece, game: &GameModel) -> i32 {
        if !piece.kill_moves(game).is_empty() {
            100
        } else if piece.is_aew() {
            2
        } else {
            1
        }
    }

    /// Average of the hidden cells, or the board centre when nothing is
    /// hidden.
    #[must_use]
    pub fn fow_mass_center(&self, game: &GameModel) -> Position {
        let mut sum = Position::new(0, 0);
        let mut count = 0;
        for y in 0..game.height() {
            for x in 0..game.width() {
                let p = Position::new(x, y);
                if game.is_fow(p).is_hidden() {
                    sum = sum.add(p);
                    count += 1;
                }
            }
        }
        if count == 0 {
            Position::new(game.width() / 2, game.height() / 2)
        } else {
            Position::new(sum.x / count, sum.y / count)
        }
    }

    /// Next move for `game.player()`, `None` once nothing is left to move.
    ///
    /// In order of preference: a kill on the most threatening target, an
    /// AEW heading into the fog, a fighter closing on the nearest known
    /// enemy, a fighter heading into the fog.
    pub fn get_move(&mut self, game: &GameModel) -> Option<Move> {
        let kills: Vec<Move> = game
            .find_all_own_piece(|p| !p.is_aew() && !p.fired())
            .iter()
            .flat_map(|fighter| fighter.kill_moves(game))
            .collect();
        if !kills.is_empty() {
            let scored: Vec<(i32, Move)> = kills
                .into_iter()
                .map(|m| (m.kill_target.map_or(0, |t| self.threat(&t, game)), m))
                .collect();
            let best = scored.iter().map(|(threat, _)| *threat).max().unwrap_or(0);
            let top: Vec<Move> = scored
                .into_iter()
                .filter(|(threat, _)| *threat == best)
                .map(|(_, m)| m)
                .collect();
            log::debug!("{}: {} kill move(s) at threat {best}", game.player(), top.len());
            return self.rng.choose(&top).cloned();
        }

        let aews = game.find_all_own_piece(|p| p.is_aew() && !p.moved);
        if !aews.is_empty() {
            let center = self.fow_mass_center(game);
            let moves = Self::towards(game, &aews, |_| center);
            if !moves.is_empty() {
                return self.rng.choose(&moves).cloned();
            }
        }

        let fighters = game.find_all_own_piece(|p| !p.is_aew() && !p.moved);
        if fighters.is_empty() {
            return None;
        }
        let enemies = game.find_all_enemy_piece(|_| true);
        let moves = if enemies.is_empty() {
            let center = self.fow_mass_center(game);
            Self::towards(game, &fighters, |_| center)
        } else {
            Self::towards(game, &fighters, |fighter| {
                enemies
                    .iter()
                    .min_by_key(|enemy| fighter.position.distance(enemy.position))
                    .map_or(fighter.position, |enemy| enemy.position)
            })
        };
        self.rng.choose(&moves).cloned()
    }

    fn towards(game: &GameModel, pieces: &[Piece], target: impl Fn(&Piece) -> Position) -> Vec<Move> {
        pieces
            .iter()
            .filter_map(|piece| piece.move_towards(target(piece), game).map(|dest| Move::new(*piece, dest)))
            .collect()
    }

    /// Random legal deployment cell for `piece`.
    pub fn deploy(&mut self, game: &GameModel, piece: &Piece) -> Option<Position> {
        let mut cells = Vec::new();
        for y in 0..game.height() {
            for x in 0..game.width() {
                let p = Position::new(x, y);
                if game.is_deployable(piece, p) {
                    cells.push(p);
                }
            }
        }
        self.rng.choose(&cells).copied()
    }
}
