//! Benchmarks for fog-of-war queries and computer turns.
//!
//! `revealed_cells` runs after every move and every destroyed piece, so it
//! is the hot path of a hot-seat game.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use ace_fighter::board::GameModel;
use ace_fighter::core::{Direction, MatchConfig, Player, Position};
use ace_fighter::pieces::Piece;
use ace_fighter::session::Duel;

/// A full board: both sides' default forces, as Player1 sees them.
fn crowded_board() -> GameModel {
    let mut game = GameModel::new(10, 10, Player::Player1);
    game.add_piece(Piece::aew(Player::Player1, Direction::Up), Position::new(5, 6));
    for x in [1, 4, 8] {
        game.add_piece(Piece::fighter(Player::Player1, Direction::Up), Position::new(x, 7));
    }
    game.add_piece(Piece::aew(Player::Player2, Direction::Down), Position::new(4, 2));
    for x in [2, 5, 7] {
        game.add_piece(Piece::fighter(Player::Player2, Direction::Down), Position::new(x, 3));
    }
    game.start_game();
    game
}

fn bench_revealed_cells(c: &mut Criterion) {
    let game = crowded_board();
    c.bench_function("revealed_cells_10x10", |b| {
        b.iter(|| black_box(black_box(&game).revealed_cells()));
    });
}

fn bench_is_exposed(c: &mut Criterion) {
    let game = crowded_board();
    c.bench_function("is_exposed_sweep_10x10", |b| {
        b.iter(|| {
            let mut exposed = 0;
            for y in 0..10 {
                for x in 0..10 {
                    if black_box(&game).is_exposed(Position::new(x, y)) {
                        exposed += 1;
                    }
                }
            }
            black_box(exposed)
        });
    });
}

fn bench_ai_game(c: &mut Criterion) {
    c.bench_function("ai_game_50_turns", |b| {
        b.iter(|| {
            let mut duel = Duel::new(MatchConfig::default().with_ai_seed(black_box(42)));
            let mut ai = duel.computer_players();
            for side in Player::ALL {
                duel.auto_deploy(&mut ai[side]).ok();
            }
            for _ in 0..50 {
                let Some(side) = duel.phase().player() else {
                    break;
                };
                if duel.run_ai_turn(&mut ai[side]).is_err() {
                    break;
                }
            }
            black_box(duel.log().len())
        });
    });
}

criterion_group!(benches, bench_revealed_cells, bench_is_exposed, bench_ai_game);
criterion_main!(benches);
