//! Computer opponent.
//!
//! The opponent only uses public `GameModel` queries (`find_all_own_piece`,
//! `kill_moves`, `move_towards`, `is_fow`), so it never sees more than the
//! side it plays for.

mod heuristic;

pub use heuristic::Heuristic;
