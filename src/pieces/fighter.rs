//! Fighter rules: manoeuvres, missile scan and kill moves.

use smallvec::SmallVec;

use super::{ActionName, Battlefield, Destination, Move, Piece};
use crate::core::MISSILE_RANGE;

/// Straight 1 and 2, diagonal left/right (turning), then in-place turns.
pub(super) fn candidates(piece: &Piece) -> [Destination; 8] {
    let p = piece.position;
    let d = piece.direction;
    let ahead = p.add(d.delta());
    [
        Destination::new(ahead, d),
        Destination::new(p.add_times(d.delta(), 2), d),
        Destination::new(ahead.add(d.left().delta()), d.left()),
        Destination::new(ahead.add(d.right().delta()), d.right()),
        Destination::new(p, d.left()),
        Destination::new(p, d.right()),
        Destination::new(p, d.backward()),
        Destination::new(p, d),
    ]
}

/// Cells a missile fired right now would cross.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissilePath {
    /// Scanned cells in flight order, ending at the impact cell if any.
    pub cells: SmallVec<[crate::core::Position; 4]>,
    /// An enemy piece known to this board sits on the last cell.
    pub hit: bool,
}

impl Piece {
    /// Scan along the current facing. The scan stops at the board edge or
    /// at the first occupied cell; a friendly cell is not part of the path.
    #[must_use]
    pub fn missile_path(&self, field: &impl Battlefield) -> MissilePath {
        let mut path = MissilePath::default();
        for i in 1..=MISSILE_RANGE {
            let cell = self.position.add_times(self.direction.delta(), i);
            if cell.is_out_of_bound(field.width(), field.height()) {
                break;
            }
            match field.get_piece(cell) {
                None => path.cells.push(cell),
                Some(other) if other.player != self.player => {
                    path.cells.push(cell);
                    path.hit = true;
                    break;
                }
                Some(_) => break,
            }
        }
        path
    }
}

pub(super) fn kill_moves(piece: &Piece, field: &impl Battlefield) -> Vec<Move> {
    let mut kills = Vec::new();
    for dest in piece.possible_moves(field) {
        if let Some(target) = field.get_piece(dest.position) {
            if target.player != piece.player {
                kills.push(Move::new(*piece, dest).with_kill(*target).with_priority(1));
                continue;
            }
        }
        if piece.fired() {
            continue;
        }
        for i in 1..=MISSILE_RANGE {
            let cell = dest.position.add_times(dest.direction.delta(), i);
            if cell.is_out_of_bound(field.width(), field.height()) {
                break;
            }
            // the piece itself has left its old cell by the time it fires
            if cell == piece.position {
                continue;
            }
            match field.get_piece(cell) {
                None => {}
                Some(target) if target.player != piece.player => {
                    kills.push(Move::new(*piece, dest).with_actions(&[ActionName::Fire]).with_kill(*target));
                    break;
                }
                Some(_) => break,
            }
        }
    }
    kills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player::{Player1, Player2};
    use crate::core::{Direction, Position};

    struct Field(Vec<Piece>);

    impl Battlefield for Field {
        fn width(&self) -> i32 {
            10
        }

        fn height(&self) -> i32 {
            10
        }

        fn get_piece(&self, p: Position) -> Option<&Piece> {
            self.0.iter().find(|piece| piece.position == p)
        }
    }

    #[test]
    fn test_missile_kill_move() {
        let me = Piece::fighter(Player1, Direction::Up).at(Position::new(5, 9));
        let enemy = Piece::fighter(Player2, Direction::Down).at(Position::new(5, 6));
        let field = Field(vec![me, enemy]);

        let kills = me.kill_moves(&field);
        let shot = kills
            .iter()
            .find(|m| m.actions.as_slice() == [ActionName::Fire])
            .expect("a firing move");
        assert_eq!(shot.kill_target, Some(enemy));
        assert_eq!(shot.priority, 0);
    }

    #[test]
    fn test_crash_kill_has_priority() {
        let me = Piece::fighter(Player1, Direction::Up).at(Position::new(5, 9));
        let enemy = Piece::aew(Player2, Direction::Down).at(Position::new(5, 8));
        let field = Field(vec![me, enemy]);

        let crash = me
            .kill_moves(&field)
            .into_iter()
            .find(|m| m.destination.position == Position::new(5, 8))
            .unwrap();
        assert!(crash.actions.is_empty());
        assert_eq!(crash.priority, 1);
        assert_eq!(crash.kill_target, Some(enemy));
    }

    #[test]
    fn test_friend_blocks_the_ray() {
        let me = Piece::fighter(Player1, Direction::Up).at(Position::new(5, 9));
        let friend = Piece::fighter(Player1, Direction::Up).at(Position::new(5, 6));
        let enemy = Piece::fighter(Player2, Direction::Down).at(Position::new(5, 5));
        let field = Field(vec![me, friend, enemy]);

        assert!(me
            .kill_moves(&field)
            .iter()
            .all(|m| m.kill_target.map(|t| t.position) != Some(enemy.position)));
    }

    #[test]
    fn test_target_out_of_range() {
        let me = Piece::fighter(Player1, Direction::Up).at(Position::new(5, 9));
        let enemy = Piece::fighter(Player2, Direction::Down).at(Position::new(5, 2));
        let field = Field(vec![me, enemy]);
        assert!(me.kill_moves(&field).is_empty());
    }

    #[test]
    fn test_aew_has_no_kill_moves() {
        let me = Piece::aew(Player1, Direction::Up).at(Position::new(5, 9));
        let enemy = Piece::fighter(Player2, Direction::Down).at(Position::new(5, 8));
        assert!(me.kill_moves(&Field(vec![me, enemy])).is_empty());
    }

    #[test]
    fn test_missile_path() {
        let me = Piece::fighter(Player1, Direction::Up).at(Position::new(5, 9));
        let enemy = Piece::fighter(Player2, Direction::Down).at(Position::new(5, 7));
        let path = me.missile_path(&Field(vec![me, enemy]));
        assert_eq!(path.cells.as_slice(), &[Position::new(5, 8), Position::new(5, 7)]);
        assert!(path.hit);

        let lone = me.missile_path(&Field(vec![me]));
        assert_eq!(lone.cells.len(), 4);
        assert!(!lone.hit);

        let edge = Piece::fighter(Player1, Direction::Down).at(Position::new(5, 8));
        assert_eq!(edge.missile_path(&Field(vec![edge])).cells.as_slice(), &[Position::new(5, 9)]);
    }

    #[test]
    fn test_friend_stops_missile_without_hit() {
        let me = Piece::fighter(Player1, Direction::Up).at(Position::new(5, 9));
        let friend = Piece::aew(Player1, Direction::Up).at(Position::new(5, 7));
        let path = me.missile_path(&Field(vec![me, friend]));
        assert_eq!(path.cells.as_slice(), &[Position::new(5, 8)]);
        assert!(!path.hit);
    }
}
