//! Cross-model scenarios.
//!
//! These tests drive both sides' models through a `HotSeat` link and check
//! that each side ends up with the view it is entitled to.

use ace_fighter::board::{Completion, GameModel, LogKind, RevealReason, Visibility, Visual};
use ace_fighter::core::{Direction, Player, Position};
use ace_fighter::pieces::{ActionName, Piece, PieceType};
use ace_fighter::protocol::{Detached, HotSeat};

use Player::{Player1, Player2};

fn fighter(player: Player) -> Piece {
    Piece::fighter(player, Direction::Up)
}

/// A link where each side already has a spare fighter in its back corner,
/// so losing one piece never ends the game.
fn link() -> HotSeat {
    let mut link = HotSeat::new(10, 10);
    for player in Player::ALL {
        assert!(link.model_mut(player).add_piece(fighter(player), Position::new(0, 9)));
    }
    link
}

// =============================================================================
// Deployment
// =============================================================================

/// A rejected deployment leaves the board exactly as it was.
#[test]
fn test_deploy_outside_rows_changes_nothing() {
    let mut game = GameModel::new(10, 10, Player1);
    let generation = game.generation();

    assert!(!game.deploy(fighter(Player1), Position::new(3, 0)));
    assert!(!game.deploy(fighter(Player1), Position::new(3, 7)));
    assert!(!game.deploy(fighter(Player1), Position::new(10, 9)));

    assert_eq!(game.pieces().count(), 0);
    assert_eq!(game.generation(), generation);
    assert!(game.take_journal().is_empty());
}

/// Deploying onto an occupied cell fails.
#[test]
fn test_deploy_onto_occupied_cell() {
    let mut game = GameModel::new(10, 10, Player1);
    assert!(game.deploy(fighter(Player1), Position::new(3, 8)));
    assert!(!game.deploy(Piece::fighter(Player1, Direction::Left), Position::new(3, 8)));
    assert_eq!(game.get_piece(Position::new(3, 8)).map(Piece::piece_type), Some(PieceType::Fighter));
}

// =============================================================================
// Crashes
// =============================================================================

/// Flying into a hidden enemy destroys both aircraft on both boards.
#[test]
fn test_crash_into_hidden_enemy() {
    let mut link = link();
    link.model_mut(Player1).add_piece(fighter(Player1), Position::new(4, 8));
    // (4, 5) seen from Player2's end
    link.model_mut(Player2).add_piece(fighter(Player2), Position::new(5, 4));

    link.act(Player1, |m, r| m.move_piece(r, Position::new(4, 8), Position::new(4, 5), Direction::Up));

    let p1 = link.model(Player1);
    assert!(p1.get_piece(Position::new(4, 8)).is_none());
    assert!(p1.get_piece(Position::new(4, 5)).is_none());
    assert!(link.model(Player2).get_piece(Position::new(5, 4)).is_none());

    // spares keep both sides in the game
    assert_eq!(p1.win_state(), None);
    assert_eq!(link.model(Player2).win_state(), None);

    let journal = link.model_mut(Player2).take_journal();
    assert!(journal.iter().any(|e| e.kind == LogKind::ShotDown));
}

/// Crashing into a known enemy: the mover cannot re-place its piece.
#[test]
fn test_crash_into_known_enemy() {
    let mut link = link();
    link.model_mut(Player1).add_piece(fighter(Player1), Position::new(4, 7));
    link.model_mut(Player1)
        .add_piece(Piece::fighter(Player2, Direction::Down), Position::new(4, 6));
    link.model_mut(Player2).add_piece(fighter(Player2), Position::new(5, 3));

    let placed = link.act(Player1, |m, r| m.move_piece(r, Position::new(4, 7), Position::new(4, 6), Direction::Up));

    assert!(!placed);
    assert!(link.model(Player1).get_piece(Position::new(4, 6)).is_none());
    assert!(link.model(Player2).get_piece(Position::new(5, 3)).is_none());
}

/// The last fighter crashing decides the game for both sides.
#[test]
fn test_crash_of_last_fighters() {
    let mut link = HotSeat::new(10, 10);
    link.model_mut(Player1).add_piece(fighter(Player1), Position::new(4, 7));
    link.model_mut(Player2).add_piece(fighter(Player2), Position::new(5, 4));

    link.act(Player1, |m, r| m.move_piece(r, Position::new(4, 7), Position::new(4, 5), Direction::Up));
    link.act(Player1, |m, r| m.check_win_lose(r));

    assert!(link.model(Player1).win_state().is_some());
    assert!(link.model(Player2).win_state().is_some());
}

// =============================================================================
// Missiles
// =============================================================================

/// A missile hit waits for both sides' effects before anything disappears.
#[test]
fn test_missile_kill() {
    let mut link = link();
    link.model_mut(Player1).add_piece(fighter(Player1), Position::new(5, 9));
    link.model_mut(Player1)
        .add_piece(Piece::fighter(Player2, Direction::Down), Position::new(5, 6));
    link.model_mut(Player2).add_piece(fighter(Player2), Position::new(4, 3));

    let shooter = *link.model(Player1).get_piece(Position::new(5, 9)).unwrap();
    let kill = shooter
        .kill_moves(link.model(Player1))
        .into_iter()
        .find(|m| m.destination.position == Position::new(5, 9) && m.destination.direction == Direction::Up)
        .expect("firing from where it stands");
    assert_eq!(kill.actions.as_slice(), [ActionName::Fire]);

    link.act(Player1, |m, r| m.fire(r, Position::new(5, 9))).unwrap();

    // nothing is removed until the effects complete
    assert!(link.model(Player2).get_piece(Position::new(4, 3)).is_some());
    assert!(link.model(Player1).get_piece(Position::new(5, 6)).is_some());

    let mine = link.model_mut(Player1).take_effects();
    let theirs = link.model_mut(Player2).take_effects();
    assert_eq!(mine.len(), 1);
    assert_eq!(theirs.len(), 1);
    assert_eq!(mine[0].completion, Completion::ShotDown(Position::new(5, 6)));
    assert_eq!(theirs[0].completion, Completion::Clear(Position::new(4, 3)));
    let Visual::Missile { cells, hit, .. } = &mine[0].visual;
    assert!(*hit);
    assert_eq!(cells.last(), Some(&Position::new(5, 6)));

    link.act(Player2, |m, r| m.complete_effect(r, theirs[0].completion));
    link.act(Player1, |m, r| m.complete_effect(r, mine[0].completion));

    assert!(link.model(Player2).get_piece(Position::new(4, 3)).is_none());
    assert!(link.model(Player1).get_piece(Position::new(5, 6)).is_none());
    assert!(link.model(Player1).get_piece(Position::new(5, 9)).unwrap().fired());
}

/// A missile never passes through or hits a friendly aircraft.
#[test]
fn test_missile_blocked_by_friendly() {
    let mut game = GameModel::new(10, 10, Player1);
    game.add_piece(fighter(Player1), Position::new(5, 9));
    game.add_piece(fighter(Player1), Position::new(5, 7));
    game.add_piece(Piece::fighter(Player2, Direction::Down), Position::new(5, 6));

    game.fire(&mut Detached, Position::new(5, 9)).unwrap();

    let effects = game.take_effects();
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].completion, Completion::ShotDown(Position::new(5, 8)));
    let Visual::Missile { hit, .. } = &effects[0].visual;
    assert!(!*hit);
}

// =============================================================================
// Fog of war
// =============================================================================

/// The radar covers the enemy half, and an enemy flying into it shows up
/// as exposed.
#[test]
fn test_aew_radar_reveal() {
    let mut game = GameModel::new(10, 10, Player1);
    game.add_piece(Piece::aew(Player1, Direction::Up), Position::new(5, 5));

    let Visibility::Revealed(RevealReason::Aew(aew)) = game.is_fow(Position::new(5, 2)) else {
        panic!("radar should cover (5, 2)");
    };
    assert_eq!(aew.piece_type, PieceType::Aew);
    assert!(game.is_fow(Position::new(5, 0)).is_hidden());

    game.add_piece(Piece::fighter(Player2, Direction::Down), Position::new(5, 3));
    assert!(game.is_exposed(Position::new(5, 3)));
    assert!(game.is_exposed(Position::new(5, 4)));
    assert!(!game.is_exposed(Position::new(5, 6)));
}

/// An AEW painting an enemy reveals it, and gives its own position away.
#[test]
fn test_aew_mutual_detection() {
    let mut link = link();
    link.model_mut(Player1).add_piece(Piece::aew(Player1, Direction::Up), Position::new(5, 8));
    // (5, 4) seen from Player2's end
    link.model_mut(Player2).add_piece(fighter(Player2), Position::new(4, 5));
    for player in Player::ALL {
        link.model_mut(player).start_game();
    }

    link.act(Player1, |m, r| m.sync_revealed_cells(r));

    let p1 = link.model(Player1);
    let spotted = p1.get_piece(Position::new(5, 4)).expect("enemy revealed by radar");
    assert_eq!(spotted.player, Player2);
    assert_eq!(spotted.direction, Direction::Down);
    assert!(p1.is_exposed(Position::new(5, 5)));
    assert!(!p1.is_exposed(Position::new(5, 8)));

    let p2 = link.model(Player2);
    let aew = p2.get_piece(Position::new(4, 1)).expect("AEW detected");
    assert!(aew.is_aew());
    assert_eq!(aew.direction, Direction::Down);
    assert_eq!(p2.is_fow(Position::new(4, 1)), Visibility::Revealed(RevealReason::EnemyAew));
}

/// A radar painting a piece gives itself away even where one of the
/// sender's fighters covers the same cell.
#[test]
fn test_aew_detected_through_fighter_cover() {
    let mut link = link();
    link.model_mut(Player1).add_piece(fighter(Player1), Position::new(5, 3));
    link.model_mut(Player1).add_piece(Piece::aew(Player1, Direction::Up), Position::new(5, 6));
    // (5, 2) seen from Player2's end
    link.model_mut(Player2).add_piece(fighter(Player2), Position::new(4, 7));
    for player in Player::ALL {
        link.model_mut(player).start_game();
    }

    link.act(Player1, |m, r| m.sync_revealed_cells(r));

    let p2 = link.model(Player2);
    let aew = p2.get_piece(Position::new(4, 3)).expect("AEW detected");
    assert!(aew.is_aew());
    assert_eq!(aew.player, Player1);
    assert_eq!(link.model(Player1).get_piece(Position::new(5, 2)).map(|p| p.player), Some(Player2));
}

/// Both radars painting one piece are detected.
#[test]
fn test_overlapping_radars_both_detected() {
    let mut link = link();
    link.model_mut(Player1).add_piece(Piece::aew(Player1, Direction::Up), Position::new(3, 6));
    link.model_mut(Player1).add_piece(Piece::aew(Player1, Direction::Up), Position::new(7, 6));
    // (5, 4) seen from Player2's end
    link.model_mut(Player2).add_piece(fighter(Player2), Position::new(4, 5));
    for player in Player::ALL {
        link.model_mut(player).start_game();
    }

    link.act(Player1, |m, r| m.sync_revealed_cells(r));

    let p2 = link.model(Player2);
    for p in [Position::new(6, 3), Position::new(2, 3)] {
        assert!(p2.get_piece(p).is_some_and(Piece::is_aew), "no AEW at {p}");
    }
}

/// Moving out of sight leaves no trace on the other board.
#[test]
fn test_move_into_fog_is_not_shown() {
    let mut link = link();
    link.model_mut(Player1)
        .add_piece(Piece::fighter(Player1, Direction::Down), Position::new(3, 3));
    // Player2 sees (3, 3) as (6, 6), inside its own half
    link.model_mut(Player2)
        .add_piece(Piece::fighter(Player1, Direction::Up), Position::new(6, 6));

    link.act(Player1, |m, r| m.move_piece(r, Position::new(3, 3), Position::new(3, 5), Direction::Down));

    let p2 = link.model(Player2);
    assert!(p2.get_piece(Position::new(6, 6)).is_none());
    assert!(p2.get_piece(Position::new(6, 4)).is_none());
    assert!(p2.find_all_enemy_piece(|_| true).is_empty());
}
