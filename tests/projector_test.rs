//! Tests for projecting game snapshots into views.

use reversi_client::{Side, project};
use reversi_protocol::{Board, GameSnapshot, GameStatePlayer, Point, Token};

fn side(id: &str, token: Token, score: i32, moves: &[(u8, u8)]) -> GameStatePlayer {
    GameStatePlayer {
        id: id.into(),
        name: id.to_uppercase(),
        token,
        score,
        legal_moves: moves.iter().map(|&(x, y)| Point::new(x, y)).collect(),
    }
}

fn snapshot(current: &str, p1_moves: &[(u8, u8)], p2_moves: &[(u8, u8)]) -> GameSnapshot {
    GameSnapshot {
        p1: side("p1", Token::Black, 2, p1_moves),
        p2: side("p2", Token::White, 3, p2_moves),
        round: 1,
        turn: 5,
        current_player_id: current.into(),
        board: Board::empty(),
    }
}

#[test]
fn test_local_turn_marks_exactly_legal_moves() {
    let view = project(&snapshot("p1", &[(2, 3)], &[]), "p1");

    assert_eq!(view.selectable_cells(), vec![Point::new(2, 3)]);
    let cell = view.cells()[3][2];
    assert!(cell.selectable);
    assert!(!view.cells()[2][3].selectable);
    assert!(*view.is_local_turn());
}

#[test]
fn test_several_moves_all_selectable() {
    let moves = [(2, 3), (3, 2), (4, 5), (5, 4)];
    let view = project(&snapshot("p1", &moves, &[]), "p1");

    let mut expected: Vec<_> = moves.iter().map(|&(x, y)| Point::new(x, y)).collect();
    expected.sort_by_key(|p| (p.y, p.x));
    assert_eq!(view.selectable_cells(), expected);
}

#[test]
fn test_opponent_turn_has_no_selectable_cells() {
    let view = project(&snapshot("p2", &[(2, 3)], &[(4, 4)]), "p1");

    assert!(view.selectable_cells().is_empty());
    assert!(!*view.is_local_turn());
}

#[test]
fn test_moves_come_from_current_player_not_position() {
    // Local player is p2 and is to move; p1's moves must not leak in
    let view = project(&snapshot("p2", &[(0, 0)], &[(7, 7)]), "p2");
    assert_eq!(view.selectable_cells(), vec![Point::new(7, 7)]);
}

#[test]
fn test_no_legal_moves_means_nothing_selectable() {
    let view = project(&snapshot("p1", &[], &[(1, 1)]), "p1");
    assert!(view.selectable_cells().is_empty());
    assert!(*view.is_local_turn());
}

#[test]
fn test_cells_mirror_board_tokens() {
    let mut snap = snapshot("p1", &[], &[]);
    snap.board.set(Point::new(3, 4), Token::Black);
    snap.board.set(Point::new(4, 3), Token::White);

    let view = project(&snap, "p1");
    assert_eq!(view.cell(Point::new(3, 4)).map(|c| c.token), Some(Token::Black));
    assert_eq!(view.cells()[3][4].token, Token::White);
    assert_eq!(view.cells()[0][0].token, Token::Empty);
    assert!(view.cell(Point::new(8, 0)).is_none());
}

#[test]
fn test_panels_and_highlight() {
    let view = project(&snapshot("p2", &[], &[]), "p1");

    assert_eq!(*view.highlighted(), Side::PlayerTwo);
    assert!(view.p1().is_local);
    assert!(!view.p1().highlighted);
    assert!(view.p2().highlighted);
    assert_eq!(view.p2().score, 3);
    assert_eq!(view.local_panel().map(|p| p.id.as_str()), Some("p1"));
    assert_eq!(*view.turn(), 5);
}

#[test]
fn test_spectator_id_sees_no_moves() {
    let view = project(&snapshot("p1", &[(2, 3)], &[]), "someone-else");
    assert!(view.selectable_cells().is_empty());
    assert!(view.local_panel().is_none());
}

#[test]
fn test_projection_is_deterministic() {
    let snap = snapshot("p1", &[(2, 3), (5, 4)], &[]);
    assert_eq!(project(&snap, "p1"), project(&snap, "p1"));
}
