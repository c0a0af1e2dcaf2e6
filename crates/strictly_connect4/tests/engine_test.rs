//! Forced-move scenarios checked against every registered opponent.

use strictly_connect4::{
    AlphaBeta, Board, EngineConfig, OpponentRegistry, Side, Strategy, select_move,
};

fn registry() -> OpponentRegistry {
    OpponentRegistry::new(&EngineConfig::new(4, 3, 100, 1))
}

fn board_from(moves: &[(usize, Side)]) -> Board {
    let mut board = Board::new();
    for &(col, side) in moves {
        board.drop(col, side).expect("Legal setup move");
    }
    board
}

#[test]
fn test_every_opponent_takes_win_over_block() {
    // Side B has 0-1-2 on the bottom row, side A has three stacked in column 6.
    let board = board_from(&[
        (6, Side::First),
        (0, Side::Second),
        (6, Side::First),
        (1, Side::Second),
        (6, Side::First),
        (2, Side::Second),
        (4, Side::First),
    ]);
    let registry = registry();
    for descriptor in registry.list() {
        let col = registry
            .select_move(*descriptor.id(), &board, Side::Second)
            .expect("Move available");
        assert_eq!(col, 3, "{} should complete the row", descriptor.id());
    }
}

#[test]
fn test_every_opponent_blocks_single_threat() {
    let board = board_from(&[
        (3, Side::First),
        (0, Side::Second),
        (4, Side::First),
        (0, Side::Second),
        (3, Side::First),
        (0, Side::Second),
    ]);
    let registry = registry();
    for descriptor in registry.list() {
        let col = registry
            .select_move(*descriptor.id(), &board, Side::First)
            .expect("Move available");
        assert_eq!(col, 0, "{} should block column 0", descriptor.id());
    }
}

#[test]
fn test_side_a_takes_diagonal_win() {
    // Side A owns (5,0), (4,1), (3,2); (2,3) lands once column 3 holds three.
    let board = board_from(&[
        (0, Side::First),
        (1, Side::Second),
        (1, Side::First),
        (2, Side::Second),
        (2, Side::First),
        (3, Side::Second),
        (2, Side::First),
        (3, Side::Second),
        (3, Side::First),
        (6, Side::Second),
    ]);
    let registry = registry();
    for descriptor in registry.list() {
        let col = registry
            .select_move(*descriptor.id(), &board, Side::First)
            .expect("Move available");
        assert_eq!(col, 3, "{} should complete the diagonal", descriptor.id());
    }
}

#[test]
fn test_select_move_leaves_board_untouched() {
    let board = board_from(&[(3, Side::First), (3, Side::Second), (2, Side::First)]);
    let before = board;
    let strategy = AlphaBeta::new(5);
    select_move(&board, Side::Second, &strategy).expect("Move available");
    strategy.choose(&board, Side::Second).expect("Move available");
    assert_eq!(board, before);
}
