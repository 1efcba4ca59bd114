use gomoku::{Board, Cell, GameError, MoveError, Player, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(15).unwrap();
    assert_eq!(board.size(), 15);
    assert_eq!(board.stone_count(), 0);
    assert!(board.is_board_empty());
    assert!(!board.is_full());
    assert_eq!(board.empty_cells().count(), 225);
}

#[test]
fn test_unsupported_sizes_rejected() {
    assert_eq!(
        Board::new(MIN_BOARD_SIZE - 1).unwrap_err(),
        GameError::InvalidBoardSize(MIN_BOARD_SIZE - 1)
    );
    assert_eq!(
        Board::new(MAX_BOARD_SIZE + 1).unwrap_err(),
        GameError::InvalidBoardSize(MAX_BOARD_SIZE + 1)
    );
    assert!(Board::new(MIN_BOARD_SIZE).is_ok());
    assert!(Board::new(MAX_BOARD_SIZE).is_ok());
}

#[test]
fn test_place_and_get() {
    let mut board = Board::new(9).unwrap();
    board.place(2, 5, Player::Two).unwrap();
    assert_eq!(board.get(2, 5), Some(Cell::Stone(Player::Two)));
    assert_eq!(board.get(5, 2), Some(Cell::Empty));
    assert_eq!(board.get(9, 0), None);
    assert_eq!(board.stone_count(), 1);
    assert_eq!(board.count_stones(Player::Two), 1);
    assert_eq!(board.count_stones(Player::One), 0);
}

#[test]
fn test_place_rejects_occupied_and_out_of_bounds() {
    let mut board = Board::new(9).unwrap();
    board.place(4, 4, Player::One).unwrap();
    let before = board.clone();
    assert_eq!(
        board.place(4, 4, Player::Two).unwrap_err(),
        MoveError::Occupied { x: 4, y: 4 }
    );
    assert_eq!(
        board.place(9, 4, Player::Two).unwrap_err(),
        MoveError::OutOfBounds { x: 9, y: 4 }
    );
    assert_eq!(board, before);
}

#[test]
fn test_run_length_counts_both_directions() {
    let mut board = Board::new(15).unwrap();
    for x in [3, 4, 6, 7] {
        board.place(x, 7, Player::One).unwrap();
    }
    // (5, 7) is still empty but counts as the joining stone
    assert_eq!(board.run_length(5, 7, 1, 0, Player::One), 5);
    assert!(board.completes_five(5, 7, Player::One));
    assert!(!board.completes_five(5, 7, Player::Two));
    assert_eq!(board.run_length(5, 7, 0, 1, Player::One), 1);
}

#[test]
fn test_line_through_anti_diagonal() {
    let mut board = Board::new(10).unwrap();
    let cells = [(0, 9), (1, 8), (2, 7), (3, 6), (4, 5)];
    for &(x, y) in &cells {
        board.place(x, y, Player::Two).unwrap();
    }
    let line = board.line_through(2, 7, Player::Two).unwrap();
    assert_eq!(line.len(), 5);
    for cell in cells {
        assert!(line.contains(&cell));
    }
    assert_eq!(board.find_five().map(|(p, _)| p), Some(Player::Two));
}

#[test]
fn test_four_is_not_five() {
    let mut board = Board::new(10).unwrap();
    for y in 0..4 {
        board.place(3, y, Player::One).unwrap();
    }
    assert!(board.find_five().is_none());
    assert!(board.line_through(3, 0, Player::One).is_none());
}

#[test]
fn test_display_marks_stones() {
    let mut board = Board::new(5).unwrap();
    board.place(0, 0, Player::One).unwrap();
    board.place(4, 4, Player::Two).unwrap();
    let text = board.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0].trim(), "A B C D E");
    assert!(lines[1].ends_with("X . . . ."));
    assert!(lines[5].ends_with(". . . . O"));
}
