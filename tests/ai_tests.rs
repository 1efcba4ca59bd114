use gomoku::{
    evaluate, select_move, Board, GameError, GameState, MoveSelector, Player, SearchConfig,
    Snapshot, WIN_SCORE,
};
use proptest::prelude::*;

fn board_with(size: usize, stones: &[(usize, usize, Player)]) -> Board {
    let mut board = Board::new(size).unwrap();
    for &(x, y, p) in stones {
        board.place(x, y, p).unwrap();
    }
    board
}

fn shallow(depth: u8) -> MoveSelector {
    MoveSelector::new(SearchConfig {
        depth,
        ..SearchConfig::default()
    })
}

/// Full-board pattern with no run longer than two in any direction.
fn draw_rows(size: usize) -> Vec<Vec<i64>> {
    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| if (x + 2 * y) % 4 < 2 { 1 } else { 2 })
                .collect()
        })
        .collect()
}

#[test]
fn test_empty_board_opens_in_centre() {
    let board = Board::new(15).unwrap();
    let mv = select_move(&board, Player::Two).unwrap();
    assert_eq!((mv.x, mv.y), (7, 7));
    assert_eq!(mv.player, Player::Two);

    let board = Board::new(9).unwrap();
    let mv = shallow(2).select_move(&board, Player::One).unwrap();
    assert_eq!((mv.x, mv.y), (4, 4));
}

#[test]
fn test_takes_immediate_win() {
    let board = board_with(
        15,
        &[
            (3, 3, Player::Two),
            (4, 3, Player::Two),
            (5, 3, Player::Two),
            (6, 3, Player::Two),
            (2, 3, Player::One),
            (7, 7, Player::One),
            (8, 8, Player::One),
        ],
    );
    let mv = select_move(&board, Player::Two).unwrap();
    assert_eq!((mv.x, mv.y), (7, 3));
}

#[test]
fn test_prefers_own_win_over_block() {
    let board = board_with(
        15,
        &[
            (3, 3, Player::Two),
            (4, 3, Player::Two),
            (5, 3, Player::Two),
            (6, 3, Player::Two),
            (2, 3, Player::One),
            (3, 9, Player::One),
            (4, 9, Player::One),
            (5, 9, Player::One),
            (6, 9, Player::One),
            (2, 9, Player::Two),
        ],
    );
    let outcome = shallow(3).search(&board, Player::Two).unwrap();
    assert_eq!((outcome.mv.x, outcome.mv.y), (7, 3));
    assert_eq!(outcome.score, WIN_SCORE);
}

#[test]
fn test_blocks_closed_four() {
    let board = board_with(
        15,
        &[
            (3, 7, Player::One),
            (4, 7, Player::One),
            (5, 7, Player::One),
            (6, 7, Player::One),
            (2, 7, Player::Two),
            (10, 10, Player::Two),
        ],
    );
    for depth in 1..=3 {
        let mv = shallow(depth).select_move(&board, Player::Two).unwrap();
        assert_eq!((mv.x, mv.y), (7, 7), "depth {}", depth);
    }
}

#[test]
fn test_lost_position_scores_as_loss() {
    // open four for player one: two winning cells, only one can be blocked
    let board = board_with(
        15,
        &[
            (4, 7, Player::One),
            (5, 7, Player::One),
            (6, 7, Player::One),
            (7, 7, Player::One),
            (0, 0, Player::Two),
            (14, 14, Player::Two),
        ],
    );
    let outcome = shallow(2).search(&board, Player::Two).unwrap();
    assert!(outcome.score <= -(WIN_SCORE - 2));
}

#[test]
fn test_single_empty_cell_is_chosen() {
    let mut rows = draw_rows(7);
    rows[3][3] = 0;
    let game = GameState::from_snapshot(&Snapshot::new(rows), Player::One).unwrap();
    let mv = select_move(game.board(), game.to_move()).unwrap();
    assert_eq!((mv.x, mv.y), (3, 3));
}

#[test]
fn test_no_legal_moves_on_finished_boards() {
    let full = Snapshot::new(draw_rows(7)).to_board().unwrap();
    assert_eq!(
        select_move(&full, Player::One).unwrap_err(),
        GameError::NoLegalMoves
    );

    let won = board_with(
        9,
        &[
            (0, 0, Player::One),
            (1, 1, Player::One),
            (2, 2, Player::One),
            (3, 3, Player::One),
            (4, 4, Player::One),
        ],
    );
    assert_eq!(
        select_move(&won, Player::Two).unwrap_err(),
        GameError::NoLegalMoves
    );
}

#[test]
fn test_search_is_deterministic_and_leaves_board_untouched() {
    let board = board_with(
        15,
        &[
            (7, 7, Player::One),
            (8, 7, Player::Two),
            (7, 8, Player::One),
            (6, 6, Player::Two),
        ],
    );
    let before = board.clone();
    let first = shallow(3).search(&board, Player::One).unwrap();
    let second = shallow(3).search(&board, Player::One).unwrap();
    assert_eq!(first.mv, second.mv);
    assert_eq!(first.score, second.score);
    assert_eq!(first.stats, second.stats);
    assert_eq!(board, before);
}

#[test]
fn test_search_reports_counters() {
    let board = board_with(15, &[(7, 7, Player::One), (8, 8, Player::Two)]);
    let mut selector = shallow(2);
    let outcome = selector.search(&board, Player::One).unwrap();
    assert_eq!(outcome.stats.depth, 2);
    assert!(outcome.stats.nodes > 1);
    assert_eq!(selector.stats(), outcome.stats);
}

#[test]
fn test_cache_reuses_transposed_positions() {
    let board = board_with(15, &[(7, 7, Player::One), (8, 8, Player::Two)]);
    let cached = MoveSelector::new(SearchConfig {
        depth: 4,
        max_candidates: Some(6),
        ..SearchConfig::default()
    })
    .search(&board, Player::One)
    .unwrap();
    assert!(cached.stats.cache_size > 0);
    assert!(cached.stats.cache_hits > 0);

    let uncached = MoveSelector::new(SearchConfig {
        depth: 4,
        max_candidates: Some(6),
        cache_bits: 0,
        ..SearchConfig::default()
    })
    .search(&board, Player::One)
    .unwrap();
    assert_eq!(uncached.stats.cache_size, 0);
    assert_eq!(uncached.stats.cache_hits, 0);
    assert_eq!(cached.score, uncached.score);
}

#[test]
fn test_cache_keeps_forced_replies() {
    let board = board_with(
        15,
        &[
            (3, 7, Player::One),
            (4, 7, Player::One),
            (5, 7, Player::One),
            (6, 7, Player::One),
            (2, 7, Player::Two),
            (10, 10, Player::Two),
        ],
    );
    for cache_bits in [0, 1, 14] {
        let mv = MoveSelector::new(SearchConfig {
            depth: 4,
            max_candidates: Some(6),
            cache_bits,
            ..SearchConfig::default()
        })
        .select_move(&board, Player::Two)
        .unwrap();
        assert_eq!((mv.x, mv.y), (7, 7), "cache_bits {}", cache_bits);
    }
}

#[test]
fn test_evaluate_five_is_win_score() {
    let board = board_with(
        9,
        &[
            (2, 0, Player::Two),
            (2, 1, Player::Two),
            (2, 2, Player::Two),
            (2, 3, Player::Two),
            (2, 4, Player::Two),
        ],
    );
    assert_eq!(evaluate(&board, Player::Two), WIN_SCORE);
    assert_eq!(evaluate(&board, Player::One), -WIN_SCORE);
}

#[test]
fn test_evaluate_grows_with_longer_lines() {
    let empty = Board::new(15).unwrap();
    assert_eq!(evaluate(&empty, Player::One), 0);

    let mut board = empty.clone();
    let mut last = 0;
    for x in 5..9 {
        board.place(x, 7, Player::One).unwrap();
        let score = evaluate(&board, Player::One);
        assert!(score > last, "{} stones: {} <= {}", x - 4, score, last);
        last = score;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn selected_move_is_legal(moves in proptest::collection::vec((0usize..9, 0usize..9), 1..30)) {
        let mut game = GameState::new(9, Player::One).unwrap();
        for (x, y) in moves {
            if game.outcome().is_over() {
                break;
            }
            let side = game.to_move();
            let _ = game.apply_move(x, y, side);
        }
        prop_assume!(!game.outcome().is_over());

        let mv = shallow(2).select_move(game.board(), game.to_move()).unwrap();
        prop_assert!(game.is_valid_move(mv.x, mv.y, mv.player));
        prop_assert_eq!(mv.player, game.to_move());
    }

    #[test]
    fn evaluate_is_zero_sum_and_monotonic(
        stones in proptest::collection::vec((0usize..9, 0usize..9, any::<bool>()), 0..20),
        extra in (0usize..9, 0usize..9),
    ) {
        let mut board = Board::new(9).unwrap();
        for (x, y, one) in stones {
            let p = if one { Player::One } else { Player::Two };
            let _ = board.place(x, y, p);
        }
        prop_assume!(board.find_five().is_none());
        prop_assert_eq!(evaluate(&board, Player::One), -evaluate(&board, Player::Two));

        prop_assume!(board.is_empty_at(extra.0, extra.1));
        let before = evaluate(&board, Player::One);
        let mut after = board.clone();
        after.place(extra.0, extra.1, Player::One).unwrap();
        prop_assert!(evaluate(&after, Player::One) >= before);
    }
}
