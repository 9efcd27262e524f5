//! Board tests - occupancy, line removal and reset

use tetromino_distractor::core::{Board, BoardError};
use tetromino_distractor::types::{ColorIndex, DEFAULT_COLUMNS, DEFAULT_ROWS};

fn default_board() -> Board {
    Board::new(DEFAULT_COLUMNS, DEFAULT_ROWS).unwrap()
}

fn color(i: usize) -> ColorIndex {
    ColorIndex::ALL[i % ColorIndex::ALL.len()]
}

#[test]
fn test_board_new_blank() {
    let board = default_board();
    assert_eq!(board.columns(), 10);
    assert_eq!(board.rows(), 20);

    for row in 0..20 {
        for col in 0..10 {
            assert!(board.is_on_board(col, row));
            assert_eq!(board.get(col, row), Some(None));
        }
    }
}

#[test]
fn test_board_dimension_bounds() {
    assert_eq!(
        Board::new(4, 20),
        Err(BoardError::TooSmall {
            columns: 4,
            rows: 20,
            min: 5
        })
    );
    assert!(Board::new(5, 5).is_ok());
    assert!(Board::new(64, 64).is_ok());
    assert!(matches!(Board::new(10, 65), Err(BoardError::TooLarge { .. })));
}

#[test]
fn test_rows_above_board_are_not_on_board() {
    let mut board = default_board();
    assert!(!board.is_on_board(0, -1));
    assert!(!board.is_on_board(-1, 0));
    assert!(!board.is_on_board(10, 0));
    assert!(!board.is_on_board(0, 20));

    assert!(!board.set(3, -1, Some(ColorIndex::Red)));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_is_complete_line() {
    let mut board = default_board();
    for col in 0..9 {
        board.set(col, 19, Some(ColorIndex::Blue));
    }
    assert!(!board.is_complete_line(19));

    board.set(9, 19, Some(ColorIndex::Green));
    assert!(board.is_complete_line(19));
    assert!(!board.is_complete_line(-1));
    assert!(!board.is_complete_line(20));
}

#[test]
fn test_remove_single_line_shifts_row_above_down() {
    let mut board = default_board();
    for col in 0..10 {
        board.set(col, 19, Some(color(col as usize)));
    }
    for col in 0..9 {
        board.set(col, 18, Some(color(col as usize + 1)));
    }
    let old = board.clone();

    assert_eq!(board.remove_complete_lines(), 1);

    for col in 0..10 {
        assert_eq!(board.get(col, 19), old.get(col, 18));
        assert_eq!(board.get(col, 18), Some(None));
        assert_eq!(board.get(col, 0), Some(None));
    }
}

#[test]
fn test_remove_line_shifts_everything_above_by_one() {
    let mut board = default_board();
    // Partial rows 10..15 with one gap each, then a complete row 15.
    for row in 10..15 {
        for col in 0..10 {
            if col != row % 10 {
                board.set(col, row, Some(color(row as usize)));
            }
        }
    }
    for col in 0..10 {
        board.set(col, 15, Some(ColorIndex::Yellow));
    }
    let old = board.clone();

    assert_eq!(board.remove_complete_lines(), 1);

    for row in 11..16 {
        assert_eq!(board.row(row), old.row(row - 1));
    }
    assert!(board.row(0).unwrap().iter().all(|c| c.is_none()));
}

#[test]
fn test_no_complete_lines_leaves_board_unchanged() {
    let mut board = default_board();
    for row in 5..20 {
        board.set((row % 10) as i16, row, Some(ColorIndex::Red));
    }
    let old = board.clone();

    assert_eq!(board.remove_complete_lines(), 0);
    assert_eq!(board, old);
}

#[test]
fn test_non_adjacent_complete_lines_all_removed() {
    let mut board = default_board();
    for col in 0..10 {
        board.set(col, 19, Some(ColorIndex::Blue));
        board.set(col, 17, Some(ColorIndex::Green));
    }
    board.set(0, 18, Some(ColorIndex::Red));
    board.set(4, 16, Some(ColorIndex::Yellow));

    assert_eq!(board.remove_complete_lines(), 2);
    assert_eq!(board.get(0, 19), Some(Some(ColorIndex::Red)));
    assert_eq!(board.get(4, 18), Some(Some(ColorIndex::Yellow)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_reset_blanks_every_cell() {
    let mut board = Board::new(7, 9).unwrap();
    for row in 0..9 {
        for col in 0..7 {
            board.set(col, row, Some(ColorIndex::Green));
        }
    }
    board.reset();
    assert_eq!(board.filled_count(), 0);
    assert_eq!((board.columns(), board.rows()), (7, 9));
}
