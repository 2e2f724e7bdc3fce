//! Rule properties checked over every reachable board.

use std::collections::HashSet;

use neon_tictactoe::{
    Board, Cell, Line, Mark, MoveError, Phase, Position, apply_move, detect_winner, is_draw,
    is_full,
};

/// Every board reachable from the empty board by legal alternating play.
fn reachable_boards() -> Vec<(Board, Mark)> {
    let mut seen = HashSet::new();
    let mut stack = vec![(Board::new(), Mark::X)];
    let mut out = Vec::new();
    while let Some((board, mark)) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        out.push((board, mark));
        for index in 0..9 {
            if let Ok(next) = apply_move(&board, index, mark) {
                stack.push((next, mark.opponent()));
            }
        }
    }
    out
}

fn parse(s: &str) -> Board {
    let mut cells = [Cell::Empty; 9];
    for (cell, ch) in cells.iter_mut().zip(s.chars()) {
        *cell = match ch {
            'X' => Cell::Occupied(Mark::X),
            'O' => Cell::Occupied(Mark::O),
            _ => Cell::Empty,
        };
    }
    Board::from_cells(cells)
}

#[test]
fn test_reachable_state_count() {
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_apply_move_changes_only_target() {
    for (board, mark) in reachable_boards() {
        if Phase::of(&board).is_terminal() {
            continue;
        }
        for pos in Position::empty(&board) {
            let next = apply_move(&board, pos.to_index(), mark).expect("empty cell is legal");
            for other in 0..9 {
                let expected = if other == pos.to_index() {
                    Cell::Occupied(mark)
                } else {
                    board.cells()[other]
                };
                assert_eq!(next.cells()[other], expected);
            }
        }
    }
}

#[test]
fn test_occupied_cells_always_rejected() {
    for (board, mark) in reachable_boards() {
        for (index, cell) in board.cells().iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let result = apply_move(&board, index, mark);
            assert!(result.is_err(), "occupied cell {} accepted", index);
        }
    }
}

#[test]
fn test_terminal_boards_reject_every_move() {
    for (board, mark) in reachable_boards() {
        if detect_winner(&board).is_none() {
            continue;
        }
        for pos in Position::empty(&board) {
            assert_eq!(
                apply_move(&board, pos.to_index(), mark),
                Err(MoveError::GameOver)
            );
        }
    }
}

#[test]
fn test_winner_iff_some_line_uniform() {
    for (board, _) in reachable_boards() {
        let uniform = Line::ALL.iter().any(|line| {
            let [a, b, c] = line.positions();
            !board.is_empty(a) && board.get(a) == board.get(b) && board.get(a) == board.get(c)
        });
        assert_eq!(detect_winner(&board).is_some(), uniform);
    }
}

#[test]
fn test_draw_iff_full_without_winner() {
    for (board, _) in reachable_boards() {
        let win = detect_winner(&board);
        assert_eq!(is_draw(&board, win.as_ref()), is_full(&board) && win.is_none());
    }
}

#[test]
fn test_detect_winner_is_idempotent() {
    for (board, _) in reachable_boards() {
        assert_eq!(detect_winner(&board), detect_winner(&board));
    }
}

#[test]
fn test_top_row_scenario() {
    let board = parse("XXX______");
    let win = detect_winner(&board).expect("top row");
    assert_eq!(win.mark(), Mark::X);
    assert_eq!(win.line().indices(), [0, 1, 2]);
}

#[test]
fn test_full_board_draw_scenario() {
    // X O X / X O O / O X X
    let board = parse("XOXXOOOXX");
    let win = detect_winner(&board);
    assert_eq!(win, None);
    assert!(is_draw(&board, win.as_ref()));
    assert_eq!(Phase::of(&board), Phase::Drawn);
}

#[test]
fn test_move_on_occupied_cell_leaves_board_unchanged() {
    let board = apply_move(&Board::new(), 0, Mark::X).expect("legal");
    let snapshot = board;
    assert_eq!(
        apply_move(&board, 0, Mark::O),
        Err(MoveError::CellOccupied(Position::TopLeft))
    );
    assert_eq!(board, snapshot);
}

#[test]
fn test_empty_board_has_no_winner() {
    assert_eq!(detect_winner(&Board::new()), None);
    assert_eq!(Phase::of(&Board::new()), Phase::InProgress);
}

#[test]
fn test_phase_serializes() {
    let phase = Phase::of(&parse("XXX_OO___"));
    let json = serde_json::to_string(&phase).expect("serialize");
    assert!(json.contains("Won"));
}
