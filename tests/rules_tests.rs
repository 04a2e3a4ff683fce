//! Integration tests for move legality, outcome propagation and results.

use proptest::prelude::*;
use uttt_core::core::{Area, Cell, CellAddr, CurrentArea, Nested, Outcome, Player};
use uttt_core::rules::{evaluate, BoardState, GameRules, MoveError, UltimateTicTacToe, DRAW_VALUE};

fn cell(x: usize, y: usize, i: usize, j: usize) -> CellAddr {
    CellAddr::new(x, y, i, j)
}

fn play(moves: &[(usize, usize, usize, usize)]) -> BoardState {
    let mut state = BoardState::new();
    for &(x, y, i, j) in moves {
        state
            .apply_move(cell(x, y, i, j))
            .unwrap_or_else(|e| panic!("move ({x}, {y}, {i}, {j}) rejected: {e}"));
    }
    state
}

/// X takes areas (0, 0), (0, 1) and (0, 2): the top row of the macro grid.
const TOP_ROW_GAME: [(usize, usize, usize, usize); 17] = [
    (0, 2, 1, 0),
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (1, 0, 0, 2),
    (0, 2, 1, 2),
    (1, 2, 0, 1),
    (0, 1, 1, 2),
    (1, 2, 0, 2),
    (0, 2, 1, 1),
    (1, 1, 0, 2),
    (0, 0, 1, 1),
    (1, 1, 0, 0),
    (0, 0, 1, 2),
    (1, 2, 0, 0),
    (0, 0, 1, 0),
    (1, 0, 0, 0),
    (0, 1, 1, 1),
];

// =============================================================================
// Legality
// =============================================================================

#[test]
fn test_initial_legal_moves() {
    let state = BoardState::new();
    assert_eq!(state.legal_moves().len(), 81);
    assert_eq!(state.legal_mask().iter().filter(|&&ok| ok).count(), 81);
}

#[test]
fn test_area_confinement() {
    let state = play(&[(0, 0, 1, 1)]);
    assert_eq!(state.current_area(), CurrentArea::Fixed(Area::new(1, 1)));

    let moves = state.legal_moves();
    assert_eq!(moves.len(), 9);
    assert!(moves.iter().all(|m| m.area() == Area::new(1, 1)));
}

#[test]
fn test_sent_to_decided_area_frees_choice() {
    // X wins area (0, 0) and O is then sent back into it.
    let mut state = play(&[
        (0, 0, 0, 0),
        (0, 0, 1, 1),
        (1, 1, 1, 1),
        (1, 1, 0, 0),
        (0, 0, 0, 1),
        (0, 1, 0, 0),
        (0, 0, 0, 2),
    ]);
    assert_eq!(state.current_area(), CurrentArea::Fixed(Area::new(0, 2)));
    state.apply_move(cell(0, 2, 0, 0)).unwrap();

    assert_eq!(state.current_area(), CurrentArea::Free);
    let moves = state.legal_moves();
    assert!(moves.iter().all(|m| m.area() != Area::new(0, 0)));
    assert_eq!(moves.len(), 8 * 9 - (state.move_count() - 4));
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn test_win_detection() {
    let moves = [
        (0, 0, 0, 0),
        (0, 0, 1, 1),
        (1, 1, 1, 1),
        (1, 1, 0, 0),
        (0, 0, 0, 1),
        (0, 1, 0, 0),
    ];
    let before = play(&moves);
    assert_eq!(before.area_outcome(Area::new(0, 0)), Outcome::Undetermined);

    let after = before.with_move(cell(0, 0, 0, 2)).unwrap();
    assert_eq!(after.area_outcome(Area::new(0, 0)), Outcome::Won(Player::A));
    assert_eq!(after.outcome(), Outcome::Undetermined);
}

#[test]
fn test_terminal_scenario() {
    let state = play(&TOP_ROW_GAME);

    for y in 0..3 {
        assert_eq!(state.area_outcome(Area::new(0, y)), Outcome::Won(Player::A));
    }
    assert_eq!(state.area_outcome(Area::new(1, 0)), Outcome::Won(Player::B));
    assert_eq!(state.area_outcome(Area::new(1, 2)), Outcome::Won(Player::B));
    assert_eq!(state.outcome(), Outcome::Won(Player::A));
    assert!(state.is_terminal());

    assert_eq!(state.result_for(Player::A), 1.0);
    assert_eq!(state.result_for(Player::B), -1.0);
    assert!(state.legal_moves().is_empty());
    assert!(state.legal_mask().iter().all(|&ok| !ok));
}

#[test]
fn test_game_result_through_rules() {
    let game = UltimateTicTacToe::new();
    let mut state = game.initial_state();
    for &(x, y, i, j) in &TOP_ROW_GAME {
        assert_eq!(game.game_ended(&state, Player::A), 0.0);
        state = game.next_state(&state, cell(x, y, i, j).to_action()).unwrap();
    }
    assert_eq!(game.game_ended(&state, Player::A), 1.0);
    assert_eq!(game.game_ended(&state, Player::B), -1.0);
    assert!(game.legal_actions(&state).is_empty());
}

#[test]
fn test_drawn_game() {
    use Cell::{Empty as E, Taken};
    const X: Cell = Taken(Player::A);
    const O: Cell = Taken(Player::B);

    let won_x = [[X, X, X], [E, E, E], [E, E, E]];
    let won_o = [[O, O, O], [E, E, E], [E, E, E]];
    let drawn = [[X, O, X], [X, O, O], [O, X, X]];

    // Macro grid: draws on top, then alternating winners with no line.
    let cells: Nested<Cell> = [
        [drawn, drawn, drawn],
        [won_x, won_o, won_x],
        [won_o, won_x, won_o],
    ];
    let state = BoardState::from_cells(cells, Player::A, CurrentArea::Free);

    assert_eq!(state.area_outcome(Area::new(0, 1)), Outcome::Draw);
    assert_eq!(state.outcome(), Outcome::Draw);
    assert_eq!(state.result_for(Player::A), DRAW_VALUE);
    assert_eq!(state.result_for(Player::B), DRAW_VALUE);
    assert!(state.legal_moves().is_empty());
    assert_eq!(
        state.check_move(cell(1, 1, 2, 2)),
        Err(MoveError::GameAlreadyDecided {
            outcome: Outcome::Draw
        })
    );
}

// =============================================================================
// Error ordering
// =============================================================================

#[test]
fn test_decided_game_reported_before_taken_cell() {
    let state = play(&TOP_ROW_GAME);
    let err = state.check_move(cell(0, 2, 1, 0)).unwrap_err();
    assert_eq!(
        err,
        MoveError::GameAlreadyDecided {
            outcome: Outcome::Won(Player::A)
        }
    );
    assert_eq!(err.to_string(), "player X already won, please start a new game");
}

#[test]
fn test_decided_area_reported_before_wrong_area() {
    let state = play(&[
        (0, 0, 0, 0),
        (0, 0, 1, 1),
        (1, 1, 1, 1),
        (1, 1, 0, 0),
        (0, 0, 0, 1),
        (0, 1, 0, 0),
        (0, 0, 0, 2),
    ]);
    // O must play in (0, 2); (0, 0) is both decided and the wrong area.
    assert_eq!(
        state.check_move(cell(0, 0, 2, 2)),
        Err(MoveError::AreaAlreadyDecided {
            area: Area::new(0, 0),
            outcome: Outcome::Won(Player::A),
        })
    );
}

#[test]
fn test_wrong_area_reported_before_taken_cell() {
    let state = play(&[(0, 0, 1, 1)]);
    assert_eq!(
        state.check_move(cell(0, 0, 1, 1)),
        Err(MoveError::WrongArea {
            required: Area::new(1, 1),
            attempted: Area::new(0, 0),
        })
    );
}

#[test]
fn test_cell_already_played() {
    let mut state = play(&[(0, 0, 1, 1), (1, 1, 0, 0)]);
    let before = state;

    let err = state.apply_move(cell(0, 0, 1, 1)).unwrap_err();
    assert_eq!(
        err,
        MoveError::CellAlreadyPlayed {
            cell: cell(0, 0, 1, 1),
            occupant: Player::A,
        }
    );
    assert_eq!(state, before);
}

// =============================================================================
// Views
// =============================================================================

#[test]
fn test_canonical_view_involution() {
    let state = play(&TOP_ROW_GAME[..9]);
    for player in Player::ALL {
        let once = state.canonical_view(player);
        let twice = uttt_core::rules::canonicalize(&once, player);
        assert_eq!(twice, state.to_flat());
    }
    assert_eq!(state.canonical_view(Player::A), state.to_flat());
}

#[test]
fn test_snapshot_round_trip() {
    let state = play(&TOP_ROW_GAME[..9]);
    let bytes = state.to_bytes().unwrap();
    assert_eq!(BoardState::from_bytes(&bytes).unwrap(), state);
    assert!(BoardState::from_bytes(&bytes[..3]).is_err());
}

#[test]
fn test_serde_json_round_trip() {
    let state = play(&TOP_ROW_GAME[..5]);
    let json = serde_json::to_string(&state).unwrap();
    let back: BoardState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}

// =============================================================================
// Random play-throughs
// =============================================================================

fn check_invariants(state: &BoardState) {
    for area in Area::all() {
        assert_eq!(state.area_outcome(area), evaluate(state.area_cells(area)));
    }
    assert_eq!(state.outcome(), evaluate(state.area_outcomes()));

    if let CurrentArea::Fixed(area) = state.current_area() {
        assert!(state.area_outcome(area).is_undetermined());
    }

    let moves = state.legal_moves();
    if state.is_terminal() {
        assert!(moves.is_empty());
    } else {
        assert!(!moves.is_empty());
    }
    for addr in &moves {
        assert!(state.current_area().permits(addr.area()));
        assert_eq!(state.cell(*addr), Cell::Empty);
    }

    let rebuilt = BoardState::from_flat(&state.to_flat(), state.current_player(), state.current_area())
        .unwrap();
    assert_eq!(&rebuilt, state);
}

proptest! {
    #[test]
    fn prop_random_playthrough_keeps_invariants(choices in prop::collection::vec(any::<u8>(), 0..81)) {
        let mut state = BoardState::new();
        check_invariants(&state);

        for choice in choices {
            let moves = state.legal_moves();
            if moves.is_empty() {
                break;
            }
            let addr = moves[choice as usize % moves.len()];
            let count = state.move_count();
            let mover = state.current_player();

            let next = state.with_move(addr).unwrap();
            prop_assert_eq!(next.move_count(), count + 1);
            prop_assert_eq!(next.cell(addr), Cell::Taken(mover));
            prop_assert_eq!(next.current_player(), mover.other());
            check_invariants(&next);
            state = next;
        }
    }

    #[test]
    fn prop_illegal_moves_leave_state_untouched(
        choices in prop::collection::vec(any::<u8>(), 0..40),
        action in 0usize..81,
    ) {
        let mut state = BoardState::new();
        for choice in choices {
            let moves = state.legal_moves();
            if moves.is_empty() {
                break;
            }
            state.apply_move(moves[choice as usize % moves.len()]).unwrap();
        }

        let before = state;
        let result = state.apply_action(action);
        prop_assert_eq!(result.is_ok(), before.is_legal_action(action));
        if result.is_err() {
            prop_assert_eq!(state, before);
        }
    }
}
