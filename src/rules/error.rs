//! Move rejections and board decoding errors.

use thiserror::Error;

use crate::core::{Area, CellAddr, FlatPos, Outcome, Player};

/// Why a move was rejected.
///
/// Checked in declaration order; `BoardState::check_move` reports the first
/// kind that applies. None of these are fatal: the state is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The game already has an outcome.
    #[error("{}", game_decided_message(*outcome))]
    GameAlreadyDecided { outcome: Outcome },

    /// The target area already has an outcome.
    #[error("{}", area_decided_message(*area, *outcome))]
    AreaAlreadyDecided { area: Area, outcome: Outcome },

    /// The mover is sent to a different area.
    #[error("the next area is {required}, not allowed to play in {attempted}")]
    WrongArea { required: Area, attempted: Area },

    /// Somebody already played the target cell.
    #[error("cell {cell} is already played by {occupant}")]
    CellAlreadyPlayed { cell: CellAddr, occupant: Player },
}

impl MoveError {
    /// Short name of the error kind, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            MoveError::GameAlreadyDecided { .. } => "game_already_decided",
            MoveError::AreaAlreadyDecided { .. } => "area_already_decided",
            MoveError::WrongArea { .. } => "wrong_area",
            MoveError::CellAlreadyPlayed { .. } => "cell_already_played",
        }
    }
}

fn game_decided_message(outcome: Outcome) -> String {
    match outcome {
        Outcome::Won(player) => format!("{player} already won, please start a new game"),
        _ => "the game was a draw, please start a new game".to_string(),
    }
}

fn area_decided_message(area: Area, outcome: Outcome) -> String {
    match outcome {
        Outcome::Won(player) => format!("local board {area} already won by {player}"),
        _ => format!("local board {area} was a draw"),
    }
}

/// Failure to build a `BoardState` from external data.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid cell value {value} at {pos}: expected -1, 0 or 1")]
    InvalidCellValue { pos: FlatPos, value: i8 },

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}
