//! Game rules: board state machine, outcome evaluation and move errors.
//!
//! ## Overview
//!
//! - [`BoardState`]: the full game position and its transitions
//! - [`evaluate`]: three-in-a-row evaluation shared by areas and the macro grid
//! - [`MoveError`]: why a move was rejected
//! - [`GameRules`]: the interface search and self-play drivers consume

pub mod board;
pub mod engine;
pub mod error;
pub mod outcome;
mod pretty;

pub use board::{canonicalize, outcome_value, BoardState, MoveList, DRAW_VALUE};
pub use engine::{GameRules, UltimateTicTacToe};
pub use error::{BoardError, MoveError};
pub use outcome::{evaluate, line_winner, Mark, LINES};
