//! # uttt-core
//!
//! Ultimate Tic-Tac-Toe rules for AlphaZero-style training.
//!
//! ## Design Principles
//!
//! 1. **Values, not objects**: `BoardState` is `Copy`. Successors are new
//!    values; search never resets or re-initialises a shared board.
//!
//! 2. **Recoverable errors**: An illegal move is a `MoveError` describing
//!    what was wrong. The state is never touched on error.
//!
//! 3. **One coordinate system at a time**: Cells are addressed as nested
//!    `(x, y, i, j)`, flat `(m, n)` or action `k`; `core::index` owns every
//!    conversion between them.
//!
//! ## Modules
//!
//! - `core`: players, cells, outcomes and coordinate mapping
//! - `rules`: board state machine, outcome evaluation, errors, `GameRules`
//! - `symmetry`: board/policy transforms for data augmentation
//! - `nn`: encoder and predictor interface
//! - `training`: samples, trajectories and self-play
//!
//! ## Example
//!
//! ```rust
//! use uttt_core::{Area, BoardState, CellAddr, CurrentArea, MoveError};
//!
//! let mut board = BoardState::new();
//! board.apply_move(CellAddr::new(0, 0, 1, 1)).unwrap();
//! assert_eq!(board.current_area(), CurrentArea::Fixed(Area::new(1, 1)));
//!
//! let err = board.apply_move(CellAddr::new(2, 2, 0, 0)).unwrap_err();
//! assert!(matches!(err, MoveError::WrongArea { .. }));
//! ```

pub mod core;
pub mod nn;
pub mod rules;
pub mod symmetry;
pub mod training;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Area, Cell, CellAddr, CurrentArea, FlatBoard, FlatPos, Outcome, Player, ACTION_SIZE,
    BOARD_SIZE,
};

pub use crate::rules::{
    canonicalize, evaluate, BoardError, BoardState, GameRules, MoveError, UltimateTicTacToe,
    DRAW_VALUE,
};

pub use crate::symmetry::{AugmentConfig, SymmetryGroup, SymmetrySample, Transform};

pub use crate::nn::{EncodedState, PolicyValueNetwork, StateEncoder, TwoPlaneEncoder};

pub use crate::training::{ExperienceBuffer, SelfPlayConfig, SelfPlayWorker, TrainingSample, Trajectory};
