//! Rules engine trait for search and self-play drivers.
//!
//! External drivers (tree search, self-play, arena play) only talk to the
//! game through this trait:
//! - the initial state and the tensor/action sizes
//! - successors of a state for an action index
//! - the legal-action mask
//! - the result from a player's point of view
//! - the canonical board and its symmetries
//!
//! Every method takes the state by reference and returns new values, so a
//! driver never has to copy or reset a shared game object.

use crate::core::{FlatBoard, Player, ACTION_SIZE, BOARD_SIZE};
use crate::symmetry::{AugmentConfig, SymmetrySample};

use super::board::BoardState;
use super::error::MoveError;

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `next_state`: must be deterministic and must not touch `state`
/// - `game_ended`: `0` while running, `±1` for a decided game,
///   a small non-zero value for a draw
/// - `symmetries`: the first entry must be the untransformed sample
pub trait GameRules {
    /// Game state type.
    type State: Clone;

    /// Get the starting state.
    fn initial_state(&self) -> Self::State;

    /// Dimensions of the board tensor.
    fn board_size(&self) -> (usize, usize);

    /// Number of actions; the length of policy vectors.
    fn action_size(&self) -> usize;

    /// Get the state after the player to move takes `action`.
    fn next_state(&self, state: &Self::State, action: usize) -> Result<Self::State, MoveError>;

    /// Legal actions as a mask indexed by action.
    fn valid_moves(&self, state: &Self::State) -> Vec<bool>;

    /// Result of the game from `player`'s point of view.
    fn game_ended(&self, state: &Self::State, player: Player) -> f32;

    /// Board from `player`'s perspective.
    fn canonical_form(&self, state: &Self::State, player: Player) -> FlatBoard;

    /// Equivalent samples for training.
    fn symmetries(
        &self,
        sample: &SymmetrySample,
        config: &AugmentConfig,
    ) -> Vec<SymmetrySample>;

    /// Hashable key for a state.
    fn string_representation(&self, state: &Self::State) -> String;

    // === Convenience Methods ===

    /// Enumerate legal action indices.
    fn legal_actions(&self, state: &Self::State) -> Vec<usize> {
        self.valid_moves(state)
            .into_iter()
            .enumerate()
            .filter_map(|(k, legal)| legal.then_some(k))
            .collect()
    }
}

/// Ultimate Tic-Tac-Toe rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct UltimateTicTacToe;

impl UltimateTicTacToe {
    /// Create the rules object.
    pub fn new() -> Self {
        Self
    }
}

impl GameRules for UltimateTicTacToe {
    type State = BoardState;

    fn initial_state(&self) -> BoardState {
        BoardState::new()
    }

    fn board_size(&self) -> (usize, usize) {
        (BOARD_SIZE, BOARD_SIZE)
    }

    fn action_size(&self) -> usize {
        ACTION_SIZE
    }

    fn next_state(&self, state: &BoardState, action: usize) -> Result<BoardState, MoveError> {
        state.with_action(action)
    }

    fn valid_moves(&self, state: &BoardState) -> Vec<bool> {
        state.legal_mask().to_vec()
    }

    fn game_ended(&self, state: &BoardState, player: Player) -> f32 {
        state.result_for(player)
    }

    fn canonical_form(&self, state: &BoardState, player: Player) -> FlatBoard {
        state.canonical_view(player)
    }

    fn symmetries(
        &self,
        sample: &SymmetrySample,
        config: &AugmentConfig,
    ) -> Vec<SymmetrySample> {
        sample.symmetries(config)
    }

    fn string_representation(&self, state: &BoardState) -> String {
        state.key()
    }
}
