//! State encoding for network input.

use crate::core::{Player, ACTION_SIZE, BOARD_SIZE};
use crate::nn::traits::EncodedState;
use crate::rules::BoardState;

/// Encodes a board into a tensor for network input.
pub trait StateEncoder: Send + Sync {
    /// Encode the state from `perspective`'s point of view.
    fn encode(&self, state: &BoardState, perspective: Player) -> EncodedState;

    /// Get the shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Length of the policy vector.
    fn action_space_size(&self) -> usize {
        ACTION_SIZE
    }
}

/// Two 9×9 planes in flat layout.
///
/// - plane 0: canonical board, `+1` for `perspective`'s cells, `-1` for the
///   opponent's, `0` for empty
/// - plane 1: `1` where the player to move may play, `0` elsewhere
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoPlaneEncoder;

impl TwoPlaneEncoder {
    /// Number of planes.
    pub const PLANES: usize = 2;

    /// Create a new encoder.
    pub fn new() -> Self {
        Self
    }
}

impl StateEncoder for TwoPlaneEncoder {
    fn encode(&self, state: &BoardState, perspective: Player) -> EncodedState {
        let board = state.canonical_view(perspective);
        let mask = state.legal_mask_flat();

        let mut tensor = Vec::with_capacity(Self::PLANES * BOARD_SIZE * BOARD_SIZE);
        tensor.extend(board.iter().flatten().map(|&v| f32::from(v)));
        tensor.extend(mask.iter().flatten().map(|&ok| if ok { 1.0 } else { 0.0 }));

        EncodedState::new(tensor, self.output_shape())
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![Self::PLANES, BOARD_SIZE, BOARD_SIZE]
    }
}
