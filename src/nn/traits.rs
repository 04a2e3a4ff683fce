//! Predictor interface for policy and value estimation.
//!
//! The engine never evaluates positions itself; an external network (usually
//! in Python) implements [`PolicyValueNetwork`] and search drivers call it.

use serde::{Deserialize, Serialize};

/// Encoded game state as a flat tensor for network input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor, e.g. `[2, 9, 9]`.
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Create a zero-filled encoded state with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    /// Borrow one leading-axis slice, e.g. a plane of a `[C, H, W]` tensor.
    #[must_use]
    pub fn plane(&self, index: usize) -> Option<&[f32]> {
        let (&count, rest) = self.shape.split_first()?;
        if index >= count {
            return None;
        }
        let size: usize = rest.iter().product();
        self.tensor.get(index * size..(index + 1) * size)
    }
}

/// Combined policy-value network.
///
/// `predict` returns `(policy, value)`: 81 action probabilities and a value
/// in `[-1, 1]` from the perspective of the player to move.
pub trait PolicyValueNetwork: Send + Sync {
    /// Predict policy and value for the given state.
    fn predict(&self, encoded: &EncodedState) -> (Vec<f32>, f32);

    /// Batch prediction for multiple states.
    fn predict_batch(&self, encoded: &[EncodedState]) -> Vec<(Vec<f32>, f32)> {
        encoded.iter().map(|e| self.predict(e)).collect()
    }
}

/// Uniform policy and zero value (baseline for testing).
#[derive(Clone, Debug, Default)]
pub struct UniformPolicyZeroValue {
    action_space_size: usize,
}

impl UniformPolicyZeroValue {
    /// Create a new baseline network.
    pub fn new(action_space_size: usize) -> Self {
        Self { action_space_size }
    }
}

impl PolicyValueNetwork for UniformPolicyZeroValue {
    fn predict(&self, _encoded: &EncodedState) -> (Vec<f32>, f32) {
        if self.action_space_size == 0 {
            return (vec![], 0.0);
        }
        let prob = 1.0 / self.action_space_size as f32;
        (vec![prob; self.action_space_size], 0.0)
    }
}

/// Zero out illegal actions and renormalise.
///
/// Falls back to uniform over legal actions when the network puts no mass on
/// any of them. Returns all zeros if nothing is legal.
pub fn mask_policy(policy: &[f32], legal: &[bool]) -> Vec<f32> {
    debug_assert_eq!(policy.len(), legal.len());
    let mut masked: Vec<f32> = policy
        .iter()
        .zip(legal)
        .map(|(&p, &ok)| if ok { p.max(0.0) } else { 0.0 })
        .collect();

    let total: f32 = masked.iter().sum();
    if total > 0.0 {
        masked.iter_mut().for_each(|p| *p /= total);
        return masked;
    }

    let count = legal.iter().filter(|&&ok| ok).count();
    if count > 0 {
        let prob = 1.0 / count as f32;
        for (p, &ok) in masked.iter_mut().zip(legal) {
            if ok {
                *p = prob;
            }
        }
    }
    masked
}
