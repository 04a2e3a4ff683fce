//! Network integration.
//!
//! ## Overview
//!
//! - **Encoding**: `StateEncoder` trait and the `TwoPlaneEncoder` implementation
//! - **Prediction**: `PolicyValueNetwork`, implemented outside the crate
//! - **Baseline**: `UniformPolicyZeroValue` for testing
//!
//! ## Usage
//!
//! ```rust
//! use uttt_core::core::Player;
//! use uttt_core::nn::{mask_policy, PolicyValueNetwork, StateEncoder, TwoPlaneEncoder, UniformPolicyZeroValue};
//! use uttt_core::rules::BoardState;
//!
//! let state = BoardState::new();
//! let encoded = TwoPlaneEncoder::new().encode(&state, Player::A);
//! let (policy, value) = UniformPolicyZeroValue::new(81).predict(&encoded);
//! let policy = mask_policy(&policy, &state.legal_mask());
//! assert_eq!(policy.len(), 81);
//! assert_eq!(value, 0.0);
//! ```

pub mod encoder;
pub mod traits;

pub use encoder::{StateEncoder, TwoPlaneEncoder};
pub use traits::{mask_policy, EncodedState, PolicyValueNetwork, UniformPolicyZeroValue};
