//! Training data generation.
//!
//! ## Overview
//!
//! - **TrainingSample**: board, policy, current area and value target
//! - **Trajectory**: one recorded game; **ExperienceBuffer** keeps recent games
//! - **SelfPlayWorker**: plays games from a network's policy
//!
//! ## Usage
//!
//! ```rust
//! use uttt_core::nn::{TwoPlaneEncoder, UniformPolicyZeroValue};
//! use uttt_core::symmetry::AugmentConfig;
//! use uttt_core::training::{ExperienceBuffer, SelfPlayConfig, SelfPlayWorker};
//!
//! let worker = SelfPlayWorker::new(Box::new(TwoPlaneEncoder::new()), SelfPlayConfig::default());
//! let network = UniformPolicyZeroValue::new(81);
//!
//! let mut buffer = ExperienceBuffer::new(100);
//! for trajectory in worker.play_games(&network, 2) {
//!     buffer.push(trajectory);
//! }
//!
//! let batch = buffer.sample_batch(32, 0);
//! assert!(!batch.is_empty());
//! let augmented = batch[0].symmetries(&AugmentConfig::default());
//! assert_eq!(augmented.len(), 64);
//! ```

pub mod sample;
pub mod self_play;
pub mod trajectory;

pub use sample::TrainingSample;
pub use self_play::{random_playout, select_action, SelfPlayConfig, SelfPlayWorker};
pub use trajectory::{ExperienceBuffer, Step, Trajectory};
